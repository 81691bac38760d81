// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! A local copy of a register value.

use core::fmt;
use core::marker::PhantomData;

use crate::fields::{Field, FieldValue, TryFromValue};
use crate::{RegisterLongName, UIntLike};

/// A register value captured into ordinary memory.
///
/// Behaves like a read-only register, but every accessor works on the
/// captured copy instead of issuing a volatile load. This lets a driver
/// read a register once and then check several bits, which matters for
/// read-to-clear status registers whose value is destroyed by the very
/// first read.
#[derive(Copy, Clone)]
pub struct LocalRegisterCopy<T: UIntLike, R: RegisterLongName = ()> {
    value: T,
    associated_register: PhantomData<R>,
}

impl<T: UIntLike, R: RegisterLongName> LocalRegisterCopy<T, R> {
    pub const fn new(value: T) -> Self {
        LocalRegisterCopy {
            value,
            associated_register: PhantomData,
        }
    }

    /// Get the raw value of the copy.
    #[inline]
    pub fn get(&self) -> T {
        self.value
    }

    /// Read the value of the given field.
    #[inline]
    pub fn read(&self, field: Field<T, R>) -> T {
        field.read(self.value)
    }

    /// Read the value of the given field as an enumerated value.
    #[inline]
    pub fn read_as_enum<E: TryFromValue<T, EnumType = E>>(&self, field: Field<T, R>) -> Option<E> {
        field.read_as_enum(self.value)
    }

    /// Check if any bit of the given field is set.
    #[inline]
    pub fn is_set(&self, field: Field<T, R>) -> bool {
        field.is_set(self.value)
    }

    /// Check if any bit covered by the given field value is set.
    #[inline]
    pub fn any_matching_bits_set(&self, field: FieldValue<T, R>) -> bool {
        self.value & field.mask() != T::zero()
    }

    /// Check if all the bits of the given field value match.
    #[inline]
    pub fn matches_all(&self, field: FieldValue<T, R>) -> bool {
        field.matches(self.value)
    }

    /// Bitwise AND with a raw value, yielding a new copy.
    #[inline]
    pub fn bitand(&self, rhs: T) -> LocalRegisterCopy<T, R> {
        LocalRegisterCopy::new(self.value & rhs)
    }
}

impl<T: UIntLike + fmt::Debug, R: RegisterLongName> fmt::Debug for LocalRegisterCopy<T, R> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{:?}", self.value)
    }
}

macro_rules! From_impl_for {
    ($type:ty) => {
        impl<R: RegisterLongName> From<LocalRegisterCopy<$type, R>> for $type {
            fn from(r: LocalRegisterCopy<$type, R>) -> $type {
                r.value
            }
        }
    };
}

From_impl_for!(u8);
From_impl_for!(u16);
From_impl_for!(u32);
From_impl_for!(u64);
From_impl_for!(usize);
