// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Traits for accessing and manipulating memory mapped registers.
//!
//! Which traits a register type implements encodes its hardware access
//! mode: a read-only register implements [`Readable`] alone, a write-only
//! register [`Writeable`] alone, and a read-write register both, which
//! makes the blanket [`ReadWriteable`] implementation available.

use crate::fields::{Field, FieldValue, TryFromValue};
use crate::{LocalRegisterCopy, RegisterLongName, UIntLike};

/// Readable register.
///
/// Each `get` is a single volatile load of the register's natural width.
pub trait Readable {
    type T: UIntLike;
    type R: RegisterLongName;

    /// Get the raw register value.
    fn get(&self) -> Self::T;

    /// Read the value of the given field.
    #[inline]
    fn read(&self, field: Field<Self::T, Self::R>) -> Self::T {
        field.read(self.get())
    }

    /// Read the value of the given field as an enumerated value, if the
    /// silicon documents one for the raw value.
    #[inline]
    fn read_as_enum<E: TryFromValue<Self::T, EnumType = E>>(
        &self,
        field: Field<Self::T, Self::R>,
    ) -> Option<E> {
        field.read_as_enum(self.get())
    }

    /// Make a local copy of the register, so several fields can be
    /// inspected from one bus transaction.
    #[inline]
    fn extract(&self) -> LocalRegisterCopy<Self::T, Self::R> {
        LocalRegisterCopy::new(self.get())
    }

    /// Check if any bit of the given field is set.
    #[inline]
    fn is_set(&self, field: Field<Self::T, Self::R>) -> bool {
        field.is_set(self.get())
    }

    /// Check if any bit covered by the given field value is set.
    #[inline]
    fn any_matching_bits_set(&self, field: FieldValue<Self::T, Self::R>) -> bool {
        self.get() & field.mask() != Self::T::zero()
    }

    /// Check if all the bits of the given field value match.
    #[inline]
    fn matches_all(&self, field: FieldValue<Self::T, Self::R>) -> bool {
        field.matches(self.get())
    }
}

/// Writeable register.
///
/// Each `set` is a single volatile store of the register's natural width;
/// a field update composed with `+` is never split across transactions.
pub trait Writeable {
    type T: UIntLike;
    type R: RegisterLongName;

    /// Set the raw register value.
    fn set(&self, value: Self::T);

    /// Write the value of one or more fields, zeroing every other bit of
    /// the register.
    #[inline]
    fn write(&self, field: FieldValue<Self::T, Self::R>) {
        self.set(field.value());
    }
}

/// Read-modify-write access for registers that are both readable and
/// writeable.
///
/// `modify` is three steps — volatile read, merge, volatile write — and is
/// NOT atomic with respect to an interrupt handler or another bus master
/// touching the same register between the read and the write. Where the
/// silicon provides paired set/clear companion registers, those are the
/// race-free alternative; this trait exists for fields that have none.
pub trait ReadWriteable {
    type T: UIntLike;
    type R: RegisterLongName;

    /// Write the value of one or more fields, leaving the other bits of
    /// the register unchanged.
    fn modify(&self, field: FieldValue<Self::T, Self::R>);

    /// As `modify`, but merging into a previously read copy instead of
    /// performing a fresh read.
    fn modify_no_read(
        &self,
        original: LocalRegisterCopy<Self::T, Self::R>,
        field: FieldValue<Self::T, Self::R>,
    );
}

impl<T: UIntLike, R: RegisterLongName, S> ReadWriteable for S
where
    S: Readable<T = T, R = R> + Writeable<T = T, R = R>,
{
    type T = T;
    type R = R;

    #[inline]
    fn modify(&self, field: FieldValue<T, R>) {
        self.set(field.modify(self.get()));
    }

    #[inline]
    fn modify_no_read(&self, original: LocalRegisterCopy<T, R>, field: FieldValue<T, R>) {
        self.set(field.modify(original.get()));
    }
}
