// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! DK6 Register Interface
//!
//! Provides efficient mechanisms to express and use type-checked memory
//! mapped registers and bitfields.
//!
//! ```rust
//! use dk6_registers::registers::{ReadOnly, ReadWrite};
//! use dk6_registers::register_bitfields;
//!
//! // Register maps are specified like this:
//! #[repr(C)]
//! struct Registers {
//!     // Configuration register: read-write
//!     cfg: ReadWrite<u32, Config::Register>,
//!     // Status register: read-only
//!     stat: ReadOnly<u32, Status::Register>,
//! }
//!
//! // Register fields and definitions look like this:
//! register_bitfields![u32,
//!     // Simpler bitfields are expressed concisely:
//!     Config [
//!         /// Enable the peripheral
//!         ENABLE 0,
//!         /// Invert the output polarity
//!         POLARITY 5
//!     ],
//!
//!     // More complex registers can express subtypes:
//!     Status [
//!         RXRDY  OFFSET(0) NUMBITS(1) [],
//!         TXRDY  OFFSET(2) NUMBITS(1) [],
//!         MODE   OFFSET(4) NUMBITS(2) [
//!             Idle = 0,
//!             Receive = 1,
//!             Transmit = 2
//!         ]
//!     ]
//! ];
//! ```
//!
//! The layout of a whole peripheral is declared with [`register_structs!`],
//! which checks every declared offset and the total size at compile time.

#![no_std]

pub mod fields;
pub mod interfaces;
pub mod macros;
pub mod registers;

mod local_register;
pub use local_register::LocalRegisterCopy;

mod static_ref;
pub use static_ref::StaticRef;

use core::fmt::Debug;
use core::ops::{BitAnd, BitOr, Not, Shl, Shr};

/// Trait representing the base type of registers.
///
/// `UIntLike` defines the properties a type must have so that a register
/// holding it can be read, written, and modified through field operations.
/// It is implemented for the unsigned integer widths the hardware exposes
/// registers in.
pub trait UIntLike:
    BitAnd<Output = Self>
    + BitOr<Output = Self>
    + Not<Output = Self>
    + Eq
    + Shr<usize, Output = Self>
    + Shl<usize, Output = Self>
    + Copy
    + Clone
    + Debug
{
    /// The representation of the value `0` in the implementing type.
    fn zero() -> Self;
}

macro_rules! UIntLike_impl_for {
    ($type:ty) => {
        impl UIntLike for $type {
            fn zero() -> Self {
                0
            }
        }
    };
}

UIntLike_impl_for!(u8);
UIntLike_impl_for!(u16);
UIntLike_impl_for!(u32);
UIntLike_impl_for!(u64);
UIntLike_impl_for!(usize);

/// Descriptive name for each register.
pub trait RegisterLongName {}

impl RegisterLongName for () {}
