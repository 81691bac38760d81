// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Core exception numbering.
//!
//! The Cortex-M4 dispatches exceptions and interrupts purely by position
//! in the vector table. Core exceptions occupy the fixed slots below the
//! device interrupts and are conventionally numbered with negative ids,
//! so that device interrupt 0 is the first vendor-defined slot. The
//! physical table index of an exception is `id + 16`.

/// The architecturally fixed core exceptions.
///
/// The discriminants are the conventional signed ids: all negative, with
/// gaps where the architecture reserves slots. Device interrupts are
/// numbered from 0 upward by the chip crates and can never collide with
/// these.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[repr(i32)]
pub enum Exception {
    /// Reset entry. Slot 1 of the physical table (slot 0 is the initial
    /// stack pointer, not a handler).
    Reset = -15,
    /// Non-maskable interrupt.
    NonMaskableInt = -14,
    /// All fault conditions not claimed by the fine-grained fault
    /// handlers.
    HardFault = -13,
    /// MPU access violation.
    MemoryManagement = -12,
    /// Bus error on instruction or data access.
    BusFault = -11,
    /// Undefined instruction or illegal state.
    UsageFault = -10,
    /// Supervisor call (`svc` instruction).
    SVCall = -5,
    /// Debug monitor.
    DebugMonitor = -4,
    /// Pendable request for system service.
    PendSV = -2,
    /// System tick timer.
    SysTick = -1,
}

impl Exception {
    /// The signed exception id.
    pub const fn id(self) -> i32 {
        self as i32
    }

    /// The slot this exception occupies in the physical vector table.
    pub const fn vector_index(self) -> usize {
        (self as i32 + 16) as usize
    }
}

/// All core exceptions, in physical table order.
pub const ALL_EXCEPTIONS: [Exception; 10] = [
    Exception::Reset,
    Exception::NonMaskableInt,
    Exception::HardFault,
    Exception::MemoryManagement,
    Exception::BusFault,
    Exception::UsageFault,
    Exception::SVCall,
    Exception::DebugMonitor,
    Exception::PendSV,
    Exception::SysTick,
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exception_ids_are_negative_and_unique() {
        for (i, e) in ALL_EXCEPTIONS.iter().enumerate() {
            assert!(e.id() < 0);
            assert!(e.id() >= -15);
            for other in ALL_EXCEPTIONS.iter().skip(i + 1) {
                assert_ne!(e.id(), other.id());
            }
        }
    }

    #[test]
    fn table_order_is_ascending() {
        for pair in ALL_EXCEPTIONS.windows(2) {
            assert!(pair[0].id() < pair[1].id());
        }
        assert_eq!(Exception::Reset.vector_index(), 1);
        assert_eq!(Exception::SysTick.vector_index(), 15);
    }
}
