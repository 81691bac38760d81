// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Cortex-M4 NVIC
//!
//! The nested vectored interrupt controller, at its architected location
//! in the system control space. The M4 supports up to 240 external
//! interrupt inputs in banks of 32; the enable, pending and active state
//! of every input lives in the ISER/ICER/ISPR/ICPR/IABR banks.
//!
//! ISER/ICER and ISPR/ICPR are set/clear register pairs: writing a one
//! bit changes exactly that input's state in a single bus transaction,
//! writing zero bits is a no-op. All state changes in this module go
//! through these pairs, so no read-modify-write cycle — and therefore no
//! race window against handlers running on the same core — ever occurs.

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

register_structs! {
    /// NVIC registers.
    pub NvicRegisters {
        (0x000 => _reserved0),
        /// Interrupt Controller Type Register.
        (0x004 => ictr: ReadOnly<u32, InterruptControllerType::Register>),
        (0x008 => _reserved1),
        /// Interrupt Set-Enable Registers.
        (0x100 => iser: [ReadWrite<u32, SetClear::Register>; 8]),
        (0x120 => _reserved2),
        /// Interrupt Clear-Enable Registers.
        (0x180 => icer: [ReadWrite<u32, SetClear::Register>; 8]),
        (0x1A0 => _reserved3),
        /// Interrupt Set-Pending Registers.
        (0x200 => ispr: [ReadWrite<u32, SetClear::Register>; 8]),
        (0x220 => _reserved4),
        /// Interrupt Clear-Pending Registers.
        (0x280 => icpr: [ReadWrite<u32, SetClear::Register>; 8]),
        (0x2A0 => _reserved5),
        /// Interrupt Active Bit Registers.
        (0x300 => iabr: [ReadOnly<u32, SetClear::Register>; 8]),
        (0x320 => _reserved6),
        /// Interrupt Priority Registers.
        (0x400 => ipr: [ReadWrite<u32, Priority::Register>; 60]),
        (0x4F0 => @END),
    }
}

register_bitfields![u32,
    pub InterruptControllerType [
        /// Total number of interrupt lines in groups of 32.
        INTLINESNUM OFFSET(0) NUMBITS(4) []
    ],

    pub SetClear [
        /// In register n, bit m covers interrupt input 32*n + m.
        BITS OFFSET(0) NUMBITS(32) []
    ],

    pub Priority [
        /// Priority of interrupt number 4n.
        PRI_N0 OFFSET(0) NUMBITS(8) [],
        /// Priority of interrupt number 4n+1.
        PRI_N1 OFFSET(8) NUMBITS(8) [],
        /// Priority of interrupt number 4n+2.
        PRI_N2 OFFSET(16) NUMBITS(8) [],
        /// Priority of interrupt number 4n+3.
        PRI_N3 OFFSET(24) NUMBITS(8) []
    ]
];

/// The NVIC in MMIO space.
const NVIC: StaticRef<NvicRegisters> =
    unsafe { StaticRef::new(0xE000E000 as *const NvicRegisters) };

/// Number of implemented ISER/ICER/... banks, from the ICTR.
fn number_of_banks() -> usize {
    (NVIC.ictr.read(InterruptControllerType::INTLINESNUM) + 1) as usize
}

/// Clear all pending interrupts.
pub unsafe fn clear_all_pending() {
    for icpr in NVIC.icpr.iter().take(number_of_banks()) {
        icpr.set(!0);
    }
}

/// Enable all interrupts.
pub unsafe fn enable_all() {
    for iser in NVIC.iser.iter().take(number_of_banks()) {
        iser.set(!0);
    }
}

/// Disable all interrupts.
pub unsafe fn disable_all() {
    for icer in NVIC.icer.iter().take(number_of_banks()) {
        icer.set(!0);
    }
}

/// The lowest-numbered pending interrupt, or `None` if none are pending.
pub unsafe fn next_pending() -> Option<u32> {
    for (bank, ispr) in NVIC.ispr.iter().take(number_of_banks()).enumerate() {
        let ispr = ispr.get();
        if ispr != 0 {
            return Some(bank as u32 * 32 + ispr.trailing_zeros());
        }
    }
    None
}

/// An opaque handle to a single NVIC interrupt input.
///
/// Chip crates create one per device vector and hand it to the driver
/// that services that vector, so each driver can control its own input
/// and no other.
pub struct Nvic(u32);

impl Nvic {
    /// Creates a new `Nvic` handle.
    ///
    /// ## Safety
    ///
    /// `idx` must be a device vector the chip actually implements, and
    /// only chip or platform configuration code should mint handles.
    pub const unsafe fn new(idx: u32) -> Nvic {
        Nvic(idx)
    }

    /// Enable the interrupt. One write to the set-enable companion.
    pub fn enable(&self) {
        let idx = self.0 as usize;
        NVIC.iser[idx / 32].set(1 << (self.0 & 31));
    }

    /// Disable the interrupt. One write to the clear-enable companion.
    pub fn disable(&self) {
        let idx = self.0 as usize;
        NVIC.icer[idx / 32].set(1 << (self.0 & 31));
    }

    /// Clear any pending state. One write to the clear-pending companion.
    pub fn clear_pending(&self) {
        let idx = self.0 as usize;
        NVIC.icpr[idx / 32].set(1 << (self.0 & 31));
    }
}
