// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Power management controller: the brown-out detector's control and
//! status.
//!
//! The detector shares its vector with the analog comparator
//! ([`crate::acomp`]); the latched BODINT flag is what a handler for
//! that vector checks first.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::PMC_BASE;

register_structs! {
    pub PmcRegisters {
        /// Brown-out behavior control.
        (0x00 => ctrl: ReadWrite<u32, CTRL::Register>),
        /// Brown-out threshold configuration.
        (0x04 => bodctrl: ReadWrite<u32, BODCTRL::Register>),
        /// Brown-out status.
        (0x08 => bodstat: ReadOnly<u32, BODSTAT::Register>),
        /// Write: clear latched brown-out status. One transaction.
        (0x0C => bodclr: WriteOnly<u32, BODCLR::Register>),
        (0x10 => @END),
    }
}

register_bitfields![u32,
    pub CTRL [
        /// Brown-out detector enable.
        BODENA OFFSET(0) NUMBITS(1) [],
        /// A brown-out resets the chip.
        BODRSTENA OFFSET(1) NUMBITS(1) [],
        /// A brown-out raises the shared interrupt.
        BODINTENA OFFSET(2) NUMBITS(1) []
    ],
    pub BODCTRL [
        /// Detection threshold.
        TRIGLVL OFFSET(0) NUMBITS(2) [
            V1_75 = 0,
            V2_0 = 1,
            V2_3 = 2,
            V2_7 = 3
        ],
        /// Threshold hysteresis.
        HYST OFFSET(2) NUMBITS(2) []
    ],
    pub BODSTAT [
        /// A brown-out event was latched.
        BODINT OFFSET(0) NUMBITS(1) [],
        /// The supply is currently below the threshold.
        BODPWR OFFSET(1) NUMBITS(1) []
    ],
    pub BODCLR [
        /// Write 1 to clear the latched BODINT flag.
        CLEAR OFFSET(0) NUMBITS(1) []
    ]
];

/// A handle to the power management controller.
pub struct Pmc {
    registers: StaticRef<PmcRegisters>,
}

impl Pmc {
    /// Creates the handle for the PMC.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Pmc {
        Pmc {
            registers: unsafe { StaticRef::new(PMC_BASE as *const PmcRegisters) },
        }
    }

    /// The vector the brown-out detector shares with the comparator.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::BOD_ACOMP
    }

    /// Enable detection with interrupt on brown-out.
    pub fn enable_detector(&self, level: BODCTRL::TRIGLVL::Value) {
        self.registers.bodctrl.write(BODCTRL::TRIGLVL.val(level as u32));
        self.registers.ctrl.modify(CTRL::BODENA::SET + CTRL::BODINTENA::SET);
    }

    /// A brown-out event was latched since the last clear.
    pub fn brownout_detected(&self) -> bool {
        self.registers.bodstat.is_set(BODSTAT::BODINT)
    }

    /// The supply is below the threshold right now.
    pub fn supply_low(&self) -> bool {
        self.registers.bodstat.is_set(BODSTAT::BODPWR)
    }

    /// Acknowledge the latched event. One write to the clear register.
    pub fn clear_brownout(&self) {
        self.registers.bodclr.write(BODCLR::CLEAR::SET);
    }
}
