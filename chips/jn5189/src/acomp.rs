// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Analog comparator.
//!
//! Shares its vector with the brown-out detector ([`crate::pmc`]); a
//! handler for that vector reads [`Acomp::edge_detected`] and
//! `pmc::Pmc::brownout_detected` to tell the sources apart.

use dk6_registers::interfaces::{ReadWriteable, Readable};
use dk6_registers::registers::ReadWrite;
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::ACOMP_BASE;

register_structs! {
    pub AcompRegisters {
        /// Comparator control and status.
        (0x00 => ctrl: ReadWrite<u32, CTRL::Register>),
        /// Voltage ladder control.
        (0x04 => lad: ReadWrite<u32, LAD::Register>),
        (0x08 => @END),
    }
}

register_bitfields![u32,
    pub CTRL [
        /// Which output edges latch the edge flag.
        EDGESEL OFFSET(3) NUMBITS(2) [
            Falling = 0,
            Rising = 1,
            Both = 2
        ],
        /// Synchronize the output to the bus clock.
        COMPSA OFFSET(6) NUMBITS(1) [],
        /// Positive input select.
        COMP_VP_SEL OFFSET(8) NUMBITS(3) [],
        /// Negative input select.
        COMP_VM_SEL OFFSET(11) NUMBITS(3) [],
        /// Write 1 then 0 to clear the latched edge flag.
        EDGECLR OFFSET(20) NUMBITS(1) [],
        /// Current comparator output. Read-only.
        COMPSTAT OFFSET(21) NUMBITS(1) [],
        /// A selected edge was latched. Read-only.
        COMPEDGE OFFSET(23) NUMBITS(1) [],
        /// Hysteresis select.
        HYS OFFSET(25) NUMBITS(2) [
            None = 0,
            Hys5mV = 1,
            Hys10mV = 2,
            Hys20mV = 3
        ]
    ],
    pub LAD [
        /// Voltage ladder enable.
        LADEN OFFSET(0) NUMBITS(1) [],
        /// Ladder tap select.
        LADSEL OFFSET(1) NUMBITS(5) [],
        /// Ladder reference select.
        LADREF OFFSET(6) NUMBITS(1) []
    ]
];

/// A handle to the analog comparator.
pub struct Acomp {
    registers: StaticRef<AcompRegisters>,
}

impl Acomp {
    /// Creates the handle for the comparator.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Acomp {
        Acomp {
            registers: unsafe { StaticRef::new(ACOMP_BASE as *const AcompRegisters) },
        }
    }

    /// The vector this comparator shares with the brown-out detector.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::BOD_ACOMP
    }

    /// The comparator output is currently high.
    pub fn output_high(&self) -> bool {
        self.registers.ctrl.is_set(CTRL::COMPSTAT)
    }

    /// A selected edge was latched since the last clear.
    pub fn edge_detected(&self) -> bool {
        self.registers.ctrl.is_set(CTRL::COMPEDGE)
    }

    /// Clear the latched edge: the documented 1-then-0 toggle of
    /// EDGECLR.
    pub fn clear_edge(&self) {
        self.registers.ctrl.modify(CTRL::EDGECLR::SET);
        self.registers.ctrl.modify(CTRL::EDGECLR::CLEAR);
    }

    /// Latch on rising edges of the output.
    pub fn watch_rising(&self) {
        self.registers.ctrl.modify(CTRL::EDGESEL::Rising);
    }
}
