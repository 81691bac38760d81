// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! GPIO group interrupt (GINT0).
//!
//! Any subset of port pins, each with a chosen polarity, combines by AND
//! or OR into one event — and every contributing pin funnels into the
//! single GINT0 vector.

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::registers::ReadWrite;
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::GINT0_BASE;

register_structs! {
    pub GintRegisters {
        /// Group interrupt control.
        (0x00 => ctrl: ReadWrite<u32, CTRL::Register>),
        (0x04 => _reserved0),
        /// Pin polarity select: a one means the pin contributes when
        /// high.
        (0x20 => port_pol: ReadWrite<u32, PORT::Register>),
        (0x24 => _reserved1),
        /// Pin enable: which pins contribute to the group event.
        (0x40 => port_ena: ReadWrite<u32, PORT::Register>),
        (0x44 => @END),
    }
}

register_bitfields![u32,
    pub CTRL [
        /// Group interrupt pending. Write 1 to clear in edge mode.
        INT OFFSET(0) NUMBITS(1) [],
        /// Combine contributing pins with OR or AND.
        COMB OFFSET(1) NUMBITS(1) [
            Or = 0,
            And = 1
        ],
        /// Edge or level triggered.
        TRIG OFFSET(2) NUMBITS(1) [
            Edge = 0,
            Level = 1
        ]
    ],
    pub PORT [
        /// One bit per port pin.
        PINS OFFSET(0) NUMBITS(22) []
    ]
];

/// A handle to the group interrupt block.
pub struct Gint {
    registers: StaticRef<GintRegisters>,
}

impl Gint {
    /// Creates the handle for GINT0.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Gint {
        Gint {
            registers: unsafe { StaticRef::new(GINT0_BASE as *const GintRegisters) },
        }
    }

    /// The single vector every contributing pin funnels into.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::GINT0
    }

    /// Contribute `pins` (a port mask) to the group, active high, OR
    /// combined, edge triggered.
    pub fn watch_rising(&self, pins: u32) {
        self.registers.port_pol.write(PORT::PINS.val(pins));
        self.registers.port_ena.write(PORT::PINS.val(pins));
        self.registers.ctrl.write(CTRL::COMB::Or + CTRL::TRIG::Edge);
    }

    /// The group event is pending.
    pub fn pending(&self) -> bool {
        self.registers.ctrl.is_set(CTRL::INT)
    }

    /// Acknowledge the group event.
    pub fn clear(&self) {
        self.registers.ctrl.write(CTRL::INT::SET);
    }
}
