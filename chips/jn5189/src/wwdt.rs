// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Windowed watchdog timer.
//!
//! The FEED register is write-only: reloading the counter is the
//! 0xAA, 0x55 sequence, each a single store. Reads of FEED return
//! nothing meaningful, so the type exposes no read path.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::WWDT_BASE;

register_structs! {
    pub WwdtRegisters {
        /// Watchdog mode: enable, reset behavior, status flags.
        (0x00 => mod_: ReadWrite<u32, MOD::Register>),
        /// Timeout constant the counter reloads from.
        (0x04 => tc: ReadWrite<u32, TC::Register>),
        /// Feed sequence register.
        (0x08 => feed: WriteOnly<u32, FEED::Register>),
        /// Current counter value.
        (0x0C => tv: ReadOnly<u32, TC::Register>),
        (0x10 => _reserved0),
        /// Warning interrupt compare value.
        (0x14 => warnint: ReadWrite<u32, WARNINT::Register>),
        /// Feeds are only accepted while the counter is below this
        /// window value.
        (0x18 => window: ReadWrite<u32, WINDOW::Register>),
        (0x1C => @END),
    }
}

register_bitfields![u32,
    pub MOD [
        /// Watchdog enable. Once set, cleared only by reset.
        WDEN OFFSET(0) NUMBITS(1) [],
        /// A timeout resets the chip.
        WDRESET OFFSET(1) NUMBITS(1) [],
        /// Timeout flag: set when the counter reached zero. Cleared by
        /// software, or by reset.
        WDTOF OFFSET(2) NUMBITS(1) [],
        /// Warning interrupt flag. Write 1 to clear.
        WDINT OFFSET(3) NUMBITS(1) [],
        /// Lock: prevents disabling the clock source or changing TC to
        /// a smaller value.
        WDPROTECT OFFSET(4) NUMBITS(1) []
    ],
    pub TC [
        /// 24-bit timeout or counter value.
        COUNT OFFSET(0) NUMBITS(24) []
    ],
    pub FEED [
        /// Write 0xAA then 0x55 to reload the counter from TC.
        FEED OFFSET(0) NUMBITS(8) []
    ],
    pub WARNINT [
        /// Warning interrupt when the counter falls below this value.
        WARNINT OFFSET(0) NUMBITS(10) []
    ],
    pub WINDOW [
        /// 24-bit window value.
        WINDOW OFFSET(0) NUMBITS(24) []
    ]
];

/// A handle to the watchdog.
pub struct Wwdt {
    registers: StaticRef<WwdtRegisters>,
}

impl Wwdt {
    /// Creates the handle for the watchdog.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Wwdt {
        Wwdt {
            registers: unsafe { StaticRef::new(WWDT_BASE as *const WwdtRegisters) },
        }
    }

    /// The vector servicing the watchdog.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::WWDT
    }

    /// Arm the watchdog with `timeout` counts and chip reset on
    /// timeout.
    pub fn start(&self, timeout: u32) {
        self.registers.tc.write(TC::COUNT.val(timeout));
        self.registers.mod_.modify(MOD::WDEN::SET + MOD::WDRESET::SET);
        self.feed();
    }

    /// Reload the counter: the two-store feed sequence.
    pub fn feed(&self) {
        self.registers.feed.write(FEED::FEED.val(0xAA));
        self.registers.feed.write(FEED::FEED.val(0x55));
    }

    /// The counter reached zero at some point.
    pub fn timed_out(&self) -> bool {
        self.registers.mod_.is_set(MOD::WDTOF)
    }

    /// The current countdown value.
    pub fn remaining(&self) -> u32 {
        self.registers.tv.read(TC::COUNT)
    }
}
