// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Real-time clock.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::ReadWrite;
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::RTC_BASE;

register_structs! {
    pub RtcRegisters {
        /// RTC control.
        (0x00 => ctrl: ReadWrite<u32, CTRL::Register>),
        /// 1 Hz alarm match value.
        (0x04 => match_: ReadWrite<u32>),
        /// 1 Hz counter.
        (0x08 => count: ReadWrite<u32>),
        /// 1 kHz wake-down-counter: counts down and raises the wake
        /// flag at zero.
        (0x0C => wake: ReadWrite<u32, WAKE::Register>),
        (0x10 => @END),
    }
}

register_bitfields![u32,
    pub CTRL [
        /// Software reset: the RTC is held in reset while set.
        SWRESET OFFSET(0) NUMBITS(1) [],
        /// 1 Hz alarm flag. Write 1 to clear.
        ALARM1HZ OFFSET(2) NUMBITS(1) [],
        /// 1 kHz wake flag. Write 1 to clear.
        WAKE1KHZ OFFSET(3) NUMBITS(1) [],
        /// Alarm may wake the part from deep power-down.
        ALARMDPD_EN OFFSET(4) NUMBITS(1) [],
        /// Wake timer may wake the part from deep power-down.
        WAKEDPD_EN OFFSET(5) NUMBITS(1) [],
        /// Enable the 1 kHz wake timer.
        RTC1KHZ_EN OFFSET(6) NUMBITS(1) [],
        /// Enable the RTC.
        RTC_EN OFFSET(7) NUMBITS(1) []
    ],
    pub WAKE [
        /// Wake countdown in milliseconds.
        VAL OFFSET(0) NUMBITS(16) []
    ]
];

/// A handle to the RTC.
pub struct Rtc {
    registers: StaticRef<RtcRegisters>,
}

impl Rtc {
    /// Creates the handle for the RTC.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Rtc {
        Rtc {
            registers: unsafe { StaticRef::new(RTC_BASE as *const RtcRegisters) },
        }
    }

    /// The vector servicing the RTC.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::RTC
    }

    /// Release the reset and start the 1 Hz counter.
    pub fn enable(&self) {
        self.registers.ctrl.modify(CTRL::SWRESET::CLEAR + CTRL::RTC_EN::SET);
    }

    /// Seconds counted since enable.
    pub fn seconds(&self) -> u32 {
        self.registers.count.get()
    }

    /// Raise the alarm when the counter reaches `at_seconds`.
    pub fn set_alarm(&self, at_seconds: u32) {
        self.registers.match_.set(at_seconds);
    }

    /// The alarm fired.
    pub fn alarm_fired(&self) -> bool {
        self.registers.ctrl.is_set(CTRL::ALARM1HZ)
    }

    /// Acknowledge the alarm, preserving the control bits.
    pub fn clear_alarm(&self) {
        self.registers.ctrl.modify(CTRL::ALARM1HZ::SET);
    }
}
