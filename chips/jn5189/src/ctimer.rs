// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Standard counter/timers (CTIMER0, CTIMER1).
//!
//! Four match registers and four capture registers per instance, laid
//! out as four-element arrays.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::CTIMER_BASES;

register_structs! {
    pub CtimerRegisters {
        /// Interrupt flags for the match and capture events. Write 1 to
        /// clear.
        (0x00 => ir: ReadWrite<u32, IR::Register>),
        /// Timer control: counting enable and reset.
        (0x04 => tcr: ReadWrite<u32, TCR::Register>),
        /// Timer counter.
        (0x08 => tc: ReadWrite<u32>),
        /// Prescale register.
        (0x0C => pr: ReadWrite<u32>),
        /// Prescale counter.
        (0x10 => pc: ReadWrite<u32>),
        /// Match control: what each match event does.
        (0x14 => mcr: ReadWrite<u32, MCR::Register>),
        /// Match registers, one per match channel.
        (0x18 => mr: [ReadWrite<u32>; 4]),
        /// Capture control: which edges load each capture register.
        (0x28 => ccr: ReadWrite<u32, CCR::Register>),
        /// Capture registers, loaded with TC on their input's edge.
        (0x2C => cr: [ReadOnly<u32>; 4]),
        /// External match control.
        (0x3C => emr: ReadWrite<u32, EMR::Register>),
        (0x40 => _reserved0),
        /// Count control: timer mode or counting external events.
        (0x70 => ctcr: ReadWrite<u32, CTCR::Register>),
        /// PWM control per match channel.
        (0x74 => pwmc: ReadWrite<u32, PWMC::Register>),
        /// Match shadow registers, transferred to MR on the next cycle.
        (0x78 => msr: [ReadWrite<u32>; 4]),
        (0x88 => @END),
    }
}

register_bitfields![u32,
    pub IR [
        MR0INT 0,
        MR1INT 1,
        MR2INT 2,
        MR3INT 3,
        CR0INT 4,
        CR1INT 5,
        CR2INT 6,
        CR3INT 7
    ],
    pub TCR [
        /// Counter enable.
        CEN OFFSET(0) NUMBITS(1) [],
        /// Counter reset: held at zero while set.
        CRST OFFSET(1) NUMBITS(1) []
    ],
    pub MCR [
        /// Interrupt on match 0.
        MR0I OFFSET(0) NUMBITS(1) [],
        /// Reset the counter on match 0.
        MR0R OFFSET(1) NUMBITS(1) [],
        /// Stop the counter on match 0.
        MR0S OFFSET(2) NUMBITS(1) [],
        MR1I OFFSET(3) NUMBITS(1) [],
        MR1R OFFSET(4) NUMBITS(1) [],
        MR1S OFFSET(5) NUMBITS(1) [],
        MR2I OFFSET(6) NUMBITS(1) [],
        MR2R OFFSET(7) NUMBITS(1) [],
        MR2S OFFSET(8) NUMBITS(1) [],
        MR3I OFFSET(9) NUMBITS(1) [],
        MR3R OFFSET(10) NUMBITS(1) [],
        MR3S OFFSET(11) NUMBITS(1) [],
        /// Reload match 0 from its shadow register on the next cycle.
        MR0RL OFFSET(24) NUMBITS(1) [],
        MR1RL OFFSET(25) NUMBITS(1) [],
        MR2RL OFFSET(26) NUMBITS(1) [],
        MR3RL OFFSET(27) NUMBITS(1) []
    ],
    pub CCR [
        /// Capture 0 on rising edge.
        CAP0RE OFFSET(0) NUMBITS(1) [],
        /// Capture 0 on falling edge.
        CAP0FE OFFSET(1) NUMBITS(1) [],
        /// Interrupt on capture 0.
        CAP0I OFFSET(2) NUMBITS(1) [],
        CAP1RE OFFSET(3) NUMBITS(1) [],
        CAP1FE OFFSET(4) NUMBITS(1) [],
        CAP1I OFFSET(5) NUMBITS(1) [],
        CAP2RE OFFSET(6) NUMBITS(1) [],
        CAP2FE OFFSET(7) NUMBITS(1) [],
        CAP2I OFFSET(8) NUMBITS(1) [],
        CAP3RE OFFSET(9) NUMBITS(1) [],
        CAP3FE OFFSET(10) NUMBITS(1) [],
        CAP3I OFFSET(11) NUMBITS(1) []
    ],
    pub EMR [
        /// External match output states.
        EM OFFSET(0) NUMBITS(4) [],
        /// External match 0 control.
        EMC0 OFFSET(4) NUMBITS(2) [
            DoNothing = 0,
            Clear = 1,
            Set = 2,
            Toggle = 3
        ],
        EMC1 OFFSET(6) NUMBITS(2) [],
        EMC2 OFFSET(8) NUMBITS(2) [],
        EMC3 OFFSET(10) NUMBITS(2) []
    ],
    pub CTCR [
        /// Timer mode or which edges of the capture input to count.
        CTMODE OFFSET(0) NUMBITS(2) [
            Timer = 0,
            CountRising = 1,
            CountFalling = 2,
            CountBoth = 3
        ],
        /// Which capture input is counted.
        CINSEL OFFSET(2) NUMBITS(2) []
    ],
    pub PWMC [
        /// PWM mode enable per match channel.
        PWMEN0 OFFSET(0) NUMBITS(1) [],
        PWMEN1 OFFSET(1) NUMBITS(1) [],
        PWMEN2 OFFSET(2) NUMBITS(1) [],
        PWMEN3 OFFSET(3) NUMBITS(1) []
    ]
];

/// A handle to one counter/timer instance.
pub struct Ctimer {
    registers: StaticRef<CtimerRegisters>,
    index: usize,
}

impl Ctimer {
    /// Creates the handle for CTIMER instance `index`.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle per instance; the
    /// `peripherals::Peripherals` registry is the intended source.
    /// Panics at build time if `index` is not a CTIMER instance.
    pub const unsafe fn new(index: usize) -> Ctimer {
        Ctimer {
            registers: unsafe {
                StaticRef::new(CTIMER_BASES[index] as *const CtimerRegisters)
            },
            index,
        }
    }

    /// The vector servicing this instance.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::CTIMER[self.index]
    }

    /// NVIC control for this instance's vector.
    pub fn nvic(&self) -> cortexm4::nvic::Nvic {
        unsafe { cortexm4::nvic::Nvic::new(self.interrupt_number()) }
    }

    /// Start counting.
    pub fn start(&self) {
        self.registers.tcr.modify(TCR::CRST::CLEAR + TCR::CEN::SET);
    }

    /// Stop counting.
    pub fn stop(&self) {
        self.registers.tcr.modify(TCR::CEN::CLEAR);
    }

    /// The current counter value.
    pub fn count(&self) -> u32 {
        self.registers.tc.get()
    }

    /// Arrange an interrupt and counter reset when the counter reaches
    /// `value` on match channel 0.
    pub fn match_and_reset_at(&self, value: u32) {
        self.registers.mr[0].set(value);
        self.registers.mcr.modify(MCR::MR0I::SET + MCR::MR0R::SET);
    }

    /// Match channel 0 fired.
    pub fn matched(&self) -> bool {
        self.registers.ir.is_set(IR::MR0INT)
    }

    /// Acknowledge match channel 0.
    pub fn clear_match(&self) {
        self.registers.ir.write(IR::MR0INT::SET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn match_and_capture_arrays_sit_between_their_controls() {
        use core::mem::offset_of;
        assert_eq!(offset_of!(CtimerRegisters, mr), 0x18);
        assert_eq!(offset_of!(CtimerRegisters, ccr), 0x28);
        assert_eq!(offset_of!(CtimerRegisters, cr), 0x2C);
        assert_eq!(offset_of!(CtimerRegisters, msr), 0x78);
    }
}
