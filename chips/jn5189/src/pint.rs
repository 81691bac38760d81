// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Pin interrupt and pattern match engine (PINT).
//!
//! Four channels, each with its own vector. A channel either watches one
//! pin (selected through `inputmux`) for edges or levels, or serves as a
//! slice of the boolean pattern match engine. Edge detection enables use
//! SIENR/CIENR and SIENF/CIENF set/clear companions; RISE, FALL and IST
//! are write-one-to-clear status.

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::registers::{ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::PINT_BASE;

/// Number of pin-interrupt channels.
pub const NUM_CHANNELS: usize = 4;

register_structs! {
    pub PintRegisters {
        /// Level or edge sensitivity per channel.
        (0x00 => isel: ReadWrite<u32, CHANNELS::Register>),
        /// Rising-edge or level interrupt enables.
        (0x04 => ienr: ReadWrite<u32, CHANNELS::Register>),
        /// Write: set bits of IENR. One transaction, one-hot.
        (0x08 => sienr: WriteOnly<u32, CHANNELS::Register>),
        /// Write: clear bits of IENR.
        (0x0C => cienr: WriteOnly<u32, CHANNELS::Register>),
        /// Falling-edge or active-level interrupt enables.
        (0x10 => ienf: ReadWrite<u32, CHANNELS::Register>),
        /// Write: set bits of IENF.
        (0x14 => sienf: WriteOnly<u32, CHANNELS::Register>),
        /// Write: clear bits of IENF.
        (0x18 => cienf: WriteOnly<u32, CHANNELS::Register>),
        /// Rising edge detected per channel. Write 1 to clear.
        (0x1C => rise: ReadWrite<u32, CHANNELS::Register>),
        /// Falling edge detected per channel. Write 1 to clear.
        (0x20 => fall: ReadWrite<u32, CHANNELS::Register>),
        /// Interrupt status per channel. Write 1 to clear edge
        /// interrupts.
        (0x24 => ist: ReadWrite<u32, CHANNELS::Register>),
        /// Pattern match control.
        (0x28 => pmctrl: ReadWrite<u32, PMCTRL::Register>),
        /// Pattern match source select per slice.
        (0x2C => pmsrc: ReadWrite<u32, PMSRC::Register>),
        /// Pattern match configuration per slice.
        (0x30 => pmcfg: ReadWrite<u32, PMCFG::Register>),
        (0x34 => @END),
    }
}

register_bitfields![u32,
    pub CHANNELS [
        /// One bit per pin-interrupt channel.
        CH OFFSET(0) NUMBITS(4) []
    ],
    pub PMCTRL [
        /// Route the pattern match engine instead of the plain pin
        /// interrupts to the channel vectors.
        SEL_PMATCH OFFSET(0) NUMBITS(1) [
            PinInterrupts = 0,
            PatternMatch = 1
        ],
        /// Drive the RXEV output to the core when the pattern matches.
        ENA_RXEV OFFSET(1) NUMBITS(1) [],
        /// Current state of the pattern match products, one bit per
        /// slice. Read-only.
        PMAT OFFSET(24) NUMBITS(4) []
    ],
    pub PMSRC [
        /// Input source for slice 0.
        SRC0 OFFSET(8) NUMBITS(3) [],
        /// Input source for slice 1.
        SRC1 OFFSET(11) NUMBITS(3) [],
        /// Input source for slice 2.
        SRC2 OFFSET(14) NUMBITS(3) [],
        /// Input source for slice 3.
        SRC3 OFFSET(17) NUMBITS(3) []
    ],
    pub PMCFG [
        /// Slice 0 ends a product term.
        PROD_ENDPTS0 OFFSET(0) NUMBITS(1) [],
        /// Slice 1 ends a product term.
        PROD_ENDPTS1 OFFSET(1) NUMBITS(1) [],
        /// Slice 2 ends a product term. Slice 3 always ends the last
        /// term.
        PROD_ENDPTS2 OFFSET(2) NUMBITS(1) [],
        /// Match condition for slice 0.
        CFG0 OFFSET(8) NUMBITS(3) [
            ConstantHigh = 0,
            StickyRising = 1,
            StickyFalling = 2,
            StickyBoth = 3,
            HighLevel = 4,
            LowLevel = 5,
            ConstantZero = 6,
            Event = 7
        ],
        /// Match condition for slice 1.
        CFG1 OFFSET(11) NUMBITS(3) [],
        /// Match condition for slice 2.
        CFG2 OFFSET(14) NUMBITS(3) [],
        /// Match condition for slice 3.
        CFG3 OFFSET(17) NUMBITS(3) []
    ]
];

/// A handle to the pin interrupt block.
pub struct Pint {
    registers: StaticRef<PintRegisters>,
}

impl Pint {
    /// Creates the handle for PINT.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Pint {
        Pint {
            registers: unsafe { StaticRef::new(PINT_BASE as *const PintRegisters) },
        }
    }

    /// The vector servicing `channel`, in channel order.
    pub fn interrupt_number(&self, channel: usize) -> u32 {
        interrupts::PIN_INT[channel]
    }

    /// Enable rising-edge detection on `channel`. One write to the
    /// set-enable companion.
    pub fn enable_rising(&self, channel: usize) {
        self.registers.sienr.set(1 << channel);
    }

    /// Disable rising-edge detection on `channel`. One write to the
    /// clear-enable companion.
    pub fn disable_rising(&self, channel: usize) {
        self.registers.cienr.set(1 << channel);
    }

    /// Enable falling-edge detection on `channel`.
    pub fn enable_falling(&self, channel: usize) {
        self.registers.sienf.set(1 << channel);
    }

    /// A rising edge was latched on `channel`.
    pub fn rose(&self, channel: usize) -> bool {
        self.registers.rise.get() & (1 << channel) != 0
    }

    /// Acknowledge `channel`'s latched edges.
    pub fn clear(&self, channel: usize) {
        self.registers.rise.set(1 << channel);
        self.registers.fall.set(1 << channel);
        self.registers.ist.set(1 << channel);
    }

    /// Hand the channel vectors to the pattern match engine.
    pub fn enable_pattern_match(&self) {
        self.registers.pmctrl.write(PMCTRL::SEL_PMATCH::PatternMatch);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn one_channel_per_vector_in_channel_order() {
        for ch in 0..NUM_CHANNELS {
            assert_eq!(
                interrupts::PIN_INT[ch],
                interrupts::PIN_INT0 + ch as u32
            );
        }
    }

    #[test]
    fn slice_configs_pack_without_overlap() {
        let all = (PMSRC::SRC0.val(7) + PMSRC::SRC1.val(7) + PMSRC::SRC2.val(7)
            + PMSRC::SRC3.val(7))
        .value();
        assert_eq!(all, 0b111_111_111_111 << 8);
    }
}
