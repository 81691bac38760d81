// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! 12-bit ADC (ADC0).
//!
//! Eight input channels and two conversion sequences, A and B. The one
//! instance raises three vectors: sequence A complete, sequence B
//! complete, and threshold-compare/overrun. Per-sequence control and
//! global-data registers are two-element arrays indexed by sequence.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite};
use dk6_registers::{register_bitfields, register_structs, LocalRegisterCopy, StaticRef};

use crate::interrupts;
use crate::memory_map::ADC0_BASE;

/// Number of analog input channels.
pub const NUM_CHANNELS: usize = 8;

/// Conversion sequence index: A or B.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum Sequence {
    A = 0,
    B = 1,
}

register_structs! {
    pub AdcRegisters {
        /// ADC control: clocking, resolution, sampling time.
        (0x00 => ctrl: ReadWrite<u32, CTRL::Register>),
        /// Input select.
        (0x04 => insel: ReadWrite<u32, INSEL::Register>),
        /// Conversion sequence control, one per sequence.
        (0x08 => seq_ctrl: [ReadWrite<u32, SEQ_CTRL::Register>; 2]),
        /// Global data register, one per sequence: the most recent
        /// result of that sequence.
        (0x10 => seq_gdat: [ReadOnly<u32, DAT::Register>; 2]),
        (0x18 => _reserved0),
        /// Per-channel data registers.
        (0x20 => dat: [ReadOnly<u32, DAT::Register>; NUM_CHANNELS]),
        (0x40 => _reserved1),
        /// Low compare threshold 0.
        (0x50 => thr0_low: ReadWrite<u32, THR::Register>),
        /// Low compare threshold 1.
        (0x54 => thr1_low: ReadWrite<u32, THR::Register>),
        /// High compare threshold 0.
        (0x58 => thr0_high: ReadWrite<u32, THR::Register>),
        /// High compare threshold 1.
        (0x5C => thr1_high: ReadWrite<u32, THR::Register>),
        /// Which threshold pair each channel compares against.
        (0x60 => chan_thrsel: ReadWrite<u32, CHAN_THRSEL::Register>),
        /// Interrupt enables.
        (0x64 => inten: ReadWrite<u32, INTEN::Register>),
        /// Interrupt and overrun flags. Most clear by writing a one.
        (0x68 => flags: ReadWrite<u32, FLAGS::Register>),
        /// Start-up control.
        (0x6C => startup: ReadWrite<u32, STARTUP::Register>),
        (0x70 => @END),
    }
}

register_bitfields![u32,
    pub CTRL [
        /// The system clock is divided by CLKDIV + 1 for the ADC.
        CLKDIV OFFSET(0) NUMBITS(8) [],
        /// Asynchronous clocking mode select.
        ASYNMODE OFFSET(8) NUMBITS(1) [],
        /// Conversion resolution select.
        RESOL OFFSET(9) NUMBITS(2) [
            Bits6 = 0,
            Bits8 = 1,
            Bits10 = 2,
            Bits12 = 3
        ],
        /// Bypass the stored calibration.
        BYPASSCAL OFFSET(11) NUMBITS(1) [],
        /// Extra sampling clocks.
        TSAMP OFFSET(12) NUMBITS(3) []
    ],
    pub INSEL [
        /// Channel 0 input source select.
        SEL OFFSET(0) NUMBITS(2) []
    ],
    pub SEQ_CTRL [
        /// Channels in this sequence, one bit per channel.
        CHANNELS OFFSET(0) NUMBITS(8) [],
        /// Hardware trigger select for this sequence.
        TRIGGER OFFSET(12) NUMBITS(3) [],
        /// Trigger polarity.
        TRIGPOL OFFSET(18) NUMBITS(1) [
            NegativeEdge = 0,
            PositiveEdge = 1
        ],
        /// Bypass the trigger synchronizer.
        SYNCBYPASS OFFSET(19) NUMBITS(1) [],
        /// Software start: begin one cycle of the sequence.
        START OFFSET(26) NUMBITS(1) [],
        /// Burst mode: convert continuously.
        BURST OFFSET(27) NUMBITS(1) [],
        /// Convert one channel per trigger instead of the whole
        /// sequence.
        SINGLESTEP OFFSET(28) NUMBITS(1) [],
        /// Sequence A interrupts this sequence (B only).
        LOWPRIO OFFSET(29) NUMBITS(1) [],
        /// Interrupt at end of each conversion or end of sequence.
        MODE OFFSET(30) NUMBITS(1) [
            EachConversion = 0,
            EndOfSequence = 1
        ],
        /// Sequence enable.
        SEQ_ENA OFFSET(31) NUMBITS(1) []
    ],
    pub DAT [
        /// Conversion result, left-aligned within these bits at lower
        /// resolutions.
        RESULT OFFSET(4) NUMBITS(12) [],
        /// Result relative to the selected threshold range.
        THCMPRANGE OFFSET(16) NUMBITS(2) [
            InRange = 0,
            Below = 1,
            Above = 2
        ],
        /// Result crossing of the low threshold.
        THCMPCROSS OFFSET(18) NUMBITS(2) [
            NoCrossing = 0,
            DownwardCrossing = 2,
            UpwardCrossing = 3
        ],
        /// The channel this result came from.
        CHANNEL OFFSET(26) NUMBITS(3) [],
        /// A previous result in this register was lost.
        OVERRUN OFFSET(30) NUMBITS(1) [],
        /// The register holds a new result.
        DATAVALID OFFSET(31) NUMBITS(1) []
    ],
    pub THR [
        /// Threshold value compared against result bits 15:4.
        THR OFFSET(4) NUMBITS(12) []
    ],
    pub CHAN_THRSEL [
        /// Threshold pair select, one bit per channel.
        CH_THRSEL OFFSET(0) NUMBITS(8) []
    ],
    pub INTEN [
        /// Sequence A complete interrupt enable.
        SEQA_INTEN OFFSET(0) NUMBITS(1) [],
        /// Sequence B complete interrupt enable.
        SEQB_INTEN OFFSET(1) NUMBITS(1) [],
        /// Overrun interrupt enable.
        OVR_INTEN OFFSET(2) NUMBITS(1) [],
        /// Threshold compare interrupt mode, channel 0.
        ADCMPINTEN0 OFFSET(3) NUMBITS(2) [
            Disabled = 0,
            OutsideThreshold = 1,
            Crossing = 2
        ]
    ],
    pub FLAGS [
        /// Per-channel threshold compare flags. Write 1 to clear.
        THCMP OFFSET(0) NUMBITS(8) [],
        /// Per-channel overrun flags.
        OVERRUN OFFSET(12) NUMBITS(8) [],
        /// Sequence A overrun.
        SEQA_OVR OFFSET(24) NUMBITS(1) [],
        /// Sequence B overrun.
        SEQB_OVR OFFSET(25) NUMBITS(1) [],
        /// Sequence A complete. Write 1 to clear.
        SEQA_INT OFFSET(28) NUMBITS(1) [],
        /// Sequence B complete. Write 1 to clear.
        SEQB_INT OFFSET(29) NUMBITS(1) [],
        /// Threshold compare summary. Write 1 to clear.
        THCMP_INT OFFSET(30) NUMBITS(1) [],
        /// Overrun summary.
        OVR_INT OFFSET(31) NUMBITS(1) []
    ],
    pub STARTUP [
        /// ADC power-up request.
        ADC_ENA OFFSET(0) NUMBITS(1) [],
        /// Start the initialization cycle.
        ADC_INIT OFFSET(1) NUMBITS(1) []
    ]
];

/// A handle to the ADC.
pub struct Adc {
    registers: StaticRef<AdcRegisters>,
}

impl Adc {
    /// Creates the handle for ADC0.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Adc {
        Adc {
            registers: unsafe { StaticRef::new(ADC0_BASE as *const AdcRegisters) },
        }
    }

    /// The three vectors of this instance, in dispatch order: sequence
    /// A, sequence B, threshold-compare/overrun.
    pub fn interrupt_numbers(&self) -> [u32; 3] {
        interrupts::ADC0
    }

    /// Select the conversion resolution. Read-modify-write of CTRL.
    pub fn set_resolution(&self, resolution: CTRL::RESOL::Value) {
        self.registers.ctrl.modify(CTRL::RESOL.val(resolution as u32));
    }

    /// The current resolution, if the raw value names one (all four
    /// codes do).
    pub fn resolution(&self) -> Option<CTRL::RESOL::Value> {
        self.registers.ctrl.read_as_enum(CTRL::RESOL)
    }

    /// Enable `sequence` over the channel mask and start it by
    /// software.
    pub fn start_sequence(&self, sequence: Sequence, channels: u8) {
        self.registers.seq_ctrl[sequence as usize].write(
            SEQ_CTRL::CHANNELS.val(channels as u32)
                + SEQ_CTRL::MODE::EndOfSequence
                + SEQ_CTRL::SEQ_ENA::SET
                + SEQ_CTRL::START::SET,
        );
    }

    /// One-transaction snapshot of `channel`'s data register. The
    /// overrun and validity flags travel with the result.
    pub fn channel_data(&self, channel: usize) -> LocalRegisterCopy<u32, DAT::Register> {
        self.registers.dat[channel].extract()
    }

    /// Sequence `sequence` has completed.
    pub fn sequence_complete(&self, sequence: Sequence) -> bool {
        match sequence {
            Sequence::A => self.registers.flags.is_set(FLAGS::SEQA_INT),
            Sequence::B => self.registers.flags.is_set(FLAGS::SEQB_INT),
        }
    }

    /// Acknowledge both sequence-complete flags.
    pub fn clear_sequence_flags(&self) {
        self.registers
            .flags
            .write(FLAGS::SEQA_INT::SET + FLAGS::SEQB_INT::SET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolution_select_round_trips_amid_other_fields() {
        // Encoding the 2-bit resolution select to 1 in an otherwise
        // configured word decodes back to 1 regardless of neighbors.
        let word = (CTRL::CLKDIV.val(0xFF) + CTRL::RESOL.val(1) + CTRL::TSAMP.val(0b101)).value();
        assert_eq!(CTRL::RESOL.read(word), 1);
        assert_eq!(
            CTRL::RESOL.read_as_enum::<CTRL::RESOL::Value>(word),
            Some(CTRL::RESOL::Value::Bits8)
        );
        assert_eq!(CTRL::CLKDIV.read(word), 0xFF);
        assert_eq!(CTRL::TSAMP.read(word), 0b101);
    }

    #[test]
    fn per_sequence_arrays_have_one_entry_per_sequence() {
        use core::mem::offset_of;
        assert_eq!(offset_of!(AdcRegisters, seq_ctrl), 0x08);
        assert_eq!(offset_of!(AdcRegisters, seq_gdat), 0x10);
        assert_eq!(offset_of!(AdcRegisters, dat), 0x20);
    }

    #[test]
    fn result_field_is_independent_of_status_bits() {
        let raw = (DAT::RESULT.val(0xABC) + DAT::CHANNEL.val(5) + DAT::DATAVALID::SET).value();
        assert_eq!(DAT::RESULT.read(raw), 0xABC);
        assert_eq!(DAT::CHANNEL.read(raw), 5);
        assert_eq!(DAT::OVERRUN.read(raw), 0);
    }
}
