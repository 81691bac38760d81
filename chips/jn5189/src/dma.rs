// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! DMA controller (DMA0).
//!
//! One control/status block followed by 19 identical channel blocks at
//! 0x400, 16 bytes apart. All 19 channels funnel into the single DMA0
//! vector; a handler reads INTA0/INTB0/ERRINT0 to find the source
//! channel. Channel enables, interrupt enables and triggers all have
//! set/clear (or one-shot) companions, so steering one channel never
//! read-modify-writes the others' bits.
//!
//! The channel array is the controller's transfer configuration port,
//! not the transfer descriptors themselves; those live in SRAM at
//! SRAMBASE and belong to the driver above this layer.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::DMA0_BASE;

/// Number of DMA channels.
pub const NUM_CHANNELS: usize = 19;

register_structs! {
    /// One channel's configuration block, repeated every 16 bytes.
    pub DmaChannel {
        /// Configuration register for this channel.
        (0x000 => cfg: ReadWrite<u32, CFG::Register>),
        /// Control and status register for this channel.
        (0x004 => ctlstat: ReadOnly<u32, CTLSTAT::Register>),
        /// Transfer configuration register for this channel.
        (0x008 => xfercfg: ReadWrite<u32, XFERCFG::Register>),
        (0x00C => _reserved0),
        (0x010 => @END),
    },
    pub DmaRegisters {
        /// DMA control.
        (0x000 => ctrl: ReadWrite<u32, CTRL::Register>),
        /// Summary interrupt status.
        (0x004 => intstat: ReadOnly<u32, INTSTAT::Register>),
        /// Address of the channel descriptor table in SRAM.
        (0x008 => srambase: ReadWrite<u32, SRAMBASE::Register>),
        (0x00C => _reserved0),
        /// Channel enables; reads as the current enables, writing ones
        /// enables.
        (0x020 => enableset0: ReadWrite<u32, CHANNEL::Register>),
        (0x024 => _reserved1),
        /// Write: disable channels. One transaction, one-hot.
        (0x028 => enableclr0: WriteOnly<u32, CHANNEL::Register>),
        (0x02C => _reserved2),
        /// Channels with a transfer in progress.
        (0x030 => active0: ReadOnly<u32, CHANNEL::Register>),
        (0x034 => _reserved3),
        /// Channels that are enabled or have pending trigger state.
        (0x038 => busy0: ReadOnly<u32, CHANNEL::Register>),
        (0x03C => _reserved4),
        /// Per-channel error interrupt flags. Write 1 to clear.
        (0x040 => errint0: ReadWrite<u32, CHANNEL::Register>),
        (0x044 => _reserved5),
        /// Per-channel interrupt enables; writing ones enables.
        (0x048 => intenset0: ReadWrite<u32, CHANNEL::Register>),
        (0x04C => _reserved6),
        /// Write: disable per-channel interrupts.
        (0x050 => intenclr0: WriteOnly<u32, CHANNEL::Register>),
        (0x054 => _reserved7),
        /// Per-channel interrupt A flags. Write 1 to clear.
        (0x058 => inta0: ReadWrite<u32, CHANNEL::Register>),
        (0x05C => _reserved8),
        /// Per-channel interrupt B flags. Write 1 to clear.
        (0x060 => intb0: ReadWrite<u32, CHANNEL::Register>),
        (0x064 => _reserved9),
        /// Write: set the valid pending control bit per channel.
        (0x068 => setvalid0: WriteOnly<u32, CHANNEL::Register>),
        (0x06C => _reserved10),
        /// Write: set the trigger per channel.
        (0x070 => settrig0: WriteOnly<u32, CHANNEL::Register>),
        (0x074 => _reserved11),
        /// Write: abort the transfer per channel.
        (0x078 => abort0: WriteOnly<u32, CHANNEL::Register>),
        (0x07C => _reserved12),
        /// The channel configuration blocks.
        (0x400 => channel: [DmaChannel; NUM_CHANNELS]),
        (0x530 => @END),
    }
}

register_bitfields![u32,
    pub CTRL [
        /// DMA controller master enable.
        ENABLE OFFSET(0) NUMBITS(1) []
    ],
    pub INTSTAT [
        /// At least one enabled channel interrupt is pending.
        ACTIVEINT OFFSET(1) NUMBITS(1) [],
        /// At least one channel error interrupt is pending.
        ACTIVEERRINT OFFSET(2) NUMBITS(1) []
    ],
    pub SRAMBASE [
        /// Bits 31:9 of the descriptor table address; the table is
        /// 512-byte aligned.
        OFFSET OFFSET(9) NUMBITS(23) []
    ],
    pub CHANNEL [
        /// One bit per DMA channel.
        CH OFFSET(0) NUMBITS(19) []
    ],
    pub CFG [
        /// Peripheral request enable.
        PERIPHREQEN OFFSET(0) NUMBITS(1) [],
        /// Hardware trigger enable.
        HWTRIGEN OFFSET(1) NUMBITS(1) [],
        /// Trigger polarity.
        TRIGPOL OFFSET(4) NUMBITS(1) [
            ActiveLowFalling = 0,
            ActiveHighRising = 1
        ],
        /// Trigger type.
        TRIGTYPE OFFSET(5) NUMBITS(1) [
            Edge = 0,
            Level = 1
        ],
        /// A trigger starts a single burst instead of the whole
        /// transfer.
        TRIGBURST OFFSET(6) NUMBITS(1) [],
        /// Burst size as a power of two.
        BURSTPOWER OFFSET(8) NUMBITS(4) [],
        /// Wrap the source address at the burst boundary.
        SRCBURSTWRAP OFFSET(14) NUMBITS(1) [],
        /// Wrap the destination address at the burst boundary.
        DSTBURSTWRAP OFFSET(15) NUMBITS(1) [],
        /// Arbitration priority, 0 highest.
        CHPRIORITY OFFSET(16) NUMBITS(3) []
    ],
    pub CTLSTAT [
        /// The channel's descriptor is valid and pending.
        VALIDPENDING OFFSET(0) NUMBITS(1) [],
        /// The channel's trigger is set.
        TRIG OFFSET(2) NUMBITS(1) []
    ],
    pub XFERCFG [
        /// The transfer configuration is valid.
        CFGVALID OFFSET(0) NUMBITS(1) [],
        /// Reload the next descriptor when this one exhausts.
        RELOAD OFFSET(1) NUMBITS(1) [],
        /// Software trigger.
        SWTRIG OFFSET(2) NUMBITS(1) [],
        /// Clear the trigger when the descriptor exhausts.
        CLRTRIG OFFSET(3) NUMBITS(1) [],
        /// Raise interrupt A when the descriptor exhausts.
        SETINTA OFFSET(4) NUMBITS(1) [],
        /// Raise interrupt B when the descriptor exhausts.
        SETINTB OFFSET(5) NUMBITS(1) [],
        /// Transfer width.
        WIDTH OFFSET(8) NUMBITS(2) [
            Bit8 = 0,
            Bit16 = 1,
            Bit32 = 2
        ],
        /// Source address increment per transfer, in widths.
        SRCINC OFFSET(12) NUMBITS(2) [
            NoIncrement = 0,
            WidthX1 = 1,
            WidthX2 = 2,
            WidthX4 = 3
        ],
        /// Destination address increment per transfer, in widths.
        DSTINC OFFSET(14) NUMBITS(2) [
            NoIncrement = 0,
            WidthX1 = 1,
            WidthX2 = 2,
            WidthX4 = 3
        ],
        /// Number of transfers, minus one.
        XFERCOUNT OFFSET(16) NUMBITS(10) []
    ]
];

/// A handle to the DMA controller.
pub struct Dma {
    registers: StaticRef<DmaRegisters>,
}

impl Dma {
    /// Creates the handle for DMA0.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Dma {
        Dma {
            registers: unsafe { StaticRef::new(DMA0_BASE as *const DmaRegisters) },
        }
    }

    /// The single vector all 19 channels funnel into.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::DMA0
    }

    /// Master-enable the controller. Read-modify-write of CTRL.
    pub fn enable(&self) {
        self.registers.ctrl.modify(CTRL::ENABLE::SET);
    }

    /// Enable `channel`. Writing the one-hot mask to the enable-set
    /// register changes only that channel.
    pub fn enable_channel(&self, channel: usize) {
        self.registers.enableset0.set(1 << channel);
    }

    /// Disable `channel` through the clear companion.
    pub fn disable_channel(&self, channel: usize) {
        self.registers.enableclr0.set(1 << channel);
    }

    /// Channels whose interrupt A flag is raised.
    pub fn pending_a(&self) -> u32 {
        self.registers.inta0.read(CHANNEL::CH)
    }

    /// Channels whose error flag is raised.
    pub fn errors(&self) -> u32 {
        self.registers.errint0.read(CHANNEL::CH)
    }

    /// Configure `channel` for a software-triggered memory-to-memory
    /// style transfer of `count` words.
    pub fn configure_channel(&self, channel: usize, count: u32) {
        self.registers.channel[channel].cfg.write(CFG::CHPRIORITY.val(3));
        self.registers.channel[channel].xfercfg.write(
            XFERCFG::CFGVALID::SET
                + XFERCFG::WIDTH::Bit32
                + XFERCFG::SRCINC::WidthX1
                + XFERCFG::DSTINC::WidthX1
                + XFERCFG::XFERCOUNT.val(count - 1),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::{offset_of, size_of};

    #[test]
    fn channel_blocks_repeat_every_16_bytes() {
        assert_eq!(size_of::<DmaChannel>(), 0x10);
        assert_eq!(offset_of!(DmaRegisters, channel), 0x400);
        // Channel 18's transfer configuration is the last documented
        // word of the block.
        assert_eq!(
            offset_of!(DmaRegisters, channel) + 18 * size_of::<DmaChannel>()
                + offset_of!(DmaChannel, xfercfg),
            0x528
        );
        // count * stride stays inside the declared block size.
        assert!(0x400 + NUM_CHANNELS * size_of::<DmaChannel>() <= size_of::<DmaRegisters>());
    }

    #[test]
    fn transfer_config_fields_do_not_overlap() {
        let fv = XFERCFG::CFGVALID::SET
            + XFERCFG::WIDTH::Bit32
            + XFERCFG::SRCINC::WidthX1
            + XFERCFG::DSTINC::WidthX1
            + XFERCFG::XFERCOUNT.val(0x3FF);
        assert_eq!(XFERCFG::XFERCOUNT.read(fv.value()), 0x3FF);
        assert_eq!(XFERCFG::WIDTH.read(fv.value()), 2);
        assert_eq!(XFERCFG::CFGVALID.read(fv.value()), 1);
    }
}
