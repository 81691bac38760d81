// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! SPI personality of the FLEXCOMM block.
//!
//! Two instances: SPI0 and SPI1, on FLEXCOMM slots 4 and 5.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::flexcomm::{PID, PSELID};
use crate::interrupts;
use crate::memory_map::SPI_BASES;

register_structs! {
    pub SpiRegisters {
        /// SPI Configuration register.
        (0x000 => cfg: ReadWrite<u32, CFG::Register>),
        /// SPI Delay register.
        (0x004 => dly: ReadWrite<u32, DLY::Register>),
        /// SPI Status register. Some flags clear by writing a one.
        (0x008 => stat: ReadWrite<u32, STAT::Register>),
        /// Interrupt Enable read and Set register.
        (0x00C => intenset: ReadWrite<u32, INTENSET::Register>),
        /// Interrupt Enable Clear register.
        (0x010 => intenclr: WriteOnly<u32, INTENCLR::Register>),
        /// Receive Data register.
        (0x014 => rxdat: ReadOnly<u32, RXDAT::Register>),
        /// Transmit Data with Control register.
        (0x018 => txdatctl: ReadWrite<u32, TXDATCTL::Register>),
        /// Transmit Data register.
        (0x01C => txdat: ReadWrite<u32, TXDAT::Register>),
        /// Transmit Control register.
        (0x020 => txctl: ReadWrite<u32, TXCTL::Register>),
        /// SPI clock Divider.
        (0x024 => div: ReadWrite<u32, DIV::Register>),
        /// SPI Interrupt Status register.
        (0x028 => intstat: ReadOnly<u32, INTSTAT::Register>),
        (0x02C => _reserved0),
        /// Peripheral Select and Flexcomm ID register (shared words).
        (0xFF8 => pselid: ReadWrite<u32, PSELID::Register>),
        /// Peripheral identification register (shared words).
        (0xFFC => pid: ReadOnly<u32, PID::Register>),
        (0x1000 => @END),
    }
}

register_bitfields![u32,
    pub CFG [
        /// SPI Enable.
        ENABLE OFFSET(0) NUMBITS(1) [],
        /// Master mode select.
        MASTER OFFSET(2) NUMBITS(1) [
            Slave = 0,
            Master = 1
        ],
        /// LSB First mode enable.
        LSBF OFFSET(3) NUMBITS(1) [],
        /// Clock Phase select.
        CPHA OFFSET(4) NUMBITS(1) [
            Change = 0,
            Capture = 1
        ],
        /// Clock Polarity select.
        CPOL OFFSET(5) NUMBITS(1) [
            Low = 0,
            High = 1
        ],
        /// Loopback mode enable.
        LOOP OFFSET(7) NUMBITS(1) [],
        /// SSEL0 Polarity select.
        SPOL0 OFFSET(8) NUMBITS(1) [],
        /// SSEL1 Polarity select.
        SPOL1 OFFSET(9) NUMBITS(1) [],
        /// SSEL2 Polarity select.
        SPOL2 OFFSET(10) NUMBITS(1) [],
        /// SSEL3 Polarity select.
        SPOL3 OFFSET(11) NUMBITS(1) []
    ],
    pub DLY [
        /// Time between SSEL assertion and the first clock edge.
        PRE_DELAY OFFSET(0) NUMBITS(4) [],
        /// Time between the last clock edge and SSEL deassertion.
        POST_DELAY OFFSET(4) NUMBITS(4) [],
        /// Minimum time between frames.
        FRAME_DELAY OFFSET(8) NUMBITS(4) [],
        /// Minimum time SSEL is deasserted between transfers.
        TRANSFER_DELAY OFFSET(12) NUMBITS(4) []
    ],
    pub STAT [
        /// Receiver Ready flag.
        RXRDY OFFSET(0) NUMBITS(1) [],
        /// Transmitter Ready flag.
        TXRDY OFFSET(1) NUMBITS(1) [],
        /// Receiver Overrun: slave-mode data was lost. Write 1 to clear.
        RXOV OFFSET(2) NUMBITS(1) [],
        /// Transmitter Underrun in slave mode. Write 1 to clear.
        TXUR OFFSET(3) NUMBITS(1) [],
        /// Slave Select Assert. Write 1 to clear.
        SSA OFFSET(4) NUMBITS(1) [],
        /// Slave Select Deassert. Write 1 to clear.
        SSD OFFSET(5) NUMBITS(1) [],
        /// Stalled status.
        STALLED OFFSET(6) NUMBITS(1) [],
        /// End Transfer control bit status.
        ENDTRANSFER OFFSET(7) NUMBITS(1) [],
        /// Master Idle status.
        MSTIDLE OFFSET(8) NUMBITS(1) []
    ],
    pub INTENSET [
        RXRDYEN OFFSET(0) NUMBITS(1) [],
        TXRDYEN OFFSET(1) NUMBITS(1) [],
        RXOVEN OFFSET(2) NUMBITS(1) [],
        TXUREN OFFSET(3) NUMBITS(1) [],
        SSAEN OFFSET(4) NUMBITS(1) [],
        SSDEN OFFSET(5) NUMBITS(1) []
    ],
    pub INTENCLR [
        RXRDYCLR OFFSET(0) NUMBITS(1) [],
        TXRDYCLR OFFSET(1) NUMBITS(1) [],
        RXOVCLR OFFSET(2) NUMBITS(1) [],
        TXURCLR OFFSET(3) NUMBITS(1) [],
        SSACLR OFFSET(4) NUMBITS(1) [],
        SSDCLR OFFSET(5) NUMBITS(1) []
    ],
    pub RXDAT [
        /// Received data, right-justified.
        RXDAT OFFSET(0) NUMBITS(16) [],
        /// Which slave selects were active when the data was received.
        RXSSEL0_N OFFSET(16) NUMBITS(1) [],
        RXSSEL1_N OFFSET(17) NUMBITS(1) [],
        RXSSEL2_N OFFSET(18) NUMBITS(1) [],
        RXSSEL3_N OFFSET(19) NUMBITS(1) [],
        /// Start of Transfer flag.
        SOT OFFSET(20) NUMBITS(1) []
    ],
    pub TXDATCTL [
        /// Data to transmit.
        TXDAT OFFSET(0) NUMBITS(16) [],
        /// Slave select deasserts for this transfer.
        TXSSEL0_N OFFSET(16) NUMBITS(1) [],
        TXSSEL1_N OFFSET(17) NUMBITS(1) [],
        TXSSEL2_N OFFSET(18) NUMBITS(1) [],
        TXSSEL3_N OFFSET(19) NUMBITS(1) [],
        /// End of Transfer: deassert SSEL after this frame.
        EOT OFFSET(20) NUMBITS(1) [],
        /// End of Frame delay enable.
        EOF OFFSET(21) NUMBITS(1) [],
        /// Receive Ignore: no read of RXDAT is required.
        RXIGNORE OFFSET(22) NUMBITS(1) [],
        /// Frame length in bits, minus one.
        LEN OFFSET(24) NUMBITS(4) []
    ],
    pub TXDAT [
        /// Data to transmit, with control bits left unchanged.
        DATA OFFSET(0) NUMBITS(16) []
    ],
    pub TXCTL [
        TXSSEL0_N OFFSET(16) NUMBITS(1) [],
        TXSSEL1_N OFFSET(17) NUMBITS(1) [],
        TXSSEL2_N OFFSET(18) NUMBITS(1) [],
        TXSSEL3_N OFFSET(19) NUMBITS(1) [],
        EOT OFFSET(20) NUMBITS(1) [],
        EOF OFFSET(21) NUMBITS(1) [],
        RXIGNORE OFFSET(22) NUMBITS(1) [],
        LEN OFFSET(24) NUMBITS(4) []
    ],
    pub DIV [
        /// The function clock is divided by DIVVAL + 1.
        DIVVAL OFFSET(0) NUMBITS(16) []
    ],
    pub INTSTAT [
        RXRDY OFFSET(0) NUMBITS(1) [],
        TXRDY OFFSET(1) NUMBITS(1) [],
        RXOV OFFSET(2) NUMBITS(1) [],
        TXUR OFFSET(3) NUMBITS(1) [],
        SSA OFFSET(4) NUMBITS(1) [],
        SSD OFFSET(5) NUMBITS(1) []
    ]
];

/// A handle to one SPI instance.
pub struct Spi {
    registers: StaticRef<SpiRegisters>,
    index: usize,
}

impl Spi {
    /// Creates the handle for SPI instance `index`.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle per instance; the
    /// `peripherals::Peripherals` registry is the intended source.
    /// Panics at build time if `index` is not an SPI instance.
    pub const unsafe fn new(index: usize) -> Spi {
        Spi {
            registers: unsafe { StaticRef::new(SPI_BASES[index] as *const SpiRegisters) },
            index,
        }
    }

    /// The vector servicing this instance.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::SPI[self.index]
    }

    /// NVIC control for this instance's vector.
    pub fn nvic(&self) -> cortexm4::nvic::Nvic {
        unsafe { cortexm4::nvic::Nvic::new(self.interrupt_number()) }
    }

    /// Enable the SPI as master. Read-modify-write of CFG.
    pub fn enable_master(&self) {
        self.registers.cfg.modify(CFG::ENABLE::SET + CFG::MASTER::Master);
    }

    /// Slave-mode data was lost before being read.
    pub fn overrun(&self) -> bool {
        self.registers.stat.is_set(STAT::RXOV)
    }

    /// Acknowledge the overrun and underrun flags.
    pub fn clear_errors(&self) {
        self.registers.stat.write(STAT::RXOV::SET + STAT::TXUR::SET);
    }

    /// Enable the receiver-ready interrupt through the set companion.
    pub fn enable_rx_interrupt(&self) {
        self.registers.intenset.write(INTENSET::RXRDYEN::SET);
    }

    /// Disable the receiver-ready interrupt through the clear companion.
    pub fn disable_rx_interrupt(&self) {
        self.registers.intenclr.write(INTENCLR::RXRDYCLR::SET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn frame_length_field_round_trips() {
        for len in 0..16 {
            let raw = TXDATCTL::LEN.val(len).value();
            assert_eq!(TXDATCTL::LEN.read(raw), len);
        }
    }

    #[test]
    fn data_and_control_fields_do_not_overlap() {
        let data = TXDATCTL::TXDAT.val(0xFFFF).value();
        let ctl = (TXDATCTL::TXSSEL0_N::SET + TXDATCTL::EOT::SET + TXDATCTL::LEN.val(7)).value();
        assert_eq!(data & ctl, 0);
    }
}
