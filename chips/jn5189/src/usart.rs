// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! USART personality of the FLEXCOMM block.
//!
//! Two instances: USART0 and USART1, on FLEXCOMM slots 0 and 1. The
//! layout spans the full 4 KiB aperture and ends with the shared
//! PSELID/PID words, because the aperture is the same hardware whichever
//! personality is selected.
//!
//! Error conditions the receiver reports — overrun, framing, parity,
//! noise, auto-baud failure — are ordinary status bits read out of STAT
//! and RXDATSTAT; they are data for the caller, not failures of this
//! layer.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, LocalRegisterCopy, StaticRef};

use crate::flexcomm::{PID, PSELID};
use crate::interrupts;
use crate::memory_map::USART_BASES;

register_structs! {
    pub UsartRegisters {
        /// USART Configuration register. Basic USART configuration
        /// settings that typically are not changed during operation.
        (0x000 => cfg: ReadWrite<u32, CFG::Register>),
        /// USART Control register. Settings that may be changed during
        /// operation.
        (0x004 => ctl: ReadWrite<u32, CTL::Register>),
        /// USART Status register. Interrupt flags clear by writing a one.
        (0x008 => stat: ReadWrite<u32, STAT::Register>),
        /// Interrupt Enable read and Set register.
        (0x00C => intenset: ReadWrite<u32, INTENSET::Register>),
        /// Interrupt Enable Clear register.
        (0x010 => intenclr: WriteOnly<u32, INTENCLR::Register>),
        /// Receiver Data register.
        (0x014 => rxdat: ReadOnly<u32, RXDAT::Register>),
        /// Receiver Data with Status register.
        (0x018 => rxdatstat: ReadOnly<u32, RXDATSTAT::Register>),
        /// Transmit Data register.
        (0x01C => txdat: ReadWrite<u32, TXDAT::Register>),
        /// Baud Rate Generator register.
        (0x020 => brg: ReadWrite<u32, BRG::Register>),
        /// Interrupt status register. The logical AND of STAT flags and
        /// their enables.
        (0x024 => intstat: ReadOnly<u32, INTSTAT::Register>),
        /// Oversample selection register for asynchronous communication.
        (0x028 => osr: ReadWrite<u32, OSR::Register>),
        /// Address register for automatic address matching.
        (0x02C => addr: ReadWrite<u32, ADDR::Register>),
        (0x030 => _reserved0),
        /// Peripheral Select and Flexcomm ID register (shared words).
        (0xFF8 => pselid: ReadWrite<u32, PSELID::Register>),
        /// Peripheral identification register (shared words).
        (0xFFC => pid: ReadOnly<u32, PID::Register>),
        (0x1000 => @END),
    }
}

register_bitfields![u32,
    pub CFG [
        /// USART Enable.
        ENABLE OFFSET(0) NUMBITS(1) [],
        /// Selects the data size for the USART.
        DATALEN OFFSET(2) NUMBITS(2) [
            Bit7 = 0,
            Bit8 = 1,
            Bit9 = 2
        ],
        /// Selects what happens in the parity bit position.
        PARITYSEL OFFSET(4) NUMBITS(2) [
            NoParity = 0,
            Even = 2,
            Odd = 3
        ],
        /// Number of stop bits appended to transmitted data.
        STOPLEN OFFSET(6) NUMBITS(1) [
            One = 0,
            Two = 1
        ],
        /// Selects standard or 32 kHz clocking mode.
        MODE32K OFFSET(7) NUMBITS(1) [],
        /// LIN break mode enable.
        LINMODE OFFSET(8) NUMBITS(1) [],
        /// CTS enable for flow control.
        CTSEN OFFSET(9) NUMBITS(1) [],
        /// Selects synchronous or asynchronous operation.
        SYNCEN OFFSET(11) NUMBITS(1) [],
        /// Selects the clock polarity and sampling edge of received data.
        CLKPOL OFFSET(12) NUMBITS(1) [
            FallingEdge = 0,
            RisingEdge = 1
        ],
        /// Synchronous mode master select.
        SYNCMST OFFSET(14) NUMBITS(1) [],
        /// Selects data loopback mode.
        LOOP OFFSET(15) NUMBITS(1) [],
        /// Output Enable Turnaround time for RS-485 operation.
        OETA OFFSET(18) NUMBITS(1) [],
        /// Automatic Address matching enable.
        AUTOADDR OFFSET(19) NUMBITS(1) [],
        /// Output Enable Select for RS-485 operation.
        OESEL OFFSET(20) NUMBITS(1) [],
        /// Output Enable Polarity for RS-485 operation.
        OEPOL OFFSET(21) NUMBITS(1) [],
        /// Receive data polarity.
        RXPOL OFFSET(22) NUMBITS(1) [],
        /// Transmit data polarity.
        TXPOL OFFSET(23) NUMBITS(1) []
    ],
    pub CTL [
        /// Break Enable: continuous break is sent while set.
        TXBRKEN OFFSET(1) NUMBITS(1) [],
        /// Enable address detect mode.
        ADDRDET OFFSET(2) NUMBITS(1) [],
        /// Transmit Disable.
        TXDIS OFFSET(6) NUMBITS(1) [],
        /// Continuous Clock generation in synchronous mode.
        CC OFFSET(8) NUMBITS(1) [],
        /// Clear Continuous Clock when a complete character is received.
        CLRCCONRX OFFSET(9) NUMBITS(1) [],
        /// Autobaud enable: measures the baud rate from the next start
        /// bit. Cleared by hardware on completion or error.
        AUTOBAUD OFFSET(16) NUMBITS(1) []
    ],
    pub STAT [
        /// Receiver Ready flag.
        RXRDY OFFSET(0) NUMBITS(1) [],
        /// Receiver Idle.
        RXIDLE OFFSET(1) NUMBITS(1) [],
        /// Transmitter Ready flag.
        TXRDY OFFSET(2) NUMBITS(1) [],
        /// Transmitter Idle.
        TXIDLE OFFSET(3) NUMBITS(1) [],
        /// The current state of the CTS input.
        CTS OFFSET(4) NUMBITS(1) [],
        /// CTS change detected. Write 1 to clear.
        DELTACTS OFFSET(5) NUMBITS(1) [],
        /// Transmitter disabled status.
        TXDISSTAT OFFSET(6) NUMBITS(1) [],
        /// Overrun Error: received data was lost before it was read.
        /// Write 1 to clear.
        OVERRUNINT OFFSET(8) NUMBITS(1) [],
        /// Received Break.
        RXBRK OFFSET(10) NUMBITS(1) [],
        /// Break change detected. Write 1 to clear.
        DELTARXBRK OFFSET(11) NUMBITS(1) [],
        /// A start bit was detected. Write 1 to clear.
        START OFFSET(12) NUMBITS(1) [],
        /// Framing Error: the received stop bit was not 1. Write 1 to
        /// clear.
        FRAMERRINT OFFSET(13) NUMBITS(1) [],
        /// Parity Error. Write 1 to clear.
        PARITYERRINT OFFSET(14) NUMBITS(1) [],
        /// Received Noise flag. Write 1 to clear.
        RXNOISEINT OFFSET(15) NUMBITS(1) [],
        /// Auto-baud Error: the measurement timed out or overflowed.
        /// Write 1 to clear.
        ABERR OFFSET(16) NUMBITS(1) []
    ],
    pub INTENSET [
        /// Enables the receiver-ready interrupt. Reads as the current
        /// enable; writing a one enables, writing zeros changes nothing.
        RXRDYEN OFFSET(0) NUMBITS(1) [],
        TXRDYEN OFFSET(2) NUMBITS(1) [],
        TXIDLEEN OFFSET(3) NUMBITS(1) [],
        DELTACTSEN OFFSET(5) NUMBITS(1) [],
        TXDISEN OFFSET(6) NUMBITS(1) [],
        OVERRUNEN OFFSET(8) NUMBITS(1) [],
        DELTARXBRKEN OFFSET(11) NUMBITS(1) [],
        STARTEN OFFSET(12) NUMBITS(1) [],
        FRAMERREN OFFSET(13) NUMBITS(1) [],
        PARITYERREN OFFSET(14) NUMBITS(1) [],
        RXNOISEEN OFFSET(15) NUMBITS(1) [],
        ABERREN OFFSET(16) NUMBITS(1) []
    ],
    pub INTENCLR [
        /// Writing a one disables the matching interrupt; zeros change
        /// nothing. The race-free counterpart of INTENSET.
        RXRDYCLR OFFSET(0) NUMBITS(1) [],
        TXRDYCLR OFFSET(2) NUMBITS(1) [],
        TXIDLECLR OFFSET(3) NUMBITS(1) [],
        DELTACTSCLR OFFSET(5) NUMBITS(1) [],
        TXDISCLR OFFSET(6) NUMBITS(1) [],
        OVERRUNCLR OFFSET(8) NUMBITS(1) [],
        DELTARXBRKCLR OFFSET(11) NUMBITS(1) [],
        STARTCLR OFFSET(12) NUMBITS(1) [],
        FRAMERRCLR OFFSET(13) NUMBITS(1) [],
        PARITYERRCLR OFFSET(14) NUMBITS(1) [],
        RXNOISECLR OFFSET(15) NUMBITS(1) [],
        ABERRCLR OFFSET(16) NUMBITS(1) []
    ],
    pub RXDAT [
        /// The last character received, right-justified.
        RXDAT OFFSET(0) NUMBITS(9) []
    ],
    pub RXDATSTAT [
        /// The last character received, right-justified.
        RXDAT OFFSET(0) NUMBITS(9) [],
        /// Framing error status for this character.
        FRAMERR OFFSET(13) NUMBITS(1) [],
        /// Parity error status for this character.
        PARITYERR OFFSET(14) NUMBITS(1) [],
        /// Noise detected on this character.
        RXNOISE OFFSET(15) NUMBITS(1) []
    ],
    pub TXDAT [
        /// The next character to transmit, right-justified.
        TXDAT OFFSET(0) NUMBITS(9) []
    ],
    pub BRG [
        /// The baud rate divider: the clock is divided by BRGVAL + 1.
        BRGVAL OFFSET(0) NUMBITS(16) []
    ],
    pub INTSTAT [
        RXRDY OFFSET(0) NUMBITS(1) [],
        TXRDY OFFSET(2) NUMBITS(1) [],
        TXIDLE OFFSET(3) NUMBITS(1) [],
        DELTACTS OFFSET(5) NUMBITS(1) [],
        TXDISINT OFFSET(6) NUMBITS(1) [],
        OVERRUNINT OFFSET(8) NUMBITS(1) [],
        DELTARXBRK OFFSET(11) NUMBITS(1) [],
        START OFFSET(12) NUMBITS(1) [],
        FRAMERRINT OFFSET(13) NUMBITS(1) [],
        PARITYERRINT OFFSET(14) NUMBITS(1) [],
        RXNOISEINT OFFSET(15) NUMBITS(1) [],
        ABERRINT OFFSET(16) NUMBITS(1) []
    ],
    pub OSR [
        /// Oversample value: 5 to 16 clocks per data bit, minus one.
        OSRVAL OFFSET(0) NUMBITS(4) []
    ],
    pub ADDR [
        /// The address to automatically match in 9-bit address mode.
        ADDRESS OFFSET(0) NUMBITS(8) []
    ]
];

/// A handle to one USART instance.
pub struct Usart {
    registers: StaticRef<UsartRegisters>,
    index: usize,
}

impl Usart {
    /// Creates the handle for USART instance `index`.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle per instance; the
    /// `peripherals::Peripherals` registry is the intended source.
    /// Panics at build time if `index` is not a USART instance.
    pub const unsafe fn new(index: usize) -> Usart {
        Usart {
            registers: unsafe { StaticRef::new(USART_BASES[index] as *const UsartRegisters) },
            index,
        }
    }

    /// The vector servicing this instance.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::USART[self.index]
    }

    /// NVIC control for this instance's vector.
    pub fn nvic(&self) -> cortexm4::nvic::Nvic {
        unsafe { cortexm4::nvic::Nvic::new(self.interrupt_number()) }
    }

    /// Enable the USART. Read-modify-write of CFG; not atomic against
    /// concurrent CFG writers.
    pub fn enable(&self) {
        self.registers.cfg.modify(CFG::ENABLE::SET);
    }

    /// One-transaction snapshot of the status register.
    pub fn status(&self) -> LocalRegisterCopy<u32, STAT::Register> {
        self.registers.stat.extract()
    }

    /// Received data was lost before being read.
    pub fn overrun(&self) -> bool {
        self.registers.stat.is_set(STAT::OVERRUNINT)
    }

    /// The last received stop bit was not a one.
    pub fn framing_error(&self) -> bool {
        self.registers.stat.is_set(STAT::FRAMERRINT)
    }

    /// The auto-baud measurement failed.
    pub fn autobaud_error(&self) -> bool {
        self.registers.stat.is_set(STAT::ABERR)
    }

    /// Acknowledge the error flags by writing ones to them.
    pub fn clear_errors(&self) {
        self.registers
            .stat
            .write(STAT::OVERRUNINT::SET + STAT::FRAMERRINT::SET + STAT::PARITYERRINT::SET
                + STAT::RXNOISEINT::SET + STAT::ABERR::SET);
    }

    /// Enable the receiver-ready interrupt through the set companion: a
    /// single write, no read-modify-write window.
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
    fn stat_field_masks_are_pairwise_disjoint() {
        let masks = [
            STAT::RXRDY, STAT::RXIDLE, STAT::TXRDY, STAT::TXIDLE, STAT::CTS,
            STAT::DELTACTS, STAT::TXDISSTAT, STAT::OVERRUNINT, STAT::RXBRK,
            STAT::DELTARXBRK, STAT::START, STAT::FRAMERRINT, STAT::PARITYERRINT,
            STAT::RXNOISEINT, STAT::ABERR,
        ]
        .map(|f| f.mask << f.shift);
        for (i, a) in masks.iter().enumerate() {
            for b in masks.iter().skip(i + 1) {
                assert_eq!(a & b, 0);
            }
        }
    }

    #[test]
    fn received_character_status_travels_with_the_data() {
        // A framing error on one character decodes independently of the
        // character bits themselves.
        let raw = (RXDATSTAT::RXDAT.val(0x1A5) + RXDATSTAT::FRAMERR::SET).value();
        assert_eq!(RXDATSTAT::RXDAT.read(raw), 0x1A5);
        assert_eq!(RXDATSTAT::FRAMERR.read(raw), 1);
        assert_eq!(RXDATSTAT::PARITYERR.read(raw), 0);
    }
}
