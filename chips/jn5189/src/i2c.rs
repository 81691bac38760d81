// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! I2C personality of the FLEXCOMM block.
//!
//! Three instances: I2C0, I2C1 and I2C2, on FLEXCOMM slots 2, 3 and 6.

use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::flexcomm::{PID, PSELID};
use crate::interrupts;
use crate::memory_map::I2C_BASES;

register_structs! {
    pub I2cRegisters {
        /// Configuration for shared functions.
        (0x000 => cfg: ReadWrite<u32, CFG::Register>),
        /// Status register for master, slave, and monitor functions.
        (0x004 => stat: ReadWrite<u32, STAT::Register>),
        /// Interrupt Enable read and Set register.
        (0x008 => intenset: ReadWrite<u32, INTENSET::Register>),
        /// Interrupt Enable Clear register.
        (0x00C => intenclr: WriteOnly<u32, INTENCLR::Register>),
        /// Time-out value register.
        (0x010 => timeout: ReadWrite<u32, TIMEOUT::Register>),
        /// Clock pre-divider for the entire I2C interface.
        (0x014 => clkdiv: ReadWrite<u32, CLKDIV::Register>),
        /// Interrupt status register for master, slave, and monitor
        /// functions.
        (0x018 => intstat: ReadOnly<u32, INTSTAT::Register>),
        (0x01C => _reserved0),
        /// Master control register.
        (0x020 => mstctl: ReadWrite<u32, MSTCTL::Register>),
        /// Master timing configuration.
        (0x024 => msttime: ReadWrite<u32, MSTTIME::Register>),
        /// Combined master receiver and transmitter data register.
        (0x028 => mstdat: ReadWrite<u32, MSTDAT::Register>),
        (0x02C => _reserved1),
        /// Slave control register.
        (0x040 => slvctl: ReadWrite<u32, SLVCTL::Register>),
        /// Combined slave receiver and transmitter data register.
        (0x044 => slvdat: ReadWrite<u32, SLVDAT::Register>),
        /// Slave address registers, one per hardware address match unit.
        (0x048 => slvadr: [ReadWrite<u32, SLVADR::Register>; 4]),
        /// Slave qualification for address 0.
        (0x058 => slvqual0: ReadWrite<u32, SLVQUAL0::Register>),
        (0x05C => _reserved2),
        /// Monitor receiver data register.
        (0x080 => monrxdat: ReadOnly<u32, MONRXDAT::Register>),
        (0x084 => _reserved3),
        /// Peripheral Select and Flexcomm ID register (shared words).
        (0xFF8 => pselid: ReadWrite<u32, PSELID::Register>),
        /// Peripheral identification register (shared words).
        (0xFFC => pid: ReadOnly<u32, PID::Register>),
        (0x1000 => @END),
    }
}

register_bitfields![u32,
    pub CFG [
        /// Master Enable.
        MSTEN OFFSET(0) NUMBITS(1) [],
        /// Slave Enable.
        SLVEN OFFSET(1) NUMBITS(1) [],
        /// Monitor Enable.
        MONEN OFFSET(2) NUMBITS(1) [],
        /// I2C bus Time-out Enable.
        TIMEOUTEN OFFSET(3) NUMBITS(1) [],
        /// Monitor function Clock Stretching.
        MONCLKSTR OFFSET(4) NUMBITS(1) [],
        /// High-speed mode Capable enable.
        HSCAPABLE OFFSET(5) NUMBITS(1) []
    ],
    pub STAT [
        /// Master Pending: the master is waiting to continue.
        MSTPENDING OFFSET(0) NUMBITS(1) [],
        /// Master State code.
        MSTSTATE OFFSET(1) NUMBITS(3) [
            Idle = 0,
            RxReady = 1,
            TxReady = 2,
            NackAddress = 3,
            NackData = 4
        ],
        /// Master Arbitration Loss flag. Write 1 to clear.
        MSTARBLOSS OFFSET(4) NUMBITS(1) [],
        /// Master Start/Stop Error flag. Write 1 to clear.
        MSTSTSTPERR OFFSET(6) NUMBITS(1) [],
        /// Slave Pending.
        SLVPENDING OFFSET(8) NUMBITS(1) [],
        /// Slave State code.
        SLVSTATE OFFSET(9) NUMBITS(2) [
            SlaveAddress = 0,
            SlaveReceive = 1,
            SlaveTransmit = 2
        ],
        /// Slave Not Stretching: the slave is not holding the clock.
        SLVNOTSTR OFFSET(11) NUMBITS(1) [],
        /// Slave address match Index.
        SLVIDX OFFSET(12) NUMBITS(2) [],
        /// Slave selected flag.
        SLVSEL OFFSET(14) NUMBITS(1) [],
        /// Slave Deselected flag. Write 1 to clear.
        SLVDESEL OFFSET(15) NUMBITS(1) [],
        /// Monitor Ready.
        MONRDY OFFSET(16) NUMBITS(1) [],
        /// Monitor Overflow flag. Write 1 to clear.
        MONOV OFFSET(17) NUMBITS(1) [],
        /// Monitor Active flag.
        MONACTIVE OFFSET(18) NUMBITS(1) [],
        /// Monitor Idle flag. Write 1 to clear.
        MONIDLE OFFSET(19) NUMBITS(1) [],
        /// Event Time-out: the bus stayed in one state too long. Write 1
        /// to clear.
        EVENTTIMEOUT OFFSET(24) NUMBITS(1) [],
        /// SCL Time-out: the clock was low too long. Write 1 to clear.
        SCLTIMEOUT OFFSET(25) NUMBITS(1) []
    ],
    pub INTENSET [
        MSTPENDINGEN OFFSET(0) NUMBITS(1) [],
        MSTARBLOSSEN OFFSET(4) NUMBITS(1) [],
        MSTSTSTPERREN OFFSET(6) NUMBITS(1) [],
        SLVPENDINGEN OFFSET(8) NUMBITS(1) [],
        SLVNOTSTREN OFFSET(11) NUMBITS(1) [],
        SLVDESELEN OFFSET(15) NUMBITS(1) [],
        MONRDYEN OFFSET(16) NUMBITS(1) [],
        MONOVEN OFFSET(17) NUMBITS(1) [],
        MONIDLEEN OFFSET(19) NUMBITS(1) [],
        EVENTTIMEOUTEN OFFSET(24) NUMBITS(1) [],
        SCLTIMEOUTEN OFFSET(25) NUMBITS(1) []
    ],
    pub INTENCLR [
        MSTPENDINGCLR OFFSET(0) NUMBITS(1) [],
        MSTARBLOSSCLR OFFSET(4) NUMBITS(1) [],
        MSTSTSTPERRCLR OFFSET(6) NUMBITS(1) [],
        SLVPENDINGCLR OFFSET(8) NUMBITS(1) [],
        SLVNOTSTRCLR OFFSET(11) NUMBITS(1) [],
        SLVDESELCLR OFFSET(15) NUMBITS(1) [],
        MONRDYCLR OFFSET(16) NUMBITS(1) [],
        MONOVCLR OFFSET(17) NUMBITS(1) [],
        MONIDLECLR OFFSET(19) NUMBITS(1) [],
        EVENTTIMEOUTCLR OFFSET(24) NUMBITS(1) [],
        SCLTIMEOUTCLR OFFSET(25) NUMBITS(1) []
    ],
    pub TIMEOUT [
        /// Time-out time value, bottom four bits. Hardware reads these
        /// as all ones.
        TOMIN OFFSET(0) NUMBITS(4) [],
        /// Time-out time value in increments of 16 function clocks.
        TO OFFSET(4) NUMBITS(12) []
    ],
    pub CLKDIV [
        /// The function clock is divided by DIVVAL + 1.
        DIVVAL OFFSET(0) NUMBITS(16) []
    ],
    pub INTSTAT [
        MSTPENDING OFFSET(0) NUMBITS(1) [],
        MSTARBLOSS OFFSET(4) NUMBITS(1) [],
        MSTSTSTPERR OFFSET(6) NUMBITS(1) [],
        SLVPENDING OFFSET(8) NUMBITS(1) [],
        SLVNOTSTR OFFSET(11) NUMBITS(1) [],
        SLVDESEL OFFSET(15) NUMBITS(1) [],
        MONRDY OFFSET(16) NUMBITS(1) [],
        MONOV OFFSET(17) NUMBITS(1) [],
        MONIDLE OFFSET(19) NUMBITS(1) [],
        EVENTTIMEOUT OFFSET(24) NUMBITS(1) [],
        SCLTIMEOUT OFFSET(25) NUMBITS(1) []
    ],
    pub MSTCTL [
        /// Master Continue: informs the master it may continue.
        MSTCONTINUE OFFSET(0) NUMBITS(1) [],
        /// Master Start control: generate a start condition.
        MSTSTART OFFSET(1) NUMBITS(1) [],
        /// Master Stop control: generate a stop condition.
        MSTSTOP OFFSET(2) NUMBITS(1) [],
        /// Master DMA enable.
        MSTDMA OFFSET(3) NUMBITS(1) []
    ],
    pub MSTTIME [
        /// Master SCL Low time: 2 + MSTSCLLOW clock pre-divider cycles.
        MSTSCLLOW OFFSET(0) NUMBITS(3) [],
        /// Master SCL High time: 2 + MSTSCLHIGH clock pre-divider cycles.
        MSTSCLHIGH OFFSET(4) NUMBITS(3) []
    ],
    pub MSTDAT [
        /// Master data: to be transmitted, or just received.
        DATA OFFSET(0) NUMBITS(8) []
    ],
    pub SLVCTL [
        /// Slave Continue.
        SLVCONTINUE OFFSET(0) NUMBITS(1) [],
        /// Slave NACK the next received byte.
        SLVNACK OFFSET(1) NUMBITS(1) [],
        /// Slave DMA enable.
        SLVDMA OFFSET(3) NUMBITS(1) []
    ],
    pub SLVDAT [
        /// Slave data: to be transmitted, or just received.
        DATA OFFSET(0) NUMBITS(8) []
    ],
    pub SLVADR [
        /// Slave Address n Disable.
        SADISABLE OFFSET(0) NUMBITS(1) [],
        /// Seven-bit slave address, matched against received addresses.
        SLVADR OFFSET(1) NUMBITS(7) []
    ],
    pub SLVQUAL0 [
        /// Qualify mode: address range instead of masked match.
        QUALMODE0 OFFSET(0) NUMBITS(1) [],
        /// Mask or upper bound for slave address 0.
        SLVQUAL0 OFFSET(1) NUMBITS(7) []
    ],
    pub MONRXDAT [
        /// Monitor function receive data.
        MONRXDAT OFFSET(0) NUMBITS(8) [],
        /// The data was a start bit.
        MONSTART OFFSET(8) NUMBITS(1) [],
        /// The data was a repeated start.
        MONRESTART OFFSET(9) NUMBITS(1) [],
        /// The data was NACKed.
        MONNACK OFFSET(10) NUMBITS(1) []
    ]
];

/// A handle to one I2C instance.
pub struct I2c {
    registers: StaticRef<I2cRegisters>,
    index: usize,
}

impl I2c {
    /// Creates the handle for I2C instance `index`.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle per instance; the
    /// `peripherals::Peripherals` registry is the intended source.
    /// Panics at build time if `index` is not an I2C instance.
    pub const unsafe fn new(index: usize) -> I2c {
        I2c {
            registers: unsafe { StaticRef::new(I2C_BASES[index] as *const I2cRegisters) },
            index,
        }
    }

    /// The vector servicing this instance.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::I2C[self.index]
    }

    /// NVIC control for this instance's vector.
    pub fn nvic(&self) -> cortexm4::nvic::Nvic {
        unsafe { cortexm4::nvic::Nvic::new(self.interrupt_number()) }
    }

    /// Enable the master function. Read-modify-write of CFG.
    pub fn enable_master(&self) {
        self.registers.cfg.modify(CFG::MSTEN::SET);
    }

    /// The master state machine's current state, if the raw code names
    /// one.
    pub fn master_state(&self) -> Option<STAT::MSTSTATE::Value> {
        self.registers.stat.read_as_enum(STAT::MSTSTATE)
    }

    /// The bus stalled long enough to trip either time-out.
    pub fn timed_out(&self) -> bool {
        self.registers.stat.is_set(STAT::EVENTTIMEOUT)
            || self.registers.stat.is_set(STAT::SCLTIMEOUT)
    }

    /// Acknowledge the time-out flags.
    pub fn clear_timeouts(&self) {
        self.registers
            .stat
            .write(STAT::EVENTTIMEOUT::SET + STAT::SCLTIMEOUT::SET);
    }

    /// Enable the master-pending interrupt through the set companion.
    pub fn enable_master_interrupt(&self) {
        self.registers.intenset.write(INTENSET::MSTPENDINGEN::SET);
    }

    /// Disable the master-pending interrupt through the clear companion.
    pub fn disable_master_interrupt(&self) {
        self.registers.intenclr.write(INTENCLR::MSTPENDINGCLR::SET);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn master_state_codes_decode() {
        use dk6_registers::fields::TryFromValue;
        assert_eq!(
            STAT::MSTSTATE::Value::try_from_value(2),
            Some(STAT::MSTSTATE::Value::TxReady)
        );
        assert_eq!(STAT::MSTSTATE::Value::try_from_value(7), None);
    }

    #[test]
    fn address_match_units_sit_at_consecutive_words() {
        use core::mem::offset_of;
        assert_eq!(offset_of!(I2cRegisters, slvadr), 0x048);
        assert_eq!(offset_of!(I2cRegisters, slvqual0), 0x058);
    }
}
