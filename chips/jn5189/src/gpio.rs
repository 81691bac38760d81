// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! General-purpose I/O.
//!
//! One port of 22 pins (PIO0_0 to PIO0_21). Each pin is readable and
//! writable three ways over the same state: as a byte register (`b`), as
//! a word register (`w`), and as one bit of the port-wide PIN register.
//!
//! Pin state changes go through the SET/CLR/NOT and DIRSET/DIRCLR
//! write-only companions: writing a one-hot mask changes exactly that
//! pin in a single bus transaction. This is the only update path that
//! cannot race an interrupt handler flipping a neighboring pin — a
//! read-modify-write of PIN or DIR could lose the other context's
//! update.

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::registers::{ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::GPIO_BASE;

/// Number of pins on the port.
pub const NUM_PINS: usize = 22;

register_structs! {
    pub GpioRegisters {
        /// Byte-wide pin registers: bit 0 of byte n is the state of pin
        /// n; the other bits read as zero.
        (0x0000 => b: [ReadWrite<u8, B::Register>; NUM_PINS]),
        (0x0016 => _reserved0),
        /// Word-wide pin registers: all ones if pin n is high, all
        /// zeros if low.
        (0x1000 => w: [ReadWrite<u32, W::Register>; NUM_PINS]),
        (0x1058 => _reserved1),
        /// Direction bits for the port.
        (0x2000 => dir: ReadWrite<u32, PORT::Register>),
        (0x2004 => _reserved2),
        /// Mask applied to reads and writes through MPIN.
        (0x2080 => mask: ReadWrite<u32, PORT::Register>),
        (0x2084 => _reserved3),
        /// Port pin read/write register.
        (0x2100 => pin: ReadWrite<u32, PORT::Register>),
        (0x2104 => _reserved4),
        /// Masked port pin read/write register.
        (0x2180 => mpin: ReadWrite<u32, PORT::Register>),
        (0x2184 => _reserved5),
        /// Write: set output bits. One transaction, one-hot.
        (0x2200 => set: ReadWrite<u32, PORT::Register>),
        (0x2204 => _reserved6),
        /// Write: clear output bits. One transaction, one-hot.
        (0x2280 => clr: WriteOnly<u32, PORT::Register>),
        (0x2284 => _reserved7),
        /// Write: toggle output bits. One transaction, one-hot.
        (0x2300 => not: WriteOnly<u32, PORT::Register>),
        (0x2304 => _reserved8),
        /// Write: set direction bits to output.
        (0x2380 => dirset: WriteOnly<u32, PORT::Register>),
        (0x2384 => _reserved9),
        /// Write: set direction bits to input.
        (0x2400 => dirclr: WriteOnly<u32, PORT::Register>),
        (0x2404 => _reserved10),
        /// Write: toggle direction bits.
        (0x2480 => dirnot: WriteOnly<u32, PORT::Register>),
        (0x2484 => @END),
    }
}

register_bitfields![u8,
    pub B [
        /// State of the pin this byte addresses.
        PBYTE OFFSET(0) NUMBITS(1) []
    ]
];

register_bitfields![u32,
    pub W [
        /// State of the pin this word addresses, replicated across the
        /// word on reads.
        PWORD OFFSET(0) NUMBITS(32) []
    ],
    pub PORT [
        /// One bit per pin of the port.
        PINS OFFSET(0) NUMBITS(22) []
    ]
];

/// A handle to the GPIO port.
pub struct Gpio {
    registers: StaticRef<GpioRegisters>,
}

impl Gpio {
    /// Creates the handle for the GPIO port.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Gpio {
        Gpio {
            registers: unsafe { StaticRef::new(GPIO_BASE as *const GpioRegisters) },
        }
    }

    /// The group-interrupt vector every enabled pin funnels into.
    pub fn group_interrupt_number(&self) -> u32 {
        interrupts::GINT0
    }

    /// Make `pin` an output. One write to the DIRSET companion.
    pub fn make_output(&self, pin: usize) {
        self.registers.dirset.set(1 << pin);
    }

    /// Make `pin` an input. One write to the DIRCLR companion.
    pub fn make_input(&self, pin: usize) {
        self.registers.dirclr.set(1 << pin);
    }

    /// Drive `pin` high. One write to the SET companion; no other pin
    /// is touched and no read-modify-write occurs.
    pub fn set_high(&self, pin: usize) {
        self.registers.set.set(1 << pin);
    }

    /// Drive `pin` low. One write to the CLR companion.
    pub fn set_low(&self, pin: usize) {
        self.registers.clr.set(1 << pin);
    }

    /// Toggle `pin`. One write to the NOT companion.
    pub fn toggle(&self, pin: usize) {
        self.registers.not.set(1 << pin);
    }

    /// The current state of `pin`, via its byte register.
    pub fn read(&self, pin: usize) -> bool {
        self.registers.b[pin].is_set(B::PBYTE)
    }

    /// The whole port's pin states in one transaction.
    pub fn read_port(&self) -> u32 {
        self.registers.pin.read(PORT::PINS)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn byte_and_word_views_cover_every_pin() {
        use core::mem::offset_of;
        assert_eq!(offset_of!(GpioRegisters, b), 0x0000);
        assert_eq!(offset_of!(GpioRegisters, w), 0x1000);
        // Byte view of pin n is at base + n; word view at 0x1000 + 4n.
        assert_eq!(offset_of!(GpioRegisters, w) + 4 * (NUM_PINS - 1), 0x1054);
    }

    #[test]
    fn companion_set_write_is_one_hot_and_skips_the_pin_register() {
        // On zeroed in-memory storage, driving a pin through the SET
        // companion stores exactly the one-hot mask there and issues no
        // read-modify-write of PIN.
        let regs: GpioRegisters = unsafe { core::mem::zeroed() };
        regs.set.set(1 << 3);
        assert_eq!(regs.set.get(), 0b1000);
        assert_eq!(regs.pin.get(), 0);
        assert_eq!(regs.dir.get(), 0);
    }
}
