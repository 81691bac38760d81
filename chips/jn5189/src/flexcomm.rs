// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Flexible communication (FLEXCOMM) shared block.
//!
//! Each of the seven FLEXCOMM apertures is one hardware block that can
//! operate as a USART, SPI or I2C. Which personality is active is
//! selected at runtime through the `PSELID` register sitting at the top
//! of the 4 KiB aperture, and can be locked until the next reset.
//!
//! The aperture is therefore deliberately described by two layouts at the
//! same base address: this module's shared view, and the selected
//! protocol's own layout ([`crate::usart`], [`crate::i2c`],
//! [`crate::spi`]), all spanning the identical 4 KiB and all carrying the
//! shared `PSELID`/`PID` words at the same tail offsets. Switching views
//! never moves data; both read and write the same bytes. The assertions
//! at the bottom pin the members of this alias arrangement to identical
//! sizes; `memory_map` derives their bases from one table.

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::registers::{ReadOnly, ReadWrite};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::interrupts;
use crate::memory_map::FLEXCOMM_BASES;

register_structs! {
    /// The shared view of a FLEXCOMM aperture: only the personality
    /// select and identification words, at the top of the block.
    pub FlexcommRegisters {
        (0x000 => _reserved0),
        /// Peripheral Select and Flexcomm ID register.
        (0xFF8 => pselid: ReadWrite<u32, PSELID::Register>),
        /// Peripheral identification register.
        (0xFFC => pid: ReadOnly<u32, PID::Register>),
        (0x1000 => @END),
    }
}

register_bitfields![u32,
    pub PSELID [
        /// Peripheral Select. Writable by software unless LOCK is set.
        PERSEL OFFSET(0) NUMBITS(3) [
            /// No peripheral selected.
            NoPeripheralSelected = 0,
            /// USART function selected.
            Usart = 1,
            /// SPI function selected.
            Spi = 2,
            /// I2C function selected.
            I2c = 3
        ],
        /// Lock the peripheral select until the next reset.
        LOCK OFFSET(3) NUMBITS(1) [
            Unlocked = 0,
            Locked = 1
        ],
        /// USART present indicator. Read-only.
        USARTPRESENT OFFSET(4) NUMBITS(1) [],
        /// SPI present indicator. Read-only.
        SPIPRESENT OFFSET(5) NUMBITS(1) [],
        /// I2C present indicator. Read-only.
        I2CPRESENT OFFSET(6) NUMBITS(1) [],
        /// Flexcomm ID.
        ID OFFSET(12) NUMBITS(20) []
    ],
    pub PID [
        /// Size aperture for the register port on the bus.
        APERTURE OFFSET(0) NUMBITS(8) [],
        /// Minor revision of the selected function implementation.
        MINOR_REV OFFSET(8) NUMBITS(4) [],
        /// Major revision of the selected function implementation.
        MAJOR_REV OFFSET(12) NUMBITS(4) [],
        /// Module identifier for the selected function.
        ID OFFSET(16) NUMBITS(16) []
    ]
];

/// A handle to one FLEXCOMM slot's shared view.
pub struct Flexcomm {
    registers: StaticRef<FlexcommRegisters>,
    slot: usize,
}

impl Flexcomm {
    /// Creates the handle for FLEXCOMM slot `slot`.
    ///
    /// ## Safety
    ///
    /// The caller must ensure no conflicting live handle to the same slot
    /// exists; two handles selecting different personalities on one slot
    /// would fight over the same hardware. `peripherals::Peripherals` is
    /// the intended way to obtain exactly one handle per slot. Panics at
    /// build time if `slot` is not one of the seven slots.
    pub const unsafe fn new(slot: usize) -> Flexcomm {
        Flexcomm {
            registers: unsafe {
                StaticRef::new(FLEXCOMM_BASES[slot] as *const FlexcommRegisters)
            },
            slot,
        }
    }

    /// The vector servicing this slot, whichever personality is active.
    pub fn interrupt_number(&self) -> u32 {
        interrupts::FLEXCOMM[self.slot]
    }

    /// NVIC control for this slot's vector.
    pub fn nvic(&self) -> cortexm4::nvic::Nvic {
        unsafe { cortexm4::nvic::Nvic::new(self.interrupt_number()) }
    }

    /// Whether this slot implements the USART function.
    pub fn has_usart(&self) -> bool {
        self.registers.pselid.is_set(PSELID::USARTPRESENT)
    }

    /// Whether this slot implements the SPI function.
    pub fn has_spi(&self) -> bool {
        self.registers.pselid.is_set(PSELID::SPIPRESENT)
    }

    /// Whether this slot implements the I2C function.
    pub fn has_i2c(&self) -> bool {
        self.registers.pselid.is_set(PSELID::I2CPRESENT)
    }

    /// The currently selected personality, if the raw value names one.
    pub fn selected(&self) -> Option<PSELID::PERSEL::Value> {
        self.registers.pselid.read_as_enum(PSELID::PERSEL)
    }

    /// Select the USART personality and lock the selection.
    pub fn select_usart(&self) {
        self.registers
            .pselid
            .write(PSELID::PERSEL::Usart + PSELID::LOCK::Locked);
    }

    /// Select the SPI personality and lock the selection.
    pub fn select_spi(&self) {
        self.registers
            .pselid
            .write(PSELID::PERSEL::Spi + PSELID::LOCK::Locked);
    }

    /// Select the I2C personality and lock the selection.
    pub fn select_i2c(&self) {
        self.registers
            .pselid
            .write(PSELID::PERSEL::I2c + PSELID::LOCK::Locked);
    }
}

// Every member of the aperture's alias arrangement spans the same 4 KiB.
const _: () = {
    assert!(core::mem::size_of::<FlexcommRegisters>() == 0x1000);
    assert!(
        core::mem::size_of::<crate::usart::UsartRegisters>()
            == core::mem::size_of::<FlexcommRegisters>()
    );
    assert!(
        core::mem::size_of::<crate::i2c::I2cRegisters>()
            == core::mem::size_of::<FlexcommRegisters>()
    );
    assert!(
        core::mem::size_of::<crate::spi::SpiRegisters>()
            == core::mem::size_of::<FlexcommRegisters>()
    );
};

#[cfg(test)]
mod tests {
    use super::*;
    use core::mem::offset_of;

    #[test]
    fn personality_views_place_the_shared_words_identically() {
        assert_eq!(offset_of!(FlexcommRegisters, pselid), 0xFF8);
        assert_eq!(
            offset_of!(crate::usart::UsartRegisters, pselid),
            offset_of!(FlexcommRegisters, pselid)
        );
        assert_eq!(
            offset_of!(crate::i2c::I2cRegisters, pselid),
            offset_of!(FlexcommRegisters, pselid)
        );
        assert_eq!(
            offset_of!(crate::spi::SpiRegisters, pselid),
            offset_of!(FlexcommRegisters, pselid)
        );
    }

    #[test]
    fn personality_select_encodes_the_documented_values() {
        assert_eq!(u32::from(PSELID::PERSEL::Usart), 1);
        assert_eq!(u32::from(PSELID::PERSEL::Spi), 2);
        assert_eq!(u32::from(PSELID::PERSEL::I2c), 3);
    }
}
