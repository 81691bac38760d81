// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! System configuration (SYSCON).
//!
//! Memory remap, peripheral reset control, AHB clock gating, interrupt
//! wake-up enables, and the per-FLEXCOMM function clock selects.
//!
//! The reset, clock and wake-up banks each come in three flavors at
//! separate addresses: the plain read-write register, a write-only SET
//! companion and a write-only CLR companion. A one written to a
//! companion changes exactly that bit of the plain register in a single
//! bus transaction, so gating one peripheral's clock never read-modify-
//! writes the bits of another's.
//!
//! The two AHBCLKCTRL words are addressable both as the indexable
//! `ahbclkctrl` array and as the named views [`SysconRegisters::
//! ahbclkctrl0`]/[`SysconRegisters::ahbclkctrl1`] with their documented
//! gate names. The named views reinterpret the array's own storage —
//! the register cells are `repr(transparent)` over the word — so both
//! paths read and write the same bytes.

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::registers::{ReadWrite, WriteOnly};
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::memory_map::SYSCON_BASE;

register_structs! {
    pub SysconRegisters {
        /// Memory remap control: what is mapped at address zero.
        (0x000 => memoryremap: ReadWrite<u32, MEMORYREMAP::Register>),
        (0x004 => _reserved0),
        /// Peripheral reset control, two banks.
        (0x100 => presetctrl: [ReadWrite<u32, PRESETCTRLX::Register>; 2]),
        (0x108 => _reserved1),
        /// Peripheral reset control set companions.
        (0x120 => presetctrlset: [WriteOnly<u32, PRESETCTRLX::Register>; 2]),
        (0x128 => _reserved2),
        /// Peripheral reset control clear companions.
        (0x140 => presetctrlclr: [WriteOnly<u32, PRESETCTRLX::Register>; 2]),
        (0x148 => _reserved3),
        /// AHB clock gates, two banks. Named views: `ahbclkctrl0`,
        /// `ahbclkctrl1`.
        (0x200 => ahbclkctrl: [ReadWrite<u32, AHBCLKCTRLX::Register>; 2]),
        (0x208 => _reserved4),
        /// AHB clock gate set companions.
        (0x220 => ahbclkctrlset: [WriteOnly<u32, AHBCLKCTRLX::Register>; 2]),
        (0x228 => _reserved5),
        /// AHB clock gate clear companions.
        (0x240 => ahbclkctrlclr: [WriteOnly<u32, AHBCLKCTRLX::Register>; 2]),
        (0x248 => _reserved6),
        /// Interrupt wake-up enables, two banks; bank 0's bits mirror
        /// the device vector numbers.
        (0x680 => starter: [ReadWrite<u32, STARTERX::Register>; 2]),
        (0x688 => _reserved7),
        /// Wake-up enable set companions.
        (0x6A0 => starterset: [WriteOnly<u32, STARTERX::Register>; 2]),
        (0x6A8 => _reserved8),
        /// Wake-up enable clear companions.
        (0x6C0 => starterclr: [WriteOnly<u32, STARTERX::Register>; 2]),
        (0x6C8 => _reserved9),
        /// Function clock select, one per FLEXCOMM slot.
        (0x700 => fclksel: [ReadWrite<u32, FCLKSEL::Register>; 7]),
        (0x71C => @END),
    }
}

register_bitfields![u32,
    pub MEMORYREMAP [
        /// Which memory is visible at address zero, and therefore which
        /// vector table the core dispatches from.
        MAP OFFSET(0) NUMBITS(2) [
            /// Boot ROM vectors at address zero.
            Bootrom = 0,
            /// SRAM vectors at address zero.
            Sram = 1,
            /// Flash vectors at address zero.
            Flash = 2
        ]
    ],
    /// Generic word view of one reset bank.
    pub PRESETCTRLX [
        RESETS OFFSET(0) NUMBITS(32) []
    ],
    /// Generic word view of one clock gate bank.
    pub AHBCLKCTRLX [
        CLOCKS OFFSET(0) NUMBITS(32) []
    ],
    /// Clock gate bank 0: system and always-on blocks.
    pub AHBCLKCTRL0 [
        ROM 1,
        RAM0 3,
        RAM1 4,
        FLASH 7,
        SPIFI 10,
        MUX 11,
        IOCON 13,
        GPIO 14,
        PINT 18,
        GINT 19,
        DMA 20,
        ISO7816 21,
        WWDT 22,
        RTC 23,
        ADC 27
    ],
    /// Clock gate bank 1: serial interfaces and timers.
    pub AHBCLKCTRL1 [
        USART0 11,
        USART1 12,
        I2C0 13,
        I2C1 14,
        SPI0 16,
        SPI1 17,
        I2C2 21,
        CTIMER0 26,
        CTIMER1 27
    ],
    /// Generic word view of one wake-up enable bank.
    pub STARTERX [
        STARTERS OFFSET(0) NUMBITS(32) []
    ],
    /// Wake-up enable bank 0. Bit positions equal device vector
    /// numbers.
    pub STARTER0 [
        WWDT 0,
        BOD_ACOMP 1,
        DMA0 2,
        GINT0 3,
        PIN_INT0 4,
        PIN_INT1 5,
        PIN_INT2 6,
        PIN_INT3 7,
        CTIMER0 8,
        CTIMER1 9,
        FLEXCOMM0 10,
        FLEXCOMM1 11,
        FLEXCOMM2 12,
        FLEXCOMM3 13,
        FLEXCOMM4 14,
        FLEXCOMM5 15,
        FLEXCOMM6 16,
        ADC0_SEQA 17,
        ADC0_SEQB 18,
        ADC0_THCMP 19,
        RTC 20
    ],
    /// Function clock source select for one FLEXCOMM slot.
    pub FCLKSEL [
        SEL OFFSET(0) NUMBITS(3) [
            MainClock = 0,
            Osc32M = 1,
            Fro48M = 2,
            Fro32K = 3,
            NoClock = 7
        ]
    ]
];

impl SysconRegisters {
    /// Clock gate bank 0 under its documented gate names. Same storage
    /// as `ahbclkctrl[0]`.
    pub fn ahbclkctrl0(&self) -> &ReadWrite<u32, AHBCLKCTRL0::Register> {
        unsafe {
            &*(&self.ahbclkctrl[0] as *const ReadWrite<u32, AHBCLKCTRLX::Register>
                as *const ReadWrite<u32, AHBCLKCTRL0::Register>)
        }
    }

    /// Clock gate bank 1 under its documented gate names. Same storage
    /// as `ahbclkctrl[1]`.
    pub fn ahbclkctrl1(&self) -> &ReadWrite<u32, AHBCLKCTRL1::Register> {
        unsafe {
            &*(&self.ahbclkctrl[1] as *const ReadWrite<u32, AHBCLKCTRLX::Register>
                as *const ReadWrite<u32, AHBCLKCTRL1::Register>)
        }
    }

    /// Set companion of clock gate bank 0, under the gate names.
    pub fn ahbclkctrl0_set(&self) -> &WriteOnly<u32, AHBCLKCTRL0::Register> {
        unsafe {
            &*(&self.ahbclkctrlset[0] as *const WriteOnly<u32, AHBCLKCTRLX::Register>
                as *const WriteOnly<u32, AHBCLKCTRL0::Register>)
        }
    }

    /// Set companion of clock gate bank 1, under the gate names.
    pub fn ahbclkctrl1_set(&self) -> &WriteOnly<u32, AHBCLKCTRL1::Register> {
        unsafe {
            &*(&self.ahbclkctrlset[1] as *const WriteOnly<u32, AHBCLKCTRLX::Register>
                as *const WriteOnly<u32, AHBCLKCTRL1::Register>)
        }
    }

    /// Clear companion of clock gate bank 0, under the gate names.
    pub fn ahbclkctrl0_clr(&self) -> &WriteOnly<u32, AHBCLKCTRL0::Register> {
        unsafe {
            &*(&self.ahbclkctrlclr[0] as *const WriteOnly<u32, AHBCLKCTRLX::Register>
                as *const WriteOnly<u32, AHBCLKCTRL0::Register>)
        }
    }

    /// Clear companion of clock gate bank 1, under the gate names.
    pub fn ahbclkctrl1_clr(&self) -> &WriteOnly<u32, AHBCLKCTRL1::Register> {
        unsafe {
            &*(&self.ahbclkctrlclr[1] as *const WriteOnly<u32, AHBCLKCTRLX::Register>
                as *const WriteOnly<u32, AHBCLKCTRL1::Register>)
        }
    }

    /// Wake-up bank 0 under per-vector names. Same storage as
    /// `starter[0]`.
    pub fn starter0(&self) -> &ReadWrite<u32, STARTER0::Register> {
        unsafe {
            &*(&self.starter[0] as *const ReadWrite<u32, STARTERX::Register>
                as *const ReadWrite<u32, STARTER0::Register>)
        }
    }

    /// Set companion of wake-up bank 0, under per-vector names.
    pub fn starter0_set(&self) -> &WriteOnly<u32, STARTER0::Register> {
        unsafe {
            &*(&self.starterset[0] as *const WriteOnly<u32, STARTERX::Register>
                as *const WriteOnly<u32, STARTER0::Register>)
        }
    }

    /// Clear companion of wake-up bank 0, under per-vector names.
    pub fn starter0_clr(&self) -> &WriteOnly<u32, STARTER0::Register> {
        unsafe {
            &*(&self.starterclr[0] as *const WriteOnly<u32, STARTERX::Register>
                as *const WriteOnly<u32, STARTER0::Register>)
        }
    }
}

/// A handle to the SYSCON block.
pub struct Syscon {
    registers: StaticRef<SysconRegisters>,
}

impl Syscon {
    /// Creates the handle for SYSCON.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Syscon {
        Syscon {
            registers: unsafe { StaticRef::new(SYSCON_BASE as *const SysconRegisters) },
        }
    }

    /// What the memory remap currently maps at address zero, if the raw
    /// value names a mapping. Boot code reads this to locate the live
    /// vector table.
    pub fn memory_remap(&self) -> Option<MEMORYREMAP::MAP::Value> {
        self.registers.memoryremap.read_as_enum(MEMORYREMAP::MAP)
    }

    /// Gate the GPIO, PINT and input-mux clocks on. One write to the
    /// bank-0 set companion.
    pub fn enable_gpio_clocks(&self) {
        self.registers.ahbclkctrl0_set().write(
            AHBCLKCTRL0::GPIO::SET + AHBCLKCTRL0::PINT::SET + AHBCLKCTRL0::MUX::SET,
        );
    }

    /// Gate one FLEXCOMM slot's clock on. One write to the bank-1 set
    /// companion.
    pub fn enable_flexcomm_clock(&self, slot: usize) {
        let gate = match slot {
            0 => AHBCLKCTRL1::USART0::SET,
            1 => AHBCLKCTRL1::USART1::SET,
            2 => AHBCLKCTRL1::I2C0::SET,
            3 => AHBCLKCTRL1::I2C1::SET,
            4 => AHBCLKCTRL1::SPI0::SET,
            5 => AHBCLKCTRL1::SPI1::SET,
            _ => AHBCLKCTRL1::I2C2::SET,
        };
        self.registers.ahbclkctrl1_set().write(gate);
    }

    /// Select the function clock for one FLEXCOMM slot.
    pub fn select_flexcomm_clock(&self, slot: usize, sel: FCLKSEL::SEL::Value) {
        self.registers.fclksel[slot].write(FCLKSEL::SEL.val(sel as u32));
    }

    /// Allow a device vector to wake the part. One write to the bank-0
    /// wake-up set companion; bit position equals vector number.
    pub fn enable_wakeup(&self, vector: u32) {
        self.registers.starterset[0].set(1 << vector);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_view_and_array_view_share_storage() {
        // Writing one gate bit through the named view reads back
        // identically through the indexed view: same bytes, no copy.
        let regs: SysconRegisters = unsafe { core::mem::zeroed() };
        regs.ahbclkctrl0().write(AHBCLKCTRL0::GPIO::SET);
        assert_eq!(regs.ahbclkctrl[0].get(), 1 << 14);
        assert_eq!(regs.ahbclkctrl0().get(), regs.ahbclkctrl[0].get());

        regs.ahbclkctrl[1].set(1 << 11);
        assert!(regs.ahbclkctrl1().is_set(AHBCLKCTRL1::USART0));
    }

    #[test]
    fn named_views_alias_the_documented_offsets() {
        use core::mem::offset_of;
        let regs: SysconRegisters = unsafe { core::mem::zeroed() };
        let base = &regs as *const _ as usize;
        assert_eq!(regs.ahbclkctrl0() as *const _ as usize - base, 0x200);
        assert_eq!(regs.ahbclkctrl1() as *const _ as usize - base, 0x204);
        assert_eq!(regs.starter0() as *const _ as usize - base, 0x680);
        assert_eq!(offset_of!(SysconRegisters, fclksel), 0x700);
    }

    #[test]
    fn memory_remap_states_are_the_documented_encodings() {
        use dk6_registers::fields::TryFromValue;
        assert_eq!(
            MEMORYREMAP::MAP::Value::try_from_value(0),
            Some(MEMORYREMAP::MAP::Value::Bootrom)
        );
        assert_eq!(
            MEMORYREMAP::MAP::Value::try_from_value(2),
            Some(MEMORYREMAP::MAP::Value::Flash)
        );
        assert_eq!(MEMORYREMAP::MAP::Value::try_from_value(3), None);
    }

    #[test]
    fn starter_bank0_bits_mirror_vector_numbers() {
        use crate::interrupts;
        assert_eq!(STARTER0::FLEXCOMM0.shift as u32, interrupts::FLEXCOMM0);
        assert_eq!(STARTER0::RTC.shift as u32, interrupts::RTC);
        assert_eq!(STARTER0::BOD_ACOMP.shift as u32, interrupts::BOD_ACOMP);
    }
}
