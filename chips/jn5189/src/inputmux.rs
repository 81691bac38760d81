// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Input multiplexing (INPUT MUX).
//!
//! Routes port pins to the PINT channels and peripheral request lines to
//! the DMA trigger inputs.

use dk6_registers::interfaces::Writeable;
use dk6_registers::registers::ReadWrite;
use dk6_registers::{register_bitfields, register_structs, StaticRef};

use crate::memory_map::INPUTMUX_BASE;

register_structs! {
    pub InputmuxRegisters {
        (0x000 => _reserved0),
        /// Pin interrupt select, one per PINT channel.
        (0x0C0 => pintsel: [ReadWrite<u32, PINTSEL::Register>; 4]),
        (0x0D0 => _reserved1),
        /// Trigger select, one per DMA channel.
        (0x0E0 => dma_itrig_inmux: [ReadWrite<u32, DMA_ITRIG_INMUX::Register>; 19]),
        (0x12C => @END),
    }
}

register_bitfields![u32,
    pub PINTSEL [
        /// The port pin routed to this PINT channel.
        INTPIN OFFSET(0) NUMBITS(5) []
    ],
    pub DMA_ITRIG_INMUX [
        /// The trigger input routed to this DMA channel.
        INP OFFSET(0) NUMBITS(5) []
    ]
];

/// A handle to the input mux.
pub struct Inputmux {
    registers: StaticRef<InputmuxRegisters>,
}

impl Inputmux {
    /// Creates the handle for the input mux.
    ///
    /// ## Safety
    ///
    /// The caller must hold at most one live handle; the
    /// `peripherals::Peripherals` registry is the intended source.
    pub const unsafe fn new() -> Inputmux {
        Inputmux {
            registers: unsafe { StaticRef::new(INPUTMUX_BASE as *const InputmuxRegisters) },
        }
    }

    /// Route port pin `pin` to PINT channel `channel`.
    pub fn select_pint_pin(&self, channel: usize, pin: u32) {
        self.registers.pintsel[channel].write(PINTSEL::INTPIN.val(pin));
    }

    /// Route trigger input `input` to DMA channel `channel`.
    pub fn select_dma_trigger(&self, channel: usize, input: u32) {
        self.registers.dma_itrig_inmux[channel].write(DMA_ITRIG_INMUX::INP.val(input));
    }
}
