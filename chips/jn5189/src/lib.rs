// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Register description for the NXP JN5189 (DK6 family).
//!
//! One module per peripheral type. Each module carries the block's
//! register layout, its bitfields, the constant base-address table of its
//! instances, and a typed handle. The layouts are checked against the
//! documented offsets at compile time; nothing here allocates or runs at
//! startup.
//!
//! The seven FLEXCOMM apertures deserve a note: each is one hardware
//! block that presents itself as a USART, SPI or I2C depending on the
//! personality selected in its PSELID register, so the same base address
//! is deliberately described by more than one register layout. See
//! [`flexcomm`] for the shared block and [`memory_map`] for the address
//! authority.

#![no_std]

pub mod acomp;
pub mod adc;
pub mod ctimer;
pub mod dma;
pub mod flexcomm;
pub mod gint;
pub mod gpio;
pub mod i2c;
pub mod inputmux;
pub mod interrupts;
pub mod memory_map;
pub mod peripherals;
pub mod pint;
pub mod pmc;
pub mod rtc;
pub mod spi;
pub mod syscon;
pub mod usart;
pub mod wwdt;
