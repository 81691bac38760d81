// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Core support for the Cortex-M4 as integrated on DK6-family chips.
//!
//! The chip crates hold the device-specific half of the interrupt model
//! (vector numbers and their binding to peripheral instances); this crate
//! holds the core-side half: the fixed exception numbering and the NVIC.

#![no_std]

pub mod exception;
pub mod nvic;
