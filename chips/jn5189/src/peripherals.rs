// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! The chip's peripheral set.
//!
//! [`Peripherals`] owns exactly one typed handle per peripheral
//! instance. Platform setup constructs it once and lends the handles
//! out to drivers; nothing else should call the per-module `new`
//! constructors. Handles to the same instance obtained elsewhere alias
//! this set's hardware — that is what the constructors' safety
//! contracts exist to surface.

use crate::acomp::Acomp;
use crate::adc::Adc;
use crate::ctimer::Ctimer;
use crate::dma::Dma;
use crate::flexcomm::Flexcomm;
use crate::gint::Gint;
use crate::gpio::Gpio;
use crate::i2c::I2c;
use crate::inputmux::Inputmux;
use crate::pint::Pint;
use crate::pmc::Pmc;
use crate::rtc::Rtc;
use crate::spi::Spi;
use crate::syscon::Syscon;
use crate::usart::Usart;
use crate::wwdt::Wwdt;

/// One handle per peripheral instance, instance-ordered where a type
/// has several.
///
/// The FLEXCOMM handles and the protocol handles deliberately overlap:
/// `usarts[0]` and `flexcomms[0]` are two views of one hardware block,
/// related by the personality select in the shared PSELID register.
pub struct Peripherals {
    pub syscon: Syscon,
    pub pmc: Pmc,
    pub wwdt: Wwdt,
    pub rtc: Rtc,
    pub gint0: Gint,
    pub pint: Pint,
    pub inputmux: Inputmux,
    pub gpio: Gpio,
    pub ctimers: [Ctimer; 2],
    pub flexcomms: [Flexcomm; 7],
    pub usarts: [Usart; 2],
    pub i2cs: [I2c; 3],
    pub spis: [Spi; 2],
    pub adc0: Adc,
    pub acomp: Acomp,
    pub dma0: Dma,
}

impl Peripherals {
    /// Creates the full peripheral set.
    ///
    /// ## Safety
    ///
    /// Call at most once for the lifetime of the program. A second set
    /// would hold a second handle to every instance, defeating the
    /// one-handle-per-instance discipline the individual constructors
    /// document.
    pub const unsafe fn new() -> Peripherals {
        unsafe {
            Peripherals {
                syscon: Syscon::new(),
                pmc: Pmc::new(),
                wwdt: Wwdt::new(),
                rtc: Rtc::new(),
                gint0: Gint::new(),
                pint: Pint::new(),
                inputmux: Inputmux::new(),
                gpio: Gpio::new(),
                ctimers: [Ctimer::new(0), Ctimer::new(1)],
                flexcomms: [
                    Flexcomm::new(0),
                    Flexcomm::new(1),
                    Flexcomm::new(2),
                    Flexcomm::new(3),
                    Flexcomm::new(4),
                    Flexcomm::new(5),
                    Flexcomm::new(6),
                ],
                usarts: [Usart::new(0), Usart::new(1)],
                i2cs: [I2c::new(0), I2c::new(1), I2c::new(2)],
                spis: [Spi::new(0), Spi::new(1)],
                adc0: Adc::new(),
                acomp: Acomp::new(),
                dma0: Dma::new(),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interrupts;

    #[test]
    fn instance_handles_bind_to_their_vectors_in_order() {
        let p = unsafe { Peripherals::new() };
        for (i, usart) in p.usarts.iter().enumerate() {
            assert_eq!(usart.interrupt_number(), interrupts::USART[i]);
        }
        for (i, i2c) in p.i2cs.iter().enumerate() {
            assert_eq!(i2c.interrupt_number(), interrupts::I2C[i]);
        }
        for (i, spi) in p.spis.iter().enumerate() {
            assert_eq!(spi.interrupt_number(), interrupts::SPI[i]);
        }
        for (i, fc) in p.flexcomms.iter().enumerate() {
            assert_eq!(fc.interrupt_number(), interrupts::FLEXCOMM[i]);
        }
        for (i, t) in p.ctimers.iter().enumerate() {
            assert_eq!(t.interrupt_number(), interrupts::CTIMER[i]);
        }
    }

    #[test]
    fn protocol_handles_share_their_slot_vector() {
        let p = unsafe { Peripherals::new() };
        assert_eq!(
            p.usarts[0].interrupt_number(),
            p.flexcomms[0].interrupt_number()
        );
        assert_eq!(
            p.i2cs[2].interrupt_number(),
            p.flexcomms[6].interrupt_number()
        );
    }

    #[test]
    fn brownout_and_comparator_share_one_vector() {
        let p = unsafe { Peripherals::new() };
        assert_eq!(p.pmc.interrupt_number(), p.acomp.interrupt_number());
        assert_eq!(p.pmc.interrupt_number(), interrupts::BOD_ACOMP);
    }
}
