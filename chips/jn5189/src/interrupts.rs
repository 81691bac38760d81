// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Device interrupt vector assignments.
//!
//! The constants below are the device half of the vector table, in the
//! exact order the core dispatches on. The numbering is load-bearing: the
//! boot code installs handlers by position, so a renumbering here would
//! silently route interrupts to the wrong handler. Device vectors are
//! contiguous from 0; the core exceptions keep their fixed negative ids
//! in [`cortexm4::exception`].
//!
//! Below the plain ids, one table per peripheral type records which
//! vector serves each instance, in instance order. Three shapes occur:
//! one vector per instance (FLEXCOMM, CTIMER, PIN_INT), one vector fanned
//! out over many channels of one instance (DMA0, GINT0), and one vector
//! deliberately shared by unrelated peripherals (BOD_ACOMP), which a
//! handler disambiguates by reading the two status registers.

/// Windowed watchdog timer.
pub const WWDT: u32 = 0;
/// Brown-out detector and analog comparator, shared. Read
/// `pmc::Pmc::brownout_detected` and `acomp::Acomp::edge_detected` to
/// tell the sources apart.
pub const BOD_ACOMP: u32 = 1;
/// DMA controller; all channels funnel into this one vector.
pub const DMA0: u32 = 2;
/// GPIO group interrupt; every enabled pin of the group funnels here.
pub const GINT0: u32 = 3;
/// Pin interrupt / pattern match channel 0.
pub const PIN_INT0: u32 = 4;
/// Pin interrupt / pattern match channel 1.
pub const PIN_INT1: u32 = 5;
/// Pin interrupt / pattern match channel 2.
pub const PIN_INT2: u32 = 6;
/// Pin interrupt / pattern match channel 3.
pub const PIN_INT3: u32 = 7;
/// Standard counter/timer 0.
pub const CTIMER0: u32 = 8;
/// Standard counter/timer 1.
pub const CTIMER1: u32 = 9;
/// FLEXCOMM slot 0 (USART0 personality).
pub const FLEXCOMM0: u32 = 10;
/// FLEXCOMM slot 1 (USART1 personality).
pub const FLEXCOMM1: u32 = 11;
/// FLEXCOMM slot 2 (I2C0 personality).
pub const FLEXCOMM2: u32 = 12;
/// FLEXCOMM slot 3 (I2C1 personality).
pub const FLEXCOMM3: u32 = 13;
/// FLEXCOMM slot 4 (SPI0 personality).
pub const FLEXCOMM4: u32 = 14;
/// FLEXCOMM slot 5 (SPI1 personality).
pub const FLEXCOMM5: u32 = 15;
/// FLEXCOMM slot 6 (I2C2 personality).
pub const FLEXCOMM6: u32 = 16;
/// ADC sequence A conversion complete.
pub const ADC0_SEQA: u32 = 17;
/// ADC sequence B conversion complete.
pub const ADC0_SEQB: u32 = 18;
/// ADC threshold compare and overrun.
pub const ADC0_THCMP: u32 = 19;
/// Real-time clock.
pub const RTC: u32 = 20;

/// Number of device vectors.
pub const NUM_VECTORS: usize = 21;

/// Vector per FLEXCOMM slot, in slot order.
pub const FLEXCOMM: [u32; 7] = [
    FLEXCOMM0, FLEXCOMM1, FLEXCOMM2, FLEXCOMM3, FLEXCOMM4, FLEXCOMM5, FLEXCOMM6,
];

/// Vector per USART instance, in instance order. Derived from the slot
/// table, never restated.
pub const USART: [u32; 2] = [FLEXCOMM[0], FLEXCOMM[1]];

/// Vector per I2C instance, in instance order.
pub const I2C: [u32; 3] = [FLEXCOMM[2], FLEXCOMM[3], FLEXCOMM[6]];

/// Vector per SPI instance, in instance order.
pub const SPI: [u32; 2] = [FLEXCOMM[4], FLEXCOMM[5]];

/// Vector per pin-interrupt channel, in channel order.
pub const PIN_INT: [u32; 4] = [PIN_INT0, PIN_INT1, PIN_INT2, PIN_INT3];

/// Vector per counter/timer instance, in instance order.
pub const CTIMER: [u32; 2] = [CTIMER0, CTIMER1];

/// The three vectors of the single ADC instance, in dispatch order.
pub const ADC0: [u32; 3] = [ADC0_SEQA, ADC0_SEQB, ADC0_THCMP];

/// The vectors of the single DMA instance.
pub const DMA: [u32; 1] = [DMA0];

#[cfg(test)]
mod tests {
    use super::*;
    use cortexm4::exception::ALL_EXCEPTIONS;

    const DISPATCH_ORDER: [u32; NUM_VECTORS] = [
        WWDT, BOD_ACOMP, DMA0, GINT0, PIN_INT0, PIN_INT1, PIN_INT2, PIN_INT3, CTIMER0,
        CTIMER1, FLEXCOMM0, FLEXCOMM1, FLEXCOMM2, FLEXCOMM3, FLEXCOMM4, FLEXCOMM5,
        FLEXCOMM6, ADC0_SEQA, ADC0_SEQB, ADC0_THCMP, RTC,
    ];

    #[test]
    fn device_vectors_are_contiguous_from_zero() {
        for (position, &id) in DISPATCH_ORDER.iter().enumerate() {
            assert_eq!(id as usize, position);
        }
    }

    #[test]
    fn device_vectors_are_disjoint_from_core_exceptions() {
        for e in ALL_EXCEPTIONS.iter() {
            assert!(e.id() < 0);
            for &id in DISPATCH_ORDER.iter() {
                assert_ne!(e.id(), id as i32);
            }
        }
    }

    #[test]
    fn per_type_tables_stay_in_vector_range() {
        let tables: [&[u32]; 8] = [
            &FLEXCOMM, &USART, &I2C, &SPI, &PIN_INT, &CTIMER, &ADC0, &DMA,
        ];
        for table in tables.iter() {
            for &id in table.iter() {
                assert!((id as usize) < NUM_VECTORS);
            }
        }
    }

    #[test]
    fn protocol_tables_follow_their_slots() {
        assert_eq!(USART, [FLEXCOMM[0], FLEXCOMM[1]]);
        assert_eq!(I2C, [FLEXCOMM[2], FLEXCOMM[3], FLEXCOMM[6]]);
        assert_eq!(SPI, [FLEXCOMM[4], FLEXCOMM[5]]);
    }

    #[test]
    fn shared_vector_is_a_single_entry() {
        // The brown-out detector and the analog comparator intentionally
        // share one slot; neither has a private vector.
        assert_eq!(BOD_ACOMP, 1);
        let privately_claimed = DISPATCH_ORDER
            .iter()
            .filter(|&&id| id == BOD_ACOMP)
            .count();
        assert_eq!(privately_claimed, 1);
    }
}
