// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Field encode/decode behavior.

use dk6_registers::fields::{Field, TryFromValue};
use dk6_registers::interfaces::{ReadWriteable, Readable, Writeable};
use dk6_registers::register_bitfields;
use dk6_registers::registers::InMemoryRegister;
use dk6_registers::LocalRegisterCopy;

register_bitfields![u32,
    pub Control [
        ENABLE OFFSET(0) NUMBITS(1) [],
        MODE OFFSET(1) NUMBITS(3) [
            Off = 0,
            Standby = 1,
            Active = 5
        ],
        PRESCALE OFFSET(4) NUMBITS(5) [],
        WIDE OFFSET(9) NUMBITS(23) []
    ],
    pub Status [
        /// Single-bit shorthand form.
        READY 0,
        ERRCOUNT OFFSET(8) NUMBITS(8) []
    ]
];

register_bitfields![u8,
    pub Byte [
        LOW OFFSET(0) NUMBITS(4) [],
        HIGH OFFSET(4) NUMBITS(4) []
    ]
];

register_bitfields![u16,
    pub Half [
        BOTTOM OFFSET(0) NUMBITS(9) [],
        TOP OFFSET(9) NUMBITS(7) []
    ]
];

fn round_trip<R: dk6_registers::RegisterLongName>(field: Field<u32, R>, width: usize) {
    for v in 0..(1u64 << width) {
        let v = v as u32;
        assert_eq!(field.read(field.val(v).value()), v);
    }
}

#[test]
fn decode_of_encode_is_identity() {
    round_trip(Control::ENABLE, 1);
    round_trip(Control::MODE, 3);
    round_trip(Control::PRESCALE, 5);
    round_trip(Status::ERRCOUNT, 8);

    for v in 0..(1u16 << 9) {
        assert_eq!(Half::BOTTOM.read(Half::BOTTOM.val(v).value()), v);
    }
    for v in 0..=0xfu8 {
        assert_eq!(Byte::HIGH.read(Byte::HIGH.val(v).value()), v);
    }
}

#[test]
fn encode_truncates_out_of_range_values() {
    // A value wider than the field loses its high bits on encode; the
    // low bits land in the field unchanged.
    let fv = Control::MODE.val(0b1101);
    assert_eq!(Control::MODE.read(fv.value()), 0b101);
    // The neighboring fields are untouched by the overflow.
    assert_eq!(fv.value() & !(0b111 << 1), 0);
}

#[test]
fn decode_is_independent_of_other_fields() {
    let word = (Control::MODE.val(5) + Control::PRESCALE.val(0b10110) + Control::ENABLE.val(1))
        .value();
    assert_eq!(Control::MODE.read(word), 5);
    assert_eq!(Control::PRESCALE.read(word), 0b10110);
    assert_eq!(Control::ENABLE.read(word), 1);
}

#[test]
fn enumerated_values_decode() {
    let word = Control::MODE.val(5).value();
    assert_eq!(
        Control::MODE.read_as_enum::<Control::MODE::Value>(word),
        Some(Control::MODE::Value::Active)
    );
    // 7 names no documented state.
    let word = Control::MODE.val(7).value();
    assert_eq!(Control::MODE.read_as_enum::<Control::MODE::Value>(word), None);
    assert_eq!(Control::MODE::Value::try_from_value(1), Some(Control::MODE::Value::Standby));
}

#[test]
fn set_and_clear_cover_the_full_field() {
    assert_eq!(Control::PRESCALE::SET.value(), 0b11111 << 4);
    assert_eq!(Control::PRESCALE::CLEAR.value(), 0);
    assert_eq!(Control::PRESCALE::CLEAR.mask(), 0b11111 << 4);
    assert_eq!(Status::READY::SET.value(), 1);
}

#[test]
fn field_masks_are_disjoint_and_in_range() {
    let masks = [
        Control::ENABLE.mask << Control::ENABLE.shift,
        Control::MODE.mask << Control::MODE.shift,
        Control::PRESCALE.mask << Control::PRESCALE.shift,
        Control::WIDE.mask << Control::WIDE.shift,
    ];
    for (i, a) in masks.iter().enumerate() {
        for b in masks.iter().skip(i + 1) {
            assert_eq!(a & b, 0);
        }
    }
    // Each mask's shift equals the position of its lowest set bit.
    assert_eq!(Control::MODE.shift, (Control::MODE.mask << Control::MODE.shift).trailing_zeros() as usize);
    assert_eq!(Control::WIDE.shift, (Control::WIDE.mask << Control::WIDE.shift).trailing_zeros() as usize);
}

#[test]
fn in_memory_register_modify_preserves_other_fields() {
    let reg: InMemoryRegister<u32, Control::Register> = InMemoryRegister::new(0);
    reg.write(Control::PRESCALE.val(3) + Control::ENABLE::SET);
    reg.modify(Control::MODE::Active);
    assert_eq!(reg.read(Control::PRESCALE), 3);
    assert_eq!(reg.read(Control::MODE), 5);
    assert!(reg.is_set(Control::ENABLE));

    reg.modify(Control::ENABLE::CLEAR);
    assert!(!reg.is_set(Control::ENABLE));
    assert_eq!(reg.read(Control::MODE), 5);
}

#[test]
fn local_copy_reads_like_the_register() {
    let reg: InMemoryRegister<u32, Control::Register> = InMemoryRegister::new(0);
    reg.write(Control::MODE::Standby + Control::PRESCALE.val(7));
    let copy: LocalRegisterCopy<u32, Control::Register> = reg.extract();
    assert_eq!(copy.read(Control::PRESCALE), 7);
    assert!(copy.matches_all(Control::MODE::Standby));
    assert!(copy.any_matching_bits_set(Control::PRESCALE::SET));
    assert_eq!(u32::from(copy), reg.get());
}
