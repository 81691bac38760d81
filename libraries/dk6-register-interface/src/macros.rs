// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Macros for declaring register layouts and bitfields.
//!
//! [`register_structs!`] turns an ordered `(offset => name: Type)` sequence
//! into a `#[repr(C)]` struct and verifies the whole layout at compile
//! time: every declared offset is checked against the real field offset,
//! reserved gaps are sized from the next declared offset, and the final
//! `(size => @END)` entry pins the total size. Getting any of it wrong is
//! a build error, never a runtime condition — the layout mirrors silicon
//! that cannot move.
//!
//! [`register_bitfields!`] declares the fields of each register: a `Field`
//! constant per field, `SET`/`CLEAR` shorthands, and the enumerated values
//! the silicon documents, if any.

/// Computes the unshifted mask of a field from its width in bits.
///
/// Split into two half-width steps so that a field spanning the entire
/// register does not overflow the shift.
#[doc(hidden)]
#[macro_export]
macro_rules! bitmask {
    ($numbits:expr) => {
        (1 << ($numbits - 1)) + ((1 << ($numbits - 1)) - 1)
    };
}

/// Define the bitfields of one or more registers.
///
/// ```rust
/// use dk6_registers::register_bitfields;
///
/// register_bitfields![u32,
///     CTRL [
///         /// Enable the unit.
///         ENABLE OFFSET(0) NUMBITS(1) [],
///         MODE OFFSET(1) NUMBITS(2) [
///             Off = 0,
///             Slow = 1,
///             Fast = 2
///         ],
///         /// Single-bit shorthand.
///         LOCK 31
///     ]
/// ];
/// ```
#[macro_export]
macro_rules! register_bitfields {
    {
        $valtype:ident, $( $(#[$attr:meta])* $vis:vis $reg:ident $fields:tt ),* $(,)?
    } => {
        $(
            #[allow(non_snake_case)]
            $(#[$attr])*
            $vis mod $reg {
                /// Marker tying `Field` and `FieldValue` constants to this
                /// register's layout.
                #[derive(Clone, Copy)]
                pub struct Register;
                impl $crate::RegisterLongName for Register {}

                $crate::register_bitmasks!( $valtype, Register, $fields );
            }
        )*
    };
}

/// For internal use by `register_bitfields!`.
#[doc(hidden)]
#[macro_export]
macro_rules! register_bitmasks {
    // Field with a list (possibly empty) of named values.
    ($valtype:ident, $reg:ident, [
        $(#[$attr:meta])* $field:ident OFFSET($offset:expr) NUMBITS($numbits:expr) [ $($values:tt)* ]
        $(, $($rest:tt)*)?
    ]) => {
        $crate::register_bitmasks!(@field $valtype, $reg, $(#[$attr])* $field, $offset, $numbits, [ $($values)* ]);
        $crate::register_bitmasks!($valtype, $reg, [ $($($rest)*)? ]);
    };
    // Field without a value list.
    ($valtype:ident, $reg:ident, [
        $(#[$attr:meta])* $field:ident OFFSET($offset:expr) NUMBITS($numbits:expr)
        $(, $($rest:tt)*)?
    ]) => {
        $crate::register_bitmasks!(@field $valtype, $reg, $(#[$attr])* $field, $offset, $numbits, []);
        $crate::register_bitmasks!($valtype, $reg, [ $($($rest)*)? ]);
    };
    // Single-bit shorthand: `NAME bit`.
    ($valtype:ident, $reg:ident, [
        $(#[$attr:meta])* $field:ident $bit:expr
        $(, $($rest:tt)*)?
    ]) => {
        $crate::register_bitmasks!(@field $valtype, $reg, $(#[$attr])* $field, $bit, 1, []);
        $crate::register_bitmasks!($valtype, $reg, [ $($($rest)*)? ]);
    };
    // End of the field list.
    ($valtype:ident, $reg:ident, [ $(,)? ]) => {};

    // Emit one field that documents named values.
    (@field $valtype:ident, $reg:ident, $(#[$attr:meta])* $field:ident, $offset:expr, $numbits:expr,
        [ $( $(#[$inner:meta])* $valname:ident = $value:expr ),+ $(,)? ]) => {
        $(#[$attr])*
        #[allow(non_upper_case_globals)]
        #[allow(unused)]
        pub const $field: $crate::fields::Field<$valtype, $reg> =
            $crate::fields::Field::<$valtype, $reg>::new($crate::bitmask!($numbits), $offset);

        #[allow(non_snake_case)]
        #[allow(unused)]
        pub mod $field {
            use super::$reg;
            use $crate::fields::FieldValue;

            $(
                $(#[$inner])*
                #[allow(non_upper_case_globals)]
                #[allow(unused)]
                pub const $valname: FieldValue<$valtype, $reg> =
                    FieldValue::<$valtype, $reg>::new($crate::bitmask!($numbits), $offset, $value);
            )+

            /// All bits of the field set.
            #[allow(non_upper_case_globals)]
            #[allow(unused)]
            pub const SET: FieldValue<$valtype, $reg> =
                FieldValue::<$valtype, $reg>::new(
                    $crate::bitmask!($numbits), $offset, $crate::bitmask!($numbits));

            /// All bits of the field cleared.
            #[allow(non_upper_case_globals)]
            #[allow(unused)]
            pub const CLEAR: FieldValue<$valtype, $reg> =
                FieldValue::<$valtype, $reg>::new($crate::bitmask!($numbits), $offset, 0);

            /// The values the silicon documents for this field.
            #[allow(dead_code)]
            #[allow(non_camel_case_types)]
            #[derive(Copy, Clone, Debug, Eq, PartialEq)]
            #[repr($valtype)]
            pub enum Value {
                $( $valname = $value, )+
            }

            impl $crate::fields::TryFromValue<$valtype> for Value {
                type EnumType = Value;

                fn try_from_value(v: $valtype) -> Option<Self::EnumType> {
                    $(
                        if v == $value {
                            return ::core::option::Option::Some(Value::$valname);
                        }
                    )+
                    ::core::option::Option::None
                }
            }
        }
    };

    // Emit one field without named values.
    (@field $valtype:ident, $reg:ident, $(#[$attr:meta])* $field:ident, $offset:expr, $numbits:expr, []) => {
        $(#[$attr])*
        #[allow(non_upper_case_globals)]
        #[allow(unused)]
        pub const $field: $crate::fields::Field<$valtype, $reg> =
            $crate::fields::Field::<$valtype, $reg>::new($crate::bitmask!($numbits), $offset);

        #[allow(non_snake_case)]
        #[allow(unused)]
        pub mod $field {
            use super::$reg;
            use $crate::fields::FieldValue;

            /// All bits of the field set.
            #[allow(non_upper_case_globals)]
            #[allow(unused)]
            pub const SET: FieldValue<$valtype, $reg> =
                FieldValue::<$valtype, $reg>::new(
                    $crate::bitmask!($numbits), $offset, $crate::bitmask!($numbits));

            /// All bits of the field cleared.
            #[allow(non_upper_case_globals)]
            #[allow(unused)]
            pub const CLEAR: FieldValue<$valtype, $reg> =
                FieldValue::<$valtype, $reg>::new($crate::bitmask!($numbits), $offset, 0);

            /// No values are documented for this field.
            #[allow(dead_code)]
            #[allow(non_camel_case_types)]
            #[derive(Copy, Clone, Debug, Eq, PartialEq)]
            pub enum Value {}

            impl $crate::fields::TryFromValue<$valtype> for Value {
                type EnumType = Value;

                fn try_from_value(_v: $valtype) -> Option<Self::EnumType> {
                    None
                }
            }
        }
    };
}

/// Define the memory layout of one or more register blocks.
///
/// ```rust
/// use dk6_registers::registers::{ReadOnly, ReadWrite};
/// use dk6_registers::register_structs;
///
/// register_structs! {
///     pub TimerRegisters {
///         (0x000 => ctrl: ReadWrite<u32>),
///         (0x004 => count: ReadOnly<u32>),
///         (0x008 => _reserved0),
///         (0x010 => compare: [ReadWrite<u32>; 4]),
///         (0x020 => @END),
///     }
/// }
/// ```
///
/// Every entry's offset is verified against the generated struct at
/// compile time, reserved entries become padding sized by the following
/// offset, and `@END` pins the total size of the block.
#[macro_export]
macro_rules! register_structs {
    {
        $( $(#[$attr:meta])* $vis:vis $name:ident { $($entries:tt)* } ),* $(,)?
    } => {
        $( $crate::register_struct_fields!(@munch ( $(#[$attr])* $vis $name ) {} {} $($entries)* ); )*
    };
}

/// For internal use by `register_structs!`.
#[doc(hidden)]
#[macro_export]
macro_rules! register_struct_fields {
    // Reserved padding: sized by the offset of the following entry, which
    // is pushed back for further munching.
    (@munch $header:tt { $($fields:tt)* } { $($asserts:tt)* }
        $(#[$attr:meta])* ($offset:expr => $pad:ident),
        $(#[$nattr:meta])* ($next:expr => $($ntok:tt)*)
        $(, $($rest:tt)*)?
    ) => {
        $crate::register_struct_fields!(@munch $header
            { $($fields)* ( $pad: [u8; $next - $offset] ) }
            { $($asserts)* ( $pad, $offset ) }
            $(#[$nattr])* ($next => $($ntok)*) $(, $($rest)*)?
        );
    };
    // End of the block: emit the struct and its layout checks.
    (@munch ( $(#[$attr:meta])* $vis:vis $name:ident )
        { $( ( $(#[$fattr:meta])* $field:ident: $ty:ty ) )* }
        { $( ( $aname:ident, $aoffset:expr ) )* }
        ($size:expr => @END) $(,)?
    ) => {
        $(#[$attr])*
        #[repr(C)]
        $vis struct $name {
            $( $(#[$fattr])* pub $field: $ty, )*
        }

        // The declared offsets and total size mirror fixed silicon; any
        // disagreement with the generated layout must fail the build.
        const _: () = {
            $( assert!(::core::mem::offset_of!($name, $aname) == $aoffset); )*
            assert!(::core::mem::size_of::<$name>() == $size);
        };
    };
    // An ordinary register (or register array, or nested block array).
    (@munch $header:tt { $($fields:tt)* } { $($asserts:tt)* }
        $(#[$attr:meta])* ($offset:expr => $field:ident: $ty:ty)
        $(, $($rest:tt)*)?
    ) => {
        $crate::register_struct_fields!(@munch $header
            { $($fields)* ( $(#[$attr])* $field: $ty ) }
            { $($asserts)* ( $field, $offset ) }
            $($($rest)*)?
        );
    };
}
