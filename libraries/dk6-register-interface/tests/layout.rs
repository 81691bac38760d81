// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2025.

//! Register block layout: offsets, padding, arrays, nested blocks.

use core::mem::{offset_of, size_of};

use dk6_registers::interfaces::{Readable, Writeable};
use dk6_registers::register_structs;
use dk6_registers::registers::{Aliased, ReadOnly, ReadWrite, WriteOnly};

register_structs! {
    pub ExampleRegisters {
        (0x000 => ctrl: ReadWrite<u32>),
        (0x004 => stat: ReadOnly<u32>),
        (0x008 => _reserved0),
        (0x010 => data: [ReadWrite<u32>; 4]),
        (0x020 => cmd: WriteOnly<u32>),
        (0x024 => intstat: Aliased<u32>),
        (0x028 => bytes: [ReadWrite<u8>; 8]),
        (0x030 => _reserved1),
        (0x100 => tail: ReadWrite<u32>),
        (0x104 => @END),
    },
    pub SubBlock {
        (0x000 => cfg: ReadWrite<u32>),
        (0x004 => xfer: ReadWrite<u32>),
        (0x008 => _reserved0),
        (0x010 => @END),
    },
    pub BlockArrayRegisters {
        (0x000 => global: ReadWrite<u32>),
        (0x004 => _reserved0),
        (0x040 => channel: [SubBlock; 3]),
        (0x070 => @END),
    }
}

#[test]
fn declared_offsets_are_reproduced() {
    assert_eq!(offset_of!(ExampleRegisters, ctrl), 0x000);
    assert_eq!(offset_of!(ExampleRegisters, stat), 0x004);
    assert_eq!(offset_of!(ExampleRegisters, data), 0x010);
    assert_eq!(offset_of!(ExampleRegisters, cmd), 0x020);
    assert_eq!(offset_of!(ExampleRegisters, intstat), 0x024);
    assert_eq!(offset_of!(ExampleRegisters, bytes), 0x028);
    assert_eq!(offset_of!(ExampleRegisters, tail), 0x100);
    assert_eq!(size_of::<ExampleRegisters>(), 0x104);
}

#[test]
fn repeated_block_stride_matches_layout() {
    assert_eq!(size_of::<SubBlock>(), 0x10);
    assert_eq!(offset_of!(BlockArrayRegisters, channel), 0x040);
    // Element i of the nested array sits at 0x040 + i * stride.
    assert_eq!(size_of::<BlockArrayRegisters>(), 0x070);
    assert_eq!(
        offset_of!(BlockArrayRegisters, channel) + 2 * size_of::<SubBlock>()
            + offset_of!(SubBlock, xfer),
        0x064
    );
}

#[test]
fn register_cells_are_word_transparent() {
    assert_eq!(size_of::<ReadWrite<u32>>(), size_of::<u32>());
    assert_eq!(size_of::<ReadOnly<u32>>(), size_of::<u32>());
    assert_eq!(size_of::<WriteOnly<u16>>(), size_of::<u16>());
    assert_eq!(size_of::<Aliased<u8>>(), size_of::<u8>());
}

#[test]
fn padding_is_skipped_not_addressed() {
    // The pad between `stat` and `data` exists purely to push `data` to
    // its documented offset.
    assert_eq!(offset_of!(ExampleRegisters, _reserved0), 0x008);
    assert_eq!(offset_of!(ExampleRegisters, data) - offset_of!(ExampleRegisters, _reserved0), 8);
}

#[test]
fn block_in_plain_memory_reads_back_writes() {
    let regs: ExampleRegisters = unsafe { core::mem::zeroed() };
    regs.ctrl.set(0xdead_beef);
    assert_eq!(regs.ctrl.get(), 0xdead_beef);
    regs.data[2].set(7);
    assert_eq!(regs.data[2].get(), 7);
    assert_eq!(regs.data[1].get(), 0);
    regs.bytes[5].set(0xa5);
    assert_eq!(regs.bytes[5].get(), 0xa5);
    // An `Aliased` register reads and writes the same word through two
    // different long names.
    regs.intstat.set(0b100);
    assert_eq!(regs.intstat.get(), 0b100);
}
