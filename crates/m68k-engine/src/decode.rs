//! Opcode decoding.
//!
//! Opcodes are matched against [`TABLE`], a list of (mask, value) patterns.
//! The bits covered by a mask are fixed; the bits outside it are operand
//! fields, pulled out uniformly by [`Operands::extract`]:
//!
//! ```text
//!  15  12 11   9 8           3 2   0
//! +------+------+-------------+------+
//! | .... | src  | ........... | dst  |    register pair
//! +------+------+------+------+------+
//! | .......... | disp8 (signed)      |    short branch
//! +------------+---------------------+
//! ```
//!
//! Adding an instruction means adding an entry here and a handler in
//! [`execute`](crate::execute). No two entries may match the same opcode.

use std::fmt;

use crate::execute::{self, Handler};

/// Operand fields common to every encoding.
///
/// All fields are extracted for every opcode; a handler reads the ones its
/// encoding defines.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Operands {
    /// Source register index, bits 9-11.
    pub src: usize,
    /// Destination register index, bits 0-2.
    pub dst: usize,
    /// Signed displacement, bits 0-7.
    pub disp8: i8,
}

impl Operands {
    #[must_use]
    pub const fn extract(opcode: u16) -> Self {
        Self {
            src: ((opcode >> 9) & 7) as usize,
            dst: (opcode & 7) as usize,
            disp8: opcode as u8 as i8,
        }
    }
}

/// How an entry's operands are rendered in disassembly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// No operands.
    Implied,
    /// `Ds,Dd`
    DataToData,
    /// `Ds,Ad`
    DataToAddr,
    /// Operands are baked into the encoding.
    Fixed(&'static str),
    /// Displacement lives in the extension word after the opcode.
    ExtensionWord,
    /// `*+$nn` / `*-$nn` relative to the opcode address.
    ByteDisplacement,
}

/// One row of the decode table.
#[derive(Debug)]
pub struct Entry {
    /// Bits that must equal `value`.
    pub mask: u16,
    pub value: u16,
    /// Assembler mnemonic including the size suffix.
    pub mnemonic: &'static str,
    pub syntax: Syntax,
    pub handler: Handler,
}

impl Entry {
    #[must_use]
    pub const fn matches(&self, opcode: u16) -> bool {
        opcode & self.mask == self.value
    }
}

/// Every instruction the engine understands.
pub static TABLE: &[Entry] = &[
    Entry {
        mask: 0xFFFF,
        value: 0x4E75,
        mnemonic: "RTS",
        syntax: Syntax::Implied,
        handler: execute::rts,
    },
    Entry {
        mask: 0xF1F8,
        value: 0x1080,
        mnemonic: "MOVE.B",
        syntax: Syntax::DataToData,
        handler: execute::move_byte,
    },
    Entry {
        mask: 0xF1F8,
        value: 0xD040,
        mnemonic: "ADD.L",
        syntax: Syntax::DataToData,
        handler: execute::add_long,
    },
    Entry {
        mask: 0xF1F8,
        value: 0x91E0,
        mnemonic: "SUB.W",
        syntax: Syntax::DataToAddr,
        handler: execute::sub_word,
    },
    Entry {
        mask: 0xFFFF,
        value: 0xB045,
        mnemonic: "CMP.B",
        syntax: Syntax::Fixed("D5,A2"),
        handler: execute::cmp_byte,
    },
    Entry {
        mask: 0xFFFF,
        value: 0x4EBA,
        mnemonic: "JMP",
        syntax: Syntax::Fixed("(A6)"),
        handler: execute::jmp,
    },
    Entry {
        mask: 0xFFFF,
        value: 0x6000,
        mnemonic: "BRA.W",
        syntax: Syntax::ExtensionWord,
        handler: execute::bra_word,
    },
    Entry {
        mask: 0xFF00,
        value: 0x1100,
        mnemonic: "BLE.S",
        syntax: Syntax::ByteDisplacement,
        handler: execute::ble_byte,
    },
];

/// A decoded opcode, ready to execute.
#[derive(Debug, Clone, Copy)]
pub struct Instruction {
    pub opcode: u16,
    pub operands: Operands,
    entry: &'static Entry,
}

impl Instruction {
    #[must_use]
    pub fn mnemonic(&self) -> &'static str {
        self.entry.mnemonic
    }

    #[must_use]
    pub fn handler(&self) -> Handler {
        self.entry.handler
    }
}

/// Look up an opcode in the decode table.
#[must_use]
pub fn decode(opcode: u16) -> Option<Instruction> {
    TABLE
        .iter()
        .find(|entry| entry.matches(opcode))
        .map(|entry| Instruction {
            opcode,
            operands: Operands::extract(opcode),
            entry,
        })
}

impl fmt::Display for Instruction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let ops = self.operands;
        let name = self.entry.mnemonic;
        match self.entry.syntax {
            Syntax::Implied | Syntax::ExtensionWord => write!(f, "{name}"),
            Syntax::DataToData => write!(f, "{name} D{},D{}", ops.src, ops.dst),
            Syntax::DataToAddr => write!(f, "{name} D{},A{}", ops.src, ops.dst),
            Syntax::Fixed(operands) => write!(f, "{name} {operands}"),
            Syntax::ByteDisplacement => {
                let sign = if ops.disp8 < 0 { '-' } else { '+' };
                write!(f, "{name} *{sign}${:02X}", ops.disp8.unsigned_abs())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_opcode_matches_two_entries() {
        for opcode in 0..=u16::MAX {
            let hits = TABLE.iter().filter(|e| e.matches(opcode)).count();
            assert!(hits <= 1, "opcode ${opcode:04X} matches {hits} entries");
        }
    }

    #[test]
    fn entry_values_lie_inside_their_masks() {
        for entry in TABLE {
            assert_eq!(entry.value & !entry.mask, 0, "{}", entry.mnemonic);
        }
    }

    #[test]
    fn source_encodings_decode() {
        let cases = [
            (0x4E75, "RTS"),
            (0x1081, "MOVE.B D0,D1"),
            (0xD442, "ADD.L D2,D2"),
            (0x91E7, "SUB.W D0,A7"),
            (0xB045, "CMP.B D5,A2"),
            (0x4EBA, "JMP (A6)"),
            (0x6000, "BRA.W"),
            (0x1111, "BLE.S *+$11"),
        ];
        for (opcode, text) in cases {
            let instr = decode(opcode).expect("known opcode");
            assert_eq!(instr.to_string(), text);
        }
    }

    #[test]
    fn register_fields() {
        let ops = Operands::extract(0x1E83);
        assert_eq!(ops.src, 7);
        assert_eq!(ops.dst, 3);
    }

    #[test]
    fn byte_displacement_is_sign_extended() {
        assert_eq!(Operands::extract(0x11FF).disp8, -1);
        assert_eq!(Operands::extract(0x1180).disp8, -128);
        assert_eq!(Operands::extract(0x117F).disp8, 127);
        assert_eq!(decode(0x11FE).expect("BLE").to_string(), "BLE.S *-$02");
    }

    #[test]
    fn unknown_opcodes_decode_to_none() {
        assert!(decode(0x0000).is_none());
        assert!(decode(0x4E71).is_none());
        assert!(decode(0x6001).is_none());
        assert!(decode(0xFFFF).is_none());
    }
}
