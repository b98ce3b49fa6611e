//! Observable implementation for the CPU.

use emu_core::{Observable, Value};

use crate::cpu::Cpu68k;
use crate::flags::Flag;

/// Query paths supported by the CPU.
const QUERY_PATHS: &[&str] = &[
    "d0", "d1", "d2", "d3", "d4", "d5", "d6", "d7",
    "a0", "a1", "a2", "a3", "a4", "a5", "a6", "a7",
    "sp", "pc",
    "ccr",
    "flags.n", "flags.z", "flags.v", "flags.c",
    "opcode", "executed",
];

impl Observable for Cpu68k {
    fn query(&self, path: &str) -> Option<Value> {
        let regs = &self.regs;
        if let Some(n) = register_index(path, 'd') {
            return Some(regs.d(n).into());
        }
        if let Some(n) = register_index(path, 'a') {
            return Some(regs.a(n).into());
        }
        match path {
            "sp" => Some(regs.sp().into()),
            "pc" => Some(regs.pc().into()),
            "ccr" => Some(regs.ccr.bits().into()),
            "flags.n" => Some(regs.ccr.get(Flag::Negative).into()),
            "flags.z" => Some(regs.ccr.get(Flag::Zero).into()),
            "flags.v" => Some(regs.ccr.get(Flag::Overflow).into()),
            "flags.c" => Some(regs.ccr.get(Flag::Carry).into()),
            "opcode" => Some(self.opcode().into()),
            "executed" => Some(self.executed().into()),
            _ => None,
        }
    }

    fn query_paths(&self) -> &'static [&'static str] {
        QUERY_PATHS
    }
}

/// `"d3"` -> `Some(3)` for prefix `'d'`.
fn register_index(path: &str, prefix: char) -> Option<usize> {
    let digit = path.strip_prefix(prefix)?;
    match digit.as_bytes() {
        [b @ b'0'..=b'7'] => Some(usize::from(b - b'0')),
        _ => None,
    }
}
