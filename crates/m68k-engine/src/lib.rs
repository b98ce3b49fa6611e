//! Instruction execution engine for a 68000-style big-endian CPU.
//!
//! The engine steps exactly one instruction per call to [`Cpu::step`] on a
//! [`Cpu68k`]: fetch a 16-bit opcode at PC, match it
//! against the decode table, run the handler. Unknown opcodes are reported
//! and leave every register, flag and the PC untouched.
//!
//! Only a small proof-of-concept instruction set is decoded; new
//! instructions are added as entries in [`decode::TABLE`].

pub mod config;
pub mod cpu;
pub mod decode;
pub mod error;
pub mod execute;
pub mod flags;
pub mod memory;
mod observable;
pub mod registers;

pub use config::{ConfigError, EngineConfig};
pub use cpu::{Cpu68k, Step};
pub use decode::{Instruction, Operands};
pub use emu_core::{Bus, BusError, Cpu, Observable, Value};
pub use error::StepError;
pub use flags::{Condition, ConditionCodes, Flag};
pub use memory::{Memory, DEFAULT_MEMORY_SIZE};
pub use registers::Registers;
