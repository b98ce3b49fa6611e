//! CPU register file.
//!
//! - D0-D7: 8 data registers (32-bit)
//! - A0-A7: 8 address registers (32-bit, A7 is the stack pointer)
//! - PC: Program counter (32-bit), kept outside the address registers
//! - CCR: Condition code register
//!
//! All arithmetic on register values wraps modulo 2^32.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::flags::ConditionCodes;

/// Index of the address register used as the stack pointer.
pub const SP: usize = 7;

/// CPU register set.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Registers {
    /// Data registers D0-D7.
    pub d: [u32; 8],
    /// Address registers A0-A7.
    pub a: [u32; 8],
    /// Program counter.
    pub pc: u32,
    /// Condition code register.
    pub ccr: ConditionCodes,
}

impl Registers {
    /// All registers zero, all flags clear.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            d: [0; 8],
            a: [0; 8],
            pc: 0,
            ccr: ConditionCodes::new(),
        }
    }

    /// Get data register by index (0-7).
    #[must_use]
    pub fn d(&self, n: usize) -> u32 {
        debug_assert!(n < 8);
        self.d[n]
    }

    /// Set data register by index (0-7).
    pub fn set_d(&mut self, n: usize, value: u32) {
        debug_assert!(n < 8);
        self.d[n] = value;
    }

    /// Replace the low byte of a data register, keeping bits 8-31.
    pub fn set_d_byte(&mut self, n: usize, value: u8) {
        let reg = self.d(n);
        self.set_d(n, (reg & 0xFFFF_FF00) | u32::from(value));
    }

    /// Get address register by index (0-7).
    #[must_use]
    pub fn a(&self, n: usize) -> u32 {
        debug_assert!(n < 8);
        self.a[n]
    }

    /// Set address register by index (0-7).
    pub fn set_a(&mut self, n: usize, value: u32) {
        debug_assert!(n < 8);
        self.a[n] = value;
    }

    /// Stack pointer (A7).
    #[must_use]
    pub const fn sp(&self) -> u32 {
        self.a[SP]
    }

    pub fn set_sp(&mut self, value: u32) {
        self.a[SP] = value;
    }

    #[must_use]
    pub const fn pc(&self) -> u32 {
        self.pc
    }

    pub fn set_pc(&mut self, value: u32) {
        self.pc = value;
    }

    /// Add a signed offset to PC, wrapping modulo 2^32.
    pub fn advance_pc(&mut self, delta: i32) {
        self.pc = self.pc.wrapping_add_signed(delta);
    }
}

impl fmt::Display for Registers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, d) in self.d.iter().enumerate() {
            let sep = if i % 4 == 3 { '\n' } else { ' ' };
            write!(f, "D{i}={d:08X}{sep}")?;
        }
        for (i, a) in self.a.iter().enumerate() {
            let sep = if i % 4 == 3 { '\n' } else { ' ' };
            write!(f, "A{i}={a:08X}{sep}")?;
        }
        write!(f, "PC={:08X} CCR={}", self.pc, self.ccr)
    }
}
