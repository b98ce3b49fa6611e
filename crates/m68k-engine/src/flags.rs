//! Condition code register.
//!
//! 16 bits wide, of which four are defined (68000 CCR layout):
//! - C (bit 0): Carry
//! - V (bit 1): Overflow
//! - Z (bit 2): Zero
//! - N (bit 3): Negative
//!
//! Extend is not modelled. Flags are addressed by bit index only; a mask is
//! always derived as `1 << bit`.

use serde::{Deserialize, Serialize};

/// One condition code flag, valued by its bit index.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flag {
    Carry = 0,
    Overflow = 1,
    Zero = 2,
    Negative = 3,
}

impl Flag {
    /// All defined flags, lowest bit first.
    pub const ALL: [Flag; 4] = [Flag::Carry, Flag::Overflow, Flag::Zero, Flag::Negative];

    /// Bit index within the register.
    #[must_use]
    pub const fn bit(self) -> u16 {
        self as u16
    }

    /// Single-letter name used in register dumps.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Flag::Carry => 'C',
            Flag::Overflow => 'V',
            Flag::Zero => 'Z',
            Flag::Negative => 'N',
        }
    }
}

/// Condition code register.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConditionCodes(u16);

impl ConditionCodes {
    /// All flags clear.
    #[must_use]
    pub const fn new() -> Self {
        Self(0)
    }

    /// Wrap a raw register value. Undefined bits are kept as-is.
    #[must_use]
    pub const fn from_bits(bits: u16) -> Self {
        Self(bits)
    }

    /// Raw register value.
    #[must_use]
    pub const fn bits(self) -> u16 {
        self.0
    }

    #[must_use]
    pub const fn get(self, flag: Flag) -> bool {
        self.0 & (1 << flag.bit()) != 0
    }

    /// Set a flag if `on` is true, clear it otherwise.
    pub fn set(&mut self, flag: Flag, on: bool) {
        if on {
            self.0 |= 1 << flag.bit();
        } else {
            self.0 &= !(1 << flag.bit());
        }
    }

    /// Define all four flags at once.
    ///
    /// Handlers that own the full flag set go through here so nothing from a
    /// previous instruction survives.
    pub fn set_from(&mut self, zero: bool, negative: bool, carry: bool, overflow: bool) {
        self.set(Flag::Zero, zero);
        self.set(Flag::Negative, negative);
        self.set(Flag::Carry, carry);
        self.set(Flag::Overflow, overflow);
    }

    /// Flags for a data move of a byte: Z and N from the value, V and C clear.
    pub fn set_move_byte(&mut self, value: u8) {
        self.set_from(value == 0, value & 0x80 != 0, false, false);
    }

    /// Evaluate a branch condition against the current flags.
    #[must_use]
    pub const fn condition(self, cc: Condition) -> bool {
        let c = self.get(Flag::Carry);
        let v = self.get(Flag::Overflow);
        let z = self.get(Flag::Zero);
        let n = self.get(Flag::Negative);
        match cc {
            Condition::True => true,
            Condition::False => false,
            Condition::Hi => !c && !z,
            Condition::Ls => c || z,
            Condition::Cc => !c,
            Condition::Cs => c,
            Condition::Ne => !z,
            Condition::Eq => z,
            Condition::Vc => !v,
            Condition::Vs => v,
            Condition::Pl => !n,
            Condition::Mi => n,
            Condition::Ge => n == v,
            Condition::Lt => n != v,
            Condition::Gt => !z && n == v,
            Condition::Le => z || n != v,
        }
    }
}

impl std::fmt::Display for ConditionCodes {
    /// `NZVC` order, dash for a clear flag.
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for flag in Flag::ALL.iter().rev() {
            let ch = if self.get(*flag) { flag.letter() } else { '-' };
            write!(f, "{ch}")?;
        }
        Ok(())
    }
}

/// The sixteen 68000 branch conditions, in encoding order.
///
/// Only `Le` is reached from the decode table today.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Condition {
    True,
    False,
    Hi,
    Ls,
    Cc,
    Cs,
    Ne,
    Eq,
    Vc,
    Vs,
    Pl,
    Mi,
    Ge,
    Lt,
    Gt,
    Le,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flag_bits_follow_ccr_layout() {
        let mut ccr = ConditionCodes::new();
        ccr.set(Flag::Carry, true);
        assert_eq!(ccr.bits(), 0b0001);
        ccr.set(Flag::Overflow, true);
        assert_eq!(ccr.bits(), 0b0011);
        ccr.set(Flag::Zero, true);
        assert_eq!(ccr.bits(), 0b0111);
        ccr.set(Flag::Negative, true);
        assert_eq!(ccr.bits(), 0b1111);
        ccr.set(Flag::Overflow, false);
        assert_eq!(ccr.bits(), 0b1101);
    }

    #[test]
    fn set_from_overwrites_every_flag() {
        let mut ccr = ConditionCodes::from_bits(0b1111);
        ccr.set_from(false, false, false, false);
        assert_eq!(ccr.bits(), 0);

        ccr.set_from(true, false, true, false);
        assert!(ccr.get(Flag::Zero));
        assert!(ccr.get(Flag::Carry));
        assert!(!ccr.get(Flag::Negative));
        assert!(!ccr.get(Flag::Overflow));
    }

    #[test]
    fn set_from_keeps_undefined_bits() {
        let mut ccr = ConditionCodes::from_bits(0x8000);
        ccr.set_from(true, true, true, true);
        assert_eq!(ccr.bits(), 0x800F);
    }

    #[test]
    fn move_byte_flags() {
        let mut ccr = ConditionCodes::from_bits(0b0011);
        ccr.set_move_byte(0xAB);
        assert!(ccr.get(Flag::Negative));
        assert!(!ccr.get(Flag::Zero));
        assert!(!ccr.get(Flag::Carry));
        assert!(!ccr.get(Flag::Overflow));

        ccr.set_move_byte(0);
        assert!(ccr.get(Flag::Zero));
        assert!(!ccr.get(Flag::Negative));
    }

    #[test]
    fn less_or_equal_condition() {
        let le = |z, n, v| {
            let mut ccr = ConditionCodes::new();
            ccr.set_from(z, n, false, v);
            ccr.condition(Condition::Le)
        };
        assert!(!le(false, false, false));
        assert!(le(true, false, false));
        assert!(le(false, true, false));
        assert!(le(false, false, true));
        assert!(!le(false, true, true));
        assert!(le(true, true, true));
    }

    #[test]
    fn display_lists_nzvc() {
        let mut ccr = ConditionCodes::new();
        ccr.set(Flag::Negative, true);
        ccr.set(Flag::Carry, true);
        assert_eq!(ccr.to_string(), "N--C");
    }
}
