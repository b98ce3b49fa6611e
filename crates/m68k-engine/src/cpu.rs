//! The single-step dispatcher.
//!
//! One call to [`Cpu68k::step`] is one transition:
//!
//! ```text
//! fetch word at PC -> look up in decode table -> run handler -> return
//! ```
//!
//! The engine never loops on its own. An opcode missing from the table is
//! reported as [`Step::UnknownOpcode`] and nothing else happens: PC stays on
//! it, so a host that keeps stepping sees the same report every time.

use emu_core::{Bus, Cpu};

use crate::config::EngineConfig;
use crate::decode::{self, Instruction};
use crate::error::StepError;
use crate::execute::Context;
use crate::registers::Registers;

/// What a successful step did.
#[derive(Debug, Clone, Copy)]
pub enum Step {
    /// The instruction at `address` ran.
    Executed {
        address: u32,
        instruction: Instruction,
    },
    /// No table entry matched. State is unchanged.
    UnknownOpcode { opcode: u16, address: u32 },
}

/// CPU state for one emulated processor.
///
/// Memory is not owned; it is passed to every [`step`](Cpu::step).
#[derive(Debug, Clone)]
pub struct Cpu68k {
    /// Register file, including PC and flags.
    pub regs: Registers,
    initial_pc: u32,
    initial_sp: u32,
    /// Last opcode word fetched.
    opcode: u16,
    /// Instructions executed since construction or reset.
    executed: u64,
}

impl Default for Cpu68k {
    fn default() -> Self {
        Self::new()
    }
}

impl Cpu68k {
    /// CPU with every register zero.
    #[must_use]
    pub fn new() -> Self {
        Self::with_entry(0, 0)
    }

    /// CPU that starts (and resets) to the configured PC and stack pointer.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::with_entry(config.initial_pc, config.initial_stack_pointer)
    }

    fn with_entry(pc: u32, sp: u32) -> Self {
        let mut regs = Registers::new();
        regs.set_pc(pc);
        regs.set_sp(sp);
        Self {
            regs,
            initial_pc: pc,
            initial_sp: sp,
            opcode: 0,
            executed: 0,
        }
    }

    /// Replace the whole register file, e.g. from a saved snapshot.
    pub fn restore(&mut self, regs: Registers) {
        self.regs = regs;
    }

    /// Last opcode word fetched, known or not.
    #[must_use]
    pub fn opcode(&self) -> u16 {
        self.opcode
    }

    /// Instructions executed since construction or reset.
    #[must_use]
    pub fn executed(&self) -> u64 {
        self.executed
    }
}

impl Cpu for Cpu68k {
    type Registers = Registers;
    type Outcome = Step;
    type Error = StepError;

    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Step, StepError> {
        let pc = self.regs.pc();
        let opcode = bus
            .read_word(pc)
            .map_err(|source| StepError::Fetch { pc, source })?;
        self.opcode = opcode;

        let Some(instruction) = decode::decode(opcode) else {
            log::warn!("unknown opcode ${opcode:04X} at ${pc:08X}");
            return Ok(Step::UnknownOpcode {
                opcode,
                address: pc,
            });
        };

        log::trace!("${pc:08X}  {instruction}");
        let mut ctx = Context {
            regs: &mut self.regs,
            bus,
        };
        (instruction.handler())(&mut ctx, instruction.operands)?;
        self.executed += 1;

        Ok(Step::Executed {
            address: pc,
            instruction,
        })
    }

    fn pc(&self) -> u32 {
        self.regs.pc()
    }

    fn registers(&self) -> Registers {
        self.regs
    }

    fn reset(&mut self) {
        log::debug!(
            "reset: PC=${:08X} SP=${:08X}",
            self.initial_pc,
            self.initial_sp
        );
        *self = Self::with_entry(self.initial_pc, self.initial_sp);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memory::Memory;

    #[test]
    fn from_config_seeds_pc_and_sp() {
        let config = EngineConfig {
            initial_pc: 0x100,
            initial_stack_pointer: 0x8000,
            ..EngineConfig::default()
        };
        let cpu = Cpu68k::from_config(&config);
        assert_eq!(cpu.pc(), 0x100);
        assert_eq!(cpu.regs.sp(), 0x8000);
    }

    #[test]
    fn reset_restores_entry_state() {
        let config = EngineConfig {
            initial_pc: 0x40,
            initial_stack_pointer: 0x200,
            ..EngineConfig::default()
        };
        let mut cpu = Cpu68k::from_config(&config);
        let mut mem = Memory::new(0x400);
        mem.load_image(&[0x4E, 0xBA], 0x40).expect("fits");
        cpu.regs.set_a(6, 0x80);
        cpu.regs.set_d(0, 0xFFFF);
        cpu.step(&mut mem).expect("step");
        assert_eq!(cpu.executed(), 1);

        cpu.reset();
        assert_eq!(cpu.pc(), 0x40);
        assert_eq!(cpu.regs.sp(), 0x200);
        assert_eq!(cpu.regs.d(0), 0);
        assert_eq!(cpu.regs.ccr.bits(), 0);
        assert_eq!(cpu.executed(), 0);
    }

    #[test]
    fn fetch_past_end_is_a_fetch_fault() {
        let mut cpu = Cpu68k::new();
        let mut mem = Memory::new(4);
        cpu.regs.set_pc(3);
        let err = cpu.step(&mut mem).unwrap_err();
        assert!(matches!(err, StepError::Fetch { pc: 3, .. }));
        assert_eq!(cpu.pc(), 3);
    }

    #[test]
    fn handler_fault_is_a_bus_fault() {
        // BRA.W with its displacement word cut off by the end of memory.
        let mut cpu = Cpu68k::new();
        let mut mem = Memory::new(2);
        mem.load_image(&[0x60, 0x00], 0).expect("fits");
        let err = cpu.step(&mut mem).unwrap_err();
        assert!(matches!(err, StepError::Bus(_)));
        assert_eq!(cpu.pc(), 0);
        assert_eq!(cpu.executed(), 0);
    }
}
