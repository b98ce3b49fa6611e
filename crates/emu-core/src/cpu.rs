//! CPU core trait.

use crate::Bus;

/// A CPU core.
///
/// CPUs execute instructions and access memory through a bus. The bus is
/// passed in, not owned, so a host can share it with other components
/// (e.g. a renderer reading video memory between steps).
///
/// CPUs expose their internal state for observation and debugging.
pub trait Cpu {
    /// The type used for register inspection.
    type Registers;

    /// What a successful step reports back to the host.
    type Outcome;

    /// Fatal fault raised by a step.
    type Error;

    /// Fetch, decode and execute exactly one instruction.
    ///
    /// The driving loop owns stepping cadence; there is no run-to-completion
    /// counterpart.
    fn step<B: Bus>(&mut self, bus: &mut B) -> Result<Self::Outcome, Self::Error>;

    /// Returns the current program counter.
    fn pc(&self) -> u32;

    /// Returns a snapshot of all registers for inspection.
    fn registers(&self) -> Self::Registers;

    /// Reset the CPU to its initial state.
    fn reset(&mut self);
}
