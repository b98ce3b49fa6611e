//! Step failures.

use emu_core::BusError;
use thiserror::Error;

/// A fatal fault raised while executing one step.
///
/// Registers and flags are left as they were after the last successful
/// mutation; handlers finish every read before they write anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum StepError {
    /// The opcode word at PC could not be fetched.
    #[error("opcode fetch at ${pc:08X} failed")]
    Fetch {
        pc: u32,
        #[source]
        source: BusError,
    },
    /// A handler faulted reading or writing an operand.
    #[error(transparent)]
    Bus(#[from] BusError),
}
