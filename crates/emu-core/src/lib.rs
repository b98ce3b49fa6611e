//! Core traits and types for instruction-level CPU emulation.
//!
//! A CPU core steps one instruction at a time against a [`Bus`]. The host
//! decides cadence and exit conditions; nothing in here loops on its own.

mod bus;
mod cpu;
mod observable;

pub use bus::{Bus, BusError};
pub use cpu::Cpu;
pub use observable::{Observable, Value};
