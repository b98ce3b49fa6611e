//! Engine configuration.
//!
//! Everything has a default, so a host can start from
//! [`EngineConfig::default`] or read a partial JSON document:
//!
//! ```json
//! { "memory_size": 1048576, "initial_pc": 4096 }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::memory::DEFAULT_MEMORY_SIZE;

/// Bytes reachable through a 32-bit address.
const ADDRESS_SPACE: u64 = 1 << 32;

/// Rejected configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid engine config: {0}")]
    Json(#[from] serde_json::Error),
    #[error("memory size must be non-zero")]
    EmptyMemory,
    #[error("memory size {size:#X} exceeds the 4 GiB address space")]
    MemoryTooLarge { size: usize },
    #[error("initial PC ${pc:08X} lies outside {size:#X} bytes of memory")]
    PcOutOfRange { pc: u32, size: usize },
}

/// Session parameters for one CPU and its memory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Memory size in bytes.
    pub memory_size: usize,
    /// PC after construction and reset.
    pub initial_pc: u32,
    /// A7 after construction and reset.
    pub initial_stack_pointer: u32,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            memory_size: DEFAULT_MEMORY_SIZE,
            initial_pc: 0,
            initial_stack_pointer: 0,
        }
    }
}

impl EngineConfig {
    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.memory_size == 0 {
            return Err(ConfigError::EmptyMemory);
        }
        if self.memory_size as u64 > ADDRESS_SPACE {
            return Err(ConfigError::MemoryTooLarge {
                size: self.memory_size,
            });
        }
        if self.initial_pc as usize >= self.memory_size {
            return Err(ConfigError::PcOutOfRange {
                pc: self.initial_pc,
                size: self.memory_size,
            });
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_gives_defaults() {
        let config = EngineConfig::from_json("{}").expect("valid");
        assert_eq!(config, EngineConfig::default());
        assert_eq!(config.memory_size, 640 * 1024);
    }

    #[test]
    fn partial_document_overrides_named_fields() {
        let config =
            EngineConfig::from_json(r#"{ "memory_size": 4096, "initial_stack_pointer": 4092 }"#)
                .expect("valid");
        assert_eq!(config.memory_size, 4096);
        assert_eq!(config.initial_stack_pointer, 4092);
        assert_eq!(config.initial_pc, 0);
    }

    #[test]
    fn zero_memory_is_rejected() {
        let err = EngineConfig::from_json(r#"{ "memory_size": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::EmptyMemory));
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn memory_filling_the_address_space_is_accepted() {
        let config = EngineConfig {
            memory_size: 0x1_0000_0000,
            ..EngineConfig::default()
        };
        assert!(config.validate().is_ok());
    }

    #[cfg(target_pointer_width = "64")]
    #[test]
    fn memory_past_the_address_space_is_rejected() {
        let err = EngineConfig::from_json(r#"{ "memory_size": 4294967297 }"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::MemoryTooLarge {
                size: 0x1_0000_0001
            }
        ));
    }

    #[test]
    fn pc_outside_memory_is_rejected() {
        let err =
            EngineConfig::from_json(r#"{ "memory_size": 16, "initial_pc": 16 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::PcOutOfRange { pc: 16, size: 16 }));
    }

    #[test]
    fn malformed_json_is_reported() {
        let err = EngineConfig::from_json("{ memory_size: }").unwrap_err();
        assert!(matches!(err, ConfigError::Json(_)));
    }
}
