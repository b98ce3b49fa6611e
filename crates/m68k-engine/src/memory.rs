//! Flat byte-addressable RAM.
//!
//! A single contiguous buffer covering `[0, size)`. There is no address
//! decoding, mirroring or open-bus behaviour: any access past the end is an
//! [`BusError::OutOfBounds`] fault.

use emu_core::{Bus, BusError};

use crate::config::EngineConfig;

/// Default memory size: 640K.
pub const DEFAULT_MEMORY_SIZE: usize = 640 * 1024;

/// Emulated RAM.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Memory {
    data: Box<[u8]>,
}

impl Default for Memory {
    fn default() -> Self {
        Self::new(DEFAULT_MEMORY_SIZE)
    }
}

impl Memory {
    /// Create zero-filled memory of `size` bytes.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            data: vec![0; size].into_boxed_slice(),
        }
    }

    /// Create memory sized by the configuration.
    #[must_use]
    pub fn from_config(config: &EngineConfig) -> Self {
        Self::new(config.memory_size)
    }

    /// Size in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for zero-sized memory.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Copy `image` into memory starting at `offset`.
    ///
    /// Nothing is copied unless the whole image fits.
    pub fn load_image(&mut self, image: &[u8], offset: u32) -> Result<(), BusError> {
        let start = offset as usize;
        let end = start
            .checked_add(image.len())
            .filter(|&end| end <= self.data.len())
            .ok_or(BusError::ImageTooLarge {
                offset,
                len: image.len(),
                size: self.data.len(),
            })?;
        self.data[start..end].copy_from_slice(image);
        log::debug!(
            "loaded {} byte image at ${offset:08X}-${:08X}",
            image.len(),
            end.saturating_sub(1)
        );
        Ok(())
    }

    /// Borrow `len` bytes starting at `address`, e.g. a video buffer for an
    /// external renderer.
    pub fn region(&self, address: u32, len: usize) -> Result<&[u8], BusError> {
        let start = address as usize;
        start
            .checked_add(len)
            .filter(|&end| end <= self.data.len())
            .map(|end| &self.data[start..end])
            .ok_or(BusError::OutOfBounds {
                address,
                width: u32::try_from(len).unwrap_or(u32::MAX),
                size: self.data.len(),
            })
    }
}

impl Bus for Memory {
    fn size(&self) -> usize {
        self.data.len()
    }

    fn read_byte(&mut self, address: u32) -> Result<u8, BusError> {
        self.check(address, 1)?;
        Ok(self.data[address as usize])
    }

    fn write_byte(&mut self, address: u32, value: u8) -> Result<(), BusError> {
        self.check(address, 1)?;
        self.data[address as usize] = value;
        Ok(())
    }
}
