//! Memory bus interface.
//!
//! Every access is bounds checked. Multi-byte accesses are big-endian and are
//! validated as a whole before the first byte moves, so a fault never leaves a
//! torn read or write behind.

use thiserror::Error;

/// A failed bus access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum BusError {
    /// An access touched an address at or past the end of the bus.
    #[error("out of bounds: {width}-byte access at ${address:08X} (bus size {size:#X})")]
    OutOfBounds {
        /// First address of the access.
        address: u32,
        /// Access width in bytes.
        width: u32,
        /// Size of the addressable space in bytes.
        size: usize,
    },
    /// An image did not fit in the bus at the requested offset.
    #[error("image too large: {len} bytes at offset {offset:#X} (bus size {size:#X})")]
    ImageTooLarge {
        /// Requested load offset.
        offset: u32,
        /// Image length in bytes.
        len: usize,
        /// Size of the addressable space in bytes.
        size: usize,
    },
}

/// Byte-addressable memory bus.
///
/// Implementors provide byte access and a bounds check; word and long
/// accessors are derived from them.
pub trait Bus {
    /// Size of the addressable space in bytes.
    fn size(&self) -> usize;

    /// Read a byte from the given address.
    fn read_byte(&mut self, address: u32) -> Result<u8, BusError>;

    /// Write a byte to the given address.
    fn write_byte(&mut self, address: u32, value: u8) -> Result<(), BusError>;

    /// Fail unless `width` bytes starting at `address` are all addressable.
    ///
    /// Accesses never wrap past `$FFFFFFFF`, whatever `size` reports.
    fn check(&self, address: u32, width: u32) -> Result<(), BusError> {
        let size = self.size();
        let end = u64::from(address) + u64::from(width);
        if width == 0 || end > size as u64 || end > 1 << 32 {
            return Err(BusError::OutOfBounds {
                address,
                width,
                size,
            });
        }
        Ok(())
    }

    /// Read a big-endian word.
    fn read_word(&mut self, address: u32) -> Result<u16, BusError> {
        self.check(address, 2)?;
        let hi = self.read_byte(address)?;
        let lo = self.read_byte(address + 1)?;
        Ok(u16::from(hi) << 8 | u16::from(lo))
    }

    /// Read a big-endian long (high word first).
    fn read_long(&mut self, address: u32) -> Result<u32, BusError> {
        self.check(address, 4)?;
        let hi = self.read_word(address)?;
        let lo = self.read_word(address + 2)?;
        Ok(u32::from(hi) << 16 | u32::from(lo))
    }

    /// Write a big-endian word.
    fn write_word(&mut self, address: u32, value: u16) -> Result<(), BusError> {
        self.check(address, 2)?;
        self.write_byte(address, (value >> 8) as u8)?;
        self.write_byte(address + 1, value as u8)
    }

    /// Write a big-endian long (high word first).
    fn write_long(&mut self, address: u32, value: u32) -> Result<(), BusError> {
        self.check(address, 4)?;
        self.write_word(address, (value >> 16) as u16)?;
        self.write_word(address + 2, value as u16)
    }
}
