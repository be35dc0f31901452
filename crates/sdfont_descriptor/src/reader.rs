//! Little-endian binary reader
//!
//! Cursor over descriptor bytes, mirroring [`crate::DescriptorWriter`].

use crate::{DescriptorError, Result};

/// Consuming little-endian field reader
#[derive(Debug)]
pub struct DescriptorReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> DescriptorReader<'a> {
    /// Create a reader over descriptor bytes
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let end = self.pos.checked_add(len).ok_or(DescriptorError::UnexpectedEof)?;
        if end > self.data.len() {
            return Err(DescriptorError::UnexpectedEof);
        }
        let bytes = &self.data[self.pos..end];
        self.pos = end;
        Ok(bytes)
    }

    /// Read an unsigned 32-bit field
    pub fn take_u32(&mut self) -> Result<u32> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a 32-bit float field
    pub fn take_f32(&mut self) -> Result<f32> {
        let bytes = self.take(4)?;
        Ok(f32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Bytes not yet consumed
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// Whether all bytes were consumed
    pub fn is_exhausted(&self) -> bool {
        self.remaining() == 0
    }
}
