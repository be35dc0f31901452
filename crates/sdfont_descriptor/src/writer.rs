//! Little-endian binary writer
//!
//! A small append-only writer over an owned buffer. The descriptor layout
//! is enumerated once in [`crate::Descriptor::encode`]; call sites never
//! hand-assemble field bytes.

/// Append-only little-endian field writer
#[derive(Debug, Default)]
pub struct DescriptorWriter {
    buf: Vec<u8>,
}

impl DescriptorWriter {
    /// Create an empty writer
    pub fn new() -> Self {
        Self::default()
    }

    /// Append an unsigned 32-bit field
    pub fn put_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Append a 32-bit float field
    pub fn put_f32(&mut self, value: f32) {
        self.buf.extend_from_slice(&value.to_le_bytes());
    }

    /// Bytes written so far
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Whether nothing has been written
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Consume the writer, returning the encoded bytes
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }
}
