//! Bounds-checked read cursor over a flat byte buffer.

use crate::errors::EnvelopeParseError;

/// Read cursor over a borrowed byte slice.
///
/// Each decode call owns its own cursor, so independent decodes never see
/// each other's offsets. The offset only moves on a successful read; a
/// failed read leaves the cursor where it was.
#[derive(Debug)]
pub struct ByteCursor<'b> {
    buf: &'b [u8],
    at: usize,
}

impl<'b> ByteCursor<'b> {
    /// Constructs a cursor at the beginning of the buffer.
    pub fn new(buf: &'b [u8]) -> Self {
        Self { buf, at: 0 }
    }

    /// Constructs a cursor positioned at `at`, failing if that lies past
    /// the end of the buffer.
    pub fn starting_at(buf: &'b [u8], at: usize) -> Result<Self, EnvelopeParseError> {
        if at > buf.len() {
            return Err(EnvelopeParseError::OutOfBounds { at, need: 0 });
        }

        Ok(Self { buf, at })
    }

    /// Returns the current read offset.
    pub fn position(&self) -> usize {
        self.at
    }

    /// Returns the length of the underlying buffer.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// Returns if the underlying buffer is empty.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Returns the number of bytes that can still be read.
    pub fn remaining(&self) -> usize {
        self.len() - self.at
    }

    /// Reads the next `n` bytes and advances the cursor past them.
    ///
    /// The returned slice borrows from the underlying buffer, not from the
    /// cursor.
    pub fn read(&mut self, n: usize) -> Result<&'b [u8], EnvelopeParseError> {
        if n > self.remaining() {
            return Err(EnvelopeParseError::OutOfBounds {
                at: self.at,
                need: n,
            });
        }

        let out = &self.buf[self.at..self.at + n];
        self.at += n;
        Ok(out)
    }

    /// Reads a single byte.
    pub fn read_byte(&mut self) -> Result<u8, EnvelopeParseError> {
        Ok(self.read(1)?[0])
    }

    /// Reads a fixed-size array.
    pub fn read_arr<const N: usize>(&mut self) -> Result<[u8; N], EnvelopeParseError> {
        let mut arr = [0; N];
        arr.copy_from_slice(self.read(N)?);
        Ok(arr)
    }
}
