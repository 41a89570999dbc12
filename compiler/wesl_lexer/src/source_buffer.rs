//! Sentinel-terminated source buffer.
//!
//! The buffer appends a `0x00` sentinel after the source content so the
//! scanner can dispatch on the current byte without a bounds check. The total
//! size is rounded up to the next 64-byte boundary, which also keeps `peek()`
//! and `peek2()` in bounds near the end of the source.

use crate::Cursor;

/// Padding granularity in bytes.
const CACHE_LINE: usize = 64;

/// Owned copy of a module's source with a zero sentinel.
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0           source_len rounded up to 64 bytes
/// ```
#[derive(Clone, Debug)]
pub struct SourceBuffer {
    buf: Vec<u8>,
    source_len: u32,
}

impl SourceBuffer {
    /// Copy `source` into a padded, sentinel-terminated buffer.
    ///
    /// Sources longer than `u32::MAX` bytes are truncated; spans are 32-bit.
    pub fn new(source: &str) -> Self {
        let bytes = source.as_bytes();
        let len = bytes.len().min(u32::MAX as usize - CACHE_LINE);
        let padded = (len + 1).div_ceil(CACHE_LINE) * CACHE_LINE;

        let mut buf = Vec::with_capacity(padded);
        buf.extend_from_slice(&bytes[..len]);
        buf.resize(padded, 0);

        SourceBuffer {
            buf,
            source_len: u32::try_from(len).unwrap_or(u32::MAX),
        }
    }

    /// A cursor positioned at the start of the source.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source_len)
    }

    /// Source bytes without sentinel or padding.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf[..self.source_len as usize]
    }

    /// Length of the source content in bytes.
    pub fn len(&self) -> u32 {
        self.source_len
    }

    pub fn is_empty(&self) -> bool {
        self.source_len == 0
    }
}

#[cfg(test)]
mod tests;
