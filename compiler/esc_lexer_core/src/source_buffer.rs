//! Sentinel-terminated source buffer for zero-bounds-check scanning.
//!
//! The buffer guarantees a `0x00` sentinel byte after the source content,
//! allowing the scanners to detect EOF without explicit bounds checking.
//! A fixed lookahead margin of zero bytes follows the sentinel, so
//! multi-byte operator and delimiter reads near the end of input never
//! read out of bounds.

use crate::Cursor;

/// Zero bytes guaranteed after the sentinel.
///
/// The longest fixed read is a four-byte operator (`>>>=`); delimiter
/// checks go through [`Cursor::starts_with`], which bounds-checks.
const LOOKAHEAD: usize = 8;

/// Round buffer sizes up to this many bytes.
const ALIGN: usize = 64;

/// Longest source the scanners address: offsets are `u32`.
pub const MAX_SOURCE_LEN: usize = u32::MAX as usize;

/// Sentinel-terminated copy of a source string.
///
/// # Layout
///
/// ```text
/// [source_bytes..., 0x00, padding_zeros...]
///  ^                ^     ^
///  0                |     at least LOOKAHEAD zeros, rounded up to 64 bytes
///              source_len (sentinel)
/// ```
///
/// The original `&str` is kept alongside so the cursor can hand out string
/// slices without re-validating UTF-8.
#[derive(Clone, Debug)]
pub struct SourceBuffer<'src> {
    source: &'src str,
    /// Owned buffer: `[source_bytes..., 0x00 sentinel, 0x00 padding...]`.
    buf: Vec<u8>,
    /// Length of the source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'src> SourceBuffer<'src> {
    /// Create a new sentinel-terminated buffer from source text.
    ///
    /// Only the first [`MAX_SOURCE_LEN`] bytes are scanned. Callers reject
    /// longer text before building a buffer.
    pub fn new(source: &'src str) -> Self {
        debug_assert!(
            source.len() <= MAX_SOURCE_LEN,
            "source of {} bytes exceeds MAX_SOURCE_LEN",
            source.len()
        );
        let content_len = source.len().min(MAX_SOURCE_LEN);
        #[allow(
            clippy::cast_possible_truncation,
            reason = "content_len is clamped to MAX_SOURCE_LEN == u32::MAX"
        )]
        let source_len = content_len as u32;

        let padded_len = (content_len + 1 + LOOKAHEAD + ALIGN - 1) & !(ALIGN - 1);
        let mut buf = vec![0u8; padded_len];
        buf[..content_len].copy_from_slice(&source.as_bytes()[..content_len]);

        SourceBuffer {
            source,
            buf,
            source_len,
        }
    }

    /// Create a [`Cursor`] positioned at byte 0.
    pub fn cursor(&self) -> Cursor<'_> {
        Cursor::new(&self.buf, self.source, self.source_len)
    }
}
