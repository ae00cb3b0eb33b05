//! Copyable cursor over a sentinel-terminated buffer.
//!
//! The cursor advances through the buffer byte-by-byte. EOF is detected
//! when the current byte equals the sentinel (`0x00`) and the position
//! has reached the source length.
//!
//! # Interior Null Bytes
//!
//! Template files may contain stray NUL bytes. A null at `pos < source_len`
//! is ordinary content; a null at `pos >= source_len` is the sentinel.

/// Copyable cursor over a sentinel-terminated byte buffer.
///
/// Created via [`SourceBuffer::cursor()`](crate::SourceBuffer::cursor).
/// Being [`Copy`], a cursor doubles as a cheap checkpoint.
///
/// # Invariant
///
/// `buf[source_len]` is `0x00` and is followed by zero padding, which is
/// guaranteed by [`SourceBuffer`](crate::SourceBuffer) construction.
/// The position only ever moves forward.
#[derive(Clone, Copy, Debug)]
pub struct Cursor<'a> {
    /// Sentinel-terminated buffer (source + sentinel + padding).
    buf: &'a [u8],
    /// The same bytes as `&str`, for slicing.
    source: &'a str,
    /// Current read position (byte index into `buf`).
    pos: u32,
    /// Length of actual source content (excludes sentinel and padding).
    source_len: u32,
}

impl<'a> Cursor<'a> {
    pub(crate) fn new(buf: &'a [u8], source: &'a str, source_len: u32) -> Self {
        debug_assert!(
            (source_len as usize) < buf.len(),
            "sentinel must be within buffer bounds"
        );
        debug_assert!(buf[source_len as usize] == 0, "sentinel byte must be 0x00");
        Self {
            buf,
            source,
            pos: 0,
            source_len,
        }
    }

    /// Returns the byte at the current position (`0x00` at EOF).
    #[inline]
    pub fn current(&self) -> u8 {
        self.buf[self.pos as usize]
    }

    /// Returns the byte one position ahead of current.
    #[inline]
    pub fn peek(&self) -> u8 {
        self.buf[self.pos as usize + 1]
    }

    /// Returns the `n` bytes starting at the current position.
    ///
    /// Bytes past the end of the source read as `0x00`. `n` must not
    /// exceed the lookahead margin of the source buffer (8 bytes).
    #[inline]
    pub fn window(&self, n: usize) -> &'a [u8] {
        let start = self.pos as usize;
        &self.buf[start..start + n]
    }

    /// Returns `true` if the source continues with `needle` at the current
    /// position. Never matches past the end of the source.
    #[inline]
    pub fn starts_with(&self, needle: &[u8]) -> bool {
        let start = self.pos as usize;
        let end = start + needle.len();
        end <= self.source_len as usize && &self.buf[start..end] == needle
    }

    /// ASCII case-insensitive [`Cursor::starts_with`], for markup keywords
    /// such as `<!DOCTYPE` and `</script`.
    #[inline]
    pub fn starts_with_ignore_case(&self, needle: &[u8]) -> bool {
        let start = self.pos as usize;
        let end = start + needle.len();
        end <= self.source_len as usize && self.buf[start..end].eq_ignore_ascii_case(needle)
    }

    /// Advance the cursor by one byte.
    #[inline]
    pub fn advance(&mut self) {
        self.pos += 1;
    }

    /// Advance the cursor by `n` bytes.
    #[inline]
    pub fn advance_n(&mut self, n: u32) {
        self.pos += n;
    }

    /// Move the cursor forward to `pos`. Moving backwards is a logic error.
    #[inline]
    pub fn seek(&mut self, pos: u32) {
        debug_assert!(pos >= self.pos, "cursor never rewinds ({pos} < {})", self.pos);
        self.pos = pos.min(self.source_len);
    }

    /// Returns `true` if the cursor has reached EOF.
    #[inline]
    pub fn is_eof(&self) -> bool {
        self.pos >= self.source_len
    }

    /// Current byte offset in the source.
    #[inline]
    pub fn pos(&self) -> u32 {
        self.pos
    }

    /// Extract a source substring.
    ///
    /// # Contract
    ///
    /// `start..end` must lie within the source and on character boundaries.
    /// The scanners only stop on ASCII bytes or after whole characters, so
    /// positions they report always qualify.
    pub fn slice(&self, start: u32, end: u32) -> &'a str {
        debug_assert!(
            end <= self.source_len,
            "slice end {end} exceeds source length {}",
            self.source_len
        );
        debug_assert!(start <= end, "slice start {start} exceeds end {end}");
        &self.source[start as usize..end as usize]
    }

    /// Extract a source substring from `start` to the current position.
    pub fn slice_from(&self, start: u32) -> &'a str {
        self.slice(start, self.pos)
    }

    /// Advance while `pred` returns `true` for the current byte.
    ///
    /// # Contract
    ///
    /// `pred(0)` must return `false` so the sentinel stops the loop.
    #[inline]
    pub fn eat_while(&mut self, pred: impl Fn(u8) -> bool) {
        while pred(self.buf[self.pos as usize]) {
            self.pos += 1;
        }
    }

    /// Returns the number of bytes in the UTF-8 character starting with `byte`.
    #[inline]
    pub fn utf8_char_width(byte: u8) -> u32 {
        match byte {
            0xC0..=0xDF => 2,
            0xE0..=0xEF => 3,
            0xF0..=0xF7 => 4,
            _ => 1,
        }
    }

    /// Advance the cursor past one full UTF-8 character.
    ///
    /// Must not be called at EOF.
    #[inline]
    pub fn advance_char(&mut self) {
        debug_assert!(!self.is_eof(), "advance_char at EOF");
        let width = Self::utf8_char_width(self.current());
        self.pos = (self.pos + width).min(self.source_len);
    }

    /// Advance to the next `\r` or `\n` byte, or to EOF.
    ///
    /// Used by the line comment scanner; the line break itself is left for
    /// the next token.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_line_break(&mut self) {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        match memchr::memchr2(b'\r', b'\n', remaining) {
            Some(offset) => self.pos += offset as u32,
            None => self.pos = self.source_len,
        }
    }

    /// Advance to the first occurrence of `needle`, returning `true` if found.
    ///
    /// On failure the cursor is left at EOF.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn eat_until_seq(&mut self, needle: &[u8]) -> bool {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memmem::find(remaining, needle) {
            self.pos += offset as u32;
            true
        } else {
            self.pos = self.source_len;
            false
        }
    }

    /// Advance past ordinary bytes to the next occurrence of `a`, `b` or `c`.
    ///
    /// Returns the byte found, or `0` at EOF. Used by the string scanner to
    /// jump over literal content straight to the closing quote, a backslash,
    /// or the first byte of a template delimiter.
    #[allow(
        clippy::cast_possible_truncation,
        reason = "offset < remaining.len() <= source_len which fits in u32"
    )]
    pub fn skip_to_any3(&mut self, a: u8, b: u8, c: u8) -> u8 {
        let remaining = &self.buf[self.pos as usize..self.source_len as usize];
        if let Some(offset) = memchr::memchr3(a, b, c, remaining) {
            self.pos += offset as u32;
            self.buf[self.pos as usize]
        } else {
            self.pos = self.source_len;
            0
        }
    }
}
