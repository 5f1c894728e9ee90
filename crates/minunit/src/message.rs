//! Bounded last-failure message buffer

use std::fmt::{self, Write};

/// Fixed-capacity text buffer holding the most recent failure description.
///
/// The backing storage is reserved once at construction and never grows.
/// Text that does not fit is dropped silently; truncation always happens on a
/// UTF-8 character boundary, so the stored text stays valid.
#[derive(Debug, Clone)]
pub struct FailureMessage {
    buf: String,
    capacity: usize,
    truncated: bool,
}

impl FailureMessage {
    /// Create an empty buffer holding at most `capacity` bytes of text
    pub fn new(capacity: usize) -> Self {
        Self {
            buf: String::with_capacity(capacity),
            capacity,
            truncated: false,
        }
    }

    /// Replace the contents with formatted text, truncating to capacity
    pub fn set(&mut self, args: fmt::Arguments<'_>) {
        self.buf.clear();
        self.truncated = false;
        // Writing into the buffer cannot fail; overflow is dropped in write_str.
        let _ = self.write_fmt(args);
    }

    /// Current contents
    pub fn as_str(&self) -> &str {
        &self.buf
    }

    /// Maximum number of bytes this buffer holds
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Whether the last `set` dropped text
    pub fn is_truncated(&self) -> bool {
        self.truncated
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }
}

impl Write for FailureMessage {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        let remaining = self.capacity - self.buf.len();
        if s.len() <= remaining {
            self.buf.push_str(s);
            return Ok(());
        }

        let mut end = remaining;
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        self.buf.push_str(&s[..end]);
        self.truncated = true;
        Ok(())
    }
}

impl fmt::Display for FailureMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.buf)
    }
}
