//! Bounded line buffer and the accepted character set.

use heapless::Vec;

use crate::config::LINE_CAPACITY;
use crate::error::ParseError;

/// `true` for line feed or carriage return.
pub const fn is_terminator(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r')
}

/// Bytes the console accepts: terminators, NUL, `_`, space and ASCII letters.
/// Anything else is a syntax error the moment it arrives.
pub const fn is_valid_char(byte: u8) -> bool {
    matches!(byte, b'\n' | b'\r' | 0 | b'_' | b' ') || byte.is_ascii_alphabetic()
}

/// Fixed-capacity command line.  Appending to a full buffer is rejected,
/// never truncated.
#[derive(Debug, Default)]
pub struct LineBuffer {
    bytes: Vec<u8, LINE_CAPACITY>,
}

impl LineBuffer {
    pub const fn new() -> Self {
        Self { bytes: Vec::new() }
    }

    pub fn push(&mut self, byte: u8) -> Result<(), ParseError> {
        self.bytes.push(byte).map_err(|_| ParseError::Overflow)
    }

    pub fn is_full(&self) -> bool {
        self.bytes.is_full()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn clear(&mut self) {
        self.bytes.clear();
    }
}
