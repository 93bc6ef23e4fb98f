//! Uppercasing whitespace tokenizer.
//!
//! Tokens are copied out of the line into owned fixed-capacity strings, so
//! nothing from a previous command survives a [`TokenTable::clear`].

use heapless::{String, Vec};

use crate::config::{LINE_CAPACITY, MAX_TOKENS};
use crate::error::ParseError;

pub type Token = String<LINE_CAPACITY>;

/// Slot 0 holds the command name, slots 1.. the arguments.
#[derive(Debug, Default)]
pub struct TokenTable {
    tokens: Vec<Token, MAX_TOKENS>,
}

impl TokenTable {
    pub const fn new() -> Self {
        Self { tokens: Vec::new() }
    }

    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Split `line` on runs of spaces, uppercasing ASCII letters.
    ///
    /// Trailing and repeated spaces never produce empty tokens.  A leading
    /// space ends an empty command name, so the line resolves to no command.
    /// More than [`MAX_TOKENS`] tokens is `BadArgs`; the table is left empty.
    pub fn tokenize(&mut self, line: &[u8]) -> Result<(), ParseError> {
        self.clear();
        if line.first() == Some(&b' ') {
            self.push(Token::new())?;
        }
        for word in line.split(|&b| b == b' ').filter(|w| !w.is_empty()) {
            let mut token = Token::new();
            for &b in word {
                token
                    .push(char::from(b.to_ascii_uppercase()))
                    .map_err(|()| ParseError::Overflow)?;
            }
            self.push(token)?;
        }
        Ok(())
    }

    fn push(&mut self, token: Token) -> Result<(), ParseError> {
        if self.tokens.push(token).is_err() {
            self.clear();
            return Err(ParseError::BadArgs);
        }
        Ok(())
    }

    /// Token at `index`, or `""` for an unused slot.
    pub fn slot(&self, index: usize) -> &str {
        self.tokens.get(index).map_or("", String::as_str)
    }

    pub fn command(&self) -> &str {
        self.slot(0)
    }

    /// Number of populated slots after the command name.
    pub fn arg_count(&self) -> usize {
        self.tokens.len().saturating_sub(1)
    }

    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }
}
