//! Character cursor used by the literal parser.

use crate::error::ThingError;

/// Reader over literal text.
///
/// Wraps a string slice and tracks a byte position, with checked reads that
/// report where the input went wrong.
#[derive(Debug, Clone)]
pub struct Reader<'a> {
    text: &'a str,
    pos: usize,
}

impl<'a> Reader<'a> {
    /// Creates a new reader over `text`.
    pub fn new(text: &'a str) -> Self {
        Self { text, pos: 0 }
    }

    /// Returns the current byte position.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Returns the unread text.
    pub fn remaining(&self) -> &'a str {
        &self.text[self.pos..]
    }

    /// Returns true if all text has been consumed.
    pub fn is_empty(&self) -> bool {
        self.pos >= self.text.len()
    }

    /// Returns the next character without consuming it.
    #[inline]
    pub fn peek(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Consumes and returns the next character.
    #[inline]
    pub fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    /// Consumes the next character, failing at end of input.
    #[inline]
    pub fn read_char(&mut self, context: &'static str) -> Result<char, ThingError> {
        self.bump().ok_or_else(|| self.error(context))
    }

    /// Consumes `c` if it is next.
    pub fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    /// Consumes `c`, failing if something else is next.
    pub fn expect(&mut self, c: char, context: &'static str) -> Result<(), ThingError> {
        if self.eat(c) {
            Ok(())
        } else {
            Err(self.error(context))
        }
    }

    /// Consumes characters while `pred` holds and returns them.
    pub fn take_while(&mut self, pred: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.text[start..self.pos]
    }

    /// Skips whitespace.
    pub fn skip_ws(&mut self) {
        self.take_while(char::is_whitespace);
    }

    /// Builds a syntax error at the current position.
    pub fn error(&self, context: &'static str) -> ThingError {
        ThingError::LiteralSyntax {
            position: self.pos,
            context,
        }
    }
}
