//! Parse state: an immutable cursor over the input text
//!
//! A `ParseState` never changes once created. Advancing produces a new state
//! pointing further into the same text, so a combinator that fails can simply
//! drop whatever it built and its caller still holds the untouched original.
//!
//! Offsets are byte offsets into the UTF-8 text and always sit on a character
//! boundary. The counts passed to [`ParseState::peek`] and [`ParseState::read`]
//! are in characters, so a grammar author never deals with byte widths.

/// Cursor over the input text
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ParseState<'a> {
    text: &'a str,
    offset: usize,
}

impl<'a> ParseState<'a> {
    /// Create a state at the start of `text`
    pub fn new(text: &'a str) -> Self {
        ParseState { text, offset: 0 }
    }

    /// Byte offset of the cursor
    pub fn offset(&self) -> usize {
        self.offset
    }

    /// Everything from the cursor to the end of the text
    pub fn remaining(&self) -> &'a str {
        &self.text[self.offset..]
    }

    /// The next `n` characters, or fewer when the end of the text is closer.
    ///
    /// A short result is how callers learn they ran out of input; it is not an error.
    pub fn peek(&self, n: usize) -> &'a str {
        let rest = self.remaining();
        &rest[..Self::byte_width(rest, n)]
    }

    /// A new state advanced by `n` characters, stopping at the end of the text
    pub fn read(&self, n: usize) -> Self {
        ParseState {
            text: self.text,
            offset: self.offset + Self::byte_width(self.remaining(), n),
        }
    }

    /// True once every character has been consumed
    pub fn is_complete(&self) -> bool {
        self.offset == self.text.len()
    }

    fn byte_width(rest: &str, n: usize) -> usize {
        rest.char_indices()
            .nth(n)
            .map(|(index, _)| index)
            .unwrap_or(rest.len())
    }
}
