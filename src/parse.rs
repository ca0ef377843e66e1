//! Whitespace token stream for the flat control-point text format
//!
//! Reads behave like `scanf`: a token that does not parse as the requested
//! type is left in place, so every following read of that type fails too.
//! Constructors count successful reads against the number they expected and
//! reject the stream on any mismatch.

use std::io::Read;

/// Errors produced while reading control points and spaces from text
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("expected to read {expected} values, but read {read}")]
    TokenCount { expected: usize, read: usize },

    #[error("triangle vertex count {0} is not a multiple of 3")]
    TriangleVertexCount(usize),

    #[error("rotated copy count {0} is not a finite number")]
    RotatedCopyCount(f64),

    #[error("failed to read sound length from sound space")]
    MissingDuration,

    #[error("space needs at least {required} control points, found {found}")]
    TooFewAnchors { found: usize, required: usize },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// A cursor over whitespace-delimited tokens
#[derive(Debug, Clone, Default)]
pub struct TokenStream {
    tokens: Vec<String>,
    cursor: usize,
}

impl TokenStream {
    pub fn new(text: &str) -> Self {
        Self {
            tokens: text.split_whitespace().map(str::to_owned).collect(),
            cursor: 0,
        }
    }

    /// Slurp a reader into a token stream
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, ParseError> {
        let mut text = String::new();
        reader.read_to_string(&mut text)?;
        Ok(Self::new(&text))
    }

    /// Next token without consuming it
    pub fn peek(&self) -> Option<&str> {
        self.tokens.get(self.cursor).map(String::as_str)
    }

    pub fn is_exhausted(&self) -> bool {
        self.cursor >= self.tokens.len()
    }

    /// Number of tokens consumed so far
    pub fn position(&self) -> usize {
        self.cursor
    }

    /// Consume the next token if it parses as a float
    pub fn read_f64(&mut self) -> Option<f64> {
        let value = self.peek()?.parse::<f64>().ok()?;
        self.cursor += 1;
        Some(value)
    }

    pub fn read_f32(&mut self) -> Option<f32> {
        let value = self.peek()?.parse::<f32>().ok()?;
        self.cursor += 1;
        Some(value)
    }

    /// Consume the next token if it parses as a non-negative count
    pub fn read_count(&mut self) -> Option<usize> {
        let value = self.peek()?.parse::<usize>().ok()?;
        self.cursor += 1;
        Some(value)
    }

    /// Consume the next token whatever it holds
    pub fn read_word(&mut self) -> Option<String> {
        let word = self.tokens.get(self.cursor)?.clone();
        self.cursor += 1;
        Some(word)
    }
}

impl std::str::FromStr for TokenStream {
    type Err = std::convert::Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::new(s))
    }
}

/// Tracks expected versus successfully read values for one constructor
#[derive(Debug, Default)]
pub(crate) struct ReadTally {
    expected: usize,
    read: usize,
}

impl ReadTally {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn expect(&mut self, count: usize) {
        self.expected = self.expected.saturating_add(count);
    }

    /// Count a read if it succeeded and pass the value through
    pub(crate) fn record<T>(&mut self, value: Option<T>) -> Option<T> {
        if value.is_some() {
            self.read += 1;
        }
        value
    }

    /// The count mismatch as it stands
    pub(crate) fn shortfall(&self) -> ParseError {
        ParseError::TokenCount {
            expected: self.expected,
            read: self.read,
        }
    }

    pub(crate) fn finish(self) -> Result<(), ParseError> {
        if self.read != self.expected {
            return Err(self.shortfall());
        }
        Ok(())
    }
}

/// Format a value the way the text format writes floats (`%f`)
pub(crate) fn fmt_float(value: f64) -> String {
    format!("{value:.6}")
}
