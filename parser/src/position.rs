use alloc::rc::Rc;
use core::fmt;

pub const DEFAULT_STREAM_NAME: &str = "Character Stream";

/// Location of a parse step, kept for diagnostics only.
///
/// A `Position` is an immutable value. Every context snapshot owns its own
/// copy, so two contexts derived from a common ancestor never observe each
/// other's advancement.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Position {
    pub stream_name: Rc<str>,
    /// Number of characters consumed since the start of the stream.
    pub index: usize,
    /// One-based.
    pub line: usize,
    /// Zero-based.
    pub column: usize,
}

impl Position {
    pub fn new(stream_name: impl Into<Rc<str>>) -> Self {
        Self {
            stream_name: stream_name.into(),
            index: 0,
            line: 1,
            column: 0,
        }
    }

    pub fn next(&self, c: char) -> Self {
        let new_line = c == '\n';
        Self {
            stream_name: self.stream_name.clone(),
            index: self.index + 1,
            line: if new_line { self.line + 1 } else { self.line },
            column: if new_line { 0 } else { self.column + 1 },
        }
    }

    /// Same location with the column counter moved one step right, without
    /// consuming anything.
    pub fn bump_column(&self) -> Self {
        Self {
            column: self.column + 1,
            ..self.clone()
        }
    }
}

impl Default for Position {
    fn default() -> Self {
        Position::new(DEFAULT_STREAM_NAME)
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.stream_name, self.line, self.column)
    }
}
