use crate::error::{ParseError, ParserError};
use crate::position::{Position, DEFAULT_STREAM_NAME};
use crate::result::ParseResult;

use alloc::rc::Rc;
use alloc::string::String;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ParserOptions {
    pub max_nest_level: Option<u32>,
    /// Report a `match_char` mismatch one column past the offending character.
    pub advance_column_on_mismatch: bool,
}

impl Default for ParserOptions {
    fn default() -> Self {
        ParserOptions {
            max_nest_level: None,
            advance_column_on_mismatch: true,
        }
    }
}

/// Immutable snapshot of a parse in progress.
///
/// The remaining input is always a suffix of the original input; it is stored
/// as a byte offset into the shared original so snapshots are cheap to copy.
#[derive(Clone, Debug, PartialEq)]
pub struct ParseContext<S> {
    input: Rc<str>,
    offset: usize,
    state: S,
    position: Position,
    nest_level: u32,
    options: ParserOptions,
}

impl<S> ParseContext<S> {
    pub fn new(input: &str, state: S) -> Self {
        Self {
            input: Rc::from(input),
            offset: 0,
            state,
            position: Position::new(DEFAULT_STREAM_NAME),
            nest_level: 0,
            options: ParserOptions::default(),
        }
    }

    pub fn with_stream_name(self, stream_name: &str) -> Self {
        Self {
            position: Position {
                stream_name: Rc::from(stream_name),
                ..self.position
            },
            ..self
        }
    }

    pub fn with_options(self, options: ParserOptions) -> Self {
        Self { options, ..self }
    }

    pub fn original_input(&self) -> &str {
        &self.input
    }

    pub fn remaining(&self) -> &str {
        &self.input[self.offset..]
    }

    pub fn is_empty(&self) -> bool {
        self.offset >= self.input.len()
    }

    pub fn head(&self) -> Option<char> {
        self.remaining().chars().next()
    }

    /// Remaining input after the head character. Empty when there is no head.
    pub fn tail(&self) -> &str {
        let mut chars = self.remaining().chars();
        chars.next();
        chars.as_str()
    }

    pub fn state(&self) -> &S {
        &self.state
    }

    pub fn position(&self) -> &Position {
        &self.position
    }

    pub fn stream_name(&self) -> &str {
        &self.position.stream_name
    }

    pub fn options(&self) -> &ParserOptions {
        &self.options
    }

    pub fn nest_level(&self) -> u32 {
        self.nest_level
    }

    pub fn fail<T>(&self, message: impl Into<String>) -> ParseResult<T, S>
    where
        S: Clone,
    {
        self.fail_with(ParserError::new(self.position.clone(), message))
    }

    pub fn fail_with<T>(&self, error: impl Into<ParseError>) -> ParseResult<T, S>
    where
        S: Clone,
    {
        ParseResult::Failure {
            error: error.into(),
            context: self.clone(),
        }
    }
}

impl<S: Clone> ParseContext<S> {
    pub fn with_state(&self, state: S) -> Self {
        Self {
            state,
            ..self.clone()
        }
    }

    /// Snapshot with up to `count` characters consumed.
    pub fn advance(&self, count: usize) -> Self {
        let consumed = self
            .remaining()
            .char_indices()
            .nth(count)
            .map_or(self.remaining().len(), |(at, _)| at);
        self.consume(consumed)
    }

    /// Snapshot whose remaining input is `rest`, or `None` when `rest` is not
    /// a suffix of the current remaining input.
    pub fn advance_to(&self, rest: &str) -> Option<Self> {
        let remaining = self.remaining();
        if remaining.ends_with(rest) {
            Some(self.consume(remaining.len() - rest.len()))
        } else {
            None
        }
    }

    fn consume(&self, bytes: usize) -> Self {
        let position = self.remaining()[..bytes]
            .chars()
            .fold(self.position.clone(), |position, c| position.next(c));
        Self {
            offset: self.offset + bytes,
            position,
            ..self.clone()
        }
    }

    pub fn nest(&self) -> Result<Self, ParserError> {
        if Some(self.nest_level) == self.options.max_nest_level {
            log_trace!("nest limit {} reached at {}", self.nest_level, self.position);
            Err(ParserError::new(self.position.clone(), "Exceeded nest level"))
        } else {
            Ok(Self {
                nest_level: self.nest_level + 1,
                ..self.clone()
            })
        }
    }

    pub(crate) fn at_nest_level(self, nest_level: u32) -> Self {
        Self { nest_level, ..self }
    }

    pub fn succeed<T>(&self, value: T) -> ParseResult<T, S> {
        ParseResult::Success {
            value,
            context: self.clone(),
        }
    }

    /// Success leaving `rest` unconsumed. Fails without consuming anything
    /// when `rest` is not a suffix of the remaining input.
    pub fn succeed_with<T>(&self, value: T, rest: &str) -> ParseResult<T, S> {
        match self.advance_to(rest) {
            Some(context) => ParseResult::Success { value, context },
            None => self.fail("Remaining input does not end with the given rest"),
        }
    }

    /// Success carrying this context's state, placed where `other` left off.
    pub fn succeed_from<T>(&self, value: T, other: &ParseContext<S>) -> ParseResult<T, S> {
        ParseResult::Success {
            value,
            context: Self {
                offset: other.offset,
                position: other.position.clone(),
                ..self.clone()
            },
        }
    }
}
