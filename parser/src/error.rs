use crate::position::Position;
use crate::traits::CustomError;

use alloc::rc::Rc;
use alloc::string::{String, ToString};
use core::fmt;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ParserError {
    pub position: Position,
    pub message: String,
}

impl ParserError {
    pub fn new(position: Position, message: impl Into<String>) -> Self {
        Self {
            position,
            message: message.into(),
        }
    }
}

impl fmt::Display for ParserError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.message, self.position)
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParserError {}

/// Payload of a failed parse.
///
/// Combinators always produce `Parser`. Grammar code may carry its own error
/// value through `Custom` instead.
#[derive(Clone, Debug)]
pub enum ParseError {
    Parser(ParserError),
    Custom(Rc<dyn CustomError>),
}

impl ParseError {
    pub fn custom<E: CustomError + 'static>(error: E) -> Self {
        ParseError::Custom(Rc::new(error))
    }

    pub fn message(&self) -> String {
        match self {
            ParseError::Parser(error) => error.message.clone(),
            ParseError::Custom(error) => error.to_string(),
        }
    }

    pub fn position(&self) -> Option<&Position> {
        match self {
            ParseError::Parser(error) => Some(&error.position),
            ParseError::Custom(_) => None,
        }
    }
}

impl PartialEq for ParseError {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (ParseError::Parser(a), ParseError::Parser(b)) => a == b,
            (ParseError::Custom(a), ParseError::Custom(b)) => Rc::ptr_eq(a, b),
            _ => false,
        }
    }
}

impl From<ParserError> for ParseError {
    fn from(error: ParserError) -> Self {
        ParseError::Parser(error)
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::Parser(error) => fmt::Display::fmt(error, f),
            ParseError::Custom(error) => fmt::Display::fmt(error, f),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for ParseError {}
