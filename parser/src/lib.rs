#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

#[doc(hidden)]
pub use paste;

#[cfg(feature = "logging")]
macro_rules! log_trace {
    ($($arg:tt)*) => { log::trace!($($arg)*) };
}

#[cfg(not(feature = "logging"))]
macro_rules! log_trace {
    ($($arg:tt)*) => {};
}

pub mod context;
pub mod error;
pub mod parser;
pub mod position;
pub mod result;
pub mod traits;

pub use crate::context::{ParseContext, ParserOptions};
pub use crate::error::{ParseError, ParserError};
pub use crate::parser::BoxedParser;
pub use crate::position::Position;
pub use crate::result::ParseResult;
pub use crate::traits::{CustomError, Parser};
