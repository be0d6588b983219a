use crate::context::ParseContext;
use crate::result::ParseResult;

use core::fmt;

pub trait Parser<T, S> {
    fn parse(&self, context: &ParseContext<S>) -> ParseResult<T, S>;
}

impl<T, S, F> Parser<T, S> for F
where
    F: Fn(&ParseContext<S>) -> ParseResult<T, S>,
{
    fn parse(&self, context: &ParseContext<S>) -> ParseResult<T, S> {
        self(context)
    }
}

/// Any value a grammar wants to report in place of a [`ParserError`](crate::ParserError).
pub trait CustomError: fmt::Debug + fmt::Display {}

impl<E: fmt::Debug + fmt::Display + ?Sized> CustomError for E {}
