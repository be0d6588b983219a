#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

pub use parsx_parser::parser::{
    any_char_in, any_char_of, apply, choice, end_of_stream, just, lazy, lift2, many, many1, map,
    match_char, match_not, nested, optional, or, pair, preceded, satisfy, sequence, state,
    terminated, update_state,
};
pub use parsx_parser::{
    literals, BoxedParser, CustomError, ParseContext, ParseError, ParseResult, Parser,
    ParserError, ParserOptions, Position,
};

#[cfg(feature = "std")]
pub use crate::pattern::{match_pattern, PatternMatch};
pub use crate::text::{
    a_space, between, chars_until, digit, is_digit, is_letter, is_whitespace, letter,
    literal_then_space, match_string, skip_spaces, whitespace,
};

#[cfg(feature = "std")]
pub mod pattern;
pub mod text;

pub fn parse<T, S, P>(parser: &P, input: &str, state: S) -> ParseResult<T, S>
where
    P: Parser<T, S>,
{
    parser.parse(&ParseContext::new(input, state))
}

pub fn parse_with_options<T, S, P>(
    parser: &P,
    input: &str,
    state: S,
    options: ParserOptions,
) -> ParseResult<T, S>
where
    P: Parser<T, S>,
{
    parser.parse(&ParseContext::new(input, state).with_options(options))
}
