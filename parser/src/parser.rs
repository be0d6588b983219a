use crate::context::ParseContext;
use crate::error::ParserError;
use crate::result::ParseResult;
use crate::traits::Parser;

use alloc::format;
use alloc::rc::Rc;
use alloc::vec::Vec;
use core::ops::RangeInclusive;

type ParserFn<T, S> = Rc<dyn Fn(&ParseContext<S>) -> ParseResult<T, S>>;

/// Type-erased, cheaply cloneable parser producing `T` over user state `S`.
pub struct BoxedParser<T, S> {
    parser: ParserFn<T, S>,
}

impl<T, S> Clone for BoxedParser<T, S> {
    fn clone(&self) -> Self {
        BoxedParser {
            parser: Rc::clone(&self.parser),
        }
    }
}

impl<T: 'static, S: 'static> BoxedParser<T, S> {
    pub fn new<P: Parser<T, S> + 'static>(parser: P) -> Self {
        BoxedParser {
            parser: Rc::new(move |context: &ParseContext<S>| parser.parse(context)),
        }
    }
}

impl<T, S> Parser<T, S> for BoxedParser<T, S> {
    fn parse(&self, context: &ParseContext<S>) -> ParseResult<T, S> {
        (self.parser)(context)
    }
}

impl<T: 'static, S: Clone + 'static> BoxedParser<T, S> {
    pub fn seq<U: 'static>(self, other: BoxedParser<U, S>) -> BoxedParser<(T, U), S> {
        pair(self, other)
    }

    pub fn skip<U: 'static>(self, other: BoxedParser<U, S>) -> BoxedParser<T, S> {
        terminated(self, other)
    }

    pub fn skip_left<U: 'static>(self, other: BoxedParser<U, S>) -> BoxedParser<U, S> {
        preceded(self, other)
    }

    pub fn map<U: 'static, F: Fn(T) -> U + 'static>(self, transform: F) -> BoxedParser<U, S> {
        map(transform, self)
    }

    pub fn or(self, other: BoxedParser<T, S>) -> BoxedParser<T, S> {
        or(self, other)
    }

    pub fn apply<A: 'static, B: 'static>(self, argument: BoxedParser<A, S>) -> BoxedParser<B, S>
    where
        T: Fn(A) -> B,
    {
        apply(self, argument)
    }
}

fn expect_char<S: Clone>(context: &ParseContext<S>, expected: char) -> ParseResult<char, S> {
    match context.head() {
        None => context.fail(format!(
            "Expected {}, reached end of stream: {}",
            expected,
            context.stream_name()
        )),
        Some(head) if head == expected => context.succeed_with(head, context.tail()),
        Some(head) => {
            log_trace!("expected {:?}, got {:?} at {}", expected, head, context.position());
            let position = if context.options().advance_column_on_mismatch {
                context.position().bump_column()
            } else {
                context.position().clone()
            };
            context.fail_with(ParserError::new(
                position,
                format!("Expected {}, got {}", expected, head),
            ))
        }
    }
}

pub fn match_char<S: Clone + 'static>(expected: char) -> BoxedParser<char, S> {
    BoxedParser::new(move |context: &ParseContext<S>| expect_char(context, expected))
}

/// Consumes any single character except `excluded`.
pub fn match_not<S: Clone + 'static>(excluded: char) -> BoxedParser<char, S> {
    BoxedParser::new(move |context: &ParseContext<S>| match context.head() {
        None => context.fail(format!(
            "Expected {}, reached end of stream: {}",
            excluded,
            context.stream_name()
        )),
        Some(head) => match expect_char(context, excluded) {
            ParseResult::Failure { .. } => context.succeed_with(head, context.tail()),
            ParseResult::Success { .. } => context.fail(format!(
                "Expected: {} to not match but instead found {}",
                excluded, head
            )),
        },
    })
}

pub fn satisfy<S, F>(label: &'static str, predicate: F) -> BoxedParser<char, S>
where
    S: Clone + 'static,
    F: Fn(char) -> bool + 'static,
{
    BoxedParser::new(move |context: &ParseContext<S>| match context.head() {
        None => context.fail(format!(
            "Expected {}, reached end of stream: {}",
            label,
            context.stream_name()
        )),
        Some(head) if predicate(head) => context.succeed_with(head, context.tail()),
        Some(head) => context.fail(format!("Expected {}, got {}", label, head)),
    })
}

pub fn end_of_stream<S: Clone + 'static>() -> BoxedParser<(), S> {
    BoxedParser::new(|context: &ParseContext<S>| match context.head() {
        None => context.succeed(()),
        Some(head) => context.fail(format!("Expected end of stream, got {}", head)),
    })
}

/// Tries `first`, and on failure runs `second` against the same context.
pub fn or<T: 'static, S: Clone + 'static>(
    first: BoxedParser<T, S>,
    second: BoxedParser<T, S>,
) -> BoxedParser<T, S> {
    BoxedParser::new(move |context: &ParseContext<S>| match first.parse(context) {
        success @ ParseResult::Success { .. } => success,
        ParseResult::Failure { .. } => {
            log_trace!("falling back to second alternative at {}", context.position());
            second.parse(context)
        }
    })
}

/// Ordered alternation: earlier parsers win.
pub fn choice<T, S, I>(parsers: I) -> BoxedParser<T, S>
where
    T: 'static,
    S: Clone + 'static,
    I: IntoIterator<Item = BoxedParser<T, S>>,
{
    let mut parsers = parsers.into_iter();
    match parsers.next() {
        Some(first) => parsers.fold(first, or),
        None => BoxedParser::new(|context: &ParseContext<S>| {
            context.fail("No alternatives to choose from")
        }),
    }
}

pub fn any_char_of<S: Clone + 'static>(chars: &str) -> BoxedParser<char, S> {
    choice(chars.chars().map(match_char))
}

pub fn any_char_in<S: Clone + 'static>(range: RangeInclusive<char>) -> BoxedParser<char, S> {
    choice(range.map(match_char))
}

/// Runs `first` then `second`, keeping both values.
///
/// A failure in either step is reported against the context this parser
/// started from, carrying the inner error unchanged.
pub fn pair<A: 'static, B: 'static, S: Clone + 'static>(
    first: BoxedParser<A, S>,
    second: BoxedParser<B, S>,
) -> BoxedParser<(A, B), S> {
    BoxedParser::new(move |context: &ParseContext<S>| match first.parse(context) {
        ParseResult::Failure { error, .. } => context.fail_with(error),
        ParseResult::Success {
            value: a,
            context: next,
        } => match second.parse(&next) {
            ParseResult::Failure { error, .. } => context.fail_with(error),
            ParseResult::Success { value: b, context } => ParseResult::Success {
                value: (a, b),
                context,
            },
        },
    })
}

/// Keeps the value of `first`; input matched by `second` is still consumed.
pub fn terminated<A: 'static, B: 'static, S: Clone + 'static>(
    first: BoxedParser<A, S>,
    second: BoxedParser<B, S>,
) -> BoxedParser<A, S> {
    map(|(a, _)| a, pair(first, second))
}

pub fn preceded<A: 'static, B: 'static, S: Clone + 'static>(
    first: BoxedParser<A, S>,
    second: BoxedParser<B, S>,
) -> BoxedParser<B, S> {
    map(|(_, b)| b, pair(first, second))
}

pub fn map<A, B, S, F>(transform: F, parser: BoxedParser<A, S>) -> BoxedParser<B, S>
where
    A: 'static,
    B: 'static,
    S: Clone + 'static,
    F: Fn(A) -> B + 'static,
{
    BoxedParser::new(move |context: &ParseContext<S>| parser.parse(context).map_value(&transform))
}

pub fn apply<A, B, F, S>(
    function: BoxedParser<F, S>,
    argument: BoxedParser<A, S>,
) -> BoxedParser<B, S>
where
    A: 'static,
    B: 'static,
    F: Fn(A) -> B + 'static,
    S: Clone + 'static,
{
    map(|(f, a): (F, A)| f(a), pair(function, argument))
}

pub fn lift2<A, B, C, S, F>(
    combine: F,
    first: BoxedParser<A, S>,
    second: BoxedParser<B, S>,
) -> BoxedParser<C, S>
where
    A: 'static,
    B: 'static,
    C: 'static,
    S: Clone + 'static,
    F: Fn(A, B) -> C + 'static,
{
    map(move |(a, b)| combine(a, b), pair(first, second))
}

/// Succeeds with `value` without consuming anything.
pub fn just<T: Clone + 'static, S: Clone + 'static>(value: T) -> BoxedParser<T, S> {
    BoxedParser::new(move |context: &ParseContext<S>| context.succeed(value.clone()))
}

/// Runs every parser in order. The first failure is returned as is, with
/// whatever the earlier parsers consumed.
pub fn sequence<T, S, I>(parsers: I) -> BoxedParser<Vec<T>, S>
where
    T: 'static,
    S: Clone + 'static,
    I: IntoIterator<Item = BoxedParser<T, S>>,
{
    let parsers: Vec<_> = parsers.into_iter().collect();
    BoxedParser::new(move |context: &ParseContext<S>| {
        let mut values = Vec::with_capacity(parsers.len());
        let mut current = context.clone();
        for parser in &parsers {
            match parser.parse(&current) {
                ParseResult::Success { value, context } => {
                    values.push(value);
                    current = context;
                }
                failure @ ParseResult::Failure { .. } => return failure.map_value(|_| Vec::new()),
            }
        }
        ParseResult::Success {
            value: values,
            context: current,
        }
    })
}

pub fn many<T: 'static, S: Clone + 'static>(parser: BoxedParser<T, S>) -> BoxedParser<Vec<T>, S> {
    BoxedParser::new(move |context: &ParseContext<S>| {
        let (values, context) = repeat(&parser, Vec::new(), context.clone());
        ParseResult::Success {
            value: values,
            context,
        }
    })
}

pub fn many1<T: 'static, S: Clone + 'static>(parser: BoxedParser<T, S>) -> BoxedParser<Vec<T>, S> {
    BoxedParser::new(move |context: &ParseContext<S>| match parser.parse(context) {
        ParseResult::Failure { error, context } => ParseResult::Failure { error, context },
        ParseResult::Success { value, context } => {
            let mut values = Vec::new();
            values.push(value);
            let (values, context) = repeat(&parser, values, context);
            ParseResult::Success {
                value: values,
                context,
            }
        }
    })
}

fn repeat<T, S: Clone>(
    parser: &BoxedParser<T, S>,
    mut values: Vec<T>,
    mut current: ParseContext<S>,
) -> (Vec<T>, ParseContext<S>) {
    while let ParseResult::Success { value, context } = parser.parse(&current) {
        // no progress means the same match would repeat forever
        if context.remaining().len() == current.remaining().len() {
            break;
        }
        values.push(value);
        current = context;
    }
    (values, current)
}

pub fn optional<T: 'static, S: Clone + 'static>(
    parser: BoxedParser<T, S>,
) -> BoxedParser<Option<T>, S> {
    BoxedParser::new(move |context: &ParseContext<S>| match parser.parse(context) {
        ParseResult::Success { value, context } => ParseResult::Success {
            value: Some(value),
            context,
        },
        ParseResult::Failure { .. } => context.succeed(None),
    })
}

fn parse_nested<T, S: Clone>(
    parser: &BoxedParser<T, S>,
    context: &ParseContext<S>,
) -> ParseResult<T, S> {
    let inner = match context.nest() {
        Ok(inner) => inner,
        Err(error) => return context.fail_with(error),
    };
    let level = context.nest_level();
    match parser.parse(&inner) {
        ParseResult::Success { value, context } => ParseResult::Success {
            value,
            context: context.at_nest_level(level),
        },
        ParseResult::Failure { error, context } => ParseResult::Failure {
            error,
            context: context.at_nest_level(level),
        },
    }
}

/// Runs `parser` one nest level deeper, failing once
/// [`ParserOptions::max_nest_level`](crate::ParserOptions::max_nest_level) is reached.
pub fn nested<T: 'static, S: Clone + 'static>(parser: BoxedParser<T, S>) -> BoxedParser<T, S> {
    BoxedParser::new(move |context: &ParseContext<S>| parse_nested(&parser, context))
}

/// Builds the parser on every use, so grammar functions can refer to
/// themselves. Recursion depth is only limited where the grammar asks for it
/// with [`nested`].
pub fn lazy<T, S, F>(build: F) -> BoxedParser<T, S>
where
    T: 'static,
    S: Clone + 'static,
    F: Fn() -> BoxedParser<T, S> + 'static,
{
    BoxedParser::new(move |context: &ParseContext<S>| build().parse(context))
}

pub fn state<S: Clone + 'static>() -> BoxedParser<S, S> {
    BoxedParser::new(|context: &ParseContext<S>| context.succeed(context.state().clone()))
}

pub fn update_state<S, F>(update: F) -> BoxedParser<(), S>
where
    S: Clone + 'static,
    F: Fn(&S) -> S + 'static,
{
    BoxedParser::new(move |context: &ParseContext<S>| ParseResult::Success {
        value: (),
        context: context.with_state(update(context.state())),
    })
}

#[macro_export]
macro_rules! literals {
    (
        $(
            $( #[ $attr:meta ] )*
            $vis:vis $name:ident => $($($value:literal)..=+)|+;
        )*
    ) => {
        $(
            $crate::literals!{
                IMPL
                $( #[ $attr ] )*
                $vis $name => $($($value)..=+)|+
            }
        )*
    };
    (
        IMPL
        $( #[ $attr:meta ] )*
        $vis:vis $name:ident => $($($value:literal)..=+)|+
    ) => (
        $crate::paste::paste! {
            $vis fn [< is_ $name >](c: char) -> bool {
                matches!(c, $($($value)..=+)|+)
            }

            $( #[ $attr ] )*
            $vis fn $name<S: Clone + 'static>() -> $crate::BoxedParser<char, S> {
                $crate::parser::satisfy(stringify!($name), [< is_ $name >])
            }
        }
    );
}
