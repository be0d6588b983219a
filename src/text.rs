use alloc::format;
use alloc::string::String;
use alloc::vec::Vec;

use parsx_parser::{
    literals,
    parser::{map, match_char, match_not, sequence, terminated},
    BoxedParser, ParseContext, ParseResult, Parser,
};

literals! {
    pub digit => '0' ..= '9';
    pub letter => 'a' ..= 'z' | 'A' ..= 'Z';
    pub whitespace => '\u{0020}' | '\u{000D}' | '\u{000A}' | '\u{0009}';
}

/// Matches `expected` character by character. On failure the context is left
/// at the first character that diverged.
pub fn match_string<S: Clone + 'static>(expected: &str) -> BoxedParser<String, S> {
    map(
        |chars: Vec<char>| chars.into_iter().collect(),
        sequence(expected.chars().map(match_char)),
    )
}

pub fn a_space<S: Clone + 'static>() -> BoxedParser<char, S> {
    match_char(' ')
}

/// Skips any number of leading spaces, including none.
pub fn skip_spaces<S: Clone + 'static>() -> BoxedParser<(), S> {
    BoxedParser::new(|context: &ParseContext<S>| {
        context.succeed_with((), context.remaining().trim_start_matches(' '))
    })
}

pub fn literal_then_space<S: Clone + 'static>(expected: &str) -> BoxedParser<String, S> {
    terminated(match_string(expected), a_space())
}

/// Collects characters up to, but not including, `delimiter` or the end of
/// the stream. Fails if nothing was collected.
pub fn chars_until<S: Clone + 'static>(delimiter: char) -> BoxedParser<String, S> {
    let not_delimiter = match_not(delimiter);
    BoxedParser::new(move |context: &ParseContext<S>| {
        let mut run = String::new();
        let mut current = context.clone();
        while let ParseResult::Success { value, context } = not_delimiter.parse(&current) {
            run.push(value);
            current = context;
        }
        if run.is_empty() {
            context.fail(format!("Nothing found that does not match {}", delimiter))
        } else {
            ParseResult::Success {
                value: run,
                context: current,
            }
        }
    })
}

/// Matches `left`, `middle` and `right` in order and keeps the value of
/// `middle`.
pub fn between<L, T, R, S>(
    left: BoxedParser<L, S>,
    middle: BoxedParser<T, S>,
    right: BoxedParser<R, S>,
) -> BoxedParser<T, S>
where
    L: 'static,
    T: 'static,
    R: 'static,
    S: Clone + 'static,
{
    let inner = terminated(middle, right);
    BoxedParser::new(move |context: &ParseContext<S>| match left.parse(context) {
        ParseResult::Failure { error, context } => ParseResult::Failure { error, context },
        ParseResult::Success { context, .. } => inner.parse(&context),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use parsx_parser::parser::{just, lazy, or};
    use parsx_parser::{ParseError, ParserOptions};
    use test_case::test_case;

    fn context(input: &str) -> ParseContext<()> {
        ParseContext::new(input, ())
    }

    fn message<T, S>(result: &ParseResult<T, S>) -> String {
        result.error().map(ParseError::message).unwrap_or_default()
    }

    #[test]
    fn match_string_consumes_literal() {
        let context = context("abcd");
        assert_eq!(
            match_string("abc").parse(&context),
            context.succeed_with(String::from("abc"), "d")
        );
    }

    #[test]
    fn match_string_extracts_command_name() {
        let context = context("Show-Apps -Foreground green");
        assert_eq!(
            match_string("Show-Apps").parse(&context),
            context.succeed_with(String::from("Show-Apps"), " -Foreground green")
        );
    }

    #[test]
    fn match_string_alternatives() {
        let context = context("Clear-Host -Foreground green");
        let parser = or(match_string("Show-Apps"), match_string("Clear-Host"));
        assert_eq!(
            parser.parse(&context),
            context.succeed_with(String::from("Clear-Host"), " -Foreground green")
        );
    }

    #[test]
    fn match_string_reports_divergence() {
        let result = match_string("abc").parse(&context("abx"));
        assert_eq!(message(&result), "Expected c, got x");
        assert_eq!(result.context().remaining(), "x");
    }

    #[test_case("let", " x = 1")]
    #[test_case("a", "")]
    #[test_case("", "rest")]
    #[test_case("naïve", " café")]
    fn match_string_round_trip(literal: &str, rest: &str) {
        let input = format!("{}{}", literal, rest);
        let result = match_string(literal).parse(&context(&input));
        assert_eq!(result.value().map(String::as_str), Some(literal));
        assert_eq!(result.context().remaining(), rest);
    }

    #[test]
    fn a_space_matches_one_space() {
        let context = context(" a");
        assert_eq!(a_space().parse(&context), context.succeed_with(' ', "a"));
        assert!(a_space().parse(&self::context("a")).is_failure());
    }

    #[test_case("     a", "a")]
    #[test_case("a", "a")]
    #[test_case("  ", "")]
    #[test_case("", "")]
    fn skip_spaces_always_succeeds(input: &str, rest: &str) {
        let context = context(input);
        assert_eq!(
            skip_spaces().parse(&context),
            context.succeed_with((), rest)
        );
    }

    #[test]
    fn skip_spaces_moves_position() {
        let result = skip_spaces().parse(&context("   a"));
        assert_eq!(result.context().position().column, 3);
    }

    #[test]
    fn literal_then_space_drops_space() {
        let context = context("Show-Apps a");
        assert_eq!(
            literal_then_space("Show-Apps").parse(&context),
            context.succeed_with(String::from("Show-Apps"), "a")
        );
    }

    #[test]
    fn literal_then_space_requires_space() {
        let context = context("Show-Apps");
        let result = literal_then_space("Show-Apps").parse(&context);
        assert_eq!(
            message(&result),
            "Expected  , reached end of stream: Character Stream"
        );
        assert_eq!(result.context(), &context);
    }

    #[test_case("Thing ", "Thing", " ")]
    #[test_case("Thing", "Thing", "")]
    #[test_case("a b c", "a", " b c")]
    fn chars_until_stops_before_delimiter(input: &str, value: &str, rest: &str) {
        let context = context(input);
        assert_eq!(
            chars_until(' ').parse(&context),
            context.succeed_with(String::from(value), rest)
        );
    }

    #[test]
    fn chars_until_fails_on_empty_run() {
        let context = context(",x");
        let result = chars_until(',').parse(&context);
        assert_eq!(message(&result), "Nothing found that does not match ,");
        assert_eq!(result.context(), &context);
        assert!(chars_until(',').parse(&self::context("")).is_failure());
    }

    #[test]
    fn between_keeps_middle() {
        let context = context("(x)y");
        let parser = between(match_char('('), match_char('x'), match_char(')'));
        assert_eq!(parser.parse(&context), context.succeed_with('x', "y"));
    }

    #[test]
    fn between_fails_on_wrong_middle() {
        let parser = between(match_char('('), match_char('x'), match_char(')'));
        let result = parser.parse(&context("(y)"));
        assert_eq!(message(&result), "Expected x, got y");
        assert_eq!(result.context().remaining(), "y)");
    }

    #[test]
    fn between_fails_on_missing_left() {
        let context = context("x)");
        let parser = between(match_char('('), match_char('x'), match_char(')'));
        let result = parser.parse(&context);
        assert_eq!(message(&result), "Expected (, got x");
        assert_eq!(result.context(), &context);
    }

    #[test]
    fn between_quoted_text() {
        let context = context("\"hello world\" rest");
        let parser = between(match_char('"'), chars_until('"'), match_char('"'));
        assert_eq!(
            parser.parse(&context),
            context.succeed_with(String::from("hello world"), " rest")
        );
    }

    fn parens() -> BoxedParser<usize, ()> {
        or(
            map(
                |depth| depth + 1,
                between(match_char('('), lazy(parens), match_char(')')),
            ),
            just(0),
        )
    }

    #[test]
    fn between_recurses_past_hundred_levels() {
        let input = format!("{}{}", "(".repeat(60), ")".repeat(60));
        let result = parens().parse(&context(&input));
        assert_eq!(result.value(), Some(&60));
        assert!(result.context().is_empty());

        let input = format!("{}{}", "(".repeat(150), ")".repeat(150));
        let result = parens().parse(&context(&input));
        assert_eq!(result.value(), Some(&150));
    }

    #[test]
    fn between_is_not_charged_a_nest_level() {
        let options = ParserOptions {
            max_nest_level: Some(0),
            ..ParserOptions::default()
        };
        let context = context("(x)").with_options(options);
        let parser = between(match_char('('), match_char('x'), match_char(')'));
        assert_eq!(parser.parse(&context).value(), Some(&'x'));
    }

    #[test]
    fn character_classes() {
        assert!(is_digit('0') && is_digit('9') && !is_digit('a'));
        assert!(is_letter('q') && is_letter('Q') && !is_letter('1'));
        assert!(is_whitespace('\t') && !is_whitespace('x'));
        assert_eq!(letter().parse(&context("Ab")).value(), Some(&'A'));
        assert_eq!(message(&digit().parse(&context("x"))), "Expected digit, got x");
        assert_eq!(whitespace().parse(&context("\nx")).context().remaining(), "x");
    }
}
