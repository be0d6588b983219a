pub use regex::Regex;

use parsx_parser::{BoxedParser, ParseContext};

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PatternMatch {
    pub text: String,
    /// Capture groups of the match; group 0 is the whole match.
    pub groups: Vec<Option<String>>,
}

impl PatternMatch {
    pub fn group(&self, index: usize) -> Option<&str> {
        self.groups.get(index).and_then(|group| group.as_deref())
    }
}

/// Matches the longest prefix of the remaining input that `pattern` matches
/// in full.
///
/// Every prefix is tried, so the cost is quadratic in the length of the
/// remaining input. A prefix that matches is kept even if longer prefixes
/// stop matching.
///
/// The pattern is recompiled from its source text, so options set through
/// `RegexBuilder` are lost; use inline flags such as `(?i)` instead. A
/// verbose-mode pattern may end in a `#` comment.
pub fn match_pattern<S: Clone + 'static>(
    pattern: &Regex,
) -> Result<BoxedParser<PatternMatch, S>, regex::Error> {
    let source = pattern.as_str().to_owned();
    let anchored = anchor(&source)?;
    Ok(BoxedParser::new(move |context: &ParseContext<S>| {
        if context.is_empty() {
            return context.fail(format!("Expected: {} but stream is empty", source));
        }
        let remaining = context.remaining();
        let longest = remaining
            .char_indices()
            .map(|(at, c)| at + c.len_utf8())
            .filter(|&end| anchored.is_match(&remaining[..end]))
            .last();
        let captures = longest.and_then(|end| {
            anchored
                .captures(&remaining[..end])
                .map(|captures| (end, captures))
        });
        match captures {
            Some((end, captures)) => {
                let found = PatternMatch {
                    text: remaining[..end].to_owned(),
                    groups: captures
                        .iter()
                        .map(|group| group.map(|group| group.as_str().to_owned()))
                        .collect(),
                };
                context.succeed_with(found, &remaining[end..])
            }
            None => context.fail(format!(
                "Expected stream: {} to match pattern: {} found nothing",
                remaining, source
            )),
        }
    }))
}

fn anchor(source: &str) -> Result<Regex, regex::Error> {
    Regex::new(&format!("^(?:{})$", source)).or_else(|error| {
        // a trailing `(?x)` comment swallows the closing anchor unless it is
        // ended by a newline, which verbose mode ignores
        Regex::new(&format!("^(?:{}\n)$", source)).map_err(|_| error)
    })
}
