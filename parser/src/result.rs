use crate::context::ParseContext;
use crate::error::ParseError;

/// Outcome of running a parser against a context.
///
/// `Success` carries the context after the match; `Failure` carries the
/// context at the point of failure, which has not been advanced.
#[derive(Clone, Debug, PartialEq)]
pub enum ParseResult<T, S> {
    Success {
        value: T,
        context: ParseContext<S>,
    },
    Failure {
        error: ParseError,
        context: ParseContext<S>,
    },
}

impl<T, S> ParseResult<T, S> {
    pub fn is_success(&self) -> bool {
        matches!(self, ParseResult::Success { .. })
    }

    pub fn is_failure(&self) -> bool {
        !self.is_success()
    }

    pub fn context(&self) -> &ParseContext<S> {
        match self {
            ParseResult::Success { context, .. } | ParseResult::Failure { context, .. } => context,
        }
    }

    pub fn value(&self) -> Option<&T> {
        match self {
            ParseResult::Success { value, .. } => Some(value),
            ParseResult::Failure { .. } => None,
        }
    }

    pub fn error(&self) -> Option<&ParseError> {
        match self {
            ParseResult::Success { .. } => None,
            ParseResult::Failure { error, .. } => Some(error),
        }
    }

    pub fn map_value<U, F: FnOnce(T) -> U>(self, transform: F) -> ParseResult<U, S> {
        match self {
            ParseResult::Success { value, context } => ParseResult::Success {
                value: transform(value),
                context,
            },
            ParseResult::Failure { error, context } => ParseResult::Failure { error, context },
        }
    }

    pub fn into_result(self) -> Result<(T, ParseContext<S>), (ParseError, ParseContext<S>)> {
        match self {
            ParseResult::Success { value, context } => Ok((value, context)),
            ParseResult::Failure { error, context } => Err((error, context)),
        }
    }

    pub fn into_value(self) -> Result<T, ParseError> {
        self.into_result()
            .map(|(value, _)| value)
            .map_err(|(error, _)| error)
    }
}
