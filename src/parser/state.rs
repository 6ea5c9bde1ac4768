use thiserror::Error;

use crate::lexer::Token;

/// Whether a failure may be recovered from by trying a sibling alternative.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Recoverable,
    Fatal,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    Unexpected,
    TrailingInput,
}

/// Internal failure value threaded through the combinators.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Failure {
    /// Token index at which the failure was detected.
    pub position: usize,
    pub expected: Vec<String>,
    /// Description of the offending token, `None` at end of input.
    pub found: Option<String>,
    pub severity: Severity,
    pub kind: FailureKind,
}

impl Failure {
    pub fn new(position: usize) -> Self {
        Self {
            position,
            expected: Vec::new(),
            found: None,
            severity: Severity::Recoverable,
            kind: FailureKind::Unexpected,
        }
    }

    pub fn expected(mut self, expected: impl Into<String>) -> Self {
        let expected = expected.into();
        if !self.expected.contains(&expected) {
            self.expected.push(expected);
        }
        self
    }

    pub fn found(mut self, found: impl Into<String>) -> Self {
        self.found = Some(found.into());
        self
    }

    pub fn trailing(mut self) -> Self {
        self.kind = FailureKind::TrailingInput;
        self
    }

    pub fn is_fatal(&self) -> bool {
        self.severity == Severity::Fatal
    }

    /// Turn a recoverable failure into a fatal one.
    pub fn promote(mut self) -> Self {
        self.severity = Severity::Fatal;
        self
    }

    /// Combine the failures of two sibling alternatives. The deeper one wins;
    /// at the same position the expectations are united.
    pub fn merge(self, other: Failure) -> Failure {
        if self.position > other.position {
            return self;
        }
        if other.position > self.position {
            return other;
        }

        let mut merged = self;
        for expected in other.expected {
            if !merged.expected.contains(&expected) {
                merged.expected.push(expected);
            }
        }
        if merged.found.is_none() {
            merged.found = other.found;
        }
        if other.severity == Severity::Fatal {
            merged.severity = Severity::Fatal;
        }
        merged
    }
}

/// Error returned from [`crate::ParsingContext::parse`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("syntax error at token {position}: expected {}, found {found}", describe_expected(.expected))]
    Syntax {
        position: usize,
        expected: Vec<String>,
        found: String,
    },
    #[error("unexpected trailing input at token {position}: {found}{}", describe_hint(.expected))]
    TrailingInput {
        position: usize,
        found: String,
        expected: Vec<String>,
    },
}

impl ParseError {
    pub fn position(&self) -> usize {
        match self {
            ParseError::Syntax { position, .. } | ParseError::TrailingInput { position, .. } => {
                *position
            }
        }
    }
}

fn describe_expected(expected: &[String]) -> String {
    match expected {
        [] => "something else".to_string(),
        [single] => single.clone(),
        [init @ .., last] => format!("{} or {}", init.join(", "), last),
    }
}

fn describe_hint(expected: &[String]) -> String {
    if expected.is_empty() {
        String::new()
    } else {
        format!(" (expected {})", describe_expected(expected))
    }
}

impl From<Failure> for ParseError {
    fn from(failure: Failure) -> Self {
        let found = failure
            .found
            .unwrap_or_else(|| "end of input".to_string());
        match failure.kind {
            FailureKind::Unexpected => ParseError::Syntax {
                position: failure.position,
                expected: failure.expected,
                found,
            },
            FailureKind::TrailingInput => ParseError::TrailingInput {
                position: failure.position,
                found,
                expected: failure.expected,
            },
        }
    }
}

pub type ParseResult<T> = Result<T, Failure>;

/// Cursor over an immutable token sequence.
pub struct ParseState {
    tokens: Vec<Token>,
    index: usize,
    furthest: Option<Failure>,
}

impl ParseState {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            index: 0,
            furthest: None,
        }
    }

    pub fn advance(&mut self) -> Option<Token> {
        if self.has_next() {
            let token = self.tokens[self.index].clone();
            self.index += 1;
            Some(token)
        } else {
            None
        }
    }

    pub fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn has_next(&self) -> bool {
        self.index < self.tokens.len()
    }

    pub fn position(&self) -> usize {
        self.index
    }

    pub fn restore(&mut self, position: usize) {
        self.index = position;
    }

    /// A recoverable failure at the cursor, describing the current token.
    pub fn failure_here(&self, expected: impl Into<String>) -> Failure {
        let failure = Failure::new(self.index).expected(expected);
        match self.peek() {
            Some(token) => failure.found(token.describe()),
            None => failure,
        }
    }

    /// Remember `failure` if it is at least as deep as anything seen so far.
    pub fn record_error(&mut self, failure: &Failure) {
        let furthest = match self.furthest.take() {
            Some(previous) => previous.merge(failure.clone()),
            None => failure.clone(),
        };
        self.furthest = Some(furthest);
    }

    pub fn get_furthest_error(&self) -> Option<&Failure> {
        self.furthest.as_ref()
    }

    /// Choose the failure to report for a parse that ended in `failure`.
    pub fn diagnose(&self, failure: Failure) -> ParseError {
        if failure.is_fatal() {
            return failure.into();
        }

        match (failure.kind, &self.furthest) {
            (FailureKind::TrailingInput, Some(furthest)) if furthest.position == failure.position => {
                let mut failure = failure;
                failure.expected = furthest.expected.clone();
                failure.into()
            }
            // A rule stopped early; the deeper failure explains what is left over.
            (_, Some(furthest)) if furthest.position > failure.position => {
                let mut furthest = furthest.clone();
                furthest.kind = FailureKind::Unexpected;
                furthest.into()
            }
            _ => failure.into(),
        }
    }
}

pub trait Parser<T>: Sized {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T>;
}

impl<T, F: Fn(&mut ParseState) -> ParseResult<T>> Parser<T> for F {
    fn parse(&self, state: &mut ParseState) -> ParseResult<T> {
        self(state)
    }
}
