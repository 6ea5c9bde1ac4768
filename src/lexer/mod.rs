//! Tokenization of source text.
//!
//! The raw tokens come from the `lachs` derive. Each source line is lexed on its
//! own so that line breaks, which terminate statements, survive as explicit
//! [`Token::Newline`] tokens.

use lachs::Span;
use thiserror::Error;

#[lachs::token]
pub enum RawToken {
    #[literal("[a-zA-Z_][a-zA-Z0-9_']*")]
    Word,
    #[literal("[0-9]+")]
    Integer,
    #[literal(r#""([^"\\]|\\.)*""#)]
    StringLiteral,
    #[literal(r"[-+*/^<>=!&|.:$%~?@#]+")]
    Operator,
    #[terminal("\\")]
    Backslash,
    #[terminal("(")]
    LParen,
    #[terminal(")")]
    RParen,
}

impl RawToken {
    pub fn pos(&self) -> Span {
        match self {
            RawToken::Word(inner) => inner.position.clone(),
            RawToken::Integer(inner) => inner.position.clone(),
            RawToken::StringLiteral(inner) => inner.position.clone(),
            RawToken::Operator(inner) => inner.position.clone(),
            RawToken::Backslash(inner) => inner.position.clone(),
            RawToken::LParen(inner) => inner.position.clone(),
            RawToken::RParen(inner) => inner.position.clone(),
        }
    }
}

/// A token as seen by the parser.
///
/// Punctuation (`(`, `)`, `\`, `=`, `->`) and operators share the
/// [`Token::Symbol`] variant; the grammar tells them apart by text.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Token {
    Word(String),
    Symbol(String),
    Integer(String),
    Str(String),
    Newline,
}

impl Token {
    pub fn symbol(text: impl Into<String>) -> Self {
        Token::Symbol(text.into())
    }

    pub fn word(text: impl Into<String>) -> Self {
        Token::Word(text.into())
    }

    /// Returns a human-readable description of the token
    pub fn describe(&self) -> String {
        match self {
            Token::Word(word) => format!("word '{word}'"),
            Token::Symbol(symbol) => format!("'{symbol}'"),
            Token::Integer(digits) => format!("integer '{digits}'"),
            Token::Str(text) => format!("string \"{text}\""),
            Token::Newline => "newline".to_string(),
        }
    }
}

impl From<RawToken> for Token {
    fn from(raw: RawToken) -> Self {
        match raw {
            RawToken::Word(inner) => Token::Word(inner.value),
            RawToken::Integer(inner) => Token::Integer(inner.value),
            RawToken::StringLiteral(inner) => Token::Str(strip_quotes(&inner.value).to_string()),
            RawToken::Operator(inner) => Token::Symbol(inner.value),
            RawToken::Backslash(_) => Token::symbol("\\"),
            RawToken::LParen(_) => Token::symbol("("),
            RawToken::RParen(_) => Token::symbol(")"),
        }
    }
}

fn strip_quotes(value: &str) -> &str {
    value
        .strip_prefix('"')
        .and_then(|rest| rest.strip_suffix('"'))
        .unwrap_or(value)
}

/// A lexing failure located on a source line. The per-line `LexError` that
/// `lachs` generates for [`RawToken`] is folded into `message`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("lexing failed on line {line}: {message}")]
pub struct SourceError {
    pub line: usize,
    pub message: String,
}

/// A line consisting only of a `--` comment.
fn is_comment(line: &str) -> bool {
    match line.strip_prefix("--") {
        Some(rest) => rest.is_empty() || rest.starts_with(char::is_whitespace),
        None => false,
    }
}

/// Tokenize `source`, emitting one [`Token::Newline`] between consecutive
/// non-blank lines.
pub fn lex(source: &str) -> Result<Vec<Token>, SourceError> {
    let mut tokens = Vec::new();

    for (index, line) in source.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || is_comment(trimmed) {
            continue;
        }

        let raw = RawToken::lex(trimmed).map_err(|err| SourceError {
            line: index + 1,
            message: err.to_string(),
        })?;

        if raw.is_empty() {
            continue;
        }
        if !tokens.is_empty() {
            tokens.push(Token::Newline);
        }

        for raw_token in raw {
            let span = raw_token.pos();
            let token = Token::from(raw_token);
            log::trace!("line {}: lexed {:?} at {:?}", index + 1, token, span);
            tokens.push(token);
        }
    }

    Ok(tokens)
}
