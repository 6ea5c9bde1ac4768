use std::collections::HashSet;

use crate::ast::{Expression, Program};
use crate::lexer::Token;

use super::combinators::{BoxedParser, terminating};
use super::grammar;
use super::operators::{OperatorError, OperatorSpec};
use super::state::{ParseError, ParseState, Parser};

pub const LET_KEYWORD: &str = "let";

/// Everything needed to parse one language configuration.
///
/// Holds no mutable state, so a single context can serve any number of
/// parses, including from several threads at once.
#[derive(Debug, Clone)]
pub struct ParsingContext {
    operators: OperatorSpec,
    symbols: HashSet<String>,
    keywords: HashSet<String>,
}

impl ParsingContext {
    pub fn new(operators: OperatorSpec) -> Result<Self, OperatorError> {
        operators.validate()?;
        let symbols = operators.symbols();

        Ok(Self {
            operators,
            symbols,
            keywords: HashSet::from([LET_KEYWORD.to_string()]),
        })
    }

    /// A context for [`OperatorSpec::standard`].
    pub fn standard() -> Self {
        let operators = OperatorSpec::standard();
        Self {
            symbols: operators.symbols(),
            operators,
            keywords: HashSet::from([LET_KEYWORD.to_string()]),
        }
    }

    pub fn operators(&self) -> &OperatorSpec {
        &self.operators
    }

    pub fn symbols(&self) -> &HashSet<String> {
        &self.symbols
    }

    pub fn keywords(&self) -> &HashSet<String> {
        &self.keywords
    }

    pub fn is_keyword(&self, word: &str) -> bool {
        self.keywords.contains(word)
    }

    pub fn is_operator(&self, symbol: &str) -> bool {
        self.symbols.contains(symbol)
    }

    /// Parse a complete program.
    pub fn parse(&self, tokens: Vec<Token>) -> Result<Program, ParseError> {
        log::debug!("parsing program from {} tokens", tokens.len());
        let program = run(grammar::program(self), tokens)?;
        log::debug!("parsed {} statements", program.len());
        Ok(program)
    }

    /// Parse a single expression spanning all of `tokens`.
    pub fn parse_expression(&self, tokens: Vec<Token>) -> Result<Expression, ParseError> {
        run(terminating(grammar::expression(self)), tokens)
    }
}

fn run<T: 'static>(parser: BoxedParser<T>, tokens: Vec<Token>) -> Result<T, ParseError> {
    let mut state = ParseState::new(tokens);
    match parser.parse(&mut state) {
        Ok(value) => Ok(value),
        Err(failure) => {
            let error = state.diagnose(failure);
            log::debug!("parse failed: {error}");
            Err(error)
        }
    }
}
