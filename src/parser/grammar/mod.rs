//! Grammar for the language
//!
//! This module contains all the parsing rules organized by category:
//! - `literal`: identifiers (bare and parenthesized operators) and literals
//! - `expression`: lambdas, application and infix expressions
//! - `statement`: `let` bindings
//!
//! ```text
//! program       := binding (newline binding)*
//! binding       := "let" identifier "=" expression
//! expression    := lambda | infix
//! lambda        := "\" word "->" expression
//! infix         := call (operator call)*          -- shaped by the operator table
//! call          := tightly_bound tightly_bound*
//! tightly_bound := identifier | literal | "(" expression ")"
//! identifier    := word | "(" operator ")"
//! ```

mod expression;
mod literal;
mod statement;

pub use expression::{
    call_expression, expression, infix_expression, lambda, tightly_bound_expression,
};
pub use literal::{bare_word, identifier, literal, operator_name};
pub use statement::{binding, statement};

use crate::ast::Program;

use super::combinators::{BoxedParser, newline, separated_by, terminating};
use super::context::ParsingContext;

/// program := statement (newline statement)*
///
/// The whole token stream must be consumed.
pub fn program(context: &ParsingContext) -> BoxedParser<Program> {
    let expression = expression(context);
    let statements = separated_by(statement(context, expression), newline());
    terminating(statements) >> Program::new
}
