//! # letlang - a small let-binding expression language
//!
//! The crate parses programs made of `let` bindings whose right-hand sides are
//! curried applications, single-argument lambdas and infix expressions over a
//! runtime-supplied operator table.
//!
//! ## Pipeline
//!
//! ```text
//! Source Code (String)
//!     ↓
//! [Lexer] → Token Stream
//!     ↓
//! [Parser] → Program (statements in source order)
//! ```
//!
//! ## Key Design Decisions
//!
//! ### Combinator Engine
//! Parsers are boxed closures over a token cursor ([`parser::ParseState`]).
//! Failures are either recoverable, which lets an alternative try its next
//! branch, or fatal. [`parser::critical`] promotes failures to fatal once a
//! rule has matched an unambiguous anchor such as `let` or `\`, so a precise
//! error is never traded for a vaguer one from an unrelated branch.
//!
//! ### Operator Tables
//! Infix operators are not baked into the grammar. An
//! [`parser::OperatorSpec`] lists `(symbol, precedence, associativity)`
//! triples and [`parser::infix_parser`] builds one parser per precedence
//! level. The resulting operator trees are reduced to ordinary calls:
//! `a + b` is the same expression as `(+) a b`.
//!
//! ## Example Program
//!
//! ```text
//! let twice = \f -> \x -> f (f x)
//! let inc = \n -> n + 1
//! let four = twice inc 2
//! let compose = (.)
//! ```
//!
//! ## Getting Started
//!
//! ```
//! use letlang::{ParsingContext, lexer::lex};
//!
//! let context = ParsingContext::standard();
//! let tokens = lex("let x = 1 + 2 * 3").unwrap();
//! let program = context.parse(tokens).unwrap();
//! assert_eq!(program.to_string(), "let x = 1 + (2 * 3)");
//! ```

pub mod ast;
pub mod desugar;
pub mod fmt;
pub mod lexer;
pub mod parser;

pub use parser::{ParseError, ParsingContext};
