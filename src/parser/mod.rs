pub mod combinators;
pub mod context;
pub mod grammar;
pub mod infix;
pub mod operators;
pub mod state;

pub use combinators::*;
pub use context::{LET_KEYWORD, ParsingContext};
pub use infix::{Grouping, InfixTree, infix_parser};
pub use operators::{
    Associativity, OperatorDescriptor, OperatorError, OperatorSpec, PrecedenceLevel,
};
pub use state::{Failure, FailureKind, ParseError, ParseResult, ParseState, Parser, Severity};
