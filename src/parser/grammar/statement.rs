//! Statement parsers

use crate::ast::expression::Expression;
use crate::ast::statement::Statement;

use crate::parser::combinators::{BoxedParser, critical, keyword, symbol};
use crate::parser::context::{LET_KEYWORD, ParsingContext};

use super::literal::identifier;

/// binding := "let" identifier "=" expression
///
/// Once `let` has matched, any later failure is a real syntax error.
pub fn binding(
    context: &ParsingContext,
    expression: BoxedParser<Expression>,
) -> BoxedParser<Statement> {
    let rest = ((identifier(context) - symbol("=")) + expression)
        .map(|(name, value)| Statement::binding(name, value));
    keyword(LET_KEYWORD) * critical(rest)
}

/// statement := binding
pub fn statement(
    context: &ParsingContext,
    expression: BoxedParser<Expression>,
) -> BoxedParser<Statement> {
    binding(context, expression).label("statement")
}
