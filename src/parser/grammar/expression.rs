//! Expression parsers

use crate::ast::expression::{Expression, Identifier};
use crate::desugar::reduce;

use crate::parser::combinators::{
    BoxedParser, alternative, between, critical, many1, recursive, symbol,
};
use crate::parser::context::ParsingContext;
use crate::parser::infix::{Grouping, infix_parser};

use super::literal::{bare_word, identifier, literal};

/// expression := lambda | infix_expression
///
/// The returned parser refers to itself through parenthesized sub-expressions
/// and lambda bodies.
pub fn expression(context: &ParsingContext) -> BoxedParser<Expression> {
    recursive(|expression| {
        let tight = tightly_bound_expression(context, expression.clone());
        let infix = infix_expression(context, call_expression(tight));
        lambda(context, expression) | infix
    })
}

/// tightly_bound := identifier | literal | "(" expression ")"
pub fn tightly_bound_expression(
    context: &ParsingContext,
    expression: BoxedParser<Expression>,
) -> BoxedParser<Expression> {
    alternative(vec![
        identifier(context) >> Expression::Identifier,
        literal() >> Expression::Literal,
        between(symbol("("), symbol(")"), expression),
    ])
    .label("expression")
}

/// call := tightly_bound tightly_bound*
///
/// `f x y` is `f` applied to `[x, y]`; a single term is returned as is.
pub fn call_expression(tight: BoxedParser<Expression>) -> BoxedParser<Expression> {
    many1(tight).map(|mut terms| {
        let function = terms.remove(0);
        if terms.is_empty() {
            function
        } else {
            Expression::call(function, terms)
        }
    })
}

/// infix_expression := call (operator call)*, shaped by the operator table
pub fn infix_expression(
    context: &ParsingContext,
    operand: BoxedParser<Expression>,
) -> BoxedParser<Expression> {
    infix_parser(
        operand,
        context.operators(),
        Some(Grouping::parentheses()),
        Identifier::symbol_from_token,
    ) >> reduce
}

/// lambda := "\" bare_word "->" expression
///
/// Everything after the backslash is committed.
pub fn lambda(
    context: &ParsingContext,
    expression: BoxedParser<Expression>,
) -> BoxedParser<Expression> {
    let rest = (bare_word(context) + (symbol("->") * expression))
        .map(|(argument, body)| Expression::lambda(Identifier::Bare(argument), body));
    symbol("\\") * critical(rest)
}
