//! Table-driven infix expression parsing.
//!
//! [`infix_parser`] turns an operand parser and an [`OperatorSpec`] into a
//! parser for whole infix expressions. Every precedence level becomes one
//! parser wrapping the next tighter level:
//!
//! ```text
//! level(n) := level(n+1) tail*
//! tail     := left_op  level(n+1)     -- folds to the left, may repeat
//!           | right_op level(n)       -- recurses to the right, ends the level
//!           | none_op  level(n+1)     -- at most once, ends the level
//! ```
//!
//! Left recursion never occurs: each level first parses one tighter operand
//! and then iterates. The innermost level parses the operand itself or, when
//! a [`Grouping`] is configured and the operand fails on its first token, a
//! delimited self-reference to the whole expression.

use std::rc::Rc;

use crate::lexer::Token;

use super::combinators::{BoxedParser, alternative, between, recursive, symbol, token};
use super::operators::{OperatorDescriptor, OperatorSpec, PrecedenceLevel};
use super::state::{ParseState, Parser};

/// Binary operator tree produced by [`infix_parser`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InfixTree<T> {
    Value(T),
    Node {
        operator: OperatorDescriptor,
        left: Box<InfixTree<T>>,
        right: Box<InfixTree<T>>,
    },
}

impl<T> InfixTree<T> {
    pub fn node(operator: OperatorDescriptor, left: InfixTree<T>, right: InfixTree<T>) -> Self {
        InfixTree::Node {
            operator,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// Delimiters that may enclose a complete infix expression.
pub struct Grouping {
    open: BoxedParser<()>,
    close: BoxedParser<()>,
}

impl Grouping {
    pub fn new<L: 'static, R: 'static>(open: BoxedParser<L>, close: BoxedParser<R>) -> Self {
        Self {
            open: open.map(|_| ()),
            close: close.map(|_| ()),
        }
    }

    pub fn parentheses() -> Self {
        Self::new(symbol("("), symbol(")"))
    }
}

type OperatorMatcher = Rc<dyn Fn(&Token) -> Option<String>>;

/// What followed an operand at one precedence level.
enum Tail<T> {
    /// Keep folding to the left.
    Left(OperatorDescriptor, InfixTree<T>),
    /// The right-hand side already absorbed the rest of the level.
    Final(OperatorDescriptor, InfixTree<T>),
}

/// Build a parser for infix expressions over `operand`.
///
/// `match_operator` extracts operator text from a token; the engine only
/// accepts the text when it names an operator of the level being parsed.
/// The table must already be validated.
pub fn infix_parser<T: 'static, M: Fn(&Token) -> Option<String> + 'static>(
    operand: BoxedParser<T>,
    table: &OperatorSpec,
    grouping: Option<Grouping>,
    match_operator: M,
) -> BoxedParser<InfixTree<T>> {
    let matcher: OperatorMatcher = Rc::new(match_operator);
    let levels = table.levels();

    recursive(move |whole| {
        let value = operand.map(InfixTree::Value);
        let mut current = match grouping {
            Some(Grouping { open, close }) => grouped(value, between(open, close, whole)),
            None => value,
        };

        // Innermost (tightest) level first; the loosest ends up outermost.
        for level in levels.iter().rev() {
            current = precedence_level(current, level, &matcher);
        }

        current
    })
}

/// `value`, or `group` when `value` fails without getting past its first
/// token. An operand that consumed the open delimiter and then failed would
/// fail the same way as a group, so the group is not retried.
fn grouped<T: 'static>(
    value: BoxedParser<InfixTree<T>>,
    group: BoxedParser<InfixTree<T>>,
) -> BoxedParser<InfixTree<T>> {
    BoxedParser::new(move |state: &mut ParseState| {
        let start = state.position();
        match value.parse(state) {
            Ok(tree) => Ok(tree),
            Err(err) if err.is_fatal() || err.position != start => Err(err),
            Err(first) => {
                state.restore(start);
                match group.parse(state) {
                    Ok(tree) => Ok(tree),
                    Err(second) if second.is_fatal() => Err(second),
                    Err(second) => {
                        state.restore(start);
                        Err(first.merge(second))
                    }
                }
            }
        }
    })
}

fn precedence_level<T: 'static>(
    tighter: BoxedParser<InfixTree<T>>,
    level: &PrecedenceLevel,
    matcher: &OperatorMatcher,
) -> BoxedParser<InfixTree<T>> {
    if level.is_empty() {
        return tighter;
    }

    log::trace!(
        "building precedence level {} (left: {}, right: {}, none: {})",
        level.precedence,
        level.left.len(),
        level.right.len(),
        level.none.len()
    );

    recursive(move |this| {
        let mut tails = Vec::new();

        if !level.left.is_empty() {
            tails.push(
                (operator(&level.left, matcher) + tighter.clone())
                    .map(|(op, rhs)| Tail::Left(op, rhs)),
            );
        }
        if !level.right.is_empty() {
            tails.push(
                (operator(&level.right, matcher) + this).map(|(op, rhs)| Tail::Final(op, rhs)),
            );
        }
        if !level.none.is_empty() {
            tails.push(
                (operator(&level.none, matcher) + tighter.clone())
                    .map(|(op, rhs)| Tail::Final(op, rhs)),
            );
        }

        let tail = alternative(tails);

        BoxedParser::new(move |state: &mut ParseState| {
            let mut acc = tighter.parse(state)?;

            loop {
                let pos = state.position();
                match tail.parse(state) {
                    Ok(Tail::Left(op, rhs)) => acc = InfixTree::node(op, acc, rhs),
                    Ok(Tail::Final(op, rhs)) => return Ok(InfixTree::node(op, acc, rhs)),
                    Err(err) if err.is_fatal() => return Err(err),
                    Err(_) => {
                        state.restore(pos);
                        return Ok(acc);
                    }
                }
            }
        })
    })
}

/// Match any operator of `group`.
fn operator(
    group: &[OperatorDescriptor],
    matcher: &OperatorMatcher,
) -> BoxedParser<OperatorDescriptor> {
    let parsers = group
        .iter()
        .map(|op| {
            let op = op.clone();
            let matcher = Rc::clone(matcher);
            let expected = format!("'{}'", op.symbol);
            token(
                move |tok| match matcher(tok) {
                    Some(text) if text == op.symbol => Some(op.clone()),
                    _ => None,
                },
                expected,
            )
        })
        .collect();

    alternative(parsers)
}
