//! Desugaring - Reduce infix operator trees to plain function calls
//!
//! Every infix use is sugar for a two-argument call on the operator's symbol
//! identifier:
//!
//! ```text
//! a + b * c   becomes   (+) a ((*) b c)
//! ```

use crate::ast::expression::{Expression, Identifier};
use crate::parser::infix::InfixTree;

/// Reduce an infix tree to an expression.
pub fn reduce(tree: InfixTree<Expression>) -> Expression {
    match tree {
        InfixTree::Value(expr) => expr,
        InfixTree::Node {
            operator,
            left,
            right,
        } => Expression::call(
            Expression::Identifier(Identifier::Symbol(operator.symbol)),
            vec![reduce(*left), reduce(*right)],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::operators::OperatorDescriptor;

    #[test]
    fn value_is_unchanged() {
        let expr = Expression::call(Expression::bare("f"), vec![Expression::integer("1")]);
        assert_eq!(reduce(InfixTree::Value(expr.clone())), expr);
    }

    #[test]
    fn node_becomes_symbol_call() {
        let tree = InfixTree::node(
            OperatorDescriptor::left("+", 6),
            InfixTree::Value(Expression::bare("a")),
            InfixTree::node(
                OperatorDescriptor::left("*", 7),
                InfixTree::Value(Expression::bare("b")),
                InfixTree::Value(Expression::bare("c")),
            ),
        );

        assert_eq!(
            reduce(tree),
            Expression::call(
                Expression::symbol("+"),
                vec![
                    Expression::bare("a"),
                    Expression::call(
                        Expression::symbol("*"),
                        vec![Expression::bare("b"), Expression::bare("c")]
                    ),
                ]
            )
        );
    }
}
