pub mod expression;
pub mod statement;

pub use expression::{Call, Expression, Identifier, Lambda, Literal};
pub use statement::{Binding, Statement};

/// A parsed program. Statements are kept in source order; later bindings may
/// shadow earlier ones.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Program {
    pub statements: Vec<Statement>,
}

impl Program {
    pub fn new(statements: Vec<Statement>) -> Self {
        Self { statements }
    }

    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
