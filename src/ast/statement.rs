use crate::ast::expression::{Expression, Identifier};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Statement {
    Binding(Binding),
}

/// `let name = value`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Binding {
    pub name: Identifier,
    pub value: Expression,
}

impl Statement {
    pub fn binding(name: Identifier, value: Expression) -> Self {
        Statement::Binding(Binding { name, value })
    }
}
