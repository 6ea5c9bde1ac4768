use crate::lexer::Token;

/// A name, either a plain word or an operator symbol used as a value (`(+)`).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Identifier {
    Bare(String),
    Symbol(String),
}

impl Identifier {
    pub fn bare(name: impl Into<String>) -> Self {
        Identifier::Bare(name.into())
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Identifier::Symbol(name.into())
    }

    pub fn name(&self) -> &str {
        match self {
            Identifier::Bare(name) | Identifier::Symbol(name) => name,
        }
    }

    /// Decode a bare word token.
    pub fn bare_from_token(token: &Token) -> Option<String> {
        match token {
            Token::Word(word) => Some(word.clone()),
            _ => None,
        }
    }

    /// Decode a symbol token.
    pub fn symbol_from_token(token: &Token) -> Option<String> {
        match token {
            Token::Symbol(symbol) => Some(symbol.clone()),
            _ => None,
        }
    }
}

/// Literal values are kept in their source spelling.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Literal {
    Integer(String),
    String(String),
}

impl Literal {
    pub fn from_token(token: &Token) -> Option<Literal> {
        match token {
            Token::Integer(digits) => Some(Literal::Integer(digits.clone())),
            Token::Str(text) => Some(Literal::String(text.clone())),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Expression {
    Identifier(Identifier),
    Literal(Literal),
    Call(Call),
    Lambda(Lambda),
}

/// Curried application: `function` applied to `arguments` left to right.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Call {
    pub function: Box<Expression>,
    pub arguments: Vec<Expression>,
}

/// Single-argument anonymous function.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lambda {
    pub argument: Identifier,
    pub body: Box<Expression>,
}

impl Expression {
    pub fn bare(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::bare(name))
    }

    pub fn symbol(name: impl Into<String>) -> Self {
        Expression::Identifier(Identifier::symbol(name))
    }

    pub fn integer(digits: impl Into<String>) -> Self {
        Expression::Literal(Literal::Integer(digits.into()))
    }

    pub fn string(text: impl Into<String>) -> Self {
        Expression::Literal(Literal::String(text.into()))
    }

    pub fn call(function: Expression, arguments: Vec<Expression>) -> Self {
        Expression::Call(Call {
            function: Box::new(function),
            arguments,
        })
    }

    pub fn lambda(argument: Identifier, body: Expression) -> Self {
        Expression::Lambda(Lambda {
            argument,
            body: Box::new(body),
        })
    }

    /// `true` for leaves that never need parentheses when printed.
    pub fn is_atomic(&self) -> bool {
        matches!(self, Expression::Identifier(_) | Expression::Literal(_))
    }
}
