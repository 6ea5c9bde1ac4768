//! Pretty printer for source code
//!
//! This module provides Display implementations for the AST. A two-argument
//! call on an operator symbol is printed infix; every compound operand or
//! argument is parenthesized, so no precedence knowledge is needed to read
//! the output back.

use std::fmt::{self, Display};

use crate::ast::{
    Program,
    expression::{Call, Expression, Identifier, Lambda, Literal},
    statement::{Binding, Statement},
};

struct Formatter {
    buffer: String,
}

impl Formatter {
    fn new() -> Self {
        Self {
            buffer: String::new(),
        }
    }

    fn write_str(&mut self, s: &str) {
        self.buffer.push_str(s);
    }

    fn write_newline(&mut self) {
        self.buffer.push('\n');
    }

    fn finish(self) -> String {
        self.buffer
    }
}

impl Display for Program {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();

        for (i, statement) in self.statements.iter().enumerate() {
            if i > 0 {
                formatter.write_newline();
            }
            format_statement(statement, &mut formatter);
        }

        f.write_str(&formatter.finish())
    }
}

impl Display for Statement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_statement(self, &mut formatter);
        f.write_str(&formatter.finish())
    }
}

impl Display for Expression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_expression(self, &mut formatter);
        f.write_str(&formatter.finish())
    }
}

impl Display for Identifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_identifier(self, &mut formatter);
        f.write_str(&formatter.finish())
    }
}

impl Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut formatter = Formatter::new();
        format_literal(self, &mut formatter);
        f.write_str(&formatter.finish())
    }
}

fn format_statement(statement: &Statement, fmt: &mut Formatter) {
    match statement {
        Statement::Binding(Binding { name, value }) => {
            fmt.write_str("let ");
            format_identifier(name, fmt);
            fmt.write_str(" = ");
            format_expression(value, fmt);
        }
    }
}

fn format_identifier(identifier: &Identifier, fmt: &mut Formatter) {
    match identifier {
        Identifier::Bare(name) => fmt.write_str(name),
        Identifier::Symbol(symbol) => {
            fmt.write_str("(");
            fmt.write_str(symbol);
            fmt.write_str(")");
        }
    }
}

fn format_literal(literal: &Literal, fmt: &mut Formatter) {
    match literal {
        Literal::Integer(digits) => fmt.write_str(digits),
        Literal::String(text) => {
            fmt.write_str("\"");
            fmt.write_str(text);
            fmt.write_str("\"");
        }
    }
}

fn format_expression(expr: &Expression, fmt: &mut Formatter) {
    match expr {
        Expression::Identifier(identifier) => format_identifier(identifier, fmt),
        Expression::Literal(literal) => format_literal(literal, fmt),
        Expression::Call(call) => format_call(call, fmt),
        Expression::Lambda(lambda) => format_lambda(lambda, fmt),
    }
}

/// Format in a position that binds tighter than anything compound.
fn format_operand(expr: &Expression, fmt: &mut Formatter) {
    if expr.is_atomic() {
        format_expression(expr, fmt);
    } else {
        fmt.write_str("(");
        format_expression(expr, fmt);
        fmt.write_str(")");
    }
}

fn format_call(call: &Call, fmt: &mut Formatter) {
    // (op) l r  prints as  l op r
    if let Expression::Identifier(Identifier::Symbol(symbol)) = call.function.as_ref()
        && let [left, right] = call.arguments.as_slice()
    {
        format_operand(left, fmt);
        fmt.write_str(" ");
        fmt.write_str(symbol);
        fmt.write_str(" ");
        format_operand(right, fmt);
        return;
    }

    format_operand(&call.function, fmt);
    for arg in &call.arguments {
        fmt.write_str(" ");
        format_operand(arg, fmt);
    }
}

fn format_lambda(lambda: &Lambda, fmt: &mut Formatter) {
    fmt.write_str("\\");
    format_identifier(&lambda.argument, fmt);
    fmt.write_str(" -> ");
    format_expression(&lambda.body, fmt);
}
