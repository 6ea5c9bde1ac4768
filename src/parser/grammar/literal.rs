//! Identifier and literal parsers

use std::collections::HashSet;
use std::rc::Rc;

use crate::ast::expression::{Identifier, Literal};

use crate::parser::combinators::{BoxedParser, between, symbol, token};
use crate::parser::context::ParsingContext;

/// Parse a bare word that is not a reserved keyword
pub fn bare_word(context: &ParsingContext) -> BoxedParser<String> {
    let keywords: Rc<HashSet<String>> = Rc::new(context.keywords().clone());
    token(Identifier::bare_from_token, "identifier")
        .filter(move |word| !keywords.contains(word), "identifier")
}

/// Parse a declared operator written as a value: "(" symbol ")"
pub fn operator_name(context: &ParsingContext) -> BoxedParser<String> {
    let symbols: Rc<HashSet<String>> = Rc::new(context.symbols().clone());
    let declared = token(Identifier::symbol_from_token, "operator")
        .filter(move |name| symbols.contains(name), "declared operator");
    between(symbol("("), symbol(")"), declared)
}

/// identifier := bare_word | "(" operator ")"
pub fn identifier(context: &ParsingContext) -> BoxedParser<Identifier> {
    let bare = bare_word(context) >> Identifier::Bare;
    let operator = operator_name(context) >> Identifier::Symbol;
    (bare | operator).label("identifier")
}

/// Parse an integer or string literal
pub fn literal() -> BoxedParser<Literal> {
    token(Literal::from_token, "literal")
}
