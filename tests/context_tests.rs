use std::thread;

use letlang::ParsingContext;
use letlang::ast::{Expression, Statement};
use letlang::lexer::lex;
use letlang::parser::{OperatorDescriptor, OperatorError, OperatorSpec};

fn assert_send_sync<T: Send + Sync>() {}

#[test]
fn context_is_send_and_sync() {
    assert_send_sync::<ParsingContext>();
}

#[test]
fn context_rejects_invalid_tables() {
    let duplicate = OperatorSpec::new(vec![
        OperatorDescriptor::left("+", 6),
        OperatorDescriptor::left("+", 7),
    ]);
    assert_eq!(
        ParsingContext::new(duplicate).unwrap_err(),
        OperatorError::DuplicateSymbol("+".to_string())
    );

    let reserved = OperatorSpec::new(vec![OperatorDescriptor::right("->", 1)]);
    assert_eq!(
        ParsingContext::new(reserved).unwrap_err(),
        OperatorError::ReservedSymbol("->".to_string())
    );
}

#[test]
fn context_knows_keywords_and_operators() {
    let context = ParsingContext::standard();

    assert!(context.is_keyword("let"));
    assert!(!context.is_keyword("x"));
    assert!(context.is_operator("+"));
    assert!(context.is_operator("$"));
    assert!(!context.is_operator("<+>"));
    assert_eq!(context.symbols().len(), context.operators().len());
}

#[test]
fn custom_table_changes_parse() {
    let spec: OperatorSpec = "<+> 3 left\n<*> 5 right".parse().unwrap();
    let context = ParsingContext::new(spec).unwrap();

    let program = context
        .parse(lex("let x = a <+> b <*> c <*> d").unwrap())
        .unwrap();
    let Statement::Binding(binding) = &program.statements[0];

    let op = |symbol: &str, l: Expression, r: Expression| {
        Expression::call(Expression::symbol(symbol), vec![l, r])
    };
    assert_eq!(
        binding.value,
        op(
            "<+>",
            Expression::bare("a"),
            op(
                "<*>",
                Expression::bare("b"),
                op("<*>", Expression::bare("c"), Expression::bare("d"))
            )
        )
    );

    // `+` is not part of this table.
    assert!(context.parse(lex("let x = a + b").unwrap()).is_err());
    assert!(context.parse(lex("let f = (<+>)").unwrap()).is_ok());
}

#[test]
fn context_is_reusable() {
    let context = ParsingContext::standard();

    let first = context.parse(lex("let x = 1 + 2").unwrap()).unwrap();
    assert!(context.parse(lex("let = 2").unwrap()).is_err());
    let second = context.parse(lex("let x = 1 + 2").unwrap()).unwrap();

    assert_eq!(first, second);
}

#[test]
fn context_shared_between_threads() {
    let context = ParsingContext::standard();
    let sources = [
        "let a = 1 + 2 * 3",
        r"let f = \x -> x ^ 2",
        "let g = map (+) xs",
        "let h = f $ g $ h x",
    ];

    let expected: Vec<_> = sources
        .iter()
        .map(|source| context.parse(lex(source).unwrap()).unwrap())
        .collect();

    thread::scope(|scope| {
        let handles: Vec<_> = sources
            .iter()
            .map(|source| {
                let context = &context;
                scope.spawn(move || context.parse(lex(source).unwrap()).unwrap())
            })
            .collect();

        for (handle, expected) in handles.into_iter().zip(expected) {
            assert_eq!(handle.join().unwrap(), expected);
        }
    });
}
