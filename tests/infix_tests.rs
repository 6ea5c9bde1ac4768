use letlang::ast::{Expression, Identifier};
use letlang::desugar::reduce;
use letlang::lexer::lex;
use letlang::parser::{
    BoxedParser, Failure, FailureKind, Grouping, InfixTree, OperatorDescriptor, OperatorSpec,
    ParseState, Parser, infix_parser, terminating, token,
};

fn operand() -> BoxedParser<Expression> {
    token(Identifier::bare_from_token, "operand").map(|name| Expression::bare(name))
}

fn parse_with(table: &OperatorSpec, input: &str, grouping: bool) -> Result<Expression, Failure> {
    let _ = env_logger::builder().is_test(true).try_init();
    let tokens = lex(input).expect("lexing failed");
    let parser = terminating(infix_parser(
        operand(),
        table,
        grouping.then(Grouping::parentheses),
        Identifier::symbol_from_token,
    )) >> reduce;
    parser.parse(&mut ParseState::new(tokens))
}

fn parse(table: &OperatorSpec, input: &str) -> Expression {
    parse_with(table, input, true).unwrap_or_else(|err| panic!("parsing {input:?} failed: {err:?}"))
}

fn binary(op: &str, left: Expression, right: Expression) -> Expression {
    Expression::call(Expression::symbol(op), vec![left, right])
}

fn var(name: &str) -> Expression {
    Expression::bare(name)
}

#[test]
fn single_operand() {
    let table = OperatorSpec::standard();
    assert_eq!(parse(&table, "a"), var("a"));
}

#[test]
fn empty_table_accepts_only_operands() {
    let table = OperatorSpec::default();
    assert_eq!(parse(&table, "a"), var("a"));
    assert_eq!(parse(&table, "((a))"), var("a"));

    let err = parse_with(&table, "a + b", true).unwrap_err();
    assert_eq!(err.kind, FailureKind::TrailingInput);
    assert_eq!(err.position, 1);
}

#[test]
fn tree_keeps_operator_descriptors() {
    let table = OperatorSpec::new(vec![OperatorDescriptor::left("+", 1)]);
    let tokens = lex("a + b").expect("lexing failed");
    let parser = infix_parser(operand(), &table, None, Identifier::symbol_from_token);

    let tree = parser.parse(&mut ParseState::new(tokens)).unwrap();
    assert_eq!(
        tree,
        InfixTree::node(
            OperatorDescriptor::left("+", 1),
            InfixTree::Value(var("a")),
            InfixTree::Value(var("b")),
        )
    );
}

#[test]
fn left_associative_operators_fold_left() {
    for symbol in ["+", "-", "<>", "|>", "**"] {
        for precedence in [-3, 0, 5] {
            let table = OperatorSpec::new(vec![OperatorDescriptor::left(symbol, precedence)]);
            let input = format!("a {symbol} b {symbol} c {symbol} d");

            assert_eq!(
                parse(&table, &input),
                binary(
                    symbol,
                    binary(symbol, binary(symbol, var("a"), var("b")), var("c")),
                    var("d")
                ),
                "{input} at precedence {precedence}"
            );
        }
    }
}

#[test]
fn right_associative_operators_fold_right() {
    for symbol in ["^", "$", "++", ":"] {
        for precedence in [-3, 0, 5] {
            let table = OperatorSpec::new(vec![OperatorDescriptor::right(symbol, precedence)]);
            let input = format!("a {symbol} b {symbol} c {symbol} d");

            assert_eq!(
                parse(&table, &input),
                binary(
                    symbol,
                    var("a"),
                    binary(symbol, var("b"), binary(symbol, var("c"), var("d")))
                ),
                "{input} at precedence {precedence}"
            );
        }
    }
}

#[test]
fn non_associative_operator_used_once() {
    let table = OperatorSpec::new(vec![OperatorDescriptor::non_associative("==", 4)]);
    assert_eq!(parse(&table, "a == b"), binary("==", var("a"), var("b")));
}

#[test]
fn non_associative_operator_cannot_chain() {
    let table = OperatorSpec::new(vec![OperatorDescriptor::non_associative("==", 4)]);

    let err = parse_with(&table, "a == b == c", true).unwrap_err();
    assert_eq!(err.kind, FailureKind::TrailingInput);
    assert_eq!(err.position, 3);
}

#[test]
fn higher_precedence_binds_tighter() {
    let pairs = [(1, 2), (-5, 0), (6, 7), (0, 100)];
    for (loose, tight) in pairs {
        let table = OperatorSpec::new(vec![
            OperatorDescriptor::left("+", loose),
            OperatorDescriptor::left("*", tight),
        ]);

        assert_eq!(
            parse(&table, "a + b * c"),
            binary("+", var("a"), binary("*", var("b"), var("c")))
        );
        assert_eq!(
            parse(&table, "a * b + c"),
            binary("+", binary("*", var("a"), var("b")), var("c"))
        );
    }
}

#[test]
fn declaration_order_does_not_matter() {
    let forward = OperatorSpec::new(vec![
        OperatorDescriptor::left("+", 6),
        OperatorDescriptor::left("*", 7),
        OperatorDescriptor::right("^", 8),
    ]);
    let mut reversed: Vec<OperatorDescriptor> = forward.iter().cloned().collect();
    reversed.reverse();
    let backward = OperatorSpec::new(reversed);

    for input in ["a + b * c ^ d", "a ^ b * c + d", "a * b ^ c ^ d + e * f"] {
        assert_eq!(parse(&forward, input), parse(&backward, input), "{input}");
    }
}

#[test]
fn grouping_overrides_precedence() {
    let table = OperatorSpec::standard();
    assert_eq!(
        parse(&table, "(a + b) * c"),
        binary("*", binary("+", var("a"), var("b")), var("c"))
    );
    assert_eq!(
        parse(&table, "a - (b - c)"),
        binary("-", var("a"), binary("-", var("b"), var("c")))
    );
    assert_eq!(
        parse(&table, "(a ^ b) ^ c"),
        binary("^", binary("^", var("a"), var("b")), var("c"))
    );
}

#[test]
fn grouping_is_optional() {
    let table = OperatorSpec::standard();
    assert!(parse_with(&table, "(a + b) * c", false).is_err());
    assert!(parse_with(&table, "a + b * c", false).is_ok());
}

#[test]
fn mixed_associativity_in_one_level() {
    let table = OperatorSpec::new(vec![
        OperatorDescriptor::left("+", 1),
        OperatorDescriptor::right("^", 1),
    ]);

    assert_eq!(
        parse(&table, "a + b ^ c"),
        binary("^", binary("+", var("a"), var("b")), var("c"))
    );
    assert_eq!(
        parse(&table, "a ^ b ^ c"),
        binary("^", var("a"), binary("^", var("b"), var("c")))
    );
}

#[test]
fn many_levels_nest_by_precedence() {
    let table: OperatorSpec = (1..=10)
        .map(|n| OperatorDescriptor::left("+".repeat(n), n as i32))
        .collect();

    assert_eq!(
        parse(&table, "a + b ++ c +++ d"),
        binary(
            "+",
            var("a"),
            binary("++", var("b"), binary("+++", var("c"), var("d")))
        )
    );
    assert_eq!(
        parse(&table, "a ++++++++++ b + c"),
        binary("+", binary("++++++++++", var("a"), var("b")), var("c"))
    );
}

#[test]
fn unknown_operator_is_left_unconsumed() {
    let table = OperatorSpec::new(vec![OperatorDescriptor::left("+", 1)]);

    let err = parse_with(&table, "a + b - c", true).unwrap_err();
    assert_eq!(err.kind, FailureKind::TrailingInput);
    assert_eq!(err.position, 3);
}

#[test]
fn missing_right_operand_fails() {
    let table = OperatorSpec::standard();
    let err = parse_with(&table, "a + ", true).unwrap_err();
    assert_eq!(err.kind, FailureKind::TrailingInput);
    assert_eq!(err.position, 1);
}

#[test]
fn unclosed_groups_fail_at_end_of_input() {
    let table = OperatorSpec::standard();
    let input = format!("{}a + b", "(".repeat(40));

    let err = parse_with(&table, &input, true).unwrap_err();
    assert_eq!(err.kind, FailureKind::Unexpected);
    assert_eq!(err.position, 43);
    assert_eq!(err.expected, vec!["')'".to_string()]);
}
