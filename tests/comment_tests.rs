use letlang::lexer::{Token, lex};

#[test]
fn comment_line_ignored() {
    let source = r#"
        -- This is a comment
        let x = 42
    "#;

    let tokens = lex(source).unwrap();

    let has_comment = tokens
        .iter()
        .any(|t| matches!(t, Token::Word(w) if w == "This" || w == "comment"));
    assert!(!has_comment, "Comment tokens should be stripped");
    assert_eq!(tokens.first(), Some(&Token::word("let")));
}

#[test]
fn comment_between_statements_adds_no_newline() {
    let source = "let x = 1\n-- explain y\nlet y = 2";
    let tokens = lex(source).unwrap();

    assert_eq!(
        tokens.iter().filter(|t| **t == Token::Newline).count(),
        1
    );
}

#[test]
fn empty_comment_line() {
    let tokens = lex("--\nlet x = 1").unwrap();
    assert_eq!(tokens.first(), Some(&Token::word("let")));
}

#[test]
fn operator_starting_with_dashes_is_not_a_comment() {
    let tokens = lex("-->").unwrap();
    assert_eq!(tokens, vec![Token::symbol("-->")]);
}
