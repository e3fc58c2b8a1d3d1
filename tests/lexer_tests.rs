use ruspal::lexer::{tokenize, LexError, TokenKind};

#[test]
fn keywords_and_identifiers() {
    let tokens = tokenize("let letx gr grade in").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Keyword,
            TokenKind::Identifier,
            TokenKind::Keyword,
        ]
    );
    assert_eq!(tokens[1].value, "letx");
    assert_eq!(tokens[3].value, "grade");
}

#[test]
fn identifiers_may_contain_digits_and_underscores() {
    let tokens = tokenize("abc_1 x2y").unwrap();
    assert_eq!(tokens.len(), 2);
    assert_eq!(tokens[0].value, "abc_1");
    assert_eq!(tokens[1].value, "x2y");
}

#[test]
fn integers() {
    let tokens = tokenize("0 42 007").unwrap();
    assert!(tokens.iter().all(|t| t.kind == TokenKind::Integer));
    assert_eq!(tokens[2].value, "007");
}

#[test]
fn operator_clusters_are_maximal() {
    let tokens = tokenize("a ** b -> c >= d").unwrap();
    let operators: Vec<_> = tokens
        .iter()
        .filter(|t| t.kind == TokenKind::Operator)
        .map(|t| t.value.as_str())
        .collect();
    assert_eq!(operators, vec!["**", "->", ">="]);
}

#[test]
fn punctuation_is_not_part_of_clusters() {
    let tokens = tokenize("f(x);").unwrap();
    let kinds: Vec<_> = tokens.iter().map(|t| t.kind).collect();
    assert_eq!(
        kinds,
        vec![
            TokenKind::Identifier,
            TokenKind::LParen,
            TokenKind::Identifier,
            TokenKind::RParen,
            TokenKind::Semicolon,
        ]
    );
}

#[test]
fn strings_keep_escapes_verbatim() {
    let tokens = tokenize(r"'a\nb'").unwrap();
    assert_eq!(tokens.len(), 1);
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].value, r"a\nb");
}

#[test]
fn empty_string_literal() {
    let tokens = tokenize("''").unwrap();
    assert_eq!(tokens[0].kind, TokenKind::Str);
    assert_eq!(tokens[0].value, "");
}

#[test]
fn strings_may_contain_spaces_and_punctuation() {
    let tokens = tokenize("' world, (two)'").unwrap();
    assert_eq!(tokens[0].value, " world, (two)");
}

#[test]
fn comments_run_to_end_of_line() {
    let tokens = tokenize("1 // ignore ' all ( of * this\n2").unwrap();
    let values: Vec<_> = tokens.iter().map(|t| t.value.as_str()).collect();
    assert_eq!(values, vec!["1", "2"]);
}

#[test]
fn line_numbers_advance_over_newlines_and_comments() {
    let tokens = tokenize("let x = 1\n// comment\nin x").unwrap();
    let keyword_in = tokens.iter().find(|t| t.is_keyword("in")).unwrap();
    assert_eq!(keyword_in.line, 3);
    assert_eq!(tokens[0].line, 1);
}

#[test]
fn unterminated_string_is_an_error() {
    let err = tokenize("'no end").unwrap_err();
    assert_eq!(err, LexError::UnterminatedString { line: 1 });
}

#[test]
fn unexpected_character_is_an_error() {
    let err = tokenize("a ` b").unwrap_err();
    assert_eq!(
        err,
        LexError::UnexpectedChar {
            found: '`',
            line: 1
        }
    );
}
