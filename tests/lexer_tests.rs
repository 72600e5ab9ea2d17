use spicec::parser::{Lexer, TokenType};

fn tokenize(source: &str) -> Vec<spicec::parser::Token> {
    Lexer::new(source).tokenize().expect("tokenize failed").tokens
}

#[test]
fn test_positions_are_line_and_byte_column() {
    let tokens = tokenize("x = 1");
    assert_eq!(tokens[0].token_type, TokenType::Identifier);
    assert_eq!((tokens[0].line, tokens[0].column), (1, 0));
    assert_eq!(tokens[1].token_type, TokenType::Assign);
    assert_eq!((tokens[1].line, tokens[1].column), (1, 2));
    assert_eq!(tokens[2].token_type, TokenType::Number);
    assert_eq!((tokens[2].line, tokens[2].column), (1, 4));
    assert_eq!(tokens[3].token_type, TokenType::Newline);
    assert_eq!((tokens[3].line, tokens[3].column), (1, 5));
}

#[test]
fn test_string_prefix_variants() {
    let tokens = tokenize(r#"a = f"hi {name}""#);
    assert_eq!(tokens[2].token_type, TokenType::FString);
    assert_eq!(tokens[2].lexeme(), r#"f"hi {name}""#);

    let tokens = tokenize(r"b = r'\d+'");
    assert_eq!(tokens[2].token_type, TokenType::RString);

    let tokens = tokenize(r#"c = REGEX"[a-z]+""#);
    assert_eq!(tokens[2].token_type, TokenType::Regex);
}

#[test]
fn test_spice_keywords_are_reclassified() {
    let tokens = tokenize("interface abstract final static extends implements switch case default");
    let kinds: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
    assert_eq!(
        &kinds[..9],
        &[
            TokenType::Interface,
            TokenType::Abstract,
            TokenType::Final,
            TokenType::Static,
            TokenType::Extends,
            TokenType::Implements,
            TokenType::Switch,
            TokenType::Case,
            TokenType::Default,
        ]
    );
}

#[test]
fn test_operator_maximal_munch() {
    let tokens = tokenize("a <= b != c ** d // e -> f");
    let kinds: Vec<TokenType> = tokens.iter().map(|t| t.token_type).collect();
    assert!(kinds.contains(&TokenType::LessEqual));
    assert!(kinds.contains(&TokenType::NotEqual));
    assert!(kinds.contains(&TokenType::DoubleStar));
    assert!(kinds.contains(&TokenType::DoubleSlash));
    assert!(kinds.contains(&TokenType::Arrow));
}

#[test]
fn test_invalid_character_is_fatal_with_position() {
    let err = Lexer::new("x = 1\ny = $").tokenize().unwrap_err();
    match err {
        spicec::Error::Lexical { line, column, .. } => {
            assert_eq!(line, 2);
            assert_eq!(column, 4);
        }
        other => panic!("expected a lexical error, got {other:?}"),
    }
}

#[test]
fn test_adjacency_violations_are_advisory() {
    // "pass pass" on one line is lexable but flagged.
    let output = Lexer::new("pass pass").tokenize().expect("tokenize failed");
    assert!(!output.diagnostics.is_empty());
    let kinds: Vec<TokenType> = output.tokens.iter().map(|t| t.token_type).collect();
    assert_eq!(
        kinds,
        vec![
            TokenType::Pass,
            TokenType::Pass,
            TokenType::Newline,
            TokenType::Eof,
        ]
    );
}

#[test]
fn test_triple_quoted_strings() {
    let tokens = tokenize(r#"doc = """first""""#);
    assert_eq!(tokens[2].token_type, TokenType::String);
    assert_eq!(tokens[2].lexeme(), r#""""first""""#);
}
