//! Line-oriented lexer for Spice source.
//!
//! Each line is scanned left to right against an ordered pattern table;
//! the first matching pattern wins, so multi-character operators and
//! triple-quoted strings must appear before their prefixes. Identifiers
//! matching a reserved word are reclassified. Comments are recognized
//! but dropped. Every line, including blank ones, emits a trailing
//! newline token.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{Error, Result};

use super::follow_set::{self, IllegalFollow};
use super::tokens::{Token, TokenType, KEYWORDS};

/// Ordered pattern table. Order matters: floats before ints, string
/// prefixes before plain strings, multi-char operators before their
/// single-char prefixes, identifiers last.
static TOKEN_PATTERNS: Lazy<Vec<(Regex, TokenType)>> = Lazy::new(|| {
    let table: &[(&str, TokenType)] = &[
        // Comments
        (r"^#.*", TokenType::Comment),
        // Numbers
        (r"^\d+\.\d+", TokenType::Number),
        (r"^\d+", TokenType::Number),
        // Strings (triple-quoted before single-quoted)
        (
            r#"^(?:f""".*?"""|f'''.*?'''|f".*?"|f'.*?')"#,
            TokenType::FString,
        ),
        (
            r#"^(?:r""".*?"""|r'''.*?'''|r".*?"|r'.*?')"#,
            TokenType::RString,
        ),
        (
            r#"^(?:fr""".*?"""|fr'''.*?'''|fr".*?"|fr'.*?'|rf""".*?"""|rf'''.*?'''|rf".*?"|rf'.*?')"#,
            TokenType::FrString,
        ),
        (r#"^(?:REGEX".*?"|REGEX'.*?')"#, TokenType::Regex),
        (
            r#"^(?:""".*?"""|'''.*?'''|".*?"|'.*?')"#,
            TokenType::String,
        ),
        // Operators (order matters)
        (r"^==", TokenType::Equal),
        (r"^!=", TokenType::NotEqual),
        (r"^<=", TokenType::LessEqual),
        (r"^>=", TokenType::GreaterEqual),
        (r"^<", TokenType::Less),
        (r"^>", TokenType::Greater),
        (r"^\+=", TokenType::PlusAssign),
        (r"^-=", TokenType::MinusAssign),
        (r"^\*=", TokenType::StarAssign),
        (r"^/=", TokenType::SlashAssign),
        (r"^\*\*", TokenType::DoubleStar),
        (r"^//", TokenType::DoubleSlash),
        (r"^->", TokenType::Arrow),
        (r"^\+", TokenType::Plus),
        (r"^-", TokenType::Minus),
        (r"^\*", TokenType::Star),
        (r"^/", TokenType::Slash),
        (r"^%", TokenType::Percent),
        (r"^=", TokenType::Assign),
        // Delimiters
        (r"^\(", TokenType::LParen),
        (r"^\)", TokenType::RParen),
        (r"^\[", TokenType::LBracket),
        (r"^\]", TokenType::RBracket),
        (r"^\{", TokenType::LBrace),
        (r"^\}", TokenType::RBrace),
        (r"^,", TokenType::Comma),
        (r"^:", TokenType::Colon),
        (r"^;", TokenType::Semicolon),
        (r"^\.", TokenType::Dot),
        // Identifiers (reclassified against the keyword map)
        (r"^[a-zA-Z_][a-zA-Z0-9_]*", TokenType::Identifier),
    ];

    table
        .iter()
        .map(|(pattern, token_type)| {
            let re = Regex::new(pattern).expect("token pattern must compile");
            (re, *token_type)
        })
        .collect()
});

/// Output of a tokenization pass: the token stream plus any advisory
/// adjacency diagnostics.
#[derive(Debug)]
pub struct LexOutput {
    pub tokens: Vec<Token>,
    pub diagnostics: Vec<IllegalFollow>,
}

/// Tokenizes Spice source code.
pub struct Lexer<'a> {
    source: &'a str,
}

impl<'a> Lexer<'a> {
    pub fn new(source: &'a str) -> Self {
        Self { source }
    }

    /// Tokenize the whole source.
    ///
    /// An unmatched character is fatal and aborts the call; follow-set
    /// violations are collected and returned alongside the tokens.
    pub fn tokenize(&self) -> Result<LexOutput> {
        let mut tokens = Vec::new();
        let mut diagnostics = Vec::new();

        let lines: Vec<&str> = self.source.split('\n').collect();
        for (index, line) in lines.iter().enumerate() {
            self.tokenize_line(line, index + 1, &mut tokens, &mut diagnostics)?;
        }

        tokens.push(Token::new(TokenType::Eof, None, lines.len(), 0));

        Ok(LexOutput {
            tokens,
            diagnostics,
        })
    }

    fn tokenize_line(
        &self,
        line: &str,
        line_num: usize,
        tokens: &mut Vec<Token>,
        diagnostics: &mut Vec<IllegalFollow>,
    ) -> Result<()> {
        // Leading whitespace is measured but indentation does not open
        // blocks; the grammar is brace-delimited.
        let indent = line.len() - line.trim_start().len();

        if line.trim().is_empty() {
            tokens.push(Token::new(TokenType::Newline, None, line_num, indent));
            return Ok(());
        }

        let mut pos = indent;
        while pos < line.len() {
            let rest = &line[pos..];

            let ch = match rest.chars().next() {
                Some(ch) => ch,
                None => break,
            };
            if ch.is_whitespace() {
                pos += ch.len_utf8();
                continue;
            }

            let mut matched = false;
            for (pattern, pattern_type) in TOKEN_PATTERNS.iter() {
                let m = match pattern.find(rest) {
                    Some(m) => m,
                    None => continue,
                };

                let value = m.as_str();
                let mut token_type = *pattern_type;

                if token_type == TokenType::Identifier {
                    if let Some(keyword) = KEYWORDS.get(value) {
                        token_type = *keyword;
                    }
                }

                if token_type != TokenType::Comment {
                    tokens.push(Token::new(
                        token_type,
                        Some(value.to_string()),
                        line_num,
                        pos,
                    ));

                    // Advisory adjacency check over the previous two tokens
                    if tokens.len() >= 2 {
                        let prev = tokens[tokens.len() - 2].token_type;
                        let next = tokens[tokens.len() - 1].token_type;
                        if let Some(err) = follow_set::check(prev, next, line_num, pos) {
                            diagnostics.push(err);
                        }
                    }
                }

                pos += m.end();
                matched = true;
                break;
            }

            if !matched {
                return Err(Error::lexical_error(
                    line_num,
                    pos,
                    format!("invalid character '{}'", ch),
                ));
            }
        }

        // Line-final newline tokens are appended without an adjacency check
        tokens.push(Token::new(TokenType::Newline, None, line_num, line.len()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenType> {
        Lexer::new(source)
            .tokenize()
            .expect("tokenize failed")
            .tokens
            .iter()
            .map(|t| t.token_type)
            .collect()
    }

    #[test]
    fn test_keyword_reclassification() {
        let kinds = kinds("final class Dog");
        assert_eq!(
            kinds,
            vec![
                TokenType::Final,
                TokenType::Class,
                TokenType::Identifier,
                TokenType::Newline,
                TokenType::Eof,
            ]
        );
    }

    #[test]
    fn test_multichar_operators_win() {
        let kinds = kinds("a ** b // c -> d");
        assert!(kinds.contains(&TokenType::DoubleStar));
        assert!(kinds.contains(&TokenType::DoubleSlash));
        assert!(kinds.contains(&TokenType::Arrow));
        assert!(!kinds.contains(&TokenType::Star));
        assert!(!kinds.contains(&TokenType::Slash));
    }

    #[test]
    fn test_float_before_int() {
        let output = Lexer::new("3.14").tokenize().expect("tokenize failed");
        assert_eq!(output.tokens[0].lexeme(), "3.14");
        assert_eq!(output.tokens[0].token_type, TokenType::Number);
    }

    #[test]
    fn test_comment_dropped() {
        let kinds = kinds("x = 1  # trailing");
        assert!(!kinds.contains(&TokenType::Comment));
        assert_eq!(kinds.len(), 5); // IDENT ASSIGN NUMBER NEWLINE EOF
    }

    #[test]
    fn test_blank_line_emits_newline() {
        let kinds = kinds("x\n\ny");
        let newlines = kinds
            .iter()
            .filter(|k| **k == TokenType::Newline)
            .count();
        assert_eq!(newlines, 3);
    }

    #[test]
    fn test_unmatched_character_is_fatal() {
        let err = Lexer::new("x = $").tokenize();
        assert!(err.is_err());
    }
}
