//! Token-adjacency table consulted by the lexer.
//!
//! This is a broad early syntax filter, not an authoritative grammar
//! check: violations are collected as advisory diagnostics. A kind with
//! no entry is unconstrained.

use std::fmt;

use super::tokens::TokenType;
use TokenType as T;

/// Advisory diagnostic for a disallowed token adjacency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IllegalFollow {
    pub token: TokenType,
    pub next_token: TokenType,
    pub line: usize,
    pub column: usize,
}

impl fmt::Display for IllegalFollow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "illegal follow: {} followed by {} at line {}, column {}",
            self.token, self.next_token, self.line, self.column
        )
    }
}

/// Collapse token kinds that share one follow-set entry.
fn canonicalize(token_type: TokenType) -> TokenType {
    match token_type {
        // All string forms follow the same rules
        T::String | T::FString | T::RString | T::FrString | T::Regex => T::String,
        // Compound assignments follow the same rules as '='
        T::PlusAssign
        | T::MinusAssign
        | T::StarAssign
        | T::SlashAssign
        | T::PercentAssign
        | T::DoubleStarAssign
        | T::DoubleSlashAssign => T::Assign,
        T::TrueLit | T::FalseLit => T::Boolean,
        other => other,
    }
}

/// Token kinds allowed to follow `token_type`, or `None` if unconstrained.
pub fn follow_set(token_type: TokenType) -> Option<&'static [TokenType]> {
    let set: &'static [TokenType] = match canonicalize(token_type) {
        // alpha; alpha * ... alpha(beta) alpha.beta alpha, beta
        // (class) alpha {  alpha extends beta  alpha is None  alpha for item
        T::Identifier => &[
            T::Semicolon, T::Star, T::Slash, T::Percent,
            T::DoubleStar, T::DoubleSlash, T::Plus, T::Minus,
            T::Less, T::Greater, T::LessEqual, T::GreaterEqual,
            T::Equal, T::NotEqual, T::Assign, T::PlusAssign,
            T::MinusAssign, T::StarAssign, T::SlashAssign,
            T::PercentAssign, T::DoubleStarAssign, T::DoubleSlashAssign,
            T::And, T::Or, T::In, T::RParen, T::LParen,
            T::Colon, T::Dot, T::Comma, T::LBrace, T::RBracket,
            T::Extends, T::Implements, T::LBracket,
            T::Is, T::Not, T::If, T::For, T::As,
        ],

        // alpha = "alpha";  alpha("beta");  "key": value
        T::String => &[
            T::Semicolon, T::RParen, T::Comma, T::LBrace,
            T::RBracket, T::RBrace, T::Colon,
        ],

        // = 1;  1 * ...  1 for i  1 if condition  1: value
        T::Number => &[
            T::Semicolon, T::Star, T::Slash, T::Percent,
            T::DoubleStar, T::DoubleSlash, T::Plus, T::Minus,
            T::Less, T::Greater, T::LessEqual, T::GreaterEqual,
            T::Equal, T::NotEqual, T::And, T::Or, T::In,
            T::RParen, T::Comma, T::RBracket, T::LBrace,
            T::For, T::If, T::Else, T::RBrace, T::Colon,
        ],

        // alpha: beta  :] (empty slice)  ::step  "key": value
        T::Colon => &[
            T::Identifier, T::NoneLit, T::RBracket, T::String, T::Number,
            T::TrueLit, T::FalseLit, T::LBracket, T::LBrace, T::Colon,
        ],

        T::Semicolon => &[
            T::Def, T::Pass, T::Return, T::If, T::For, T::While, T::Switch,
            T::Identifier, T::RBrace, T::Newline, T::Comment, T::Eof,
        ],

        T::Newline => &[
            T::Abstract, T::Class, T::Def, T::Final, T::Interface,
            T::Identifier, T::Pass, T::Return, T::If, T::For, T::While,
            T::Switch, T::RBrace, T::Comment, T::Eof, T::Newline, T::Static,
            T::Raise, T::Import, T::String,
            T::From, T::Else, T::Elif, T::Case, T::Default,
        ],

        // -> None:  -> None {  def alpha() -> None; (abstract def)
        T::NoneLit => &[T::Colon, T::LBrace, T::Semicolon],

        // alpha implements beta
        T::Implements => &[T::Identifier],

        // alpha extends beta
        T::Extends => &[T::Identifier],

        // abstract class alpha  abstract def alpha()
        T::Abstract => &[T::Class, T::Def],

        T::Interface => &[T::Identifier],

        T::Class => &[T::Identifier],

        // static alpha  static def alpha()
        T::Static => &[T::Identifier, T::Def],

        // final alpha  final class Alpha  final def alpha()
        T::Final => &[T::Class, T::Identifier, T::Def],

        T::Comma => &[
            T::Identifier, T::Number, T::String, T::TrueLit, T::FalseLit,
            T::LBracket, T::LParen, T::Lambda, T::NoneLit, T::Minus, T::LBrace,
        ],

        T::Dot => &[T::Identifier],

        T::Assign => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::FrString, T::Regex, T::LParen, T::LBracket, T::LBrace,
            T::TrueLit, T::FalseLit, T::NoneLit, T::Not, T::Minus, T::Lambda,
        ],

        T::Star => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
        ],

        T::Slash => &[T::Identifier, T::Number, T::String],

        T::Percent => &[T::Identifier, T::Number, T::String],

        T::DoubleStar => &[T::Identifier, T::Number, T::String],

        T::DoubleSlash => &[T::Identifier, T::Number, T::String],

        T::Plus => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::FrString, T::Regex, T::LParen, T::LBracket, T::LBrace,
        ],

        T::Minus => &[T::Identifier, T::Number, T::String],

        T::Def => &[T::Identifier],

        // -> None  -> alpha  -> { lambda body }
        T::Arrow => &[
            T::NoneLit, T::Identifier, T::String, T::LBracket,
            T::LBrace, T::Number,
        ],

        // raise ValueError  raise Exception("message")
        T::Raise => &[T::Identifier, T::String],

        T::Import => &[T::Identifier],

        T::Return => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::Semicolon, T::LParen, T::Not, T::TrueLit, T::FalseLit,
            T::LBrace, T::NoneLit, T::Minus, T::LBracket,
        ],

        T::If => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::LParen, T::Not,
        ],

        // else:  else {  else 0 (ternary-like)
        T::Else => &[T::LBrace, T::Colon, T::Number, T::Identifier, T::String],

        T::Elif => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::LParen, T::Not,
        ],

        T::For => &[T::Identifier],

        T::In => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::LParen, T::LBracket, T::LBrace,
        ],

        // x is None  obj is not None
        T::Is => &[T::NoneLit, T::Identifier, T::Not],

        T::And => &[
            T::Identifier, T::Number, T::String, T::TrueLit, T::FalseLit,
            T::LParen, T::Not,
        ],

        T::Or => &[
            T::Identifier, T::Number, T::String, T::TrueLit, T::FalseLit,
            T::LParen, T::Not,
        ],

        // not alpha  obj not in list
        T::Not => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::LParen, T::In,
        ],

        T::LBracket => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::FrString, T::Minus, T::LParen, T::LBracket, T::RBracket,
            T::Colon,
        ],

        T::RBracket => &[
            T::Colon, T::Comma, T::Semicolon, T::RBrace, T::RParen,
            T::Plus, T::Minus, T::Star, T::Slash, T::Percent,
            T::DoubleStar, T::DoubleSlash, T::Less, T::Greater,
            T::LessEqual, T::GreaterEqual, T::Equal, T::NotEqual,
            T::And, T::Or, T::In, T::Dot, T::RBracket,
            T::LBrace,
        ],

        T::LParen => &[
            T::Identifier, T::Number, T::String, T::FString, T::RString,
            T::TrueLit, T::FalseLit, T::NoneLit,
            T::LParen, T::Minus, T::RParen, T::Not, T::Lambda, T::LBracket,
        ],

        T::RParen => &[
            T::Colon, T::LBrace, T::Comma, T::Semicolon, T::Newline, T::Arrow,
            T::Plus, T::Minus, T::Star, T::Slash, T::Percent,
            T::DoubleStar, T::DoubleSlash, T::Less, T::Greater,
            T::LessEqual, T::GreaterEqual, T::Equal, T::NotEqual,
            T::And, T::Or, T::RBrace, T::In, T::Dot, T::RParen,
            T::Implements, T::Extends,
        ],

        // class body {  method body {  { dict literal }
        T::LBrace => &[
            T::Def, T::Pass, T::Return, T::If, T::For, T::While,
            T::Switch, T::Identifier, T::RBrace, T::Newline, T::Comment,
            T::String, T::Number,
        ],

        T::RBrace => &[
            T::Else, T::Eof, T::Newline, T::Semicolon, T::RBrace,
            T::Case, T::Default, T::Elif,
        ],

        // True;  ...True, False)
        T::Boolean => &[T::Semicolon, T::RParen, T::Comma, T::RBracket],

        T::Pass => &[T::Semicolon],

        T::Less => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::FrString, T::LParen, T::LBracket,
            T::LBrace, T::TrueLit, T::FalseLit, T::NoneLit, T::Minus,
        ],

        T::Greater => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::FrString, T::LParen, T::LBracket,
            T::LBrace, T::TrueLit, T::FalseLit, T::NoneLit, T::Minus,
        ],

        T::LessEqual => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::FrString, T::LParen, T::LBracket,
            T::LBrace, T::TrueLit, T::FalseLit, T::NoneLit, T::Minus,
        ],

        T::GreaterEqual => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::FrString, T::LParen, T::LBracket,
            T::LBrace, T::TrueLit, T::FalseLit, T::NoneLit, T::Minus,
        ],

        T::Equal => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::FrString, T::LParen, T::LBracket,
            T::LBrace, T::TrueLit, T::FalseLit, T::NoneLit, T::Minus,
        ],

        T::NotEqual => &[
            T::Identifier, T::Number, T::String, T::FString,
            T::RString, T::FrString, T::LParen, T::LBracket,
            T::LBrace, T::TrueLit, T::FalseLit, T::NoneLit, T::Minus,
        ],

        _ => return None,
    };
    Some(set)
}

/// Check one adjacency, returning a diagnostic when it is disallowed.
pub fn check(
    token: TokenType,
    next_token: TokenType,
    line: usize,
    column: usize,
) -> Option<IllegalFollow> {
    match follow_set(token) {
        Some(allowed) if !allowed.contains(&next_token) => Some(IllegalFollow {
            token,
            next_token,
            line,
            column,
        }),
        _ => None,
    }
}
