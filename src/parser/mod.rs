//! Lexing and parsing for Spice source.

pub mod error;
mod expr;
pub mod follow_set;
pub mod lexer;
#[allow(clippy::module_inception)]
pub mod parser;
pub mod tokens;

pub use error::{ParseError, ParseResult};
pub use expr::ExprContext;
pub use follow_set::IllegalFollow;
pub use lexer::{LexOutput, Lexer};
pub use parser::Parser;
pub use tokens::{Token, TokenType};

use crate::ast::Module;
use crate::error::Result;

/// Tokenize and parse a source string into a module. Advisory lexer
/// diagnostics are dropped; use [`Lexer`] directly to inspect them.
pub fn parse_spice(source: &str) -> Result<Module> {
    let output = Lexer::new(source).tokenize()?;
    let module = Parser::new(output.tokens).parse()?;
    Ok(module)
}
