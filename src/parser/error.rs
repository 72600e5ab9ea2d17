use std::fmt;

use crate::error::Error;

/// Errors raised while parsing. The first error is terminal: no
/// recovery or resynchronization is attempted.
#[derive(Debug, Clone)]
pub enum ParseError {
    /// Unexpected token encountered
    UnexpectedToken {
        expected: String,
        found: String,
        line: usize,
    },

    /// Unexpected end of input
    UnexpectedEndOfInput { expected: String, line: usize },

    /// Invalid syntax
    InvalidSyntax { message: String, line: usize },
}

impl ParseError {
    /// Create a new unexpected token error
    pub fn unexpected_token(expected: &str, found: &str, line: usize) -> Self {
        ParseError::UnexpectedToken {
            expected: expected.to_string(),
            found: found.to_string(),
            line,
        }
    }

    /// Create a new unexpected end of input error
    pub fn unexpected_end_of_input(expected: &str, line: usize) -> Self {
        ParseError::UnexpectedEndOfInput {
            expected: expected.to_string(),
            line,
        }
    }

    /// Create a new invalid syntax error
    pub fn invalid_syntax(message: impl Into<String>, line: usize) -> Self {
        ParseError::InvalidSyntax {
            message: message.into(),
            line,
        }
    }

    /// Get the source line of the error
    pub fn line(&self) -> usize {
        match self {
            ParseError::UnexpectedToken { line, .. } => *line,
            ParseError::UnexpectedEndOfInput { line, .. } => *line,
            ParseError::InvalidSyntax { line, .. } => *line,
        }
    }
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParseError::UnexpectedToken {
                expected,
                found,
                line,
            } => {
                write!(
                    f,
                    "parse error at line {}: expected {}, found {}",
                    line, expected, found
                )
            }
            ParseError::UnexpectedEndOfInput { expected, line } => {
                write!(
                    f,
                    "parse error at line {}: unexpected end of input, expected {}",
                    line, expected
                )
            }
            ParseError::InvalidSyntax { message, line } => {
                write!(f, "parse error at line {}: {}", line, message)
            }
        }
    }
}

impl std::error::Error for ParseError {}

impl From<ParseError> for Error {
    fn from(parse_error: ParseError) -> Self {
        let line = parse_error.line();
        let message = match parse_error {
            ParseError::UnexpectedToken {
                expected, found, ..
            } => format!("expected {}, found {}", expected, found),
            ParseError::UnexpectedEndOfInput { expected, .. } => {
                format!("unexpected end of input, expected {}", expected)
            }
            ParseError::InvalidSyntax { message, .. } => message,
        };
        Error::Parse { line, message }
    }
}

/// Result type for parsing operations
pub type ParseResult<T> = Result<T, ParseError>;
