//! spicec: a source-to-source compiler from Spice to Python.
//!
//! Spice is a Python dialect with brace-delimited blocks, interfaces,
//! `abstract`/`final`/`static` modifiers, `extends`/`implements`
//! clauses and `switch` statements. The pipeline is lex, parse, check,
//! transform; [`compile`] runs it end to end.

pub mod ast;
pub mod check;
pub mod codegen;
pub mod config;
pub mod error;
pub mod parser;
pub mod typing;

use std::fs;
use std::path::Path;

pub use config::Config;
pub use error::{Error, Result};

use check::{FinalChecker, FinalDiagnostic};
use parser::{Lexer, Parser};
use typing::{TypeChecker, TypeEnforcement};

/// Outcome of a successful compilation: the generated Python plus any
/// non-fatal findings.
#[derive(Debug)]
pub struct Compilation {
    pub output: String,
    pub final_diagnostics: Vec<FinalDiagnostic>,
    pub type_warnings: Vec<String>,
}

/// Compile Spice source text to Python.
///
/// Lexer adjacency diagnostics are treated as fatal here: a source that
/// trips them is rejected before parsing.
pub fn compile(source: &str, config: &Config) -> Result<Compilation> {
    let lexed = Lexer::new(source).tokenize()?;
    if !lexed.diagnostics.is_empty() {
        let first = &lexed.diagnostics[0];
        return Err(Error::IllegalSequence {
            message: first.to_string(),
            count: lexed.diagnostics.len(),
        });
    }

    let module = Parser::new(lexed.tokens).parse()?;

    let final_diagnostics = FinalChecker::check(&module);

    let type_warnings = match config.type_enforcement {
        TypeEnforcement::None => Vec::new(),
        TypeEnforcement::Warnings => {
            let mut checker = TypeChecker::new();
            checker.check_module(&module);
            let mut warnings: Vec<String> = checker.errors().to_vec();
            warnings.extend(checker.warnings().iter().cloned());
            warnings
        }
        TypeEnforcement::Strict => {
            let mut checker = TypeChecker::new();
            checker.check_module(&module);
            if !checker.errors().is_empty() {
                return Err(Error::type_error(checker.errors().join("; ")));
            }
            checker.warnings().to_vec()
        }
    };

    let output = codegen::generate_python(&module);

    Ok(Compilation {
        output,
        final_diagnostics,
        type_warnings,
    })
}

/// Compile a `.spy` file, writing the Python output only on success.
pub fn compile_file(input: &Path, output: &Path, config: &Config) -> Result<Compilation> {
    let source = fs::read_to_string(input)?;
    let compilation = compile(&source, config)?;
    fs::write(output, &compilation.output)?;
    Ok(compilation)
}

/// Lex and parse only, without generating output.
pub fn check_source(source: &str) -> Result<()> {
    let lexed = Lexer::new(source).tokenize()?;
    if !lexed.diagnostics.is_empty() {
        let first = &lexed.diagnostics[0];
        return Err(Error::IllegalSequence {
            message: first.to_string(),
            count: lexed.diagnostics.len(),
        });
    }
    Parser::new(lexed.tokens).parse()?;
    Ok(())
}

/// [`check_source`] over a file on disk.
pub fn check_file(input: &Path) -> Result<()> {
    let source = fs::read_to_string(input)?;
    check_source(&source)
}
