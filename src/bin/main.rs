use std::path::PathBuf;

use anyhow::Context;
use clap::{Parser, Subcommand, ValueEnum};

use spicec::parser::Lexer;
use spicec::typing::TypeEnforcement;
use spicec::{Config, Error};

#[derive(Parser)]
#[command(name = "spicec", version, about = "Spice to Python compiler")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compile a .spy file to Python
    Compile {
        /// Input .spy file
        input: PathBuf,

        /// Output .py file (defaults to the input with a .py extension)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Check the input without writing output
        #[arg(short, long)]
        check: bool,

        /// Recompile when the input changes
        #[arg(short, long)]
        watch: bool,

        /// Print per-phase progress
        #[arg(short, long)]
        verbose: bool,

        /// Type checking level
        #[arg(long, value_enum, default_value_t = TypeCheckLevel::None)]
        type_check: TypeCheckLevel,
    },

    /// Parse a .spy file and print its syntax tree
    Parse {
        /// Input .spy file
        input: PathBuf,

        /// Print the full debug tree instead of the outline
        #[arg(short, long)]
        detailed: bool,
    },

    /// Tokenize a .spy file and print the token stream
    Lex {
        /// Input .spy file
        input: PathBuf,

        /// Include line and column positions
        #[arg(short, long)]
        locations: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum TypeCheckLevel {
    None,
    Warnings,
    Strict,
}

impl From<TypeCheckLevel> for TypeEnforcement {
    fn from(level: TypeCheckLevel) -> Self {
        match level {
            TypeCheckLevel::None => TypeEnforcement::None,
            TypeCheckLevel::Warnings => TypeEnforcement::Warnings,
            TypeCheckLevel::Strict => TypeEnforcement::Strict,
        }
    }
}

fn require_spy(input: &PathBuf) -> spicec::Result<()> {
    match input.extension().and_then(|e| e.to_str()) {
        Some("spy") => Ok(()),
        _ => Err(Error::config_error(format!(
            "expected a .spy file, got {}",
            input.display()
        ))),
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Compile {
            input,
            output,
            check,
            watch,
            verbose,
            type_check,
        } => {
            require_spy(&input)?;
            let config = Config::new()
                .with_type_enforcement(type_check.into())
                .with_verbose(verbose);

            if watch {
                eprintln!("watch mode is not implemented yet; compiling once");
            }

            if check {
                spicec::check_file(&input)
                    .with_context(|| format!("failed to check {}", input.display()))?;
                println!("{}: OK", input.display());
                return Ok(());
            }

            let output = output.unwrap_or_else(|| input.with_extension("py"));
            if verbose {
                println!("compiling {} -> {}", input.display(), output.display());
            }

            let compilation = spicec::compile_file(&input, &output, &config)
                .with_context(|| format!("failed to compile {}", input.display()))?;

            for diagnostic in &compilation.final_diagnostics {
                eprintln!("warning: {}", diagnostic);
            }
            for warning in &compilation.type_warnings {
                eprintln!("warning: {}", warning);
            }
            if verbose {
                println!("wrote {}", output.display());
            }
        }

        Commands::Parse { input, detailed } => {
            require_spy(&input)?;
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let module = spicec::parser::parse_spice(&source)
                .with_context(|| format!("failed to parse {}", input.display()))?;
            if detailed {
                println!("{:#?}", module);
            } else {
                print!("{}", module);
            }
        }

        Commands::Lex { input, locations } => {
            require_spy(&input)?;
            let source = std::fs::read_to_string(&input)
                .with_context(|| format!("failed to read {}", input.display()))?;
            let lexed = Lexer::new(&source)
                .tokenize()
                .with_context(|| format!("failed to tokenize {}", input.display()))?;
            for token in &lexed.tokens {
                if locations {
                    println!("{}:{}\t{}", token.line, token.column, token);
                } else {
                    println!("{}", token);
                }
            }
            for diagnostic in &lexed.diagnostics {
                eprintln!("warning: {}", diagnostic);
            }
        }
    }

    Ok(())
}
