use crate::typing::TypeEnforcement;

/// Compiler configuration passed through the pipeline
#[derive(Debug, Clone, Default)]
pub struct Config {
    /// How strictly type-checker findings are treated
    pub type_enforcement: TypeEnforcement,
    /// Print per-phase progress
    pub verbose: bool,
}

impl Config {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_type_enforcement(mut self, enforcement: TypeEnforcement) -> Self {
        self.type_enforcement = enforcement;
        self
    }

    pub fn with_verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }
}
