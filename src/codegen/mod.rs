//! Python code generation.

pub mod transformer;

pub use transformer::Transformer;

use crate::ast::Module;

/// Transform a parsed module into Python source.
pub fn generate_python(module: &Module) -> String {
    Transformer::new().transform(module)
}
