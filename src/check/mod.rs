//! Post-parse semantic checks.

pub mod final_checker;

pub use final_checker::{FinalChecker, FinalDiagnostic};
