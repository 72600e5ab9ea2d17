//! Abstract Syntax Tree for the Spice language.
//!
//! Nodes are closed sum types with struct payloads; consumers match on
//! them exhaustively. Every node is an immutable value owned strictly
//! top-down by its parent.

mod nodes;
mod printer;

pub use nodes::*;
