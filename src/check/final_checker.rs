//! Detects reassignment of variables declared `final`.
//!
//! The check is non-fatal: compilation proceeds and the diagnostics are
//! surfaced alongside the generated output. Scopes are tracked by name;
//! a statement-level assignment to an identifier is flagged when that
//! name is final in the current scope or at module level.

use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::ast::{Expr, Module, Stmt};

const GLOBAL_SCOPE: &str = "global";

/// A single reassignment finding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FinalDiagnostic {
    pub line: usize,
    pub message: String,
}

impl fmt::Display for FinalDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "line {}: {}", self.line, self.message)
    }
}

pub struct FinalChecker {
    final_vars: HashMap<String, HashSet<String>>,
    current_scope: String,
    diagnostics: Vec<FinalDiagnostic>,
}

impl FinalChecker {
    /// Run the check over a module. Each call starts from fresh state,
    /// so checking the same module twice yields the same diagnostics.
    pub fn check(module: &Module) -> Vec<FinalDiagnostic> {
        let mut checker = FinalChecker {
            final_vars: HashMap::new(),
            current_scope: GLOBAL_SCOPE.to_string(),
            diagnostics: Vec::new(),
        };
        for stmt in &module.body {
            checker.visit_stmt(stmt);
        }
        checker.diagnostics
    }

    fn register(&mut self, name: &str) {
        self.final_vars
            .entry(self.current_scope.clone())
            .or_default()
            .insert(name.to_string());
    }

    fn is_final(&self, name: &str) -> bool {
        let in_scope = |scope: &str| {
            self.final_vars
                .get(scope)
                .map(|names| names.contains(name))
                .unwrap_or(false)
        };
        in_scope(&self.current_scope) || in_scope(GLOBAL_SCOPE)
    }

    fn check_assignment(&mut self, name: &str, line: usize) {
        if self.is_final(name) {
            self.diagnostics.push(FinalDiagnostic {
                line,
                message: format!("Cannot reassign final variable '{}'", name),
            });
        }
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Final(decl) => {
                self.register(&decl.name);
            }
            Stmt::Expression(stmt) => {
                if let Expr::Assignment { target, line, .. } = &stmt.expression {
                    if let Expr::Identifier { name, .. } = target.as_ref() {
                        self.check_assignment(name, *line);
                    }
                }
            }
            Stmt::Function(decl) => {
                if let Some(body) = &decl.body {
                    let old_scope =
                        std::mem::replace(&mut self.current_scope, decl.name.clone());
                    for stmt in body {
                        self.visit_stmt(stmt);
                    }
                    self.current_scope = old_scope;
                }
            }
            Stmt::Class(decl) => {
                let old_scope = std::mem::replace(&mut self.current_scope, decl.name.clone());
                for stmt in &decl.body {
                    self.visit_stmt(stmt);
                }
                self.current_scope = old_scope;
            }
            Stmt::If(stmt) => {
                self.visit_body(&stmt.then_body);
                for (_, body) in &stmt.elif_branches {
                    self.visit_body(body);
                }
                if let Some(body) = &stmt.else_body {
                    self.visit_body(body);
                }
            }
            Stmt::While(stmt) => self.visit_body(&stmt.body),
            Stmt::For(stmt) => self.visit_body(&stmt.body),
            Stmt::Switch(stmt) => {
                for case in &stmt.cases {
                    self.visit_body(&case.body);
                }
                if let Some(body) = &stmt.default {
                    self.visit_body(body);
                }
            }
            Stmt::Interface(_)
            | Stmt::Pass(_)
            | Stmt::Return(_)
            | Stmt::Raise(_)
            | Stmt::Import(_) => {}
        }
    }

    fn visit_body(&mut self, body: &[Stmt]) {
        for stmt in body {
            self.visit_stmt(stmt);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_spice;

    fn diagnostics(source: &str) -> Vec<FinalDiagnostic> {
        let module = parse_spice(source).expect("parse failed");
        FinalChecker::check(&module)
    }

    #[test]
    fn test_reassignment_is_flagged() {
        let diags = diagnostics("final x = 1;\nx = 2;\n");
        assert_eq!(diags.len(), 1);
        assert_eq!(diags[0].line, 2);
        assert!(diags[0].message.contains("'x'"));
    }

    #[test]
    fn test_no_reassignment_is_clean() {
        let diags = diagnostics("final x = 1;\ny = 2;\n");
        assert!(diags.is_empty());
    }

    #[test]
    fn test_check_is_idempotent() {
        let module = parse_spice("final x = 1;\nx = 2;\nx = 3;\n").expect("parse failed");
        let first = FinalChecker::check(&module);
        let second = FinalChecker::check(&module);
        assert_eq!(first, second);
        assert_eq!(first.len(), 2);
    }

    #[test]
    fn test_function_scopes_are_isolated() {
        // A final in one function does not constrain another.
        let source = "def a() { final x = 1; }\ndef b() { x = 2; }\n";
        assert!(diagnostics(source).is_empty());
    }

    #[test]
    fn test_global_final_applies_inside_functions() {
        let source = "final x = 1;\ndef a() { x = 2; }\n";
        let diags = diagnostics(source);
        assert_eq!(diags.len(), 1);
    }

    #[test]
    fn test_compound_assignment_counts() {
        let diags = diagnostics("final x = 1;\nx += 2;\n");
        assert_eq!(diags.len(), 1);
    }
}
