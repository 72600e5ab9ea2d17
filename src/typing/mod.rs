//! Static type model and checker scaffolding.
//!
//! Inference is deliberately shallow for now: every expression is
//! `Any`, which makes every assignment well-typed. The data model and
//! the enforcement levels are in place so the checker can grow without
//! touching the driver.

use std::collections::HashMap;
use std::fmt;

use crate::ast::{Expr, Literal, Module, Stmt};

/// Enforcement level for type checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeEnforcement {
    /// Skip type checking entirely.
    #[default]
    None,
    /// Report findings as warnings; never fail the build.
    Warnings,
    /// Findings are compile errors.
    Strict,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TypeKind {
    Int,
    Float,
    Str,
    Bool,
    NoneType,
    List,
    Dict,
    Set,
    Tuple,
    Function,
    Class,
    Any,
}

/// A named type with optional parameters and members.
#[derive(Debug, Clone, PartialEq)]
pub struct SpiceType {
    pub kind: TypeKind,
    pub name: String,
    pub params: Vec<SpiceType>,
    pub fields: HashMap<String, SpiceType>,
    pub methods: HashMap<String, SpiceType>,
}

impl SpiceType {
    pub fn new(kind: TypeKind, name: impl Into<String>) -> Self {
        Self {
            kind,
            name: name.into(),
            params: Vec::new(),
            fields: HashMap::new(),
            methods: HashMap::new(),
        }
    }

    pub fn any() -> Self {
        Self::new(TypeKind::Any, "Any")
    }

    /// `Any` is assignable in both directions; otherwise kinds and
    /// names must match exactly. No subtyping yet.
    pub fn is_assignable_to(&self, other: &SpiceType) -> bool {
        if self.kind == TypeKind::Any || other.kind == TypeKind::Any {
            return true;
        }
        self.kind == other.kind && self.name == other.name
    }

    pub fn add_field(&mut self, name: impl Into<String>, ty: SpiceType) {
        self.fields.insert(name.into(), ty);
    }

    pub fn add_method(&mut self, name: impl Into<String>, ty: SpiceType) {
        self.methods.insert(name.into(), ty);
    }

    pub fn field(&self, name: &str) -> Option<&SpiceType> {
        self.fields.get(name)
    }

    pub fn method(&self, name: &str) -> Option<&SpiceType> {
        self.methods.get(name)
    }
}

impl fmt::Display for SpiceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.params.is_empty() {
            write!(f, "{}", self.name)
        } else {
            let params: Vec<String> = self.params.iter().map(|p| p.to_string()).collect();
            write!(f, "{}[{}]", self.name, params.join(", "))
        }
    }
}

/// Walks a module collecting type errors and warnings.
pub struct TypeChecker {
    symbol_table: HashMap<String, SpiceType>,
    errors: Vec<String>,
    warnings: Vec<String>,
}

impl Default for TypeChecker {
    fn default() -> Self {
        Self::new()
    }
}

impl TypeChecker {
    pub fn new() -> Self {
        Self {
            symbol_table: HashMap::new(),
            errors: Vec::new(),
            warnings: Vec::new(),
        }
    }

    pub fn check_module(&mut self, module: &Module) {
        for stmt in &module.body {
            if let Stmt::Final(decl) = stmt {
                let declared = match &decl.type_annotation {
                    Some(name) => type_from_name(name),
                    None => SpiceType::any(),
                };
                let value = self.infer_type(&decl.value);
                self.check_assignment(&decl.name, &declared, &value, decl.line);
                self.symbol_table.insert(decl.name.clone(), declared);
            }
        }
    }

    /// Shallow inference: literals have known types, everything else is
    /// `Any` for now.
    pub fn infer_type(&self, expr: &Expr) -> SpiceType {
        match expr {
            Expr::Literal(Literal::Number(raw)) => {
                if raw.contains('.') {
                    SpiceType::new(TypeKind::Float, "float")
                } else {
                    SpiceType::new(TypeKind::Int, "int")
                }
            }
            Expr::Literal(
                Literal::Str(_) | Literal::FStr(_) | Literal::RStr(_) | Literal::FrStr(_),
            ) => SpiceType::new(TypeKind::Str, "str"),
            Expr::Literal(Literal::Boolean(_)) => SpiceType::new(TypeKind::Bool, "bool"),
            Expr::Literal(Literal::None) => SpiceType::new(TypeKind::NoneType, "None"),
            Expr::Literal(Literal::List(_)) => SpiceType::new(TypeKind::List, "list"),
            Expr::Literal(Literal::Set(_)) => SpiceType::new(TypeKind::Set, "set"),
            Expr::Literal(Literal::Tuple(_)) => SpiceType::new(TypeKind::Tuple, "tuple"),
            Expr::Literal(Literal::Dict(_)) => SpiceType::new(TypeKind::Dict, "dict"),
            Expr::Identifier { name, .. } => self
                .symbol_table
                .get(name)
                .cloned()
                .unwrap_or_else(SpiceType::any),
            _ => SpiceType::any(),
        }
    }

    pub fn check_assignment(
        &mut self,
        name: &str,
        declared: &SpiceType,
        value: &SpiceType,
        line: usize,
    ) {
        if !value.is_assignable_to(declared) {
            self.errors.push(format!(
                "line {}: cannot assign {} to '{}' of type {}",
                line, value, name, declared
            ));
        }
    }

    pub fn resolve_attribute(&self, object: &SpiceType, name: &str) -> SpiceType {
        object
            .field(name)
            .or_else(|| object.method(name))
            .cloned()
            .unwrap_or_else(SpiceType::any)
    }

    pub fn lookup(&self, name: &str) -> Option<&SpiceType> {
        self.symbol_table.get(name)
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn warnings(&self) -> &[String] {
        &self.warnings
    }
}

fn type_from_name(name: &str) -> SpiceType {
    let kind = match name {
        "int" => TypeKind::Int,
        "float" => TypeKind::Float,
        "str" => TypeKind::Str,
        "bool" => TypeKind::Bool,
        "None" => TypeKind::NoneType,
        "list" => TypeKind::List,
        "dict" => TypeKind::Dict,
        "set" => TypeKind::Set,
        "tuple" => TypeKind::Tuple,
        _ => TypeKind::Any,
    };
    SpiceType::new(kind, name)
}
