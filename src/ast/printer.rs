//! Compact outline printer used by the `parse` CLI subcommand.

use std::fmt;

use super::nodes::*;

impl fmt::Display for Module {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Module ({} statements)", self.body.len())?;
        for stmt in &self.body {
            fmt_stmt(f, stmt, 1)?;
        }
        Ok(())
    }
}

fn pad(f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
    for _ in 0..depth {
        write!(f, "  ")?;
    }
    Ok(())
}

fn fmt_params(params: &[Parameter]) -> String {
    params
        .iter()
        .map(|p| match &p.type_annotation {
            Some(ty) => format!("{}: {}", p.name, ty),
            None => p.name.clone(),
        })
        .collect::<Vec<_>>()
        .join(", ")
}

fn fmt_stmt(f: &mut fmt::Formatter<'_>, stmt: &Stmt, depth: usize) -> fmt::Result {
    pad(f, depth)?;
    match stmt {
        Stmt::Interface(decl) => {
            write!(f, "interface {}", decl.name)?;
            if !decl.bases.is_empty() {
                write!(f, " extends {}", decl.bases.join(", "))?;
            }
            writeln!(f)?;
            for method in &decl.methods {
                pad(f, depth + 1)?;
                match &method.return_type {
                    Some(ty) => {
                        writeln!(f, "def {}({}) -> {}", method.name, fmt_params(&method.params), ty)?
                    }
                    None => writeln!(f, "def {}({})", method.name, fmt_params(&method.params))?,
                }
            }
            Ok(())
        }
        Stmt::Class(decl) => {
            if decl.is_abstract {
                write!(f, "abstract ")?;
            }
            if decl.is_final {
                write!(f, "final ")?;
            }
            write!(f, "class {}", decl.name)?;
            if !decl.bases.is_empty() {
                write!(f, "({})", decl.bases.join(", "))?;
            }
            if !decl.interfaces.is_empty() {
                write!(f, " implements {}", decl.interfaces.join(", "))?;
            }
            writeln!(f)?;
            for member in &decl.body {
                fmt_stmt(f, member, depth + 1)?;
            }
            Ok(())
        }
        Stmt::Function(decl) => {
            if decl.is_static {
                write!(f, "static ")?;
            }
            if decl.is_abstract {
                write!(f, "abstract ")?;
            }
            if decl.is_final {
                write!(f, "final ")?;
            }
            write!(f, "def {}({})", decl.name, fmt_params(&decl.params))?;
            if let Some(ty) = &decl.return_type {
                write!(f, " -> {}", ty)?;
            }
            match &decl.body {
                Some(body) => {
                    writeln!(f)?;
                    for stmt in body {
                        fmt_stmt(f, stmt, depth + 1)?;
                    }
                    Ok(())
                }
                None => writeln!(f, " (abstract)"),
            }
        }
        Stmt::Final(decl) => writeln!(f, "final {}", decl.name),
        Stmt::Expression(stmt) => writeln!(f, "expression {}", describe_expr(&stmt.expression)),
        Stmt::Pass(_) => writeln!(f, "pass"),
        Stmt::Return(stmt) => match &stmt.value {
            Some(value) => writeln!(f, "return {}", describe_expr(value)),
            None => writeln!(f, "return"),
        },
        Stmt::Raise(stmt) => match &stmt.exception {
            Some(exception) => writeln!(f, "raise {}", describe_expr(exception)),
            None => writeln!(f, "raise"),
        },
        Stmt::Import(stmt) => {
            if stmt.is_from {
                let names: Vec<String> = stmt.names.iter().map(|n| n.name.clone()).collect();
                writeln!(f, "from {} import {}", stmt.module, names.join(", "))
            } else {
                writeln!(f, "import {}", stmt.module)
            }
        }
        Stmt::If(stmt) => {
            writeln!(f, "if {}", describe_expr(&stmt.condition))?;
            for s in &stmt.then_body {
                fmt_stmt(f, s, depth + 1)?;
            }
            for (condition, body) in &stmt.elif_branches {
                pad(f, depth)?;
                writeln!(f, "elif {}", describe_expr(condition))?;
                for s in body {
                    fmt_stmt(f, s, depth + 1)?;
                }
            }
            if let Some(body) = &stmt.else_body {
                pad(f, depth)?;
                writeln!(f, "else")?;
                for s in body {
                    fmt_stmt(f, s, depth + 1)?;
                }
            }
            Ok(())
        }
        Stmt::While(stmt) => {
            writeln!(f, "while {}", describe_expr(&stmt.condition))?;
            for s in &stmt.body {
                fmt_stmt(f, s, depth + 1)?;
            }
            Ok(())
        }
        Stmt::For(stmt) => {
            writeln!(
                f,
                "for {} in {}",
                describe_expr(&stmt.target),
                describe_expr(&stmt.iter)
            )?;
            for s in &stmt.body {
                fmt_stmt(f, s, depth + 1)?;
            }
            Ok(())
        }
        Stmt::Switch(stmt) => {
            writeln!(f, "switch {}", describe_expr(&stmt.subject))?;
            for case in &stmt.cases {
                pad(f, depth + 1)?;
                writeln!(f, "case {}", describe_expr(&case.value))?;
                for s in &case.body {
                    fmt_stmt(f, s, depth + 2)?;
                }
            }
            if let Some(body) = &stmt.default {
                pad(f, depth + 1)?;
                writeln!(f, "default")?;
                for s in body {
                    fmt_stmt(f, s, depth + 2)?;
                }
            }
            Ok(())
        }
    }
}

/// One-line summary of an expression for the outline view.
fn describe_expr(expr: &Expr) -> String {
    match expr {
        Expr::Assignment { target, operator, .. } => {
            format!("{} {} ...", describe_expr(target), operator.as_str())
        }
        Expr::Logical { operator, .. } => format!("logical({})", operator.as_str()),
        Expr::Binary { operator, .. } => format!("binary({})", operator.as_str()),
        Expr::Unary { operator, .. } => format!("unary({})", operator.as_str()),
        Expr::Identifier { name, .. } => name.clone(),
        Expr::Attribute { object, name } => format!("{}.{}", describe_expr(object), name),
        Expr::Literal(literal) => match literal {
            Literal::Number(raw) => raw.clone(),
            Literal::Str(raw)
            | Literal::FStr(raw)
            | Literal::RStr(raw)
            | Literal::FrStr(raw)
            | Literal::RegexStr(raw) => raw.clone(),
            Literal::Boolean(true) => "True".to_string(),
            Literal::Boolean(false) => "False".to_string(),
            Literal::None => "None".to_string(),
            Literal::List(items) => format!("list[{}]", items.len()),
            Literal::Set(items) => format!("set[{}]", items.len()),
            Literal::Tuple(items) => format!("tuple[{}]", items.len()),
            Literal::Dict(entries) => format!("dict[{}]", entries.len()),
        },
        Expr::Call { callee, arguments } => {
            format!("{}(... {} args)", describe_expr(callee), arguments.len())
        }
        Expr::Lambda { params, .. } => format!("lambda({})", fmt_params(params)),
        Expr::Subscript { object, .. } => format!("{}[...]", describe_expr(object)),
        Expr::Slice { .. } => "slice".to_string(),
        Expr::Comprehension(comp) => format!("comprehension({:?})", comp.kind),
    }
}
