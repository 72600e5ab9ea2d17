//! Lowers the Spice AST to Python source text.
//!
//! Interfaces become `typing.Protocol` classes, abstract classes derive
//! from `abc.ABC`, modifiers become decorators and `switch` lowers to
//! an `if`/`elif`/`else` chain. The needed `abc` and `typing` imports
//! are synthesized from what the module actually uses. Output carries
//! exactly one blank line between top-level declarations and ends with
//! a single newline.

use crate::ast::*;

const INDENT: &str = "    ";

pub struct Transformer {
    indent_level: usize,
    in_class: bool,
}

impl Default for Transformer {
    fn default() -> Self {
        Self::new()
    }
}

impl Transformer {
    pub fn new() -> Self {
        Self {
            indent_level: 0,
            in_class: false,
        }
    }

    pub fn transform(&mut self, module: &Module) -> String {
        let mut chunks: Vec<String> = Vec::new();

        let auto_imports = self.synthesized_imports(module);
        if !auto_imports.is_empty() {
            chunks.push(auto_imports.join("\n") + "\n");
        }

        // Declarations get a chunk each; runs of plain statements share
        // one, so imports and assignments stay adjacent. Chunks end in
        // a newline and are joined with one more, giving exactly one
        // blank line between them.
        let mut plain = String::new();
        for stmt in &module.body {
            let is_declaration = matches!(
                stmt,
                Stmt::Interface(_) | Stmt::Class(_) | Stmt::Function(_)
            );
            if is_declaration {
                if !plain.is_empty() {
                    chunks.push(std::mem::take(&mut plain));
                }
                let mut chunk = String::new();
                self.emit_stmt(stmt, &mut chunk);
                chunks.push(chunk);
            } else {
                self.emit_stmt(stmt, &mut plain);
            }
        }
        if !plain.is_empty() {
            chunks.push(plain);
        }

        chunks.join("\n")
    }

    /// Imports required by the constructs used in the module.
    fn synthesized_imports(&self, module: &Module) -> Vec<String> {
        let mut uses_interface = false;
        let mut uses_abstract = false;
        let mut uses_final = false;

        for stmt in &module.body {
            match stmt {
                Stmt::Interface(_) => uses_interface = true,
                Stmt::Class(decl) => {
                    if decl.is_abstract {
                        uses_abstract = true;
                    }
                    if decl.is_final {
                        uses_final = true;
                    }
                    for member in &decl.body {
                        if let Stmt::Function(method) = member {
                            if method.is_abstract {
                                uses_abstract = true;
                            }
                            if method.is_final {
                                uses_final = true;
                            }
                        }
                    }
                }
                Stmt::Function(decl) => {
                    if decl.is_abstract {
                        uses_abstract = true;
                    }
                    if decl.is_final {
                        uses_final = true;
                    }
                }
                _ => {}
            }
        }

        let mut imports = Vec::new();
        if uses_interface || uses_abstract {
            imports.push("from abc import ABC, abstractmethod".to_string());
        }
        let mut typing_names = Vec::new();
        if uses_interface {
            typing_names.push("Protocol");
        }
        if uses_final {
            typing_names.push("final");
        }
        if !typing_names.is_empty() {
            imports.push(format!("from typing import {}", typing_names.join(", ")));
        }
        imports
    }

    fn indent(&self) -> String {
        INDENT.repeat(self.indent_level)
    }

    fn push_line(&self, out: &mut String, line: &str) {
        out.push_str(&self.indent());
        out.push_str(line);
        out.push('\n');
    }

    fn emit_stmt(&mut self, stmt: &Stmt, out: &mut String) {
        match stmt {
            Stmt::Interface(decl) => self.emit_interface(decl, out),
            Stmt::Class(decl) => self.emit_class(decl, out),
            Stmt::Function(decl) => self.emit_function(decl, out),
            Stmt::Final(decl) => {
                let line = match &decl.type_annotation {
                    Some(ty) => {
                        format!("{}: {} = {}", decl.name, ty, emit_expr(&decl.value))
                    }
                    None => format!("{} = {}", decl.name, emit_expr(&decl.value)),
                };
                self.push_line(out, &line);
            }
            Stmt::Expression(stmt) => {
                let line = emit_expr(&stmt.expression);
                self.push_line(out, &line);
            }
            Stmt::Pass(_) => self.push_line(out, "pass"),
            Stmt::Return(stmt) => match &stmt.value {
                Some(value) => {
                    let line = format!("return {}", emit_expr(value));
                    self.push_line(out, &line);
                }
                None => self.push_line(out, "return"),
            },
            Stmt::Raise(stmt) => match &stmt.exception {
                Some(exception) => {
                    let line = format!("raise {}", emit_expr(exception));
                    self.push_line(out, &line);
                }
                None => self.push_line(out, "raise"),
            },
            Stmt::Import(import) => {
                let line = self.format_import(import);
                self.push_line(out, &line);
            }
            Stmt::If(stmt) => self.emit_if(stmt, out),
            Stmt::While(stmt) => {
                let line = format!("while {}:", emit_expr(&stmt.condition));
                self.push_line(out, &line);
                self.emit_body(&stmt.body, out);
            }
            Stmt::For(stmt) => {
                let line = format!(
                    "for {} in {}:",
                    emit_expr(&stmt.target),
                    emit_expr(&stmt.iter)
                );
                self.push_line(out, &line);
                self.emit_body(&stmt.body, out);
            }
            Stmt::Switch(stmt) => self.emit_switch(stmt, out),
        }
    }

    fn format_import(&self, import: &ImportStmt) -> String {
        if import.is_from {
            let names: Vec<String> = import
                .names
                .iter()
                .map(|n| match &n.alias {
                    Some(alias) => format!("{} as {}", n.name, alias),
                    None => n.name.clone(),
                })
                .collect();
            format!("from {} import {}", import.module, names.join(", "))
        } else {
            match &import.alias {
                Some(alias) => format!("import {} as {}", import.module, alias),
                None => format!("import {}", import.module),
            }
        }
    }

    fn emit_interface(&mut self, decl: &InterfaceDecl, out: &mut String) {
        let mut bases = vec!["Protocol".to_string()];
        bases.extend(decl.bases.iter().cloned());
        let header = format!("class {}({}):", decl.name, bases.join(", "));
        self.push_line(out, &header);

        self.indent_level += 1;
        let doc = format!("\"\"\"{} interface.\"\"\"", decl.name);
        self.push_line(out, &doc);

        for method in &decl.methods {
            out.push('\n');
            let params = self.format_signature_params(&method.params);
            let header = match &method.return_type {
                Some(ty) => format!("def {}({}) -> {}:", method.name, params, ty),
                None => format!("def {}({}):", method.name, params),
            };
            self.push_line(out, &header);
            self.indent_level += 1;
            self.push_line(out, "\"\"\"Interface method.\"\"\"");
            self.push_line(out, "...");
            self.indent_level -= 1;
        }
        self.indent_level -= 1;
    }

    fn emit_class(&mut self, decl: &ClassDecl, out: &mut String) {
        if decl.is_final {
            self.push_line(out, "@final");
        }

        let mut bases: Vec<String> = decl.bases.clone();
        bases.extend(decl.interfaces.iter().cloned());
        if decl.is_abstract && bases.is_empty() {
            bases.push("ABC".to_string());
        }
        let header = if bases.is_empty() {
            format!("class {}:", decl.name)
        } else {
            format!("class {}({}):", decl.name, bases.join(", "))
        };
        self.push_line(out, &header);

        self.indent_level += 1;
        let was_in_class = self.in_class;
        self.in_class = true;

        if decl.body.is_empty() {
            self.push_line(out, "pass");
        } else {
            let mut first = true;
            for member in &decl.body {
                let is_declaration = matches!(
                    member,
                    Stmt::Function(_) | Stmt::Class(_) | Stmt::Interface(_)
                );
                if !first && is_declaration {
                    out.push('\n');
                }
                self.emit_stmt(member, out);
                first = false;
            }
        }

        self.in_class = was_in_class;
        self.indent_level -= 1;
    }

    fn emit_function(&mut self, decl: &FunctionDecl, out: &mut String) {
        if decl.is_static {
            self.push_line(out, "@staticmethod");
        }
        if decl.is_abstract {
            self.push_line(out, "@abstractmethod");
        }
        if decl.is_final {
            self.push_line(out, "@final");
        }
        for decorator in &decl.decorators {
            let line = format!("@{}", decorator);
            self.push_line(out, &line);
        }

        let params = if decl.is_static {
            self.format_params(&decl.params)
        } else {
            self.format_method_params(&decl.params)
        };
        let header = match &decl.return_type {
            Some(ty) => format!("def {}({}) -> {}:", decl.name, params, ty),
            None => format!("def {}({}):", decl.name, params),
        };
        self.push_line(out, &header);

        self.indent_level += 1;
        let was_in_class = self.in_class;
        self.in_class = false;
        match &decl.body {
            None => {
                self.push_line(out, "\"\"\"Abstract method.\"\"\"");
                self.push_line(out, "pass");
            }
            Some(body) if body.is_empty() => self.push_line(out, "pass"),
            Some(body) => {
                for stmt in body {
                    self.emit_stmt(stmt, out);
                }
            }
        }
        self.in_class = was_in_class;
        self.indent_level -= 1;
    }

    fn emit_if(&mut self, stmt: &IfStmt, out: &mut String) {
        let line = format!("if {}:", emit_expr(&stmt.condition));
        self.push_line(out, &line);
        self.emit_body(&stmt.then_body, out);
        for (condition, body) in &stmt.elif_branches {
            let line = format!("elif {}:", emit_expr(condition));
            self.push_line(out, &line);
            self.emit_body(body, out);
        }
        if let Some(body) = &stmt.else_body {
            self.push_line(out, "else:");
            self.emit_body(body, out);
        }
    }

    fn emit_switch(&mut self, stmt: &SwitchStmt, out: &mut String) {
        let subject = emit_expr(&stmt.subject);
        if stmt.cases.is_empty() {
            // Degenerate switch: only the default body remains.
            if let Some(body) = &stmt.default {
                for stmt in body {
                    self.emit_stmt(stmt, out);
                }
            }
            return;
        }
        for (index, case) in stmt.cases.iter().enumerate() {
            let keyword = if index == 0 { "if" } else { "elif" };
            let line = format!("{} {} == {}:", keyword, subject, emit_expr(&case.value));
            self.push_line(out, &line);
            self.emit_body(&case.body, out);
        }
        if let Some(body) = &stmt.default {
            self.push_line(out, "else:");
            self.emit_body(body, out);
        }
    }

    fn emit_body(&mut self, body: &[Stmt], out: &mut String) {
        self.indent_level += 1;
        if body.is_empty() {
            self.push_line(out, "pass");
        } else {
            for stmt in body {
                self.emit_stmt(stmt, out);
            }
        }
        self.indent_level -= 1;
    }

    fn format_params(&self, params: &[Parameter]) -> String {
        params
            .iter()
            .map(format_param)
            .collect::<Vec<_>>()
            .join(", ")
    }

    /// Method parameters: `self` is synthesized when the source omits it.
    fn format_method_params(&self, params: &[Parameter]) -> String {
        if !self.in_class {
            return self.format_params(params);
        }
        let needs_self = params.first().map(|p| p.name != "self").unwrap_or(true);
        let mut parts = Vec::new();
        if needs_self {
            parts.push("self".to_string());
        }
        parts.extend(params.iter().map(format_param));
        parts.join(", ")
    }

    /// Interface signatures always take `self` first.
    fn format_signature_params(&self, params: &[Parameter]) -> String {
        let needs_self = params.first().map(|p| p.name != "self").unwrap_or(true);
        let mut parts = Vec::new();
        if needs_self {
            parts.push("self".to_string());
        }
        parts.extend(params.iter().map(format_param));
        parts.join(", ")
    }
}

fn format_param(param: &Parameter) -> String {
    let mut text = param.name.clone();
    if let Some(ty) = &param.type_annotation {
        text.push_str(": ");
        text.push_str(ty);
    }
    if let Some(default) = &param.default {
        text.push_str(" = ");
        text.push_str(&emit_expr(default));
    }
    text
}

/// Render an expression as Python source.
pub fn emit_expr(expr: &Expr) -> String {
    match expr {
        Expr::Assignment {
            target,
            value,
            operator,
            ..
        } => format!(
            "{} {} {}",
            emit_expr(target),
            operator.as_str(),
            emit_expr(value)
        ),
        Expr::Logical {
            operator,
            left,
            right,
        } => format!(
            "({} {} {})",
            emit_expr(left),
            operator.as_str(),
            emit_expr(right)
        ),
        Expr::Binary {
            operator,
            left,
            right,
        } => format!(
            "{} {} {}",
            emit_expr(left),
            operator.as_str(),
            emit_expr(right)
        ),
        Expr::Unary { operator, operand } => match operator {
            UnaryOp::Not => format!("(not {})", emit_expr(operand)),
            UnaryOp::Neg => format!("(-{})", emit_expr(operand)),
        },
        Expr::Identifier { name, .. } => name.clone(),
        Expr::Attribute { object, name } => format!("{}.{}", emit_expr(object), name),
        Expr::Literal(literal) => emit_literal(literal),
        Expr::Call { callee, arguments } => {
            let args: Vec<String> = arguments
                .iter()
                .map(|arg| match &arg.name {
                    Some(name) => format!("{}={}", name, emit_expr(&arg.value)),
                    None => emit_expr(&arg.value),
                })
                .collect();
            format!("{}({})", emit_expr(callee), args.join(", "))
        }
        Expr::Lambda { params, body, .. } => {
            // Python lambdas cannot carry annotations; types are dropped.
            let names: Vec<&str> = params.iter().map(|p| p.name.as_str()).collect();
            if names.is_empty() {
                format!("lambda: {}", emit_expr(body))
            } else {
                format!("lambda {}: {}", names.join(", "), emit_expr(body))
            }
        }
        Expr::Subscript { object, index } => {
            format!("{}[{}]", emit_expr(object), emit_expr(index))
        }
        Expr::Slice { start, stop, step } => {
            let part = |e: &Option<Box<Expr>>| e.as_ref().map(|e| emit_expr(e)).unwrap_or_default();
            match step {
                Some(step) => format!("{}:{}:{}", part(start), part(stop), emit_expr(step)),
                None => format!("{}:{}", part(start), part(stop)),
            }
        }
        Expr::Comprehension(comp) => emit_comprehension(comp),
    }
}

fn emit_comprehension(comp: &ComprehensionExpr) -> String {
    let mut clause = format!(
        "for {} in {}",
        emit_expr(&comp.target),
        emit_expr(&comp.iter)
    );
    if let Some(condition) = &comp.condition {
        clause.push_str(&format!(" if {}", emit_expr(condition)));
    }
    match comp.kind {
        ComprehensionKind::List => format!("[{} {}]", emit_expr(&comp.element), clause),
        ComprehensionKind::Set => format!("{{{} {}}}", emit_expr(&comp.element), clause),
        ComprehensionKind::Dict => {
            let key = comp
                .key
                .as_ref()
                .map(emit_expr)
                .unwrap_or_default();
            format!("{{{}: {} {}}}", key, emit_expr(&comp.element), clause)
        }
        ComprehensionKind::Generator => format!("({} {})", emit_expr(&comp.element), clause),
    }
}

fn emit_literal(literal: &Literal) -> String {
    match literal {
        Literal::Number(raw) => raw.clone(),
        Literal::Str(raw)
        | Literal::FStr(raw)
        | Literal::RStr(raw)
        | Literal::FrStr(raw)
        | Literal::RegexStr(raw) => raw.clone(),
        Literal::Boolean(true) => "True".to_string(),
        Literal::Boolean(false) => "False".to_string(),
        Literal::None => "None".to_string(),
        Literal::List(items) => format!("[{}]", emit_items(items)),
        Literal::Set(items) => {
            if items.is_empty() {
                "set()".to_string()
            } else {
                format!("{{{}}}", emit_items(items))
            }
        }
        Literal::Tuple(items) => match items.len() {
            0 => "()".to_string(),
            1 => format!("({},)", emit_expr(&items[0])),
            _ => format!("({})", emit_items(items)),
        },
        Literal::Dict(entries) => {
            let parts: Vec<String> = entries
                .iter()
                .map(|entry| format!("{}: {}", emit_expr(&entry.key), emit_expr(&entry.value)))
                .collect();
            format!("{{{}}}", parts.join(", "))
        }
    }
}

fn emit_items(items: &[Expr]) -> String {
    items
        .iter()
        .map(emit_expr)
        .collect::<Vec<_>>()
        .join(", ")
}
