//! Recursive-descent statement parser for Spice.
//!
//! Blocks are brace-delimited; newlines are insignificant except as
//! statement terminators. The parser is single-pass with bounded
//! lookahead plus a checkpoint/restore primitive for the few places
//! that need speculative parsing.

use crate::ast::*;

use super::error::{ParseError, ParseResult};
use super::expr::ExprContext;
use super::tokens::{Token, TokenType};

pub struct Parser {
    pub(crate) tokens: Vec<Token>,
    pub(crate) current: usize,
}

/// Opaque cursor position used to rewind speculative parses.
#[derive(Debug, Clone, Copy)]
pub struct Checkpoint(usize);

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self { tokens, current: 0 }
    }

    /// Parse a complete module. The first error is terminal.
    pub fn parse(&mut self) -> ParseResult<Module> {
        let mut body = Vec::new();
        loop {
            self.skip_newlines();
            if self.is_at_end() {
                break;
            }
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        Ok(Module { body })
    }

    // Cursor primitives

    pub(crate) fn peek(&self) -> &Token {
        &self.tokens[self.current]
    }

    pub(crate) fn peek_at(&self, offset: usize) -> &Token {
        let index = (self.current + offset).min(self.tokens.len() - 1);
        &self.tokens[index]
    }

    pub(crate) fn previous(&self) -> &Token {
        &self.tokens[self.current - 1]
    }

    pub(crate) fn is_at_end(&self) -> bool {
        self.peek().token_type == TokenType::Eof
    }

    pub(crate) fn advance(&mut self) -> Token {
        let token = self.peek().clone();
        if !self.is_at_end() {
            self.current += 1;
        }
        token
    }

    pub(crate) fn check(&self, token_type: TokenType) -> bool {
        self.peek().token_type == token_type
    }

    pub(crate) fn check_any(&self, token_types: &[TokenType]) -> bool {
        token_types.contains(&self.peek().token_type)
    }

    pub(crate) fn match_token(&mut self, token_type: TokenType) -> bool {
        if self.check(token_type) {
            self.advance();
            true
        } else {
            false
        }
    }

    pub(crate) fn consume(&mut self, token_type: TokenType, expected: &str) -> ParseResult<Token> {
        if self.check(token_type) {
            return Ok(self.advance());
        }
        if self.is_at_end() {
            return Err(ParseError::unexpected_end_of_input(
                expected,
                self.peek().line,
            ));
        }
        Err(ParseError::unexpected_token(
            expected,
            &self.peek().to_string(),
            self.peek().line,
        ))
    }

    pub(crate) fn checkpoint(&self) -> Checkpoint {
        Checkpoint(self.current)
    }

    pub(crate) fn restore(&mut self, checkpoint: Checkpoint) {
        self.current = checkpoint.0;
    }

    pub(crate) fn skip_newlines(&mut self) {
        while self.check(TokenType::Newline) {
            self.advance();
        }
    }

    // Statements

    pub(crate) fn parse_statement(&mut self) -> ParseResult<Option<Stmt>> {
        match self.peek().token_type {
            TokenType::Interface => Ok(Some(self.parse_interface()?)),
            TokenType::Final if self.peek_at(1).token_type == TokenType::Identifier => {
                Ok(Some(self.parse_final_declaration()?))
            }
            TokenType::Abstract | TokenType::Final | TokenType::Static | TokenType::Class
            | TokenType::Def => Ok(Some(self.parse_declaration()?)),
            TokenType::Return => Ok(Some(self.parse_return()?)),
            TokenType::Raise => Ok(Some(self.parse_raise()?)),
            TokenType::Pass => {
                self.advance();
                let has_semicolon = self.statement_terminator()?;
                Ok(Some(Stmt::Pass(PassStmt { has_semicolon })))
            }
            TokenType::Import | TokenType::From => Ok(Some(self.parse_import()?)),
            TokenType::If => Ok(Some(self.parse_if()?)),
            TokenType::While => Ok(Some(self.parse_while()?)),
            TokenType::For => Ok(Some(self.parse_for()?)),
            TokenType::Switch => Ok(Some(self.parse_switch()?)),
            _ => self.parse_expression_statement(),
        }
    }

    /// A class or function declaration, with any leading modifiers.
    fn parse_declaration(&mut self) -> ParseResult<Stmt> {
        let mut is_abstract = false;
        let mut is_final = false;
        let mut is_static = false;
        loop {
            if self.match_token(TokenType::Abstract) {
                is_abstract = true;
            } else if self.match_token(TokenType::Final) {
                is_final = true;
            } else if self.match_token(TokenType::Static) {
                is_static = true;
            } else {
                break;
            }
        }

        if self.check(TokenType::Class) {
            if is_static {
                return Err(ParseError::invalid_syntax(
                    "'static' is not valid on classes",
                    self.peek().line,
                ));
            }
            self.parse_class(is_abstract, is_final)
        } else if self.check(TokenType::Def) {
            self.parse_function(is_static, is_abstract, is_final)
        } else {
            Err(ParseError::unexpected_token(
                "'class' or 'def' after modifier",
                &self.peek().to_string(),
                self.peek().line,
            ))
        }
    }

    fn parse_interface(&mut self) -> ParseResult<Stmt> {
        let keyword = self.consume(TokenType::Interface, "'interface'")?;
        let name = self.consume(TokenType::Identifier, "interface name")?;

        let mut bases = Vec::new();
        if self.match_token(TokenType::Extends) {
            loop {
                let base = self.consume(TokenType::Identifier, "base interface name")?;
                bases.push(base.lexeme().to_string());
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        } else if self.match_token(TokenType::LParen) {
            while !self.check(TokenType::RParen) {
                let base = self.consume(TokenType::Identifier, "base interface name")?;
                bases.push(base.lexeme().to_string());
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
            self.consume(TokenType::RParen, "')'")?;
        }

        self.skip_newlines();
        self.consume(TokenType::LBrace, "'{'")?;

        let mut methods = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenType::RBrace) {
                break;
            }
            methods.push(self.parse_method_signature()?);
        }
        self.consume(TokenType::RBrace, "'}'")?;

        Ok(Stmt::Interface(InterfaceDecl {
            name: name.lexeme().to_string(),
            methods,
            bases,
            line: keyword.line,
        }))
    }

    /// A bodiless `def name(params) -> type;` signature.
    fn parse_method_signature(&mut self) -> ParseResult<MethodSignature> {
        let keyword = self.consume(TokenType::Def, "'def'")?;
        let name = self.consume(TokenType::Identifier, "method name")?;

        self.consume(TokenType::LParen, "'('")?;
        let params = self.parse_parameters()?;
        self.consume(TokenType::RParen, "')'")?;

        let return_type = if self.match_token(TokenType::Arrow) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        self.match_token(TokenType::Semicolon);

        Ok(MethodSignature {
            name: name.lexeme().to_string(),
            params,
            return_type,
            line: keyword.line,
        })
    }

    fn parse_class(&mut self, is_abstract: bool, is_final: bool) -> ParseResult<Stmt> {
        let keyword = self.consume(TokenType::Class, "'class'")?;
        let name = self.consume(TokenType::Identifier, "class name")?;

        // Base classes come from either the parenthesized list or an
        // `extends` clause, never both.
        let mut bases = Vec::new();
        if self.match_token(TokenType::LParen) {
            while !self.check(TokenType::RParen) {
                let base = self.consume(TokenType::Identifier, "base class name")?;
                bases.push(base.lexeme().to_string());
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
            self.consume(TokenType::RParen, "')'")?;
            if self.check(TokenType::Extends) {
                return Err(ParseError::invalid_syntax(
                    "cannot combine a base list with 'extends'",
                    self.peek().line,
                ));
            }
        } else if self.match_token(TokenType::Extends) {
            loop {
                let base = self.consume(TokenType::Identifier, "base class name")?;
                bases.push(base.lexeme().to_string());
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        }

        let mut interfaces = Vec::new();
        if self.match_token(TokenType::Implements) {
            loop {
                let name = self.consume(TokenType::Identifier, "interface name")?;
                interfaces.push(name.lexeme().to_string());
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
        }

        self.skip_newlines();
        let body = self.parse_block()?;

        Ok(Stmt::Class(ClassDecl {
            name: name.lexeme().to_string(),
            body,
            bases,
            interfaces,
            is_abstract,
            is_final,
            line: keyword.line,
        }))
    }

    fn parse_function(
        &mut self,
        is_static: bool,
        is_abstract: bool,
        is_final: bool,
    ) -> ParseResult<Stmt> {
        let keyword = self.consume(TokenType::Def, "'def'")?;
        let name = self.consume(TokenType::Identifier, "function name")?;

        self.consume(TokenType::LParen, "'('")?;
        let params = self.parse_parameters()?;
        self.consume(TokenType::RParen, "')'")?;

        // Both `-> type` and `: type` spellings are accepted.
        let return_type = if self.match_token(TokenType::Arrow) {
            Some(self.parse_type_name()?)
        } else if self.match_token(TokenType::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        let body = if is_abstract && !self.check(TokenType::LBrace) {
            // Abstract members are bodiless, semicolon-terminated stubs.
            self.match_token(TokenType::Semicolon);
            None
        } else {
            self.skip_newlines();
            if !self.check(TokenType::LBrace) {
                return Err(ParseError::unexpected_token(
                    "'{' to open function body",
                    &self.peek().to_string(),
                    self.peek().line,
                ));
            }
            Some(self.parse_block()?)
        };

        Ok(Stmt::Function(FunctionDecl {
            name: name.lexeme().to_string(),
            params,
            body,
            return_type,
            is_static,
            is_abstract,
            is_final,
            decorators: Vec::new(),
            line: keyword.line,
        }))
    }

    fn parse_final_declaration(&mut self) -> ParseResult<Stmt> {
        let keyword = self.consume(TokenType::Final, "'final'")?;
        let name = self.consume(TokenType::Identifier, "variable name")?;

        let type_annotation = if self.match_token(TokenType::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        self.consume(TokenType::Assign, "'=' in final declaration")?;
        let value = self.require_expression(ExprContext::General)?;
        self.statement_terminator()?;

        Ok(Stmt::Final(FinalDecl {
            name: name.lexeme().to_string(),
            type_annotation,
            value,
            line: keyword.line,
        }))
    }

    fn parse_return(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let value = if self.check_any(&[
            TokenType::Semicolon,
            TokenType::Newline,
            TokenType::RBrace,
            TokenType::Eof,
        ]) {
            None
        } else {
            Some(self.require_expression(ExprContext::General)?)
        };
        let has_semicolon = self.statement_terminator()?;
        Ok(Stmt::Return(ReturnStmt {
            value,
            has_semicolon,
        }))
    }

    fn parse_raise(&mut self) -> ParseResult<Stmt> {
        self.advance();
        let exception = if self.check_any(&[
            TokenType::Semicolon,
            TokenType::Newline,
            TokenType::RBrace,
            TokenType::Eof,
        ]) {
            None
        } else {
            Some(self.require_expression(ExprContext::General)?)
        };
        let has_semicolon = self.statement_terminator()?;
        Ok(Stmt::Raise(RaiseStmt {
            exception,
            has_semicolon,
        }))
    }

    fn parse_import(&mut self) -> ParseResult<Stmt> {
        if self.match_token(TokenType::From) {
            let module = self.parse_dotted_name()?;
            self.consume(TokenType::Import, "'import'")?;

            let mut names = Vec::new();
            loop {
                let name = self.consume(TokenType::Identifier, "imported name")?;
                let alias = if self.match_token(TokenType::As) {
                    let alias = self.consume(TokenType::Identifier, "alias name")?;
                    Some(alias.lexeme().to_string())
                } else {
                    None
                };
                names.push(ImportedName {
                    name: name.lexeme().to_string(),
                    alias,
                });
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }

            let has_semicolon = self.statement_terminator()?;
            Ok(Stmt::Import(ImportStmt {
                module,
                names,
                alias: None,
                is_from: true,
                has_semicolon,
            }))
        } else {
            self.consume(TokenType::Import, "'import'")?;
            let module = self.parse_dotted_name()?;
            let alias = if self.match_token(TokenType::As) {
                let alias = self.consume(TokenType::Identifier, "alias name")?;
                Some(alias.lexeme().to_string())
            } else {
                None
            };
            let has_semicolon = self.statement_terminator()?;
            Ok(Stmt::Import(ImportStmt {
                module,
                names: Vec::new(),
                alias,
                is_from: false,
                has_semicolon,
            }))
        }
    }

    fn parse_dotted_name(&mut self) -> ParseResult<String> {
        let first = self.consume(TokenType::Identifier, "module name")?;
        let mut name = first.lexeme().to_string();
        while self.match_token(TokenType::Dot) {
            let part = self.consume(TokenType::Identifier, "module name after '.'")?;
            name.push('.');
            name.push_str(part.lexeme());
        }
        Ok(name)
    }

    fn parse_if(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::If, "'if'")?;
        let condition = self.require_expression(ExprContext::Condition)?;
        self.skip_newlines();
        let then_body = self.parse_block()?;

        let mut elif_branches = Vec::new();
        let mut else_body = None;
        loop {
            let checkpoint = self.checkpoint();
            self.skip_newlines();
            if self.match_token(TokenType::Elif) {
                let condition = self.require_expression(ExprContext::Condition)?;
                self.skip_newlines();
                let body = self.parse_block()?;
                elif_branches.push((condition, body));
            } else if self.match_token(TokenType::Else) {
                self.skip_newlines();
                else_body = Some(self.parse_block()?);
                break;
            } else {
                self.restore(checkpoint);
                break;
            }
        }

        Ok(Stmt::If(IfStmt {
            condition,
            then_body,
            elif_branches,
            else_body,
        }))
    }

    fn parse_while(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::While, "'while'")?;
        let condition = self.require_expression(ExprContext::Condition)?;
        self.skip_newlines();
        let body = self.parse_block()?;
        Ok(Stmt::While(WhileStmt { condition, body }))
    }

    fn parse_for(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::For, "'for'")?;
        let target = self.parse_loop_target()?;
        self.consume(TokenType::In, "'in'")?;
        let iter = self.require_expression(ExprContext::Condition)?;
        self.skip_newlines();
        let body = self.parse_block()?;
        Ok(Stmt::For(ForStmt { target, iter, body }))
    }

    fn parse_switch(&mut self) -> ParseResult<Stmt> {
        self.consume(TokenType::Switch, "'switch'")?;
        let subject = self.require_expression(ExprContext::Condition)?;
        self.skip_newlines();
        self.consume(TokenType::LBrace, "'{'")?;

        let mut cases = Vec::new();
        let mut default = None;
        loop {
            self.skip_newlines();
            if self.check(TokenType::RBrace) {
                break;
            }
            if self.match_token(TokenType::Case) {
                let value = self.require_expression(ExprContext::Condition)?;
                self.skip_newlines();
                let body = self.parse_block()?;
                cases.push(CaseClause { value, body });
            } else if self.match_token(TokenType::Default) {
                if default.is_some() {
                    return Err(ParseError::invalid_syntax(
                        "duplicate 'default' clause in switch",
                        self.previous().line,
                    ));
                }
                self.skip_newlines();
                default = Some(self.parse_block()?);
            } else {
                return Err(ParseError::unexpected_token(
                    "'case', 'default' or '}'",
                    &self.peek().to_string(),
                    self.peek().line,
                ));
            }
        }
        self.consume(TokenType::RBrace, "'}'")?;

        Ok(Stmt::Switch(SwitchStmt {
            subject,
            cases,
            default,
        }))
    }

    fn parse_expression_statement(&mut self) -> ParseResult<Option<Stmt>> {
        match self.parse_expression(ExprContext::General)? {
            Some(expression) => {
                let has_semicolon = self.statement_terminator()?;
                Ok(Some(Stmt::Expression(ExpressionStmt {
                    expression,
                    has_semicolon,
                })))
            }
            None => Err(ParseError::unexpected_token(
                "statement",
                &self.peek().to_string(),
                self.peek().line,
            )),
        }
    }

    /// Brace-delimited statement block.
    pub(crate) fn parse_block(&mut self) -> ParseResult<Vec<Stmt>> {
        self.consume(TokenType::LBrace, "'{'")?;
        let mut body = Vec::new();
        loop {
            self.skip_newlines();
            if self.check(TokenType::RBrace) {
                break;
            }
            if self.is_at_end() {
                return Err(ParseError::unexpected_end_of_input(
                    "'}'",
                    self.peek().line,
                ));
            }
            if let Some(stmt) = self.parse_statement()? {
                body.push(stmt);
            }
        }
        self.consume(TokenType::RBrace, "'}'")?;
        Ok(body)
    }

    fn parse_parameters(&mut self) -> ParseResult<Vec<Parameter>> {
        let mut params = Vec::new();
        while !self.check(TokenType::RParen) {
            params.push(self.parse_parameter()?);
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        Ok(params)
    }

    fn parse_parameter(&mut self) -> ParseResult<Parameter> {
        let name = self.consume(TokenType::Identifier, "parameter name")?;
        let type_annotation = if self.match_token(TokenType::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };
        let default = if self.match_token(TokenType::Assign) {
            Some(self.require_expression(ExprContext::General)?)
        } else {
            None
        };
        Ok(Parameter {
            name: name.lexeme().to_string(),
            type_annotation,
            default,
        })
    }

    /// Type annotations are single names; `None` is accepted as the
    /// conventional spelling for procedures.
    pub(crate) fn parse_type_name(&mut self) -> ParseResult<String> {
        if self.check(TokenType::Identifier) {
            let token = self.advance();
            Ok(token.lexeme().to_string())
        } else if self.match_token(TokenType::NoneLit) {
            Ok("None".to_string())
        } else {
            Err(ParseError::unexpected_token(
                "type name",
                &self.peek().to_string(),
                self.peek().line,
            ))
        }
    }

    /// Consume a statement terminator and report whether it was a
    /// semicolon. A closing brace or end of input also terminates.
    pub(crate) fn statement_terminator(&mut self) -> ParseResult<bool> {
        if self.match_token(TokenType::Semicolon) {
            return Ok(true);
        }
        if self.match_token(TokenType::Newline) {
            return Ok(false);
        }
        if self.check(TokenType::RBrace) || self.is_at_end() {
            return Ok(false);
        }
        Err(ParseError::unexpected_token(
            "';' or newline",
            &self.peek().to_string(),
            self.peek().line,
        ))
    }
}
