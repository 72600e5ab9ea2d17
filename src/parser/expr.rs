//! Expression parsing by precedence climbing.
//!
//! A single grammar serves every position an expression can appear in;
//! the context only controls how an opening brace is read. In condition
//! position a brace normally opens the statement block, so the primary
//! level refuses it and leaves it for the caller, unless the token
//! before it is an arrow (a lambda body).

use crate::ast::*;

use super::error::{ParseError, ParseResult};
use super::parser::Parser;
use super::tokens::{Token, TokenType};

/// Where an expression appears, for brace disambiguation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExprContext {
    /// Any position where `{` can only start a dict or set literal.
    General,
    /// `if`/`while`/`for`/`switch` headers, where `{` opens the block.
    Condition,
}

const ASSIGN_OPS: &[TokenType] = &[
    TokenType::Assign,
    TokenType::PlusAssign,
    TokenType::MinusAssign,
    TokenType::StarAssign,
    TokenType::SlashAssign,
    TokenType::PercentAssign,
    TokenType::DoubleStarAssign,
    TokenType::DoubleSlashAssign,
];

fn assign_op(token_type: TokenType) -> AssignOp {
    match token_type {
        TokenType::PlusAssign => AssignOp::Add,
        TokenType::MinusAssign => AssignOp::Sub,
        TokenType::StarAssign => AssignOp::Mul,
        TokenType::SlashAssign => AssignOp::Div,
        TokenType::PercentAssign => AssignOp::Mod,
        TokenType::DoubleStarAssign => AssignOp::Pow,
        TokenType::DoubleSlashAssign => AssignOp::FloorDiv,
        _ => AssignOp::Assign,
    }
}

impl Parser {
    /// Entry point. Returns `None` when the current token cannot start
    /// an expression, without consuming it.
    pub(crate) fn parse_expression(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        self.parse_assignment(ctx)
    }

    /// Like [`parse_expression`](Self::parse_expression) but an absent
    /// expression is an error.
    pub(crate) fn require_expression(&mut self, ctx: ExprContext) -> ParseResult<Expr> {
        match self.parse_expression(ctx)? {
            Some(expr) => Ok(expr),
            None => Err(ParseError::unexpected_token(
                "expression",
                &self.peek().to_string(),
                self.peek().line,
            )),
        }
    }

    // Assignment is right-associative and lowest precedence.
    fn parse_assignment(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        let left = match self.parse_or(ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };

        if self.check_any(ASSIGN_OPS) {
            let op = self.advance();
            let value = match self.parse_assignment(ctx)? {
                Some(expr) => expr,
                None => {
                    return Err(ParseError::unexpected_token(
                        "expression after assignment operator",
                        &self.peek().to_string(),
                        self.peek().line,
                    ))
                }
            };
            return Ok(Some(Expr::Assignment {
                target: Box::new(left),
                value: Box::new(value),
                operator: assign_op(op.token_type),
                line: op.line,
            }));
        }

        Ok(Some(left))
    }

    fn parse_or(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        let mut left = match self.parse_and(ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        while self.match_logical(TokenType::Or) {
            let right = self.require_operand(ctx, "expression after 'or'", Self::parse_and)?;
            left = Expr::Logical {
                operator: LogicalOp::Or,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(Some(left))
    }

    fn parse_and(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        let mut left = match self.parse_membership(ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        while self.match_logical(TokenType::And) {
            let right =
                self.require_operand(ctx, "expression after 'and'", Self::parse_membership)?;
            left = Expr::Logical {
                operator: LogicalOp::And,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(Some(left))
    }

    /// Logical operators may continue across a line break.
    fn match_logical(&mut self, token_type: TokenType) -> bool {
        let checkpoint = self.checkpoint();
        self.skip_newlines();
        if self.match_token(token_type) {
            true
        } else {
            self.restore(checkpoint);
            false
        }
    }

    fn parse_membership(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        let mut left = match self.parse_equality(ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        loop {
            let operator = if self.match_token(TokenType::In) {
                BinaryOp::In
            } else if self.check(TokenType::Not)
                && self.peek_at(1).token_type == TokenType::In
            {
                self.advance();
                self.advance();
                BinaryOp::NotIn
            } else if self.match_token(TokenType::Is) {
                if self.match_token(TokenType::Not) {
                    BinaryOp::IsNot
                } else {
                    BinaryOp::Is
                }
            } else {
                break;
            };
            let right = self.require_operand(ctx, "expression after membership operator", Self::parse_equality)?;
            left = Expr::Binary {
                operator,
                left: Box::new(left),
                right: Box::new(right),
            };
        }
        Ok(Some(left))
    }

    fn parse_equality(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        self.parse_binary_level(
            ctx,
            &[
                (TokenType::Equal, BinaryOp::Eq),
                (TokenType::NotEqual, BinaryOp::NotEq),
            ],
            Self::parse_comparison,
        )
    }

    fn parse_comparison(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        self.parse_binary_level(
            ctx,
            &[
                (TokenType::Less, BinaryOp::Lt),
                (TokenType::Greater, BinaryOp::Gt),
                (TokenType::LessEqual, BinaryOp::Le),
                (TokenType::GreaterEqual, BinaryOp::Ge),
            ],
            Self::parse_addition,
        )
    }

    fn parse_addition(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        self.parse_binary_level(
            ctx,
            &[
                (TokenType::Plus, BinaryOp::Add),
                (TokenType::Minus, BinaryOp::Sub),
            ],
            Self::parse_multiplication,
        )
    }

    fn parse_multiplication(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        self.parse_binary_level(
            ctx,
            &[
                (TokenType::Star, BinaryOp::Mul),
                (TokenType::Slash, BinaryOp::Div),
                (TokenType::Percent, BinaryOp::Mod),
                (TokenType::DoubleSlash, BinaryOp::FloorDiv),
            ],
            Self::parse_exponent,
        )
    }

    fn parse_binary_level(
        &mut self,
        ctx: ExprContext,
        ops: &[(TokenType, BinaryOp)],
        next: fn(&mut Self, ExprContext) -> ParseResult<Option<Expr>>,
    ) -> ParseResult<Option<Expr>> {
        let mut left = match next(self, ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        'outer: loop {
            for (token_type, operator) in ops {
                if self.match_token(*token_type) {
                    let right = self.require_operand(ctx, "expression after operator", next)?;
                    left = Expr::Binary {
                        operator: *operator,
                        left: Box::new(left),
                        right: Box::new(right),
                    };
                    continue 'outer;
                }
            }
            break;
        }
        Ok(Some(left))
    }

    // Exponentiation binds tighter than unary minus on the left but is
    // right-associative.
    fn parse_exponent(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        let left = match self.parse_unary(ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        if self.match_token(TokenType::DoubleStar) {
            let right = self.require_operand(ctx, "expression after '**'", Self::parse_exponent)?;
            return Ok(Some(Expr::Binary {
                operator: BinaryOp::Pow,
                left: Box::new(left),
                right: Box::new(right),
            }));
        }
        Ok(Some(left))
    }

    fn parse_unary(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        // `not in` is a membership operator, not a unary prefix
        if self.check(TokenType::Not) && self.peek_at(1).token_type != TokenType::In {
            self.advance();
            let operand = self.require_operand(ctx, "expression after 'not'", Self::parse_unary)?;
            return Ok(Some(Expr::Unary {
                operator: UnaryOp::Not,
                operand: Box::new(operand),
            }));
        }
        if self.match_token(TokenType::Minus) {
            let operand = self.require_operand(ctx, "expression after '-'", Self::parse_unary)?;
            return Ok(Some(Expr::Unary {
                operator: UnaryOp::Neg,
                operand: Box::new(operand),
            }));
        }
        self.parse_postfix(ctx)
    }

    fn require_operand(
        &mut self,
        ctx: ExprContext,
        expected: &str,
        next: fn(&mut Self, ExprContext) -> ParseResult<Option<Expr>>,
    ) -> ParseResult<Expr> {
        match next(self, ctx)? {
            Some(expr) => Ok(expr),
            None => Err(ParseError::unexpected_token(
                expected,
                &self.peek().to_string(),
                self.peek().line,
            )),
        }
    }

    /// Attribute access, calls and subscripts.
    pub(crate) fn parse_postfix(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        let mut expr = match self.parse_primary(ctx)? {
            Some(expr) => expr,
            None => return Ok(None),
        };
        loop {
            if self.match_token(TokenType::Dot) {
                let name = self.consume(TokenType::Identifier, "attribute name")?;
                expr = Expr::Attribute {
                    object: Box::new(expr),
                    name: name.lexeme().to_string(),
                };
            } else if self.match_token(TokenType::LParen) {
                let arguments = self.parse_arguments()?;
                self.consume(TokenType::RParen, "')'")?;
                expr = Expr::Call {
                    callee: Box::new(expr),
                    arguments,
                };
            } else if self.match_token(TokenType::LBracket) {
                let index = self.parse_subscript_or_slice()?;
                self.consume(TokenType::RBracket, "']'")?;
                expr = Expr::Subscript {
                    object: Box::new(expr),
                    index: Box::new(index),
                };
            } else {
                break;
            }
        }
        Ok(Some(expr))
    }

    fn parse_primary(&mut self, ctx: ExprContext) -> ParseResult<Option<Expr>> {
        if ctx == ExprContext::Condition
            && self.check(TokenType::LBrace)
            && self.is_statement_block()
        {
            // The brace opens the statement block; leave it unconsumed.
            return Ok(None);
        }

        match self.peek().token_type {
            TokenType::TrueLit => {
                self.advance();
                Ok(Some(Expr::Literal(Literal::Boolean(true))))
            }
            TokenType::FalseLit => {
                self.advance();
                Ok(Some(Expr::Literal(Literal::Boolean(false))))
            }
            TokenType::NoneLit => {
                self.advance();
                Ok(Some(Expr::Literal(Literal::None)))
            }
            TokenType::Number => {
                let token = self.advance();
                Ok(Some(Expr::Literal(Literal::Number(
                    token.lexeme().to_string(),
                ))))
            }
            TokenType::String => {
                let token = self.advance();
                Ok(Some(Expr::Literal(Literal::Str(token.lexeme().to_string()))))
            }
            TokenType::FString => {
                let token = self.advance();
                Ok(Some(Expr::Literal(Literal::FStr(
                    token.lexeme().to_string(),
                ))))
            }
            TokenType::RString => {
                let token = self.advance();
                Ok(Some(Expr::Literal(Literal::RStr(
                    token.lexeme().to_string(),
                ))))
            }
            TokenType::FrString => {
                let token = self.advance();
                Ok(Some(Expr::Literal(Literal::FrStr(
                    token.lexeme().to_string(),
                ))))
            }
            TokenType::Regex => {
                let token = self.advance();
                Ok(Some(Expr::Literal(Literal::RegexStr(
                    token.lexeme().to_string(),
                ))))
            }
            TokenType::Identifier => {
                let token = self.advance();
                Ok(Some(Expr::Identifier {
                    name: token.lexeme().to_string(),
                    line: token.line,
                }))
            }
            TokenType::Lambda => Ok(Some(self.parse_lambda(ctx)?)),
            TokenType::LBracket => Ok(Some(self.parse_list_or_comprehension()?)),
            TokenType::LBrace => Ok(Some(self.parse_brace_expression()?)),
            TokenType::LParen => Ok(Some(self.parse_paren_expression()?)),
            _ => Ok(None),
        }
    }

    /// Looking at `{` in condition position: is it the statement block?
    /// Walks back over newlines to the previous significant token; an
    /// arrow there means the brace is a lambda body.
    fn is_statement_block(&self) -> bool {
        let mut i = self.current;
        while i > 0 {
            i -= 1;
            if self.tokens[i].token_type != TokenType::Newline {
                return self.tokens[i].token_type != TokenType::Arrow;
            }
        }
        true
    }

    /// `lambda (params) [: type] -> body` where body is either a braced
    /// expression or a bare one.
    fn parse_lambda(&mut self, ctx: ExprContext) -> ParseResult<Expr> {
        self.consume(TokenType::Lambda, "'lambda'")?;
        self.consume(TokenType::LParen, "'(' after 'lambda'")?;
        let mut params = Vec::new();
        while !self.check(TokenType::RParen) {
            let name = self.consume(TokenType::Identifier, "parameter name")?;
            let type_annotation = if self.match_token(TokenType::Colon) {
                Some(self.parse_type_name()?)
            } else {
                None
            };
            params.push(Parameter {
                name: name.lexeme().to_string(),
                type_annotation,
                default: None,
            });
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        self.consume(TokenType::RParen, "')'")?;

        let return_type = if self.match_token(TokenType::Colon) {
            Some(self.parse_type_name()?)
        } else {
            None
        };

        self.consume(TokenType::Arrow, "'->' before lambda body")?;

        let body = if self.match_token(TokenType::LBrace) {
            self.skip_newlines();
            let body = self.require_expression(ExprContext::General)?;
            self.skip_newlines();
            self.consume(TokenType::RBrace, "'}'")?;
            body
        } else {
            self.require_expression(ctx)?
        };

        Ok(Expr::Lambda {
            params,
            body: Box::new(body),
            return_type,
        })
    }

    fn parse_list_or_comprehension(&mut self) -> ParseResult<Expr> {
        self.consume(TokenType::LBracket, "'['")?;
        if self.match_token(TokenType::RBracket) {
            return Ok(Expr::Literal(Literal::List(Vec::new())));
        }

        let first = self.require_expression(ExprContext::General)?;
        if self.check(TokenType::For) {
            let comp = self.parse_comprehension(first, None, ComprehensionKind::List)?;
            self.consume(TokenType::RBracket, "']'")?;
            return Ok(comp);
        }

        let mut items = vec![first];
        while self.match_token(TokenType::Comma) {
            if self.check(TokenType::RBracket) {
                break;
            }
            items.push(self.require_expression(ExprContext::General)?);
        }
        self.consume(TokenType::RBracket, "']'")?;
        Ok(Expr::Literal(Literal::List(items)))
    }

    /// `{}` is the empty dict; the first expression and the token after
    /// it decide between dict literal, dict comprehension, set literal
    /// and set comprehension.
    fn parse_brace_expression(&mut self) -> ParseResult<Expr> {
        self.consume(TokenType::LBrace, "'{'")?;
        if self.match_token(TokenType::RBrace) {
            return Ok(Expr::Literal(Literal::Dict(Vec::new())));
        }

        let first = self.require_expression(ExprContext::General)?;

        if self.match_token(TokenType::Colon) {
            let value = self.require_expression(ExprContext::General)?;
            if self.check(TokenType::For) {
                let comp =
                    self.parse_comprehension(value, Some(first), ComprehensionKind::Dict)?;
                self.consume(TokenType::RBrace, "'}'")?;
                return Ok(comp);
            }
            let mut entries = vec![DictEntry { key: first, value }];
            while self.match_token(TokenType::Comma) {
                if self.check(TokenType::RBrace) {
                    break;
                }
                let key = self.require_expression(ExprContext::General)?;
                self.consume(TokenType::Colon, "':' in dict literal")?;
                let value = self.require_expression(ExprContext::General)?;
                entries.push(DictEntry { key, value });
            }
            self.consume(TokenType::RBrace, "'}'")?;
            return Ok(Expr::Literal(Literal::Dict(entries)));
        }

        if self.check(TokenType::For) {
            let comp = self.parse_comprehension(first, None, ComprehensionKind::Set)?;
            self.consume(TokenType::RBrace, "'}'")?;
            return Ok(comp);
        }

        let mut items = vec![first];
        while self.match_token(TokenType::Comma) {
            if self.check(TokenType::RBrace) {
                break;
            }
            items.push(self.require_expression(ExprContext::General)?);
        }
        self.consume(TokenType::RBrace, "'}'")?;
        Ok(Expr::Literal(Literal::Set(items)))
    }

    /// `()` is the empty tuple; a trailing comma makes a tuple out of a
    /// parenthesized expression, `for` makes it a generator.
    fn parse_paren_expression(&mut self) -> ParseResult<Expr> {
        self.consume(TokenType::LParen, "'('")?;
        if self.match_token(TokenType::RParen) {
            return Ok(Expr::Literal(Literal::Tuple(Vec::new())));
        }

        let first = self.require_expression(ExprContext::General)?;

        if self.check(TokenType::For) {
            let comp = self.parse_comprehension(first, None, ComprehensionKind::Generator)?;
            self.consume(TokenType::RParen, "')'")?;
            return Ok(comp);
        }

        if self.match_token(TokenType::Comma) {
            let mut items = vec![first];
            while !self.check(TokenType::RParen) {
                items.push(self.require_expression(ExprContext::General)?);
                if !self.match_token(TokenType::Comma) {
                    break;
                }
            }
            self.consume(TokenType::RParen, "')'")?;
            return Ok(Expr::Literal(Literal::Tuple(items)));
        }

        self.consume(TokenType::RParen, "')'")?;
        Ok(first)
    }

    /// Call arguments, positional or `name=value`.
    fn parse_arguments(&mut self) -> ParseResult<Vec<Argument>> {
        let mut arguments = Vec::new();
        while !self.check(TokenType::RParen) {
            let checkpoint = self.checkpoint();
            let name = if self.check(TokenType::Identifier) {
                let token = self.advance();
                if self.match_token(TokenType::Assign) {
                    Some(token.lexeme().to_string())
                } else {
                    self.restore(checkpoint);
                    None
                }
            } else {
                None
            };
            let value = self.require_expression(ExprContext::General)?;
            arguments.push(Argument { name, value });
            if !self.match_token(TokenType::Comma) {
                break;
            }
        }
        Ok(arguments)
    }

    /// Contents of `[...]` after a postfix expression: a plain index or
    /// a slice with up to three elidable parts. The caller consumes the
    /// closing bracket.
    fn parse_subscript_or_slice(&mut self) -> ParseResult<Expr> {
        if self.check(TokenType::RBracket) {
            return Err(ParseError::invalid_syntax(
                "empty subscript",
                self.peek().line,
            ));
        }

        let start = if self.check(TokenType::Colon) {
            None
        } else {
            Some(Box::new(self.require_expression(ExprContext::General)?))
        };

        if self.match_token(TokenType::Colon) {
            let stop = if self.check_any(&[TokenType::Colon, TokenType::RBracket]) {
                None
            } else {
                Some(Box::new(self.require_expression(ExprContext::General)?))
            };
            let step = if self.match_token(TokenType::Colon) {
                if self.check(TokenType::RBracket) {
                    None
                } else {
                    Some(Box::new(self.require_expression(ExprContext::General)?))
                }
            } else {
                None
            };
            return Ok(Expr::Slice { start, stop, step });
        }

        match start {
            Some(index) => Ok(*index),
            None => Err(ParseError::invalid_syntax(
                "invalid subscript",
                self.peek().line,
            )),
        }
    }

    /// Loop and comprehension targets are postfix expressions, possibly
    /// comma-joined into a tuple. Parsing a full expression here would
    /// swallow the `in` keyword as a membership operator.
    pub(crate) fn parse_loop_target(&mut self) -> ParseResult<Expr> {
        let first = match self.parse_postfix(ExprContext::General)? {
            Some(expr) => expr,
            None => {
                return Err(ParseError::unexpected_token(
                    "loop target",
                    &self.peek().to_string(),
                    self.peek().line,
                ))
            }
        };
        if !self.check(TokenType::Comma) {
            return Ok(first);
        }
        let mut items = vec![first];
        while self.match_token(TokenType::Comma) {
            match self.parse_postfix(ExprContext::General)? {
                Some(expr) => items.push(expr),
                None => {
                    return Err(ParseError::unexpected_token(
                        "loop target",
                        &self.peek().to_string(),
                        self.peek().line,
                    ))
                }
            }
        }
        Ok(Expr::Literal(Literal::Tuple(items)))
    }

    /// `for target in iter [if condition]` after the element expression
    /// of a comprehension. The closing delimiter is left to the caller.
    fn parse_comprehension(
        &mut self,
        element: Expr,
        key: Option<Expr>,
        kind: ComprehensionKind,
    ) -> ParseResult<Expr> {
        self.consume(TokenType::For, "'for'")?;
        let target = self.parse_loop_target()?;
        self.consume(TokenType::In, "'in'")?;
        let iter = self.parse_limited_expression(true)?;
        let condition = if self.match_token(TokenType::If) {
            Some(self.parse_limited_expression(false)?)
        } else {
            None
        };
        Ok(Expr::Comprehension(Box::new(ComprehensionExpr {
            element,
            key,
            target,
            iter,
            condition,
            kind,
        })))
    }

    /// Parse an expression bounded by the surrounding comprehension:
    /// scan ahead with a bracket depth counter to find its extent, then
    /// parse just that token span.
    fn parse_limited_expression(&mut self, stop_at_if: bool) -> ParseResult<Expr> {
        let start = self.current;
        let mut end = self.current;
        let mut depth: i32 = 0;
        loop {
            let token_type = self.tokens[end].token_type;
            match token_type {
                TokenType::LParen | TokenType::LBracket | TokenType::LBrace => depth += 1,
                TokenType::RParen | TokenType::RBracket | TokenType::RBrace => {
                    if depth == 0 {
                        break;
                    }
                    depth -= 1;
                }
                TokenType::If if stop_at_if && depth == 0 => break,
                TokenType::Comma if depth == 0 => break,
                TokenType::Newline | TokenType::Eof => break,
                _ => {}
            }
            end += 1;
        }

        if end == start {
            return Err(ParseError::unexpected_token(
                "expression",
                &self.tokens[start].to_string(),
                self.tokens[start].line,
            ));
        }

        let mut span: Vec<Token> = self.tokens[start..end].to_vec();
        let line = self.tokens[end.saturating_sub(1)].line;
        span.push(Token::new(TokenType::Eof, None, line, 0));

        let mut sub = Parser::new(span);
        let expr = sub.require_expression(ExprContext::General)?;
        self.current = end;
        Ok(expr)
    }
}
