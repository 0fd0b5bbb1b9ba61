//! # Axe Parser
//!
//! Recursive-descent parser turning a token stream into a flat `Vec<Stmt>`.
//!
//! Axe's grammar has no operator precedence -- `expression : expression
//! operator factor` folds strictly left to right -- so `parse_expression`
//! is a simple loop rather than a precedence table. Unary minus is the one
//! surprise: `factor : SUB expression` swallows a full expression, not just
//! the next factor, so `-1+2` parses as `-(1+2)`, not `(-1)+2`.

#[macro_use]
mod macros;
pub mod ast;

#[cfg(test)]
mod tests;

use crate::error::{AxeError, ErrorKind};
use crate::lexer::token::{Token, TokenKind};
use ast::{Axis, Command, Expr, GotoTarget, MetaKind, Op, PixelOp, Pointer, Region, Stmt};

pub struct ParseResult {
    pub stmts: Vec<Stmt>,
    pub errors: Vec<AxeError>,
}

#[must_use]
pub fn parse(tokens: &[Token]) -> ParseResult {
    let mut parser = Parser {
        tokens,
        pos: 0,
        errors: Vec::new(),
    };
    let stmts = parser.parse_block(&[]);
    ParseResult {
        stmts,
        errors: parser.errors,
    }
}

struct Parser<'a> {
    tokens: &'a [Token],
    pos: usize,
    errors: Vec<AxeError>,
}

impl<'a> Parser<'a> {
    fn peek(&self) -> &Token {
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn at_end(&self) -> bool {
        matches!(self.peek().kind, TokenKind::Eof)
    }

    fn advance(&mut self) -> Token {
        let tok = self.tokens[self.pos.min(self.tokens.len() - 1)].clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }

    fn skip_separators(&mut self) {
        while matches!(self.peek_kind(), TokenKind::Newline | TokenKind::Colon) {
            self.advance();
        }
    }

    fn expect_separator(&mut self) -> Result<(), AxeError> {
        if self.at_end() {
            return Ok(());
        }
        if !matches!(self.peek_kind(), TokenKind::Newline | TokenKind::Colon) {
            return Err(AxeError::unexpected_token(self.peek_kind().clone(), self.peek().span));
        }
        self.skip_separators();
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token, AxeError> {
        if *self.peek_kind() == kind {
            Ok(self.advance())
        } else {
            Err(AxeError::unexpected_token(self.peek_kind().clone(), self.peek().span))
        }
    }

    /// Parses statements until `End`, `Else`, or end of input.
    fn parse_block(&mut self, _terminators: &[TokenKind]) -> Vec<Stmt> {
        let mut stmts = Vec::new();
        loop {
            self.skip_separators();
            if self.at_end() || matches!(self.peek_kind(), TokenKind::End | TokenKind::Else) {
                break;
            }
            match self.parse_stmt() {
                Ok(Some(stmt)) => stmts.push(stmt),
                Ok(None) => {}
                Err(err) => {
                    self.errors.push(err);
                    self.recover();
                }
            }
        }
        stmts
    }

    /// Error recovery: skip to the next separator (or End/Eof) so later
    /// statements can still be parsed and reported on.
    fn recover(&mut self) {
        while !self.at_end()
            && !matches!(
                self.peek_kind(),
                TokenKind::Newline | TokenKind::Colon | TokenKind::End
            )
        {
            self.advance();
        }
        self.skip_separators();
    }

    fn parse_stmt(&mut self) -> Result<Option<Stmt>, AxeError> {
        match self.peek_kind().clone() {
            TokenKind::Lbl => {
                self.advance();
                let name = self.expect_name()?;
                self.expect_separator()?;
                Ok(Some(Stmt::Label(name)))
            }
            TokenKind::Goto => {
                self.advance();
                if matches!(self.peek_kind(), TokenKind::LParen) {
                    self.advance();
                    let e = self.parse_expression()?;
                    self.expect(TokenKind::RParen)?;
                    self.expect_separator()?;
                    Ok(Some(Stmt::Goto(GotoTarget::Computed(e))))
                } else {
                    let name = self.expect_name()?;
                    self.expect_separator()?;
                    Ok(Some(Stmt::Goto(GotoTarget::Name(name))))
                }
            }
            TokenKind::Disp => {
                self.advance();
                let e = self.parse_expression()?;
                self.expect_separator()?;
                Ok(Some(Stmt::Disp(e)))
            }
            TokenKind::Pause => {
                self.advance();
                let e = self.parse_expression()?;
                self.expect_separator()?;
                Ok(Some(Stmt::Pause(e)))
            }
            TokenKind::DiagnosticOn | TokenKind::DiagnosticOff => {
                self.advance();
                self.expect_separator()?;
                Ok(Some(Stmt::NotImplemented))
            }
            TokenKind::If => {
                self.advance();
                let cond = self.parse_expression()?;
                self.expect_separator()?;
                let then_body = self.parse_block(&[]);
                if matches!(self.peek_kind(), TokenKind::Else) {
                    self.advance();
                    self.expect_separator()?;
                    let else_body = self.parse_block(&[]);
                    self.expect(TokenKind::End)?;
                    self.expect_separator()?;
                    Ok(Some(Stmt::IfElse {
                        cond,
                        then_body,
                        else_body,
                    }))
                } else {
                    self.expect(TokenKind::End)?;
                    self.expect_separator()?;
                    Ok(Some(Stmt::If {
                        cond,
                        body: then_body,
                    }))
                }
            }
            TokenKind::While => {
                self.advance();
                let cond = self.parse_expression()?;
                self.expect_separator()?;
                let body = self.parse_block(&[]);
                self.expect(TokenKind::End)?;
                self.expect_separator()?;
                Ok(Some(Stmt::While { cond, body }))
            }
            TokenKind::Repeat => {
                self.advance();
                let cond = self.parse_expression()?;
                self.expect_separator()?;
                let body = self.parse_block(&[]);
                self.expect(TokenKind::End)?;
                self.expect_separator()?;
                Ok(Some(Stmt::Repeat { cond, body }))
            }
            TokenKind::For => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                // Disambiguate `For(ptr, start, end)` from `For(expr)` by
                // trying to parse a pointer first.
                if let Some(ptr) = self.try_parse_pointer()? {
                    self.expect(TokenKind::Comma)?;
                    let start = self.parse_expression()?;
                    self.expect(TokenKind::Comma)?;
                    let end = self.parse_expression()?;
                    self.expect(TokenKind::RParen)?;
                    self.expect_separator()?;
                    let body = self.parse_block(&[]);
                    self.expect(TokenKind::End)?;
                    self.expect_separator()?;
                    Ok(Some(Stmt::For {
                        ptr,
                        start,
                        end,
                        body,
                    }))
                } else {
                    let end = self.parse_expression()?;
                    self.expect(TokenKind::RParen)?;
                    self.expect_separator()?;
                    let body = self.parse_block(&[]);
                    self.expect(TokenKind::End)?;
                    self.expect_separator()?;
                    // A fixed scratch pointer in the TEMP region; the
                    // original references an undeclared global here, so
                    // offset 0 is used (a single `For(expr)` loop never
                    // needs more than one scratch slot at a time).
                    let ptr = Pointer::region(Region::Temp, Expr::Int(0), 2);
                    Ok(Some(Stmt::For {
                        ptr,
                        start: Expr::Int(0),
                        end,
                        body,
                    }))
                }
            }
            TokenKind::PxlOn => pixel_stmt!(self, PixelOp::On),
            TokenKind::PxlOff => pixel_stmt!(self, PixelOp::Off),
            TokenKind::PxlChange => pixel_stmt!(self, PixelOp::Change),
            TokenKind::Rect => rect_stmt!(self, false),
            TokenKind::RectI => rect_stmt!(self, true),
            TokenKind::Circle => {
                self.advance();
                let (args, buf) = self.parse_buffered_args(3)?;
                let mut args = args.into_iter();
                let x = args.next().unwrap();
                let y = args.next().unwrap();
                let r = args.next().unwrap();
                self.expect_separator()?;
                Ok(Some(Stmt::Circle { buf, x, y, r }))
            }
            TokenKind::Line => {
                self.advance();
                let (args, buf) = self.parse_buffered_args(4)?;
                let mut args = args.into_iter();
                let x1 = args.next().unwrap();
                let y1 = args.next().unwrap();
                let x2 = args.next().unwrap();
                let y2 = args.next().unwrap();
                self.expect_separator()?;
                Ok(Some(Stmt::Line {
                    buf,
                    x1,
                    y1,
                    x2,
                    y2,
                }))
            }
            TokenKind::Horizontal => self.parse_shift(Axis::Horizontal),
            TokenKind::Vertical => self.parse_shift(Axis::Vertical),
            TokenKind::DispGraph => self.parse_dispgraph(),
            TokenKind::ClrDraw => self.parse_clrdraw(),
            TokenKind::Exit => {
                self.advance();
                self.expect_separator()?;
                Ok(Some(Stmt::Meta(MetaKind::Exit)))
            }
            TokenKind::Debug => {
                self.advance();
                let e = self.parse_expression()?;
                self.expect_separator()?;
                Ok(Some(Stmt::Meta(MetaKind::Debug(e))))
            }
            TokenKind::About => {
                self.advance();
                self.expect_separator()?;
                Ok(Some(Stmt::Meta(MetaKind::About)))
            }
            TokenKind::Help => {
                self.advance();
                self.expect_separator()?;
                Ok(Some(Stmt::Meta(MetaKind::Help)))
            }
            TokenKind::Id(_) => {
                self.advance();
                self.expect_separator()?;
                Ok(None)
            }
            _ => {
                let e = self.parse_expression()?;
                self.expect_separator()?;
                Ok(Some(Stmt::Expr(e)))
            }
        }
    }

    fn parse_shift(&mut self, axis: Axis) -> Result<Option<Stmt>, AxeError> {
        self.advance();
        let dir = match self.peek_kind() {
            TokenKind::Add => {
                self.advance();
                1
            }
            TokenKind::Sub => {
                self.advance();
                -1
            }
            _ => return Err(AxeError::unexpected_token(self.peek_kind().clone(), self.peek().span)),
        };
        let buf = if matches!(self.peek_kind(), TokenKind::RModifier) {
            self.advance();
            default_buf(Region::L3)
        } else if matches!(self.peek_kind(), TokenKind::LParen) {
            self.advance();
            let e = self.parse_expression()?;
            self.expect(TokenKind::RParen)?;
            custom_buf(e)
        } else {
            default_buf(Region::L6)
        };
        self.expect_separator()?;
        Ok(Some(Stmt::Shift { axis, dir, buf }))
    }

    fn parse_dispgraph(&mut self) -> Result<Option<Stmt>, AxeError> {
        self.advance();
        if matches!(self.peek_kind(), TokenKind::LParen) {
            self.advance();
            let first = self.parse_expression()?;
            if matches!(self.peek_kind(), TokenKind::Comma) {
                self.advance();
                let second = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                let mods = self.count_rmodifiers();
                let scale = match mods {
                    1 => 3,
                    2 => 4,
                    _ => {
                        return Err(AxeError::new(
                            ErrorKind::UnexpectedToken,
                            "DispGraph with two buffers requires one or two ^^r suffixes",
                            self.peek().span,
                        ))
                    }
                };
                self.expect_separator()?;
                Ok(Some(Stmt::DispGraph {
                    buf: custom_buf(first),
                    backbuf: Some(custom_buf(second)),
                    scale,
                }))
            } else {
                self.expect(TokenKind::RParen)?;
                self.expect_separator()?;
                Ok(Some(Stmt::DispGraph {
                    buf: custom_buf(first),
                    backbuf: None,
                    scale: 2,
                }))
            }
        } else {
            let mods = self.count_rmodifiers();
            let scale = match mods {
                0 => 2,
                1 => 3,
                2 => 4,
                _ => {
                    return Err(AxeError::new(
                        ErrorKind::UnexpectedToken,
                        "DispGraph accepts at most two ^^r suffixes",
                        self.peek().span,
                    ))
                }
            };
            self.expect_separator()?;
            Ok(Some(Stmt::DispGraph {
                buf: default_buf(Region::L6),
                backbuf: if scale >= 3 { Some(default_buf(Region::L3)) } else { None },
                scale,
            }))
        }
    }

    fn parse_clrdraw(&mut self) -> Result<Option<Stmt>, AxeError> {
        self.advance();
        let buf = if matches!(self.peek_kind(), TokenKind::LParen) {
            self.advance();
            let e = self.parse_expression()?;
            self.expect(TokenKind::RParen)?;
            custom_buf(e)
        } else if matches!(self.peek_kind(), TokenKind::RModifier) {
            self.advance();
            default_buf(Region::L3)
        } else {
            default_buf(Region::L6)
        };
        self.expect_separator()?;
        Ok(Some(Stmt::ClrDraw { buf }))
    }

    fn count_rmodifiers(&mut self) -> u32 {
        let mut n = 0;
        while matches!(self.peek_kind(), TokenKind::RModifier) {
            self.advance();
            n += 1;
        }
        n
    }

    /// Parses `n` comma-separated expressions inside parens, followed by
    /// either an `(n+1)`th comma-separated expression selecting a custom
    /// buffer, an `^^r` suffix selecting the back buffer, or neither
    /// (selecting the primary buffer). Shared by `Pxl-*`, `Rect`/`RectI`,
    /// `Circle`, and `Line`, which all follow this exact shape.
    fn parse_buffered_args(&mut self, n: usize) -> Result<(Vec<Expr>, Expr), AxeError> {
        self.expect(TokenKind::LParen)?;
        let mut args = Vec::with_capacity(n);
        for i in 0..n {
            args.push(self.parse_expression()?);
            if i + 1 < n {
                self.expect(TokenKind::Comma)?;
            }
        }
        let buf = if matches!(self.peek_kind(), TokenKind::Comma) {
            self.advance();
            let e = self.parse_expression()?;
            self.expect(TokenKind::RParen)?;
            custom_buf(e)
        } else {
            self.expect(TokenKind::RParen)?;
            if matches!(self.peek_kind(), TokenKind::RModifier) {
                self.advance();
                default_buf(Region::L3)
            } else {
                default_buf(Region::L6)
            }
        };
        Ok((args, buf))
    }

    fn expect_name(&mut self) -> Result<String, AxeError> {
        match self.peek_kind().clone() {
            TokenKind::Name(n) => {
                self.advance();
                Ok(n)
            }
            _ => Err(AxeError::unexpected_token(self.peek_kind().clone(), self.peek().span)),
        }
    }

    /// Tries to parse a `pointer` nonterminal (bracket form, `VAR`, or
    /// `CONST`) without consuming input on failure. Used to disambiguate
    /// `For(ptr, start, end)` from `For(expr)`.
    fn try_parse_pointer(&mut self) -> Result<Option<Pointer>, AxeError> {
        let save = self.pos;
        match self.parse_pointer_primary() {
            Some(ptr) => Ok(Some(ptr)),
            None => {
                self.pos = save;
                Ok(None)
            }
        }
    }

    fn parse_pointer_primary(&mut self) -> Option<Pointer> {
        match self.peek_kind().clone() {
            TokenKind::LBrace => {
                self.advance();
                let e = self.parse_expression().ok()?;
                self.expect(TokenKind::RBrace).ok()?;
                let width = if matches!(self.peek_kind(), TokenKind::RModifier) {
                    self.advance();
                    2
                } else {
                    1
                };
                Some(Pointer::raw(e, width))
            }
            TokenKind::Var(ord) => {
                self.advance();
                Some(Pointer::region(Region::AzVars, Expr::Int(ord as i64 * 2), 2))
            }
            TokenKind::Const(n) => {
                self.advance();
                Some(Pointer::region(region_for_const(n), Expr::Int(0), 2))
            }
            _ => None,
        }
    }

    /// `factor : NUMBER | SUB expression | LPAREN (factor|expression) RPAREN
    ///   | tempexpression`
    fn parse_factor(&mut self) -> Result<Expr, AxeError> {
        match self.peek_kind().clone() {
            TokenKind::Number(n) => {
                self.advance();
                Ok(Expr::Int(n))
            }
            TokenKind::Sub => {
                self.advance();
                let inner = self.parse_expression()?;
                Ok(Expr::Operation {
                    op: Op::Sub,
                    lhs: Box::new(Expr::Int(0)),
                    rhs: Box::new(inner),
                })
            }
            TokenKind::LParen => {
                self.advance();
                let inner = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Dereference => {
                self.advance();
                let ptr = self
                    .parse_pointer_primary()
                    .ok_or_else(|| AxeError::new(ErrorKind::ExpectedPointer, "expected a pointer after o^^", self.peek().span))?;
                Ok(Expr::Dereference(ptr))
            }
            TokenKind::LModifier => {
                self.advance();
                let name = self.expect_name()?;
                Ok(Expr::Command(Command::GetLabel(name)))
            }
            TokenKind::Rand => {
                self.advance();
                Ok(Expr::Command(Command::Rand))
            }
            TokenKind::GetKey => {
                self.advance();
                self.expect(TokenKind::LParen)?;
                let e = self.parse_expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(Expr::Command(Command::GetKey(Box::new(e))))
            }
            TokenKind::PxlTest => {
                self.advance();
                let (args, buf) = self.parse_buffered_args(2)?;
                let mut args = args.into_iter();
                let x = args.next().unwrap();
                let y = args.next().unwrap();
                Ok(Expr::Command(Command::PxlTest {
                    buf: Box::new(buf),
                    x: Box::new(x),
                    y: Box::new(y),
                }))
            }
            TokenKind::LBrace | TokenKind::Var(_) | TokenKind::Const(_) => {
                let ptr = self.parse_pointer_primary().unwrap();
                Ok(Expr::Pointer(ptr))
            }
            _ => Err(AxeError::unexpected_token(self.peek_kind().clone(), self.peek().span)),
        }
    }

    /// `expression : factor | NUMBER | expression operator factor
    ///   | expression TWOMODIFIER | pointer INCREMENT | pointer DECREMENT
    ///   | expression ASSIGN pointer`
    fn parse_expression(&mut self) -> Result<Expr, AxeError> {
        let mut left = self.parse_factor()?;

        loop {
            match self.peek_kind().clone() {
                TokenKind::Increment | TokenKind::Decrement => {
                    let ptr = match &left {
                        Expr::Pointer(p) => p.clone(),
                        _ => {
                            return Err(AxeError::new(
                                ErrorKind::ExpectedPointer,
                                "++ / -- require a pointer operand",
                                self.peek().span,
                            ))
                        }
                    };
                    let op = if matches!(self.peek_kind(), TokenKind::Increment) {
                        Op::Add
                    } else {
                        Op::Sub
                    };
                    self.advance();
                    left = Expr::Assignment {
                        value: Box::new(Expr::Operation {
                            op,
                            lhs: Box::new(Expr::Pointer(ptr.clone())),
                            rhs: Box::new(Expr::Int(1)),
                        }),
                        pointer: ptr,
                    };
                }
                TokenKind::TwoModifier => {
                    self.advance();
                    left = Expr::Square(Box::new(left));
                }
                TokenKind::Assign => {
                    self.advance();
                    let ptr = self
                        .parse_pointer_primary()
                        .ok_or_else(|| AxeError::new(ErrorKind::ExpectedPointer, "-> must be followed by a pointer", self.peek().span))?;
                    left = Expr::Assignment {
                        value: Box::new(left),
                        pointer: ptr,
                    };
                }
                ref k if k.is_operator() => {
                    let op = token_to_op(k).unwrap();
                    self.advance();
                    let rhs = self.parse_factor()?;
                    left = Expr::Operation {
                        op,
                        lhs: Box::new(left),
                        rhs: Box::new(rhs),
                    };
                }
                _ => break,
            }
        }

        Ok(left)
    }
}

fn region_for_const(n: u8) -> Region {
    match n {
        1 => Region::L1,
        2 => Region::L2,
        3 => Region::L3,
        4 => Region::L4,
        5 => Region::L5,
        _ => Region::L6,
    }
}

fn default_buf(region: Region) -> Expr {
    *Pointer::region(region, Expr::Int(0), 2).address
}

fn custom_buf(e: Expr) -> Expr {
    *Pointer::raw(e, 2).address
}

fn token_to_op(kind: &TokenKind) -> Option<Op> {
    Some(match kind {
        TokenKind::Add => Op::Add,
        TokenKind::Sub => Op::Sub,
        TokenKind::Mul => Op::Mul,
        TokenKind::Div => Op::Div,
        TokenKind::Mod => Op::Mod,
        TokenKind::Lt => Op::Lt,
        TokenKind::Le => Op::Le,
        TokenKind::Eq => Op::Eq,
        TokenKind::Ne => Op::Ne,
        TokenKind::Ge => Op::Ge,
        TokenKind::Gt => Op::Gt,
        _ => return None,
    })
}
