//! # Expression sub-IR
//!
//! An expression thunk in the original is a closure captured by a step;
//! here it is a small tree (`XExpr`) evaluated recursively against
//! whatever owns memory and the label table. This is the "nested small
//! expression tree" alternative to a full stack machine -- either keeps
//! the placeholder+patch pattern intact while staying inspectable, and a
//! tree is the simpler of the two to get right without a compiler to lean
//! on.

use crate::error::{AxeError, ErrorKind, Span};
use crate::parser::ast::Op;

/// Anything that can resolve an `XExpr`'s memory and label references.
/// `calculator::Calculator` plus `flattener::code::Code`'s label map
/// jointly implement this (see `interp::ExecState`).
pub trait EvalContext {
    fn get_var(&self, addr: i64, width: u8) -> i64;
    /// Stores `value` at `addr` (wrapped to `width` bytes) and returns the
    /// stored value, matching Axe's `->` which is itself an expression.
    fn set_var(&mut self, addr: i64, width: u8, value: i64) -> i64;
    fn rand(&mut self) -> i64;
    fn get_key(&self, code: i64) -> i64;
    fn pxl_test(&self, buf: i64, x: i64, y: i64) -> i64;
    fn label_index(&self, name: &str) -> Option<usize>;
}

#[derive(Debug, Clone, PartialEq)]
pub enum XExpr {
    Const(i64),
    /// Loads `width` bytes from the address `addr` evaluates to.
    Load { addr: Box<XExpr>, width: u8 },
    /// `o^^ptr` -- evaluates to the *address*, not a load.
    Addr(Box<XExpr>),
    BinOp {
        op: Op,
        lhs: Box<XExpr>,
        rhs: Box<XExpr>,
    },
    /// `expr^^2`.
    Square(Box<XExpr>),
    /// `value -> ptr`, itself an expression yielding the stored value.
    Store {
        addr: Box<XExpr>,
        width: u8,
        value: Box<XExpr>,
    },
    Rand,
    GetKey(Box<XExpr>),
    PxlTest {
        buf: Box<XExpr>,
        x: Box<XExpr>,
        y: Box<XExpr>,
    },
    /// `L^^name` / `l^^name` -- the instruction index of a label, resolved
    /// against the live label table at eval time (never bound at flatten
    /// time: a computed `Goto` may reference a label declared later).
    Label(String),
}

pub fn eval(expr: &XExpr, ctx: &mut dyn EvalContext) -> Result<i64, AxeError> {
    match expr {
        XExpr::Const(n) => Ok(*n),
        XExpr::Load { addr, width } => {
            let a = eval(addr, ctx)?;
            Ok(ctx.get_var(a, *width))
        }
        XExpr::Addr(addr) => eval(addr, ctx),
        XExpr::BinOp { op, lhs, rhs } => {
            let l = eval(lhs, ctx)?;
            let r = eval(rhs, ctx)?;
            apply_op(*op, l, r)
        }
        XExpr::Square(inner) => {
            let v = eval(inner, ctx)?;
            Ok(v.wrapping_mul(v))
        }
        XExpr::Store { addr, width, value } => {
            let a = eval(addr, ctx)?;
            let v = eval(value, ctx)?;
            Ok(ctx.set_var(a, *width, v))
        }
        XExpr::Rand => Ok(ctx.rand()),
        XExpr::GetKey(code) => {
            let c = eval(code, ctx)?;
            Ok(ctx.get_key(c))
        }
        XExpr::PxlTest { buf, x, y } => {
            let b = eval(buf, ctx)?;
            let xx = eval(x, ctx)?;
            let yy = eval(y, ctx)?;
            Ok(ctx.pxl_test(b, xx, yy))
        }
        XExpr::Label(name) => ctx
            .label_index(name)
            .map(|i| i as i64)
            .ok_or_else(|| AxeError::missing_label(name, Span::zero())),
    }
}

fn apply_op(op: Op, l: i64, r: i64) -> Result<i64, AxeError> {
    Ok(match op {
        Op::Add => l.wrapping_add(r),
        Op::Sub => l.wrapping_sub(r),
        Op::Mul => l.wrapping_mul(r),
        Op::Div => {
            if r == 0 {
                return Err(AxeError::new(
                    ErrorKind::DivisionByZero,
                    "division by zero",
                    Span::zero(),
                ));
            }
            l.wrapping_div(r)
        }
        Op::Mod => {
            if r == 0 {
                return Err(AxeError::new(
                    ErrorKind::DivisionByZero,
                    "modulo by zero",
                    Span::zero(),
                ));
            }
            l.wrapping_rem(r)
        }
        Op::Lt => (l < r) as i64,
        Op::Le => (l <= r) as i64,
        Op::Eq => (l == r) as i64,
        Op::Ne => (l != r) as i64,
        Op::Ge => (l >= r) as i64,
        Op::Gt => (l > r) as i64,
    })
}

/// Compiles a parsed expression into its evaluable form.
pub fn compile_expr(e: &crate::parser::ast::Expr) -> XExpr {
    use crate::parser::ast::{Command, Expr};

    match e {
        Expr::Int(n) => XExpr::Const(*n),
        Expr::Pointer(p) => XExpr::Load {
            addr: Box::new(compile_expr(&p.address)),
            width: p.width,
        },
        Expr::Operation { op, lhs, rhs } => XExpr::BinOp {
            op: *op,
            lhs: Box::new(compile_expr(lhs)),
            rhs: Box::new(compile_expr(rhs)),
        },
        Expr::Square(inner) => XExpr::Square(Box::new(compile_expr(inner))),
        Expr::Assignment { value, pointer } => XExpr::Store {
            addr: Box::new(compile_expr(&pointer.address)),
            width: pointer.width,
            value: Box::new(compile_expr(value)),
        },
        Expr::Dereference(p) => XExpr::Addr(Box::new(compile_expr(&p.address))),
        Expr::Command(Command::Rand) => XExpr::Rand,
        Expr::Command(Command::GetKey(inner)) => XExpr::GetKey(Box::new(compile_expr(inner))),
        Expr::Command(Command::PxlTest { buf, x, y }) => XExpr::PxlTest {
            buf: Box::new(compile_expr(buf)),
            x: Box::new(compile_expr(x)),
            y: Box::new(compile_expr(y)),
        },
        Expr::Command(Command::GetLabel(name)) => XExpr::Label(name.clone()),
    }
}
