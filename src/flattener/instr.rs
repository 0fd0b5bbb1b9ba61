//! # Flat instruction set
//!
//! One `Instr` per statement-level step in a `Code` program. Control flow
//! (`Jump`/`JumpIfZero`/`JumpIfNonZero`) carries a pre-resolved target index;
//! `GotoLabel` is the one exception, resolved against the live label table
//! at step time rather than at flatten time (see `flattener::mod`).

use super::expr::XExpr;
use crate::parser::ast::{Axis, MetaKind, PixelOp};

#[derive(Debug, Clone, PartialEq)]
pub enum Instr {
    /// A reserved slot awaiting `Code::patch`. Never executed in a
    /// correctly-flattened program.
    Nop,
    Eval(XExpr),
    Disp(XExpr),
    Pause(XExpr),
    Jump(usize),
    JumpIfZero { cond: XExpr, target: usize },
    JumpIfNonZero { cond: XExpr, target: usize },
    /// `Goto(expr)` -- sets IP to the evaluated instruction index.
    JumpComputed(XExpr),
    /// `Goto NAME` -- resolved against the label table at step time, since
    /// a forward reference may not exist yet when this step is flattened.
    GotoLabel(String),
    Pixel {
        op: PixelOp,
        buf: XExpr,
        x: XExpr,
        y: XExpr,
    },
    Rect {
        inverse: bool,
        buf: XExpr,
        x: XExpr,
        y: XExpr,
        w: XExpr,
        h: XExpr,
    },
    Circle {
        buf: XExpr,
        x: XExpr,
        y: XExpr,
        r: XExpr,
    },
    Line {
        buf: XExpr,
        x1: XExpr,
        y1: XExpr,
        x2: XExpr,
        y2: XExpr,
    },
    Shift {
        axis: Axis,
        dir: i8,
        buf: XExpr,
    },
    DispGraph {
        buf: XExpr,
        backbuf: Option<XExpr>,
        scale: u8,
    },
    ClrDraw {
        buf: XExpr,
    },
    Meta(MetaKind),
}
