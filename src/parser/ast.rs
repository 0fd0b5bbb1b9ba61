//! # Abstract Syntax Tree (AST)
//!
//! Defines the data structures representing parsed Axe source code.
//!
//! ## Structure
//!
//! A program is a flat `Vec<Stmt>`. The original grammar wraps every line in
//! `Program`/`Block`/`Line` wrapper nodes that carry no payload beyond
//! sequencing (PLY grammar artifacts of building a parse tree line-by-line);
//! collapsing them into a plain vector preserves the exact same semantics
//! with one fewer layer of indirection.
//!
//! Axe has no operator precedence: `expression : expression operator factor`
//! folds strictly left to right, so `[Expr]` nodes mirror that flatness —
//! `Operation` is always binary, built up by repeated left folds rather than
//! a precedence-climbing tree.

/// Named memory regions, each a fixed absolute byte offset into the 65535-slot
/// address space (mirrors `Pointer.constants` in the original).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Region {
    Start,
    AzVars,
    RVars,
    Consts,
    L1,
    L2,
    L3,
    L4,
    L5,
    L6,
    Temp,
}

impl Region {
    pub fn offset(self) -> i64 {
        match self {
            Region::Start => 0,
            Region::AzVars => 35254,
            Region::RVars => 33701,
            Region::Consts => 40000,
            Region::L1 => 34540,
            Region::L2 => 35386,
            Region::L3 => 39026,
            Region::L4 => 33445,
            Region::L5 => 34056,
            Region::L6 => 37696,
            Region::Temp => 2000,
        }
    }

    /// The drawing-buffer region selected by a bare call, an `^^r` suffix,
    /// and a `0x6000`-style monoscale index respectively -- `L6` is the
    /// primary on-screen buffer, `L3` the back buffer used for grayscale.
    pub fn primary_buffer() -> Region {
        Region::L6
    }
    pub fn back_buffer() -> Region {
        Region::L3
    }
}

/// A memory reference: an address expression plus its access width in bytes.
#[derive(Debug, Clone, PartialEq)]
pub struct Pointer {
    pub address: Box<Expr>,
    pub width: u8,
}

impl Pointer {
    /// A pointer relative to a named region: `address = region.offset() + offset`.
    pub fn region(region: Region, offset: Expr, width: u8) -> Pointer {
        if matches!(region, Region::Start) {
            Pointer {
                address: Box::new(offset),
                width,
            }
        } else {
            Pointer {
                address: Box::new(Expr::Operation {
                    op: Op::Add,
                    lhs: Box::new(Expr::Int(region.offset())),
                    rhs: Box::new(offset),
                }),
                width,
            }
        }
    }

    /// A raw pointer: the address is exactly the given expression.
    pub fn raw(address: Expr, width: u8) -> Pointer {
        Pointer {
            address: Box::new(address),
            width,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Op {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Lt,
    Le,
    Eq,
    Ne,
    Ge,
    Gt,
}

/// A command that resolves to a number but isn't a plain arithmetic operation.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// `rand` -- a fresh value in `0..=65535` each time it's evaluated.
    Rand,
    /// `getKey(n)` / `GetKey(n)` -- 1 if key `n` is currently pressed.
    GetKey(Box<Expr>),
    /// `Pxl-Test(x,y[,buf])` -- 1 if the given pixel is set.
    PxlTest {
        buf: Box<Expr>,
        x: Box<Expr>,
        y: Box<Expr>,
    },
    /// `L^^name` / `l^^name` -- the step index of a label, usable as a
    /// `Goto` target computed at runtime.
    GetLabel(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Int(i64),
    Pointer(Pointer),
    Operation {
        op: Op,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    /// `expr^^2` -- `expr * expr`.
    Square(Box<Expr>),
    Assignment {
        value: Box<Expr>,
        pointer: Pointer,
    },
    /// `o^^ptr` -- evaluates to the *address* `ptr` resolves to, not the
    /// value stored there. Surprising, but this is exactly what the
    /// original interpreter does (`o^^` was meant for taking the address of
    /// a pointer-to-pointer, not for a load).
    Dereference(Pointer),
    Command(Command),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PixelOp {
    On,
    Off,
    Change,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Axis {
    Horizontal,
    Vertical,
}

#[derive(Debug, Clone, PartialEq)]
pub enum GotoTarget {
    Name(String),
    Computed(Expr),
}

#[derive(Debug, Clone, PartialEq)]
pub enum MetaKind {
    Exit,
    Debug(Expr),
    About,
    Help,
}

/// A statement. Control-flow variants carry their body as a nested `Vec<Stmt>`;
/// the flattener is responsible for linearizing this into jump-patched steps.
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Expr(Expr),
    Disp(Expr),
    Pause(Expr),
    If {
        cond: Expr,
        body: Vec<Stmt>,
    },
    IfElse {
        cond: Expr,
        then_body: Vec<Stmt>,
        else_body: Vec<Stmt>,
    },
    While {
        cond: Expr,
        body: Vec<Stmt>,
    },
    /// The logical inverse of `While`: loops until `cond` becomes truthy.
    Repeat {
        cond: Expr,
        body: Vec<Stmt>,
    },
    For {
        ptr: Pointer,
        start: Expr,
        end: Expr,
        body: Vec<Stmt>,
    },
    Label(String),
    Goto(GotoTarget),
    Pixel {
        op: PixelOp,
        buf: Expr,
        x: Expr,
        y: Expr,
    },
    Rect {
        inverse: bool,
        buf: Expr,
        x: Expr,
        y: Expr,
        w: Expr,
        h: Expr,
    },
    Circle {
        buf: Expr,
        x: Expr,
        y: Expr,
        r: Expr,
    },
    Line {
        buf: Expr,
        x1: Expr,
        y1: Expr,
        x2: Expr,
        y2: Expr,
    },
    Shift {
        axis: Axis,
        dir: i8,
        buf: Expr,
    },
    DispGraph {
        buf: Expr,
        backbuf: Option<Expr>,
        scale: u8,
    },
    ClrDraw {
        buf: Expr,
    },
    /// `DiagnosticOn` / `DiagnosticOff` -- inert even in the original.
    NotImplemented,
    Meta(MetaKind),
}
