//! # Flattener
//!
//! Compiles a parsed `Vec<Stmt>` into a linear [`code::Code`]: an
//! append-only sequence of [`instr::Instr`] steps plus a label table.
//!
//! Control structures lower to forward/backward jumps via the
//! reserve-a-slot-then-patch pattern: a placeholder is appended before its
//! target is known, the body is flattened (appending its own steps), and
//! the placeholder is patched once the exit index is known. `Lbl` records
//! no step of its own -- it just notes the next index to be appended --
//! and `Goto NAME` is resolved against the label table at step time rather
//! than here, since a forward reference may not exist yet when the `Goto`
//! is flattened.

pub mod code;
pub mod expr;
pub mod instr;


use crate::parser::ast::{GotoTarget, Op, Pointer, Stmt};
use code::Code;
use expr::{compile_expr, XExpr};
use instr::Instr;

#[must_use]
pub fn flatten(stmts: &[Stmt]) -> Code {
    let mut code = Code::new();
    flatten_block(&mut code, stmts);
    code
}

fn flatten_block(code: &mut Code, stmts: &[Stmt]) {
    for stmt in stmts {
        flatten_stmt(code, stmt);
    }
}

fn ptr_addr(ptr: &Pointer) -> XExpr {
    compile_expr(&ptr.address)
}

fn flatten_stmt(code: &mut Code, stmt: &Stmt) {
    match stmt {
        Stmt::Expr(e) => {
            code.append(Instr::Eval(compile_expr(e)));
        }
        Stmt::Disp(e) => {
            code.append(Instr::Disp(compile_expr(e)));
        }
        Stmt::Pause(e) => {
            code.append(Instr::Pause(compile_expr(e)));
        }
        Stmt::If { cond, body } => {
            let cond_x = compile_expr(cond);
            let s_start = code.placeholder();
            flatten_block(code, body);
            let exit = code.len();
            code.patch(
                s_start,
                Instr::JumpIfZero {
                    cond: cond_x,
                    target: exit,
                },
            );
        }
        Stmt::IfElse {
            cond,
            then_body,
            else_body,
        } => {
            let cond_x = compile_expr(cond);
            let s_start = code.placeholder();
            flatten_block(code, then_body);
            let s_jump = code.placeholder();
            let else_start = code.len();
            flatten_block(code, else_body);
            let exit = code.len();
            code.patch(s_jump, Instr::Jump(exit));
            code.patch(
                s_start,
                Instr::JumpIfZero {
                    cond: cond_x,
                    target: else_start,
                },
            );
        }
        Stmt::While { cond, body } => {
            let s_start = code.placeholder();
            flatten_block(code, body);
            code.append(Instr::Jump(s_start));
            let exit = code.len();
            code.patch(
                s_start,
                Instr::JumpIfZero {
                    cond: compile_expr(cond),
                    target: exit,
                },
            );
        }
        Stmt::Repeat { cond, body } => {
            // The inverse of While: loop until cond becomes truthy.
            let s_start = code.placeholder();
            flatten_block(code, body);
            code.append(Instr::Jump(s_start));
            let exit = code.len();
            code.patch(
                s_start,
                Instr::JumpIfNonZero {
                    cond: compile_expr(cond),
                    target: exit,
                },
            );
        }
        Stmt::For {
            ptr,
            start,
            end,
            body,
        } => {
            let addr = ptr_addr(ptr);
            let width = ptr.width;
            code.append(Instr::Eval(XExpr::Store {
                addr: Box::new(addr.clone()),
                width,
                value: Box::new(compile_expr(start)),
            }));
            let s_check = code.placeholder();
            flatten_block(code, body);
            code.append(Instr::Eval(XExpr::Store {
                addr: Box::new(addr.clone()),
                width,
                value: Box::new(XExpr::BinOp {
                    op: Op::Add,
                    lhs: Box::new(XExpr::Load {
                        addr: Box::new(addr.clone()),
                        width,
                    }),
                    rhs: Box::new(XExpr::Const(1)),
                }),
            }));
            code.append(Instr::Jump(s_check));
            let exit = code.len();
            // For iterates while ptr <= end (end inclusive); exit once
            // ptr exceeds it.
            let overshoot = XExpr::BinOp {
                op: Op::Gt,
                lhs: Box::new(XExpr::Load {
                    addr: Box::new(addr),
                    width,
                }),
                rhs: Box::new(compile_expr(end)),
            };
            code.patch(
                s_check,
                Instr::JumpIfNonZero {
                    cond: overshoot,
                    target: exit,
                },
            );
        }
        Stmt::Label(name) => {
            code.labels.insert(name.clone(), code.len());
        }
        Stmt::Goto(GotoTarget::Name(name)) => {
            code.append(Instr::GotoLabel(name.clone()));
        }
        Stmt::Goto(GotoTarget::Computed(e)) => {
            code.append(Instr::JumpComputed(compile_expr(e)));
        }
        Stmt::Pixel { op, buf, x, y } => {
            code.append(Instr::Pixel {
                op: *op,
                buf: compile_expr(buf),
                x: compile_expr(x),
                y: compile_expr(y),
            });
        }
        Stmt::Rect {
            inverse,
            buf,
            x,
            y,
            w,
            h,
        } => {
            code.append(Instr::Rect {
                inverse: *inverse,
                buf: compile_expr(buf),
                x: compile_expr(x),
                y: compile_expr(y),
                w: compile_expr(w),
                h: compile_expr(h),
            });
        }
        Stmt::Circle { buf, x, y, r } => {
            code.append(Instr::Circle {
                buf: compile_expr(buf),
                x: compile_expr(x),
                y: compile_expr(y),
                r: compile_expr(r),
            });
        }
        Stmt::Line {
            buf,
            x1,
            y1,
            x2,
            y2,
        } => {
            code.append(Instr::Line {
                buf: compile_expr(buf),
                x1: compile_expr(x1),
                y1: compile_expr(y1),
                x2: compile_expr(x2),
                y2: compile_expr(y2),
            });
        }
        Stmt::Shift { axis, dir, buf } => {
            code.append(Instr::Shift {
                axis: *axis,
                dir: *dir,
                buf: compile_expr(buf),
            });
        }
        Stmt::DispGraph { buf, backbuf, scale } => {
            code.append(Instr::DispGraph {
                buf: compile_expr(buf),
                backbuf: backbuf.as_ref().map(compile_expr),
                scale: *scale,
            });
        }
        Stmt::ClrDraw { buf } => {
            code.append(Instr::ClrDraw {
                buf: compile_expr(buf),
            });
        }
        Stmt::NotImplemented => {}
        Stmt::Meta(kind) => {
            code.append(Instr::Meta(kind.clone()));
        }
    }
}
