//! # Interpreter driver
//!
//! Fetches, evaluates, and advances through a flattened [`Code`] program.
//! `ExecState` is the struct-of-arrays execution context design note calls
//! for: it borrows a [`Calculator`] (memory, framebuffer, keys) and a
//! `Code`'s label table, and is the one place that implements
//! [`EvalContext`] by delegating to both.

#[cfg(test)]
mod tests;

use std::collections::HashMap;
use std::time::{Duration, Instant};

use crate::calculator::Calculator;
use crate::error::{AxeError, ErrorKind, Span};
use crate::flattener::code::Code;
use crate::flattener::expr::{eval, EvalContext};
use crate::flattener::instr::Instr;
use crate::parser::ast::MetaKind;

/// Minimum interval between event-drain polls, independent of how fast the
/// program is stepping.
const POLL_INTERVAL: Duration = Duration::from_millis(200);

/// One tick of `Pause`'s clock ratio: the calculator's internal timer runs
/// at 1800 "ticks" per second, so `Pause(expr)` sleeps `expr / 1800` seconds.
const PAUSE_TICKS_PER_SECOND: f64 = 1800.0;

struct ExecState<'a> {
    calc: &'a mut Calculator,
    labels: &'a HashMap<String, usize>,
}

impl EvalContext for ExecState<'_> {
    fn get_var(&self, addr: i64, width: u8) -> i64 {
        self.calc.get_var(addr, width)
    }

    fn set_var(&mut self, addr: i64, width: u8, value: i64) -> i64 {
        self.calc.set_var(addr, width, value)
    }

    fn rand(&mut self) -> i64 {
        self.calc.rand()
    }

    fn get_key(&self, code: i64) -> i64 {
        self.calc.get_key(code)
    }

    fn pxl_test(&self, buf: i64, x: i64, y: i64) -> i64 {
        self.calc.pxl_test(buf, x, y)
    }

    fn label_index(&self, name: &str) -> Option<usize> {
        self.labels.get(name).copied()
    }
}

/// Called between steps so a host can pump its event queue. Returning
/// `false` aborts the run (e.g. the display window was closed).
pub trait Host {
    fn poll(&mut self, calc: &mut Calculator) -> bool;
    fn present(&mut self, calc: &Calculator, buf: i64, backbuf: Option<i64>, scale: u8);
}

/// A host that never polls and never presents -- useful for running a
/// program headlessly (tests, `-t interpreter`).
pub struct NullHost;

impl Host for NullHost {
    fn poll(&mut self, _calc: &mut Calculator) -> bool {
        true
    }

    fn present(&mut self, _calc: &Calculator, _buf: i64, _backbuf: Option<i64>, _scale: u8) {}
}

/// Runs `code` to completion against `calc`, yielding to `host` periodically.
/// Memory is *not* reset here -- callers running a REPL loop should call
/// `Calculator::reset` themselves between programs, per spec.
pub fn execute(code: &Code, calc: &mut Calculator, host: &mut dyn Host) -> Result<(), AxeError> {
    let mut ip = 0usize;
    let mut last_poll = Instant::now();

    while ip < code.steps.len() {
        if last_poll.elapsed() >= POLL_INTERVAL {
            last_poll = Instant::now();
            if !host.poll(calc) {
                return Ok(());
            }
        }

        let mut next_ip = ip + 1;
        let mut present_after: Option<(i64, Option<i64>, u8)> = None;
        {
            let mut state = ExecState {
                calc: &mut *calc,
                labels: &code.labels,
            };

            match &code.steps[ip] {
                Instr::Nop => {}
                Instr::Eval(e) => {
                    eval(e, &mut state)?;
                }
                Instr::Disp(e) => {
                    let v = eval(e, &mut state)?;
                    println!("Disp: {v}");
                }
                Instr::Pause(e) => {
                    let v = eval(e, &mut state)?;
                    let secs = (v as f64) / PAUSE_TICKS_PER_SECOND;
                    if secs > 0.0 {
                        std::thread::sleep(Duration::from_secs_f64(secs));
                    }
                }
                Instr::Jump(target) => next_ip = *target,
                Instr::JumpIfZero { cond, target } => {
                    if eval(cond, &mut state)? == 0 {
                        next_ip = *target;
                    }
                }
                Instr::JumpIfNonZero { cond, target } => {
                    if eval(cond, &mut state)? != 0 {
                        next_ip = *target;
                    }
                }
                Instr::JumpComputed(e) => {
                    let target = eval(e, &mut state)?;
                    if target < 0 {
                        return Err(AxeError::new(
                            ErrorKind::InvalidPointerWidth,
                            format!("computed goto target {target} is negative"),
                            Span::zero(),
                        ));
                    }
                    next_ip = target as usize;
                }
                Instr::GotoLabel(name) => {
                    next_ip = code
                        .labels
                        .get(name)
                        .copied()
                        .ok_or_else(|| AxeError::missing_label(name, Span::zero()))?;
                }
                Instr::Pixel { op, buf, x, y } => {
                    let (b, xx, yy) = (
                        eval(buf, &mut state)?,
                        eval(x, &mut state)?,
                        eval(y, &mut state)?,
                    );
                    state.calc.pixel(*op, b, xx, yy);
                }
                Instr::Rect {
                    inverse,
                    buf,
                    x,
                    y,
                    w,
                    h,
                } => {
                    let (b, xx, yy, ww, hh) = (
                        eval(buf, &mut state)?,
                        eval(x, &mut state)?,
                        eval(y, &mut state)?,
                        eval(w, &mut state)?,
                        eval(h, &mut state)?,
                    );
                    state.calc.rect(*inverse, b, xx, yy, ww, hh);
                }
                Instr::Circle { buf, x, y, r } => {
                    let (b, xx, yy, rr) = (
                        eval(buf, &mut state)?,
                        eval(x, &mut state)?,
                        eval(y, &mut state)?,
                        eval(r, &mut state)?,
                    );
                    state.calc.circle(b, xx, yy, rr);
                }
                Instr::Line {
                    buf,
                    x1,
                    y1,
                    x2,
                    y2,
                } => {
                    let (b, a1, b1, a2, b2) = (
                        eval(buf, &mut state)?,
                        eval(x1, &mut state)?,
                        eval(y1, &mut state)?,
                        eval(x2, &mut state)?,
                        eval(y2, &mut state)?,
                    );
                    state.calc.line(b, a1, b1, a2, b2);
                }
                Instr::Shift { axis, dir, buf } => {
                    let b = eval(buf, &mut state)?;
                    state.calc.shift(*axis, *dir, b);
                }
                Instr::DispGraph { buf, backbuf, scale } => {
                    let b = eval(buf, &mut state)?;
                    let bb = match backbuf {
                        Some(e) => Some(eval(e, &mut state)?),
                        None => None,
                    };
                    present_after = Some((b, bb, *scale));
                }
                Instr::ClrDraw { buf } => {
                    let b = eval(buf, &mut state)?;
                    state.calc.clr_draw(b);
                }
                Instr::Meta(kind) => match kind {
                    MetaKind::Exit => {
                        return Err(AxeError::new(ErrorKind::SystemExit, "@EXIT", Span::zero()));
                    }
                    MetaKind::Debug(e) => {
                        let v = eval(e, &mut state)?;
                        if v == 0 {
                            tracing::info!(target: "axe_interpreter::debug", "@DEBUG 0 -- trace verbosity lowered");
                        } else {
                            tracing::info!(target: "axe_interpreter::debug", level = v, "@DEBUG -- trace verbosity raised");
                        }
                    }
                    MetaKind::About | MetaKind::Help => {
                        tracing::info!(target: "axe_interpreter::meta", "{kind:?} requested; no bundled readme to open");
                    }
                },
            }
        }
        if let Some((b, bb, scale)) = present_after {
            host.present(calc, b, bb, scale);
        }
        ip = next_ip;
    }
    Ok(())
}
