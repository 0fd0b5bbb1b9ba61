//! # Axe Interpreter
//!
//! An interpreter for the Axe calculator programming language.
//!
//! ## Pipeline
//!
//! 1. **Lexer** - tokenizes source text into tokens
//! 2. **Parser** - parses tokens into a flat `Vec<Stmt>` AST
//! 3. **Flattener** - compiles the AST into a linear, jump-patched `Code`
//! 4. **Calculator** - the memory, framebuffer, and key state a program runs against
//! 5. **Interp** - the driver loop that steps through `Code` against a `Calculator`
//!
//! ## Example
//!
//! ```rust,no_run
//! use axe_interpreter::{lexer::tokenize, parser::parse, flattener::flatten};
//! use axe_interpreter::calculator::Calculator;
//! use axe_interpreter::interp::{execute, NullHost};
//!
//! let source = std::fs::read_to_string("program.axe").unwrap();
//! let lexed = tokenize(&source);
//! let parsed = parse(&lexed.tokens);
//! let code = flatten(&parsed.stmts);
//!
//! let mut calc = Calculator::new();
//! execute(&code, &mut calc, &mut NullHost).ok();
//! ```

pub mod calculator;
pub mod error;
pub mod flattener;
pub mod interp;
pub mod lexer;
pub mod parser;
