//! # Error Taxonomy
//!
//! One error type threads through every stage of the pipeline (lexer,
//! parser, flattener, interpreter driver), distinguished by [`ErrorKind`].
//! Lex and parse errors are collected and reported without aborting the
//! current stage; flatten/runtime errors are fatal to the current `execute`
//! call but are caught at the REPL boundary so the next program can still
//! run.

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Span {
    pub start: usize,
    pub end: usize,
    pub line: usize,
    pub col: usize,
}

impl Span {
    pub const fn zero() -> Self {
        Span {
            start: 0,
            end: 0,
            line: 1,
            col: 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct AxeError {
    pub kind: ErrorKind,
    pub message: String,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ErrorKind {
    // Lexer
    UnrecognizedToken,
    UnterminatedComment,

    // Parser
    UnexpectedToken,
    UnexpectedEof,
    ExpectedPointer,
    ExpectedOperator,

    // Flattener / interpreter driver
    MissingLabel,
    InvalidPointerWidth,
    DivisionByZero,

    // Process control (spec §7: SystemExit — @EXIT meta command)
    SystemExit,
}

impl AxeError {
    pub fn new(kind: ErrorKind, message: impl Into<String>, span: Span) -> Self {
        AxeError {
            kind,
            message: message.into(),
            span,
        }
    }

    pub fn unrecognized_token(token: char, span: Span) -> Self {
        AxeError::new(
            ErrorKind::UnrecognizedToken,
            format!("Unrecognized token '{token}'"),
            span,
        )
    }

    pub fn unexpected_token(found: impl std::fmt::Debug, span: Span) -> Self {
        AxeError::new(
            ErrorKind::UnexpectedToken,
            format!("Unexpected token: {found:?}"),
            span,
        )
    }

    pub fn missing_label(name: &str, span: Span) -> Self {
        AxeError::new(
            ErrorKind::MissingLabel,
            format!("Missing label: {name}"),
            span,
        )
    }

    pub fn is_fatal_to_program(&self) -> bool {
        !matches!(self.kind, ErrorKind::SystemExit)
    }
}

impl std::fmt::Display for AxeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "! > {} @ line {}, column {}",
            self.message, self.span.line, self.span.col
        )
    }
}

impl std::error::Error for AxeError {}
