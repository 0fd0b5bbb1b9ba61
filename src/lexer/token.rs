//! # Token Types
//!
//! Defines all token types for the Axe language.
//!
//! ## Token Structure
//!
//! Each token contains:
//! - `kind`: The token type (reserved word, operator, literal, etc.)
//! - `lexeme`: The original text from source code
//! - `span`: Location in source for error reporting

use crate::error::Span;

/// A single lexical token
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub lexeme: String,
    pub span: Span,
}

/// Token kinds produced by the Axe lexer.
///
/// Reserved words lex to their own dedicated variant rather than a generic
/// `Keyword(String)` — the parser dispatches on token kind directly, the
/// same way the teacher's `TokenKind` gives every LC-3 opcode its own arm.
#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // === Reserved words (spec §6) ===
    If,
    Else,
    End,
    Lbl,
    Goto,
    Disp,
    For,
    While,
    Repeat,
    Rect,
    RectI,
    Circle,
    DispGraph,
    ClrDraw,
    Line,
    Pause,
    Rand,
    Horizontal,
    Vertical,
    DiagnosticOn,
    DiagnosticOff,

    // === Drawing verbs (hyphenated, lexed specially) ===
    PxlOn,
    PxlOff,
    PxlTest,
    PxlChange,

    // === Meta markers ===
    Debug,
    Exit,
    Help,
    About,

    // === Commands ===
    GetKey,

    // === Named pointers ===
    /// `A`..`Z`, carrying the 0-based ordinal into `AZ_VARS`.
    Var(u8),
    /// `L1`..`L6`, carrying the 1-based region number.
    Const(u8),

    // === Literals & identifiers ===
    Number(i64),
    /// Identifier of length <= 8 that isn't a reserved word — usable as a label.
    Name(String),
    /// Identifier longer than 8 chars — inert; a bare line of one is a no-op.
    Id(String),

    // === Punctuation ===
    Comma,
    Colon,
    Newline,
    LParen,
    RParen,
    LBrace,
    RBrace,

    // === Modifiers ===
    /// `o^^`
    Dereference,
    /// `^^r`
    RModifier,
    /// `^^2`
    TwoModifier,
    /// `l^^` or `L^^`
    LModifier,

    // === Operators ===
    Assign, // ->
    Increment,
    Decrement,
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

    Eof,
}

impl TokenKind {
    /// True for `Newline`/`Colon` — the two token kinds that terminate a line.
    /// Axe treats runs of either (in any mix) as a single separator.
    pub fn is_separator(&self) -> bool {
        matches!(self, TokenKind::Newline | TokenKind::Colon)
    }

    /// True for the binary comparison/arithmetic operators (spec §4.2's flat,
    /// left-associative `operator` nonterminal).
    pub fn is_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Add
                | TokenKind::Sub
                | TokenKind::Mul
                | TokenKind::Div
                | TokenKind::Mod
                | TokenKind::Lt
                | TokenKind::Le
                | TokenKind::Eq
                | TokenKind::Ne
                | TokenKind::Ge
                | TokenKind::Gt
        )
    }
}
