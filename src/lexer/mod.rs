//! # Axe Lexer
//!
//! Tokenizes Axe source into a stream of [`Token`]s.
//!
//! The original lexer (`ply.lex`) builds one master regex out of many small
//! per-token rules and tries them in declaration order, so two rules that
//! could both match at a position are disambiguated by which was declared
//! first rather than by length. This tokenizer reproduces that ordering
//! explicitly as a chain of `try_*` calls: multi-character modifiers
//! (`o^^`, `^^r`, `l^^`/`L^^`, `^^2`) and the hyphenated `Pxl-*` verbs are
//! tried before the single-character operators and the generic identifier
//! rule they would otherwise be swallowed by.

pub mod cursor;
pub mod token;


use crate::error::{AxeError, ErrorKind, Span};
use cursor::Cursor;
use token::{Token, TokenKind};

pub struct LexResult {
    pub tokens: Vec<Token>,
    pub errors: Vec<AxeError>,
}

/// Reserved words, matched case-sensitively exactly as the original's
/// `reserved` dict keys (Axe is not case-insensitive the way LC-3 asm is).
fn reserved_word(word: &str) -> Option<TokenKind> {
    Some(match word {
        "If" => TokenKind::If,
        "Else" => TokenKind::Else,
        "End" => TokenKind::End,
        "Lbl" => TokenKind::Lbl,
        "Goto" => TokenKind::Goto,
        "Disp" => TokenKind::Disp,
        "For" => TokenKind::For,
        "While" => TokenKind::While,
        "Repeat" => TokenKind::Repeat,
        "Rect" => TokenKind::Rect,
        "RectI" => TokenKind::RectI,
        "Circle" => TokenKind::Circle,
        "DispGraph" => TokenKind::DispGraph,
        "ClrDraw" => TokenKind::ClrDraw,
        "Line" => TokenKind::Line,
        "Pause" => TokenKind::Pause,
        "rand" => TokenKind::Rand,
        "Horizontal" => TokenKind::Horizontal,
        "Vertical" => TokenKind::Vertical,
        "DiagnosticOn" => TokenKind::DiagnosticOn,
        "DiagnosticOff" => TokenKind::DiagnosticOff,
        _ => return None,
    })
}

#[must_use]
pub fn tokenize(source: &str) -> LexResult {
    let mut cursor = Cursor::new(source);
    let mut tokens = Vec::new();
    let mut errors = Vec::new();

    while !cursor.is_at_end() {
        match lex_token(&mut cursor) {
            Ok(Some(token)) => tokens.push(token),
            Ok(None) => {}
            Err(err) => errors.push(err),
        }
    }

    let (l, c) = cursor.current_pos();
    tokens.push(Token {
        kind: TokenKind::Eof,
        lexeme: String::new(),
        span: Span {
            start: cursor.pos(),
            end: cursor.pos(),
            line: l,
            col: c,
        },
    });

    LexResult { tokens, errors }
}

fn simple(cursor: &mut Cursor, sp: usize, sl: usize, sc: usize, text: &str, kind: TokenKind) -> Token {
    for _ in 0..text.len() {
        cursor.advance();
    }
    Token {
        kind,
        lexeme: text.to_string(),
        span: cursor.make_span(sp, sl, sc),
    }
}

fn lex_token(cursor: &mut Cursor) -> Result<Option<Token>, AxeError> {
    while matches!(cursor.peek(), Some(' ' | '\t')) {
        cursor.advance();
    }

    if cursor.is_at_end() {
        return Ok(None);
    }

    let (sp, sl, sc) = (cursor.pos(), cursor.current_pos().0, cursor.current_pos().1);
    let ch = cursor.peek().unwrap();

    // Comments: `.`-to-end-of-line, or `...`-delimited block.
    if ch == '.' {
        return lex_comment(cursor);
    }

    if ch == '\n' {
        while cursor.peek() == Some('\n') {
            cursor.advance();
        }
        return Ok(Some(Token {
            kind: TokenKind::Newline,
            lexeme: "\n".into(),
            span: cursor.make_span(sp, sl, sc),
        }));
    }

    if ch == ':' {
        while cursor.peek() == Some(':') {
            cursor.advance();
        }
        return Ok(Some(Token {
            kind: TokenKind::Colon,
            lexeme: ":".into(),
            span: cursor.make_span(sp, sl, sc),
        }));
    }

    if ch == ',' {
        return Ok(Some(simple(cursor, sp, sl, sc, ",", TokenKind::Comma)));
    }

    if ch.is_ascii_digit() {
        return lex_number(cursor, sp, sl, sc);
    }

    if cursor.starts_with("getKey") {
        return Ok(Some(simple(cursor, sp, sl, sc, "getKey", TokenKind::GetKey)));
    }
    if cursor.starts_with("GetKey") {
        return Ok(Some(simple(cursor, sp, sl, sc, "GetKey", TokenKind::GetKey)));
    }

    if cursor.starts_with("o^^") {
        return Ok(Some(simple(cursor, sp, sl, sc, "o^^", TokenKind::Dereference)));
    }
    if cursor.starts_with("^^r") {
        return Ok(Some(simple(cursor, sp, sl, sc, "^^r", TokenKind::RModifier)));
    }
    if cursor.starts_with("l^^") {
        return Ok(Some(simple(cursor, sp, sl, sc, "l^^", TokenKind::LModifier)));
    }
    if cursor.starts_with("L^^") {
        return Ok(Some(simple(cursor, sp, sl, sc, "L^^", TokenKind::LModifier)));
    }
    if cursor.starts_with("^^2") {
        return Ok(Some(simple(cursor, sp, sl, sc, "^^2", TokenKind::TwoModifier)));
    }

    if ch == '(' {
        return Ok(Some(simple(cursor, sp, sl, sc, "(", TokenKind::LParen)));
    }
    if ch == ')' {
        return Ok(Some(simple(cursor, sp, sl, sc, ")", TokenKind::RParen)));
    }
    if ch == '{' {
        return Ok(Some(simple(cursor, sp, sl, sc, "{", TokenKind::LBrace)));
    }
    if ch == '}' {
        return Ok(Some(simple(cursor, sp, sl, sc, "}", TokenKind::RBrace)));
    }

    if cursor.starts_with("->") {
        return Ok(Some(simple(cursor, sp, sl, sc, "->", TokenKind::Assign)));
    }

    if cursor.starts_with("Pxl-On") {
        return Ok(Some(simple(cursor, sp, sl, sc, "Pxl-On", TokenKind::PxlOn)));
    }
    if cursor.starts_with("Pxl-Off") {
        return Ok(Some(simple(cursor, sp, sl, sc, "Pxl-Off", TokenKind::PxlOff)));
    }
    if cursor.starts_with("Pxl-Test") {
        return Ok(Some(simple(cursor, sp, sl, sc, "Pxl-Test", TokenKind::PxlTest)));
    }
    if cursor.starts_with("pxl-Test") {
        return Ok(Some(simple(cursor, sp, sl, sc, "pxl-Test", TokenKind::PxlTest)));
    }
    if cursor.starts_with("Pxl-Change") {
        return Ok(Some(simple(cursor, sp, sl, sc, "Pxl-Change", TokenKind::PxlChange)));
    }

    if cursor.starts_with("@DEBUG") {
        return Ok(Some(simple(cursor, sp, sl, sc, "@DEBUG", TokenKind::Debug)));
    }
    if cursor.starts_with("@EXIT") {
        return Ok(Some(simple(cursor, sp, sl, sc, "@EXIT", TokenKind::Exit)));
    }
    if cursor.starts_with("@HELP") {
        return Ok(Some(simple(cursor, sp, sl, sc, "@HELP", TokenKind::Help)));
    }
    if cursor.starts_with("@ABOUT") {
        return Ok(Some(simple(cursor, sp, sl, sc, "@ABOUT", TokenKind::About)));
    }

    // VAR: single uppercase letter not adjacent to further word characters.
    if ch.is_ascii_uppercase() && !matches!(cursor.peek_at(1), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
        let ord = (ch as u8) - b'A';
        return Ok(Some(simple(
            cursor,
            sp,
            sl,
            sc,
            &ch.to_string(),
            TokenKind::Var(ord),
        )));
    }

    // CONST: L1..L6, matched as a literal two-byte sequence (the original
    // regex has no trailing boundary check either).
    if ch == 'L' {
        if let Some(d) = cursor.peek_at(1) {
            if ('1'..='6').contains(&d) {
                let n = d as u8 - b'0';
                let lexeme = format!("L{d}");
                return Ok(Some(simple(cursor, sp, sl, sc, &lexeme, TokenKind::Const(n))));
            }
        }
    }

    if cursor.starts_with("++") {
        return Ok(Some(simple(cursor, sp, sl, sc, "++", TokenKind::Increment)));
    }
    if cursor.starts_with("--") {
        return Ok(Some(simple(cursor, sp, sl, sc, "--", TokenKind::Decrement)));
    }

    if ch == '+' {
        return Ok(Some(simple(cursor, sp, sl, sc, "+", TokenKind::Add)));
    }
    if ch == '-' {
        return Ok(Some(simple(cursor, sp, sl, sc, "-", TokenKind::Sub)));
    }
    if ch == '*' {
        return Ok(Some(simple(cursor, sp, sl, sc, "*", TokenKind::Mul)));
    }
    if ch == '/' {
        return Ok(Some(simple(cursor, sp, sl, sc, "/", TokenKind::Div)));
    }
    if ch == '^' {
        return Ok(Some(simple(cursor, sp, sl, sc, "^", TokenKind::Mod)));
    }

    if cursor.starts_with("<=") {
        return Ok(Some(simple(cursor, sp, sl, sc, "<=", TokenKind::Le)));
    }
    if ch == '<' {
        return Ok(Some(simple(cursor, sp, sl, sc, "<", TokenKind::Lt)));
    }
    if ch == '=' {
        return Ok(Some(simple(cursor, sp, sl, sc, "=", TokenKind::Eq)));
    }
    if cursor.starts_with("!=") {
        return Ok(Some(simple(cursor, sp, sl, sc, "!=", TokenKind::Ne)));
    }
    if cursor.starts_with(">=") {
        return Ok(Some(simple(cursor, sp, sl, sc, ">=", TokenKind::Ge)));
    }
    if ch == '>' {
        return Ok(Some(simple(cursor, sp, sl, sc, ">", TokenKind::Gt)));
    }

    if ch.is_ascii_alphabetic() {
        return lex_word(cursor, sp, sl, sc);
    }

    cursor.advance();
    Err(AxeError::unrecognized_token(ch, cursor.make_span(sp, sl, sc)))
}

fn lex_number(cursor: &mut Cursor, sp: usize, sl: usize, sc: usize) -> Result<Option<Token>, AxeError> {
    let mut digits = String::new();
    while matches!(cursor.peek(), Some(c) if c.is_ascii_digit()) {
        digits.push(cursor.advance().unwrap());
    }
    let value: i64 = digits.parse().unwrap_or(i64::MAX);
    Ok(Some(Token {
        kind: TokenKind::Number(value),
        lexeme: digits,
        span: cursor.make_span(sp, sl, sc),
    }))
}

fn lex_word(cursor: &mut Cursor, sp: usize, sl: usize, sc: usize) -> Result<Option<Token>, AxeError> {
    let mut word = String::new();
    word.push(cursor.advance().unwrap());
    while matches!(cursor.peek(), Some(c) if c.is_ascii_alphanumeric() || c == '_') {
        word.push(cursor.advance().unwrap());
    }

    if let Some(kind) = reserved_word(&word) {
        return Ok(Some(Token {
            kind,
            lexeme: word,
            span: cursor.make_span(sp, sl, sc),
        }));
    }

    let kind = if word.len() <= 8 {
        TokenKind::Name(word.clone())
    } else {
        TokenKind::Id(word.clone())
    };

    Ok(Some(Token {
        kind,
        lexeme: word,
        span: cursor.make_span(sp, sl, sc),
    }))
}

/// Skip a `.`-to-end-of-line comment or a `...`-delimited block comment.
/// Neither produces a token.
fn lex_comment(cursor: &mut Cursor) -> Result<Option<Token>, AxeError> {
    if cursor.starts_with("...") {
        cursor.eat("...");
        while !cursor.is_at_end() && !cursor.starts_with("...") {
            cursor.advance();
        }
        if cursor.starts_with("...") {
            cursor.eat("...");
        }
        return Ok(None);
    }

    cursor.advance(); // the leading '.'
    while let Some(ch) = cursor.peek() {
        if ch == '\n' {
            break;
        }
        cursor.advance();
    }
    Ok(None)
}
