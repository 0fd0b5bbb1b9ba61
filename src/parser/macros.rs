//! # Parser Macros
//!
//! The three pixel-drawing verbs (`Pxl-On`, `Pxl-Off`, `Pxl-Change`) and the
//! `Rect`/`RectI` pair parse identically apart from which AST variant they
//! build. A small `macro_rules!` dispatch keeps those match arms from
//! drifting out of sync the way three hand-copied functions would.

/// Generates a `Parser::parse_stmt` match arm for one of the `Pxl-*` verbs.
macro_rules! pixel_stmt {
    ($self:ident, $op:expr) => {{
        $self.advance();
        let (args, buf) = $self.parse_buffered_args(2)?;
        let mut args = args.into_iter();
        let x = args.next().unwrap();
        let y = args.next().unwrap();
        $self.expect_separator()?;
        Ok($crate::parser::ast::Stmt::Pixel {
            op: $op,
            buf,
            x,
            y,
        })
    }};
}

/// Generates a `Parser::parse_stmt` match arm for `Rect`/`RectI`.
macro_rules! rect_stmt {
    ($self:ident, $inverse:expr) => {{
        $self.advance();
        let (args, buf) = $self.parse_buffered_args(4)?;
        let mut args = args.into_iter();
        let x = args.next().unwrap();
        let y = args.next().unwrap();
        let w = args.next().unwrap();
        let h = args.next().unwrap();
        $self.expect_separator()?;
        Ok($crate::parser::ast::Stmt::Rect {
            inverse: $inverse,
            buf,
            x,
            y,
            w,
            h,
        })
    }};
}
