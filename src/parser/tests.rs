#[cfg(test)]
mod tests {
    use crate::lexer::tokenize;
    use crate::parser::ast::*;
    use crate::parser::parse;

    fn parse_ok(src: &str) -> Vec<Stmt> {
        let lexed = tokenize(src);
        assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
        let parsed = parse(&lexed.tokens);
        assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
        parsed.stmts
    }

    fn parse_errors(src: &str) -> Vec<crate::error::ErrorKind> {
        let lexed = tokenize(src);
        let parsed = parse(&lexed.tokens);
        parsed.errors.into_iter().map(|e| e.kind).collect()
    }

    #[test]
    fn number_literal() {
        let stmts = parse_ok("5\n");
        assert_eq!(stmts, vec![Stmt::Expr(Expr::Int(5))]);
    }

    #[test]
    fn flat_left_to_right_no_precedence() {
        // 2+3*4 folds strictly left to right -- (2+3)*4 = 20, not 14.
        let stmts = parse_ok("2+3*4\n");
        let expected = Expr::Operation {
            op: Op::Mul,
            lhs: Box::new(Expr::Operation {
                op: Op::Add,
                lhs: Box::new(Expr::Int(2)),
                rhs: Box::new(Expr::Int(3)),
            }),
            rhs: Box::new(Expr::Int(4)),
        };
        assert_eq!(stmts, vec![Stmt::Expr(expected)]);
    }

    #[test]
    fn unary_minus_swallows_full_expression() {
        // -1+2 parses as -(1+2) = -3, not (-1)+2.
        let stmts = parse_ok("-1+2\n");
        let expected = Expr::Operation {
            op: Op::Sub,
            lhs: Box::new(Expr::Int(0)),
            rhs: Box::new(Expr::Operation {
                op: Op::Add,
                lhs: Box::new(Expr::Int(1)),
                rhs: Box::new(Expr::Int(2)),
            }),
        };
        assert_eq!(stmts, vec![Stmt::Expr(expected)]);
    }

    #[test]
    fn assignment_to_var() {
        let stmts = parse_ok("5->A\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Assignment { value, pointer }) => {
                assert_eq!(**value, Expr::Int(5));
                assert_eq!(pointer.width, 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn increment_desugars_to_assignment() {
        let stmts = parse_ok("A++\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Assignment { value, .. }) => match &**value {
                Expr::Operation { op: Op::Add, rhs, .. } => assert_eq!(**rhs, Expr::Int(1)),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn decrement_desugars_to_assignment() {
        let stmts = parse_ok("A--\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Assignment { value, .. }) => match &**value {
                Expr::Operation { op: Op::Sub, rhs, .. } => assert_eq!(**rhs, Expr::Int(1)),
                other => panic!("unexpected: {other:?}"),
            },
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn dereference_wraps_pointer_without_loading() {
        let stmts = parse_ok("o^^A\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Dereference(ptr)) => assert_eq!(ptr.width, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bracket_pointer_width_one_by_default() {
        let stmts = parse_ok("{5}\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Pointer(p)) => assert_eq!(p.width, 1),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn bracket_pointer_rmodifier_is_width_two() {
        let stmts = parse_ok("{5}^^r\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Pointer(p)) => assert_eq!(p.width, 2),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn square_modifier() {
        let stmts = parse_ok("5^^2\n");
        assert_eq!(stmts, vec![Stmt::Expr(Expr::Square(Box::new(Expr::Int(5))))]);
    }

    #[test]
    fn const_region_pointer() {
        let stmts = parse_ok("L3\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Pointer(Pointer { address, width })) => {
                assert_eq!(*width, 2);
                assert_eq!(**address, Expr::Int(Region::L3.offset()));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn label_and_goto() {
        let stmts = parse_ok("Lbl LOOP\nGoto LOOP\n");
        assert_eq!(
            stmts,
            vec![
                Stmt::Label("LOOP".into()),
                Stmt::Goto(GotoTarget::Name("LOOP".into()))
            ]
        );
    }

    #[test]
    fn computed_goto() {
        let stmts = parse_ok("Goto(L^^LOOP)\n");
        match &stmts[0] {
            Stmt::Goto(GotoTarget::Computed(Expr::Command(Command::GetLabel(name)))) => {
                assert_eq!(name, "LOOP")
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn while_vs_repeat_both_carry_a_body() {
        let while_stmts = parse_ok("While A\nA++\nEnd\n");
        let repeat_stmts = parse_ok("Repeat A\nA++\nEnd\n");
        match &while_stmts[0] {
            Stmt::While { body, .. } => assert_eq!(body.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
        match &repeat_stmts[0] {
            Stmt::Repeat { body, .. } => assert_eq!(body.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn if_without_else() {
        let stmts = parse_ok("If A\n1\nEnd\n");
        match &stmts[0] {
            Stmt::If { body, .. } => assert_eq!(body.len(), 1),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn if_else() {
        let stmts = parse_ok("If A\n1\nElse\n2\nEnd\n");
        match &stmts[0] {
            Stmt::IfElse { then_body, else_body, .. } => {
                assert_eq!(then_body.len(), 1);
                assert_eq!(else_body.len(), 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn for_with_pointer_uses_given_bounds() {
        let stmts = parse_ok("For(A,0,10)\nA++\nEnd\n");
        match &stmts[0] {
            Stmt::For { ptr, start, end, body } => {
                assert_eq!(*start, Expr::Int(0));
                assert_eq!(*end, Expr::Int(10));
                assert_eq!(ptr.width, 2);
                assert_eq!(body.len(), 1);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn for_with_bare_expr_synthesizes_temp_pointer() {
        let stmts = parse_ok("For(5)\n1\nEnd\n");
        match &stmts[0] {
            Stmt::For { start, end, .. } => {
                assert_eq!(*start, Expr::Int(0));
                assert_eq!(*end, Expr::Int(5));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pixel_statement_default_buffer() {
        let stmts = parse_ok("Pxl-On(1,2)\n");
        assert!(matches!(stmts[0], Stmt::Pixel { op: PixelOp::On, .. }));
    }

    #[test]
    fn pixel_statement_back_buffer() {
        let stmts = parse_ok("Pxl-Off(1,2)^^r\n");
        assert!(matches!(stmts[0], Stmt::Pixel { op: PixelOp::Off, .. }));
    }

    #[test]
    fn pixel_statement_custom_buffer() {
        let stmts = parse_ok("Pxl-Change(1,2,{100})\n");
        match &stmts[0] {
            Stmt::Pixel { op: PixelOp::Change, buf, .. } => {
                assert_eq!(*buf, Expr::Int(100));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn pxl_test_is_an_expression() {
        let stmts = parse_ok("Pxl-Test(1,2)->A\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Assignment { value, .. }) => {
                assert!(matches!(**value, Expr::Command(Command::PxlTest { .. })));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rect_and_recti() {
        let stmts = parse_ok("Rect(0,0,10,10)\nRectI(0,0,10,10)\n");
        assert!(matches!(stmts[0], Stmt::Rect { inverse: false, .. }));
        assert!(matches!(stmts[1], Stmt::Rect { inverse: true, .. }));
    }

    #[test]
    fn circle_and_line() {
        let stmts = parse_ok("Circle(1,2,3)\nLine(0,0,10,10)\n");
        assert!(matches!(stmts[0], Stmt::Circle { .. }));
        assert!(matches!(stmts[1], Stmt::Line { .. }));
    }

    #[test]
    fn shift_statements() {
        let stmts = parse_ok("Horizontal+\nVertical-\n");
        assert!(matches!(
            stmts[0],
            Stmt::Shift { axis: Axis::Horizontal, dir: 1, .. }
        ));
        assert!(matches!(
            stmts[1],
            Stmt::Shift { axis: Axis::Vertical, dir: -1, .. }
        ));
    }

    #[test]
    fn dispgraph_scales() {
        let stmts = parse_ok("DispGraph\nDispGraph^^r\nDispGraph^^r^^r\n");
        assert!(matches!(stmts[0], Stmt::DispGraph { scale: 2, .. }));
        assert!(matches!(stmts[1], Stmt::DispGraph { scale: 3, .. }));
        assert!(matches!(stmts[2], Stmt::DispGraph { scale: 4, .. }));
    }

    #[test]
    fn dispgraph_custom_buffers() {
        let stmts = parse_ok("DispGraph(1)\nDispGraph(1,2)\n");
        assert!(matches!(stmts[0], Stmt::DispGraph { scale: 2, backbuf: None, .. }));
        match &stmts[1] {
            Stmt::DispGraph { scale: 3, backbuf: Some(_), .. } => {}
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn clrdraw_default_and_back_buffer() {
        let stmts = parse_ok("ClrDraw\nClrDraw^^r\n");
        assert!(matches!(stmts[0], Stmt::ClrDraw { .. }));
        assert!(matches!(stmts[1], Stmt::ClrDraw { .. }));
    }

    #[test]
    fn clrdraw_custom_buffer() {
        let stmts = parse_ok("ClrDraw(100)\n");
        match &stmts[0] {
            Stmt::ClrDraw { buf } => assert_eq!(*buf, Expr::Int(100)),
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn diagnostic_is_a_no_op() {
        let stmts = parse_ok("DiagnosticOn\nDiagnosticOff\n");
        assert_eq!(stmts, vec![Stmt::NotImplemented, Stmt::NotImplemented]);
    }

    #[test]
    fn meta_commands() {
        let stmts = parse_ok("@EXIT\n@DEBUG 1\n@ABOUT\n@HELP\n");
        assert_eq!(
            stmts,
            vec![
                Stmt::Meta(MetaKind::Exit),
                Stmt::Meta(MetaKind::Debug(Expr::Int(1))),
                Stmt::Meta(MetaKind::About),
                Stmt::Meta(MetaKind::Help),
            ]
        );
    }

    #[test]
    fn long_identifier_is_a_silent_no_op() {
        let stmts = parse_ok("SomeVeryLongIdentifier\n1->A\n");
        assert_eq!(stmts.len(), 1);
        assert!(matches!(stmts[0], Stmt::Expr(Expr::Assignment { .. })));
    }

    #[test]
    fn colon_and_newline_are_interchangeable_separators() {
        let a = parse_ok("1->A:2->B\n");
        let b = parse_ok("1->A\n2->B\n");
        assert_eq!(a, b);
    }

    #[test]
    fn get_key_as_expression() {
        let stmts = parse_ok("getKey(1)->A\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Assignment { value, .. }) => {
                assert!(matches!(**value, Expr::Command(Command::GetKey(_))));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn rand_as_expression() {
        let stmts = parse_ok("rand->A\n");
        match &stmts[0] {
            Stmt::Expr(Expr::Assignment { value, .. }) => {
                assert_eq!(**value, Expr::Command(Command::Rand));
            }
            other => panic!("unexpected: {other:?}"),
        }
    }

    #[test]
    fn unterminated_if_reports_error() {
        let errors = parse_errors("If A\n1->A\n");
        assert!(!errors.is_empty());
    }

    #[test]
    fn dangling_assign_reports_error() {
        let errors = parse_errors("1->5\n");
        assert!(!errors.is_empty());
    }

    #[test]
    fn error_recovery_still_parses_later_statements() {
        let lexed = tokenize("1->5\n2->A\n");
        let parsed = parse(&lexed.tokens);
        assert!(!parsed.errors.is_empty());
        assert!(parsed
            .stmts
            .iter()
            .any(|s| matches!(s, Stmt::Expr(Expr::Assignment { .. }))));
    }
}
