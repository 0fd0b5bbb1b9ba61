use super::{execute, NullHost};
use crate::calculator::Calculator;
use crate::error::ErrorKind;
use crate::flattener::flatten;
use crate::lexer::tokenize;
use crate::parser::ast::Region;
use crate::parser::parse;

fn run(src: &str) -> Calculator {
    let lexed = tokenize(src);
    assert!(lexed.errors.is_empty(), "lex errors: {:?}", lexed.errors);
    let parsed = parse(&lexed.tokens);
    assert!(parsed.errors.is_empty(), "parse errors: {:?}", parsed.errors);
    let code = flatten(&parsed.stmts);
    let mut calc = Calculator::new();
    execute(&code, &mut calc, &mut NullHost).expect("program should run to completion");
    calc
}

fn var_addr(letter: u8) -> i64 {
    35254 + 2 * (letter - b'A') as i64
}

#[test]
fn s1_pixel_plot_sets_the_expected_byte_and_bit() {
    let calc = run("Pxl-On(10,5)\nDispGraph\n");
    let buf = Region::primary_buffer().offset();
    let byte = buf + 1 * 12 + (10 / 8);
    assert_eq!(calc.memory().get1(byte), 0x04);
}

#[test]
fn s3_variable_aliasing_round_trips_through_pointer_dereference() {
    let calc = run("1337->{3000}^^r\n42->{3002}\n");
    assert_eq!(calc.get_var(3000, 2), 1337);
    assert_eq!(calc.get_var(3002, 1), 42);
}

#[test]
fn s4_label_goto_terminates_and_sets_a() {
    let calc = run("Lbl HI\n1->A\nGoto END\nLbl END\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 1);
}

#[test]
fn s6_missing_label_surfaces_as_missing_label_error() {
    let lexed = tokenize("Goto NOPE\n");
    let parsed = parse(&lexed.tokens);
    let code = flatten(&parsed.stmts);
    let mut calc = Calculator::new();
    let err = execute(&code, &mut calc, &mut NullHost).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingLabel);
}

#[test]
fn division_by_zero_surfaces_as_a_runtime_error() {
    let lexed = tokenize("1/0->A\n");
    let parsed = parse(&lexed.tokens);
    let code = flatten(&parsed.stmts);
    let mut calc = Calculator::new();
    let err = execute(&code, &mut calc, &mut NullHost).unwrap_err();
    assert_eq!(err.kind, ErrorKind::DivisionByZero);
}

#[test]
fn exit_meta_command_reports_system_exit() {
    let lexed = tokenize("@EXIT\n1->A\n");
    let parsed = parse(&lexed.tokens);
    let code = flatten(&parsed.stmts);
    let mut calc = Calculator::new();
    let err = execute(&code, &mut calc, &mut NullHost).unwrap_err();
    assert_eq!(err.kind, ErrorKind::SystemExit);
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 0);
}

#[test]
fn reset_clears_memory_between_runs() {
    let mut calc = run("99->A\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 99);
    calc.reset();
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 0);
}
