use axe_interpreter::calculator::Calculator;
use axe_interpreter::error::ErrorKind;
use axe_interpreter::flattener::flatten;
use axe_interpreter::interp::{execute, NullHost};
use axe_interpreter::lexer::tokenize;
use axe_interpreter::parser::ast::Region;
use axe_interpreter::parser::parse;

/// Runs an Axe program end to end (lex -> parse -> flatten -> execute)
/// against a fresh `Calculator`, asserting no errors at any stage.
fn run(source: &str) -> Calculator {
    let lexed = tokenize(source);
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
fn s1_pixel_plot() {
    let calc = run("Pxl-On(10,5)\nDispGraph\n");
    let buf = Region::primary_buffer().offset();
    let byte = buf + 1 * 12 + (10 / 8);
    assert_eq!(calc.memory().get1(byte), 1 << (10 % 8));
}

#[test]
fn s2_counting_loop() {
    let calc = run("0->A\nFor(I,1,10)\nA+I->A\nEnd\nDisp A\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 55);
}

#[test]
fn s3_variable_aliasing() {
    let calc = run("1337->{3000}^^r\n42->{3002}\n");
    assert_eq!(calc.get_var(3000, 2), 1337);
    assert_eq!(calc.get_var(3002, 1), 42);
}

#[test]
fn s4_label_goto() {
    let calc = run("Lbl HI\n1->A\nGoto END\nLbl END\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 1);
}

#[test]
fn s5_grayscale_blit_all_four_combinations() {
    use axe_interpreter::calculator::raster::{disp_screen, PixelLevel, BUFFER_SIZE};
    use axe_interpreter::calculator::memory::Memory;

    let mut mem = Memory::new();
    let buf1 = 0i64;
    let buf2 = BUFFER_SIZE;

    for a in 0..BUFFER_SIZE {
        mem.set1(buf1 + a, 0xFF);
        mem.set1(buf2 + a, 0xFF);
    }
    let screen = disp_screen(&mem, buf1, Some(buf2), 4);
    assert!(screen.iter().all(|p| *p == PixelLevel::Black));

    for a in 0..BUFFER_SIZE {
        mem.set1(buf1 + a, 0x00);
        mem.set1(buf2 + a, 0xFF);
    }
    let screen = disp_screen(&mem, buf1, Some(buf2), 4);
    assert!(screen.iter().all(|p| *p == PixelLevel::LightGray));

    for a in 0..BUFFER_SIZE {
        mem.set1(buf1 + a, 0xFF);
        mem.set1(buf2 + a, 0x00);
    }
    let screen = disp_screen(&mem, buf1, Some(buf2), 4);
    assert!(screen.iter().all(|p| *p == PixelLevel::DarkGray));

    for a in 0..BUFFER_SIZE {
        mem.set1(buf1 + a, 0x00);
        mem.set1(buf2 + a, 0x00);
    }
    let screen = disp_screen(&mem, buf1, Some(buf2), 4);
    assert!(screen.iter().all(|p| *p == PixelLevel::White));
}

#[test]
fn s6_missing_label() {
    let lexed = tokenize("Goto NOPE\n");
    let parsed = parse(&lexed.tokens);
    assert!(parsed.errors.is_empty());
    let code = flatten(&parsed.stmts);
    let mut calc = Calculator::new();
    let err = execute(&code, &mut calc, &mut NullHost).unwrap_err();
    assert_eq!(err.kind, ErrorKind::MissingLabel);
}

#[test]
fn invariant_flat_precedence() {
    let calc = run("1+2*3->A\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 9);
}

#[test]
fn invariant_for_end_inclusive() {
    let calc = run("For(A,0,3)\nEnd\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 4);
}

#[test]
fn invariant_repeat_zero_runs_at_least_once() {
    let calc = run("0->A\nRepeat A\nA++\nEnd\n");
    assert!(calc.get_var(var_addr(b'A'), 2) >= 1);
}

#[test]
fn invariant_repeat_checks_before_first_body_run() {
    // Repeat is a pre-test loop: the condition is checked at the loop
    // head, before the body runs even once. `Repeat 1` is already
    // truthy on entry, so the body never executes.
    let calc = run("0->A\nRepeat 1\nA++\nEnd\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 0);
}

#[test]
fn invariant_while_zero_never_enters_body() {
    let calc = run("0->A\nWhile 0\n1->A\nEnd\n");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 0);
}

#[test]
fn repl_recovers_after_a_runtime_error() {
    // A program that raises MissingLabel shouldn't poison the Calculator for
    // whatever the REPL runs next -- memory stays whatever it was left at,
    // and a fresh program still executes correctly.
    let lexed = tokenize("Goto NOPE\n");
    let parsed = parse(&lexed.tokens);
    let code = flatten(&parsed.stmts);
    let mut calc = Calculator::new();
    assert!(execute(&code, &mut calc, &mut NullHost).is_err());

    calc.reset();
    let lexed2 = tokenize("7->A\n");
    let parsed2 = parse(&lexed2.tokens);
    let code2 = flatten(&parsed2.stmts);
    execute(&code2, &mut calc, &mut NullHost).expect("second program should run cleanly");
    assert_eq!(calc.get_var(var_addr(b'A'), 2), 7);
}
