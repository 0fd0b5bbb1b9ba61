//! Entry point: parse the CLI, set up file logging, and dispatch to either
//! a one-shot run over `input_path` or the interactive REPL.

mod cli;
mod display;
mod keybindings;
mod logging;
mod repl;
mod tui;

use std::path::Path;
use std::process::ExitCode;

use axe_interpreter::calculator::Calculator;
use axe_interpreter::error::ErrorKind;
use axe_interpreter::flattener::flatten;
use axe_interpreter::interp::{execute, NullHost};
use axe_interpreter::lexer::tokenize;
use axe_interpreter::parser::parse;
use clap::Parser;

use cli::{Cli, Stage};

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _log_guard = logging::init(Path::new(".")).ok();

    match cli.input_path {
        Some(path) => run_file(&path, cli.stage),
        None => run_repl(),
    }
}

fn run_file(path: &Path, stage: Stage) -> ExitCode {
    let source = match std::fs::read_to_string(path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("! > could not read {}: {e}", path.display());
            return ExitCode::FAILURE;
        }
    };

    let lexed = tokenize(&source);
    if stage == Stage::Lexer {
        for tok in &lexed.tokens {
            println!("{tok:?}");
        }
        for err in &lexed.errors {
            eprintln!("{err}");
        }
        return exit_for(lexed.errors.is_empty());
    }

    let parsed = parse(&lexed.tokens);
    if stage == Stage::Parser {
        for stmt in &parsed.stmts {
            println!("{stmt:?}");
        }
        for err in &lexed.errors {
            eprintln!("{err}");
        }
        for err in &parsed.errors {
            eprintln!("{err}");
        }
        return exit_for(lexed.errors.is_empty() && parsed.errors.is_empty());
    }

    for err in &lexed.errors {
        eprintln!("{err}");
    }
    for err in &parsed.errors {
        eprintln!("{err}");
    }

    let code = flatten(&parsed.stmts);
    let keybindings = keybindings::load(None);
    let mut calc = Calculator::with_keybindings(&keybindings);

    let result = match tui::Tui::new() {
        Ok(mut host) => {
            let result = execute(&code, &mut calc, &mut host);
            let _ = host.shutdown();
            result
        }
        Err(e) => {
            eprintln!("warning: no terminal available, running headless: {e}");
            execute(&code, &mut calc, &mut NullHost)
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) if err.kind == ErrorKind::SystemExit => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn run_repl() -> ExitCode {
    let keybindings = keybindings::load(None);
    match tui::Tui::new() {
        Ok(mut host) => {
            let _ = repl::run(&mut host, &keybindings);
            let _ = host.shutdown();
        }
        Err(e) => {
            eprintln!("warning: no terminal available, running headless: {e}");
            let _ = repl::run(&mut NullHost, &keybindings);
        }
    }
    ExitCode::SUCCESS
}

fn exit_for(ok: bool) -> ExitCode {
    if ok {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
