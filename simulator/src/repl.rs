//! Interactive REPL (spec §5's concurrency model): each run gets a fresh
//! program text and a cleared `Calculator`; a run's runtime error is
//! reported and the REPL keeps going rather than exiting the process.

use std::io::{self, BufRead, Write};

use axe_interpreter::calculator::Calculator;
use axe_interpreter::error::ErrorKind;
use axe_interpreter::flattener::flatten;
use axe_interpreter::interp::{execute, Host};
use axe_interpreter::lexer::tokenize;
use axe_interpreter::parser::parse;

/// Reads from stdin until it closes. Source for one run is every line typed
/// until a blank line; a blank first line ends the session.
pub fn run(host: &mut dyn Host, keybindings: &str) -> io::Result<()> {
    let mut calc = Calculator::with_keybindings(keybindings);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    loop {
        print!("axe> ");
        io::stdout().flush()?;

        let mut source = String::new();
        loop {
            let Some(line) = lines.next() else {
                return Ok(());
            };
            let line = line?;
            if line.is_empty() {
                break;
            }
            source.push_str(&line);
            source.push('\n');
        }
        if source.is_empty() {
            return Ok(());
        }

        calc.reset();
        run_one(&source, &mut calc, host);
    }
}

fn run_one(source: &str, calc: &mut Calculator, host: &mut dyn Host) {
    let lexed = tokenize(source);
    for err in &lexed.errors {
        eprintln!("{err}");
    }

    let parsed = parse(&lexed.tokens);
    for err in &parsed.errors {
        eprintln!("{err}");
    }

    let code = flatten(&parsed.stmts);
    if let Err(err) = execute(&code, calc, host) {
        if err.kind != ErrorKind::SystemExit {
            eprintln!("{err}");
        }
    }
}
