//! The `microscheme` CLI (§6): runs a file when given a path argument,
//! otherwise drops into an interactive REPL. Grounded in the teacher's
//! `rusche-cli` binary — same `rustyline`+`colored` pairing, same
//! file-vs-REPL dispatch — generalized to MicroScheme's single-pass
//! `exec` driver instead of the teacher's token-buffering `Evaluator`.

use colored::Colorize;
use microscheme::{Env, Outcome};
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;

fn main() {
    let mut args = std::env::args().skip(1);

    match args.next() {
        Some(path) => run_file(&path),
        None => run_repl(),
    }
}

fn run_file(path: &str) {
    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            eprintln!("{}: failed to read \"{path}\": {err}", "error".red());
            std::process::exit(1);
        }
    };

    let env = Env::new_root();
    match microscheme::exec(&text, &env) {
        Ok(outcomes) => {
            let mut had_error = false;
            for outcome in outcomes {
                match outcome {
                    Outcome::Value(_) => {}
                    Outcome::Error(err) => {
                        eprintln!("{}: {err}", "error".red());
                        had_error = true;
                    }
                }
            }
            if had_error {
                std::process::exit(1);
            }
        }
        Err(err) => {
            eprintln!("{}: {err}", "error".red());
            std::process::exit(1);
        }
    }
}

fn run_repl() {
    print_logo();

    let mut rl = DefaultEditor::new().expect("failed to initialize line editor");
    let env = Env::new_root();
    let mut parser = microscheme::Parser::new();

    loop {
        let prompt = if parser.is_pending() {
            "      ... "
        } else {
            "microscheme> "
        };

        match rl.readline(prompt) {
            Ok(line) => {
                let _ = rl.add_history_entry(line.as_str());
                parser.feed(&line);

                while let Some(result) = parser.parse_next() {
                    match result {
                        Ok(microscheme::Expr::Root(forms)) => {
                            for form in &forms {
                                match microscheme::eval(form, &env) {
                                    Ok(value) => println!("{}", value.to_string().green()),
                                    Err(err) => eprintln!("{}: {err}", "error".red()),
                                }
                            }
                        }
                        Ok(_) => {}
                        Err(err) => eprintln!("{}: {err}", "error".red()),
                    }
                }
            }
            Err(ReadlineError::Eof) | Err(ReadlineError::Interrupted) => break,
            Err(err) => {
                eprintln!("{err}");
                break;
            }
        }
    }
}

#[rustfmt::skip]
fn print_logo() {
    println!("{}", r"   __  __ _            ____       _
  |  \/  (_) ___ _ __ / ___|  ___| |__   ___ _ __ ___   ___
  | |\/| | |/ __| '__| |     / __| '_ \ / _ \ '_ ` _ \ / _ \
  | |  | | | (__| |  | |___ | (__| | | |  __/ | | | | |  __/
  |_|  |_|_|\___|_|   \____(_)___|_| |_|\___|_| |_| |_|\___|".bold().cyan());
    println!("\n{}", "To exit, press Ctrl+D.".dimmed());
}
