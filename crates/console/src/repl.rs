//! Read loops: interactive (rustyline) and piped input.

use std::io::{self, BufRead, Write};

use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use hbnb_infra::SnapshotStore;

use crate::interpreter::{Flow, Interpreter};

/// Interactive loop with line editing and history.
pub fn run_interactive<S, W>(
    interpreter: &mut Interpreter<S, W>,
    prompt: &str,
) -> Result<(), ReadlineError>
where
    S: SnapshotStore,
    W: Write,
{
    let mut rl = DefaultEditor::new()?;

    loop {
        match rl.readline(prompt) {
            Ok(line) => {
                if !line.trim().is_empty() {
                    let _ = rl.add_history_entry(line.as_str());
                }
                if interpreter.onecmd(&line)? == Flow::Stop {
                    break;
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => {
                interpreter.eof()?;
                break;
            }
            Err(err) => return Err(err),
        }
    }

    Ok(())
}

/// Non-interactive loop: one command per input line, no prompt.
pub fn run_script<S, W, R>(interpreter: &mut Interpreter<S, W>, input: R) -> io::Result<()>
where
    S: SnapshotStore,
    W: Write,
    R: BufRead,
{
    for line in input.lines() {
        if interpreter.onecmd(&line?)? == Flow::Stop {
            return Ok(());
        }
    }
    interpreter.eof()?;
    Ok(())
}
