//! Read-eval-print loop
//!
//! Reads one line at a time, dispatches it to the session and reports any
//! failure inline. The loop ends on `exit`, end of input, or Ctrl-C, which is
//! honoured both at the prompt and while a command is running.

use std::future::Future;
use std::io::{self, Write};

use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{debug, warn};

use crate::commands::Command;
use crate::session::{Outcome, Session};

pub const PROMPT: &str = "Pokedex > ";

/// Splits input into lowercase words.
pub fn clean_input(text: &str) -> Vec<String> {
    text.split_whitespace().map(str::to_lowercase).collect()
}

/// Resolves when the user presses Ctrl-C.
///
/// If the signal handler cannot be installed this never resolves, leaving
/// `exit` and end of input as the only ways out.
pub async fn interrupted() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "unable to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
}

/// Runs the prompt loop until the user leaves.
///
/// # Arguments
/// * `session` - State shared by every command in this run
/// * `input` - Line source, normally stdin
/// * `out` - Destination for prompts and command output
/// * `abort` - Ends the session with "Aborted" when it resolves, whether the
///   loop is waiting for input or running a command; normally [`interrupted`]
///
/// # Returns
/// * `Ok(())` when the session ends normally
/// * `Err` only if reading input or writing the prompt fails
pub async fn run<R, W, A>(session: &mut Session, input: R, out: &mut W, abort: A) -> io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: Write,
    A: Future<Output = ()>,
{
    writeln!(out, "Welcome to the Pokedex CLI!")?;
    writeln!(out, "Type 'help' to see available commands.")?;

    tokio::pin!(abort);
    let mut lines = input.lines();
    loop {
        write!(out, "{}", PROMPT)?;
        out.flush()?;

        let line = tokio::select! {
            line = lines.next_line() => line?,
            _ = &mut abort => return aborted(out),
        };

        let Some(line) = line else {
            // End of input
            writeln!(out)?;
            return Ok(());
        };

        let words = clean_input(&line);
        let Some((name, args)) = words.split_first() else {
            continue;
        };

        let result = match Command::parse(name, args) {
            Ok(command) => {
                let running = tokio::select! {
                    result = session.execute(command, &mut *out) => Some(result),
                    _ = &mut abort => None,
                };
                match running {
                    Some(result) => result,
                    None => return aborted(out),
                }
            }
            Err(e) => Err(e),
        };

        match result {
            Ok(Outcome::Exit) => return Ok(()),
            Ok(Outcome::Continue) => {}
            Err(e) => {
                debug!(error = %e, "command failed");
                writeln!(out, "Error: {}", e)?;
            }
        }
    }
}

fn aborted<W: Write>(out: &mut W) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "Aborted")?;
    out.flush()
}
