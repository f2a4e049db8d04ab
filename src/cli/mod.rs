//! Command-line surface over the store and the cash-flow services.

pub mod commands;
pub mod output;

use std::io::{self, BufRead};

use thiserror::Error;

use crate::errors::LedgerError;

pub use commands::{CliContext, LoopControl};

/// User-facing CLI error wrapper.
#[derive(Error, Debug)]
pub enum CliError {
    #[error(transparent)]
    Core(#[from] LedgerError),
    #[error("Invalid input: {0}")]
    Input(String),
    #[error("Command failed: {0}")]
    Command(String),
}

impl From<io::Error> for CliError {
    fn from(err: io::Error) -> Self {
        CliError::Core(LedgerError::Io(err))
    }
}

/// Runs the arguments given on the command line, or, when
/// `CASHFLOW_CLI_SCRIPT` is set, every line read from stdin.
pub fn run_cli() -> Result<(), CliError> {
    let mut context = CliContext::from_environment()?;

    if std::env::var_os("CASHFLOW_CLI_SCRIPT").is_some() {
        return run_script(&mut context, io::stdin().lock());
    }

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.is_empty() {
        println!("{}", commands::usage());
        return Ok(());
    }
    commands::dispatch(&mut context, &args).map(|_| ())
}

fn run_script(context: &mut CliContext, input: impl BufRead) -> Result<(), CliError> {
    for line in input.lines() {
        let line = line?;
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let args = shell_words::split(trimmed)
            .map_err(|err| CliError::Input(format!("{trimmed}: {err}")))?;
        match commands::dispatch(context, &args) {
            Ok(LoopControl::Continue) => {}
            Ok(LoopControl::Exit) => break,
            Err(err) => eprintln!("Error: {err}"),
        }
    }
    Ok(())
}
