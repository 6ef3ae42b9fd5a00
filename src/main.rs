use std::io;
use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

use stampnote::cli::{run, CliArgs};

fn main() -> Result<ExitCode> {
    stampnote::tracing::init();

    // Parse command-line arguments
    let args = CliArgs::parse();
    tracing::debug!(?args, "Starting");

    let code = run(args, &mut io::stdin().lock(), &mut io::stdout().lock())?;
    Ok(ExitCode::from(code))
}
