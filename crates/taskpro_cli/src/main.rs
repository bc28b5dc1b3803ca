//! Binary crate for the `taskpro` command-line dashboard.
//!
//! # Responsibility
//! - Load configuration and start file logging.
//! - Open the task database and dispatch one subcommand.

use clap::Parser;

mod cli;
mod output;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cmd = cli::Cli::parse();
    let code = cmd.run().await?;
    if code != 0 {
        std::process::exit(code);
    }
    Ok(())
}
