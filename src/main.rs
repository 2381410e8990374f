mod app;
mod cli;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Command};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // stdout carries the JSON output
    tracing_subscriber::fmt()
        .with_env_filter(cli.log.as_str())
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();

    match &cli.command {
        Command::Plan(args) => app::run_plan(args),
        Command::Payload(args) => app::run_payload(args),
    }
}
