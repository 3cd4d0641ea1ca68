use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing::Level;

mod command;
pub(crate) mod config;
mod generate;
mod render;
mod util;
mod writer;

use command::*;

#[derive(Parser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Log debug output to stderr
    #[clap(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Resource(Resource),
    Info(Info),
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .without_time()
        .init();
    match cli.command {
        Command::Resource(r) => r.run(),
        Command::Info(info) => info.run(),
    }
}
