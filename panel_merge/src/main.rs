#![warn(clippy::all, rust_2018_idioms)]

use anyhow::Result;
use clap::Parser;
use panel_merge::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    let level = if cli.verbose { "debug" } else { "info" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
    panel_merge::run(&cli)
}
