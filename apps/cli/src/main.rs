//! `bookshelf`: list, add, edit and delete catalog books and products from the shell.

mod cli;
mod commands;
mod config;

use std::process::ExitCode;

use clap::Parser;

use crate::cli::Cli;
use crate::commands::App;
use crate::config::AppConfig;

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();
    let config = AppConfig::load(&cli)?;
    let _guard = bookshelf_log::init_with(config.log.clone())?;
    tracing::debug!(?config, "configuration loaded");

    let mut app = App::load(config)?;
    let mut out = std::io::stdout().lock();
    let status = app.run(cli.command, &mut out)?;
    Ok(status.into())
}
