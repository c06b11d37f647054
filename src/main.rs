use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;

mod cli;
mod commands;
mod config;
mod error;
mod format;
mod logging;
mod mappings;
mod models;
mod services;

use crate::cli::{Cli, Command};

fn main() -> ExitCode {
    let cli = Cli::parse();

    // Initialize logging
    if let Err(error) = logging::init_logging(&cli.log_level) {
        eprintln!("erro: falha ao iniciar logs: {error}");
        return ExitCode::FAILURE;
    }

    match run(cli.command) {
        Ok(()) => ExitCode::SUCCESS,
        Err(error) => {
            eprintln!("erro: {error:#}");
            ExitCode::FAILURE
        }
    }
}

fn run(command: Command) -> Result<()> {
    match command {
        Command::Tabelas { limit } => commands::run_tables(limit),
        Command::Carregar { input, rows } => commands::run_load(&input.path, rows),
        Command::TempoEntrega { input } => commands::run_delivery_time(&input.path),
        Command::VendasMes { input } => commands::run_monthly(&input.path),
    }
}
