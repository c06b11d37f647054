//! Command line definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

use crate::config::DEFAULT_DATA_FILE;
use crate::services::db_loader::DEFAULT_PREVIEW_LIMIT;

#[derive(Parser)]
#[command(
    name = "olist-analise",
    version,
    about = "Analises descritivas do dataset de pedidos Olist"
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Log level used when RUST_LOG is not set (error, warn, info, debug, trace).
    #[arg(long = "log-level", default_value = "warn", global = true)]
    pub log_level: String,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the expected tables in the database and preview each one.
    Tabelas {
        /// Rows fetched per table.
        #[arg(long = "limite", default_value_t = DEFAULT_PREVIEW_LIMIT)]
        limit: usize,
    },

    /// Load the spreadsheet, translate it to Portuguese and show the first rows.
    Carregar {
        #[command(flatten)]
        input: InputArgs,

        /// Rows shown after loading.
        #[arg(long = "linhas", default_value_t = 5)]
        rows: usize,
    },

    /// Mean and median days from order approval to customer delivery.
    TempoEntrega {
        #[command(flatten)]
        input: InputArgs,
    },

    /// Months with the most orders and the largest payment total.
    VendasMes {
        #[command(flatten)]
        input: InputArgs,
    },
}

#[derive(Args)]
pub struct InputArgs {
    /// Spreadsheet export to read.
    #[arg(long = "arquivo", value_name = "PATH", default_value = DEFAULT_DATA_FILE)]
    pub path: PathBuf,
}
