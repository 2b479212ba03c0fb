mod accounts;
mod commands;
mod state;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "fin")]
#[command(about = "Double-entry bookkeeping kernel for imported bank statements")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Path to the JSON books snapshot this invocation reads and writes.
    #[arg(long, global = true, default_value = "fin-books.json")]
    state: PathBuf,

    /// Enable verbose (debug) logging.
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Classify and post a bank statement file into the books.
    Import {
        /// Company the statement belongs to.
        #[arg(long)]
        company: String,

        /// Fiscal period to post into, e.g. "2025-01".
        #[arg(long)]
        period: String,

        /// Path to the bank statement text file.
        #[arg(long)]
        file: PathBuf,

        /// Optional classification rules CSV to load before posting.
        #[arg(long)]
        rules: Option<PathBuf>,
    },

    /// Generate one of the six standard reports.
    Report {
        /// Report kind: trial-balance, general-ledger, cashbook,
        /// income-statement, balance-sheet, audit-trail.
        kind: String,

        #[arg(long)]
        company: String,

        #[arg(long)]
        period: String,

        /// Output format: text, csv, pdf, xlsx.
        #[arg(long, default_value = "text")]
        format: String,

        /// Output file path. Required for pdf/xlsx; optional otherwise
        /// (defaults to stdout).
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage classification rules.
    Rules {
        #[command(subcommand)]
        command: RulesCommands,
    },
}

#[derive(Subcommand)]
enum RulesCommands {
    /// Replace a company's classification rule set from a CSV file.
    Import {
        #[arg(long)]
        company: String,

        #[arg(long)]
        file: PathBuf,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    let filter = if cli.verbose { "debug" } else { "info" };
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()))
        .init();

    let result = match cli.command {
        Commands::Import { company, period, file, rules } => {
            commands::import(&cli.state, &company, &period, &file, rules.as_deref())
        }
        Commands::Report { kind, company, period, format, out } => {
            commands::report(&cli.state, &kind, &company, &period, &format, out.as_ref())
        }
        Commands::Rules { command: RulesCommands::Import { company, file } } => {
            commands::rules_import(&cli.state, &company, &file)
        }
    };

    match result {
        Ok(code) => ExitCode::from(code as u8),
        Err(error) => {
            tracing::error!("{error:?}");
            ExitCode::from(commands::EXIT_GENERAL_FAILURE as u8)
        }
    }
}
