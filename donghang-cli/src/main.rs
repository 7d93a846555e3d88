use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use donghang_core::ExpenseParser;
use donghang_ledger::{ExpenseApiClient, ExpenseRecord, OfflineQueue, write_csv};

mod ai;
mod auth;
mod chat;
mod config;
mod fallback;
mod setup;
mod state;

const LONG_VERSION: &str = concat!(
    env!("CARGO_PKG_VERSION"),
    " (",
    env!("DONGHANG_BUILD_SHA"),
    ")"
);

#[derive(Parser, Debug)]
#[command(
    name = "donghang",
    version,
    long_version = LONG_VERSION,
    about = "Donghang companion CLI: voice-style ledger and welfare assistant"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// One-time interactive setup: capture profile and write ~/.donghang/*
    Setup,

    /// Chat with 금복 (expense recording, welfare recommendations)
    Chat,

    /// Expense-related commands
    Expense {
        #[command(subcommand)]
        command: ExpenseCommand,
    },

    /// Backend auth
    Auth {
        #[command(subcommand)]
        command: AuthCommand,
    },

    /// Config file management
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ExpenseCommand {
    /// Parse one utterance and print the result (no persistence)
    Parse {
        /// Utterance, e.g. "5000원 점심 먹었어"
        text: String,

        /// Use the offline-variant category table
        #[arg(long)]
        offline: bool,
    },

    /// Replay queued offline records against the backend
    Sync,

    /// Export queued records as CSV
    Export {
        /// Output file path
        #[arg(long)]
        out: PathBuf,
    },
}

#[derive(Subcommand, Debug)]
enum AuthCommand {
    /// Store the backend access token in ~/.donghang/auth.json
    PasteToken,
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write a default ~/.donghang/config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Setup => {
            setup::run_setup()?;
        }

        Command::Chat => {
            chat::run_chat()?;
        }

        Command::Expense { command } => match command {
            ExpenseCommand::Parse { text, offline } => {
                let parser = if offline {
                    ExpenseParser::offline()?
                } else {
                    ExpenseParser::interactive()?
                };
                match parser.parse(&text) {
                    Some(parsed) => println!("{}", serde_json::to_string_pretty(&parsed)?),
                    None => println!("(no expense detected)"),
                }
            }

            ExpenseCommand::Sync => {
                let cfg = config::load_config()?;
                let token = auth::load_auth()?.access_token;
                let queue = OfflineQueue::open(state::ensure_donghang_home()?)?;

                let client = ExpenseApiClient::new(&cfg.server.base_url, token);
                let report = client.sync_queue(&queue).await?;

                println!("Synced {} record(s), {} failed", report.synced, report.failed);
                for err in &report.errors {
                    println!("  {err}");
                }
            }

            ExpenseCommand::Export { out } => {
                let queue = OfflineQueue::open(state::ensure_donghang_home()?)?;
                let records: Vec<ExpenseRecord> =
                    queue.load()?.into_iter().map(|e| e.record).collect();

                let file = std::fs::File::create(&out)
                    .with_context(|| format!("create {}", out.display()))?;
                write_csv(&records, file)?;

                println!("Wrote {} record(s) to {}", records.len(), out.display());
            }
        },

        Command::Auth { command } => match command {
            AuthCommand::PasteToken => {
                auth::paste_token()?;
            }
        },

        Command::Config { command } => match command {
            ConfigCommand::Init => {
                config::init_config()?;
            }
        },
    }

    Ok(())
}
