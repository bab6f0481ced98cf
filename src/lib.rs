//! rCashOffer library root.
//! Exposes the CLI parser, the high-level run() function and the claim
//! lifecycle modules (eligibility, submission, review, reconciliation).

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod models;
pub mod profile;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    use cli::commands;

    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Db { .. } => commands::db::handle(&cli.command, cfg),
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
        Commands::Visit { .. } => commands::visit::handle(&cli.command, cfg),
        Commands::Profile => commands::profile::handle(cfg),
        Commands::Claim { .. } => commands::claim::handle(&cli.command, cfg),
        Commands::Watch { .. } => commands::watch::handle(&cli.command, cfg),
        Commands::List { .. } | Commands::Show { .. } => {
            commands::list::handle(&cli.command, cfg)
        }
        Commands::Approve { .. }
        | Commands::Reject { .. }
        | Commands::Paid { .. }
        | Commands::SetStatus { .. }
        | Commands::Annotate { .. } => commands::review::handle(&cli.command, cfg),
        Commands::Backup { .. } => commands::backup::handle(&cli.command, cfg),
        Commands::Export { .. } => commands::export::handle(&cli.command, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    // 1️⃣ parse CLI
    let cli = Cli::parse();

    // 2️⃣ load config once
    let mut cfg = Config::load()?;

    // 3️⃣ command-line overrides
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }
    if let Some(custom_profile) = &cli.profile {
        cfg.profile = custom_profile.clone();
    }

    // 4️⃣ dispatch
    dispatch(&cli, &cfg)
}
