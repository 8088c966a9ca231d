//! Tally CLI - AI-assisted transaction tracker
//!
//! Usage:
//!   tally init                          Initialize database
//!   tally parse "Coffee $6.50" --save   Interpret free text and record it
//!   tally list --type EXPENSE           List transactions
//!   tally serve --port 3000             Start web server

mod cli;
mod commands;

#[cfg(test)]
mod tests;

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db),
        Commands::Parse { text, save } => {
            let db = commands::open_db(&cli.db)?;
            let interpreter = tally_core::Interpreter::from_env();
            commands::cmd_parse(&db, &interpreter, &cli.user, &text, save).await
        }
        Commands::Add {
            amount,
            tx_type,
            category,
            description,
            currency,
            date,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_add(
                &db,
                &cli.user,
                amount,
                &tx_type,
                &category,
                &description,
                &currency,
                date.as_deref(),
            )
        }
        Commands::List {
            q,
            category,
            tx_type,
            from,
            to,
        } => {
            let db = commands::open_db(&cli.db)?;
            commands::cmd_list(
                &db,
                &cli.user,
                q.as_deref(),
                category.as_deref(),
                tx_type.as_deref(),
                from.as_deref(),
                to.as_deref(),
            )
        }
        Commands::Report { report_type } => {
            let db = commands::open_db(&cli.db)?;
            match report_type {
                ReportType::Categories => commands::cmd_report_categories(&db, &cli.user),
                ReportType::Summary => commands::cmd_report_summary(&db, &cli.user),
                ReportType::Trends => commands::cmd_report_trends(&db, &cli.user),
            }
        }
        Commands::Serve {
            port,
            host,
            no_auth,
            origins,
        } => commands::cmd_serve(&cli.db, &host, port, no_auth, origins).await,
    }
}
