//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Tally - Track income and spending from plain English
#[derive(Parser)]
#[command(name = "tally")]
#[command(about = "AI-assisted personal transaction tracker", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "tally.db", global = true)]
    pub db: PathBuf,

    /// User key owning the records this invocation touches
    ///
    /// The same key scopes records on the web server (X-User-Key header),
    /// so the CLI and the UI can share a database.
    #[arg(long, default_value = "local", global = true)]
    pub user: String,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Interpret free text into a transaction draft
    Parse {
        /// Text to interpret, e.g. "Coffee at Starbucks $6.50"
        text: String,

        /// Record the draft instead of just printing it
        #[arg(long)]
        save: bool,
    },

    /// Record a transaction directly
    Add {
        /// Amount (non-negative)
        #[arg(long)]
        amount: f64,

        /// Transaction type: INCOME or EXPENSE
        #[arg(long = "type", default_value = "EXPENSE")]
        tx_type: String,

        /// Category name
        #[arg(long, default_value = "Other")]
        category: String,

        /// Description
        #[arg(long, default_value = "")]
        description: String,

        /// Currency code
        #[arg(long, default_value = "USD")]
        currency: String,

        /// Transaction date (YYYY-MM-DD), defaults to today
        #[arg(long)]
        date: Option<String>,
    },

    /// List transactions, newest first
    List {
        /// Search text (matches description or category)
        #[arg(short, long)]
        q: Option<String>,

        /// Filter by category ("all" disables the filter)
        #[arg(long)]
        category: Option<String>,

        /// Filter by type: INCOME or EXPENSE
        #[arg(long = "type")]
        tx_type: Option<String>,

        /// Inclusive start date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,

        /// Inclusive end date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },

    /// Generate spending reports
    Report {
        #[command(subcommand)]
        report_type: ReportType,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable the X-User-Key requirement (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// Anonymous requests all share one local user.
        #[arg(long)]
        no_auth: bool,

        /// Allowed CORS origin (repeatable)
        #[arg(long = "origin")]
        origins: Vec<String>,
    },
}

#[derive(Subcommand)]
pub enum ReportType {
    /// Expense totals per category, largest first
    Categories,

    /// Total income, expenses, and savings
    Summary,

    /// Monthly income and expense totals
    Trends,
}
