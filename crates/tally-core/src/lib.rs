//! Tally Core Library
//!
//! Shared functionality for the Tally transaction tracker:
//! - Free-text transaction interpretation (AI backend with a
//!   deterministic fallback parser)
//! - SQLite store with per-user transaction CRUD
//! - Filter builder for ad-hoc transaction queries
//! - Analytics: category totals, income/expense summary, monthly trends

pub mod ai;
pub mod categories;
pub mod db;
pub mod error;
pub mod fallback;
pub mod interpreter;
pub mod models;

pub use ai::{AIBackend, AIClient, MockBackend, OpenAICompatibleBackend};
pub use categories::{is_known_category, CATEGORIES, OTHER_CATEGORY};
pub use db::{Database, TransactionFilter, MAX_LIST_LIMIT};
pub use error::{Error, Result};
pub use interpreter::{Interpretation, InterpretationSource, Interpreter};
pub use models::{
    CategoryTotal, Draft, SpendingSummary, Transaction, TransactionType, TransactionUpdate,
    TrendPoint,
};
