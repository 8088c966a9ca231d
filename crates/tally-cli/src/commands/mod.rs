//! CLI command implementations
//!
//! Commands are organized by domain:
//! - `core` - Database setup (init) and the shared `open_db` utility
//! - `parse` - Free-text interpretation command
//! - `reports` - Report commands (categories, summary, trends)
//! - `serve` - Web server command
//! - `transactions` - Transaction commands (add, list)

pub mod core;
pub mod parse;
pub mod reports;
pub mod serve;
pub mod transactions;

// Re-export command functions for main.rs
pub use core::*;
pub use parse::*;
pub use reports::*;
pub use serve::*;
pub use transactions::*;

/// Truncate a string to a maximum length, adding "..." if truncated.
/// Cuts on a char boundary so non-ASCII descriptions cannot panic it.
pub fn truncate(s: &str, max: usize) -> String {
    if s.len() <= max {
        s.to_string()
    } else {
        let mut end = max.saturating_sub(3);
        while !s.is_char_boundary(end) {
            end -= 1;
        }
        format!("{}...", &s[..end])
    }
}
