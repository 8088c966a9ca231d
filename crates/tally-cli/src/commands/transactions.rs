//! Transaction command implementations

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use tally_core::{Database, Draft, TransactionFilter, TransactionType};

use super::truncate;

#[allow(clippy::too_many_arguments)]
pub fn cmd_add(
    db: &Database,
    user: &str,
    amount: f64,
    tx_type: &str,
    category: &str,
    description: &str,
    currency: &str,
    date: Option<&str>,
) -> Result<()> {
    if !amount.is_finite() || amount < 0.0 {
        anyhow::bail!("Amount must be non-negative (use --type EXPENSE for spending)");
    }

    let tx_type = TransactionType::parse(tx_type)
        .ok_or_else(|| anyhow::anyhow!("Invalid type '{}' (use INCOME or EXPENSE)", tx_type))?;

    let date = match date {
        Some(s) => parse_day(s)?,
        None => Utc::now(),
    };

    let draft = Draft {
        amount,
        currency: currency.to_string(),
        category: category.to_string(),
        description: description.to_string(),
        tx_type,
        confidence: 1.0,
        date,
    };

    let id = db.insert_transaction(user, &draft)?;

    println!("✅ Recorded transaction {}:", id);
    println!(
        "   {} │ ${:.2} │ {} │ {}",
        draft.date.format("%Y-%m-%d"),
        draft.amount,
        draft.category,
        truncate(&draft.description, 40)
    );

    Ok(())
}

pub fn cmd_list(
    db: &Database,
    user: &str,
    q: Option<&str>,
    category: Option<&str>,
    tx_type: Option<&str>,
    from: Option<&str>,
    to: Option<&str>,
) -> Result<()> {
    let from = from.map(parse_naive_day).transpose()?;
    let to = to.map(parse_naive_day).transpose()?;

    let filter = TransactionFilter::new(user)
        .search(q)
        .category(category)
        .tx_type(tx_type)
        .from(from)
        .to(to);

    let transactions = db.list_transactions(filter)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  tally parse \"Coffee at Starbucks $6.50\" --save");
        return Ok(());
    }

    println!();
    println!("📝 Transactions ({})", transactions.len());
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.tx_type {
            TransactionType::Expense => format!("\x1b[31m${:.2}\x1b[0m", tx.amount), // Red
            TransactionType::Income => format!("\x1b[32m+${:.2}\x1b[0m", tx.amount), // Green
        };

        println!(
            "   [{}] {} │ {:>10} │ {:<16} │ {}",
            tx.id,
            tx.date.format("%Y-%m-%d"),
            amount_str,
            truncate(&tx.category, 16),
            truncate(&tx.description, 40)
        );
    }

    Ok(())
}

/// Parse a YYYY-MM-DD argument into a UTC timestamp at midnight
fn parse_day(s: &str) -> Result<DateTime<Utc>> {
    let day = parse_naive_day(s)?;
    let midnight = day
        .and_hms_opt(0, 0, 0)
        .context("Invalid date")?;
    Ok(DateTime::from_naive_utc_and_offset(midnight, Utc))
}

fn parse_naive_day(s: &str) -> Result<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s))
}
