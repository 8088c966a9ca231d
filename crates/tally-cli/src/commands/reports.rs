//! Report command implementations

use anyhow::Result;
use tally_core::{Database, TransactionType};

pub fn cmd_report_categories(db: &Database, user: &str) -> Result<()> {
    let totals = db.category_totals(user)?;

    if totals.is_empty() {
        println!("No expenses recorded yet.");
        return Ok(());
    }

    let grand_total: f64 = totals.iter().map(|c| c.total).sum();

    println!();
    println!("📊 Spending by Category");
    println!("   ──────────────────────────────────────");
    for row in &totals {
        let share = if grand_total > 0.0 {
            row.total / grand_total * 100.0
        } else {
            0.0
        };
        println!(
            "   {:<20} ${:>10.2}  {:>5.1}%",
            row.category, row.total, share
        );
    }
    println!("   ──────────────────────────────────────");
    println!("   {:<20} ${:>10.2}", "Total", grand_total);

    Ok(())
}

pub fn cmd_report_summary(db: &Database, user: &str) -> Result<()> {
    let summary = db.spending_summary(user)?;

    println!();
    println!("📊 Summary");
    println!("   ─────────────────────────────");
    println!("   Income:   ${:>10.2}", summary.income);
    println!("   Expenses: ${:>10.2}", summary.expenses);
    println!("   Savings:  ${:>10.2}", summary.savings);

    if summary.savings < 0.0 {
        println!();
        println!("   ⚠️  Spending exceeds income.");
    }

    Ok(())
}

pub fn cmd_report_trends(db: &Database, user: &str) -> Result<()> {
    let trends = db.monthly_trends(user)?;

    if trends.is_empty() {
        println!("No transactions recorded yet.");
        return Ok(());
    }

    println!();
    println!("📈 Monthly Trends");
    println!("   ─────────────────────────────");
    for point in &trends {
        let label = match point.tx_type {
            TransactionType::Income => "income",
            TransactionType::Expense => "expense",
        };
        println!(
            "   {}-{:02} │ {:<7} │ ${:>10.2}",
            point.year, point.month, label, point.total
        );
    }

    Ok(())
}
