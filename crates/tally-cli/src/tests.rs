//! CLI command tests

use chrono::{TimeZone, Utc};
use tally_core::{AIClient, Database, Draft, Interpreter, TransactionFilter, TransactionType};

use crate::commands::{self, truncate};

fn setup_test_db() -> Database {
    Database::in_memory().unwrap()
}

fn insert(db: &Database, user: &str, amount: f64, tx_type: TransactionType, category: &str) -> i64 {
    let draft = Draft {
        amount,
        currency: "USD".to_string(),
        category: category.to_string(),
        description: format!("{} {}", category, amount),
        tx_type,
        confidence: 1.0,
        date: Utc.with_ymd_and_hms(2024, 3, 15, 12, 0, 0).unwrap(),
    };
    db.insert_transaction(user, &draft).unwrap()
}

// ========== Init ==========

#[test]
fn test_cmd_init() {
    use tempfile::tempdir;

    let dir = tempdir().unwrap();
    let db_path = dir.path().join("test.db");

    let result = commands::cmd_init(&db_path);
    assert!(result.is_ok());
    assert!(db_path.exists());

    // Idempotent
    let result = commands::cmd_init(&db_path);
    assert!(result.is_ok());
}

// ========== Add ==========

#[test]
fn test_cmd_add() {
    let db = setup_test_db();

    let result = commands::cmd_add(
        &db,
        "local",
        6.5,
        "EXPENSE",
        "Food & Dining",
        "Coffee at Starbucks",
        "USD",
        Some("2024-03-15"),
    );
    assert!(result.is_ok());

    let items = db
        .list_transactions(TransactionFilter::new("local"))
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].amount, 6.5);
    assert_eq!(items[0].tx_type, TransactionType::Expense);
    assert_eq!(items[0].category, "Food & Dining");
    assert_eq!(items[0].date.format("%Y-%m-%d").to_string(), "2024-03-15");
}

#[test]
fn test_cmd_add_rejects_negative_amount() {
    let db = setup_test_db();
    let result = commands::cmd_add(&db, "local", -5.0, "EXPENSE", "Other", "", "USD", None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("non-negative"));
}

#[test]
fn test_cmd_add_rejects_invalid_type() {
    let db = setup_test_db();
    let result = commands::cmd_add(&db, "local", 5.0, "TRANSFER", "Other", "", "USD", None);
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("Invalid type"));
}

#[test]
fn test_cmd_add_rejects_invalid_date() {
    let db = setup_test_db();
    let result = commands::cmd_add(
        &db,
        "local",
        5.0,
        "EXPENSE",
        "Other",
        "",
        "USD",
        Some("03/15/2024"),
    );
    assert!(result.is_err());
    assert!(result.unwrap_err().to_string().contains("YYYY-MM-DD"));
}

// ========== Parse ==========

// Parse tests inject the interpreter explicitly so they never pick up
// AI backend configuration from the environment.

#[tokio::test]
async fn test_cmd_parse_without_save_stores_nothing() {
    let db = setup_test_db();
    let interpreter = Interpreter::new(None);

    let result =
        commands::cmd_parse(&db, &interpreter, "local", "Coffee at Starbucks $6.50", false).await;
    assert!(result.is_ok());

    let items = db
        .list_transactions(TransactionFilter::new("local"))
        .unwrap();
    assert!(items.is_empty());
}

#[tokio::test]
async fn test_cmd_parse_save_records_draft() {
    let db = setup_test_db();
    let interpreter = Interpreter::new(None);

    let result =
        commands::cmd_parse(&db, &interpreter, "local", "Coffee at Starbucks $6.50", true).await;
    assert!(result.is_ok());

    let items = db
        .list_transactions(TransactionFilter::new("local"))
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].amount, 6.5);
    assert_eq!(items[0].tx_type, TransactionType::Expense);
}

#[tokio::test]
async fn test_cmd_parse_save_records_ai_draft() {
    let db = setup_test_db();
    let interpreter = Interpreter::new(Some(AIClient::mock()));

    let result = commands::cmd_parse(&db, &interpreter, "local", "Coffee $6.50", true).await;
    assert!(result.is_ok());

    let items = db
        .list_transactions(TransactionFilter::new("local"))
        .unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].category, "Food & Dining");
}

#[tokio::test]
async fn test_cmd_parse_rejects_multi_transaction_input() {
    let db = setup_test_db();
    let interpreter = Interpreter::new(None);

    let result = commands::cmd_parse(
        &db,
        &interpreter,
        "local",
        r#""Coffee $5" and "Lunch $10""#,
        true,
    )
    .await;
    assert!(result.is_err());

    let items = db
        .list_transactions(TransactionFilter::new("local"))
        .unwrap();
    assert!(items.is_empty());
}

// ========== List ==========

#[test]
fn test_cmd_list_empty() {
    let db = setup_test_db();
    let result = commands::cmd_list(&db, "local", None, None, None, None, None);
    assert!(result.is_ok());
}

#[test]
fn test_cmd_list_with_filters() {
    let db = setup_test_db();
    insert(&db, "local", 6.5, TransactionType::Expense, "Food & Dining");
    insert(&db, "local", 25.0, TransactionType::Expense, "Transportation");
    insert(&db, "local", 2500.0, TransactionType::Income, "Other");

    let result = commands::cmd_list(
        &db,
        "local",
        None,
        Some("Food & Dining"),
        Some("EXPENSE"),
        Some("2024-03-01"),
        Some("2024-03-31"),
    );
    assert!(result.is_ok());
}

#[test]
fn test_cmd_list_rejects_invalid_date() {
    let db = setup_test_db();
    let result = commands::cmd_list(&db, "local", None, None, None, Some("not-a-date"), None);
    assert!(result.is_err());
}

// ========== Reports ==========

#[test]
fn test_cmd_report_categories_empty() {
    let db = setup_test_db();
    let result = commands::cmd_report_categories(&db, "local");
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_categories_with_data() {
    let db = setup_test_db();
    insert(&db, "local", 15.0, TransactionType::Expense, "Food & Dining");
    insert(&db, "local", 20.0, TransactionType::Expense, "Transportation");

    let result = commands::cmd_report_categories(&db, "local");
    assert!(result.is_ok());
}

#[test]
fn test_cmd_report_summary() {
    let db = setup_test_db();
    insert(&db, "local", 100.0, TransactionType::Income, "Other");
    insert(&db, "local", 35.0, TransactionType::Expense, "Shopping");

    let result = commands::cmd_report_summary(&db, "local");
    assert!(result.is_ok());

    let summary = db.spending_summary("local").unwrap();
    assert_eq!(summary.savings, 65.0);
}

#[test]
fn test_cmd_report_trends() {
    let db = setup_test_db();
    insert(&db, "local", 50.0, TransactionType::Income, "Other");
    insert(&db, "local", 10.0, TransactionType::Expense, "Entertainment");

    let result = commands::cmd_report_trends(&db, "local");
    assert!(result.is_ok());
}

// ========== Helper Function Tests ==========

#[test]
fn test_truncate() {
    assert_eq!(truncate("short", 10), "short");
    assert_eq!(truncate("a long string that exceeds", 10), "a long ..."); // 7 chars + "..."
    assert_eq!(truncate("exact", 5), "exact");
    assert_eq!(truncate("toolong", 6), "too...");
}

#[test]
fn test_truncate_multibyte() {
    // 'é' is two bytes, so byte 37 of this string falls inside a
    // character; the cut must back up to the boundary at byte 36.
    let accented = "é".repeat(25);
    assert_eq!(truncate(&accented, 40), format!("{}...", "é".repeat(18)));
    assert_eq!(truncate("日本語のテキスト", 10), "日本..."); // 3-byte chars
}
