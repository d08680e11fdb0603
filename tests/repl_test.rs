mod common;

use anyhow::Result;
use common::{run_session, StandardExpenses};
use expense_ledger::cli::OutputFormat;
use expense_ledger::Ledger;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

#[test]
fn test_add_and_list_session() -> Result<()> {
    let (ledger, out) = run_session(
        Ledger::new(),
        &["1", " groceries ", "42.5", "2024-02-10", "2", "6"],
        OutputFormat::Table,
    )?;

    assert_eq!(ledger.len(), 1);
    assert!(out.starts_with("Welcome to Expense Tracker\n"));
    assert!(out.contains("Expense added successfully (ID: 1)"));
    assert!(out.contains("=== All Expenses ==="));
    assert!(out.contains("1     2024-02-10   Groceries       $    42.50\n"));
    assert!(out.contains("Total entries: 1"));
    assert!(out.ends_with("Thank you for using Expense Tracker!\n"));
    Ok(())
}

#[test]
fn test_add_reports_validation_errors() -> Result<()> {
    let (ledger, out) = run_session(
        Ledger::new(),
        &[
            "1", "", // empty category stops before amount
            "1", "Food", "abc", "",
            "1", "Food", "-4", "",
            "1", "Food", "4", "2024-13-40",
            "6",
        ],
        OutputFormat::Table,
    )?;

    assert!(ledger.is_empty());
    assert!(out.contains("Error: Category cannot be empty."));
    assert!(out.contains("Error: 'abc' is not a valid number."));
    assert!(out.contains("Error: Amount must be positive."));
    assert!(out.contains("Error: Invalid date '2024-13-40'. Use YYYY-MM-DD."));
    Ok(())
}

#[test]
fn test_long_category_is_listed_in_full() -> Result<()> {
    let (_, out) = run_session(
        Ledger::new(),
        &["1", "household maintenance", "80", "2024-02-10", "2", "6"],
        OutputFormat::Table,
    )?;

    assert!(out.contains("1     2024-02-10   Household Maintenance $    80.00\n"));
    assert!(!out.contains("..."));
    Ok(())
}

#[test]
fn test_exponent_and_sub_cent_amounts_session() -> Result<()> {
    let (ledger, out) = run_session(
        Ledger::new(),
        &[
            "1", "Fees", "0.005", "2024-02-10",
            "1", "Fees", "0.005", "2024-02-10",
            "1", "Fees", "0.005", "2024-02-10",
            "1", "Rent", "1e3", "2024-02-11",
            "4", "6",
        ],
        OutputFormat::Table,
    )?;

    assert_eq!(ledger.len(), 4);
    assert_eq!(ledger.filter_by_category("fees").subtotal, dec!(0.015));
    assert!(out.contains("Expense added successfully (ID: 4)"));
    assert!(out.contains("Fees: $0.02\nRent: $1000.00\n"));
    assert!(out.contains("Overall Total: $1000.02"));
    Ok(())
}

#[test]
fn test_invalid_menu_option_reprompts() -> Result<()> {
    let (ledger, out) = run_session(Ledger::new(), &["9", "abc", "6"], OutputFormat::Table)?;

    assert!(ledger.is_empty());
    assert_eq!(out.matches("Invalid option. Please choose 1-6.").count(), 2);
    assert_eq!(out.matches("1. Add new expense").count(), 3);
    Ok(())
}

#[test]
fn test_empty_ledger_messages() -> Result<()> {
    let (_, out) = run_session(Ledger::new(), &["2", "3", "4", "5", "6"], OutputFormat::Table)?;

    assert!(out.contains("No expenses recorded yet."));
    assert!(out.contains("No expenses to filter."));
    assert!(out.contains("No expenses to calculate."));
    assert!(out.contains("No expenses to delete."));
    assert!(!out.contains("Enter category to filter"));
    Ok(())
}

#[test]
fn test_filter_session() -> Result<()> {
    let mut ledger = Ledger::new();
    StandardExpenses::create(&mut ledger)?;

    let (_, out) = run_session(ledger, &["3", "FOOD", "3", "Books", "6"], OutputFormat::Table)?;

    assert!(out.contains("=== Expenses in 'Food' ==="));
    assert!(out.contains("1     2024-01-01   $    10.00\n"));
    assert!(out.contains("3     2024-01-03   $     5.00\n"));
    assert!(out.contains("Category total: $15.00"));
    assert!(out.contains("No expenses found in category 'Books'."));
    Ok(())
}

#[test]
fn test_totals_session() -> Result<()> {
    let mut ledger = Ledger::new();
    StandardExpenses::create(&mut ledger)?;

    let (_, out) = run_session(ledger, &["4", "6"], OutputFormat::Table)?;

    assert!(out.contains("Food: $15.00\nRent: $500.00\nTransport: $2.50\n"));
    assert!(out.contains("Overall Total: $517.50"));
    Ok(())
}

#[test]
fn test_delete_session() -> Result<()> {
    let mut ledger = Ledger::new();
    StandardExpenses::create(&mut ledger)?;

    let (ledger, out) = run_session(
        ledger,
        &[
            "5", "2", "n", // cancelled
            "5", "x", // not a number
            "5", "99", // unknown
            "5", "2", "YES", // deleted
            "6",
        ],
        OutputFormat::Table,
    )?;

    assert!(out.contains("Deleting: Transport - $2.50 on 2024-01-02"));
    assert!(out.contains("Deletion cancelled."));
    assert!(out.contains("Error: 'x' is not a valid ID number."));
    assert!(out.contains("Error: Expense ID not found."));
    assert!(out.contains("Expense deleted successfully."));

    assert_eq!(ledger.len(), 3);
    assert!(ledger.get(2).is_none());
    Ok(())
}

#[test]
fn test_end_of_input_exits_cleanly() -> Result<()> {
    let (ledger, out) = run_session(Ledger::new(), &["1", "Food", "3"], OutputFormat::Table)?;

    // Input ran out at the date prompt: nothing is added
    assert!(ledger.is_empty());
    assert!(out.ends_with("Thank you for using Expense Tracker!\n"));
    Ok(())
}

#[test]
fn test_json_format() -> Result<()> {
    let mut ledger = Ledger::new();
    StandardExpenses::create(&mut ledger)?;

    let (_, out) = run_session(ledger, &["4", "6"], OutputFormat::Json)?;

    assert!(out.contains("\"category\": \"Food\""));
    assert!(!out.contains("Overall Total: $"));

    let start = out.find('{').unwrap();
    let end = out.rfind('}').unwrap();
    let totals: serde_json::Value = serde_json::from_str(&out[start..=end])?;
    let total: Decimal = totals["total"].as_str().unwrap().parse()?;
    assert_eq!(total, dec!(517.50));
    Ok(())
}

#[test]
fn test_csv_format() -> Result<()> {
    let mut ledger = Ledger::new();
    StandardExpenses::create(&mut ledger)?;

    let (_, out) = run_session(ledger, &["2", "6"], OutputFormat::Csv)?;

    assert!(out.contains("id,date,category,amount\n"));
    assert!(out.contains("1,2024-01-01,Food,10.00\n"));
    assert!(out.contains("4,2024-01-04,Rent,500.00\n"));
    Ok(())
}
