// Allow dead_code because these helpers are used across different test files
// which are compiled separately
#![allow(dead_code)]

use std::io::Cursor;

use anyhow::Result;
use chrono::NaiveDate;
use expense_ledger::cli::{OutputFormat, Repl};
use expense_ledger::{Ledger, parse_expense_date};

/// Fixed "today" so defaulted dates are predictable.
pub fn today() -> NaiveDate {
    parse_date("2024-06-15")
}

/// Helper to parse a date string into NaiveDate
pub fn parse_date(date_str: &str) -> NaiveDate {
    parse_expense_date(date_str).unwrap()
}

/// Test fixture: a ledger with a few dated expenses across categories.
pub struct StandardExpenses;

impl StandardExpenses {
    /// Food x2, Transport, Rent - ids 1..=4
    pub fn create(ledger: &mut Ledger) -> Result<()> {
        ledger.add_on("Food", "10", "2024-01-01", today())?;
        ledger.add_on("transport", "2.50", "2024-01-02", today())?;
        ledger.add_on("food", "5", "2024-01-03", today())?;
        ledger.add_on("Rent", "500", "2024-01-04", today())?;
        Ok(())
    }
}

/// Drive a REPL session from scripted input lines; returns the ledger and everything printed.
pub fn run_session(ledger: Ledger, lines: &[&str], format: OutputFormat) -> Result<(Ledger, String)> {
    let mut script = lines.join("\n");
    script.push('\n');

    let mut repl = Repl::new(ledger, Cursor::new(script), Vec::new(), format);
    repl.run()?;
    let (ledger, output) = repl.into_parts();
    Ok((ledger, String::from_utf8(output)?))
}
