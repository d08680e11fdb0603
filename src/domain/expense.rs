use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::Amount;

/// Sequential identifier, starting at 1 and never reused within a ledger.
pub type ExpenseId = u64;

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// One recorded expense. Expenses are immutable once stored - there is no edit,
/// only delete.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    /// Title-cased category, e.g. "Food" or "Public Transport"
    pub category: String,
    /// Exact amount (always positive)
    pub amount: Amount,
    pub date: NaiveDate,
}

impl Expense {
    /// Create a new expense. The id must be allocated by the repository.
    pub fn new(id: ExpenseId, category: impl Into<String>, amount: Amount, date: NaiveDate) -> Self {
        assert!(amount > Amount::ZERO, "Expense amount must be positive");
        Self {
            id,
            category: category.into(),
            amount,
            date,
        }
    }

    /// Case-insensitive comparison against the stored category.
    pub fn in_category(&self, category: &str) -> bool {
        self.category.to_lowercase() == category.to_lowercase()
    }

    pub fn date_string(&self) -> String {
        self.date.format(DATE_FORMAT).to_string()
    }
}

/// Title-case a category: every letter that follows a non-letter (or starts the
/// text) is upper-cased, every other letter is lower-cased.
/// Example: "public transport" -> "Public Transport", "fast-FOOD" -> "Fast-Food"
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut prev_is_letter = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if prev_is_letter {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_letter = true;
        } else {
            out.push(c);
            prev_is_letter = false;
        }
    }
    out
}

/// Parse a `YYYY-MM-DD` date. Only the exact ten-character shape is accepted,
/// and the date must exist on the calendar.
pub fn parse_expense_date(input: &str) -> Option<NaiveDate> {
    let bytes = input.as_bytes();
    if bytes.len() != 10 {
        return None;
    }
    let shaped = bytes.iter().enumerate().all(|(i, b)| match i {
        4 | 7 => *b == b'-',
        _ => b.is_ascii_digit(),
    });
    if !shaped {
        return None;
    }
    NaiveDate::parse_from_str(input, DATE_FORMAT).ok()
}

pub fn parse_expense_id(input: &str) -> Option<ExpenseId> {
    input.trim().parse().ok()
}
