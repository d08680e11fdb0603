use serde::{Deserialize, Serialize};

use crate::domain::{Amount, Expense, ExpenseId};

/// Expenses matching one category, with their subtotal.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryFilter {
    /// The category text as the caller supplied it
    pub category: String,
    pub expenses: Vec<Expense>,
    pub subtotal: Amount,
}

impl CategoryFilter {
    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}

/// Per-category totals, sorted by category name, plus the grand total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategoryTotals {
    pub categories: Vec<CategoryTotal>,
    pub total: Amount,
}

impl CategoryTotals {
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: String,
    pub total: Amount,
    pub count: usize,
}

/// Outcome of a delete request. Only `Deleted` changes the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted(Expense),
    NotFound(ExpenseId),
    Cancelled(ExpenseId),
}
