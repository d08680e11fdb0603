use std::collections::BTreeMap;

use chrono::{Local, NaiveDate};
use tracing::debug;

use crate::domain::{
    parse_amount, parse_expense_date, parse_expense_id, title_case, Amount, Expense, ExpenseId,
    ParseAmountError,
};
use crate::storage::Repository;

use super::{CategoryFilter, CategoryTotal, CategoryTotals, DeleteOutcome, LedgerError};

/// The expense ledger for one session. This is the primary interface for the
/// REPL driver and for tests; it owns its storage and id counter.
#[derive(Debug, Default)]
pub struct Ledger {
    repo: Repository,
}

impl Ledger {
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Add
    // ========================

    /// Record an expense from raw input. An empty date means today (local time).
    pub fn add(&mut self, category: &str, amount: &str, date: &str) -> Result<ExpenseId, LedgerError> {
        self.add_on(category, amount, date, Local::now().date_naive())
    }

    /// Record an expense, using `today` when no date is supplied.
    ///
    /// Everything is validated before the repository is touched, so a rejected
    /// add leaves both the expenses and the id counter unchanged. An amount that
    /// would push the grand total past what an `Amount` can hold is rejected, so
    /// every subtotal and total stays exact.
    pub fn add_on(
        &mut self,
        category: &str,
        amount: &str,
        date: &str,
        today: NaiveDate,
    ) -> Result<ExpenseId, LedgerError> {
        let category = category.trim();
        if category.is_empty() {
            debug!("rejected expense with empty category");
            return Err(LedgerError::EmptyCategory);
        }

        let amount = validate_amount(amount)?;
        if self.grand_total().checked_add(amount).is_none() {
            debug!(%amount, "rejected expense that would overflow the ledger total");
            return Err(LedgerError::AmountOutOfRange(amount.to_string()));
        }

        let date = date.trim();
        let date = if date.is_empty() {
            today
        } else {
            parse_expense_date(date).ok_or_else(|| {
                debug!(date, "rejected expense with invalid date");
                LedgerError::InvalidDate(date.to_string())
            })?
        };

        let expense = self.repo.save_expense(title_case(category), amount, date);
        debug!(
            id = expense.id,
            category = %expense.category,
            amount = %expense.amount,
            date = %expense.date,
            "expense added"
        );
        Ok(expense.id)
    }

    // ========================
    // Queries
    // ========================

    /// All expenses ordered by ascending id.
    pub fn list(&self) -> Vec<&Expense> {
        self.repo.list_expenses().collect()
    }

    pub fn get(&self, id: ExpenseId) -> Option<&Expense> {
        self.repo.get_expense(id)
    }

    pub fn len(&self) -> usize {
        self.repo.len()
    }

    pub fn is_empty(&self) -> bool {
        self.repo.is_empty()
    }

    /// Expenses whose category equals `category`, ignoring case, in insertion
    /// order, with their subtotal.
    pub fn filter_by_category(&self, category: &str) -> CategoryFilter {
        let expenses: Vec<Expense> = self
            .repo
            .list_expenses()
            .filter(|e| e.in_category(category))
            .cloned()
            .collect();
        let subtotal = expenses.iter().map(|e| e.amount).sum();

        CategoryFilter {
            category: category.to_string(),
            expenses,
            subtotal,
        }
    }

    /// Subtotals grouped by stored category, sorted by category, plus the grand total.
    pub fn totals(&self) -> CategoryTotals {
        let mut groups: BTreeMap<&str, (Amount, usize)> = BTreeMap::new();
        for expense in self.repo.list_expenses() {
            let entry = groups
                .entry(expense.category.as_str())
                .or_insert((Amount::ZERO, 0));
            entry.0 += expense.amount;
            entry.1 += 1;
        }

        let categories: Vec<CategoryTotal> = groups
            .into_iter()
            .map(|(category, (total, count))| CategoryTotal {
                category: category.to_string(),
                total,
                count,
            })
            .collect();
        let total = categories.iter().map(|c| c.total).sum();

        CategoryTotals { categories, total }
    }

    // ========================
    // Delete
    // ========================

    /// Delete an expense. Nothing happens unless the caller has `confirmed`.
    pub fn delete(&mut self, id: ExpenseId, confirmed: bool) -> DeleteOutcome {
        if self.repo.get_expense(id).is_none() {
            debug!(id, "delete requested for unknown expense");
            return DeleteOutcome::NotFound(id);
        }
        if !confirmed {
            debug!(id, "delete cancelled");
            return DeleteOutcome::Cancelled(id);
        }

        match self.repo.delete_expense(id) {
            Some(expense) => {
                debug!(id, category = %expense.category, "expense deleted");
                DeleteOutcome::Deleted(expense)
            }
            None => DeleteOutcome::NotFound(id),
        }
    }

    /// Sum of every stored amount. Cannot overflow: `add_on` refuses any amount
    /// that would make it overflow, and amounts are positive so every subset sums lower.
    fn grand_total(&self) -> Amount {
        self.repo.list_expenses().map(|e| e.amount).sum()
    }

    /// Parse an expense id typed by the user.
    pub fn parse_id(input: &str) -> Result<ExpenseId, LedgerError> {
        parse_expense_id(input).ok_or_else(|| LedgerError::InvalidId(input.trim().to_string()))
    }
}

fn validate_amount(input: &str) -> Result<Amount, LedgerError> {
    let amount = parse_amount(input).map_err(|e| {
        debug!(input, error = %e, "rejected expense with unreadable amount");
        match e {
            ParseAmountError::InvalidFormat => LedgerError::InvalidAmount(input.trim().to_string()),
            ParseAmountError::OutOfRange => LedgerError::AmountOutOfRange(input.trim().to_string()),
        }
    })?;
    if amount <= Amount::ZERO {
        debug!(%amount, "rejected expense with non-positive amount");
        return Err(LedgerError::NonPositiveAmount(amount));
    }
    Ok(amount)
}
