use std::collections::BTreeMap;

use chrono::NaiveDate;

use crate::domain::{Amount, Expense, ExpenseId};

/// In-memory store of expenses keyed by id.
///
/// Ids are allocated here and only here: `next_id` starts at 1, advances on every
/// saved expense and never moves backwards, so a deleted id is never handed out again.
#[derive(Debug)]
pub struct Repository {
    expenses: BTreeMap<ExpenseId, Expense>,
    next_id: ExpenseId,
}

impl Default for Repository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository {
    pub fn new() -> Self {
        Self {
            expenses: BTreeMap::new(),
            next_id: 1,
        }
    }

    /// Store a new expense under the next free id. Inputs must already be validated.
    pub fn save_expense(&mut self, category: String, amount: Amount, date: NaiveDate) -> Expense {
        let id = self.next_id;
        let expense = Expense::new(id, category, amount, date);
        self.expenses.insert(id, expense.clone());
        self.next_id += 1;
        expense
    }

    pub fn get_expense(&self, id: ExpenseId) -> Option<&Expense> {
        self.expenses.get(&id)
    }

    /// All expenses in ascending id order (which is also insertion order).
    pub fn list_expenses(&self) -> impl Iterator<Item = &Expense> {
        self.expenses.values()
    }

    pub fn delete_expense(&mut self, id: ExpenseId) -> Option<Expense> {
        self.expenses.remove(&id)
    }

    #[cfg(test)]
    pub fn next_id(&self) -> ExpenseId {
        self.next_id
    }

    pub fn len(&self) -> usize {
        self.expenses.len()
    }

    pub fn is_empty(&self) -> bool {
        self.expenses.is_empty()
    }
}
