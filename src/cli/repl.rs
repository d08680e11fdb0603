use std::io::{BufRead, Write};

use anyhow::{Context, Result};
use tracing::{debug, info};

use crate::application::{DeleteOutcome, Ledger, LedgerError};
use crate::domain::format_amount;

use super::render::{render_expenses, render_filter, render_totals};
use super::OutputFormat;

/// One entry of the numbered main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Add,
    List,
    Filter,
    Totals,
    Delete,
    Exit,
}

impl MenuChoice {
    pub const ALL: [MenuChoice; 6] = [
        MenuChoice::Add,
        MenuChoice::List,
        MenuChoice::Filter,
        MenuChoice::Totals,
        MenuChoice::Delete,
        MenuChoice::Exit,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            MenuChoice::Add => "Add new expense",
            MenuChoice::List => "View all expenses",
            MenuChoice::Filter => "Filter by category",
            MenuChoice::Totals => "Calculate totals",
            MenuChoice::Delete => "Delete expense",
            MenuChoice::Exit => "Exit",
        }
    }

    pub fn from_input(s: &str) -> Option<Self> {
        match s.trim() {
            "1" => Some(MenuChoice::Add),
            "2" => Some(MenuChoice::List),
            "3" => Some(MenuChoice::Filter),
            "4" => Some(MenuChoice::Totals),
            "5" => Some(MenuChoice::Delete),
            "6" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}

/// Affirmative answers to the delete confirmation: "y" or "yes", any case.
pub fn is_affirmative(answer: &str) -> bool {
    matches!(answer.trim().to_lowercase().as_str(), "y" | "yes")
}

/// Interactive menu loop over a ledger. Generic over input and output so the
/// whole session can be driven from memory.
pub struct Repl<R, W> {
    ledger: Ledger,
    input: R,
    output: W,
    format: OutputFormat,
}

impl<R: BufRead, W: Write> Repl<R, W> {
    pub fn new(ledger: Ledger, input: R, output: W, format: OutputFormat) -> Self {
        Self {
            ledger,
            input,
            output,
            format,
        }
    }

    /// Hand back the ledger and output once the session is over.
    pub fn into_parts(self) -> (Ledger, W) {
        (self.ledger, self.output)
    }

    /// Run until the user picks Exit or input ends.
    pub fn run(&mut self) -> Result<()> {
        writeln!(self.output, "Welcome to Expense Tracker")?;
        writeln!(self.output, "{}", "-".repeat(30))?;
        info!(format = ?self.format, "session started");

        loop {
            self.print_menu()?;
            let Some(line) = self.prompt("\nSelect an option (1-6): ")? else {
                debug!("input closed");
                break;
            };

            match MenuChoice::from_input(&line) {
                Some(MenuChoice::Add) => self.add_expense()?,
                Some(MenuChoice::List) => self.view_expenses()?,
                Some(MenuChoice::Filter) => self.filter_by_category()?,
                Some(MenuChoice::Totals) => self.calculate_totals()?,
                Some(MenuChoice::Delete) => self.delete_expense()?,
                Some(MenuChoice::Exit) => break,
                None => {
                    debug!(input = %line.trim(), "invalid menu option");
                    writeln!(self.output, "Invalid option. Please choose 1-6.")?;
                }
            }
        }

        writeln!(self.output, "\nThank you for using Expense Tracker!")?;
        info!(expenses = self.ledger.len(), "session ended");
        self.output.flush().context("Failed to flush output")?;
        Ok(())
    }

    fn print_menu(&mut self) -> Result<()> {
        writeln!(self.output, "\n{}", "=".repeat(30))?;
        for (i, choice) in MenuChoice::ALL.iter().enumerate() {
            writeln!(self.output, "{}. {}", i + 1, choice.label())?;
        }
        writeln!(self.output, "{}", "=".repeat(30))?;
        Ok(())
    }

    /// Print `text`, then read one line. `None` means input is exhausted.
    fn prompt(&mut self, text: &str) -> Result<Option<String>> {
        write!(self.output, "{}", text)?;
        self.output.flush().context("Failed to flush output")?;

        let mut line = String::new();
        let read = self
            .input
            .read_line(&mut line)
            .context("Failed to read input")?;
        if read == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim_end_matches(['\r', '\n']).to_string()))
    }

    fn add_expense(&mut self) -> Result<()> {
        writeln!(self.output, "\n=== Add New Expense ===")?;

        let Some(category) = self.prompt("Enter category (e.g., Food, Transport): ")? else {
            return Ok(());
        };
        // An empty category aborts before the amount prompt.
        if category.trim().is_empty() {
            writeln!(self.output, "Error: {}", LedgerError::EmptyCategory)?;
            return Ok(());
        }
        let Some(amount) = self.prompt("Enter amount ($): ")? else {
            return Ok(());
        };
        let Some(date) = self.prompt("Enter date (YYYY-MM-DD) or press Enter for today: ")? else {
            return Ok(());
        };

        match self.ledger.add(&category, &amount, &date) {
            Ok(id) => writeln!(self.output, "Expense added successfully (ID: {})", id)?,
            Err(e) => writeln!(self.output, "Error: {}", e)?,
        }
        Ok(())
    }

    fn view_expenses(&mut self) -> Result<()> {
        if self.ledger.is_empty() {
            writeln!(self.output, "\nNo expenses recorded yet.")?;
            return Ok(());
        }
        render_expenses(&mut self.output, &self.ledger.list(), self.format)
    }

    fn filter_by_category(&mut self) -> Result<()> {
        if self.ledger.is_empty() {
            writeln!(self.output, "\nNo expenses to filter.")?;
            return Ok(());
        }

        let Some(category) = self.prompt("\nEnter category to filter: ")? else {
            return Ok(());
        };
        let filter = self.ledger.filter_by_category(category.trim());
        if filter.is_empty() {
            writeln!(
                self.output,
                "No expenses found in category '{}'.",
                filter.category
            )?;
            return Ok(());
        }
        render_filter(&mut self.output, &filter, self.format)
    }

    fn calculate_totals(&mut self) -> Result<()> {
        let totals = self.ledger.totals();
        if totals.is_empty() {
            writeln!(self.output, "\nNo expenses to calculate.")?;
            return Ok(());
        }
        render_totals(&mut self.output, &totals, self.format)
    }

    fn delete_expense(&mut self) -> Result<()> {
        if self.ledger.is_empty() {
            writeln!(self.output, "\nNo expenses to delete.")?;
            return Ok(());
        }
        self.view_expenses()?;

        let Some(input) = self.prompt("\nEnter expense ID to delete: ")? else {
            return Ok(());
        };
        let id = match Ledger::parse_id(&input) {
            Ok(id) => id,
            Err(e) => {
                writeln!(self.output, "Error: {}", e)?;
                return Ok(());
            }
        };

        let Some(expense) = self.ledger.get(id) else {
            writeln!(self.output, "Error: Expense ID not found.")?;
            return Ok(());
        };
        let summary = format!(
            "Deleting: {} - ${} on {}",
            expense.category,
            format_amount(expense.amount),
            expense.date_string()
        );
        writeln!(self.output, "\n{}", summary)?;

        let confirmed = match self.prompt("Are you sure? (y/n): ")? {
            Some(answer) => is_affirmative(&answer),
            None => false,
        };

        match self.ledger.delete(id, confirmed) {
            DeleteOutcome::Deleted(_) => writeln!(self.output, "Expense deleted successfully.")?,
            DeleteOutcome::Cancelled(_) => writeln!(self.output, "Deletion cancelled.")?,
            DeleteOutcome::NotFound(_) => writeln!(self.output, "Error: Expense ID not found.")?,
        }
        Ok(())
    }
}
