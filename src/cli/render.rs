use std::io::Write;

use anyhow::Result;
use serde::Serialize;

use crate::application::{CategoryFilter, CategoryTotals};
use crate::domain::{format_amount, title_case, Amount, Expense};

use super::OutputFormat;

/// Amount column: `$` plus a right-aligned two-decimal value, 10 characters wide.
fn dollars(amount: Amount) -> String {
    format!("${:>9}", format_amount(amount))
}

fn write_json<W: Write, T: Serialize + ?Sized>(out: &mut W, value: &T) -> Result<()> {
    serde_json::to_writer_pretty(&mut *out, value)?;
    writeln!(out)?;
    Ok(())
}

fn write_expenses_csv<W: Write>(out: &mut W, expenses: &[&Expense]) -> Result<()> {
    let mut writer = csv::Writer::from_writer(&mut *out);
    writer.write_record(["id", "date", "category", "amount"])?;
    for expense in expenses {
        writer.write_record([
            expense.id.to_string(),
            expense.date_string(),
            expense.category.clone(),
            format_amount(expense.amount),
        ])?;
    }
    writer.flush()?;
    Ok(())
}

/// Render the full expense list. The caller handles the empty case.
pub fn render_expenses<W: Write>(out: &mut W, expenses: &[&Expense], format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, expenses),
        OutputFormat::Csv => write_expenses_csv(out, expenses),
        OutputFormat::Table => {
            writeln!(out)?;
            writeln!(out, "=== All Expenses ===")?;
            writeln!(out, "{:<5} {:<12} {:<15} {:>10}", "ID", "Date", "Category", "Amount")?;
            writeln!(out, "{}", "-".repeat(45))?;
            for expense in expenses {
                writeln!(
                    out,
                    "{:<5} {:<12} {:<15} {}",
                    expense.id,
                    expense.date_string(),
                    expense.category,
                    dollars(expense.amount)
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Total entries: {}", expenses.len())?;
            Ok(())
        }
    }
}

/// Render the matches of a category filter. The caller handles the no-match case.
pub fn render_filter<W: Write>(out: &mut W, filter: &CategoryFilter, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, filter),
        OutputFormat::Csv => {
            let expenses: Vec<&Expense> = filter.expenses.iter().collect();
            write_expenses_csv(out, &expenses)
        }
        OutputFormat::Table => {
            writeln!(out)?;
            writeln!(out, "=== Expenses in '{}' ===", title_case(&filter.category))?;
            writeln!(out, "{:<5} {:<12} {:>10}", "ID", "Date", "Amount")?;
            writeln!(out, "{}", "-".repeat(30))?;
            for expense in &filter.expenses {
                writeln!(
                    out,
                    "{:<5} {:<12} {}",
                    expense.id,
                    expense.date_string(),
                    dollars(expense.amount)
                )?;
            }
            writeln!(out)?;
            writeln!(out, "Category total: ${}", format_amount(filter.subtotal))?;
            Ok(())
        }
    }
}

/// Render per-category totals and the overall total. The caller handles the empty case.
pub fn render_totals<W: Write>(out: &mut W, totals: &CategoryTotals, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => write_json(out, totals),
        OutputFormat::Csv => {
            let mut writer = csv::Writer::from_writer(&mut *out);
            writer.write_record(["category", "total", "count"])?;
            for cat in &totals.categories {
                writer.write_record([
                    cat.category.clone(),
                    format_amount(cat.total),
                    cat.count.to_string(),
                ])?;
            }
            let count: usize = totals.categories.iter().map(|c| c.count).sum();
            writer.write_record([
                "Overall Total".to_string(),
                format_amount(totals.total),
                count.to_string(),
            ])?;
            writer.flush()?;
            Ok(())
        }
        OutputFormat::Table => {
            writeln!(out)?;
            writeln!(out, "=== Expense Totals ===")?;
            for cat in &totals.categories {
                writeln!(out, "{}: ${}", cat.category, format_amount(cat.total))?;
            }
            writeln!(out, "{}", "-".repeat(30))?;
            writeln!(out, "Overall Total: ${}", format_amount(totals.total))?;
            Ok(())
        }
    }
}
