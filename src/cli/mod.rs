use std::io;

use anyhow::Result;
use clap::{Parser, ValueEnum};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::application::Ledger;

mod render;
mod repl;

pub use render::{render_expenses, render_filter, render_totals};
pub use repl::{is_affirmative, MenuChoice, Repl};

/// How List, Filter and Totals results are printed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Fixed-width text tables
    #[default]
    Table,
    Json,
    Csv,
}

/// Expense Ledger - track expenses for one session from an interactive menu
#[derive(Parser, Debug)]
#[command(name = "expense-ledger")]
#[command(about = "An in-memory expense tracker with an interactive menu")]
#[command(version)]
pub struct Cli {
    /// Enable verbose (debug) logging on stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format for listings and reports
    #[arg(
        short,
        long,
        value_enum,
        env = "EXPENSE_LEDGER_FORMAT",
        default_value_t = OutputFormat::Table
    )]
    pub format: OutputFormat,
}

impl Cli {
    /// Default log filter. `RUST_LOG` overrides it.
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "warn" }
    }

    pub fn run(self) -> Result<()> {
        init_tracing(self.log_level());

        let stdin = io::stdin();
        let stdout = io::stdout();
        let mut repl = Repl::new(Ledger::new(), stdin.lock(), stdout.lock(), self.format);
        repl.run()
    }
}

fn init_tracing(log_level: &str) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_target(false)
                .with_writer(io::stderr),
        )
        .init();
}
