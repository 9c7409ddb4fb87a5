pub mod cli;
pub mod core;
pub mod store;

use crate::core::analytics::{self, ComparisonMode};
use crate::core::config::AppConfig;
use crate::core::{
    Category, Ledger, SnapshotFields, SpendCategory, TransactionKind, YearMonth, models,
};
use anyhow::{Context, Result};
use std::path::PathBuf;
use store::LedgerStore;
use tracing::{debug, info};

pub enum AppCommand {
    Add {
        date: String,
        category: String,
        amount: f64,
        kind: String,
    },
    List {
        month: Option<String>,
    },
    Snapshot {
        month: String,
        fields: SnapshotFields,
    },
    Spend {
        month: String,
        category: String,
        amount: f64,
    },
    Budget {
        salary: Option<f64>,
        pay_frequency: Option<String>,
    },
    Totals {
        month: Option<String>,
    },
    Trend {
        chronological: bool,
    },
    Breakdown {
        month: Option<String>,
    },
    Invest {
        initial_investment: f64,
        target_amount: f64,
        years: u32,
    },
    Report {
        output: Option<PathBuf>,
    },
    Reset,
}

/// Loaded configuration plus the ledger and the store backing it.
pub struct App {
    pub config: AppConfig,
    pub ledger: Ledger,
    store: LedgerStore,
}

impl App {
    pub fn open(config_path: Option<&str>) -> Result<Self> {
        let config = AppConfig::load_or_default(config_path)?;
        debug!("Loaded config: {config:#?}");

        let data_path = config.default_data_path()?.join("ledger");
        let store = LedgerStore::open(&data_path)?;
        let ledger = store.load()?;
        Ok(Self {
            config,
            ledger,
            store,
        })
    }

    fn comparison_mode(&self, chronological: bool) -> ComparisonMode {
        if chronological {
            ComparisonMode::Chronological
        } else {
            self.config.analytics.comparison
        }
    }

    fn budget_summary(
        &self,
        salary: Option<f64>,
        pay_frequency: Option<&str>,
    ) -> analytics::BudgetSummary {
        let budget = &self.config.budget;
        let frequency = pay_frequency
            .map(analytics::PayFrequency::from)
            .unwrap_or_else(|| budget.frequency());
        analytics::budget_summary(
            salary.unwrap_or(budget.salary),
            frequency,
            &budget.fixed_expense_items(),
        )
    }
}

fn parse_month(month: Option<&str>) -> Result<Option<YearMonth>> {
    month
        .map(|m| m.parse::<YearMonth>())
        .transpose()
        .context("Invalid month")
}

pub fn run_command(command: AppCommand, config_path: Option<&str>) -> Result<()> {
    let mut app = App::open(config_path)?;
    let currency = app.config.currency.clone();

    match command {
        AppCommand::Add {
            date,
            category,
            amount,
            kind,
        } => {
            let date = models::parse_date(&date)?;
            let category: Category = category.parse()?;
            let kind: TransactionKind = kind.parse()?;
            let transaction = app
                .ledger
                .add_transaction(date, category, amount, kind)?
                .clone();
            app.store.append_transaction(&transaction)?;
            info!("Added {kind} transaction of {amount} on {date}");
            println!("{}", cli::transactions::render_added(&transaction, &currency));
        }
        AppCommand::List { month } => {
            let month = parse_month(month.as_deref())?;
            println!("{}", cli::transactions::render_list(&app.ledger, month));
        }
        AppCommand::Snapshot { month, fields } => {
            let month = month.parse::<YearMonth>().context("Invalid month")?;
            let snapshot = app
                .ledger
                .upsert_monthly_snapshot(month.year, month.month, fields)?;
            app.store.put_snapshot(snapshot)?;
            println!("{}", cli::snapshot::render_snapshot(snapshot, &currency));
        }
        AppCommand::Spend {
            month,
            category,
            amount,
        } => {
            let month = month.parse::<YearMonth>().context("Invalid month")?;
            let category: SpendCategory = category.parse()?;
            let outcome = app
                .ledger
                .record_spend(month.year, month.month, category, amount)?;
            if let Some(snapshot) = app.ledger.snapshot(month) {
                app.store.put_snapshot(snapshot)?;
            }
            println!("{}", cli::snapshot::render_spend(&outcome, &currency));
        }
        AppCommand::Budget {
            salary,
            pay_frequency,
        } => {
            let summary = app.budget_summary(salary, pay_frequency.as_deref());
            println!("{}", cli::budget::render(&summary, &currency));
        }
        AppCommand::Totals { month } => {
            let month = parse_month(month.as_deref())?;
            println!("{}", cli::trend::render_totals(&app.ledger, month, &currency));
        }
        AppCommand::Trend { chronological } => {
            let mode = app.comparison_mode(chronological);
            cli::trend::run(&app.ledger, mode);
        }
        AppCommand::Breakdown { month } => {
            let month = parse_month(month.as_deref())?;
            println!("{}", cli::breakdown::render(&app.ledger, month, &currency)?);
        }
        AppCommand::Invest {
            initial_investment,
            target_amount,
            years,
        } => {
            let projection =
                analytics::required_annual_return(initial_investment, target_amount, years)?;
            println!("{}", cli::invest::render(&projection, &currency));
        }
        AppCommand::Report { output } => {
            let summary = app.budget_summary(None, None);
            let mode = app.comparison_mode(false);
            let report =
                crate::core::report::render_report(&app.ledger, &summary, mode, &currency)
                    .context("Failed to render report")?;
            match output {
                Some(path) => {
                    std::fs::write(&path, &report).with_context(|| {
                        format!("Failed to write report to {}", path.display())
                    })?;
                    info!("Wrote report to {}", path.display());
                }
                None => print!("{report}"),
            }
        }
        AppCommand::Reset => {
            app.ledger.reset();
            app.store.clear()?;
            println!("Ledger cleared.");
        }
    }

    Ok(())
}
