use anyhow::Result;
use clap::{Args, CommandFactory, Parser, Subcommand};
use pfm::core::SnapshotFields;
use pfm::core::log::init_logging;
use std::path::PathBuf;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Args)]
struct SnapshotArgs {
    /// Month in YYYY-MM format
    month: String,
    #[arg(long, default_value_t = 0.0)]
    current_funds: f64,
    #[arg(long, default_value_t = 0.0)]
    expected_income: f64,
    #[arg(long, default_value_t = 0.0)]
    fixed_expenses: f64,
    #[arg(long, default_value_t = 0.0)]
    eating_out_budget: f64,
    #[arg(long, default_value_t = 0.0)]
    entertainment_budget: f64,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Record an income or expense transaction
    Add {
        /// Date in YYYY-MM-DD format
        date: String,
        /// Food, Rent, Utilities, Entertainment or Other
        category: String,
        amount: f64,
        /// Income or Expense
        #[arg(short, long, default_value = "Expense")]
        kind: String,
    },
    /// Display transaction history
    List {
        /// Only show transactions in this month (YYYY-MM)
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Create or replace the budget snapshot for a month
    Snapshot(SnapshotArgs),
    /// Record spending against a month's snapshot
    Spend {
        /// Month in YYYY-MM format
        month: String,
        /// Eating Out, Entertainment, Food, Rent, Utilities or Other
        category: String,
        amount: f64,
    },
    /// Display the monthly budget summary
    Budget {
        /// Salary per pay period, overrides the configured salary
        #[arg(short, long)]
        salary: Option<f64>,
        /// Weekly, Bi-Weekly, Monthly or Annually
        #[arg(short, long)]
        pay_frequency: Option<String>,
    },
    /// Display income, expense and net savings totals
    Totals {
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Display month-over-month changes
    Trend {
        /// Compare each month with the calendar month before it
        #[arg(long)]
        chronological: bool,
    },
    /// Display spending by category
    Breakdown {
        /// Break down a month's snapshot spending instead of all expenses
        #[arg(short, long)]
        month: Option<String>,
    },
    /// Calculate the annual return needed to reach a target
    Invest {
        initial_investment: f64,
        target_amount: f64,
        years: u32,
    },
    /// Print a plain-text report
    Report {
        /// Write the report to a file instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Delete all transactions and snapshots
    Reset,
}

impl From<Commands> for pfm::AppCommand {
    fn from(cmd: Commands) -> pfm::AppCommand {
        match cmd {
            Commands::Add {
                date,
                category,
                amount,
                kind,
            } => pfm::AppCommand::Add {
                date,
                category,
                amount,
                kind,
            },
            Commands::List { month } => pfm::AppCommand::List { month },
            Commands::Snapshot(args) => pfm::AppCommand::Snapshot {
                month: args.month,
                fields: SnapshotFields {
                    current_funds: args.current_funds,
                    expected_income: args.expected_income,
                    fixed_expenses: args.fixed_expenses,
                    eating_out_budget: args.eating_out_budget,
                    entertainment_budget: args.entertainment_budget,
                },
            },
            Commands::Spend {
                month,
                category,
                amount,
            } => pfm::AppCommand::Spend {
                month,
                category,
                amount,
            },
            Commands::Budget {
                salary,
                pay_frequency,
            } => pfm::AppCommand::Budget {
                salary,
                pay_frequency,
            },
            Commands::Totals { month } => pfm::AppCommand::Totals { month },
            Commands::Trend { chronological } => pfm::AppCommand::Trend { chronological },
            Commands::Breakdown { month } => pfm::AppCommand::Breakdown { month },
            Commands::Invest {
                initial_investment,
                target_amount,
                years,
            } => pfm::AppCommand::Invest {
                initial_investment,
                target_amount,
                years,
            },
            Commands::Report { output } => pfm::AppCommand::Report { output },
            Commands::Reset => pfm::AppCommand::Reset,
            Commands::Setup => unreachable!("Setup command should be handled separately"),
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => pfm::cli::setup::setup(),
        Some(cmd) => pfm::run_command(cmd.into(), cli.config_path.as_deref()),
        None => {
            Cli::command().print_help()?;
            Ok(())
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}
