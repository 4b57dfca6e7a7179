use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use crate::application::LedgerService;
use crate::domain::{format_cents, Cents, Dashboard, Transaction, TransactionId};

mod shell;

/// Spendbook - Personal income and expense tracker
#[derive(Parser)]
#[command(name = "spendbook")]
#[command(about = "A local-first tracker for income and expenses")]
#[command(version)]
pub struct Cli {
    /// Database file path
    #[arg(short, long, env = "SPENDBOOK_DB", default_value = "spendbook.db", global = true)]
    pub database: String,

    /// Currency symbol shown next to amounts
    #[arg(long, env = "SPENDBOOK_CURRENCY", default_value = "₹", global = true)]
    pub currency: String,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize a new database
    Init,

    /// Record a transaction
    Add {
        /// Short name, e.g. "Salary" or "Coffee"
        label: String,

        /// Amount: positive for income, negative for expenses (e.g. "-4.50")
        #[arg(allow_negative_numbers = true)]
        amount: String,

        /// Free-text description
        #[arg(short, long, default_value = "")]
        description: String,
    },

    /// Change a transaction; omitted fields keep their current value
    Edit {
        /// Transaction ID
        id: TransactionId,

        /// New label
        #[arg(short, long)]
        label: Option<String>,

        /// New amount
        #[arg(short, long, allow_hyphen_values = true)]
        amount: Option<String>,

        /// New description
        #[arg(short, long)]
        description: Option<String>,
    },

    /// List all transactions
    List {
        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show a single transaction
    Show {
        /// Transaction ID
        id: TransactionId,
    },

    /// Delete a transaction (use the shell to be able to undo)
    Delete {
        /// Transaction ID
        id: TransactionId,
    },

    /// Show balance, budget and expense totals
    Dashboard {
        /// Print JSON instead of text
        #[arg(long)]
        json: bool,
    },

    /// Interactive session with undo support
    Shell,
}

impl Cli {
    pub async fn run(self) -> Result<()> {
        match self.command {
            Commands::Init => {
                LedgerService::init(&self.database).await?;
                println!("Initialized database: {}", self.database);
            }

            Commands::Add {
                label,
                amount,
                description,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let transaction = service.add(&label, &amount, &description).await?;
                println!(
                    "Added #{}: {} {}",
                    transaction.id,
                    transaction.label,
                    money(&self.currency, transaction.amount_cents)
                );
            }

            Commands::Edit {
                id,
                label,
                amount,
                description,
            } => {
                let service = LedgerService::connect(&self.database).await?;
                let existing = service.get(id).await?;

                let label = label.unwrap_or_else(|| existing.label.clone());
                let amount = amount.unwrap_or_else(|| format_cents(existing.amount_cents));
                let description = description.unwrap_or_else(|| existing.description.clone());

                let updated = service
                    .edit(&existing, &label, &amount, &description)
                    .await?;
                println!(
                    "Updated #{}: {} {}",
                    updated.id,
                    updated.label,
                    money(&self.currency, updated.amount_cents)
                );
            }

            Commands::List { json } => {
                let mut service = LedgerService::connect(&self.database).await?;
                let transactions = service.refresh().await?;
                if json {
                    println!("{}", serde_json::to_string_pretty(transactions)?);
                } else {
                    print_transactions(&self.currency, transactions);
                }
            }

            Commands::Show { id } => {
                let service = LedgerService::connect(&self.database).await?;
                let transaction = service.get(id).await?;
                print_transaction(&self.currency, &transaction);
            }

            Commands::Delete { id } => {
                let mut service = LedgerService::connect(&self.database).await?;
                match service.delete_with_undo(id).await? {
                    Some(_) => println!("Transaction deleted!"),
                    None => println!("No transaction with ID {}", id),
                }
            }

            Commands::Dashboard { json } => {
                let mut service = LedgerService::connect(&self.database).await?;
                service.refresh().await?;
                let dashboard = service.dashboard()?;
                if json {
                    println!("{}", serde_json::to_string_pretty(&dashboard)?);
                } else {
                    print_dashboard(&self.currency, &dashboard);
                }
            }

            Commands::Shell => {
                let service = LedgerService::connect(&self.database)
                    .await
                    .with_context(|| format!("Failed to open {}", self.database))?;
                shell::run(service, &self.currency).await?;
            }
        }

        Ok(())
    }
}

fn money(currency: &str, cents: Cents) -> String {
    format!("{} {}", currency, format_cents(cents))
}

fn print_transactions(currency: &str, transactions: &[Transaction]) {
    if transactions.is_empty() {
        println!("No transactions found.");
        return;
    }

    println!("{:<6} {:<20} {:>14}  {}", "ID", "LABEL", "AMOUNT", "DESCRIPTION");
    println!("{}", "-".repeat(60));
    for tx in transactions {
        println!(
            "{:<6} {:<20} {:>14}  {}",
            tx.id,
            truncate(&tx.label, 20),
            money(currency, tx.amount_cents),
            truncate(&tx.description, 30)
        );
    }
}

fn print_transaction(currency: &str, tx: &Transaction) {
    println!("Transaction #{}", tx.id);
    println!("  Label:       {}", tx.label);
    println!("  Amount:      {}", money(currency, tx.amount_cents));
    println!(
        "  Type:        {}",
        if tx.is_income() { "income" } else { "expense" }
    );
    if !tx.description.is_empty() {
        println!("  Description: {}", tx.description);
    }
}

fn print_dashboard(currency: &str, dashboard: &Dashboard) {
    println!("Balance: {}", money(currency, dashboard.balance));
    println!("Budget:  {}", money(currency, dashboard.budget));
    println!("Expense: {}", money(currency, dashboard.expense));
}

fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let head: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", head)
    }
}
