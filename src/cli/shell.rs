//! Interactive session over a single [`LedgerService`], so a deletion can be
//! undone until the next one.

use anyhow::Result;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;

use crate::application::{AppError, LedgerService, UndoToken};
use crate::domain::TransactionId;
use crate::storage::TransactionStore;

use super::{money, print_dashboard, print_transaction, print_transactions};

const HELP: &str = "\
Commands:
  list                                   list all transactions
  dashboard                              show balance, budget and expense
  show <id>                              show one transaction
  add <label> <amount> [description]     record a transaction
  edit <id> <label> <amount> [description]
                                         replace a transaction
  delete <id>                            delete a transaction
  undo                                   restore the last deleted transaction
  help                                   show this help
  quit                                   leave the shell
Quote labels with spaces, e.g. add \"Coffee beans\" -8.50";

pub async fn run<S: TransactionStore>(mut service: LedgerService<S>, currency: &str) -> Result<()> {
    let mut editor = DefaultEditor::new()?;
    let mut last_delete: Option<UndoToken> = None;

    service.refresh().await?;
    print_dashboard(currency, &service.dashboard()?);
    println!("Type 'help' for commands.");

    loop {
        // readline blocks on the terminal; keep it off the async workers
        let line = match tokio::task::block_in_place(|| editor.readline("> ")) {
            Ok(line) => line,
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => break,
            Err(e) => return Err(e.into()),
        };
        if !line.trim().is_empty() {
            editor.add_history_entry(line.as_str())?;
        }

        match run_line(&mut service, currency, &mut last_delete, &line).await {
            Ok(true) => {}
            Ok(false) => break,
            Err(e) => println!("Error: {}", e),
        }
    }

    Ok(())
}

/// Tokenize one input line with shell quoting rules and run it.
async fn run_line<S: TransactionStore>(
    service: &mut LedgerService<S>,
    currency: &str,
    last_delete: &mut Option<UndoToken>,
    line: &str,
) -> Result<bool, AppError> {
    let Some(args) = shlex::split(line) else {
        println!("Unbalanced quotes or trailing escape in: {}", line);
        return Ok(true);
    };
    match args.split_first() {
        Some((command, rest)) => run_command(service, currency, last_delete, command, rest).await,
        None => Ok(true),
    }
}

/// Run one shell command. Returns `Ok(false)` when the session should end.
async fn run_command<S: TransactionStore>(
    service: &mut LedgerService<S>,
    currency: &str,
    last_delete: &mut Option<UndoToken>,
    command: &str,
    args: &[String],
) -> Result<bool, AppError> {
    match (command, args) {
        ("quit" | "exit", _) => return Ok(false),

        ("help", _) => println!("{}", HELP),

        ("list", []) => {
            let transactions = service.refresh().await?;
            print_transactions(currency, transactions);
        }

        ("dashboard", []) => {
            service.refresh().await?;
            print_dashboard(currency, &service.dashboard()?);
        }

        ("show", [id]) => match parse_id(id) {
            Some(id) => print_transaction(currency, &service.get(id).await?),
            None => println!("Invalid ID: {}", id),
        },

        ("add", [label, amount, description @ ..]) => {
            let tx = service.add(label, amount, &description.join(" ")).await?;
            println!(
                "Added #{}: {} {}",
                tx.id,
                tx.label,
                money(currency, tx.amount_cents)
            );
            service.refresh().await?;
        }

        ("edit", [id, label, amount, description @ ..]) => match parse_id(id) {
            Some(id) => {
                let existing = service.get(id).await?;
                let tx = service
                    .edit(&existing, label, amount, &description.join(" "))
                    .await?;
                println!(
                    "Updated #{}: {} {}",
                    tx.id,
                    tx.label,
                    money(currency, tx.amount_cents)
                );
                service.refresh().await?;
            }
            None => println!("Invalid ID: {}", id),
        },

        ("delete", [id]) => match parse_id(id) {
            Some(id) => match service.delete_with_undo(id).await? {
                Some(token) => {
                    *last_delete = Some(token);
                    println!("Transaction deleted! Type 'undo' to restore it.");
                }
                None => println!("No transaction with ID {}", id),
            },
            None => println!("Invalid ID: {}", id),
        },

        ("undo", []) => match last_delete.take() {
            Some(token) => match service.undo(token).await {
                Ok(Some(tx)) => println!("Restored #{}: {}", tx.id, tx.label),
                Ok(None) => println!("Nothing to undo."),
                Err(e) => {
                    // The service keeps the deletion pending on failure
                    *last_delete = Some(token);
                    return Err(e);
                }
            },
            None => println!("Nothing to undo."),
        },

        _ => println!("Unknown command or wrong arguments. Type 'help' for usage."),
    }

    Ok(true)
}

fn parse_id(s: &str) -> Option<TransactionId> {
    s.parse().ok()
}
