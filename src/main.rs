use clap::{Parser, Subcommand};
use ledger::application::engine::AccountEngine;
use ledger::domain::account::AccountId;
use ledger::domain::ports::AccountStoreBox;
use ledger::infrastructure::in_memory::InMemoryAccountStore;
use ledger::interfaces::batch::BatchRunner;
use ledger::interfaces::csv::account_writer::AccountWriter;
use ledger::interfaces::csv::command_reader::CommandReader;
use miette::{IntoDiagnostic, Result};
use rust_decimal::Decimal;
use std::fs::File;
use std::io::{self, IsTerminal};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "LEDGER_DB_PATH", global = true)]
    db_path: Option<PathBuf>,

    /// Log filter, e.g. `info` or `ledger=debug`.
    #[arg(long, env = "RUST_LOG", default_value = "warn", global = true)]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply a CSV command file and print every account afterwards
    Batch {
        /// Input commands CSV file
        input: PathBuf,
    },
    /// Open a new account
    Open {
        name: String,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Add money to an account
    Deposit {
        account: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Move money between two accounts
    Transfer {
        from: AccountId,
        to: AccountId,
        #[arg(allow_negative_numbers = true)]
        amount: Decimal,
    },
    /// Show one account
    Get { account: AccountId },
    /// Show all accounts
    List,
}

fn init_tracing(filter: &str) {
    let filter = EnvFilter::try_new(filter).unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .with_target(false)
        .init();
}

#[cfg(feature = "storage-rocksdb")]
fn open_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    use ledger::infrastructure::rocksdb::RocksDBStore;

    match db_path {
        Some(path) => Ok(Box::new(RocksDBStore::open(path)?)),
        None => Ok(Box::new(InMemoryAccountStore::new())),
    }
}

#[cfg(not(feature = "storage-rocksdb"))]
fn open_store(db_path: Option<PathBuf>) -> Result<AccountStoreBox> {
    if let Some(path) = db_path {
        tracing::warn!(
            path = %path.display(),
            "Persistent storage requested via --db-path, but the 'storage-rocksdb' feature is not enabled. Falling back to in-memory storage."
        );
    }
    Ok(Box::new(InMemoryAccountStore::new()))
}

fn print_json<T: serde::Serialize>(value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value).into_diagnostic()?;
    println!("{json}");
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    let engine = AccountEngine::new(open_store(cli.db_path)?);

    match cli.command {
        Commands::Batch { input } => {
            let file = File::open(input).into_diagnostic()?;
            let mut runner = BatchRunner::new(&engine);
            let summary = runner.run(CommandReader::new(file).commands()).await;
            tracing::info!(
                applied = summary.applied,
                rejected = summary.rejected,
                "batch finished"
            );

            let mut accounts = engine.into_accounts().await?;
            accounts.sort_by(|a, b| a.name.as_str().cmp(b.name.as_str()).then(a.id.cmp(&b.id)));

            let stdout = io::stdout();
            let mut writer = AccountWriter::new(stdout.lock());
            writer.write_accounts(accounts)?;
        }
        Commands::Open { name, amount } => print_json(&engine.create(&name, amount).await?)?,
        Commands::Deposit { account, amount } => {
            print_json(&engine.add_money(account, amount).await?)?
        }
        Commands::Transfer { from, to, amount } => engine.transfer(from, to, amount).await?,
        Commands::Get { account } => print_json(&engine.get(account).await?)?,
        Commands::List => print_json(&engine.get_all().await?)?,
    }

    Ok(())
}
