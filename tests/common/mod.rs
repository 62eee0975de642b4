use async_trait::async_trait;
use ledger::domain::account::{Account, AccountId};
use ledger::domain::ports::AccountStore;
use ledger::error::{LedgerError, Result};
use ledger::infrastructure::in_memory::InMemoryAccountStore;
use std::fs::File;
use std::io::Error;
use std::path::Path;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// Wraps an in-memory store and fails every batch write while `fail_batches` is set.
#[allow(dead_code)]
#[derive(Clone, Default)]
pub struct FlakyStore {
    pub inner: InMemoryAccountStore,
    pub fail_batches: Arc<AtomicBool>,
}

#[async_trait]
impl AccountStore for FlakyStore {
    async fn create(&self, account: Account) -> Result<()> {
        self.inner.create(account).await
    }

    async fn get(&self, id: AccountId) -> Result<Account> {
        self.inner.get(id).await
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        self.inner.get_all().await
    }

    async fn update(&self, account: Account) -> Result<()> {
        self.inner.update(account).await
    }

    async fn update_atomic(&self, accounts: &[Account]) -> Result<()> {
        if self.fail_batches.load(Ordering::SeqCst) {
            return Err(LedgerError::store(std::io::Error::other(
                "connection reset",
            )));
        }
        self.inner.update_atomic(accounts).await
    }
}

/// Writes a command file opening `accounts` accounts with `opening` each, followed by
/// a ring of transfers of `amount` between consecutive accounts.
#[allow(dead_code)]
pub fn generate_commands(
    path: &Path,
    accounts: usize,
    opening: &str,
    amount: &str,
) -> std::result::Result<(), Error> {
    let file = File::create(path)?;
    let mut wtr = csv::WriterBuilder::new().from_writer(file);

    wtr.write_record(["type", "account", "to", "amount", "name"])?;
    for i in 0..accounts {
        wtr.write_record([
            "open",
            &format!("acc{i}"),
            "",
            opening,
            &format!("client {i}"),
        ])?;
    }
    for i in 0..accounts {
        let to = (i + 1) % accounts;
        wtr.write_record([
            "transfer",
            &format!("acc{i}"),
            &format!("acc{to}"),
            amount,
            "",
        ])?;
    }

    wtr.flush()?;
    Ok(())
}
