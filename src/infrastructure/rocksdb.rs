use crate::domain::account::{Account, AccountId};
use crate::domain::ports::AccountStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use rocksdb::{
    ColumnFamily, ColumnFamilyDescriptor, IteratorMode, Options, TransactionDB,
    TransactionDBOptions,
};
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Column Family for storing account states.
pub const CF_ACCOUNTS: &str = "accounts";

/// A persistent store implementation using RocksDB.
///
/// Accounts live in their own column family, keyed by the 16 raw bytes of their id and
/// serialized as JSON. Every write goes through a RocksDB transaction; `update_atomic`
/// commits the whole batch in a single one, so it either lands completely or not at all.
///
/// This struct is thread-safe (`Clone` shares the underlying `Arc<TransactionDB>`).
#[derive(Clone)]
pub struct RocksDBStore {
    db: Arc<TransactionDB>,
}

impl RocksDBStore {
    /// Opens or creates a RocksDB instance at the specified path.
    ///
    /// Ensures that the "accounts" column family exists.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let mut opts = Options::default();
        opts.create_if_missing(true);
        opts.create_missing_column_families(true);

        let cf_accounts = ColumnFamilyDescriptor::new(CF_ACCOUNTS, Options::default());
        let db = TransactionDB::open_cf_descriptors(
            &opts,
            &TransactionDBOptions::default(),
            path,
            vec![cf_accounts],
        )?;

        Ok(Self { db: Arc::new(db) })
    }

    fn accounts_cf(&self) -> Result<&ColumnFamily> {
        self.db
            .cf_handle(CF_ACCOUNTS)
            .ok_or_else(|| LedgerError::store("Accounts column family not found"))
    }
}

fn encode(account: &Account) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(account)?)
}

fn decode(bytes: &[u8]) -> Result<Account> {
    Ok(serde_json::from_slice(bytes)?)
}

#[async_trait]
impl AccountStore for RocksDBStore {
    async fn create(&self, account: Account) -> Result<()> {
        let cf = self.accounts_cf()?;
        let value = encode(&account)?;

        let txn = self.db.transaction();
        if txn
            .get_for_update_cf(cf, account.id.as_bytes(), true)?
            .is_some()
        {
            return Err(LedgerError::AlreadyExists(account.id));
        }
        txn.put_cf(cf, account.id.as_bytes(), value)?;
        txn.commit()?;

        debug!(account = %account.id, "account persisted");
        Ok(())
    }

    async fn get(&self, id: AccountId) -> Result<Account> {
        let cf = self.accounts_cf()?;
        match self.db.get_cf(cf, id.as_bytes())? {
            Some(bytes) => decode(&bytes),
            None => Err(LedgerError::NotFound(id)),
        }
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let cf = self.accounts_cf()?;

        let mut accounts = Vec::new();
        for item in self.db.iterator_cf(cf, IteratorMode::Start) {
            let (_key, value) = item?;
            accounts.push(decode(&value)?);
        }

        Ok(accounts)
    }

    async fn update(&self, account: Account) -> Result<()> {
        self.update_atomic(std::slice::from_ref(&account)).await
    }

    async fn update_atomic(&self, accounts: &[Account]) -> Result<()> {
        let cf = self.accounts_cf()?;

        let txn = self.db.transaction();
        for account in accounts {
            if txn
                .get_for_update_cf(cf, account.id.as_bytes(), true)?
                .is_none()
            {
                // Dropping the transaction rolls back anything staged so far.
                return Err(LedgerError::NotFound(account.id));
            }
            txn.put_cf(cf, account.id.as_bytes(), encode(account)?)?;
        }
        txn.commit()?;

        debug!(count = accounts.len(), "account batch committed");
        Ok(())
    }
}
