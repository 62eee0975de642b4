use crate::domain::account::{Account, AccountId, AccountName};
use crate::domain::ports::AccountStoreBox;
use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use tokio::sync::Mutex;
use tracing::{debug, info};

/// The entry point for every account operation.
///
/// `AccountEngine` owns the storage backend and a single process-wide mutation lock.
/// `add_money` and `transfer` hold the lock from the first read until the store call that
/// persists their result has returned, so no two mutations ever interleave and the durable
/// history of an account follows lock-acquisition order. Reads bypass the lock.
///
/// Share it between tasks with `Arc<AccountEngine>`.
pub struct AccountEngine {
    store: AccountStoreBox,
    mutation_lock: Mutex<()>,
}

impl AccountEngine {
    /// Creates a new `AccountEngine` on top of `store`.
    pub fn new(store: AccountStoreBox) -> Self {
        Self {
            store,
            mutation_lock: Mutex::new(()),
        }
    }

    /// Opens a new account with a fresh id and a positive opening balance.
    pub async fn create(&self, name: &str, initial_amount: Decimal) -> Result<Account> {
        let name = AccountName::parse(name)?;
        let account = Account::open(name, initial_amount)?;

        self.store.create(account.clone()).await?;
        info!(account = %account.id, balance = %account.balance, "account created");
        Ok(account)
    }

    pub async fn get(&self, id: AccountId) -> Result<Account> {
        self.store.get(id).await
    }

    pub async fn get_all(&self) -> Result<Vec<Account>> {
        self.store.get_all().await
    }

    /// Credits `amount` to the account and returns its new state.
    pub async fn add_money(&self, id: AccountId, amount: Decimal) -> Result<Account> {
        let _guard = self.mutation_lock.lock().await;

        let mut account = self.store.get(id).await?;
        account.add_money(amount)?;
        self.store.update(account.clone()).await?;

        debug!(account = %id, %amount, balance = %account.balance, "money added");
        Ok(account)
    }

    /// Moves `amount` from `from` to `to`.
    ///
    /// On any failure neither account's stored balance changes: a rejected withdraw returns
    /// before anything is written, and the final write goes through the store's atomic batch.
    pub async fn transfer(&self, from: AccountId, to: AccountId, amount: Decimal) -> Result<()> {
        if from == to {
            return Err(LedgerError::InvalidTransfer(format!(
                "cannot transfer from account {from} to itself"
            )));
        }
        if amount <= Decimal::ZERO {
            return Err(LedgerError::InvalidTransfer(format!(
                "amount must be positive, got {amount}"
            )));
        }

        let _guard = self.mutation_lock.lock().await;

        let mut source = self.store.get(from).await?;
        let mut destination = self.store.get(to).await?;

        source.withdraw(amount)?;
        destination.add_money(amount)?;

        self.store.update_atomic(&[source, destination]).await?;

        info!(%from, %to, %amount, "transfer committed");
        Ok(())
    }

    /// Consumes the engine and returns the final state of all accounts.
    pub async fn into_accounts(self) -> Result<Vec<Account>> {
        self.store.get_all().await
    }
}
