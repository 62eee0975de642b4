use crate::domain::account::{Account, AccountId};
use crate::domain::ports::AccountStore;
use crate::error::{LedgerError, Result};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

/// A thread-safe in-memory store for accounts.
///
/// Uses `Arc<RwLock<HashMap<AccountId, Account>>>` to allow shared concurrent access.
/// Batches are applied under a single write guard, so readers see either none or all
/// of an `update_atomic` call.
#[derive(Default, Clone)]
pub struct InMemoryAccountStore {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountStore {
    /// Creates a new, empty in-memory account store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl AccountStore for InMemoryAccountStore {
    async fn create(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        if accounts.contains_key(&account.id) {
            return Err(LedgerError::AlreadyExists(account.id));
        }
        accounts.insert(account.id, account);
        Ok(())
    }

    async fn get(&self, id: AccountId) -> Result<Account> {
        let accounts = self.accounts.read().await;
        accounts.get(&id).cloned().ok_or(LedgerError::NotFound(id))
    }

    async fn get_all(&self) -> Result<Vec<Account>> {
        let accounts = self.accounts.read().await;
        Ok(accounts.values().cloned().collect())
    }

    async fn update(&self, account: Account) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        match accounts.get_mut(&account.id) {
            Some(stored) => {
                *stored = account;
                Ok(())
            }
            None => Err(LedgerError::NotFound(account.id)),
        }
    }

    async fn update_atomic(&self, batch: &[Account]) -> Result<()> {
        let mut accounts = self.accounts.write().await;
        // Validate the whole batch before touching anything.
        if let Some(missing) = batch.iter().find(|a| !accounts.contains_key(&a.id)) {
            return Err(LedgerError::NotFound(missing.id));
        }
        for account in batch {
            accounts.insert(account.id, account.clone());
        }
        Ok(())
    }
}
