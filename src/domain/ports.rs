use super::account::{Account, AccountId};
use crate::error::Result;
use async_trait::async_trait;

/// Durable owner of account records.
///
/// Implementations must make `update_atomic` all-or-nothing: after it returns, either
/// every account in the slice holds its new state or none of them changed, and no
/// concurrent reader may observe a partial write.
#[async_trait]
pub trait AccountStore: Send + Sync {
    /// Persists a new account. Fails with `AlreadyExists` if the id is taken.
    async fn create(&self, account: Account) -> Result<()>;

    /// Fails with `NotFound` if the id is unknown.
    async fn get(&self, id: AccountId) -> Result<Account>;

    async fn get_all(&self) -> Result<Vec<Account>>;

    /// Overwrites the stored record for `account.id`.
    async fn update(&self, account: Account) -> Result<()>;

    /// Persists several accounts as one unit.
    async fn update_atomic(&self, accounts: &[Account]) -> Result<()>;
}

pub type AccountStoreBox = Box<dyn AccountStore>;
pub type AccountStoreFactory = Box<dyn Fn() -> AccountStoreBox + Send + Sync>;
