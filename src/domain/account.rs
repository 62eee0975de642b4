use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Minimum length of an account display name, in characters.
pub const MIN_NAME_LEN: usize = 3;

/// Opaque account identifier, assigned once at creation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AccountId(Uuid);

impl AccountId {
    /// Generates a fresh random identifier.
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }

    pub fn as_bytes(&self) -> &[u8; 16] {
        self.0.as_bytes()
    }
}

impl Default for AccountId {
    fn default() -> Self {
        Self::new()
    }
}

impl From<Uuid> for AccountId {
    fn from(value: Uuid) -> Self {
        Self(value)
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for AccountId {
    type Err = LedgerError;

    fn from_str(s: &str) -> Result<Self> {
        Uuid::parse_str(s)
            .map(Self)
            .map_err(|e| LedgerError::InvalidInput(format!("'{s}' is not an account id: {e}")))
    }
}

/// Display label of an account. Must be at least [`MIN_NAME_LEN`] characters long.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct AccountName(String);

impl AccountName {
    pub fn parse(value: impl Into<String>) -> Result<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(LedgerError::InvalidInput(
                "Account name must not be empty".to_string(),
            ));
        }
        if value.chars().count() < MIN_NAME_LEN {
            return Err(LedgerError::InvalidInput(format!(
                "Account name '{value}' is shorter than {MIN_NAME_LEN} characters"
            )));
        }
        Ok(Self(value))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for AccountName {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Self::parse(raw).map_err(serde::de::Error::custom)
    }
}

impl fmt::Display for AccountName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A non-negative monetary value.
///
/// The only way to build one is through [`Balance::new`] or the checked arithmetic below,
/// so an account can never hold a negative balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default, Serialize)]
#[serde(transparent)]
pub struct Balance(Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Result<Self> {
        if value < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(value));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    fn checked_add(self, amount: Decimal) -> Result<Self> {
        self.0
            .checked_add(amount)
            .map(Self)
            .ok_or(LedgerError::InvalidAmount(amount))
    }
}

impl<'de> Deserialize<'de> for Balance {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = <Decimal as Deserialize>::deserialize(deserializer)?;
        Self::new(raw).map_err(serde::de::Error::custom)
    }
}

impl From<Balance> for Decimal {
    fn from(balance: Balance) -> Self {
        balance.0
    }
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// A single account: identity, display name and current balance.
///
/// Mutations only touch the in-memory value; persisting is the engine's job.
#[derive(Debug, Serialize, Deserialize, PartialEq, Eq, Clone)]
pub struct Account {
    pub id: AccountId,
    pub name: AccountName,
    pub balance: Balance,
}

impl Account {
    /// Builds a brand-new account with a fresh id. The opening amount must be positive.
    pub fn open(name: AccountName, initial: Decimal) -> Result<Self> {
        if initial <= Decimal::ZERO {
            return Err(LedgerError::InvalidInput(format!(
                "Initial amount must be positive, got {initial}"
            )));
        }
        Ok(Self {
            id: AccountId::new(),
            name,
            balance: Balance::new(initial)?,
        })
    }

    /// Credits the account. Zero is accepted and changes nothing.
    pub fn add_money(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        self.balance = self.balance.checked_add(amount)?;
        Ok(())
    }

    /// Debits the account if the balance covers `amount`.
    pub fn withdraw(&mut self, amount: Decimal) -> Result<()> {
        if amount < Decimal::ZERO {
            return Err(LedgerError::InvalidAmount(amount));
        }
        if self.balance.value() < amount {
            return Err(LedgerError::InsufficientFunds {
                account: self.id,
                balance: self.balance.value(),
                requested: amount,
            });
        }
        self.balance = Balance::new(self.balance.value() - amount)?;
        Ok(())
    }
}
