use crate::application::engine::AccountEngine;
use crate::domain::account::AccountId;
use crate::error::{LedgerError, Result};
use crate::interfaces::csv::command_reader::Command;
use std::collections::HashMap;
use tracing::warn;

/// Outcome counters of a batch run.
#[derive(Debug, Default, PartialEq, Eq, Clone, Copy)]
pub struct BatchSummary {
    pub applied: usize,
    pub rejected: usize,
}

/// Drives an [`AccountEngine`] from a stream of commands.
///
/// `open` rows bind their alias to the freshly generated account id so later rows in the
/// same stream can refer to the account without knowing its id up front.
pub struct BatchRunner<'a> {
    engine: &'a AccountEngine,
    aliases: HashMap<String, AccountId>,
}

impl<'a> BatchRunner<'a> {
    pub fn new(engine: &'a AccountEngine) -> Self {
        Self {
            engine,
            aliases: HashMap::new(),
        }
    }

    /// Looks up an alias first, then falls back to parsing a literal account id.
    pub fn resolve(&self, reference: &str) -> Result<AccountId> {
        match self.aliases.get(reference) {
            Some(id) => Ok(*id),
            None => reference.parse(),
        }
    }

    pub async fn apply(&mut self, command: Command) -> Result<()> {
        match command {
            Command::Open {
                alias,
                name,
                amount,
            } => {
                if self.aliases.contains_key(&alias) {
                    return Err(LedgerError::InvalidInput(format!(
                        "alias '{alias}' is already bound"
                    )));
                }
                let account = self.engine.create(&name, amount).await?;
                self.aliases.insert(alias, account.id);
            }
            Command::Deposit { account, amount } => {
                let id = self.resolve(&account)?;
                self.engine.add_money(id, amount).await?;
            }
            Command::Transfer { from, to, amount } => {
                let from = self.resolve(&from)?;
                let to = self.resolve(&to)?;
                self.engine.transfer(from, to, amount).await?;
            }
        }
        Ok(())
    }

    /// Applies every command in order. Unreadable rows and rejected commands are logged
    /// and skipped.
    pub async fn run<I>(&mut self, commands: I) -> BatchSummary
    where
        I: IntoIterator<Item = Result<Command>>,
    {
        let mut summary = BatchSummary::default();
        for (index, command) in commands.into_iter().enumerate() {
            let row = index + 1;
            let outcome = match command {
                Ok(command) => self.apply(command).await,
                Err(e) => {
                    warn!(row, error = %e, "unreadable command row");
                    summary.rejected += 1;
                    continue;
                }
            };
            match outcome {
                Ok(()) => summary.applied += 1,
                Err(e) => {
                    warn!(row, error = %e, "command rejected");
                    summary.rejected += 1;
                }
            }
        }
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::in_memory::InMemoryAccountStore;
    use crate::interfaces::csv::command_reader::CommandReader;
    use rust_decimal_macros::dec;

    #[tokio::test]
    async fn test_batch_resolves_aliases() {
        let engine = AccountEngine::new(Box::new(InMemoryAccountStore::new()));
        let data = "type, account, to, amount, name\n\
                    open, a, , 100, alice smith\n\
                    open, b, , 50, bob smith\n\
                    deposit, a, , 10,\n\
                    transfer, a, b, 30,\n";

        let mut runner = BatchRunner::new(&engine);
        let summary = runner
            .run(CommandReader::new(data.as_bytes()).commands())
            .await;
        assert_eq!(
            summary,
            BatchSummary {
                applied: 4,
                rejected: 0
            }
        );

        let a = engine.get(runner.resolve("a").unwrap()).await.unwrap();
        let b = engine.get(runner.resolve("b").unwrap()).await.unwrap();
        assert_eq!(a.balance.value(), dec!(80));
        assert_eq!(b.balance.value(), dec!(80));
    }

    #[tokio::test]
    async fn test_batch_accepts_literal_ids() {
        let engine = AccountEngine::new(Box::new(InMemoryAccountStore::new()));
        let account = engine.create("carol", dec!(5)).await.unwrap();

        let mut runner = BatchRunner::new(&engine);
        runner
            .apply(Command::Deposit {
                account: account.id.to_string(),
                amount: dec!(5),
            })
            .await
            .unwrap();

        assert_eq!(
            engine.get(account.id).await.unwrap().balance.value(),
            dec!(10)
        );
    }

    #[tokio::test]
    async fn test_batch_skips_rejected_commands() {
        let engine = AccountEngine::new(Box::new(InMemoryAccountStore::new()));
        let data = "type, account, to, amount, name\n\
                    open, a, , 10, alice smith\n\
                    open, a, , 10, alice again\n\
                    transfer, a, nobody, 5,\n\
                    transfer, a, a, 5,\n\
                    withdraw, a, , 5,\n\
                    deposit, a, , -1,\n\
                    deposit, a, , 1,\n";

        let mut runner = BatchRunner::new(&engine);
        let summary = runner
            .run(CommandReader::new(data.as_bytes()).commands())
            .await;
        assert_eq!(
            summary,
            BatchSummary {
                applied: 2,
                rejected: 5
            }
        );

        let accounts = engine.get_all().await.unwrap();
        assert_eq!(accounts.len(), 1);
        assert_eq!(accounts[0].balance.value(), dec!(11));
    }
}
