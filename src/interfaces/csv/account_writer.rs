use crate::domain::account::Account;
use crate::error::Result;
use std::io::Write;

/// Writes account snapshots as CSV with header `id,name,balance`.
///
/// Balances are normalized, so `150.00` is written as `150`.
pub struct AccountWriter<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> AccountWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            writer: csv::Writer::from_writer(sink),
        }
    }

    pub fn write_accounts(&mut self, accounts: impl IntoIterator<Item = Account>) -> Result<()> {
        self.writer.write_record(["id", "name", "balance"])?;
        for account in accounts {
            self.writer.write_record([
                account.id.to_string(),
                account.name.to_string(),
                account.balance.value().normalize().to_string(),
            ])?;
        }
        self.writer.flush()?;
        Ok(())
    }
}
