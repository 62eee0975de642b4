use crate::error::{LedgerError, Result};
use rust_decimal::Decimal;
use serde::Deserialize;
use std::io::Read;

#[derive(Debug, Deserialize, PartialEq, Clone, Copy)]
#[serde(rename_all = "lowercase")]
pub enum CommandType {
    Open,
    Deposit,
    Transfer,
}

/// One raw row of a command file: `type, account, to, amount, name`.
#[derive(Debug, Deserialize, PartialEq, Clone)]
pub struct CommandRecord {
    pub r#type: CommandType,
    pub account: String,
    #[serde(default)]
    pub to: Option<String>,
    #[serde(default)]
    pub amount: Option<Decimal>,
    #[serde(default)]
    pub name: Option<String>,
}

/// A validated command. Account references are either aliases bound by an earlier
/// `open` row or literal account ids.
#[derive(Debug, PartialEq, Clone)]
pub enum Command {
    Open {
        alias: String,
        name: String,
        amount: Decimal,
    },
    Deposit {
        account: String,
        amount: Decimal,
    },
    Transfer {
        from: String,
        to: String,
        amount: Decimal,
    },
}

fn required<T>(value: Option<T>, field: &str, kind: CommandType) -> Result<T> {
    value.ok_or_else(|| LedgerError::InvalidInput(format!("{kind:?} command requires '{field}'")))
}

impl TryFrom<CommandRecord> for Command {
    type Error = LedgerError;

    fn try_from(record: CommandRecord) -> Result<Self> {
        let kind = record.r#type;
        if record.account.is_empty() {
            return Err(LedgerError::InvalidInput(format!(
                "{kind:?} command requires 'account'"
            )));
        }
        let amount = required(record.amount, "amount", kind)?;

        match kind {
            CommandType::Open => Ok(Command::Open {
                alias: record.account,
                name: required(record.name, "name", kind)?,
                amount,
            }),
            CommandType::Deposit => Ok(Command::Deposit {
                account: record.account,
                amount,
            }),
            CommandType::Transfer => Ok(Command::Transfer {
                from: record.account,
                to: required(record.to, "to", kind)?,
                amount,
            }),
        }
    }
}

/// Reads commands from a CSV source.
///
/// Whitespace is trimmed and trailing columns may be omitted.
pub struct CommandReader<R: Read> {
    reader: csv::Reader<R>,
}

impl<R: Read> CommandReader<R> {
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(csv::Trim::All)
            .flexible(true)
            .from_reader(source);
        Self { reader }
    }

    /// Lazily reads, deserializes and validates each row.
    pub fn commands(self) -> impl Iterator<Item = Result<Command>> {
        self.reader
            .into_deserialize::<CommandRecord>()
            .map(|result| Command::try_from(result?))
    }
}
