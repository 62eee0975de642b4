//! Domain layer: the account entity and the storage port it is persisted through.

pub mod account;
pub mod ports;
