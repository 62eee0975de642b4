//! Application layer containing the account orchestration.
//!
//! This module defines the `AccountEngine`, the single entry point for opening,
//! funding, querying and transferring between accounts. It serializes every
//! balance mutation behind one `tokio` mutex.

pub mod engine;
