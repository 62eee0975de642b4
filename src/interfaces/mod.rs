//! Caller-facing adapters: CSV command input, CSV account output and the batch runner
//! that drives the engine from a command stream.

pub mod batch;
pub mod csv;
