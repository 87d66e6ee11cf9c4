//! Stake pool tenant registry CLI
#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::unwrap_used)]
#![warn(missing_docs, clippy::pedantic)]
#![allow(clippy::missing_errors_doc, clippy::module_name_repetitions)]

/// Command-line interface functionality and types.
pub mod cli;
/// Rendering of tenants and lookup results.
pub mod output;
