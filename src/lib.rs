//! dynoprune: list, filter and bulk-delete DynamoDB tables.
//!
//! The binary wires these modules together:
//! - `cli` / `logging` - flags and the tracing subscriber
//! - `client` - builds the SDK client from region, profile and endpoint
//! - `catalog` - the `TableCatalog` trait over ListTables and DeleteTable
//! - `table_operations` - filter, list, delete and wait steps
//! - `sweep` - runs the steps for the selected mode

pub mod catalog;
pub mod cli;
pub mod client;
pub mod errors;
pub mod logging;
pub mod sweep;
pub mod table_operations;

#[cfg(test)]
mod testing;

pub use catalog::{TableCatalog, TablePage};
pub use client::{build_client, AwsConfig};
pub use errors::{ApiError, SweepError};
pub use sweep::{run_sweep, SweepMode, SweepOptions, SweepOutcome};
