//! Table operations for a sweep.
//!
//! This module provides the steps a sweep is built from:
//! - `filter` - Narrow table names by case-insensitive substrings
//! - `list` - Enumerate every table, following pagination
//! - `delete` - Delete tables one by one, stopping at the first failure
//! - `wait` - Poll until deleted tables stop showing up

mod delete;
mod filter;
mod list;
mod wait;

// Re-export public functions
pub use delete::delete_tables;
pub use filter::filter_tables;
pub use list::{list_tables, list_tables_matching, Pagination};
pub use wait::{wait_for_tables_deleted, WaitPolicy, DEFAULT_MAX_ATTEMPTS, DEFAULT_POLL_INTERVAL};
