//! Wait for table deletion operation.

use std::collections::HashSet;
use std::time::Duration;
use tracing::debug;

use crate::catalog::TableCatalog;
use crate::errors::SweepError;
use crate::table_operations::list::{list_tables, Pagination};

/// Default number of listings before giving up.
pub const DEFAULT_MAX_ATTEMPTS: u32 = 10;

/// Default pause between listings.
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_millis(1000 / 6);

/// Polling budget for `wait_for_tables_deleted`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WaitPolicy {
    /// Listings before giving up. A budget of 0 is treated as 1: the waiter
    /// always lists at least once.
    pub max_attempts: u32,
    pub interval: Duration,
}

impl Default for WaitPolicy {
    fn default() -> Self {
        Self {
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            interval: DEFAULT_POLL_INTERVAL,
        }
    }
}

/// Poll the table listing until none of `tables` appear in it.
///
/// Each attempt lists every table and intersects with `tables`. An empty
/// intersection confirms the deletes. Otherwise the waiter sleeps for
/// `policy.interval` and tries again, up to `policy.max_attempts` listings.
/// There is no sleep after the last attempt.
///
/// Every attempt follows pagination to the end, whatever policy the initial
/// listing used, so a deleted table past the first page is never mistaken for
/// gone.
///
/// # Returns
///
/// The number of listings it took to confirm. Zero when `tables` is empty.
///
/// # Errors
///
/// - `SweepError::DeletionTimeout` if tables are still listed after the last
///   attempt. They may still be deleting.
/// - `SweepError::List` as soon as a listing fails. Not retried.
pub async fn wait_for_tables_deleted<C>(
    catalog: &C,
    tables: &[String],
    policy: WaitPolicy,
) -> Result<u32, SweepError>
where
    C: TableCatalog + ?Sized,
{
    if tables.is_empty() {
        return Ok(0);
    }

    let expected: HashSet<&str> = tables.iter().map(String::as_str).collect();
    let max_attempts = policy.max_attempts.max(1);
    let mut remaining = Vec::new();

    for attempt in 1..=max_attempts {
        let existing = list_tables(catalog, Pagination::Exhaustive).await?;
        remaining = existing
            .into_iter()
            .filter(|t| expected.contains(t.as_str()))
            .collect();

        if remaining.is_empty() {
            debug!(attempt, "deletion confirmed");
            return Ok(attempt);
        }

        debug!(attempt, max_attempts, remaining = ?remaining, "tables still present");
        if attempt < max_attempts {
            tokio::time::sleep(policy.interval).await;
        }
    }

    Err(SweepError::DeletionTimeout {
        attempts: max_attempts,
        remaining,
    })
}
