//! Sweep orchestration.
//!
//! A sweep lists the tables, narrows them with the filters, then either
//! prints them, reports what a delete would remove, or deletes them and waits
//! for DynamoDB to finish.

use std::io::Write;
use tracing::{info, warn};

use crate::catalog::TableCatalog;
use crate::errors::SweepError;
use crate::table_operations::{
    delete_tables, list_tables, list_tables_matching, wait_for_tables_deleted, Pagination,
    WaitPolicy,
};

/// What a sweep does with the matching tables.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SweepMode {
    /// Print the matching tables.
    #[default]
    List,
    /// Print what would be deleted. Never mutates.
    DryRun,
    /// Delete the matching tables and wait for the deletes to land.
    Delete,
}

impl SweepMode {
    /// Dry-run wins when both switches are set.
    pub fn from_flags(delete: bool, dry_run: bool) -> Self {
        match (delete, dry_run) {
            (_, true) => SweepMode::DryRun,
            (true, false) => SweepMode::Delete,
            (false, false) => SweepMode::List,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOptions {
    pub mode: SweepMode,
    /// Case-insensitive substrings. Empty matches every table.
    pub filters: Vec<String>,
    pub pagination: Pagination,
    pub wait: WaitPolicy,
}

/// Result of a successful sweep.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SweepOutcome {
    /// Tables that matched the filters.
    pub targets: Vec<String>,
    /// Tables accepted for deletion. Empty unless the mode is `Delete`.
    pub deleted: Vec<String>,
    /// Every table left after the deletes were confirmed. `None` unless the
    /// mode is `Delete`.
    pub remaining: Option<Vec<String>>,
}

/// Run one sweep against `catalog`, writing the report to `out`.
///
/// In delete mode, the waiter runs on whatever the deleter managed to delete
/// even when it stopped early, so a partial batch is still confirmed before
/// the delete failure is returned.
///
/// # Errors
///
/// The first failing step aborts the sweep. A delete failure takes precedence
/// over a failure while confirming its partial batch; the latter is logged.
pub async fn run_sweep<C, W>(
    catalog: &C,
    options: &SweepOptions,
    out: &mut W,
) -> Result<SweepOutcome, SweepError>
where
    C: TableCatalog + ?Sized,
    W: Write,
{
    let targets = list_tables_matching(catalog, options.pagination, &options.filters).await?;
    info!(mode = ?options.mode, matched = targets.len(), "tables listed");

    let mut outcome = SweepOutcome {
        targets,
        ..SweepOutcome::default()
    };

    match options.mode {
        SweepMode::DryRun => {
            for table in &outcome.targets {
                writeln!(out, "dry-run. table would be deleted: {}", table)?;
            }
        }
        SweepMode::List => {
            for table in &outcome.targets {
                writeln!(out, "{}", table)?;
            }
        }
        SweepMode::Delete => {
            let deleted = delete_and_confirm(catalog, options, &outcome.targets).await?;

            let remaining = list_tables(catalog, options.pagination).await?;
            if remaining.is_empty() {
                writeln!(out, "no remaining tables.")?;
            } else {
                writeln!(out, "remaining tables:")?;
                for table in &remaining {
                    writeln!(out, "{}", table)?;
                }
            }

            outcome.deleted = deleted;
            outcome.remaining = Some(remaining);
        }
    }

    Ok(outcome)
}

async fn delete_and_confirm<C>(
    catalog: &C,
    options: &SweepOptions,
    targets: &[String],
) -> Result<Vec<String>, SweepError>
where
    C: TableCatalog + ?Sized,
{
    let deleted = delete_tables(catalog, targets).await;
    let submitted = match &deleted {
        Ok(tables) => tables.as_slice(),
        Err(err) => err.deleted_tables(),
    };

    let waited = wait_for_tables_deleted(catalog, submitted, options.wait).await;

    match (deleted, waited) {
        (Ok(tables), Ok(attempts)) => {
            info!(deleted = tables.len(), attempts, "table deletion confirmed");
            Ok(tables)
        }
        (Ok(_), Err(wait_err)) => Err(wait_err),
        (Err(delete_err), Ok(_)) => Err(delete_err),
        (Err(delete_err), Err(wait_err)) => {
            warn!(
                error = %wait_err,
                "could not confirm deletion of tables removed before the failure"
            );
            Err(delete_err)
        }
    }
}
