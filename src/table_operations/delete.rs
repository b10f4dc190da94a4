//! Delete tables operation.

use tracing::{error, info};

use crate::catalog::TableCatalog;
use crate::errors::SweepError;

/// Delete `tables` one at a time, in order.
///
/// Stops at the first failure. Deletes are never issued concurrently, so on
/// failure everything before the failing table was accepted and nothing after
/// it was attempted.
///
/// # Returns
///
/// The tables accepted for deletion. DynamoDB removes them asynchronously;
/// they may still be listed for a while.
///
/// # Errors
///
/// Returns `SweepError::Delete` naming the failing table and carrying the
/// tables deleted before it. Those deletes are not rolled back.
pub async fn delete_tables<C>(catalog: &C, tables: &[String]) -> Result<Vec<String>, SweepError>
where
    C: TableCatalog + ?Sized,
{
    let mut deleted = Vec::with_capacity(tables.len());

    for table in tables {
        match catalog.delete_by_name(table).await {
            Ok(()) => {
                info!(table = %table, "table deletion requested");
                deleted.push(table.clone());
            }
            Err(source) => {
                error!(
                    table = %table,
                    deleted = deleted.len(),
                    error = %source,
                    "table deletion failed"
                );
                return Err(SweepError::Delete {
                    table: table.clone(),
                    deleted,
                    source,
                });
            }
        }
    }

    Ok(deleted)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::testing::FakeCatalog;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn deletes_all_in_order() {
        let catalog = FakeCatalog::new(&["a", "b", "c"]);

        let deleted = delete_tables(&catalog, &names(&["c", "a"])).await.unwrap();

        assert_eq!(deleted, names(&["c", "a"]));
        assert_eq!(catalog.delete_calls(), names(&["c", "a"]));
    }

    #[tokio::test]
    async fn nothing_to_delete() {
        let catalog = FakeCatalog::new(&["a"]);
        let deleted = delete_tables(&catalog, &[]).await.unwrap();
        assert!(deleted.is_empty());
        assert!(catalog.delete_calls().is_empty());
    }

    #[tokio::test]
    async fn kth_failure_keeps_first_k_minus_one() {
        let input = names(&["t1", "t2", "t3", "t4", "t5"]);
        let catalog = FakeCatalog::new(&["t1", "t2", "t3", "t4", "t5"]).failing_delete("t3");

        let err = delete_tables(&catalog, &input).await.unwrap_err();

        match err {
            SweepError::Delete {
                table,
                deleted,
                source,
            } => {
                assert_eq!(table, "t3");
                assert_eq!(deleted, names(&["t1", "t2"]));
                assert!(matches!(source, ApiError::ResourceNotFound(_)));
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // nothing after the failing table is attempted
        assert_eq!(catalog.delete_calls(), names(&["t1", "t2", "t3"]));
    }

    #[tokio::test]
    async fn first_failure_has_empty_partial_result() {
        let catalog = FakeCatalog::new(&["b"]);

        let err = delete_tables(&catalog, &names(&["missing", "b"]))
            .await
            .unwrap_err();

        assert!(err.deleted_tables().is_empty());
        assert!(err.to_string().contains("'missing'"));
        assert_eq!(catalog.delete_calls(), names(&["missing"]));
    }
}
