//! List tables operation.

use tracing::{debug, warn};

use crate::catalog::TableCatalog;
use crate::errors::SweepError;
use crate::table_operations::filter::filter_tables;

/// How far a listing follows `ListTables` continuation tokens.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Pagination {
    /// Request pages until the service stops returning a continuation token.
    #[default]
    Exhaustive,
    /// Request one page only. Accounts with more tables than fit on a page
    /// get a truncated listing.
    SinglePage,
}

/// List every table name, in the order DynamoDB returns them.
///
/// # Errors
///
/// Returns `SweepError::List` on the first failed page request. Pages already
/// fetched are discarded.
pub async fn list_tables<C>(catalog: &C, pagination: Pagination) -> Result<Vec<String>, SweepError>
where
    C: TableCatalog + ?Sized,
{
    let mut tables = Vec::new();
    let mut start: Option<String> = None;

    loop {
        let page = catalog
            .list_page(start.as_deref())
            .await
            .map_err(SweepError::List)?;
        debug!(
            count = page.table_names.len(),
            start = ?start,
            next = ?page.last_evaluated_table_name,
            "listed table page"
        );
        tables.extend(page.table_names);

        match (page.last_evaluated_table_name, pagination) {
            (None, _) => break,
            (Some(next), Pagination::Exhaustive) => start = Some(next),
            (Some(next), Pagination::SinglePage) => {
                warn!(
                    listed = tables.len(),
                    next = %next,
                    "more tables exist than fit on one page; listing is truncated"
                );
                break;
            }
        }
    }

    Ok(tables)
}

/// List tables and keep the ones matching `filters` (see `filter_tables`).
pub async fn list_tables_matching<C>(
    catalog: &C,
    pagination: Pagination,
    filters: &[String],
) -> Result<Vec<String>, SweepError>
where
    C: TableCatalog + ?Sized,
{
    let tables = list_tables(catalog, pagination).await?;
    let total = tables.len();
    let matching = filter_tables(tables, filters);
    debug!(total, matching = matching.len(), filters = ?filters, "filtered tables");
    Ok(matching)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ApiError;
    use crate::testing::FakeCatalog;

    #[tokio::test]
    async fn exhaustive_follows_every_page() {
        let catalog = FakeCatalog::new(&["a", "b", "c", "d", "e"]).with_page_size(2);

        let tables = list_tables(&catalog, Pagination::Exhaustive).await.unwrap();

        assert_eq!(tables, vec!["a", "b", "c", "d", "e"]);
        assert_eq!(catalog.list_calls(), 3);
    }

    #[tokio::test]
    async fn single_page_stops_after_one_request() {
        let catalog = FakeCatalog::new(&["a", "b", "c", "d", "e"]).with_page_size(2);

        let tables = list_tables(&catalog, Pagination::SinglePage).await.unwrap();

        assert_eq!(tables, vec!["a", "b"]);
        assert_eq!(catalog.list_calls(), 1);
    }

    #[tokio::test]
    async fn empty_account_lists_nothing() {
        let catalog = FakeCatalog::new(&[]);
        let tables = list_tables(&catalog, Pagination::Exhaustive).await.unwrap();
        assert!(tables.is_empty());
    }

    #[tokio::test]
    async fn failed_page_is_a_list_failure() {
        let catalog = FakeCatalog::new(&["a", "b", "c"])
            .with_page_size(1)
            .failing_list_on_call(2);

        let err = list_tables(&catalog, Pagination::Exhaustive)
            .await
            .unwrap_err();

        assert!(matches!(err, SweepError::List(ApiError::Connection(_))));
        assert_eq!(catalog.list_calls(), 2);
    }

    #[tokio::test]
    async fn matching_filters_across_pages() {
        let catalog =
            FakeCatalog::new(&["prod-users", "test-cache", "prod-orders"]).with_page_size(1);

        let tables = list_tables_matching(&catalog, Pagination::Exhaustive, &["PROD".to_string()])
            .await
            .unwrap();

        assert_eq!(tables, vec!["prod-users", "prod-orders"]);
    }
}
