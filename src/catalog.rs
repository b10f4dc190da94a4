//! The two DynamoDB calls a sweep needs, behind a trait.
//!
//! `TableCatalog` is implemented for the SDK `Client`. Every table operation
//! is generic over it, so the same code runs against DynamoDB, DynamoDB Local
//! (via `--endpoint-url`) or an in-memory catalog in tests.

use async_trait::async_trait;
use aws_sdk_dynamodb::Client;
use tracing::debug;

use crate::errors::{map_sdk_error, ApiError};

/// One page of a `ListTables` response.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TablePage {
    /// Table names on this page, in the order the service returned them.
    pub table_names: Vec<String>,
    /// Continuation token. `None` means this was the last page.
    pub last_evaluated_table_name: Option<String>,
}

/// Table enumeration and deletion.
#[async_trait]
pub trait TableCatalog: Send + Sync {
    /// Fetch one page of table names, starting after `exclusive_start`.
    async fn list_page(&self, exclusive_start: Option<&str>) -> Result<TablePage, ApiError>;

    /// Ask the service to delete `table`.
    ///
    /// Returns once the request is accepted. The table keeps showing up in
    /// listings until the service finishes removing it.
    async fn delete_by_name(&self, table: &str) -> Result<(), ApiError>;
}

#[async_trait]
impl TableCatalog for Client {
    async fn list_page(&self, exclusive_start: Option<&str>) -> Result<TablePage, ApiError> {
        let output = self
            .list_tables()
            .set_exclusive_start_table_name(exclusive_start.map(str::to_string))
            .send()
            .await
            .map_err(|e| map_sdk_error(e, None))?;

        Ok(TablePage {
            table_names: output.table_names.unwrap_or_default(),
            last_evaluated_table_name: output.last_evaluated_table_name,
        })
    }

    async fn delete_by_name(&self, table: &str) -> Result<(), ApiError> {
        let output = self
            .delete_table()
            .table_name(table)
            .send()
            .await
            .map_err(|e| map_sdk_error(e, Some(table)))?;

        let status = output
            .table_description()
            .and_then(|d| d.table_status())
            .map(|s| s.as_str().to_string());
        debug!(table, status = ?status, "DeleteTable accepted");
        Ok(())
    }
}
