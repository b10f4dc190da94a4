//! In-memory `TableCatalog` for unit tests.

use async_trait::async_trait;
use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use crate::catalog::{TableCatalog, TablePage};
use crate::errors::ApiError;

struct FakeState {
    tables: Vec<String>,
    page_size: usize,
    linger: usize,
    // table -> listings it still shows up in
    deleting: HashMap<String, usize>,
    failing_deletes: HashSet<String>,
    fail_list_on_call: Option<usize>,
    list_calls: usize,
    listings: usize,
    delete_calls: Vec<String>,
}

/// Catalog that keeps tables in a `Vec` and mimics DynamoDB's asynchronous
/// deletes: a deleted table stays visible for `linger` more listings.
pub(crate) struct FakeCatalog {
    state: Mutex<FakeState>,
}

impl FakeCatalog {
    pub(crate) fn new(tables: &[&str]) -> Self {
        Self {
            state: Mutex::new(FakeState {
                tables: tables.iter().map(|t| t.to_string()).collect(),
                page_size: 100,
                linger: 0,
                deleting: HashMap::new(),
                failing_deletes: HashSet::new(),
                fail_list_on_call: None,
                list_calls: 0,
                listings: 0,
                delete_calls: Vec::new(),
            }),
        }
    }

    pub(crate) fn with_page_size(self, page_size: usize) -> Self {
        self.state.lock().unwrap().page_size = page_size;
        self
    }

    /// Deleted tables keep appearing in this many full listings.
    pub(crate) fn lingering(self, listings: usize) -> Self {
        self.state.lock().unwrap().linger = listings;
        self
    }

    pub(crate) fn failing_delete(self, table: &str) -> Self {
        self.state
            .lock()
            .unwrap()
            .failing_deletes
            .insert(table.to_string());
        self
    }

    /// Make the n-th `list_page` call (1-based) fail.
    pub(crate) fn failing_list_on_call(self, call: usize) -> Self {
        self.state.lock().unwrap().fail_list_on_call = Some(call);
        self
    }

    pub(crate) fn list_calls(&self) -> usize {
        self.state.lock().unwrap().list_calls
    }

    /// Number of listings started (page requests without a start token).
    pub(crate) fn listings(&self) -> usize {
        self.state.lock().unwrap().listings
    }

    pub(crate) fn delete_calls(&self) -> Vec<String> {
        self.state.lock().unwrap().delete_calls.clone()
    }

    /// Tables currently stored, including ones still being deleted.
    pub(crate) fn tables(&self) -> Vec<String> {
        self.state.lock().unwrap().tables.clone()
    }
}

#[async_trait]
impl TableCatalog for FakeCatalog {
    async fn list_page(&self, exclusive_start: Option<&str>) -> Result<TablePage, ApiError> {
        let mut state = self.state.lock().unwrap();
        state.list_calls += 1;
        if state.fail_list_on_call == Some(state.list_calls) {
            return Err(ApiError::Connection("simulated outage".to_string()));
        }

        if exclusive_start.is_none() {
            state.listings += 1;
            let gone: Vec<String> = state
                .deleting
                .iter()
                .filter(|(_, left)| **left == 0)
                .map(|(name, _)| name.clone())
                .collect();
            for name in &gone {
                state.deleting.remove(name);
            }
            state.tables.retain(|t| !gone.contains(t));
            for left in state.deleting.values_mut() {
                *left = left.saturating_sub(1);
            }
        }

        let start = match exclusive_start {
            Some(token) => match state.tables.iter().position(|t| t == token) {
                Some(idx) => idx + 1,
                None => return Err(ApiError::Validation(format!("bad start token {token}"))),
            },
            None => 0,
        };
        let end = (start + state.page_size).min(state.tables.len());
        let table_names = state.tables[start..end].to_vec();
        let last_evaluated_table_name = if end < state.tables.len() {
            table_names.last().cloned()
        } else {
            None
        };

        Ok(TablePage {
            table_names,
            last_evaluated_table_name,
        })
    }

    async fn delete_by_name(&self, table: &str) -> Result<(), ApiError> {
        let mut state = self.state.lock().unwrap();
        state.delete_calls.push(table.to_string());

        if state.failing_deletes.contains(table) || !state.tables.iter().any(|t| t == table) {
            return Err(ApiError::ResourceNotFound(format!("table '{table}' not found")));
        }
        if state.deleting.contains_key(table) {
            return Err(ApiError::ResourceInUse(format!("table '{table}' is in use")));
        }

        let linger = state.linger;
        state.deleting.insert(table.to_string(), linger);
        Ok(())
    }
}
