//! Implements an in-memory sheet store.

use std::sync::{Arc, Mutex, MutexGuard};

use async_trait::async_trait;

use crate::{
    Error,
    store::{SheetStore, Workbook},
};

/// Stores the workbook in memory, starting from a single empty sheet.
///
/// Clones share the same workbook.
#[derive(Debug, Clone)]
pub struct MemorySheetStore {
    workbook: Arc<Mutex<Workbook>>,
}

impl MemorySheetStore {
    /// Create an empty in-memory workbook.
    pub fn new() -> Self {
        Self {
            workbook: Arc::new(Mutex::new(Workbook::new())),
        }
    }

    fn lock(&self) -> Result<MutexGuard<'_, Workbook>, Error> {
        self.workbook
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire the workbook lock: {error}"))
            .map_err(|_| Error::WorkbookLockError)
    }
}

impl Default for MemorySheetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SheetStore for MemorySheetStore {
    async fn sheet_names(&self) -> Result<Vec<String>, Error> {
        Ok(self.lock()?.sheet_names())
    }

    async fn create_sheet(&self, name: &str) -> Result<(), Error> {
        self.lock()?.create_sheet(name)
    }

    async fn delete_sheet(&self, name: &str) -> Result<(), Error> {
        self.lock()?.delete_sheet(name)
    }

    async fn read_rows(&self, name: &str) -> Result<Vec<Vec<String>>, Error> {
        self.lock()?.read_rows(name)
    }

    async fn append_row(&self, name: &str, row: Vec<String>) -> Result<(), Error> {
        self.lock()?.append_row(name, row)
    }

    async fn update_range(
        &self,
        name: &str,
        start_row: usize,
        start_column: usize,
        values: Vec<Vec<String>>,
    ) -> Result<(), Error> {
        self.lock()?
            .update_range(name, start_row, start_column, values)
    }

    async fn delete_rows(
        &self,
        name: &str,
        start_row: usize,
        end_row: usize,
    ) -> Result<(), Error> {
        self.lock()?.delete_rows(name, start_row, end_row)
    }
}

#[cfg(test)]
mod memory_sheet_store_tests {
    use crate::store::{MemorySheetStore, SheetStore};

    #[tokio::test]
    async fn clones_share_the_same_workbook() {
        let store = MemorySheetStore::new();
        let clone = store.clone();

        clone
            .create_sheet("Jan 2026")
            .await
            .expect("Could not create sheet.");

        assert_eq!(
            store.sheet_names().await.expect("Could not list sheets."),
            ["Sheet1", "Jan 2026"]
        );
    }

    #[tokio::test]
    async fn appended_rows_are_read_back_in_order() {
        let store = MemorySheetStore::new();

        store
            .append_row("Sheet1", vec!["first".to_owned()])
            .await
            .expect("Could not append row.");
        store
            .append_row("Sheet1", vec!["second".to_owned()])
            .await
            .expect("Could not append row.");

        let rows = store.read_rows("Sheet1").await.expect("Could not read rows.");
        assert_eq!(rows, [["first"], ["second"]]);
    }
}
