//! Implements a sheet store persisted as a JSON snapshot on disk.

use std::{
    fs,
    path::{Path, PathBuf},
    sync::{Arc, Mutex, MutexGuard},
};

use async_trait::async_trait;

use crate::{
    Error,
    store::{SheetStore, Workbook},
};

/// Stores the workbook as a pretty-printed JSON file.
///
/// The file is rewritten after every change, so the snapshot on disk is
/// always a complete workbook. Intended for a single server process; there is
/// no file locking between processes.
#[derive(Debug, Clone)]
pub struct JsonSheetStore {
    path: PathBuf,
    workbook: Arc<Mutex<Workbook>>,
}

impl JsonSheetStore {
    /// Open the workbook snapshot at `path`.
    ///
    /// If the file does not exist yet, a fresh workbook with a single empty
    /// sheet is created in memory and written on the first change.
    ///
    /// # Errors
    /// Returns an [Error::InvalidSnapshot] if the file exists but cannot be
    /// parsed as a workbook, or an [Error::StoreUnavailable] if the file
    /// cannot be read.
    pub fn open(path: &Path) -> Result<Self, Error> {
        let workbook = if path.exists() {
            let contents = fs::read_to_string(path)?;

            serde_json::from_str(&contents)
                .map_err(|error| Error::InvalidSnapshot(error.to_string()))?
        } else {
            Workbook::new()
        };

        Ok(Self {
            path: path.to_owned(),
            workbook: Arc::new(Mutex::new(workbook)),
        })
    }

    fn lock(&self) -> Result<MutexGuard<'_, Workbook>, Error> {
        self.workbook
            .lock()
            .inspect_err(|error| tracing::error!("could not acquire the workbook lock: {error}"))
            .map_err(|_| Error::WorkbookLockError)
    }

    fn persist(&self, workbook: &Workbook) -> Result<(), Error> {
        let contents = serde_json::to_string_pretty(workbook)?;

        fs::write(&self.path, contents)?;

        Ok(())
    }
}

#[async_trait]
impl SheetStore for JsonSheetStore {
    async fn sheet_names(&self) -> Result<Vec<String>, Error> {
        Ok(self.lock()?.sheet_names())
    }

    async fn create_sheet(&self, name: &str) -> Result<(), Error> {
        let mut workbook = self.lock()?;
        workbook.create_sheet(name)?;

        self.persist(&workbook)
    }

    async fn delete_sheet(&self, name: &str) -> Result<(), Error> {
        let mut workbook = self.lock()?;
        workbook.delete_sheet(name)?;

        self.persist(&workbook)
    }

    async fn read_rows(&self, name: &str) -> Result<Vec<Vec<String>>, Error> {
        self.lock()?.read_rows(name)
    }

    async fn append_row(&self, name: &str, row: Vec<String>) -> Result<(), Error> {
        let mut workbook = self.lock()?;
        workbook.append_row(name, row)?;

        self.persist(&workbook)
    }

    async fn update_range(
        &self,
        name: &str,
        start_row: usize,
        start_column: usize,
        values: Vec<Vec<String>>,
    ) -> Result<(), Error> {
        let mut workbook = self.lock()?;
        workbook.update_range(name, start_row, start_column, values)?;

        self.persist(&workbook)
    }

    async fn delete_rows(
        &self,
        name: &str,
        start_row: usize,
        end_row: usize,
    ) -> Result<(), Error> {
        let mut workbook = self.lock()?;
        workbook.delete_rows(name, start_row, end_row)?;

        self.persist(&workbook)
    }
}

#[cfg(test)]
mod json_sheet_store_tests {
    use std::{fs, path::PathBuf};

    use crate::{
        Error,
        store::{JsonSheetStore, SheetStore},
    };

    fn snapshot_path(test_name: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("kasbot-{test_name}-{}.json", std::process::id()));
        let _ = fs::remove_file(&path);

        path
    }

    #[tokio::test]
    async fn reopening_the_snapshot_restores_the_workbook() {
        let path = snapshot_path("reopen");

        {
            let store = JsonSheetStore::open(&path).expect("Could not open store.");
            store
                .create_sheet("Jan 2026")
                .await
                .expect("Could not create sheet.");
            store
                .append_row("Jan 2026", vec!["Tanggal".to_owned()])
                .await
                .expect("Could not append row.");
        }

        let reopened = JsonSheetStore::open(&path).expect("Could not reopen store.");

        assert_eq!(
            reopened
                .sheet_names()
                .await
                .expect("Could not list sheets."),
            ["Sheet1", "Jan 2026"]
        );
        assert_eq!(
            reopened
                .read_rows("Jan 2026")
                .await
                .expect("Could not read rows."),
            [["Tanggal"]]
        );

        let _ = fs::remove_file(&path);
    }

    #[tokio::test]
    async fn a_missing_file_opens_as_a_fresh_workbook() {
        let path = snapshot_path("fresh");

        let store = JsonSheetStore::open(&path).expect("Could not open store.");

        assert_eq!(
            store.sheet_names().await.expect("Could not list sheets."),
            ["Sheet1"]
        );
        // Nothing has changed, so nothing should have been written yet.
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn a_corrupt_snapshot_is_rejected() {
        let path = snapshot_path("corrupt");
        fs::write(&path, "not json").expect("Could not write snapshot.");

        let result = JsonSheetStore::open(&path);

        assert!(matches!(result, Err(Error::InvalidSnapshot(_))));

        let _ = fs::remove_file(&path);
    }
}
