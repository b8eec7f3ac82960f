//! The storage seam between the ledger and its spreadsheet backend.
//!
//! Everything the ledger does is expressed through [SheetStore], a small set
//! of sheet-level operations modeled on a spreadsheet API. The crate bundles
//! two implementations: [MemorySheetStore] for tests and ephemeral use, and
//! [JsonSheetStore] which persists the workbook as a JSON snapshot.

mod json;
mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

pub use json::JsonSheetStore;
pub use memory::MemorySheetStore;

use crate::{Error, sheet_name::LEGACY_SHEET_NAME};

/// Handles reading and writing the sheets that back the ledger.
///
/// Row and column indices are zero based, and row ranges are half open:
/// deleting rows `1..3` removes the second and third rows of a sheet.
#[async_trait]
pub trait SheetStore: Send + Sync {
    /// List the names of all sheets in workbook order.
    async fn sheet_names(&self) -> Result<Vec<String>, Error>;

    /// Create a new, empty sheet named `name`.
    async fn create_sheet(&self, name: &str) -> Result<(), Error>;

    /// Delete the sheet named `name` along with all of its rows.
    ///
    /// A workbook always contains at least one sheet, so deleting the last
    /// remaining sheet is refused.
    async fn delete_sheet(&self, name: &str) -> Result<(), Error>;

    /// Read every row of the sheet named `name`.
    async fn read_rows(&self, name: &str) -> Result<Vec<Vec<String>>, Error>;

    /// Append `row` after the last row of the sheet named `name`.
    async fn append_row(&self, name: &str, row: Vec<String>) -> Result<(), Error>;

    /// Overwrite a rectangular block of cells whose top-left corner is at
    /// (`start_row`, `start_column`). Rows are widened with empty cells as
    /// needed, but the block must not extend past the last row.
    async fn update_range(
        &self,
        name: &str,
        start_row: usize,
        start_column: usize,
        values: Vec<Vec<String>>,
    ) -> Result<(), Error>;

    /// Delete the rows `start_row..end_row` from the sheet named `name`.
    async fn delete_rows(
        &self,
        name: &str,
        start_row: usize,
        end_row: usize,
    ) -> Result<(), Error>;
}

/// The in-memory form of a whole spreadsheet.
///
/// Both bundled stores operate on a `Workbook` behind a mutex; the JSON store
/// additionally writes it to disk after every change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub(crate) struct Workbook {
    sheets: Vec<Sheet>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
struct Sheet {
    name: String,
    rows: Vec<Vec<String>>,
}

impl Workbook {
    /// A fresh workbook holding a single empty sheet, like a newly created
    /// spreadsheet.
    pub(crate) fn new() -> Self {
        Self {
            sheets: vec![Sheet {
                name: LEGACY_SHEET_NAME.to_owned(),
                rows: Vec::new(),
            }],
        }
    }

    fn sheet(&self, name: &str) -> Result<&Sheet, Error> {
        self.sheets
            .iter()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_owned()))
    }

    fn sheet_mut(&mut self, name: &str) -> Result<&mut Sheet, Error> {
        self.sheets
            .iter_mut()
            .find(|sheet| sheet.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_owned()))
    }

    pub(crate) fn sheet_names(&self) -> Vec<String> {
        self.sheets.iter().map(|sheet| sheet.name.clone()).collect()
    }

    pub(crate) fn create_sheet(&mut self, name: &str) -> Result<(), Error> {
        if self.sheets.iter().any(|sheet| sheet.name == name) {
            return Err(Error::SheetExists(name.to_owned()));
        }

        self.sheets.push(Sheet {
            name: name.to_owned(),
            rows: Vec::new(),
        });

        Ok(())
    }

    pub(crate) fn delete_sheet(&mut self, name: &str) -> Result<(), Error> {
        let index = self
            .sheets
            .iter()
            .position(|sheet| sheet.name == name)
            .ok_or_else(|| Error::SheetNotFound(name.to_owned()))?;

        if self.sheets.len() == 1 {
            return Err(Error::CannotDeleteOnlySheet);
        }

        self.sheets.remove(index);

        Ok(())
    }

    pub(crate) fn read_rows(&self, name: &str) -> Result<Vec<Vec<String>>, Error> {
        Ok(self.sheet(name)?.rows.clone())
    }

    pub(crate) fn append_row(&mut self, name: &str, row: Vec<String>) -> Result<(), Error> {
        self.sheet_mut(name)?.rows.push(row);

        Ok(())
    }

    pub(crate) fn update_range(
        &mut self,
        name: &str,
        start_row: usize,
        start_column: usize,
        values: Vec<Vec<String>>,
    ) -> Result<(), Error> {
        let sheet = self.sheet_mut(name)?;
        let end_row = start_row + values.len();

        if end_row > sheet.rows.len() {
            return Err(Error::InvalidRange(format!(
                "rows {start_row}..{end_row} exceed sheet \"{name}\" with {} rows",
                sheet.rows.len()
            )));
        }

        for (row_offset, new_cells) in values.into_iter().enumerate() {
            let row = &mut sheet.rows[start_row + row_offset];
            let width = start_column + new_cells.len();

            if row.len() < width {
                row.resize(width, String::new());
            }

            for (column_offset, value) in new_cells.into_iter().enumerate() {
                row[start_column + column_offset] = value;
            }
        }

        Ok(())
    }

    pub(crate) fn delete_rows(
        &mut self,
        name: &str,
        start_row: usize,
        end_row: usize,
    ) -> Result<(), Error> {
        let sheet = self.sheet_mut(name)?;

        if start_row >= end_row || end_row > sheet.rows.len() {
            return Err(Error::InvalidRange(format!(
                "cannot delete rows {start_row}..{end_row} from sheet \"{name}\" with {} rows",
                sheet.rows.len()
            )));
        }

        sheet.rows.drain(start_row..end_row);

        Ok(())
    }
}
