//! Destructive ledger maintenance: wiping all data and migrating the legacy
//! single-sheet layout into monthly sheets.

use std::collections::BTreeMap;

use crate::{
    Error,
    ledger::Ledger,
    sheet_name::{LEGACY_SHEET_NAME, MonthSheet},
    store::SheetStore,
    transaction::{COL_DATE, cell},
};

/// The placeholder sheet created while every other sheet is being deleted. A
/// workbook must always keep at least one sheet.
const SCRATCH_SHEET_NAME: &str = "__temp__";

impl<S: SheetStore> Ledger<S> {
    /// Deletes every monthly sheet and returns how many entries were removed.
    ///
    /// When the monthly sheets are the only sheets in the workbook, a scratch
    /// sheet is created first so the workbook never becomes empty. The
    /// scratch sheet is removed again afterwards; if it ends up as the only
    /// sheet it stays behind until data is recorded again.
    pub async fn reset_all(&self) -> Result<usize, Error> {
        let monthly = self.monthly_sheets().await?;

        if monthly.is_empty() {
            return Ok(0);
        }

        let all_names = self.store.sheet_names().await?;
        let needs_scratch = all_names
            .iter()
            .all(|name| MonthSheet::parse(name).is_some());

        if needs_scratch {
            self.store.create_sheet(SCRATCH_SHEET_NAME).await?;
        }

        let mut removed = 0;

        for name in &all_names {
            if MonthSheet::parse(name).is_none() {
                continue;
            }

            removed += self.store.read_rows(name).await?.len().saturating_sub(1);
            self.store.delete_sheet(name).await?;
        }

        if needs_scratch {
            match self.store.delete_sheet(SCRATCH_SHEET_NAME).await {
                Ok(()) => {}
                Err(Error::CannotDeleteOnlySheet) => {
                    tracing::debug!("keeping the scratch sheet as the only remaining sheet");
                }
                Err(error) => return Err(error),
            }
        }

        tracing::info!("reset removed {removed} ledger entries");

        Ok(removed)
    }

    /// Moves every dated row out of the legacy `Sheet1` into monthly sheets,
    /// then deletes `Sheet1`.
    ///
    /// Rows are grouped by the month in their date cell and appended, as
    /// stored, to the matching monthly sheet, creating it on demand. The
    /// affected months are processed oldest first and each month's balances
    /// are recalculated, so the balance carried from one migrated month into
    /// the next is already final when it is read. Rows with an empty date
    /// cell are dropped; rows whose date cannot be read are dropped with a
    /// warning.
    ///
    /// Returns `false` without changing anything when there is no `Sheet1`,
    /// when it holds no data rows, or when none of its rows have a usable
    /// date.
    pub async fn migrate_legacy(&self) -> Result<bool, Error> {
        let all_names = self.store.sheet_names().await?;

        if !all_names.iter().any(|name| name == LEGACY_SHEET_NAME) {
            return Ok(false);
        }

        let rows = self.store.read_rows(LEGACY_SHEET_NAME).await?;

        if rows.len() <= 1 {
            return Ok(false);
        }

        let mut groups: BTreeMap<MonthSheet, Vec<Vec<String>>> = BTreeMap::new();

        for row in &rows[1..] {
            let date = cell(row, COL_DATE);

            if date.is_empty() {
                continue;
            }

            match MonthSheet::from_date_cell(date) {
                Some(sheet) => groups.entry(sheet).or_default().push(row.clone()),
                None => tracing::warn!("dropping legacy row with unreadable date {date:?}"),
            }
        }

        if groups.is_empty() {
            return Ok(false);
        }

        let migrated_sheet_count = groups.len();

        for (sheet, group_rows) in groups {
            self.ensure_sheet(&sheet).await?;

            let name = sheet.name();
            for row in group_rows {
                self.store.append_row(&name, row).await?;
            }

            let carry_in = self.carry_in_before(&sheet).await?;
            self.recalculate(&sheet, carry_in).await?;
        }

        self.store.delete_sheet(LEGACY_SHEET_NAME).await?;

        tracing::info!("migrated legacy rows into {migrated_sheet_count} monthly sheets");

        Ok(true)
    }
}
