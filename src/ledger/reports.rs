//! Read-side queries over the ledger: monthly totals, recent history, and the
//! per-month flows behind the chart.

use rust_decimal::Decimal;

use crate::{
    Error,
    ledger::Ledger,
    sheet_name::MonthSheet,
    store::SheetStore,
    transaction::{COL_AMOUNT, COL_BALANCE, COL_KIND, Transaction, TransactionKind, cell,
        parse_amount},
};

/// Totals for a single month of the ledger.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MonthlyReport {
    /// Total money in.
    pub total_in: Decimal,
    /// Total money out.
    pub total_out: Decimal,
    /// The running balance after the month's last entry.
    pub balance: Decimal,
    /// How many entries the month holds.
    pub count: usize,
}

/// One month's totals for the income versus spending chart.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthFlow {
    /// The sheet name for the month, e.g. `"Mei 2026"`.
    pub label: String,
    /// Total money in.
    pub total_in: Decimal,
    /// Total money out.
    pub total_out: Decimal,
}

impl<S: SheetStore> Ledger<S> {
    /// Totals for `sheet`'s month.
    ///
    /// A month whose sheet is missing or holds no entries reports all zeros.
    pub async fn monthly_report(&self, sheet: &MonthSheet) -> Result<MonthlyReport, Error> {
        let rows = match self.store.read_rows(&sheet.name()).await {
            Ok(rows) => rows,
            Err(Error::SheetNotFound(_)) => return Ok(MonthlyReport::default()),
            Err(error) => return Err(error),
        };

        if rows.len() <= 1 {
            return Ok(MonthlyReport::default());
        }

        let (total_in, total_out) = sum_flows(&rows[1..]);
        let balance = rows
            .last()
            .map(|row| parse_amount(cell(row, COL_BALANCE)))
            .unwrap_or_default();

        Ok(MonthlyReport {
            total_in,
            total_out,
            balance,
            count: rows.len() - 1,
        })
    }

    /// The latest `count` entries across all months, oldest first.
    ///
    /// Monthly sheets are read from the newest backwards until enough entries
    /// have been collected. Rows that cannot be decoded are skipped with a
    /// warning.
    pub async fn recent_transactions(&self, count: usize) -> Result<Vec<Transaction>, Error> {
        let sheets = self.monthly_sheets().await?;
        let mut collected: Vec<Transaction> = Vec::new();

        for sheet in sheets.iter().rev() {
            if collected.len() >= count {
                break;
            }

            let mut batch = self.decode_sheet(sheet).await?;
            batch.append(&mut collected);
            collected = batch;
        }

        let keep_from = collected.len().saturating_sub(count);

        Ok(collected.split_off(keep_from))
    }

    /// Every entry in the ledger, oldest first.
    pub async fn all_transactions(&self) -> Result<Vec<Transaction>, Error> {
        let sheets = self.monthly_sheets().await?;
        let mut all = Vec::new();

        for sheet in &sheets {
            all.extend(self.decode_sheet(sheet).await?);
        }

        Ok(all)
    }

    /// Per-month in and out totals for every monthly sheet, oldest first.
    ///
    /// Months whose sheet exists but holds no entries are included with zero
    /// totals so the chart shows them as gaps rather than dropping them.
    pub async fn monthly_breakdown(&self) -> Result<Vec<MonthFlow>, Error> {
        let sheets = self.monthly_sheets().await?;
        let mut flows = Vec::with_capacity(sheets.len());

        for sheet in &sheets {
            let rows = self.store.read_rows(&sheet.name()).await?;
            let (total_in, total_out) = if rows.len() > 1 {
                sum_flows(&rows[1..])
            } else {
                (Decimal::ZERO, Decimal::ZERO)
            };

            flows.push(MonthFlow {
                label: sheet.name(),
                total_in,
                total_out,
            });
        }

        Ok(flows)
    }

    async fn decode_sheet(&self, sheet: &MonthSheet) -> Result<Vec<Transaction>, Error> {
        let name = sheet.name();
        let rows = self.store.read_rows(&name).await?;

        if rows.len() <= 1 {
            return Ok(Vec::new());
        }

        let transactions = rows[1..]
            .iter()
            .filter_map(|row| match Transaction::try_from_row(row) {
                Ok(transaction) => Some(transaction),
                Err(error) => {
                    tracing::warn!("skipping undecodable row in sheet {name:?}: {error}");
                    None
                }
            })
            .collect();

        Ok(transactions)
    }
}

fn sum_flows(rows: &[Vec<String>]) -> (Decimal, Decimal) {
    let mut total_in = Decimal::ZERO;
    let mut total_out = Decimal::ZERO;

    for row in rows {
        let amount = parse_amount(cell(row, COL_AMOUNT));

        match TransactionKind::from_wire(cell(row, COL_KIND)) {
            Some(TransactionKind::In) => total_in += amount,
            Some(TransactionKind::Out) => total_out += amount,
            None => {}
        }
    }

    (total_in, total_out)
}
