//! The core ledger operations: appending, editing and deleting entries, and
//! recalculating running balances.

use rust_decimal::Decimal;

use crate::{
    Error,
    sheet_name::MonthSheet,
    store::SheetStore,
    timezone::{format_date, format_time, now_in_wib},
    transaction::{
        COL_AMOUNT, COL_BALANCE, COL_KIND, HEADERS, Transaction, TransactionKind, cell,
        format_cell, parse_amount,
    },
};

/// A monthly-partitioned balance ledger on top of a [SheetStore].
///
/// The store is injected so the same ledger logic runs against the in-memory
/// store in tests and the persistent store in the server.
#[derive(Debug, Clone)]
pub struct Ledger<S> {
    pub(crate) store: S,
}

/// The details needed to record a new ledger entry.
#[derive(Debug, Clone, PartialEq)]
pub struct NewTransaction {
    /// The Telegram user ID recording the entry.
    pub user_id: i64,
    /// The display name recording the entry. An empty name is stored as `"-"`.
    pub username: String,
    /// Whether money came in or went out.
    pub kind: TransactionKind,
    /// The amount of money, which must be strictly positive.
    pub amount: Decimal,
    /// What the entry was for.
    pub note: String,
}

/// What [Ledger::append] wrote: the new running balance and the timestamp
/// stamped onto the entry.
#[derive(Debug, Clone, PartialEq)]
pub struct AppendReceipt {
    /// The running balance after the new entry.
    pub balance: Decimal,
    /// The entry date (`YYYY-MM-DD`, WIB).
    pub date: String,
    /// The entry time of day (`HH:MM:SS`, WIB).
    pub time: String,
}

/// The fields of the latest entry that [Ledger::edit_last] should change.
///
/// `None` keeps the stored value.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EditUpdate {
    /// The replacement direction.
    pub kind: Option<TransactionKind>,
    /// The replacement amount, which must be strictly positive.
    pub amount: Option<Decimal>,
    /// The replacement note.
    pub note: Option<String>,
}

/// The before and after images of an edited entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EditOutcome {
    /// The entry as it was stored.
    pub old: EditedRecord,
    /// The entry after the edit.
    pub new: EditedRecord,
    /// The running balance after recalculation.
    pub new_balance: Decimal,
}

/// The editable fields of an entry.
#[derive(Debug, Clone, PartialEq)]
pub struct EditedRecord {
    /// The entry direction.
    pub kind: TransactionKind,
    /// The entry amount.
    pub amount: Decimal,
    /// The entry note.
    pub note: String,
}

impl<S: SheetStore> Ledger<S> {
    /// Create a ledger on top of `store`.
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// The monthly sheets present in the store, oldest first.
    pub(crate) async fn monthly_sheets(&self) -> Result<Vec<MonthSheet>, Error> {
        let mut sheets: Vec<MonthSheet> = self
            .store
            .sheet_names()
            .await?
            .iter()
            .filter_map(|name| MonthSheet::parse(name))
            .collect();

        sheets.sort();

        Ok(sheets)
    }

    /// Creates the sheet for `sheet` with its header row, if it is missing.
    pub(crate) async fn ensure_sheet(&self, sheet: &MonthSheet) -> Result<(), Error> {
        let name = sheet.name();

        if self.store.sheet_names().await?.contains(&name) {
            return Ok(());
        }

        self.store.create_sheet(&name).await?;
        self.store
            .append_row(&name, HEADERS.map(str::to_owned).to_vec())
            .await?;

        tracing::info!("created ledger sheet {name:?}");

        Ok(())
    }

    /// Makes sure the current month's sheet exists, creating it with its
    /// header row if needed.
    pub async fn ensure_current_sheet(&self) -> Result<(), Error> {
        self.ensure_sheet(&MonthSheet::current()).await
    }

    /// Records a new entry in the current month's sheet and returns the new
    /// running balance along with the timestamp written to the entry.
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] if the amount is zero or negative.
    pub async fn append(&self, new_transaction: NewTransaction) -> Result<AppendReceipt, Error> {
        if new_transaction.amount <= Decimal::ZERO {
            return Err(Error::InvalidAmount(new_transaction.amount));
        }

        let sheet = MonthSheet::current();
        self.ensure_sheet(&sheet).await?;

        let balance = self.last_known_balance().await?
            + new_transaction.kind.signed(new_transaction.amount);

        let now = now_in_wib();
        let date = format_date(now);
        let time = format_time(now);

        let username = if new_transaction.username.is_empty() {
            "-".to_owned()
        } else {
            new_transaction.username
        };

        let row = vec![
            date.clone(),
            time.clone(),
            new_transaction.user_id.to_string(),
            username,
            new_transaction.kind.as_wire().to_owned(),
            format_cell(new_transaction.amount),
            new_transaction.note,
            format_cell(balance),
        ];
        self.store.append_row(&sheet.name(), row).await?;

        Ok(AppendReceipt {
            balance,
            date,
            time,
        })
    }

    /// The running balance after the newest entry in the ledger, taken from
    /// the most recent monthly sheet that has any entries.
    ///
    /// A ledger with no entries at all has a balance of zero.
    pub async fn last_known_balance(&self) -> Result<Decimal, Error> {
        let sheets = self.monthly_sheets().await?;

        for sheet in sheets.iter().rev() {
            if let Some(balance) = self.sheet_last_balance(sheet).await? {
                return Ok(balance);
            }
        }

        Ok(Decimal::ZERO)
    }

    /// The balance carried into `sheet` from earlier months: the ending
    /// balance of the latest earlier month with entries, or zero.
    pub(crate) async fn carry_in_before(&self, sheet: &MonthSheet) -> Result<Decimal, Error> {
        let sheets = self.monthly_sheets().await?;

        for earlier in sheets.iter().rev().filter(|earlier| *earlier < sheet) {
            if let Some(balance) = self.sheet_last_balance(earlier).await? {
                return Ok(balance);
            }
        }

        Ok(Decimal::ZERO)
    }

    async fn sheet_last_balance(&self, sheet: &MonthSheet) -> Result<Option<Decimal>, Error> {
        let rows = self.store.read_rows(&sheet.name()).await?;

        if rows.len() <= 1 {
            return Ok(None);
        }

        Ok(rows.last().map(|row| parse_amount(cell(row, COL_BALANCE))))
    }

    /// Removes the newest entry of the current month's sheet, recalculates
    /// the month's balances and returns the removed entry.
    ///
    /// Returns `None` when the current month has no entries, even if earlier
    /// months do.
    pub async fn delete_last(&self) -> Result<Option<Transaction>, Error> {
        let sheet = MonthSheet::current();
        let name = sheet.name();

        let rows = match self.store.read_rows(&name).await {
            Ok(rows) => rows,
            Err(Error::SheetNotFound(_)) => return Ok(None),
            Err(error) => return Err(error),
        };

        if rows.len() <= 1 {
            return Ok(None);
        }

        let deleted = Transaction::try_from_row(&rows[rows.len() - 1])?;

        self.store
            .delete_rows(&name, rows.len() - 1, rows.len())
            .await?;

        let carry_in = self.carry_in_before(&sheet).await?;
        self.recalculate(&sheet, carry_in).await?;

        Ok(Some(deleted))
    }

    /// Rewrites the editable fields of the current month's newest entry and
    /// recalculates the month's balances.
    ///
    /// Returns `None` when the current month has no entries.
    ///
    /// # Errors
    /// Returns an [Error::InvalidAmount] if a replacement amount is zero or
    /// negative.
    pub async fn edit_last(&self, update: EditUpdate) -> Result<Option<EditOutcome>, Error> {
        if let Some(amount) = update.amount {
            if amount <= Decimal::ZERO {
                return Err(Error::InvalidAmount(amount));
            }
        }

        let sheet = MonthSheet::current();
        let name = sheet.name();

        let rows = match self.store.read_rows(&name).await {
            Ok(rows) => rows,
            Err(Error::SheetNotFound(_)) => return Ok(None),
            Err(error) => return Err(error),
        };

        if rows.len() <= 1 {
            return Ok(None);
        }

        let last_row_index = rows.len() - 1;
        let old = Transaction::try_from_row(&rows[last_row_index])?;

        let kind = update.kind.unwrap_or(old.kind);
        let amount = update.amount.unwrap_or(old.amount);
        let note = update.note.unwrap_or_else(|| old.note.clone());

        self.store
            .update_range(
                &name,
                last_row_index,
                COL_KIND,
                vec![vec![
                    kind.as_wire().to_owned(),
                    format_cell(amount),
                    note.clone(),
                ]],
            )
            .await?;

        let carry_in = self.carry_in_before(&sheet).await?;
        let new_balance = self.recalculate(&sheet, carry_in).await?;

        Ok(Some(EditOutcome {
            old: EditedRecord {
                kind: old.kind,
                amount: old.amount,
                note: old.note,
            },
            new: EditedRecord { kind, amount, note },
            new_balance,
        }))
    }

    /// Recomputes the running balance column of `sheet`, folding entry
    /// amounts onto `carry_in`.
    ///
    /// Rows whose kind token is unrecognized contribute nothing to the fold.
    /// Returns the balance after the last row, or `carry_in` when the sheet
    /// has no data rows.
    pub async fn recalculate(
        &self,
        sheet: &MonthSheet,
        carry_in: Decimal,
    ) -> Result<Decimal, Error> {
        let name = sheet.name();
        let rows = self.store.read_rows(&name).await?;

        if rows.len() <= 1 {
            return Ok(carry_in);
        }

        let mut balance = carry_in;
        let mut balances = Vec::with_capacity(rows.len() - 1);

        for row in &rows[1..] {
            if let Some(kind) = TransactionKind::from_wire(cell(row, COL_KIND)) {
                balance += kind.signed(parse_amount(cell(row, COL_AMOUNT)));
            }

            balances.push(vec![format_cell(balance)]);
        }

        self.store
            .update_range(&name, 1, COL_BALANCE, balances)
            .await?;

        Ok(balance)
    }
}
