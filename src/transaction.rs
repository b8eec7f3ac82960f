//! The record model for ledger entries and the 8-column row layout they are
//! stored in.

use rust_decimal::Decimal;

use crate::Error;

/// The header row written as the first row of every ledger sheet.
pub const HEADERS: [&str; 8] = [
    "Tanggal",
    "Waktu",
    "User ID",
    "Username",
    "Tipe",
    "Jumlah",
    "Keterangan",
    "Saldo Kumulatif",
];

/// Column index of the entry date (`YYYY-MM-DD`).
pub const COL_DATE: usize = 0;
/// Column index of the entry time of day (`HH:MM:SS`).
pub const COL_TIME: usize = 1;
/// Column index of the Telegram user ID that recorded the entry.
pub const COL_USER_ID: usize = 2;
/// Column index of the display name that recorded the entry.
pub const COL_USERNAME: usize = 3;
/// Column index of the kind token (`MASUK` or `KELUAR`).
pub const COL_KIND: usize = 4;
/// Column index of the entry amount.
pub const COL_AMOUNT: usize = 5;
/// Column index of the free-text note.
pub const COL_NOTE: usize = 6;
/// Column index of the running balance.
pub const COL_BALANCE: usize = 7;

/// Whether an entry adds money to the ledger or takes money out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransactionKind {
    /// Money in, stored as `MASUK`.
    In,
    /// Money out, stored as `KELUAR`.
    Out,
}

impl TransactionKind {
    /// The uppercase token stored in the kind column.
    pub fn as_wire(&self) -> &'static str {
        match self {
            TransactionKind::In => "MASUK",
            TransactionKind::Out => "KELUAR",
        }
    }

    /// Parses a stored kind token. Unknown tokens yield `None`.
    pub fn from_wire(token: &str) -> Option<Self> {
        match token {
            "MASUK" => Some(TransactionKind::In),
            "KELUAR" => Some(TransactionKind::Out),
            _ => None,
        }
    }

    /// The amount's contribution to the running balance: positive for money
    /// in, negative for money out.
    pub fn signed(&self, amount: Decimal) -> Decimal {
        match self {
            TransactionKind::In => amount,
            TransactionKind::Out => -amount,
        }
    }
}

/// One recorded ledger entry, decoded from a sheet row.
#[derive(Debug, Clone, PartialEq)]
pub struct Transaction {
    /// The entry date as stored in the sheet, normally `YYYY-MM-DD`.
    pub date: String,
    /// The entry time of day as stored in the sheet.
    pub time: String,
    /// The Telegram user ID that recorded the entry.
    pub user_id: String,
    /// The display name that recorded the entry.
    pub username: String,
    /// Whether the entry is money in or money out.
    pub kind: TransactionKind,
    /// The entry amount. Always positive, the direction lives in `kind`.
    pub amount: Decimal,
    /// The free-text note describing the entry.
    pub note: String,
    /// The running balance immediately after this entry.
    pub balance: Decimal,
}

impl Transaction {
    /// Decodes a data row from a ledger sheet.
    ///
    /// Missing text cells fall back to a `"-"` placeholder and amount cells
    /// are parsed leniently, since the sheets this reads may have been edited
    /// by hand. An unrecognized kind token is the one thing that cannot be
    /// glossed over because the entry's direction would be unknown.
    pub fn try_from_row(row: &[String]) -> Result<Self, Error> {
        let kind_token = cell(row, COL_KIND);
        let kind = TransactionKind::from_wire(kind_token)
            .ok_or_else(|| Error::UnrecognizedKind(kind_token.to_owned()))?;

        Ok(Self {
            date: text_cell(row, COL_DATE),
            time: text_cell(row, COL_TIME),
            user_id: text_cell(row, COL_USER_ID),
            username: text_cell(row, COL_USERNAME),
            kind,
            amount: parse_amount(cell(row, COL_AMOUNT)),
            note: text_cell(row, COL_NOTE),
            balance: parse_amount(cell(row, COL_BALANCE)),
        })
    }
}

pub(crate) fn cell(row: &[String], index: usize) -> &str {
    row.get(index).map(String::as_str).unwrap_or("")
}

fn text_cell(row: &[String], index: usize) -> String {
    let value = cell(row, index);

    if value.is_empty() {
        "-".to_owned()
    } else {
        value.to_owned()
    }
}

/// Parses an amount cell, tolerating currency formatting such as
/// `"Rp 10.000,50"`.
///
/// The letters `R` and `p`, whitespace and thousands dots are stripped, then
/// the first comma becomes the decimal point. Cells that still fail to parse
/// count as zero.
pub fn parse_amount(cell: &str) -> Decimal {
    let stripped: String = cell
        .chars()
        .filter(|c| !matches!(c, 'R' | 'p' | '.') && !c.is_whitespace())
        .collect();

    stripped
        .replacen(',', ".", 1)
        .parse()
        .unwrap_or(Decimal::ZERO)
}

/// Formats an amount for storage in a sheet cell.
///
/// Fractional values get a comma decimal separator so that [parse_amount]
/// reads them back exactly instead of treating the point as a thousands dot.
pub(crate) fn format_cell(value: Decimal) -> String {
    value.normalize().to_string().replace('.', ",")
}
