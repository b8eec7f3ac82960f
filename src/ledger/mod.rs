//! The monthly-partitioned ledger.
//!
//! Entries live in one sheet per calendar month and every row stores the
//! running balance at the time it was written. Write operations always target
//! the current month in Western Indonesian Time; read operations span all
//! monthly sheets.

mod admin;
mod core;
mod reports;

pub use core::{AppendReceipt, EditOutcome, EditUpdate, EditedRecord, Ledger, NewTransaction};
pub use reports::{MonthFlow, MonthlyReport};
