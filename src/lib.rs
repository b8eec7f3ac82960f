//! Kasbot is a Telegram bot for keeping a shared cash ledger.
//!
//! Transactions are stored in a spreadsheet-style workbook with one sheet per
//! calendar month, and every entry carries the running balance. The bot
//! answers each Telegram update directly in the webhook's HTTP response, so
//! no outbound Bot API calls are needed.

#![warn(missing_docs)]

use std::{net::SocketAddr, time::Duration};

use axum_server::Handle;
use rust_decimal::Decimal;
use tokio::signal;

mod app_state;
mod bot;
mod endpoints;
mod ledger;
mod logging;
mod routing;
mod sheet_name;
mod store;
mod telegram;
mod timezone;
mod transaction;

pub use app_state::AppState;
pub use ledger::{
    AppendReceipt, EditOutcome, EditUpdate, EditedRecord, Ledger, MonthFlow, MonthlyReport,
    NewTransaction,
};
pub use logging::{LOG_BODY_LENGTH_LIMIT, logging_middleware};
pub use routing::build_router;
pub use sheet_name::MonthSheet;
pub use store::{JsonSheetStore, MemorySheetStore, SheetStore};
pub use telegram::{Chat, Message, Update, User, WebhookReply};
pub use transaction::{Transaction, TransactionKind};

/// An async task that waits for either the ctrl+c or terminate signal, whichever comes first, and
/// then signals the server to shut down gracefully.
///
/// `handle` is a handle to an Axum `Server`.
pub async fn graceful_shutdown(handle: Handle<SocketAddr>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::debug!("Received ctrl+c signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
        _ = terminate => {
            tracing::debug!("Received terminate signal.");
            handle.graceful_shutdown(Some(Duration::from_secs(1)));
        },
    }
}

/// The errors that may occur in the application.
#[derive(Debug, thiserror::Error, PartialEq)]
pub enum Error {
    /// A transaction amount was zero or negative.
    #[error("the amount {0} is not a positive number")]
    InvalidAmount(Decimal),

    /// A stored row's direction column held something other than `MASUK` or
    /// `KELUAR`.
    #[error("the direction \"{0}\" is not MASUK or KELUAR")]
    UnrecognizedKind(String),

    /// The requested sheet does not exist in the workbook.
    #[error("the sheet \"{0}\" could not be found")]
    SheetNotFound(String),

    /// A sheet with the requested name already exists.
    #[error("the sheet \"{0}\" already exists")]
    SheetExists(String),

    /// A workbook keeps at least one sheet, so the last one cannot be
    /// deleted.
    #[error("cannot delete the only sheet in the workbook")]
    CannotDeleteOnlySheet,

    /// A row index or cell range fell outside the sheet.
    #[error("{0}")]
    InvalidRange(String),

    /// Could not acquire the workbook lock.
    ///
    /// This only happens after another thread panicked while holding the
    /// lock.
    #[error("could not acquire the workbook lock")]
    WorkbookLockError,

    /// The workbook snapshot file could not be read or written.
    #[error("the workbook snapshot is unavailable: {0}")]
    StoreUnavailable(String),

    /// The workbook snapshot file exists but could not be parsed.
    #[error("could not parse the workbook snapshot: {0}")]
    InvalidSnapshot(String),

    /// An error occurred while serializing a struct as JSON
    #[error("could not serialize as JSON: {0}")]
    JSONSerializationError(String),
}

impl From<std::io::Error> for Error {
    fn from(error: std::io::Error) -> Self {
        tracing::error!("an unexpected I/O error occurred: {error}");
        Error::StoreUnavailable(error.to_string())
    }
}

impl From<serde_json::Error> for Error {
    fn from(error: serde_json::Error) -> Self {
        Error::JSONSerializationError(error.to_string())
    }
}
