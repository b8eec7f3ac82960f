//! Implements a struct that holds the state of the webhook server.

use std::{collections::HashMap, sync::Arc, time::Instant};

use tokio::sync::Mutex;

use crate::{ledger::Ledger, store::SheetStore};

/// The state of the webhook server.
#[derive(Debug, Clone)]
pub struct AppState<S>
where
    S: SheetStore,
{
    /// The ledger operations on top of the injected sheet store.
    pub ledger: Ledger<S>,

    /// The expected value of the `X-Telegram-Bot-Api-Secret-Token` header.
    ///
    /// When set, webhook requests without a matching header are rejected.
    pub secret_token: Option<String>,

    /// Reset confirmations awaiting `/reset KONFIRMASI`, one timestamp per
    /// user id.
    pub pending_resets: Arc<Mutex<HashMap<i64, Instant>>>,
}

impl<S> AppState<S>
where
    S: SheetStore,
{
    /// Create a new [AppState] on top of `store`.
    pub fn new(store: S, secret_token: Option<String>) -> Self {
        Self {
            ledger: Ledger::new(store),
            secret_token,
            pending_resets: Arc::new(Mutex::new(HashMap::new())),
        }
    }
}
