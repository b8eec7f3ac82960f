//! The Telegram-facing half of the bot.
//!
//! Incoming updates are parsed into commands, dispatched onto the ledger,
//! and answered with Indonesian-language replies in the same webhook
//! response. All chat-facing strings live in the format module so the
//! handlers stay free of copy.

mod chart;
mod command;
mod format;
mod handler;
mod webhook;

pub use webhook::{get_status, post_webhook};
