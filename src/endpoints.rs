//! The API endpoint URIs.

/// The route Telegram delivers updates to. A GET serves a liveness check.
pub const WEBHOOK: &str = "/api/webhook";
