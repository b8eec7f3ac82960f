//! The webhook route handlers.
//!
//! Telegram delivers each update as an HTTP POST and accepts the reply as the
//! response body, so one round trip both receives the message and answers it.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
};
use serde_json::json;

use crate::{
    AppState,
    bot::handler::handle_message,
    store::SheetStore,
    telegram::{SECRET_TOKEN_HEADER, Update},
};

/// Handle one Telegram update.
///
/// When the update warrants a reply, the reply is returned as the response
/// body for Telegram to execute. Everything else is acknowledged with
/// `{"ok": true}` so Telegram does not redeliver the update.
pub async fn post_webhook<S>(
    State(state): State<AppState<S>>,
    headers: HeaderMap,
    Json(update): Json<Update>,
) -> Response
where
    S: SheetStore,
{
    if let Some(expected) = &state.secret_token {
        let presented = headers
            .get(SECRET_TOKEN_HEADER)
            .and_then(|value| value.to_str().ok());

        if presented != Some(expected.as_str()) {
            return (StatusCode::UNAUTHORIZED, "Unauthorized").into_response();
        }
    }

    let reply = match &update.message {
        Some(message) => handle_message(&state, message).await,
        None => None,
    };

    match reply {
        Some(reply) => Json(reply).into_response(),
        None => Json(json!({ "ok": true })).into_response(),
    }
}

/// Report that the bot is up, for browsers poking the webhook URL.
pub async fn get_status() -> Response {
    Json(json!({ "status": "Bot is running! 🤖" })).into_response()
}
