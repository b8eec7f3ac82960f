//! Maps incoming chat messages onto ledger operations and builds the reply
//! for each one.
//!
//! Every ledger failure is logged and answered with an apology in the chat
//! rather than surfaced as an HTTP error, so the bot never leaves a command
//! without a reply.

use std::time::{Duration, Instant};

use rust_decimal::Decimal;

use crate::{
    AppState,
    bot::{
        chart::build_chart_url,
        command::{self, BatchLine, Command, CommandError},
        format,
    },
    ledger::{EditUpdate, NewTransaction},
    sheet_name::MonthSheet,
    store::SheetStore,
    telegram::{Message, WebhookReply},
    transaction::TransactionKind,
};

/// How long a `/reset` stays confirmable before the warning must be repeated.
const RESET_CONFIRMATION_WINDOW: Duration = Duration::from_secs(60);

const RECORD_IN_ERROR: &str =
    "❌ Terjadi kesalahan saat mencatat pemasukan. Silakan coba lagi nanti.";
const RECORD_OUT_ERROR: &str =
    "❌ Terjadi kesalahan saat mencatat pengeluaran. Silakan coba lagi nanti.";
const REPORT_ERROR: &str = "❌ Terjadi kesalahan saat mengambil laporan. Silakan coba lagi nanti.";
const MONTH_REPORT_ERROR: &str = "❌ Terjadi kesalahan saat mengambil laporan.";
const HISTORY_ERROR: &str = "❌ Terjadi kesalahan saat mengambil riwayat. Silakan coba lagi nanti.";
const DELETE_ERROR: &str = "❌ Terjadi kesalahan saat menghapus transaksi. Silakan coba lagi nanti.";
const EDIT_ERROR: &str = "❌ Terjadi kesalahan saat mengedit transaksi. Silakan coba lagi nanti.";
const CHART_ERROR: &str = "❌ Terjadi kesalahan saat membuat grafik.";
const RESET_ERROR: &str = "❌ Terjadi kesalahan saat reset data.";
const BATCH_ERROR: &str = "❌ Terjadi kesalahan saat mencatat transaksi batch. Silakan coba lagi.";

/// Handle one incoming message and build the reply to send, if any.
///
/// Returns `None` for messages without text and for unrecognized text outside
/// private chats, so the bot stays quiet in group small talk.
pub async fn handle_message<S>(state: &AppState<S>, message: &Message) -> Option<WebhookReply>
where
    S: SheetStore,
{
    let text = message.text.as_deref()?;
    let chat_id = message.chat.id;

    if let Some(lines) = command::parse_batch(text) {
        return Some(handle_batch(state, message, lines).await);
    }

    match command::parse_command(text) {
        Some(Ok(command)) => Some(dispatch(state, message, command).await),
        Some(Err(error)) => Some(argument_error_reply(chat_id, &error)),
        None if message.chat.kind == "private" => {
            Some(WebhookReply::message(chat_id, format::unknown_reply()))
        }
        None => None,
    }
}

/// The sender's ID and display name, preferring the handle over the first
/// name. Messages without a sender fall back to ID zero and a blank name.
fn sender(message: &Message) -> (i64, String) {
    match &message.from {
        Some(user) => (
            user.id,
            user.username
                .clone()
                .unwrap_or_else(|| user.first_name.clone()),
        ),
        None => (0, String::new()),
    }
}

async fn dispatch<S>(state: &AppState<S>, message: &Message, command: Command) -> WebhookReply
where
    S: SheetStore,
{
    let chat_id = message.chat.id;

    match command {
        Command::Start => {
            let first_name = message
                .from
                .as_ref()
                .map(|user| user.first_name.as_str())
                .unwrap_or_default();
            WebhookReply::markdown(chat_id, format::start_reply(first_name))
        }
        Command::Help => WebhookReply::markdown(chat_id, format::help_reply()),
        Command::Record { kind, amount, note } => record(state, message, kind, amount, note).await,
        Command::Report => report(state, chat_id).await,
        Command::MonthReport { year, month } => month_report(state, chat_id, year, month).await,
        Command::History => history(state, chat_id).await,
        Command::DeleteLast => delete_last(state, chat_id).await,
        Command::EditLast { amount, note } => edit_last(state, chat_id, amount, note).await,
        Command::Chart => chart(state, chat_id).await,
        Command::Reset => reset_warning(state, message).await,
        Command::ResetConfirm => reset_confirm(state, message).await,
        Command::Migrate => migrate(state, chat_id).await,
    }
}

fn argument_error_reply(chat_id: i64, error: &CommandError) -> WebhookReply {
    match error {
        CommandError::RecordUsage(kind) => {
            WebhookReply::markdown(chat_id, format::record_usage_reply(*kind))
        }
        CommandError::RecordAmount(kind) => {
            WebhookReply::markdown(chat_id, format::record_amount_reply(*kind))
        }
        CommandError::EditUsage => WebhookReply::markdown(chat_id, format::edit_usage_reply()),
        CommandError::EditAmount => WebhookReply::markdown(chat_id, format::edit_amount_reply()),
        CommandError::MonthUsage => WebhookReply::markdown(chat_id, format::month_usage_reply()),
        CommandError::MonthRange => WebhookReply::message(chat_id, format::month_range_reply()),
    }
}

async fn record<S>(
    state: &AppState<S>,
    message: &Message,
    kind: TransactionKind,
    amount: Decimal,
    note: String,
) -> WebhookReply
where
    S: SheetStore,
{
    let chat_id = message.chat.id;
    let (user_id, username) = sender(message);

    let new_transaction = NewTransaction {
        user_id,
        username,
        kind,
        amount,
        note: note.clone(),
    };

    match state.ledger.append(new_transaction).await {
        Ok(receipt) => WebhookReply::markdown(
            chat_id,
            format::record_success_reply(kind, amount, &note, &receipt),
        ),
        Err(error) => {
            tracing::error!("could not record the transaction: {error}");

            let text = match kind {
                TransactionKind::In => RECORD_IN_ERROR,
                TransactionKind::Out => RECORD_OUT_ERROR,
            };

            WebhookReply::message(chat_id, text)
        }
    }
}

async fn report<S>(state: &AppState<S>, chat_id: i64) -> WebhookReply
where
    S: SheetStore,
{
    let current = MonthSheet::current();

    match state.ledger.monthly_report(&current).await {
        Ok(report) if report.count == 0 => WebhookReply::message(
            chat_id,
            format::report_empty_reply(current.month(), current.year()),
        ),
        Ok(report) => WebhookReply::markdown(
            chat_id,
            format::report_reply(current.month(), current.year(), &report),
        ),
        Err(error) => {
            tracing::error!("could not build the monthly report: {error}");
            WebhookReply::message(chat_id, REPORT_ERROR)
        }
    }
}

async fn month_report<S>(state: &AppState<S>, chat_id: i64, year: i32, month: u8) -> WebhookReply
where
    S: SheetStore,
{
    let Some(sheet) = MonthSheet::new(year, month) else {
        return WebhookReply::message(chat_id, format::month_range_reply());
    };

    match state.ledger.monthly_report(&sheet).await {
        Ok(report) if report.count == 0 => {
            WebhookReply::message(chat_id, format::report_empty_reply(month, year))
        }
        Ok(report) => {
            WebhookReply::markdown(chat_id, format::month_report_reply(month, year, &report))
        }
        Err(error) => {
            tracing::error!("could not build the monthly report: {error}");
            WebhookReply::message(chat_id, MONTH_REPORT_ERROR)
        }
    }
}

async fn history<S>(state: &AppState<S>, chat_id: i64) -> WebhookReply
where
    S: SheetStore,
{
    match state.ledger.recent_transactions(10).await {
        Ok(transactions) if transactions.is_empty() => {
            WebhookReply::message(chat_id, format::history_empty_reply())
        }
        Ok(transactions) => WebhookReply::markdown(chat_id, format::history_reply(&transactions)),
        Err(error) => {
            tracing::error!("could not read the transaction history: {error}");
            WebhookReply::message(chat_id, HISTORY_ERROR)
        }
    }
}

async fn delete_last<S>(state: &AppState<S>, chat_id: i64) -> WebhookReply
where
    S: SheetStore,
{
    let deleted = match state.ledger.delete_last().await {
        Ok(Some(deleted)) => deleted,
        Ok(None) => return WebhookReply::message(chat_id, format::delete_empty_reply()),
        Err(error) => {
            tracing::error!("could not delete the latest transaction: {error}");
            return WebhookReply::message(chat_id, DELETE_ERROR);
        }
    };

    match state.ledger.last_known_balance().await {
        Ok(balance) => {
            WebhookReply::markdown(chat_id, format::delete_success_reply(&deleted, balance))
        }
        Err(error) => {
            tracing::error!("could not read the balance after deleting: {error}");
            WebhookReply::message(chat_id, DELETE_ERROR)
        }
    }
}

async fn edit_last<S>(
    state: &AppState<S>,
    chat_id: i64,
    amount: Decimal,
    note: String,
) -> WebhookReply
where
    S: SheetStore,
{
    let update = EditUpdate {
        kind: None,
        amount: Some(amount),
        note: Some(note),
    };

    match state.ledger.edit_last(update).await {
        Ok(Some(outcome)) => WebhookReply::markdown(chat_id, format::edit_success_reply(&outcome)),
        Ok(None) => WebhookReply::message(chat_id, format::edit_empty_reply()),
        Err(error) => {
            tracing::error!("could not edit the latest transaction: {error}");
            WebhookReply::message(chat_id, EDIT_ERROR)
        }
    }
}

async fn chart<S>(state: &AppState<S>, chat_id: i64) -> WebhookReply
where
    S: SheetStore,
{
    match state.ledger.monthly_breakdown().await {
        Ok(months) if months.is_empty() => {
            WebhookReply::message(chat_id, format::chart_empty_reply())
        }
        Ok(months) => {
            WebhookReply::photo(chat_id, build_chart_url(&months), format::chart_caption())
        }
        Err(error) => {
            tracing::error!("could not build the chart data: {error}");
            WebhookReply::message(chat_id, CHART_ERROR)
        }
    }
}

async fn reset_warning<S>(state: &AppState<S>, message: &Message) -> WebhookReply
where
    S: SheetStore,
{
    let (user_id, _) = sender(message);

    let mut pending = state.pending_resets.lock().await;
    // Sweep expired warnings so the map only holds confirmable entries.
    pending.retain(|_, requested_at| requested_at.elapsed() <= RESET_CONFIRMATION_WINDOW);
    pending.insert(user_id, Instant::now());

    WebhookReply::markdown(message.chat.id, format::reset_warning_reply())
}

async fn reset_confirm<S>(state: &AppState<S>, message: &Message) -> WebhookReply
where
    S: SheetStore,
{
    let chat_id = message.chat.id;
    let (user_id, _) = sender(message);

    // The pending entry is consumed up front so a failed reset cannot be
    // retried without a fresh warning.
    let requested = state
        .pending_resets
        .lock()
        .await
        .remove(&user_id)
        .is_some_and(|requested_at| requested_at.elapsed() <= RESET_CONFIRMATION_WINDOW);

    if !requested {
        return WebhookReply::markdown(chat_id, format::reset_not_requested_reply());
    }

    match state.ledger.reset_all().await {
        Ok(count) => WebhookReply::markdown(chat_id, format::reset_success_reply(count)),
        Err(error) => {
            tracing::error!("could not reset the ledger: {error}");
            WebhookReply::message(chat_id, RESET_ERROR)
        }
    }
}

async fn migrate<S>(state: &AppState<S>, chat_id: i64) -> WebhookReply
where
    S: SheetStore,
{
    match state.ledger.migrate_legacy().await {
        Ok(true) => WebhookReply::markdown(chat_id, format::migrate_success_reply()),
        Ok(false) => WebhookReply::message(chat_id, format::migrate_empty_reply()),
        Err(error) => {
            tracing::error!("could not migrate the legacy sheet: {error}");
            WebhookReply::message(chat_id, format!("❌ Terjadi kesalahan saat migrasi: {error}"))
        }
    }
}

/// Record every well-formed line of a batch message and summarize the lot.
///
/// Malformed lines are reported inside the summary instead of aborting the
/// batch. A ledger failure aborts with a plain error, leaving the lines
/// recorded so far in place.
async fn handle_batch<S>(
    state: &AppState<S>,
    message: &Message,
    lines: Vec<BatchLine>,
) -> WebhookReply
where
    S: SheetStore,
{
    let chat_id = message.chat.id;
    let (user_id, username) = sender(message);
    let total = lines.len();
    let mut summary_lines = Vec::with_capacity(total);

    for (index, line) in lines.into_iter().enumerate() {
        let number = index + 1;

        match line {
            BatchLine::Malformed(line) => {
                summary_lines.push(format::batch_malformed_line(number, &line));
            }
            BatchLine::BadAmount(line) => {
                summary_lines.push(format::batch_bad_amount_line(number, &line));
            }
            BatchLine::Entry { kind, amount, note } => {
                let new_transaction = NewTransaction {
                    user_id,
                    username: username.clone(),
                    kind,
                    amount,
                    note: note.clone(),
                };

                if let Err(error) = state.ledger.append(new_transaction).await {
                    tracing::error!("could not record a batch transaction: {error}");
                    return WebhookReply::message(chat_id, BATCH_ERROR);
                }

                summary_lines.push(format::batch_entry_line(number, kind, amount, &note));
            }
        }
    }

    match state.ledger.last_known_balance().await {
        Ok(balance) => WebhookReply::markdown(
            chat_id,
            format::batch_summary_reply(total, &summary_lines, balance),
        ),
        Err(error) => {
            tracing::error!("could not read the balance after the batch: {error}");
            WebhookReply::message(chat_id, BATCH_ERROR)
        }
    }
}

#[cfg(test)]
mod handler_tests {
    use std::time::{Duration, Instant};

    use crate::{
        AppState,
        bot::{format, handler::handle_message},
        sheet_name::MonthSheet,
        store::MemorySheetStore,
        telegram::{Chat, Message, User, WebhookReply},
    };

    fn test_state() -> AppState<MemorySheetStore> {
        AppState::new(MemorySheetStore::default(), None)
    }

    fn message_in(chat_kind: &str, text: &str) -> Message {
        Message {
            message_id: 1,
            from: Some(User {
                id: 12345,
                username: Some("budi".to_owned()),
                first_name: "Budi".to_owned(),
            }),
            chat: Chat {
                id: 12345,
                kind: chat_kind.to_owned(),
            },
            text: Some(text.to_owned()),
        }
    }

    fn private_message(text: &str) -> Message {
        message_in("private", text)
    }

    fn text_of(reply: Option<WebhookReply>) -> (String, Option<String>) {
        match reply {
            Some(WebhookReply::SendMessage {
                text, parse_mode, ..
            }) => (text, parse_mode),
            other => panic!("Expected a text reply, got {other:?}."),
        }
    }

    #[tokio::test]
    async fn messages_without_text_get_no_reply() {
        let state = test_state();
        let mut message = private_message("/help");
        message.text = None;

        let reply = handle_message(&state, &message).await;

        assert_eq!(reply, None);
    }

    #[tokio::test]
    async fn unknown_text_gets_a_hint_only_in_private_chats() {
        let state = test_state();

        let reply = handle_message(&state, &private_message("halo bot")).await;
        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("🤔 Perintah tidak dikenali."));
        assert_eq!(parse_mode, None);

        let reply = handle_message(&state, &message_in("group", "halo bot")).await;
        assert_eq!(reply, None);
    }

    #[tokio::test]
    async fn recording_income_confirms_with_the_new_balance() {
        let state = test_state();

        let reply =
            handle_message(&state, &private_message("/masuk 500.000 Gaji bulanan")).await;

        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("✅ *Pemasukan berhasil dicatat!*"));
        assert!(text.contains("📝 Keterangan: Gaji bulanan"));
        assert!(text.ends_with("💰 Saldo: Rp 500.000"));
        assert_eq!(parse_mode.as_deref(), Some("Markdown"));
    }

    #[tokio::test]
    async fn recording_without_arguments_explains_the_format() {
        let state = test_state();

        let reply = handle_message(&state, &private_message("/keluar")).await;

        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("⚠️ Format salah!"));
        assert!(text.contains("`/keluar <jumlah> <keterangan>`"));
        assert_eq!(parse_mode.as_deref(), Some("Markdown"));
    }

    #[tokio::test]
    async fn the_current_month_report_reflects_recorded_transactions() {
        let state = test_state();
        handle_message(&state, &private_message("/masuk 500000 Gaji")).await;
        handle_message(&state, &private_message("/keluar 50000 Makan")).await;

        let reply = handle_message(&state, &private_message("/laporan")).await;

        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("📊 *Laporan Keuangan*"));
        assert!(text.contains("💵 Total Pemasukan: Rp 500.000"));
        assert!(text.contains("💸 Total Pengeluaran: Rp 50.000"));
        assert!(text.contains("💰 *Saldo Saat Ini: Rp 450.000*"));
        assert_eq!(parse_mode.as_deref(), Some("Markdown"));
    }

    #[tokio::test]
    async fn an_empty_month_reports_that_nothing_was_recorded() {
        let state = test_state();
        let current = MonthSheet::current();

        let reply = handle_message(&state, &private_message("/laporan")).await;

        let (text, parse_mode) = text_of(reply);
        assert_eq!(
            text,
            format::report_empty_reply(current.month(), current.year())
        );
        assert_eq!(parse_mode, None);
    }

    #[tokio::test]
    async fn a_month_outside_the_calendar_is_rejected() {
        let state = test_state();

        let reply = handle_message(&state, &private_message("/bulan 13 2026")).await;

        let (text, parse_mode) = text_of(reply);
        assert_eq!(text, "⚠️ Bulan harus 1-12 dan tahun harus valid!");
        assert_eq!(parse_mode, None);
    }

    #[tokio::test]
    async fn deleting_from_an_empty_ledger_reports_nothing_to_delete() {
        let state = test_state();

        let reply = handle_message(&state, &private_message("/hapus")).await;

        let (text, _) = text_of(reply);
        assert_eq!(text, "📋 Tidak ada transaksi yang bisa dihapus.");
    }

    #[tokio::test]
    async fn deleting_the_latest_transaction_restores_the_balance() {
        let state = test_state();
        handle_message(&state, &private_message("/masuk 500000 Gaji")).await;
        handle_message(&state, &private_message("/keluar 50000 Makan")).await;

        let reply = handle_message(&state, &private_message("/hapus")).await;

        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("🗑️ *Transaksi terakhir berhasil dihapus!*"));
        assert!(text.contains("Rp 50.000"));
        assert!(text.ends_with("💰 *Saldo: Rp 500.000*"));
        assert_eq!(parse_mode.as_deref(), Some("Markdown"));
    }

    #[tokio::test]
    async fn editing_the_latest_transaction_shows_before_and_after() {
        let state = test_state();
        handle_message(&state, &private_message("/keluar 50000 Makan")).await;

        let reply = handle_message(&state, &private_message("/edit 75.000 Makan malam")).await;

        let (text, _) = text_of(reply);
        assert!(text.starts_with("✏️ *Transaksi terakhir berhasil diedit!*"));
        assert!(text.contains("*Sebelum:*\nKELUAR Rp 50.000 — Makan"));
        assert!(text.contains("*Sesudah:*\nKELUAR Rp 75.000 — Makan malam"));
        assert!(text.ends_with("💰 *Saldo: Rp -75.000*"));
    }

    #[tokio::test]
    async fn the_history_lists_recent_transactions() {
        let state = test_state();
        handle_message(&state, &private_message("/masuk 500000 Gaji")).await;

        let reply = handle_message(&state, &private_message("/riwayat")).await;

        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("📋 *10 Transaksi Terakhir:*"));
        assert!(text.contains("1. 💵 "));
        assert!(text.contains("+Rp 500.000 — Gaji"));
        assert!(text.contains("Saldo: Rp 500.000"));
        assert_eq!(parse_mode.as_deref(), Some("Markdown"));
    }

    #[tokio::test]
    async fn resetting_needs_a_warning_before_the_confirmation() {
        let state = test_state();
        handle_message(&state, &private_message("/masuk 500000 Gaji")).await;

        let reply = handle_message(&state, &private_message("/reset KONFIRMASI")).await;
        let (text, _) = text_of(reply);
        assert_eq!(text, "⚠️ Ketik `/reset` dulu sebelum konfirmasi.");

        let reply = handle_message(&state, &private_message("/reset")).await;
        let (text, _) = text_of(reply);
        assert!(text.starts_with("⚠️ *PERINGATAN!*"));

        let reply = handle_message(&state, &private_message("/reset KONFIRMASI")).await;
        let (text, _) = text_of(reply);
        assert!(text.starts_with("🔄 *Reset berhasil!*"));
        assert!(text.contains("1 transaksi telah dihapus."));
    }

    #[tokio::test]
    async fn a_confirmation_consumes_the_pending_reset() {
        let state = test_state();
        handle_message(&state, &private_message("/reset")).await;
        handle_message(&state, &private_message("/reset KONFIRMASI")).await;

        let reply = handle_message(&state, &private_message("/reset KONFIRMASI")).await;

        let (text, _) = text_of(reply);
        assert_eq!(text, "⚠️ Ketik `/reset` dulu sebelum konfirmasi.");
    }

    #[tokio::test]
    async fn a_confirmation_after_the_window_lapses_is_rejected() {
        let state = test_state();
        handle_message(&state, &private_message("/masuk 500000 Gaji")).await;
        handle_message(&state, &private_message("/reset")).await;

        // Backdate the warning to just past the confirmation window.
        let stale = Instant::now()
            .checked_sub(Duration::from_secs(61))
            .expect("Could not backdate the warning.");
        state.pending_resets.lock().await.insert(12345, stale);

        let reply = handle_message(&state, &private_message("/reset KONFIRMASI")).await;
        let (text, _) = text_of(reply);
        assert_eq!(text, "⚠️ Ketik `/reset` dulu sebelum konfirmasi.");

        let reply = handle_message(&state, &private_message("/laporan")).await;
        let (text, _) = text_of(reply);
        assert!(text.contains("📋 Total Transaksi: 1 transaksi"));
    }

    #[tokio::test]
    async fn a_new_warning_sweeps_expired_entries_of_other_users() {
        let state = test_state();
        let stale = Instant::now()
            .checked_sub(Duration::from_secs(61))
            .expect("Could not backdate the warning.");
        state.pending_resets.lock().await.insert(99999, stale);

        handle_message(&state, &private_message("/reset")).await;

        let pending = state.pending_resets.lock().await;
        assert!(!pending.contains_key(&99999));
        assert!(pending.contains_key(&12345));
    }

    #[tokio::test]
    async fn a_batch_message_records_every_line_and_summarizes() {
        let state = test_state();

        let reply = handle_message(
            &state,
            &private_message("/masuk 500000 Gaji\n/keluar 50000 Makan siang\n/keluar abc Typo"),
        )
        .await;

        let (text, parse_mode) = text_of(reply);
        assert!(text.starts_with("✅ *3 transaksi berhasil dicatat!*"));
        assert!(text.contains("1. 💵 MASUK Rp 500.000 — Gaji"));
        assert!(text.contains("2. 💸 KELUAR Rp 50.000 — Makan siang"));
        assert!(text.contains("3. ⚠️ Jumlah tidak valid: `/keluar abc Typo`"));
        assert!(text.ends_with("💰 *Saldo: Rp 450.000*"));
        assert_eq!(parse_mode.as_deref(), Some("Markdown"));
    }

    #[tokio::test]
    async fn a_chart_request_with_data_sends_a_photo() {
        let state = test_state();

        let reply = handle_message(&state, &private_message("/grafik")).await;
        let (text, _) = text_of(reply);
        assert_eq!(text, "📋 Belum ada data transaksi untuk dibuat grafik.");

        handle_message(&state, &private_message("/masuk 500000 Gaji")).await;

        let reply = handle_message(&state, &private_message("/grafik")).await;
        let Some(WebhookReply::SendPhoto { photo, caption, .. }) = reply else {
            panic!("Expected a photo reply.");
        };
        assert!(photo.starts_with("https://quickchart.io/chart?c="));
        assert_eq!(caption, "📈 Grafik Keuangan");
    }

    #[tokio::test]
    async fn migrating_an_empty_legacy_sheet_reports_nothing_to_do() {
        let state = test_state();

        let reply = handle_message(&state, &private_message("/migrasi")).await;

        let (text, parse_mode) = text_of(reply);
        assert_eq!(
            text,
            "ℹ️ Tidak ada data di Sheet1 untuk dimigrasi, atau Sheet1 tidak ditemukan."
        );
        assert_eq!(parse_mode, None);
    }

    #[tokio::test]
    async fn a_group_chat_still_accepts_commands() {
        let state = test_state();

        let reply = handle_message(&state, &message_in("group", "/masuk 10.000 Kas")).await;

        let (text, _) = text_of(reply);
        assert!(text.starts_with("✅ *Pemasukan berhasil dicatat!*"));
    }

    #[tokio::test]
    async fn recording_income_stamps_the_recalculated_running_balance() {
        let state = test_state();
        handle_message(&state, &private_message("/keluar 50000 Makan")).await;

        let reply = handle_message(&state, &private_message("/masuk 200000 Transfer")).await;

        let (text, _) = text_of(reply);
        assert!(text.ends_with("💰 Saldo: Rp 150.000"));
    }
}
