//! Builds the Indonesian reply texts and formats amounts as Rupiah.

use std::sync::OnceLock;

use numfmt::{Formatter, Precision};
use rust_decimal::{Decimal, prelude::ToPrimitive};

use crate::{
    ledger::{AppendReceipt, EditOutcome, EditedRecord, MonthlyReport},
    transaction::{Transaction, TransactionKind},
};

/// Indonesian month display names, January first.
const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// The display name of month number `month` (1 through 12).
pub fn month_name(month: u8) -> &'static str {
    MONTH_NAMES
        .get(usize::from(month.saturating_sub(1)))
        .copied()
        .unwrap_or("")
}

/// Format an amount as Rupiah: `Rp ` prefix, `.` thousands separators and a
/// `,` before any fractional digits, e.g. `Rp 1.234.567`.
pub fn format_rupiah(amount: Decimal) -> String {
    static POSITIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let positive_fmt = POSITIVE_FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .prefix("Rp ")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    static NEGATIVE_FMT: OnceLock<Formatter> = OnceLock::new();

    let negative_fmt = NEGATIVE_FMT.get_or_init(|| {
        Formatter::new()
            .separator('.')
            .unwrap()
            .prefix("Rp -")
            .unwrap()
            .precision(Precision::Decimals(0))
    });

    let whole = amount.trunc();
    let whole_value = whole.abs().to_f64().unwrap_or(0.0);

    // A zero whole part is hardcoded because numfmt renders zero without the
    // prefix.
    let mut formatted = if whole.is_zero() {
        if amount.is_sign_negative() {
            "Rp -0".to_owned()
        } else {
            "Rp 0".to_owned()
        }
    } else if amount.is_sign_negative() {
        negative_fmt.fmt_string(whole_value)
    } else {
        positive_fmt.fmt_string(whole_value)
    };

    let fraction = amount.fract().abs().normalize();

    if !fraction.is_zero() {
        if let Some(digits) = fraction.to_string().strip_prefix("0.") {
            formatted.push(',');
            formatted.push_str(digits);
        }
    }

    formatted
}

fn kind_emoji(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::In => "💵",
        TransactionKind::Out => "💸",
    }
}

fn kind_sign(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::In => "+",
        TransactionKind::Out => "-",
    }
}

/// The `/start` greeting.
pub fn start_reply(first_name: &str) -> String {
    let name = if first_name.is_empty() {
        "Kamu"
    } else {
        first_name
    };

    format!(
        "👋 Halo, {name}!\n\n\
        Saya adalah *Bot Pencatatan Keuangan* 💰\n\n\
        Saya akan membantu kamu mencatat pemasukan dan pengeluaran langsung ke sheet bulanan.\n\n\
        Ketik /help untuk melihat panduan penggunaan."
    )
}

/// The `/help` usage guide.
pub fn help_reply() -> String {
    "📖 *Panduan Penggunaan Bot*\n\n\
    💵 /masuk `<jumlah> <keterangan>`\n\
    💸 /keluar `<jumlah> <keterangan>`\n\
    📊 /laporan — Ringkasan bulan ini\n\
    📅 /bulan `<bulan> <tahun>` — Laporan bulan tertentu\n\
    📋 /riwayat — 10 transaksi terakhir\n\
    ✏️ /edit `<jumlah> <keterangan>` — Edit terakhir\n\
    🗑️ /hapus — Hapus transaksi terakhir\n\
    📈 /grafik — Grafik pemasukan vs pengeluaran\n\
    🔄 /reset — Hapus semua data\n\
    📦 /migrasi — Pindahkan data Sheet1 ke sheet bulanan\n\n\
    💡 *Tips:*\n\
    • Jumlah bisa pakai titik: `50.000` atau `50000`\n\
    • Bisa kirim beberapa perintah sekaligus (satu per baris)\n\
    • Contoh: `/keluar 50.000 Makan siang`"
        .to_owned()
}

fn record_example(kind: TransactionKind) -> &'static str {
    match kind {
        TransactionKind::In => "`/masuk 500000 Gaji bulanan`",
        TransactionKind::Out => "`/keluar 50000 Makan siang`",
    }
}

/// The warning for `/masuk` and `/keluar` without enough arguments.
pub fn record_usage_reply(kind: TransactionKind) -> String {
    let command = match kind {
        TransactionKind::In => "`/masuk <jumlah> <keterangan>`",
        TransactionKind::Out => "`/keluar <jumlah> <keterangan>`",
    };

    format!(
        "⚠️ Format salah!\n\nGunakan: {command}\nContoh: {}",
        record_example(kind)
    )
}

/// The warning for `/masuk` and `/keluar` with a bad amount.
pub fn record_amount_reply(kind: TransactionKind) -> String {
    format!(
        "⚠️ Jumlah harus berupa angka positif!\n\nContoh: {}",
        record_example(kind)
    )
}

/// The confirmation after a transaction is recorded.
pub fn record_success_reply(
    kind: TransactionKind,
    amount: Decimal,
    note: &str,
    receipt: &AppendReceipt,
) -> String {
    let (title, amount_emoji) = match kind {
        TransactionKind::In => ("Pemasukan", "💵"),
        TransactionKind::Out => ("Pengeluaran", "💸"),
    };

    format!(
        "✅ *{title} berhasil dicatat!*\n\n\
        📅 Tanggal: {date}\n\
        🕐 Waktu: {time} WIB\n\
        {amount_emoji} Jumlah: {amount}\n\
        📝 Keterangan: {note}\n\
        💰 Saldo: {balance}",
        date = receipt.date,
        time = receipt.time,
        amount = format_rupiah(amount),
        balance = format_rupiah(receipt.balance),
    )
}

/// The reply for a month with no transactions.
pub fn report_empty_reply(month: u8, year: i32) -> String {
    format!(
        "📊 Belum ada transaksi di bulan {} {year}.",
        month_name(month)
    )
}

/// The `/laporan` current-month report.
pub fn report_reply(month: u8, year: i32, report: &MonthlyReport) -> String {
    let balance_change = report.total_in - report.total_out;
    let trend = if balance_change >= Decimal::ZERO {
        "📈"
    } else {
        "📉"
    };

    format!(
        "📊 *Laporan Keuangan*\n\
        📅 {month} {year}\n\n\
        💵 Total Pemasukan: {total_in}\n\
        💸 Total Pengeluaran: {total_out}\n\
        {trend} Selisih Bulan Ini: {balance_change}\n\
        ━━━━━━━━━━━━━━━━━━\n\
        💰 *Saldo Saat Ini: {balance}*\n\n\
        📋 Total Transaksi: {count} transaksi",
        month = month_name(month),
        total_in = format_rupiah(report.total_in),
        total_out = format_rupiah(report.total_out),
        balance_change = format_rupiah(balance_change),
        balance = format_rupiah(report.balance),
        count = report.count,
    )
}

/// The warning for `/bulan` without enough arguments.
pub fn month_usage_reply() -> String {
    "⚠️ Format: `/bulan <bulan> <tahun>`\nContoh: `/bulan 1 2026` untuk Januari 2026".to_owned()
}

/// The warning for `/bulan` with an out-of-range month or year.
pub fn month_range_reply() -> String {
    "⚠️ Bulan harus 1-12 dan tahun harus valid!".to_owned()
}

/// The `/bulan` named-month report.
pub fn month_report_reply(month: u8, year: i32, report: &MonthlyReport) -> String {
    let balance_change = report.total_in - report.total_out;
    let trend = if balance_change >= Decimal::ZERO {
        "📈"
    } else {
        "📉"
    };

    format!(
        "📊 *Laporan Keuangan*\n\
        📅 {month} {year}\n\n\
        💵 Total Pemasukan: {total_in}\n\
        💸 Total Pengeluaran: {total_out}\n\
        {trend} Selisih: {balance_change}\n\n\
        📋 Total Transaksi: {count}",
        month = month_name(month),
        total_in = format_rupiah(report.total_in),
        total_out = format_rupiah(report.total_out),
        balance_change = format_rupiah(balance_change),
        count = report.count,
    )
}

/// The `/riwayat` reply for an empty ledger.
pub fn history_empty_reply() -> String {
    "📋 Belum ada transaksi yang tercatat.".to_owned()
}

/// The `/riwayat` list of recent transactions, oldest of the batch first.
pub fn history_reply(transactions: &[Transaction]) -> String {
    let mut message = "📋 *10 Transaksi Terakhir:*\n\n".to_owned();

    for (index, transaction) in transactions.iter().enumerate() {
        message.push_str(&format!(
            "{number}. {emoji} {date} {time}\n    {sign}{amount} — {note}\n    Saldo: {balance}\n\n",
            number = index + 1,
            emoji = kind_emoji(transaction.kind),
            date = transaction.date,
            time = transaction.time,
            sign = kind_sign(transaction.kind),
            amount = format_rupiah(transaction.amount),
            note = transaction.note,
            balance = format_rupiah(transaction.balance),
        ));
    }

    message
}

/// The `/hapus` reply when there is nothing to delete.
pub fn delete_empty_reply() -> String {
    "📋 Tidak ada transaksi yang bisa dihapus.".to_owned()
}

/// The confirmation after the latest transaction is deleted.
pub fn delete_success_reply(deleted: &Transaction, balance: Decimal) -> String {
    format!(
        "🗑️ *Transaksi terakhir berhasil dihapus!*\n\n\
        {emoji} {kind} {amount}\n\
        📝 {note}\n\
        📅 {date} {time}\n\n\
        💰 *Saldo: {balance}*",
        emoji = kind_emoji(deleted.kind),
        kind = deleted.kind.as_wire(),
        amount = format_rupiah(deleted.amount),
        note = deleted.note,
        date = deleted.date,
        time = deleted.time,
        balance = format_rupiah(balance),
    )
}

/// The warning for `/edit` without enough arguments.
pub fn edit_usage_reply() -> String {
    "⚠️ Format salah!\n\n\
    Gunakan: `/edit <jumlah_baru> <keterangan_baru>`\n\
    Contoh: `/edit 75000 Makan malam`"
        .to_owned()
}

/// The warning for `/edit` with a bad amount.
pub fn edit_amount_reply() -> String {
    "⚠️ Jumlah harus berupa angka positif!".to_owned()
}

/// The `/edit` reply when there is nothing to edit.
pub fn edit_empty_reply() -> String {
    "📋 Tidak ada transaksi yang bisa diedit.".to_owned()
}

fn edited_record_line(record: &EditedRecord) -> String {
    format!(
        "{kind} {amount} — {note}",
        kind = record.kind.as_wire(),
        amount = format_rupiah(record.amount),
        note = record.note,
    )
}

/// The before-and-after summary after the latest transaction is edited.
pub fn edit_success_reply(outcome: &EditOutcome) -> String {
    format!(
        "✏️ *Transaksi terakhir berhasil diedit!*\n\n\
        *Sebelum:*\n{old}\n\n\
        *Sesudah:*\n{new}\n\n\
        💰 *Saldo: {balance}*",
        old = edited_record_line(&outcome.old),
        new = edited_record_line(&outcome.new),
        balance = format_rupiah(outcome.new_balance),
    )
}

/// The `/grafik` reply when there is no data to chart.
pub fn chart_empty_reply() -> String {
    "📋 Belum ada data transaksi untuk dibuat grafik.".to_owned()
}

/// The caption on the `/grafik` photo.
pub fn chart_caption() -> String {
    "📈 Grafik Keuangan".to_owned()
}

/// The `/reset` warning asking for confirmation.
pub fn reset_warning_reply() -> String {
    "⚠️ *PERINGATAN!*\n\n\
    Perintah ini akan *menghapus SEMUA* data transaksi.\n\
    Aksi ini *tidak bisa dibatalkan*.\n\n\
    Jika yakin, ketik:\n\
    `/reset KONFIRMASI`\n\n\
    Konfirmasi berlaku 60 detik."
        .to_owned()
}

/// The reply to `/reset KONFIRMASI` without a pending confirmation.
pub fn reset_not_requested_reply() -> String {
    "⚠️ Ketik `/reset` dulu sebelum konfirmasi.".to_owned()
}

/// The confirmation after all data is wiped.
pub fn reset_success_reply(count: usize) -> String {
    format!(
        "🔄 *Reset berhasil!*\n\n{count} transaksi telah dihapus. Data dimulai dari awal."
    )
}

/// The confirmation after the legacy sheet is migrated.
pub fn migrate_success_reply() -> String {
    "✅ *Migrasi selesai!*\n\nData dari Sheet1 sudah dipindahkan ke sheet per bulan.".to_owned()
}

/// The `/migrasi` reply when there is nothing to migrate.
pub fn migrate_empty_reply() -> String {
    "ℹ️ Tidak ada data di Sheet1 untuk dimigrasi, atau Sheet1 tidak ditemukan.".to_owned()
}

/// One numbered line of the batch summary for a recorded entry.
pub fn batch_entry_line(number: usize, kind: TransactionKind, amount: Decimal, note: &str) -> String {
    format!(
        "{number}. {emoji} {kind} {amount} — {note}",
        emoji = kind_emoji(kind),
        kind = kind.as_wire(),
        amount = format_rupiah(amount),
    )
}

/// One numbered line of the batch summary for a malformed line.
pub fn batch_malformed_line(number: usize, line: &str) -> String {
    format!("{number}. ⚠️ Format salah: `{line}`")
}

/// One numbered line of the batch summary for a bad amount.
pub fn batch_bad_amount_line(number: usize, line: &str) -> String {
    format!("{number}. ⚠️ Jumlah tidak valid: `{line}`")
}

/// The combined batch summary.
pub fn batch_summary_reply(total: usize, lines: &[String], balance: Decimal) -> String {
    let mut message = format!("✅ *{total} transaksi berhasil dicatat!*\n\n");

    for line in lines {
        message.push_str(line);
        message.push('\n');
    }

    message.push_str(&format!("\n💰 *Saldo: {}*", format_rupiah(balance)));

    message
}

/// The reply to unrecognized input in private chats.
pub fn unknown_reply() -> String {
    "🤔 Perintah tidak dikenali.\n\nKetik /help untuk melihat daftar perintah yang tersedia."
        .to_owned()
}
