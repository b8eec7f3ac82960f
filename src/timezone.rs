//! A fixed-offset clock for Western Indonesian Time (WIB, UTC+7), the timezone
//! every ledger entry is stamped in.

use time::{
    OffsetDateTime, UtcOffset,
    format_description::BorrowedFormatItem,
    macros::{format_description, offset},
};

/// The UTC offset for Western Indonesian Time.
pub const WIB: UtcOffset = offset!(+7);

const DATE_FORMAT: &[BorrowedFormatItem] = format_description!("[year]-[month]-[day]");
const TIME_FORMAT: &[BorrowedFormatItem] = format_description!("[hour]:[minute]:[second]");

/// Returns the current date and time in Western Indonesian Time.
pub fn now_in_wib() -> OffsetDateTime {
    OffsetDateTime::now_utc().to_offset(WIB)
}

/// Formats `datetime` as a `YYYY-MM-DD` date string.
pub fn format_date(datetime: OffsetDateTime) -> String {
    datetime
        .format(DATE_FORMAT)
        .unwrap_or_else(|_| datetime.date().to_string())
}

/// Formats `datetime` as a `HH:MM:SS` time of day string.
pub fn format_time(datetime: OffsetDateTime) -> String {
    datetime
        .format(TIME_FORMAT)
        .unwrap_or_else(|_| datetime.time().to_string())
}
