//! The naming scheme for monthly ledger partitions.
//!
//! Each month's records live in their own sheet named with an Indonesian month
//! abbreviation and a four digit year, e.g. `"Mei 2026"` for May 2026. Sheets
//! whose names do not follow the scheme are never touched by ledger operations.

use time::OffsetDateTime;

use crate::timezone::now_in_wib;

/// The sheet name the legacy single-sheet layout kept all records in.
pub const LEGACY_SHEET_NAME: &str = "Sheet1";

/// Indonesian month abbreviations, indexed by zero-based month number.
const MONTH_ABBREVIATIONS: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "Mei", "Jun", "Jul", "Agu", "Sep", "Okt", "Nov", "Des",
];

/// Identifies one monthly partition of the ledger.
///
/// The ordering is chronological, so a sorted list of `MonthSheet`s runs from
/// the oldest month to the newest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MonthSheet {
    year: i32,
    /// One-based month number (1 = January).
    month: u8,
}

impl MonthSheet {
    /// Creates the partition ID for `month` of `year`.
    ///
    /// Returns `None` when `month` is outside `1..=12`.
    pub fn new(year: i32, month: u8) -> Option<Self> {
        (1..=12).contains(&month).then_some(Self { year, month })
    }

    /// The partition for the month containing `datetime`.
    pub fn containing(datetime: OffsetDateTime) -> Self {
        Self {
            year: datetime.year(),
            month: datetime.month() as u8,
        }
    }

    /// The partition for the current month in Western Indonesian Time.
    pub fn current() -> Self {
        Self::containing(now_in_wib())
    }

    /// Parses a sheet name such as `"Mei 2026"`.
    ///
    /// Returns `None` for anything that is not exactly a known month
    /// abbreviation followed by a four digit year, which leaves unrelated
    /// sheets (`"Sheet1"`, scratch sheets) alone.
    pub fn parse(name: &str) -> Option<Self> {
        let mut tokens = name.split(' ');
        let abbreviation = tokens.next()?;
        let year_token = tokens.next()?;

        if tokens.next().is_some()
            || year_token.len() != 4
            || !year_token.chars().all(|c| c.is_ascii_digit())
        {
            return None;
        }

        let month_index = MONTH_ABBREVIATIONS
            .iter()
            .position(|&abbreviation_for_month| abbreviation_for_month == abbreviation)?;
        let year = year_token.parse().ok()?;

        Some(Self {
            year,
            month: month_index as u8 + 1,
        })
    }

    /// Extracts the partition from a `YYYY-MM-DD` date cell.
    ///
    /// Used to sort legacy rows into monthly sheets. Returns `None` when the
    /// cell does not start with a numeric year and a valid month.
    pub fn from_date_cell(date: &str) -> Option<Self> {
        let mut parts = date.split('-');
        let year = parts.next()?.parse().ok()?;
        let month = parts.next()?.parse().ok()?;

        Self::new(year, month)
    }

    /// The sheet name for this partition, e.g. `"Mei 2026"`.
    pub fn name(&self) -> String {
        format!(
            "{} {}",
            MONTH_ABBREVIATIONS[(self.month - 1) as usize],
            self.year
        )
    }

    /// The calendar year of this partition.
    pub fn year(&self) -> i32 {
        self.year
    }

    /// The one-based month number of this partition.
    pub fn month(&self) -> u8 {
        self.month
    }
}

#[cfg(test)]
mod month_sheet_tests {
    use time::macros::datetime;

    use crate::sheet_name::MonthSheet;

    #[test]
    fn parses_sheet_names_with_known_abbreviations() {
        let sheet = MonthSheet::parse("Mei 2026").expect("Could not parse sheet name.");

        assert_eq!(sheet.year(), 2026);
        assert_eq!(sheet.month(), 5);
        assert_eq!(sheet.name(), "Mei 2026");
    }

    #[test]
    fn rejects_names_that_are_not_monthly_sheets() {
        let invalid_names = [
            "Sheet1",
            "__temp__",
            "Mei",
            "Mei 2026 draft",
            "May 2026",
            "Mei 26",
            "Mei 20261",
            "Mei -026",
            "Catatan",
        ];

        for name in invalid_names {
            assert_eq!(MonthSheet::parse(name), None, "accepted {name:?}");
        }
    }

    #[test]
    fn orders_sheets_chronologically() {
        let mut sheets = [
            MonthSheet::parse("Des 2025").unwrap(),
            MonthSheet::parse("Feb 2026").unwrap(),
            MonthSheet::parse("Jan 2026").unwrap(),
        ];

        sheets.sort();

        let names: Vec<String> = sheets.iter().map(MonthSheet::name).collect();
        assert_eq!(names, ["Des 2025", "Jan 2026", "Feb 2026"]);
    }

    #[test]
    fn derives_sheet_from_datetime() {
        let sheet = MonthSheet::containing(datetime!(2026-08-22 10:00 +7));

        assert_eq!(sheet.name(), "Agu 2026");
    }

    #[test]
    fn extracts_sheet_from_date_cell() {
        assert_eq!(
            MonthSheet::from_date_cell("2026-05-17"),
            MonthSheet::new(2026, 5)
        );
        assert_eq!(MonthSheet::from_date_cell(""), None);
        assert_eq!(MonthSheet::from_date_cell("17/05/2026"), None);
        assert_eq!(MonthSheet::from_date_cell("2026-13-01"), None);
        assert_eq!(MonthSheet::from_date_cell("2026-00-01"), None);
    }

    #[test]
    fn rejects_out_of_range_months() {
        assert_eq!(MonthSheet::new(2026, 0), None);
        assert_eq!(MonthSheet::new(2026, 13), None);
        assert!(MonthSheet::new(2026, 12).is_some());
    }
}
