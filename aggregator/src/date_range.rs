use chrono::{Days, NaiveDate, Utc};
use trendsense_core::DateRange;

/// Window ending today (UTC) and starting `days_back` days earlier.
pub fn resolve_quick_range(days_back: u32) -> DateRange {
    resolve_quick_range_from(Utc::now().date_naive(), days_back)
}

/// Window ending on `today` and starting `days_back` days earlier.
///
/// Date arithmetic only; saturates at [`NaiveDate::MIN`].
pub fn resolve_quick_range_from(today: NaiveDate, days_back: u32) -> DateRange {
    let start = today
        .checked_sub_days(Days::new(u64::from(days_back)))
        .unwrap_or(NaiveDate::MIN);
    DateRange { start, end: today }
}

/// The window a records query falls back to when it names neither bound.
pub fn default_range(today: NaiveDate, days: u32) -> DateRange {
    resolve_quick_range_from(today, days)
}
