use chrono::{Datelike, NaiveDate};

use super::TimePeriod;

/// Lenient date parsing for item dates coming off the wire: full dates in
/// dash or slash form, or a bare year (taken as January 1).
pub(crate) fn parse_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(d);
    }
    if let Ok(d) = NaiveDate::parse_from_str(raw, "%Y/%m/%d") {
        return Some(d);
    }
    if raw.len() == 4 && raw.chars().all(|c| c.is_ascii_digit()) {
        return NaiveDate::from_ymd_opt(raw.parse().ok()?, 1, 1);
    }
    None
}

/// Decides whether an item's date falls inside the active time window.
///
/// `All` matches everything, including items with no date. Every other
/// period rejects items whose date is absent or unparseable. Both window
/// ends are inclusive.
pub fn in_range(
    raw: Option<&str>,
    period: TimePeriod,
    custom_start: Option<NaiveDate>,
    custom_end: Option<NaiveDate>,
    today: NaiveDate,
) -> bool {
    if period == TimePeriod::All {
        return true;
    }
    let date = match raw.and_then(parse_date) {
        Some(d) => d,
        None => return false,
    };
    let (start, end) = match period {
        TimePeriod::All => return true,
        TimePeriod::Ytd => (NaiveDate::from_ymd_opt(today.year(), 1, 1), Some(today)),
        TimePeriod::LastMonth => (Some(months_back(today, 1)), Some(today)),
        TimePeriod::Last3Months => (Some(months_back(today, 3)), Some(today)),
        TimePeriod::Last6Months => (Some(months_back(today, 6)), Some(today)),
        TimePeriod::Last12Months => (Some(months_back(today, 12)), Some(today)),
        TimePeriod::Custom => (custom_start, custom_end),
    };
    start.is_none_or(|s| date >= s) && end.is_none_or(|e| date <= e)
}

/// Calendar-month subtraction with year rollover; the day is clamped to the
/// length of the target month (Mar 31 minus one month is Feb 28/29).
pub(crate) fn months_back(date: NaiveDate, months: u32) -> NaiveDate {
    let total = date.year() * 12 + date.month0() as i32 - months as i32;
    let year = total.div_euclid(12);
    let month = total.rem_euclid(12) as u32 + 1;
    let day = date.day().min(days_in_month(year, month));
    NaiveDate::from_ymd_opt(year, month, day).unwrap_or(NaiveDate::MIN)
}

fn days_in_month(year: i32, month: u32) -> u32 {
    let (next_year, next_month) = if month == 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    };
    NaiveDate::from_ymd_opt(next_year, next_month, 1)
        .and_then(|d| d.pred_opt())
        .map(|d| d.day())
        .unwrap_or(28)
}
