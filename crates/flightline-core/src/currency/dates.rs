//! Calendar arithmetic shared by every qualification type.

use chrono::{Datelike, NaiveDate};

/// Add `months` calendar months to a date under the FAA "end of the Nth
/// month" convention: the result is the last day of the month that is
/// `months` + 1 months after the input's month.
///
/// Implemented by truncation (advance to day 1 of the following month, then
/// step back one day), never by day counting, so an input on the 31st lands
/// on the last valid day of the target month.
///
/// Returns `None` only if the result falls outside chrono's representable
/// range.
pub fn month_end_add(date: NaiveDate, months: u32) -> Option<NaiveDate> {
    let total = i64::from(date.year()) * 12 + i64::from(date.month0()) + i64::from(months) + 1;
    let year = i32::try_from(total.div_euclid(12)).ok()?;
    let month = total.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).and_then(|d| d.pred_opt())
}

/// Age in whole years as of `on`, given a birth date.
///
/// Subtracts one from the naive year difference when the birthday has not
/// yet been reached in the target year.
pub fn age_at(on: NaiveDate, birth: NaiveDate) -> i32 {
    let mut age = on.year() - birth.year();
    if (on.month(), on.day()) < (birth.month(), birth.day()) {
        age -= 1;
    }
    age
}

// ============================================================================
// Tests
// ============================================================================
