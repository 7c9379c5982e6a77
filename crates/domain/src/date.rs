// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Calendar operations on proleptic Gregorian dates.

use crate::error::DomainError;
pub use time::Date;
use time::Month;

/// Builds a date from a year/month/day triple.
///
/// # Errors
///
/// Returns `DomainError::InvalidDate` if the triple does not name a real
/// calendar date.
pub fn make_date(year: u16, month: u16, day: u16) -> Result<Date, DomainError> {
    let invalid = || DomainError::InvalidDate { year, month, day };

    let month_of_year = u8::try_from(month)
        .ok()
        .and_then(|number| Month::try_from(number).ok())
        .ok_or_else(invalid)?;
    let day_of_month = u8::try_from(day).map_err(|_| invalid())?;

    Date::from_calendar_date(i32::from(year), month_of_year, day_of_month)
        .map_err(|_| invalid())
}

/// Returns the signed number of days from `from` to `to`.
#[must_use]
pub fn days_between(from: Date, to: Date) -> i64 {
    i64::from(to.to_julian_day()) - i64::from(from.to_julian_day())
}

/// Advances a date by a number of calendar months, clamping to the last
/// day of the target month when needed (January 31 plus one month is
/// February 28 or 29).
///
/// Returns `None` when the resulting date falls outside the representable
/// calendar range.
#[must_use]
pub fn add_months(date: Date, months: u32) -> Option<Date> {
    let month_total =
        i64::from(date.year()) * 12 + i64::from(u8::from(date.month())) - 1 + i64::from(months);

    let year = i32::try_from(month_total.div_euclid(12)).ok()?;
    let month_number = u8::try_from(month_total.rem_euclid(12) + 1).ok()?;
    let month = Month::try_from(month_number).ok()?;

    let day = date.day().min(time::util::days_in_year_month(year, month));
    Date::from_calendar_date(year, month, day).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::date;

    #[test]
    fn test_make_date_accepts_real_dates() {
        assert_eq!(make_date(2016, 10, 31).unwrap(), date!(2016 - 10 - 31));
        assert_eq!(make_date(2016, 2, 29).unwrap(), date!(2016 - 02 - 29));
        assert_eq!(make_date(1400, 1, 1).unwrap(), date!(1400 - 01 - 01));
    }

    #[test]
    fn test_make_date_rejects_impossible_dates() {
        for (year, month, day) in [
            (2015, 2, 29),
            (2016, 13, 1),
            (2016, 0, 1),
            (2016, 1, 0),
            (2016, 4, 31),
            (20000, 1, 1),
            (2016, 1, 400),
        ] {
            assert!(
                matches!(
                    make_date(year, month, day),
                    Err(DomainError::InvalidDate { .. })
                ),
                "{year}-{month}-{day} should be rejected"
            );
        }
    }

    #[test]
    fn test_days_between_is_signed() {
        let start = date!(2016 - 10 - 31);
        let end = date!(2017 - 01 - 01);

        assert_eq!(days_between(start, end), 62);
        assert_eq!(days_between(end, start), -62);
        assert_eq!(days_between(start, start), 0);
    }

    #[test]
    fn test_days_between_spans_leap_years() {
        assert_eq!(days_between(date!(2016 - 01 - 01), date!(2017 - 01 - 01)), 366);
        assert_eq!(days_between(date!(2015 - 01 - 01), date!(2016 - 01 - 01)), 365);
        assert_eq!(
            days_between(date!(2000 - 01 - 01), date!(3000 - 01 - 01)),
            365_243
        );
    }

    #[test]
    fn test_add_months_walks_the_calendar() {
        assert_eq!(add_months(date!(2017 - 01 - 01), 0), Some(date!(2017 - 01 - 01)));
        assert_eq!(add_months(date!(2017 - 01 - 01), 6), Some(date!(2017 - 07 - 01)));
        assert_eq!(add_months(date!(2017 - 01 - 01), 12), Some(date!(2018 - 01 - 01)));
        assert_eq!(add_months(date!(2017 - 11 - 15), 3), Some(date!(2018 - 02 - 15)));
    }

    #[test]
    fn test_add_months_clamps_to_month_end() {
        assert_eq!(add_months(date!(2017 - 01 - 31), 1), Some(date!(2017 - 02 - 28)));
        assert_eq!(add_months(date!(2016 - 01 - 31), 1), Some(date!(2016 - 02 - 29)));
        assert_eq!(add_months(date!(2016 - 10 - 31), 13), Some(date!(2017 - 11 - 30)));
    }

    #[test]
    fn test_add_months_reports_overflow() {
        assert_eq!(add_months(date!(9999 - 12 - 01), 1), None);
        assert_eq!(add_months(date!(2017 - 01 - 01), u32::MAX), None);
    }
}
