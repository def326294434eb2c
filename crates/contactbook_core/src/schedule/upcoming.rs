//! Upcoming-birthday query.
//!
//! # Responsibility
//! - Roll a stored birthday forward to its next anniversary.
//! - Move weekend anniversaries to the following Monday.
//! - Keep contacts whose observed date is 0..=7 days away.
//!
//! # Invariants
//! - Output follows the order of the input records.
//! - Feb 29 birthdays are observed on Feb 28 in non-leap years.

use crate::model::record::Record;
use chrono::{Datelike, Days, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};

/// Inclusive upper bound of the lookahead window, in days.
pub const UPCOMING_WINDOW_DAYS: i64 = 7;

/// One contact selected by the upcoming-birthday query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpcomingBirthday {
    /// Contact name.
    pub name: String,
    /// Stored birthday in `DD.MM.YYYY` form.
    pub birthday: String,
    /// Days from the reference date to the observed (weekday) date.
    pub days_until: i64,
}

/// Selects records whose observed birthday is within
/// [`UPCOMING_WINDOW_DAYS`] of `today`.
///
/// Records without a birthday are skipped, as are anniversaries that fall
/// outside the representable date range.
pub fn upcoming_birthdays<'a>(
    records: impl IntoIterator<Item = &'a Record>,
    today: NaiveDate,
) -> Vec<UpcomingBirthday> {
    records
        .into_iter()
        .filter_map(|record| {
            let birthday = record.birthday()?;
            let observed = next_observed_birthday(birthday.date(), today)?;
            let days_until = observed.signed_duration_since(today).num_days();
            if !(0..=UPCOMING_WINDOW_DAYS).contains(&days_until) {
                return None;
            }
            Some(UpcomingBirthday {
                name: record.name().as_str().to_string(),
                birthday: birthday.display_format(),
                days_until,
            })
        })
        .collect()
}

/// Returns the date on which the next anniversary of `birthday` on or after
/// `today` is observed, after weekend shifting.
pub fn next_observed_birthday(birthday: NaiveDate, today: NaiveDate) -> Option<NaiveDate> {
    let mut next = anniversary_in(birthday, today.year())?;
    if next < today {
        next = anniversary_in(birthday, today.year() + 1)?;
    }
    shift_weekend_to_monday(next)
}

fn anniversary_in(birthday: NaiveDate, year: i32) -> Option<NaiveDate> {
    NaiveDate::from_ymd_opt(year, birthday.month(), birthday.day()).or_else(|| {
        if birthday.month() == 2 && birthday.day() == 29 {
            NaiveDate::from_ymd_opt(year, 2, 28)
        } else {
            None
        }
    })
}

fn shift_weekend_to_monday(date: NaiveDate) -> Option<NaiveDate> {
    match date.weekday() {
        Weekday::Sat | Weekday::Sun => {
            let days_to_add = 7 - u64::from(date.weekday().num_days_from_monday());
            date.checked_add_days(Days::new(days_to_add))
        }
        _ => Some(date),
    }
}

#[cfg(test)]
mod tests {
    use super::{next_observed_birthday, shift_weekend_to_monday};
    use chrono::NaiveDate;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn weekend_shift_crosses_month_boundary() {
        // 2024-11-30 is a Saturday in a 30-day month.
        assert_eq!(shift_weekend_to_monday(date(2024, 11, 30)), Some(date(2024, 12, 2)));
        // 2024-03-31 is a Sunday.
        assert_eq!(shift_weekend_to_monday(date(2024, 3, 31)), Some(date(2024, 4, 1)));
    }

    #[test]
    fn weekdays_are_not_shifted() {
        assert_eq!(shift_weekend_to_monday(date(2024, 6, 14)), Some(date(2024, 6, 14)));
    }

    #[test]
    fn passed_birthday_rolls_into_next_year() {
        let observed = next_observed_birthday(date(1990, 1, 2), date(2024, 12, 28));
        assert_eq!(observed, Some(date(2025, 1, 2)));
    }

    #[test]
    fn birthday_today_is_not_rolled_forward() {
        let observed = next_observed_birthday(date(1990, 6, 10), date(2024, 6, 10));
        assert_eq!(observed, Some(date(2024, 6, 10)));
    }

    #[test]
    fn leap_day_is_observed_on_feb_28_in_common_years() {
        // 2025-02-28 is a Friday.
        let observed = next_observed_birthday(date(2000, 2, 29), date(2025, 2, 24));
        assert_eq!(observed, Some(date(2025, 2, 28)));

        let leap_year = next_observed_birthday(date(2000, 2, 29), date(2028, 2, 20));
        assert_eq!(leap_year, Some(date(2028, 2, 29)));
    }
}
