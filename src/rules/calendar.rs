use chrono::{Datelike, Duration, Months, NaiveDate, NaiveDateTime, Weekday};

/// Years accepted when the realistic-year filter is on.
pub(crate) fn is_year_realistic(year: i64) -> bool {
    1900 < year && year < 2100
}

pub(crate) fn days_in_month(year: i32, month: u32) -> Option<u32> {
    let (next_year, next_month) = if month == 12 { (year + 1, 1) } else { (year, month + 1) };
    let first_next = NaiveDate::from_ymd_opt(next_year, next_month, 1)?;
    NaiveDate::from_ymd_opt(year, month, 1)?;
    Some((first_next - Duration::days(1)).day())
}

/// Calendar month shift; the day is clamped to the target month's length.
pub(crate) fn shift_months(dt: NaiveDateTime, months: i64) -> Option<NaiveDateTime> {
    let magnitude = Months::new(u32::try_from(months.unsigned_abs()).ok()?);
    if months >= 0 { dt.checked_add_months(magnitude) } else { dt.checked_sub_months(magnitude) }
}

pub(crate) fn shift_days(dt: NaiveDateTime, days: i64) -> Option<NaiveDateTime> {
    dt.checked_add_signed(Duration::try_days(days)?)
}

pub(crate) fn shift_minutes(dt: NaiveDateTime, minutes: i64) -> Option<NaiveDateTime> {
    dt.checked_add_signed(Duration::try_minutes(minutes)?)
}

/// Monday of ISO week `week` of ISO year `year`.
pub(crate) fn monday_of_iso_week(year: i64, week: i64) -> Option<NaiveDate> {
    NaiveDate::from_isoywd_opt(i32::try_from(year).ok()?, u32::try_from(week).ok()?, Weekday::Mon)
}

/// Monday of the ISO week containing `date`.
pub(crate) fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(8, 0, 0).unwrap()
    }

    #[test]
    fn month_lengths_follow_leap_years() {
        assert_eq!(days_in_month(2020, 2), Some(29));
        assert_eq!(days_in_month(2021, 2), Some(28));
        assert_eq!(days_in_month(2020, 12), Some(31));
        assert_eq!(days_in_month(2020, 13), None);
    }

    #[test]
    fn shift_months_clamps_day() {
        assert_eq!(shift_months(at(2024, 1, 31), 1), Some(at(2024, 2, 29)));
        assert_eq!(shift_months(at(2020, 12, 18), -2), Some(at(2020, 10, 18)));
        assert_eq!(shift_months(at(2020, 3, 31), -1), Some(at(2020, 2, 29)));
    }

    #[test]
    fn iso_week_monday() {
        assert_eq!(monday_of_iso_week(2020, 50), NaiveDate::from_ymd_opt(2020, 12, 7));
        assert_eq!(monday_of_iso_week(2020, 54), None);
        assert_eq!(week_start(NaiveDate::from_ymd_opt(2020, 12, 18).unwrap()), NaiveDate::from_ymd_opt(2020, 12, 14).unwrap());
    }

    #[test]
    fn realistic_years_are_exclusive() {
        assert!(is_year_realistic(2020));
        assert!(!is_year_realistic(1900));
        assert!(!is_year_realistic(2100));
        assert!(!is_year_realistic(1850));
    }
}
