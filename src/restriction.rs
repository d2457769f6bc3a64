//! Extraction inside a known window, e.g. a booking slot offered to a user.

use chrono::NaiveDateTime;
use serde::Serialize;
use tracing::debug;

use crate::api::{Context, Interval, Options, text2datetime};
use crate::rules::normalize::{lowercase_in_place, remove_accent};
use crate::rules::patterns;

/// How [`extract_within_interval`] arrived at its result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RestrictionOutcome {
    /// Every interval lies inside the window.
    ValidInRange,
    /// An interval fell outside the window; the text was re-parsed against
    /// the fallback context.
    OutOfRangeFallback,
    /// The text is relative to today ("holnap", "jövő héten"), so it was
    /// re-parsed against the fallback context.
    RelativeTimeWordFallback,
    /// An interval had an open side; re-parsed against the fallback context.
    OpenRangeFallback,
}

/// Parses `text` with `window_start` as the reference time and checks that
/// every interval lies within `window_start..=window_end`. Otherwise the text
/// is parsed again against `fallback`.
pub fn extract_within_interval(
    window_start: NaiveDateTime,
    window_end: NaiveDateTime,
    text: &str,
    fallback: &Context,
    options: &Options,
) -> (RestrictionOutcome, Vec<Interval<NaiveDateTime>>) {
    let within = Context { reference_time: window_start };
    let intervals = text2datetime(text, &within, options);

    let mut outcome = RestrictionOutcome::ValidInRange;
    for interval in &intervals {
        match (interval.start_date, interval.end_date) {
            (Some(start), Some(end)) if window_start <= start && end <= window_end => {}
            (Some(_), Some(_)) => {
                outcome = RestrictionOutcome::OutOfRangeFallback;
                break;
            }
            _ => {
                outcome = RestrictionOutcome::OpenRangeFallback;
                break;
            }
        }
    }
    if outcome == RestrictionOutcome::ValidInRange && is_relative(text) {
        outcome = RestrictionOutcome::RelativeTimeWordFallback;
    }

    if outcome == RestrictionOutcome::ValidInRange {
        return (outcome, intervals);
    }
    debug!(text, ?outcome, "falling back to the fallback reference time");
    (outcome, text2datetime(text, fallback, options))
}

fn is_relative(text: &str) -> bool {
    let folded = remove_accent(&lowercase_in_place(text));
    patterns::relative_day().is_match(&folded)
        || folded.split(|c: char| !c.is_alphanumeric()).any(|word| word.starts_with("jovo") || word.starts_with("mult"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    fn fallback() -> Context {
        Context { reference_time: at(2020, 12, 18, 0, 0, 0) }
    }

    fn within(start: NaiveDateTime, end: NaiveDateTime, text: &str) -> (RestrictionOutcome, Vec<Interval<NaiveDateTime>>) {
        extract_within_interval(start, end, text, &fallback(), &Options::default())
    }

    fn interval(start: NaiveDateTime, end: NaiveDateTime) -> Interval<NaiveDateTime> {
        Interval { start_date: Some(start), end_date: Some(end) }
    }

    #[test]
    fn resolves_inside_the_window() {
        assert_eq!(
            within(at(2021, 10, 11, 0, 0, 0), at(2021, 10, 18, 23, 59, 59), "kedden"),
            (RestrictionOutcome::ValidInRange, vec![interval(at(2021, 10, 12, 0, 0, 0), at(2021, 10, 12, 23, 59, 59))])
        );
        assert_eq!(
            within(at(2022, 1, 1, 0, 0, 0), at(2022, 12, 31, 23, 59, 59), "februárban"),
            (RestrictionOutcome::ValidInRange, vec![interval(at(2022, 2, 1, 0, 0, 0), at(2022, 2, 28, 23, 59, 59))])
        );
        assert_eq!(
            within(at(2020, 1, 1, 0, 0, 0), at(2020, 12, 31, 23, 59, 59), "februárban"),
            (RestrictionOutcome::ValidInRange, vec![interval(at(2020, 2, 1, 0, 0, 0), at(2020, 2, 29, 23, 59, 59))])
        );
    }

    #[test]
    fn falls_back_when_out_of_range() {
        assert_eq!(
            within(at(2022, 1, 1, 0, 0, 0), at(2022, 1, 31, 23, 59, 59), "márciusban"),
            (
                RestrictionOutcome::OutOfRangeFallback,
                vec![interval(at(2020, 3, 1, 0, 0, 0), at(2020, 3, 31, 23, 59, 59))]
            )
        );
    }

    #[test]
    fn falls_back_on_relative_words() {
        assert_eq!(
            within(at(2021, 10, 11, 0, 0, 0), at(2021, 10, 18, 23, 59, 59), "holnap"),
            (
                RestrictionOutcome::RelativeTimeWordFallback,
                vec![interval(at(2020, 12, 19, 0, 0, 0), at(2020, 12, 19, 23, 59, 59))]
            )
        );
        assert!(is_relative("jövő héten"));
        assert!(is_relative("Mától"));
        assert!(!is_relative("májusban"));
    }

    #[test]
    fn falls_back_on_open_ranges() {
        let (outcome, intervals) = within(at(2021, 1, 1, 0, 0, 0), at(2021, 12, 31, 23, 59, 59), "májusig");
        assert_eq!(outcome, RestrictionOutcome::OpenRangeFallback);
        assert_eq!(intervals, vec![Interval { start_date: None, end_date: Some(at(2020, 5, 31, 23, 59, 59)) }]);
    }
}
