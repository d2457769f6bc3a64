//! Duration phrases ("45 perc", "másfél órára", "kéthetes") to minutes.

use regex::Captures;
use serde::Serialize;
use tracing::trace;

use crate::rules::normalize::{lowercase_in_place, remove_accent, word_to_num};
use crate::rules::patterns;

const MINUTES_PER_HOUR: i64 = 60;
const MINUTES_PER_DAY: i64 = 24 * MINUTES_PER_HOUR;
const MINUTES_PER_WEEK: i64 = 7 * MINUTES_PER_DAY;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DurationUnit {
    Minute,
    Hour,
    Day,
    Week,
}

impl DurationUnit {
    const ALL: [DurationUnit; 4] = [DurationUnit::Minute, DurationUnit::Hour, DurationUnit::Day, DurationUnit::Week];

    pub fn minutes(self) -> i64 {
        match self {
            DurationUnit::Minute => 1,
            DurationUnit::Hour => MINUTES_PER_HOUR,
            DurationUnit::Day => MINUTES_PER_DAY,
            DurationUnit::Week => MINUTES_PER_WEEK,
        }
    }

    /// Coarsest unit that divides `minutes` exactly.
    fn preferred(minutes: i64) -> DurationUnit {
        Self::ALL.into_iter().rev().find(|unit| minutes % unit.minutes() == 0).unwrap_or(DurationUnit::Minute)
    }
}

/// A parsed duration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Duration {
    /// Quantity in `unit`, as stated.
    pub value: i64,
    /// The largest stated unit when the total is a whole number of it,
    /// minutes otherwise.
    pub unit: DurationUnit,
    pub preferred_unit: DurationUnit,
    pub minutes: i64,
}

impl Duration {
    fn new(minutes: i64, stated: DurationUnit) -> Self {
        let unit = if minutes % stated.minutes() == 0 { stated } else { DurationUnit::Minute };
        Duration { value: minutes / unit.minutes(), unit, preferred_unit: DurationUnit::preferred(minutes), minutes }
    }
}

/// Total minutes of the first duration phrase in `text`.
///
/// ```
/// assert_eq!(hundate::parse_duration("1 óra 25 perc"), Some(85));
/// assert_eq!(hundate::parse_duration("jövő kedd"), None);
/// ```
pub fn parse_duration(text: &str) -> Option<i64> {
    parse_duration_detailed(text).map(|d| d.minutes)
}

/// Like [`parse_duration`], keeping the stated unit.
pub fn parse_duration_detailed(text: &str) -> Option<Duration> {
    let folded = remove_accent(&lowercase_in_place(text));

    let parsers: [(&str, fn(&str) -> Option<Duration>); 6] = [
        ("hours_and_minutes", hours_and_minutes),
        ("quarter_hours", quarter_hours),
        ("hours", hours),
        ("minutes", minutes),
        ("days", days),
        ("weeks", weeks),
    ];
    parsers.into_iter().find_map(|(name, parse)| {
        let found = parse(&folded)?;
        trace!(text, parser = name, minutes = found.minutes, "duration");
        Some(found)
    })
}

fn count(caps: &Captures<'_>, group: usize) -> Option<i64> {
    let n = word_to_num(caps.get(group)?.as_str());
    (n >= 0).then_some(n)
}

fn hour_count(n: i64) -> Option<i64> {
    (1..=24).contains(&n).then_some(n)
}

fn hours_and_minutes(text: &str) -> Option<Duration> {
    patterns::hours_and_minutes().captures_iter(text).find_map(|caps| {
        let hours = hour_count(count(&caps, 1)?)?;
        let minutes = count(&caps, 2)?;
        Some(Duration::new((hours * MINUTES_PER_HOUR).checked_add(minutes)?, DurationUnit::Hour))
    })
}

fn quarter_hours(text: &str) -> Option<Duration> {
    let caps = patterns::quarter_hours().captures_iter(text).next()?;
    let fraction = match caps.get(3)?.as_str() {
        "haromnegyed" => 45,
        "negyed" => 15,
        "masfel" => 90,
        _ => 30,
    };
    let minutes = match (count(&caps, 1), caps.get(2).is_some()) {
        // "1 és negyed óra"
        (Some(hours), true) => hour_count(hours)? * MINUTES_PER_HOUR + fraction,
        // "3 negyedóra"
        (Some(n), false) if n > 0 => n.checked_mul(fraction)?,
        _ => fraction,
    };
    Some(Duration::new(minutes, DurationUnit::Minute))
}

fn hours(text: &str) -> Option<Duration> {
    patterns::hours().captures_iter(text).find_map(|caps| {
        let stated = caps.get(1)?.as_str();
        let (whole, half) = match stated.strip_suffix(",5") {
            Some(whole) => (whole, MINUTES_PER_HOUR / 2),
            None => (stated, 0),
        };
        let n = word_to_num(whole);
        let hours = if half > 0 && n == 0 { 0 } else { hour_count(n)? };
        Some(Duration::new(hours * MINUTES_PER_HOUR + half, DurationUnit::Hour))
    })
}

fn minutes(text: &str) -> Option<Duration> {
    patterns::minutes().captures_iter(text).find_map(|caps| {
        let n = count(&caps, 1).filter(|&n| n > 0)?;
        Some(Duration::new(n, DurationUnit::Minute))
    })
}

fn days(text: &str) -> Option<Duration> {
    patterns::days().captures_iter(text).find_map(|caps| {
        let n = count(&caps, 1).filter(|&n| n > 0)?;
        Some(Duration::new(n.checked_mul(MINUTES_PER_DAY)?, DurationUnit::Day))
    })
}

fn weeks(text: &str) -> Option<Duration> {
    patterns::weeks().captures_iter(text).find_map(|caps| {
        let n = count(&caps, 1).filter(|&n| n > 0)?;
        Some(Duration::new(n.checked_mul(MINUTES_PER_WEEK)?, DurationUnit::Week))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_minutes() {
        let cases = [
            ("45 perc", Some(45)),
            ("45 percre ", Some(45)),
            ("50 perces", Some(50)),
            ("120 perc", Some(120)),
            ("999 percre", Some(999)),
            ("eddig: 45 percre", Some(45)),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_duration(text), expected, "{text}");
        }
    }

    #[test]
    fn parses_quarter_hours() {
        let cases = [
            ("negyed óra", 15),
            ("negyed órát", 15),
            ("negyedórára", 15),
            ("negyed óráig", 15),
            (" háromnegyed óra", 45),
            ("háromnegyedórát", 45),
            ("3 negyedóra", 45),
            ("másfél óra", 90),
            ("másfélórát", 90),
            ("félóráig", 30),
            ("1 és negyed óráig", 75),
            ("1 és negyedóráig", 75),
            ("egy és fél óráig", 90),
            ("eddig 3 és negyed óráig", 195),
            ("eddig 3 es negyed oraig", 195),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_duration(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn parses_hours_with_minutes() {
        let cases = [
            ("1 óra 25 perc", 85),
            ("egy óra 10 percre", 70),
            (": egy óra 10 percre :", 70),
            ("2 óra 16 percre", 136),
            ("1,5 óráig", 90),
            ("2,5 óráig", 150),
            ("eddig: 1,5 óráig", 90),
            ("1 óráig", 60),
            ("3 órára", 180),
            ("10 órára", 600),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_duration(text), Some(expected), "{text}");
        }
    }

    #[test]
    fn parses_days_and_weeks() {
        assert_eq!(parse_duration("3 napra"), Some(3 * MINUTES_PER_DAY));
        assert_eq!(parse_duration("kétnapos"), Some(2 * MINUTES_PER_DAY));
        assert_eq!(parse_duration("2 hétre"), Some(2 * MINUTES_PER_WEEK));
        assert_eq!(parse_duration("kéthetes"), Some(2 * MINUTES_PER_WEEK));
    }

    #[test]
    fn huge_counts_do_not_overflow() {
        for text in ["9223372036854775807 negyedóra", "1 óra 9223372036854775807 perc", "9223372036854775807 napra"] {
            let _ = parse_duration(text);
        }
        assert_eq!(parse_duration("9223372036854775807 napra"), None);
    }

    #[test]
    fn rejects_non_durations() {
        for text in ["16", "100 órára", "", "  fél", "  jövő kedd", "délig", "holnap", "minden nap"] {
            assert_eq!(parse_duration(text), None, "{text}");
        }
    }

    #[test]
    fn reports_stated_and_preferred_units() {
        assert_eq!(
            parse_duration_detailed("3 órára"),
            Some(Duration { value: 3, unit: DurationUnit::Hour, preferred_unit: DurationUnit::Hour, minutes: 180 })
        );
        assert_eq!(
            parse_duration_detailed("1 óra 25 perc"),
            Some(Duration { value: 85, unit: DurationUnit::Minute, preferred_unit: DurationUnit::Minute, minutes: 85 })
        );
        assert_eq!(
            parse_duration_detailed("120 perc"),
            Some(Duration { value: 120, unit: DurationUnit::Minute, preferred_unit: DurationUnit::Hour, minutes: 120 })
        );
        assert_eq!(
            parse_duration_detailed("kéthetes"),
            Some(Duration { value: 2, unit: DurationUnit::Week, preferred_unit: DurationUnit::Week, minutes: 20160 })
        );
        assert_eq!(parse_duration_detailed("24 órára").map(|d| d.preferred_unit), Some(DurationUnit::Day));
    }
}
