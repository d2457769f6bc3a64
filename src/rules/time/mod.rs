//! Clock-level fragment matchers: digital clock, "8h", the word-based hour
//! and minute grammar, dayparts and "most".

use chrono::{Datelike, Timelike};
use regex::{Captures, Match};

use crate::rules::normalize::{remove_accent, word_to_num};
use crate::rules::patterns;
use crate::{Fragment, FragmentKind, MatchResult, RuleInput};


const MINUTES_PER_DAY: i64 = 24 * 60;

/// Index into the daypart table: hajnal, reggel, délelőtt, délután, este,
/// éjjel.
pub(crate) fn daypart_index(word: &str) -> Option<i64> {
    const STEMS: [(&str, i64); 7] = [
        ("hajnal", 0),
        ("reggel", 1),
        ("delelott", 2),
        ("delutan", 3),
        ("est", 4),
        ("ejjel", 5),
        ("ejszak", 5),
    ];
    let folded = remove_accent(word);
    STEMS.iter().find(|(stem, _)| folded.starts_with(stem)).map(|&(_, index)| index)
}

// 12-hour reading of `hour` within a daypart.
pub(crate) fn adjust_for_daypart(hour: i64, daypart: Option<i64>) -> i64 {
    let hour = if hour == 24 { 0 } else { hour };
    match daypart {
        Some(3) | Some(4) if hour < 12 => hour + 12,
        Some(5) if (6..12).contains(&hour) => hour + 12,
        Some(5) if hour == 12 => 0,
        _ => hour,
    }
}

/// `HH:MM[:SS]`; a preceding daypart word moves afternoon and evening hours
/// past noon.
pub(crate) fn match_digital_clock(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_digital_clock";
    let text = input.text;
    let mut results = Vec::new();

    for caps in patterns::digital_clock().captures_iter(text) {
        let Some(whole) = caps.get(0) else { continue };
        let (Some(hour), Some(minute)) = (number(caps.get(1)), number(caps.get(2))) else { continue };

        let daypart = patterns::daypart_word_before().captures(&text[..whole.start()]).and_then(|c| c.get(1));
        let index = daypart.and_then(|m| daypart_index(m.as_str()));
        let hour = adjust_for_daypart(hour, index);

        let mut fragments = vec![Fragment::new(FragmentKind::Hour, hour, RULE)];
        if minute != 0 {
            fragments.push(Fragment::new(FragmentKind::Minute, minute, RULE));
        }
        if let Some(index) = index {
            fragments.push(Fragment::new(FragmentKind::Daypart, index, RULE));
        }

        let start = daypart.map_or(whole.start(), |m| m.start());
        results.push(MatchResult::new(text, start, whole.end(), fragments));
    }

    results
}

/// "8h", "17 h".
pub(crate) fn match_hour_h(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_hour_h";

    patterns::hour_h()
        .captures_iter(input.text)
        .filter_map(|caps| {
            let hour = number(caps.get(1))?;
            Some(MatchResult::from_match(caps.get(0)?, vec![Fragment::new(FragmentKind::Hour, hour, RULE)]))
        })
        .collect()
}

fn number(m: Option<Match<'_>>) -> Option<i64> {
    m.and_then(|m| m.as_str().parse().ok())
}

/// One candidate of the word-based clock grammar, read from either the
/// forward or the reversed ("N perccel ... után") pattern.
#[derive(Debug)]
struct ClockPhrase<'t> {
    whole: Match<'t>,
    hour: Match<'t>,
    daypart: Option<&'t str>,
    quarter: Option<&'t str>,
    suffix: Option<&'t str>,
    hour_unit: Option<&'t str>,
    direction: Option<&'t str>,
    minutes: Option<&'t str>,
}

impl<'t> ClockPhrase<'t> {
    fn forward(caps: &Captures<'t>) -> Option<Self> {
        Some(ClockPhrase {
            whole: caps.get(0)?,
            hour: caps.get(3)?,
            daypart: caps.get(1).map(|m| m.as_str()),
            quarter: caps.get(2).map(|m| m.as_str()),
            suffix: caps.get(4).map(|m| m.as_str()),
            hour_unit: caps.get(5).map(|m| m.as_str()),
            direction: caps.get(6).map(|m| m.as_str()),
            minutes: caps.get(7).map(|m| m.as_str()),
        })
    }

    fn reversed(caps: &Captures<'t>) -> Option<Self> {
        Some(ClockPhrase {
            whole: caps.get(0)?,
            hour: caps.get(4)?,
            daypart: caps.get(2).map(|m| m.as_str()),
            quarter: caps.get(3).map(|m| m.as_str()),
            suffix: None,
            hour_unit: None,
            direction: caps.get(5).map(|m| m.as_str()),
            minutes: caps.get(1).map(|m| m.as_str()),
        })
    }

    fn hour_is_digits(&self) -> bool {
        self.hour.as_str().bytes().all(|b| b.is_ascii_digit())
    }

    // Guards against hour-like words that are really days, durations,
    // weeks or parts of a numeric expression. On one side of a two-sided
    // interval a bare "8-tól"/"10-ig" is an hour.
    fn is_clock_time(&self, text: &str, paired_side: bool) -> bool {
        let anchored = self.suffix.is_some()
            || self.hour_unit.is_some()
            || self.daypart.is_some()
            || self.quarter.is_some()
            || self.minutes.is_some();
        if !anchored {
            return false;
        }

        if let Some(unit) = self.hour_unit.map(remove_accent) {
            if unit == "orat" || ["oras", "orany", "orav", "oraj"].iter().any(|p| unit.starts_with(p)) {
                return false;
            }
        }

        if let Some(suffix) = self.suffix {
            let folded_hour = remove_accent(self.hour.as_str());
            if folded_hour == "het" && suffix != "kor" {
                return false;
            }
            let boundary = suffix == "ig" || suffix.starts_with('t');
            if boundary && self.hour_is_digits() && self.daypart.is_none() && !paired_side {
                return false;
            }
        }

        let before = &text[..self.hour.start()];
        if before.ends_with(|c: char| c == '-' || c == '.' || c == ':' || c.is_ascii_digit()) {
            return false;
        }

        let after_hour = &text[self.hour.end()..];
        if after_hour.starts_with(':') {
            return false;
        }
        if self.suffix.is_none() && self.hour_unit.is_none() {
            let next = remove_accent(after_hour.trim_start());
            if after_hour.starts_with(char::is_whitespace) && (next.starts_with("perc") || next.starts_with("ev")) {
                return false;
            }
        }

        let after = remove_accent(text[self.whole.end()..].trim_start());
        if after.starts_with("mulva") {
            return false;
        }

        if self.daypart.is_none() && self.quarter.is_none() && patterns::month_word_before(before) {
            return false;
        }

        true
    }

    /// Hour and, when the phrase names one, minute of the day.
    fn resolve(&self) -> Option<(i64, Option<i64>)> {
        let hour = word_to_num(self.hour.as_str());
        if !(0..=24).contains(&hour) {
            return None;
        }
        let hour = adjust_for_daypart(hour, self.daypart.and_then(daypart_index));

        let mut total = hour * 60;
        if let Some(quarter) = self.quarter.map(remove_accent) {
            let past = match quarter.as_str() {
                "haromnegyed" => 45,
                "negyed" => 15,
                _ => 30,
            };
            // "negyed nyolc" is a quarter past seven
            total += past - 60;
        }
        if let Some(minutes) = self.minutes {
            let n = word_to_num(minutes);
            if n < 0 {
                return None;
            }
            let before = self.direction.is_some_and(|d| remove_accent(d).starts_with("elott"));
            total = total.checked_add(if before { -n } else { n })?;
        }

        let total = total.rem_euclid(MINUTES_PER_DAY);
        let minute = (self.quarter.is_some() || self.minutes.is_some()).then_some(total % 60);
        Some((total / 60, minute))
    }
}

/// Word-based clock times ("délután háromkor", "negyed nyolc",
/// "húsz óra negyvenkilenc perckor", "öt perccel nyolc előtt").
///
/// The first accepted phrase wins; a daypart it names is reported after the
/// hour. Without one, the first daypart word yields a lone `Daypart`.
pub(crate) fn match_clock_words(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_clock_words";
    let text = input.text;

    let reversed = patterns::clock_words_reversed().captures_iter(text).filter_map(|c| ClockPhrase::reversed(&c));
    let forward = patterns::clock_words().captures_iter(text).filter_map(|c| ClockPhrase::forward(&c));

    for phrase in reversed.chain(forward) {
        if !phrase.is_clock_time(text, input.paired_side) {
            continue;
        }
        let Some((hour, minute)) = phrase.resolve() else { continue };

        let mut fragments = vec![Fragment::new(FragmentKind::Hour, hour, RULE)];
        if let Some(minute) = minute {
            fragments.push(Fragment::new(FragmentKind::Minute, minute, RULE));
        }
        if let Some(index) = phrase.daypart.and_then(daypart_index) {
            fragments.push(Fragment::new(FragmentKind::Daypart, index, RULE));
        }
        return vec![MatchResult::from_match(phrase.whole, fragments)];
    }

    patterns::daypart()
        .captures_iter(text)
        .find_map(|caps| {
            let word = caps.get(1)?;
            let index = daypart_index(word.as_str())?;
            Some(MatchResult::from_match(word, vec![Fragment::new(FragmentKind::Daypart, index, RULE)]))
        })
        .into_iter()
        .collect()
}

/// "most": every field pinned to the reference time.
pub(crate) fn match_now(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_now";
    let now = input.now;

    patterns::now_word()
        .find_iter(input.text)
        .map(|m| {
            MatchResult::from_match(
                m,
                vec![
                    Fragment::new(FragmentKind::Year, now.year() as i64, RULE),
                    Fragment::new(FragmentKind::Month, now.month() as i64, RULE),
                    Fragment::new(FragmentKind::Day, now.day() as i64, RULE),
                    Fragment::new(FragmentKind::Hour, now.hour() as i64, RULE),
                    Fragment::new(FragmentKind::Minute, now.minute() as i64, RULE),
                ],
            )
        })
        .collect()
}
