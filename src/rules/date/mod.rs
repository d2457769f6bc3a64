//! Day-level fragment matchers.
//!
//! Each matcher scans the lower-cased text and returns one `MatchResult` per
//! regex match that produced at least one fragment. Matchers never fail: an
//! unresolvable number word or an out-of-range value drops the match.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, Timelike};

use crate::rules::calendar::{is_year_realistic, shift_days, shift_minutes, shift_months, week_start};
use crate::rules::normalize::{remove_accent, word_to_num};
use crate::rules::patterns;
use crate::{Fragment, FragmentKind, MatchResult, RuleInput, SearchScope};


fn ymd(date: NaiveDate, rule: &'static str) -> Vec<Fragment> {
    vec![
        Fragment::new(FragmentKind::Year, date.year() as i64, rule),
        Fragment::new(FragmentKind::Month, date.month() as i64, rule),
        Fragment::new(FragmentKind::Day, date.day() as i64, rule),
    ]
}

fn parse_num(m: Option<regex::Match<'_>>) -> Option<i64> {
    m.and_then(|m| m.as_str().parse().ok())
}

/// Month number for a (possibly abbreviated) Hungarian month name.
pub(crate) fn month_number(name: &str) -> Option<i64> {
    const STEMS: [&str; 12] = ["jan", "feb", "mar", "apr", "maj", "jun", "jul", "aug", "sze", "okt", "nov", "dec"];
    let folded = remove_accent(name);
    STEMS.iter().position(|stem| folded.starts_with(stem)).map(|i| i as i64 + 1)
}

fn weekday_index(name: &str) -> Option<i64> {
    const STEMS: [&str; 7] = ["hetf", "kedd", "szerd", "csut", "pentek", "szombat", "vasarnap"];
    let folded = remove_accent(name);
    STEMS.iter().position(|stem| folded.starts_with(stem)).map(|i| i as i64)
}

fn followed_by_quantity_unit(rest: &str) -> bool {
    let Some(token) = rest.split_whitespace().next() else {
        return false;
    };
    let token = token.trim_end_matches(|c: char| c.is_ascii_punctuation() && c != '%');
    patterns::QUANTITY_UNITS
        .iter()
        .any(|unit| token == *unit || (unit.chars().count() >= 3 && token.starts_with(unit)))
}

/// `2020-12-30`, `2020.12.29`, `2020 1 15`, `30.12.2020`, `2020-01`, `2001`.
pub(crate) fn match_iso_date(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_iso_date";
    let mut results = Vec::new();

    for caps in patterns::iso_date().captures_iter(input.text) {
        let Some(whole) = caps.get(0) else { continue };
        let (year, month, day) = match caps.get(3) {
            Some(year) => (Some(year), caps.get(2), caps.get(1)),
            None => (caps.get(4), caps.get(5), caps.get(6)),
        };
        let Some(year) = parse_num(year) else { continue };

        if month.is_none() && followed_by_quantity_unit(&input.text[whole.end()..]) {
            continue;
        }

        let mut fragments = Vec::new();
        if !input.realistic_year_required || is_year_realistic(year) {
            fragments.push(Fragment::new(FragmentKind::Year, year, RULE));
        }
        if let Some(month) = parse_num(month) {
            fragments.push(Fragment::new(FragmentKind::Month, month, RULE));
        }
        if let Some(day) = parse_num(day) {
            fragments.push(Fragment::new(FragmentKind::Day, day, RULE));
        }

        if !fragments.is_empty() {
            results.push(MatchResult::from_match(whole, fragments));
        }
    }

    results
}

/// Month names with an optional "jövő"/"tavaly" modifier and trailing day.
pub(crate) fn match_named_month(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_named_month";
    let now = input.now;
    let mut results = Vec::new();

    for caps in patterns::named_month().captures_iter(input.text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(month) = caps.get(2).and_then(|m| month_number(m.as_str())) else { continue };
        let mut end = whole.end();
        let day = match caps.get(3) {
            // "március egy hétre" counts weeks
            Some(word) if !is_digits(word.as_str()) && unit_follows(&input.text[word.end()..]) => {
                end = caps.get(2).map_or(end, |m| m.end());
                None
            }
            Some(word) => day_number(word.as_str()),
            None => None,
        };

        let mut fragments = Vec::new();
        match caps.get(1).map(|m| m.as_str()) {
            Some(modifier) if modifier.starts_with("tavaly") => {
                fragments.push(Fragment::new(FragmentKind::Year, now.year() as i64 - 1, RULE));
            }
            Some(_) => fragments.push(Fragment::new(FragmentKind::Year, now.year() as i64 + 1, RULE)),
            None => {
                if let Some(year) = scoped_month_year(input, month, day) {
                    fragments.push(Fragment::new(FragmentKind::Year, year, RULE));
                }
            }
        }

        fragments.push(Fragment::new(FragmentKind::Month, month, RULE));
        if let Some(day) = day {
            fragments.push(Fragment::new(FragmentKind::Day, day, RULE));
        }
        results.push(MatchResult::new(input.text, whole.start(), end, fragments));
    }

    results
}

fn is_digits(word: &str) -> bool {
    word.bytes().all(|b| b.is_ascii_digit())
}

// Digits are taken as stated; a spelled-out number only as 1..=31.
fn day_number(word: &str) -> Option<i64> {
    if is_digits(word) {
        return word.parse().ok();
    }
    let n = word_to_num(word);
    (1..=31).contains(&n).then_some(n)
}

fn unit_follows(rest: &str) -> bool {
    let next = remove_accent(rest.trim_start());
    ["nap", "het", "honap", "ev", "ora", "perc"].iter().any(|unit| next.starts_with(unit))
}

// Year override for a bare month mention under a restricted search scope.
fn scoped_month_year(input: &RuleInput<'_>, month: i64, day: Option<i64>) -> Option<i64> {
    if input.scope == SearchScope::NotRestricted || patterns::explicit_year().is_match(input.text) {
        return None;
    }

    let now = input.now;
    let current = (now.month() as i64, now.day() as i64);
    let (in_past, in_future) = match day {
        Some(day) => ((month, day) < current, (month, day) > current),
        None => (month < current.0, month > current.0),
    };

    match input.scope {
        SearchScope::FutureDay if in_past => Some(now.year() as i64 + 1),
        SearchScope::PastSearch if in_future => Some(now.year() as i64 - 1),
        _ => None,
    }
}

/// ma, holnap, holnapután, tegnap, tegnapelőtt.
pub(crate) fn match_relative_day(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_relative_day";
    let today = input.now.date();

    patterns::relative_day()
        .captures_iter(input.text)
        .filter_map(|caps| {
            let word = caps.get(1)?;
            let folded = remove_accent(word.as_str());
            let offset = if folded.starts_with("holnaputan") {
                2
            } else if folded.starts_with("holnap") {
                1
            } else if folded.starts_with("tegnapelott") {
                -2
            } else if folded.starts_with("tegnap") {
                -1
            } else {
                0
            };
            let date = today.checked_add_signed(Duration::days(offset))?;
            Some(MatchResult::from_match(word, ymd(date, RULE)))
        })
        .collect()
}

/// Weekday names with an optional week modifier.
///
/// The date is Monday of the current ISO week, shifted by the modifier and
/// the weekday index. Without a modifier the search scope may roll the date
/// one week forward or back.
pub(crate) fn match_weekday(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_weekday";
    let today = input.now.date();
    let monday = week_start(today);
    let mut results = Vec::new();

    for caps in patterns::weekday().captures_iter(input.text) {
        let Some(whole) = caps.get(0) else { continue };
        let Some(index) = caps.get(2).and_then(|m| weekday_index(m.as_str())) else { continue };

        let weeks = match caps.get(1).map(|m| remove_accent(m.as_str())) {
            Some(modifier) if modifier == "elozo" || modifier == "mult" => -1,
            Some(modifier) if modifier == "jovo" => 1,
            _ => 0,
        };

        let mut date = monday + Duration::days(weeks * 7 + index);
        if caps.get(1).is_none() {
            match input.scope {
                SearchScope::FutureDay if date < today => date += Duration::days(7),
                SearchScope::PastSearch if date > today => date -= Duration::days(7),
                _ => {}
            }
        }

        results.push(MatchResult::from_match(whole, ymd(date, RULE)));
    }

    results
}

/// "múlt hét", "ezen a hét", "jövő hét" → ISO year and week number.
pub(crate) fn match_week(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_week";
    let mut results = Vec::new();

    for m in patterns::week().find_iter(input.text) {
        // "hétfő" is a weekday, not a week
        if input.text[m.end()..].starts_with('f') {
            continue;
        }
        let folded = remove_accent(m.as_str());
        let days = if folded.starts_with("elozo") || folded.starts_with("mult") {
            -7
        } else if folded.starts_with("jovo") {
            7
        } else {
            0
        };
        let Some(date) = input.now.date().checked_add_signed(Duration::days(days)) else { continue };
        let iso = date.iso_week();
        results.push(MatchResult::from_match(
            m,
            vec![
                Fragment::new(FragmentKind::Year, iso.year() as i64, RULE),
                Fragment::new(FragmentKind::Week, iso.week() as i64, RULE),
            ],
        ));
    }

    results
}

/// tavalyelőtt, tavaly, idén, jövőre, "N év múlva", "N évvel ezelőtt",
/// "ebben az évben", "múlt évben", "jövő évben".
pub(crate) fn match_named_year(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_named_year";
    let year = input.now.year() as i64;
    let mut results = Vec::new();
    let shifted = |m: regex::Match<'_>, shift: i64| {
        let target = year.checked_add(shift)?;
        Some(MatchResult::from_match(m, vec![Fragment::new(FragmentKind::Year, target, RULE)]))
    };

    for caps in patterns::year_word().captures_iter(input.text) {
        let Some(word) = caps.get(1) else { continue };
        let folded = remove_accent(word.as_str());
        let shift = if folded.starts_with("tavalyelott") {
            -2
        } else if folded.starts_with("tavaly") {
            -1
        } else if folded.starts_with("jovore") {
            1
        } else {
            0
        };
        results.extend(shifted(word, shift));
    }

    for (pattern, sign) in [(patterns::years_from_now(), 1), (patterns::years_ago(), -1)] {
        for caps in pattern.captures_iter(input.text) {
            let (Some(whole), Some(count)) = (caps.get(0), caps.get(1)) else { continue };
            let n = word_to_num(count.as_str());
            if n == -1 {
                continue;
            }
            results.extend(shifted(whole, sign * n));
        }
    }

    for (pattern, shift) in [(patterns::this_year(), 0), (patterns::last_year(), -1), (patterns::next_year(), 1)] {
        for m in pattern.find_iter(input.text) {
            results.extend(shifted(m, shift));
        }
    }

    results
}

/// "múlt hónap", "ebben a hónapban", "következő hónap" and friends.
pub(crate) fn match_relative_month(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_relative_month";

    patterns::relative_month()
        .captures_iter(input.text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let folded = remove_accent(caps.get(1)?.as_str());
            let shift = match folded.as_str() {
                "ezen" | "ebben" | "aktualis" => 0,
                "jovo" | "kovetkezo" | "kovetkezendo" => 1,
                _ => -1,
            };
            let target = shift_months(input.now, shift)?;
            Some(MatchResult::from_match(
                whole,
                vec![
                    Fragment::new(FragmentKind::Year, target.year() as i64, RULE),
                    Fragment::new(FragmentKind::Month, target.month() as i64, RULE),
                ],
            ))
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Unit {
    Minute,
    Hour,
    Day,
    Week,
    Month,
    Year,
}

impl Unit {
    fn from_word(word: &str) -> Option<Unit> {
        let folded = remove_accent(word);
        if folded.starts_with("perc") {
            Some(Unit::Minute)
        } else if folded.starts_with("or") {
            Some(Unit::Hour)
        } else if folded.starts_with("honap") || folded == "havi" {
            Some(Unit::Month)
        } else if folded.starts_with("nap") {
            Some(Unit::Day)
        } else if folded.starts_with("het") {
            Some(Unit::Week)
        } else if folded.starts_with("ev") {
            Some(Unit::Year)
        } else {
            None
        }
    }

    fn shift(self, dt: NaiveDateTime, n: i64) -> Option<NaiveDateTime> {
        match self {
            Unit::Minute => shift_minutes(dt, n),
            Unit::Hour => shift_minutes(dt, n.checked_mul(60)?),
            Unit::Day => shift_days(dt, n),
            Unit::Week => shift_days(dt, n.checked_mul(7)?),
            Unit::Month => shift_months(dt, n),
            Unit::Year => shift_months(dt, n.checked_mul(12)?),
        }
    }

    // Y/M/D, plus the clock fields down to this unit's grain.
    fn fragments(self, dt: NaiveDateTime, rule: &'static str) -> Vec<Fragment> {
        let mut fragments = ymd(dt.date(), rule);
        if matches!(self, Unit::Hour | Unit::Minute) {
            fragments.push(Fragment::new(FragmentKind::Hour, dt.hour() as i64, rule));
        }
        if self == Unit::Minute {
            fragments.push(Fragment::new(FragmentKind::Minute, dt.minute() as i64, rule));
        }
        fragments
    }
}

/// "N perc/óra/nap/hét múlva" and "N perccel/órával/nappal/héttel ezelőtt".
pub(crate) fn match_n_periods_relative(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_n_periods_relative";
    let mut results = Vec::new();

    for (pattern, sign) in [(patterns::periods_from_now(), 1), (patterns::periods_before_now(), -1)] {
        for caps in pattern.captures_iter(input.text) {
            let (Some(whole), Some(count), Some(unit)) = (caps.get(0), caps.get(1), caps.get(2)) else { continue };
            let n = word_to_num(count.as_str());
            if n == -1 {
                continue;
            }
            let Some(unit) = Unit::from_word(unit.as_str()) else { continue };
            let Some(target) = unit.shift(input.now, sign * n) else { continue };
            results.push(MatchResult::from_match(whole, unit.fragments(target, RULE)));
        }
    }

    results
}

/// "elmúlt/megelőző/előző N perc/óra/nap/hét/hónap/év": from `now - N·unit`
/// up to `now` itself.
pub(crate) fn match_in_past_periods(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_in_past_periods";
    let mut results = Vec::new();

    for caps in patterns::in_past_periods().captures_iter(input.text) {
        let (Some(whole), Some(count), Some(unit)) = (caps.get(0), caps.get(2), caps.get(3)) else { continue };
        let n = word_to_num(count.as_str());
        if n == -1 {
            continue;
        }
        let Some(unit) = Unit::from_word(unit.as_str()) else { continue };
        let Some(start) = unit.shift(input.now, -n) else { continue };

        let mut fragments = unit.fragments(start, RULE);
        fragments.push(Fragment::marker(FragmentKind::OverrideTopWithNow, RULE));
        results.push(MatchResult::from_match(whole, fragments));
    }

    results
}

/// "5-én", "12-étől", "elsején", "huszonkettedikéig".
pub(crate) fn match_day_of_month(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_day_of_month";
    let text = input.text;
    let mut results = Vec::new();

    for caps in patterns::day_of_month_digits().captures_iter(text) {
        let (Some(whole), Some(day)) = (caps.get(0), parse_num(caps.get(1))) else { continue };
        // part of a numeric date such as 2025-05-05-én
        if text[..whole.start()].ends_with(['-', '.', '/']) {
            continue;
        }
        results.push(MatchResult::from_match(whole, vec![Fragment::new(FragmentKind::Day, day, RULE)]));
    }

    for m in patterns::day_of_month_words().find_iter(text) {
        let day = word_to_num(m.as_str());
        if !(1..=31).contains(&day) {
            continue;
        }
        results.push(MatchResult::from_match(m, vec![Fragment::new(FragmentKind::Day, day, RULE)]));
    }

    results.sort_by_key(|r| r.range.start);
    results
}

/// "március 20-tól 22-ig", "augusztus 5-től egészen 10-ig", "május 3-7".
pub(crate) fn match_month_interval(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_month_interval";

    patterns::month_interval()
        .captures_iter(input.text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let month = month_number(caps.get(1)?.as_str())?;
            let start = parse_num(caps.get(2))?;
            let end = parse_num(caps.get(3).or_else(|| caps.get(4)))?;
            if !(1 <= start && start <= end && end <= 31) {
                return None;
            }
            Some(MatchResult::from_match(
                whole,
                vec![
                    Fragment::new(FragmentKind::Month, month, RULE),
                    Fragment::new(FragmentKind::StartDay, start, RULE),
                    Fragment::new(FragmentKind::EndDay, end, RULE),
                ],
            ))
        })
        .collect()
}

/// "március elején" (1-10), "február közepén" (10-20), "december végén"
/// (20 to month end).
pub(crate) fn match_month_thirds(input: &RuleInput<'_>) -> Vec<MatchResult> {
    const RULE: &str = "match_month_thirds";

    patterns::month_thirds()
        .captures_iter(input.text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let month = month_number(caps.get(1)?.as_str())?;
            let part = remove_accent(caps.get(2)?.as_str());
            let (start, end) = match part.as_str() {
                "elej" => (1, Some(10)),
                "kozep" => (10, Some(20)),
                _ => (20, None),
            };
            let end = match end {
                Some(day) => Fragment::new(FragmentKind::EndDay, day, RULE),
                None => Fragment::marker(FragmentKind::EndDay, RULE),
            };
            Some(MatchResult::from_match(
                whole,
                vec![
                    Fragment::new(FragmentKind::Month, month, RULE),
                    Fragment::new(FragmentKind::StartDay, start, RULE),
                    end,
                ],
            ))
        })
        .collect()
}

/// Duration part of "X-tól N napig": day, week, month or year offsets.
pub(crate) fn match_date_offset(text: &str) -> Vec<MatchResult> {
    const RULE: &str = "match_date_offset";

    patterns::date_offset()
        .captures_iter(text)
        .filter_map(|caps| {
            let whole = caps.get(0)?;
            let n = word_to_num(caps.get(1)?.as_str());
            if n < 1 {
                return None;
            }
            let unit = remove_accent(caps.get(2)?.as_str());
            let fragment = match unit.as_str() {
                "nap" => Fragment::new(FragmentKind::DayOffset, n, RULE),
                "het" => Fragment::new(FragmentKind::DayOffset, n.checked_mul(7)?, RULE),
                "honap" => Fragment::new(FragmentKind::MonthOffset, n, RULE),
                _ => Fragment::new(FragmentKind::YearOffset, n, RULE),
            };
            Some(MatchResult::from_match(whole, vec![fragment]))
        })
        .collect()
}
