//! Interval assembler.
//!
//! Turns the fragment list of one interval side into a concrete bound. The
//! bottom side fills unspecified fields with their minimum, the top side with
//! their maximum; fields before the first stated one are taken from the
//! reference time.
//!
//! ```text
//! Year -> Month -> Week -> Day -> Daypart -> Hour -> Minute -> Second
//!                   │                │
//!                   │                └─ only without an Hour fragment;
//!                   │                   replaces the Hour step
//!                   └─ only without a Day fragment; replaces Y/M/D
//! ```
//!
//! Offsets (`DayOffset`, `MonthOffset`, ...) are summed and applied after the
//! walk. An override marker for the side yields the reference time itself.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use tracing::trace;

use crate::rules::calendar::{days_in_month, monday_of_iso_week, shift_days, shift_minutes, shift_months};
use crate::{Fragment, FragmentKind};

/// Hour windows of the dayparts: hajnal, reggel, délelőtt, délután, este,
/// éjjel. The éjjel window ends on the next day.
const DAYPART_WINDOWS: [(i64, i64); 6] = [(3, 5), (6, 10), (8, 11), (12, 18), (18, 21), (22, 2)];
const NIGHT: i64 = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Side {
    Bottom,
    Top,
}

/// Outcome of assembling one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Assembly {
    /// No fragments at all.
    Empty,
    /// Fragments that do not form a calendar date (e.g. day 32).
    Invalid,
    /// The side is the reference time itself.
    Anchor(NaiveDateTime),
    Resolved { at: NaiveDateTime, has_date: bool, has_time: bool },
}

impl Assembly {
    /// The instant this side stands for, regardless of what it stated.
    pub(crate) fn instant(self) -> Option<NaiveDateTime> {
        match self {
            Assembly::Anchor(at) | Assembly::Resolved { at, .. } => Some(at),
            Assembly::Empty | Assembly::Invalid => None,
        }
    }
}

/// Output types an assembled side can be projected onto.
pub(crate) trait Projection: Sized {
    fn project(assembly: Assembly) -> Option<Self>;
}

impl Projection for NaiveDateTime {
    fn project(assembly: Assembly) -> Option<Self> {
        match assembly {
            Assembly::Anchor(now) => Some(now),
            Assembly::Resolved { at, has_date, has_time } if has_date || has_time => Some(at),
            _ => None,
        }
    }
}

impl Projection for NaiveDate {
    fn project(assembly: Assembly) -> Option<Self> {
        match assembly {
            Assembly::Anchor(now) => Some(now.date()),
            Assembly::Resolved { at, has_date: true, .. } => Some(at.date()),
            _ => None,
        }
    }
}

impl Projection for NaiveTime {
    fn project(assembly: Assembly) -> Option<Self> {
        match assembly {
            Assembly::Anchor(now) => Some(now.time()),
            Assembly::Resolved { at, has_time: true, .. } => Some(at.time()),
            _ => None,
        }
    }
}

/// Tracks which fields were stated while walking from year to minute.
struct Walk<'f> {
    fragments: &'f [Fragment],
    side: Side,
    has_date: bool,
    has_time: bool,
    pre_first: bool,
}

impl Walk<'_> {
    fn first(&self, kind: FragmentKind) -> Option<&Fragment> {
        self.fragments.iter().find(|f| f.kind == kind)
    }

    fn value(&self, kind: FragmentKind) -> Option<i64> {
        self.first(kind).and_then(|f| f.value)
    }

    /// `None` when the values overflow.
    fn sum(&self, kind: FragmentKind) -> Option<i64> {
        self.fragments.iter().filter(|f| f.kind == kind).filter_map(|f| f.value).try_fold(0i64, i64::checked_add)
    }

    fn stated(&mut self, value: i64, is_time: bool) -> i64 {
        if is_time {
            self.has_time = true;
        } else {
            self.has_date = true;
        }
        self.pre_first = false;
        value
    }

    /// Stated value, else the reference value before the first stated field,
    /// else the side's extreme.
    fn field(&mut self, stated: Option<i64>, is_time: bool, now: i64, min: i64, max: i64) -> i64 {
        match stated {
            Some(value) => self.stated(value, is_time),
            None if self.pre_first => now,
            None if self.side == Side::Bottom => min,
            None => max,
        }
    }
}

/// Assembles `fragments` into the bound of one interval side.
pub(crate) fn assemble(fragments: &[Fragment], now: NaiveDateTime, side: Side) -> Assembly {
    if fragments.is_empty() {
        return Assembly::Empty;
    }

    let marker = match side {
        Side::Bottom => FragmentKind::OverrideBottomWithNow,
        Side::Top => FragmentKind::OverrideTopWithNow,
    };
    if fragments.iter().any(|f| f.kind == marker) {
        return Assembly::Anchor(now);
    }

    match walk(fragments, now, side) {
        Some(assembly) => assembly,
        None => {
            trace!(?side, ?fragments, "fragments do not form a valid date");
            Assembly::Invalid
        }
    }
}

fn walk(fragments: &[Fragment], now: NaiveDateTime, side: Side) -> Option<Assembly> {
    use FragmentKind::*;

    let bottom = side == Side::Bottom;
    let mut w = Walk { fragments, side, has_date: false, has_time: false, pre_first: true };

    // a missing year never ends the "before first stated field" stretch
    let mut year = match w.value(Year) {
        Some(year) => w.stated(year, false),
        None => now.year() as i64,
    };
    let mut month = w.field(w.value(Month), false, now.month() as i64, 1, 12);

    let mut day = None;
    let has_day = fragments.iter().any(|f| matches!(f.kind, Day | StartDay | EndDay));
    if !has_day {
        if let Some(week) = w.value(Week) {
            w.stated(week, false);
            let date = monday_of_iso_week(year, week)? + Duration::days(if bottom { 0 } else { 6 });
            year = date.year() as i64;
            month = date.month() as i64;
            day = Some(date.day() as i64);
        }
    }

    let month_end = days_in_month(i32::try_from(year).ok()?, u32::try_from(month).ok()?)? as i64;
    let day = match day {
        Some(day) => day,
        None => {
            let ranged = if bottom {
                w.value(StartDay)
            } else {
                w.first(EndDay).map(|f| f.value.unwrap_or(month_end))
            };
            w.field(ranged.or(w.value(Day)), false, now.day() as i64, 1, month_end)
        }
    };
    let mut date = NaiveDate::from_ymd_opt(i32::try_from(year).ok()?, u32::try_from(month).ok()?, u32::try_from(day).ok()?)?;

    let stated_hour = w.value(Hour);
    let mut hour = None;
    if stated_hour.is_none() {
        if let Some(daypart) = w.value(Daypart) {
            w.stated(daypart, true);
            let (from, to) = *DAYPART_WINDOWS.get(usize::try_from(daypart).ok()?)?;
            if bottom {
                hour = Some(from);
            } else {
                if daypart == NIGHT {
                    date = date.succ_opt()?;
                }
                hour = Some(to);
            }
        }
    }
    let hour = match hour {
        Some(hour) => hour,
        None => w.field(stated_hour, true, now.hour() as i64, 0, 23),
    };
    let minute = w.field(w.value(Minute), true, now.minute() as i64, 0, 59);
    let second = if bottom { 0 } else { 59 };

    let time = NaiveTime::from_hms_opt(u32::try_from(hour).ok()?, u32::try_from(minute).ok()?, second)?;
    let mut at = date.and_time(time);

    let months = w.sum(YearOffset)?.checked_mul(12)?.checked_add(w.sum(MonthOffset)?)?;
    if months != 0 {
        at = shift_months(at, months)?;
    }
    at = shift_days(at, w.sum(DayOffset)?)?;
    at = shift_minutes(at, w.sum(HourOffset)?.checked_mul(60)?.checked_add(w.sum(MinuteOffset)?)?)?;

    if !(w.has_date || w.has_time) {
        return Some(Assembly::Empty);
    }
    Some(Assembly::Resolved { at, has_date: w.has_date, has_time: w.has_time })
}

#[cfg(test)]
mod tests {
    use super::*;
    use FragmentKind::*;

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 14).unwrap().and_hms_opt(10, 30, 0).unwrap()
    }

    fn frags(parts: &[(FragmentKind, Option<i64>)]) -> Vec<Fragment> {
        parts.iter().map(|&(kind, value)| Fragment { kind, value, rule: "test" }).collect()
    }

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    fn bounds(parts: &[(FragmentKind, Option<i64>)]) -> (Option<NaiveDateTime>, Option<NaiveDateTime>) {
        let fragments = frags(parts);
        (
            NaiveDateTime::project(assemble(&fragments, now(), Side::Bottom)),
            NaiveDateTime::project(assemble(&fragments, now(), Side::Top)),
        )
    }

    #[test]
    fn fills_unstated_fields_with_extremes() {
        assert_eq!(
            bounds(&[(Year, Some(2020)), (Month, Some(2))]),
            (Some(at(2020, 2, 1, 0, 0, 0)), Some(at(2020, 2, 29, 23, 59, 59)))
        );
        assert_eq!(
            bounds(&[(Year, Some(2021))]),
            (Some(at(2021, 1, 1, 0, 0, 0)), Some(at(2021, 12, 31, 23, 59, 59)))
        );
    }

    #[test]
    fn leading_unstated_fields_come_from_reference() {
        assert_eq!(
            bounds(&[(Hour, Some(8))]),
            (Some(at(2023, 6, 14, 8, 0, 0)), Some(at(2023, 6, 14, 8, 59, 59)))
        );
        assert_eq!(
            bounds(&[(Day, Some(5))]),
            (Some(at(2023, 6, 5, 0, 0, 0)), Some(at(2023, 6, 5, 23, 59, 59)))
        );
    }

    #[test]
    fn week_replaces_the_date() {
        assert_eq!(
            bounds(&[(Year, Some(2023)), (Week, Some(25))]),
            (Some(at(2023, 6, 19, 0, 0, 0)), Some(at(2023, 6, 25, 23, 59, 59)))
        );
    }

    #[test]
    fn day_ranges_pick_their_side() {
        assert_eq!(
            bounds(&[(Month, Some(3)), (StartDay, Some(20)), (EndDay, Some(22))]),
            (Some(at(2023, 3, 20, 0, 0, 0)), Some(at(2023, 3, 22, 23, 59, 59)))
        );
        assert_eq!(
            bounds(&[(Year, Some(2024)), (Month, Some(2)), (StartDay, Some(20)), (EndDay, None)]),
            (Some(at(2024, 2, 20, 0, 0, 0)), Some(at(2024, 2, 29, 23, 59, 59)))
        );
    }

    #[test]
    fn dayparts_span_their_window() {
        assert_eq!(
            bounds(&[(Year, Some(2023)), (Month, Some(6)), (Day, Some(14)), (Daypart, Some(1))]),
            (Some(at(2023, 6, 14, 6, 0, 0)), Some(at(2023, 6, 14, 10, 59, 59)))
        );
        assert_eq!(
            bounds(&[(Year, Some(2023)), (Month, Some(6)), (Day, Some(30)), (Daypart, Some(5))]),
            (Some(at(2023, 6, 30, 22, 0, 0)), Some(at(2023, 7, 1, 2, 59, 59)))
        );
    }

    #[test]
    fn stated_hour_wins_over_daypart() {
        assert_eq!(
            bounds(&[(Hour, Some(18)), (Minute, Some(12)), (Daypart, Some(4))]),
            (Some(at(2023, 6, 14, 18, 12, 0)), Some(at(2023, 6, 14, 18, 12, 59)))
        );
    }

    #[test]
    fn offsets_apply_after_the_walk() {
        assert_eq!(
            bounds(&[(Year, Some(2023)), (Month, Some(1)), (Day, Some(31)), (MonthOffset, Some(1))]),
            (Some(at(2023, 2, 28, 0, 0, 0)), Some(at(2023, 2, 28, 23, 59, 59)))
        );
        assert_eq!(
            bounds(&[(Year, Some(2020)), (Month, Some(12)), (Day, Some(19)), (DayOffset, Some(3))]),
            (Some(at(2020, 12, 22, 0, 0, 0)), Some(at(2020, 12, 22, 23, 59, 59)))
        );
    }

    #[test]
    fn overflowing_offsets_are_invalid() {
        let fragments = frags(&[(Year, Some(2023)), (YearOffset, Some(i64::MAX))]);
        assert_eq!(assemble(&fragments, now(), Side::Bottom), Assembly::Invalid);
        let fragments = frags(&[(DayOffset, Some(i64::MAX)), (DayOffset, Some(1)), (Day, Some(1))]);
        assert_eq!(assemble(&fragments, now(), Side::Top), Assembly::Invalid);
        let fragments = frags(&[(Hour, Some(8)), (HourOffset, Some(i64::MAX / 2))]);
        assert_eq!(assemble(&fragments, now(), Side::Bottom), Assembly::Invalid);
    }

    #[test]
    fn override_marker_anchors_its_side() {
        let fragments = frags(&[(Year, Some(2023)), (Month, Some(6)), (Day, Some(11)), (OverrideTopWithNow, None)]);
        assert_eq!(assemble(&fragments, now(), Side::Top), Assembly::Anchor(now()));
        assert!(matches!(assemble(&fragments, now(), Side::Bottom), Assembly::Resolved { .. }));
    }

    #[test]
    fn invalid_dates_are_reported_not_raised() {
        let fragments = frags(&[(Month, Some(2)), (Day, Some(31))]);
        assert_eq!(assemble(&fragments, now(), Side::Bottom), Assembly::Invalid);
        assert_eq!(assemble(&[], now(), Side::Bottom), Assembly::Empty);
    }

    #[test]
    fn projections_need_the_matching_component() {
        let date_only = frags(&[(Year, Some(2023)), (Month, Some(6)), (Day, Some(1))]);
        let assembly = assemble(&date_only, now(), Side::Bottom);
        assert_eq!(NaiveDate::project(assembly), NaiveDate::from_ymd_opt(2023, 6, 1));
        assert_eq!(NaiveTime::project(assembly), None);

        let time_only = frags(&[(Hour, Some(8)), (Minute, Some(15))]);
        let assembly = assemble(&time_only, now(), Side::Top);
        assert_eq!(NaiveTime::project(assembly), NaiveTime::from_hms_opt(8, 15, 59));
        assert_eq!(NaiveDate::project(assembly), None);
    }
}
