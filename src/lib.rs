use chrono::NaiveDateTime;
use serde::Serialize;

#[macro_use]
mod macros;
mod api;
mod duration;
mod engine;
mod error;
mod frequency;
mod restriction;
mod rules;
mod textualize;

pub use api::{
    Context, EntitySpan, ExtractionDetails, Interval, Options, RuleHit, SearchScope, SegmentTrace, SpannedInterval,
    match_rules, text2date, text2date_with_spans, text2datetime, text2datetime_verbose, text2datetime_with_spans, text2time,
    text2time_with_spans,
};
pub use duration::{Duration, DurationUnit, parse_duration, parse_duration_detailed};
pub use error::{Error, Result};
pub use frequency::{Frequency, FrequencyMatch, parse_frequency};
pub use restriction::{RestrictionOutcome, extract_within_interval};
pub use rules::normalize::{num_to_word, remove_accent, word_to_num};
pub use textualize::{Texts, datetime2text};

// --- Fragment data model ----------------------------------------------------

/// The kinds of temporal fragment a matcher can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum FragmentKind {
    Year,
    Month,
    Week,
    Day,
    /// First day of a day-of-month sub-range.
    StartDay,
    /// Last day of a day-of-month sub-range; a null value means month end.
    EndDay,
    /// Index into the daypart table (hajnal, reggel, délelőtt, délután, este, éjjel).
    Daypart,
    Hour,
    Minute,
    MinuteOffset,
    HourOffset,
    DayOffset,
    MonthOffset,
    YearOffset,
    OverrideBottomWithNow,
    OverrideTopWithNow,
}

impl FragmentKind {
    /// Kinds that carry a calendar or clock component and take part in the
    /// field walk of the assembler.
    pub(crate) fn is_field(self) -> bool {
        matches!(
            self,
            FragmentKind::Year
                | FragmentKind::Month
                | FragmentKind::Week
                | FragmentKind::Day
                | FragmentKind::Daypart
                | FragmentKind::Hour
                | FragmentKind::Minute
        )
    }
}

/// A single typed date/time component extracted from text, tagged with the
/// rule that produced it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Fragment {
    pub kind: FragmentKind,
    pub value: Option<i64>,
    pub rule: &'static str,
}

impl Fragment {
    pub(crate) fn new(kind: FragmentKind, value: i64, rule: &'static str) -> Self {
        Fragment { kind, value: Some(value), rule }
    }

    pub(crate) fn marker(kind: FragmentKind, rule: &'static str) -> Self {
        Fragment { kind, value: None, rule }
    }
}

/// Fragments produced by one regex match, with the matched text and its byte
/// range in the lower-cased text handed to the matcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct MatchResult {
    pub fragments: Vec<Fragment>,
    pub text: String,
    pub range: Range,
}

impl MatchResult {
    pub(crate) fn new(text: &str, start: usize, end: usize, fragments: Vec<Fragment>) -> Self {
        MatchResult { fragments, text: text[start..end].to_string(), range: Range { start, end } }
    }

    pub(crate) fn from_match(m: regex::Match<'_>, fragments: Vec<Fragment>) -> Self {
        MatchResult { fragments, text: m.as_str().to_string(), range: Range { start: m.start(), end: m.end() } }
    }

    pub(crate) fn shifted(mut self, offset: usize) -> Self {
        self.range.start += offset;
        self.range.end += offset;
        self
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Range {
    /// Start byte index (inclusive).
    pub start: usize,
    /// End byte index (exclusive).
    pub end: usize,
}

impl Range {
    pub(crate) fn union(self, other: Range) -> Range {
        Range { start: self.start.min(other.start), end: self.end.max(other.end) }
    }

    pub(crate) fn cover(ranges: impl IntoIterator<Item = Range>) -> Option<Range> {
        ranges.into_iter().reduce(Range::union)
    }
}

// --- Rules ------------------------------------------------------------------

/// Everything a matcher sees: the (lower-cased) text and the call settings.
#[derive(Debug, Clone, Copy)]
pub(crate) struct RuleInput<'a> {
    pub text: &'a str,
    pub now: NaiveDateTime,
    pub scope: SearchScope,
    pub realistic_year_required: bool,
    /// The text is one side of a two-sided interval ("8-tól 10-ig"), so a
    /// bare `N-tól`/`N-ig` reads as an hour.
    pub paired_side: bool,
}

pub(crate) type Matcher = fn(&RuleInput<'_>) -> Vec<MatchResult>;

/// One registration in the ordered rule table.
pub(crate) struct Rule {
    pub name: &'static str,
    pub matcher: Matcher,
    /// Any one of these substrings must appear in the input for the rule to
    /// run. Empty means no phrase gate.
    pub optional_phrases: &'static [&'static str],
    /// Bucket mask; the rule runs only if the input has one of the buckets.
    pub buckets: u32,
    /// Names of rules whose non-empty output discards this rule's output.
    pub suppressed_by: &'static [&'static str],
}

impl std::fmt::Debug for Rule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Rule")
            .field("name", &self.name)
            .field("matcher", &"<function>")
            .field("buckets", &self.buckets)
            .field("suppressed_by", &self.suppressed_by)
            .finish()
    }
}
