use crate::engine::{self, Extraction, Hit, Projection};
use crate::error::{Error, Result};
use crate::rules::normalize::lowercase_in_place;
use crate::{Fragment, Range, RuleInput};
use chrono::{Local, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Parsing context.
///
/// Holds the anchor that relative expressions ("holnap", "múlt héten") are
/// resolved against.
#[derive(Debug, Clone)]
pub struct Context {
    /// Reference datetime used to resolve relative expressions.
    pub reference_time: NaiveDateTime,
}

impl Default for Context {
    /// The current local time, read on every call.
    fn default() -> Self {
        Self { reference_time: Local::now().naive_local() }
    }
}

/// How to resolve a bare weekday or month that could mean either the last or
/// the next occurrence.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchScope {
    /// Keep the current week or year.
    #[default]
    NotRestricted,
    /// Prefer the next occurrence.
    FutureDay,
    /// Prefer the last occurrence.
    PastSearch,
}

/// Options that affect resolution.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    pub search_scope: SearchScope,
    /// Ignore 4-digit numbers outside 1900..2100 as years.
    pub realistic_year_required: bool,
}

impl Default for Options {
    fn default() -> Self {
        Self { search_scope: SearchScope::NotRestricted, realistic_year_required: true }
    }
}

/// A resolved interval. A `None` side is open or was not stated in a form
/// the projection can express.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval<T> {
    pub start_date: Option<T>,
    pub end_date: Option<T>,
}

/// Character span of a match in the original input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EntitySpan {
    /// Start character index (inclusive).
    pub start: usize,
    /// End character index (exclusive).
    pub end: usize,
    /// The matched slice of the original input.
    pub text: String,
}

impl EntitySpan {
    pub fn new(start: usize, end: usize, text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if end < start || text.chars().count() != end - start {
            return Err(Error::InvalidSpan { start, end, text });
        }
        Ok(Self { start, end, text })
    }
}

/// An [`Interval`] with the span of text it was read from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpannedInterval<T> {
    pub start_date: Option<T>,
    pub end_date: Option<T>,
    pub span: EntitySpan,
}

impl<T: Copy> SpannedInterval<T> {
    pub fn interval(&self) -> Interval<T> {
        Interval { start_date: self.start_date, end_date: self.end_date }
    }
}

/// One rule match as reported by [`text2datetime_verbose`].
#[derive(Debug, Clone, Serialize)]
pub struct RuleHit {
    pub rule: &'static str,
    pub text: String,
    pub fragments: Vec<Fragment>,
}

/// How one segment of the sentence was read.
#[derive(Debug, Clone, Serialize)]
pub struct SegmentTrace {
    /// Segment text, lower-cased.
    pub text: String,
    /// Interval form the segment was read as, e.g. `"from_until"`.
    pub form: &'static str,
    /// `None` for an open start.
    pub start_hits: Option<Vec<RuleHit>>,
    pub end_hits: Option<Vec<RuleHit>>,
    /// Whether the segment produced a reported interval.
    pub kept: bool,
}

/// Result of [`text2datetime_verbose`].
///
/// Meant for debugging rule interactions; the plain entry points do not
/// build these traces.
#[derive(Debug, Clone, Serialize)]
pub struct ExtractionDetails {
    pub text: String,
    pub intervals: Vec<SpannedInterval<NaiveDateTime>>,
    pub segments: Vec<SegmentTrace>,
    /// Names of rules the trigger scan activated for the whole sentence.
    pub active_rules: Vec<&'static str>,
    pub elapsed: Duration,
}

/// Extracts datetime intervals from Hungarian `text`.
///
/// # Example
/// ```
/// use chrono::NaiveDate;
/// use hundate::{Context, Options, text2datetime};
///
/// let now = NaiveDate::from_ymd_opt(2020, 12, 18).unwrap().and_hms_opt(0, 0, 0).unwrap();
/// let out = text2datetime("holnap", &Context { reference_time: now }, &Options::default());
/// assert_eq!(out[0].start_date, NaiveDate::from_ymd_opt(2020, 12, 19).unwrap().and_hms_opt(0, 0, 0));
/// ```
pub fn text2datetime(text: &str, context: &Context, options: &Options) -> Vec<Interval<NaiveDateTime>> {
    plain(text2datetime_with_spans(text, context, options))
}

/// Like [`text2datetime`], keeping only intervals with a stated date.
pub fn text2date(text: &str, context: &Context, options: &Options) -> Vec<Interval<NaiveDate>> {
    plain(text2date_with_spans(text, context, options))
}

/// Like [`text2datetime`], keeping only intervals with a stated time of day.
pub fn text2time(text: &str, context: &Context, options: &Options) -> Vec<Interval<NaiveTime>> {
    plain(text2time_with_spans(text, context, options))
}

/// Like [`text2datetime`], with the [`EntitySpan`] each interval was read
/// from.
pub fn text2datetime_with_spans(
    text: &str,
    context: &Context,
    options: &Options,
) -> Vec<SpannedInterval<NaiveDateTime>> {
    extract_projected(text, context, options)
}

/// [`text2date`] with spans. The span still covers any time of day the
/// text stated.
pub fn text2date_with_spans(text: &str, context: &Context, options: &Options) -> Vec<SpannedInterval<NaiveDate>> {
    extract_projected(text, context, options)
}

/// [`text2time`] with spans.
pub fn text2time_with_spans(text: &str, context: &Context, options: &Options) -> Vec<SpannedInterval<NaiveTime>> {
    extract_projected(text, context, options)
}

/// [`text2datetime_with_spans`] plus a per-segment trace of the rules that
/// fired.
pub fn text2datetime_verbose(text: &str, context: &Context, options: &Options) -> ExtractionDetails {
    let started = Instant::now();
    let lowered = Lowered::new(text);
    let active_rules = engine::active_rule_names(&lowered.text);

    let mut intervals = Vec::new();
    let mut segments = Vec::new();
    for extraction in engine::extract(&rule_input(&lowered, context, options)) {
        let projected = project::<NaiveDateTime>(text, &lowered, &extraction);
        segments.push(SegmentTrace {
            text: lowered.text[extraction.segment.start..extraction.segment.end].to_string(),
            form: extraction.form.name(),
            start_hits: extraction.start_hits.as_deref().map(rule_hits),
            end_hits: extraction.end_hits.as_deref().map(rule_hits),
            kept: projected.is_some(),
        });
        intervals.extend(projected);
    }

    ExtractionDetails { text: text.to_string(), intervals, segments, active_rules, elapsed: started.elapsed() }
}

/// Runs the rule table over the whole of `text` without any splitting and
/// returns every fragment in rule order.
///
/// This is the raw material the interval assembler works from; useful for
/// checking what a rule reads out of a phrase.
pub fn match_rules(text: &str, context: &Context, options: &Options) -> Vec<Fragment> {
    let lowered = Lowered::new(text);
    engine::match_rules(&rule_input(&lowered, context, options))
}

fn plain<T: Copy>(spanned: Vec<SpannedInterval<T>>) -> Vec<Interval<T>> {
    spanned.iter().map(SpannedInterval::interval).collect()
}

fn rule_hits(hits: &[Hit]) -> Vec<RuleHit> {
    hits.iter()
        .map(|hit| RuleHit { rule: hit.rule, text: hit.result.text.clone(), fragments: hit.result.fragments.clone() })
        .collect()
}

fn rule_input<'a>(lowered: &'a Lowered, context: &Context, options: &Options) -> RuleInput<'a> {
    RuleInput {
        text: &lowered.text,
        now: context.reference_time,
        scope: options.search_scope,
        realistic_year_required: options.realistic_year_required,
        paired_side: false,
    }
}

fn extract_projected<T: Projection>(text: &str, context: &Context, options: &Options) -> Vec<SpannedInterval<T>> {
    let lowered = Lowered::new(text);
    engine::extract(&rule_input(&lowered, context, options))
        .iter()
        .filter_map(|extraction| project(text, &lowered, extraction))
        .collect()
}

fn project<T: Projection>(text: &str, lowered: &Lowered, extraction: &Extraction) -> Option<SpannedInterval<T>> {
    let start_date = T::project(extraction.start);
    let end_date = T::project(extraction.end);
    if start_date.is_none() && end_date.is_none() {
        return None;
    }
    let span = lowered.span(text, extraction.span)?;
    Some(SpannedInterval { start_date, end_date, span })
}

/// Lower-cased copy of the input. Characters keep their positions, so a
/// byte range in the copy maps to the same character range in the original.
struct Lowered {
    text: String,
}

impl Lowered {
    fn new(original: &str) -> Self {
        Self { text: lowercase_in_place(original) }
    }

    fn span(&self, original: &str, range: Range) -> Option<EntitySpan> {
        let start = self.text.get(..range.start)?.chars().count();
        let len = self.text.get(range.start..range.end)?.chars().count();
        let text: String = original.chars().skip(start).take(len).collect();
        EntitySpan::new(start, start + len, text).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FragmentKind;
    use proptest::prelude::*;

    fn context() -> Context {
        let date = NaiveDate::from_ymd_opt(2020, 12, 18).unwrap();
        Context { reference_time: date.and_hms_opt(0, 0, 0).unwrap() }
    }

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> Option<NaiveDateTime> {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s)
    }

    fn day(y: i32, m: u32, d: u32) -> Interval<NaiveDateTime> {
        Interval { start_date: at(y, m, d, 0, 0, 0), end_date: at(y, m, d, 23, 59, 59) }
    }

    fn parse(text: &str) -> Vec<Interval<NaiveDateTime>> {
        text2datetime(text, &context(), &Options::default())
    }

    #[test]
    fn resolves_sentences() {
        assert_eq!(parse("ma"), vec![day(2020, 12, 18)]);
        assert_eq!(
            parse("legyen ma reggel nyolckor"),
            vec![Interval { start_date: at(2020, 12, 18, 8, 0, 0), end_date: at(2020, 12, 18, 8, 59, 59) }]
        );
        assert_eq!(
            parse("holnaptól 5 napig"),
            vec![Interval { start_date: at(2020, 12, 19, 0, 0, 0), end_date: at(2020, 12, 24, 23, 59, 59) }]
        );
        assert_eq!(parse("csütörtök vagy péntek"), vec![day(2020, 12, 17), day(2020, 12, 18)]);
        assert_eq!(
            parse("elmúlt két hónap"),
            vec![Interval { start_date: at(2020, 10, 18, 0, 0, 0), end_date: at(2020, 12, 18, 0, 0, 0) }]
        );
        assert_eq!(
            parse("találkozzunk szombaton háromnegyed nyolckor"),
            vec![Interval { start_date: at(2020, 12, 19, 7, 45, 0), end_date: at(2020, 12, 19, 7, 45, 59) }]
        );
        assert_eq!(
            parse("ezen a héten"),
            vec![Interval { start_date: at(2020, 12, 14, 0, 0, 0), end_date: at(2020, 12, 20, 23, 59, 59) }]
        );
    }

    #[test]
    fn past_hours_run_up_to_the_reference_time() {
        let ctx = Context { reference_time: at(2020, 12, 18, 10, 0, 0).unwrap() };
        let expected = vec![Interval { start_date: at(2020, 12, 18, 8, 0, 0), end_date: at(2020, 12, 18, 10, 0, 0) }];
        assert_eq!(text2datetime("elmúlt 2 órában", &ctx, &Options::default()), expected);
        assert_eq!(text2datetime("az elmúlt két óra", &ctx, &Options::default()), expected);
    }

    #[test]
    fn this_week_and_spelled_out_days() {
        let week = Interval { start_date: at(2020, 12, 14, 0, 0, 0), end_date: at(2020, 12, 20, 23, 59, 59) };
        assert_eq!(parse("ez a hét"), vec![week]);
        assert_eq!(parse("március huszonkettő"), vec![day(2020, 3, 22)]);
    }

    #[test]
    fn hour_ranges_share_date_and_daypart() {
        assert_eq!(
            parse("holnap 8-tól 10-ig"),
            vec![Interval { start_date: at(2020, 12, 19, 8, 0, 0), end_date: at(2020, 12, 19, 10, 59, 59) }]
        );
        assert_eq!(
            parse("este 8 órától 10 óráig"),
            vec![Interval { start_date: at(2020, 12, 18, 20, 0, 0), end_date: at(2020, 12, 18, 22, 59, 59) }]
        );
    }

    #[test]
    fn huge_counts_never_panic() {
        let texts = [
            "9223372036854775807 év múlva",
            "9223372036854775807 perccel nyolc után",
            "holnaptól 9223372036854775807 hétig",
            "9223372036854775807 nap múlva",
            "elmúlt 9223372036854775807 évben",
            "9223372036854775807 negyedórára",
        ];
        for text in texts {
            let _ = text2datetime_verbose(text, &context(), &Options::default());
        }
        assert!(parse("9223372036854775807 év múlva").is_empty());
        assert!(parse("9223372036854775807 perccel nyolc után").is_empty());
    }

    #[test]
    fn unmatched_or_invalid_text_yields_nothing() {
        assert!(parse("január 32").is_empty());
        assert!(parse("a fagyzugos részeken gyenge fagy előfordulhat").is_empty());
        assert!(parse("").is_empty());
    }

    #[test]
    fn open_sides_stay_none() {
        assert_eq!(parse("májusig"), vec![Interval { start_date: None, end_date: at(2020, 5, 31, 23, 59, 59) }]);
    }

    #[test]
    fn spans_are_character_offsets_into_the_original() {
        let out = text2datetime_with_spans("Találkozzunk SZOMBATON", &context(), &Options::default());
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].span, EntitySpan { start: 13, end: 20, text: "SZOMBAT".to_string() });

        let out = text2datetime_with_spans("találkozunk ma és holnap", &context(), &Options::default());
        let spans: Vec<_> = out.iter().map(|i| (i.span.start, i.span.end, i.span.text.as_str())).collect();
        assert_eq!(spans, vec![(12, 14, "ma"), (18, 24, "holnap")]);

        let out = text2datetime_with_spans("majd 2025-05-05-én", &context(), &Options::default());
        assert_eq!(out[0].span.text, "2025-05-05");
        assert_eq!(out[0].interval(), day(2025, 5, 5));
    }

    #[test]
    fn interval_spans_include_suffixes() {
        let out = text2datetime_with_spans("januártól februárig", &context(), &Options::default());
        assert_eq!(out[0].span, EntitySpan { start: 0, end: 19, text: "januártól februárig".to_string() });
    }

    #[test]
    fn projections_drop_what_they_cannot_express() {
        let ctx = context();
        let opts = Options::default();

        let dates = text2date("holnap délután 3-kor", &ctx, &opts);
        assert_eq!(dates, vec![Interval { start_date: NaiveDate::from_ymd_opt(2020, 12, 19), end_date: NaiveDate::from_ymd_opt(2020, 12, 19) }]);

        let times = text2time("holnap délután 3-kor", &ctx, &opts);
        assert_eq!(times, vec![Interval { start_date: NaiveTime::from_hms_opt(15, 0, 0), end_date: NaiveTime::from_hms_opt(15, 59, 59) }]);

        assert!(text2time("holnap", &ctx, &opts).is_empty());
    }

    #[test]
    fn search_scope_moves_bare_weekdays() {
        let ctx = context();
        let future = Options { search_scope: SearchScope::FutureDay, ..Options::default() };
        let past = Options { search_scope: SearchScope::PastSearch, ..Options::default() };
        assert_eq!(text2datetime("hétfőn", &ctx, &future), vec![day(2020, 12, 21)]);
        assert_eq!(text2datetime("vasárnap", &ctx, &past), vec![day(2020, 12, 13)]);
    }

    #[test]
    fn entity_span_validates_its_text() {
        assert!(EntitySpan::new(2, 5, "abc").is_ok());
        assert!(matches!(EntitySpan::new(5, 2, ""), Err(Error::InvalidSpan { .. })));
        assert!(matches!(EntitySpan::new(0, 2, "abc"), Err(Error::InvalidSpan { .. })));
    }

    #[test]
    fn verbose_trace_names_segments_and_rules() {
        let details = text2datetime_verbose("kedden vagy szerdán", &context(), &Options::default());
        assert_eq!(details.intervals.len(), 2);
        assert_eq!(details.segments.len(), 2);
        assert!(details.segments.iter().all(|s| s.form == "implicit" && s.kept));
        assert!(details.active_rules.contains(&"weekday"));
        let hits = details.segments[1].start_hits.as_ref().unwrap();
        assert_eq!(hits[0].rule, "weekday");
        assert_eq!(hits[0].text, "szerdá");
    }

    #[test]
    fn match_rules_returns_raw_fragments() {
        let fragments = match_rules("Holnap", &context(), &Options::default());
        let values: Vec<_> = fragments.iter().map(|f| (f.kind, f.value, f.rule)).collect();
        assert_eq!(
            values,
            vec![
                (FragmentKind::Year, Some(2020), "match_relative_day"),
                (FragmentKind::Month, Some(12), "match_relative_day"),
                (FragmentKind::Day, Some(19), "match_relative_day"),
            ]
        );
        assert!(match_rules("semmi", &context(), &Options::default()).is_empty());
    }

    #[test]
    fn context_default_reads_the_clock_per_call() {
        let before = Local::now().naive_local();
        let ctx = Context::default();
        assert!(ctx.reference_time >= before);
    }

    proptest! {
        #[test]
        fn intervals_are_ordered(words in proptest::collection::vec(
            prop::sample::select(vec![
                "ma", "holnap", "tegnap", "kedden", "jövő", "múlt", "héten", "januártól", "márciusig",
                "2021", "reggel", "este", "8-kor", "negyed", "kilenc", "elmúlt", "három", "napban", "vagy",
                "és", "5-én", "október", "2020-tól", "2022-ig", "hónapban", "délután",
            ]),
            0..6,
        )) {
            let text = words.join(" ");
            for interval in text2datetime_with_spans(&text, &context(), &Options::default()) {
                if let (Some(start), Some(end)) = (interval.start_date, interval.end_date) {
                    prop_assert!(start <= end, "{text}: {start} > {end}");
                }
                prop_assert!(interval.span.end <= text.chars().count());
            }
        }

        #[test]
        fn arbitrary_text_never_panics(text in "\\PC{0,40}") {
            let _ = text2datetime_verbose(&text, &context(), &Options::default());
        }
    }
}
