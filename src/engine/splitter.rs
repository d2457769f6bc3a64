//! Structure splitter.
//!
//! Cuts a lower-cased sentence into the pieces the rules run on:
//!
//! ```text
//! sentence -> clauses (;!?()[] and ", ")
//!          -> disjuncts ("vagy" / "és")
//!          -> duration-anchored form  ("X-tól N napig")
//!           | interval candidates    (labelled, -tól/-ig, ranges, open)
//!           | implicit single point
//! ```
//!
//! Every piece keeps its byte offset into the sentence so match spans can be
//! reported against the original input.

use regex::Regex;
use tracing::trace;

use crate::rules::patterns;

/// A slice of the sentence and its byte offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Piece<'a> {
    pub text: &'a str,
    pub offset: usize,
}

impl<'a> Piece<'a> {
    pub(crate) fn new(text: &'a str, offset: usize) -> Self {
        Piece { text, offset }
    }

    fn sub(self, start: usize, end: usize) -> Piece<'a> {
        Piece { text: &self.text[start..end], offset: self.offset + start }
    }

    fn group(self, m: regex::Match<'_>) -> Piece<'a> {
        self.sub(m.start(), m.end()).trimmed()
    }

    fn trimmed(self) -> Piece<'a> {
        let lead = self.text.len() - self.text.trim_start().len();
        let text = self.text.trim();
        Piece { text, offset: self.offset + lead }
    }

    fn is_blank(self) -> bool {
        self.text.trim().is_empty()
    }

    // Pieces between the matches of `separator`.
    fn split_by(self, separator: &Regex) -> Vec<Piece<'a>> {
        let mut pieces = Vec::new();
        let mut last = 0;
        for m in separator.find_iter(self.text) {
            pieces.push(self.sub(last, m.start()));
            last = m.end();
        }
        pieces.push(self.sub(last, self.text.len()));
        pieces.into_iter().filter(|p| !p.is_blank()).map(Piece::trimmed).collect()
    }
}

/// Which grammatical shape a segment was read as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub(crate) enum Form {
    Implicit,
    DurationAnchored,
    Labelled,
    FromUntil,
    RangeYmd,
    RangeYm,
    RangeMd,
    RangeY,
    RangeM,
    FromOnly,
    UntilOnly,
}

impl Form {
    pub(crate) fn name(self) -> &'static str {
        match self {
            Form::Implicit => "implicit",
            Form::DurationAnchored => "duration_anchored",
            Form::Labelled => "labelled",
            Form::FromUntil => "from_until",
            Form::RangeYmd => "range_ymd",
            Form::RangeYm => "range_ym",
            Form::RangeMd => "range_md",
            Form::RangeY => "range_y",
            Form::RangeM => "range_m",
            Form::FromOnly => "from_only",
            Form::UntilOnly => "until_only",
        }
    }
}

/// One way of reading a segment as an interval. A `None` side is open.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct IntervalSplit<'a> {
    pub form: Form,
    pub start: Option<Piece<'a>>,
    pub end: Option<Piece<'a>>,
    /// Text after the end side of a two-sided form ("keddtől csütörtökig
    /// délután"); what it states applies to both sides.
    pub tail: Option<Piece<'a>>,
}

/// Splits a sentence into clauses, unless the whole sentence is a labelled
/// "kezdő dátum: … végső dátum: …" pair.
pub(crate) fn split_clauses(sentence: &str) -> Vec<Piece<'_>> {
    let whole = Piece::new(sentence, 0);
    if patterns::labelled_interval().is_match(sentence) {
        return if whole.is_blank() { vec![] } else { vec![whole.trimmed()] };
    }
    whole.split_by(patterns::clause_break())
}

/// Splits a clause at every "vagy"/"és", unless it is duration-anchored.
pub(crate) fn split_disjuncts(clause: Piece<'_>) -> Vec<Piece<'_>> {
    if patterns::from_then_duration().is_match(clause.text) || patterns::duration_then_from().is_match(clause.text) {
        return vec![clause];
    }
    let parts = clause.split_by(patterns::conjunction());
    trace!(clause = clause.text, parts = parts.len(), "disjunct split");
    parts
}

/// `(from part, duration part)` of "X-tól N napig" or "N napra X-tól".
pub(crate) fn split_duration(segment: Piece<'_>) -> Option<(Piece<'_>, Piece<'_>)> {
    if let Some(caps) = patterns::from_then_duration().captures(segment.text) {
        return Some((segment.group(caps.get(1)?), segment.group(caps.get(2)?)));
    }
    let caps = patterns::duration_then_from().captures(segment.text)?;
    Some((segment.group(caps.get(2)?), segment.group(caps.get(1)?)))
}

/// Candidate interval readings of `segment`, most specific first.
///
/// A segment that is itself a single-month day range ("március 20-tól
/// 22-ig") has no candidates: the month-interval rule reads it whole.
pub(crate) fn interval_candidates(segment: Piece<'_>) -> Vec<IntervalSplit<'_>> {
    if patterns::month_interval().is_match(segment.text) {
        return vec![];
    }

    let two_sided: [(Form, &Regex); 7] = [
        (Form::Labelled, patterns::labelled_interval()),
        (Form::FromUntil, patterns::from_until()),
        (Form::RangeYmd, patterns::range_ymd()),
        (Form::RangeYm, patterns::range_ym()),
        (Form::RangeMd, patterns::range_md()),
        (Form::RangeY, patterns::range_y()),
        (Form::RangeM, patterns::range_m()),
    ];

    let mut candidates = Vec::new();
    for (form, pattern) in two_sided {
        let Some(caps) = pattern.captures(segment.text) else { continue };
        let (Some(start), Some(end)) = (caps.get(1), caps.get(2)) else { continue };
        let rest = segment.sub(end.end(), segment.text.len());
        candidates.push(IntervalSplit {
            form,
            start: Some(segment.group(start)),
            end: Some(segment.group(end)),
            tail: (!rest.is_blank()).then(|| rest.trimmed()),
        });
    }

    if let Some(start) = patterns::from_only().captures(segment.text).and_then(|c| c.get(1)) {
        let start = Some(segment.group(start));
        candidates.push(IntervalSplit { form: Form::FromOnly, start, end: None, tail: None });
    }
    if let Some(end) = patterns::until_only().captures(segment.text).and_then(|c| c.get(1)) {
        let end = Some(segment.group(end));
        candidates.push(IntervalSplit { form: Form::UntilOnly, start: None, end, tail: None });
    }

    candidates
}
