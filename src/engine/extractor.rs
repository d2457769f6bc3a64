//! Extraction facade: drives the splitter, orchestrator and assembler over
//! one lower-cased sentence.

use tracing::{debug, trace};

use super::assembler::{Assembly, Side, assemble};
use super::orchestrator::{Hit, match_rules_with_spans};
use super::splitter::{self, Form, IntervalSplit, Piece};
use crate::rules::date::match_date_offset;
use crate::rules::patterns::NON_TEMPORAL_BOUNDARY_WORDS;
use crate::rules::time::adjust_for_daypart;
use crate::{Fragment, FragmentKind, Range, RuleInput};

/// One interval found in the sentence, before projection.
#[derive(Debug, Clone)]
pub(crate) struct Extraction {
    pub form: Form,
    /// Byte range of the segment the interval was read from.
    pub segment: Range,
    /// Byte range of the text that contributed to the interval.
    pub span: Range,
    pub start: Assembly,
    pub end: Assembly,
    /// Matches of the start side; `None` for an open start.
    pub start_hits: Option<Vec<Hit>>,
    pub end_hits: Option<Vec<Hit>>,
}

/// Extracts every interval from `input.text`, which must already be
/// lower-cased. Intervals whose start lies after their end are dropped.
pub(crate) fn extract(input: &RuleInput<'_>) -> Vec<Extraction> {
    let mut extractions = Vec::new();

    for clause in splitter::split_clauses(input.text) {
        for segment in splitter::split_disjuncts(clause) {
            let Some(extraction) = extract_segment(segment, input) else { continue };
            if let (Some(start), Some(end)) = (extraction.start.instant(), extraction.end.instant()) {
                if start > end {
                    debug!(segment = segment.text, %start, %end, "dropping inverted interval");
                    continue;
                }
            }
            extractions.push(extraction);
        }
    }

    extractions
}

fn extract_segment(segment: Piece<'_>, input: &RuleInput<'_>) -> Option<Extraction> {
    if let Some(extraction) = duration_anchored(segment, input) {
        return Some(extraction);
    }

    for IntervalSplit { form, start, end, tail } in splitter::interval_candidates(segment) {
        let side_input = RuleInput { paired_side: start.is_some() && end.is_some(), ..*input };
        let start = match start {
            Some(piece) => match accepted_hits(piece, &side_input) {
                Some(hits) => Some((piece, hits)),
                None => continue,
            },
            None => None,
        };
        let end = match end {
            Some(piece) => match accepted_hits(piece, &side_input) {
                Some(hits) => Some((piece, hits)),
                None => continue,
            },
            None => None,
        };
        let tail = tail.map(|piece| side_hits(piece, input)).unwrap_or_default();
        trace!(segment = segment.text, form = form.name(), tail = tail.len(), "interval form accepted");
        return Some(explicit(form, segment, start, end, &tail, input));
    }

    let hits = side_hits(segment, input);
    if hits.is_empty() {
        return None;
    }
    let fragments = fragments_of(&hits);
    let span = Range::cover(hits.iter().map(|h| h.result.range)).unwrap_or_else(|| range_of(segment));
    Some(Extraction {
        form: Form::Implicit,
        segment: range_of(segment),
        span,
        start: assemble(&fragments, input.now, Side::Bottom),
        end: assemble(&fragments, input.now, Side::Top),
        start_hits: Some(hits.clone()),
        end_hits: Some(hits),
    })
}

type Stated<'a> = Option<(Piece<'a>, Vec<Hit>)>;

fn explicit(
    form: Form,
    segment: Piece<'_>,
    start: Stated<'_>,
    end: Stated<'_>,
    tail: &[Hit],
    input: &RuleInput<'_>,
) -> Extraction {
    let mut start_fragments = start.as_ref().map(|(_, hits)| fragments_of(hits));
    let mut end_fragments = end.as_ref().map(|(_, hits)| fragments_of(hits));
    let shared = fragments_of(tail);
    for side in [start_fragments.as_mut(), end_fragments.as_mut()].into_iter().flatten() {
        copy_missing(&shared, side, FragmentKind::is_field);
        lend_daypart(&shared, side);
    }
    if let (Some(start), Some(end)) = (start_fragments.as_mut(), end_fragments.as_mut()) {
        extend_start_end(start, end, input);
    }

    let sentence = input.text;
    let span = [&start, &end]
        .into_iter()
        .flatten()
        .map(|(_, hits)| hits.as_slice())
        .chain([tail])
        .filter_map(|hits| Range::cover(hits.iter().map(|h| h.result.range)))
        .map(|range| to_word_end(sentence, range))
        .reduce(Range::union)
        .unwrap_or_else(|| range_of(segment));

    Extraction {
        form,
        segment: range_of(segment),
        span,
        start: start_fragments.map_or(Assembly::Empty, |f| assemble(&f, input.now, Side::Bottom)),
        end: end_fragments.map_or(Assembly::Empty, |f| assemble(&f, input.now, Side::Top)),
        start_hits: with_tail(start, tail),
        end_hits: with_tail(end, tail),
    }
}

fn with_tail(side: Stated<'_>, tail: &[Hit]) -> Option<Vec<Hit>> {
    side.map(|(_, mut hits)| {
        hits.extend_from_slice(tail);
        hits
    })
}

fn duration_anchored(segment: Piece<'_>, input: &RuleInput<'_>) -> Option<Extraction> {
    let (from, duration) = splitter::split_duration(segment)?;
    let from_hits = accepted_hits(from, input)?;
    let offset = match_date_offset(duration.text).into_iter().next()?.shifted(duration.offset);

    let start_fragments = fragments_of(&from_hits);
    let mut end_fragments = start_fragments.clone();
    end_fragments.extend(offset.fragments.iter().copied());

    let span = Range::cover(from_hits.iter().map(|h| h.result.range).chain([offset.range]))?;
    let offset_hit = Hit { rule: "date_offset", result: offset };
    trace!(segment = segment.text, from = from.text, duration = duration.text, "duration-anchored interval");

    Some(Extraction {
        form: Form::DurationAnchored,
        segment: range_of(segment),
        span,
        start: assemble(&start_fragments, input.now, Side::Bottom),
        end: assemble(&end_fragments, input.now, Side::Top),
        start_hits: Some(from_hits.clone()),
        end_hits: Some(from_hits.into_iter().chain([offset_hit]).collect()),
    })
}

/// Runs the rules over a piece and moves the spans into sentence offsets.
fn side_hits(piece: Piece<'_>, input: &RuleInput<'_>) -> Vec<Hit> {
    let side_input = RuleInput { text: piece.text, ..*input };
    match_rules_with_spans(&side_input)
        .into_iter()
        .map(|hit| Hit { rule: hit.rule, result: hit.result.shifted(piece.offset) })
        .collect()
}

// A stated side counts only if it produced fragments and does not end on a
// word such as "mindig" whose -ig is not an interval boundary.
fn accepted_hits(piece: Piece<'_>, input: &RuleInput<'_>) -> Option<Vec<Hit>> {
    let last_word = piece
        .text
        .split_whitespace()
        .last()
        .map(|w| w.trim_matches(|c: char| !c.is_alphanumeric()))
        .unwrap_or_default();
    if NON_TEMPORAL_BOUNDARY_WORDS.contains(&last_word) {
        trace!(side = piece.text, "side ends on a non-temporal boundary word");
        return None;
    }

    let hits = side_hits(piece, input);
    if hits.iter().all(|h| h.result.fragments.is_empty()) {
        return None;
    }
    Some(hits)
}

fn fragments_of(hits: &[Hit]) -> Vec<Fragment> {
    hits.iter().flat_map(|h| h.result.fragments.iter().copied()).collect()
}

fn range_of(piece: Piece<'_>) -> Range {
    Range { start: piece.offset, end: piece.offset + piece.text.len() }
}

/// Extends `range` to the end of the word it stops in, so suffixes such as
/// "-tól" and "-ig" belong to the span.
fn to_word_end(text: &str, range: Range) -> Range {
    let rest = &text[range.end..];
    let word = rest.find(|c: char| !(c.is_alphanumeric() || c == '-')).unwrap_or(rest.len());
    Range { start: range.start, end: range.end + word }
}

/// Shares missing fields between the two sides of an explicit interval:
/// every field the end lacks is copied from the start, then the start takes
/// year and month from the end unless that would invert the interval.
fn extend_start_end(start: &mut Vec<Fragment>, end: &mut Vec<Fragment>, input: &RuleInput<'_>) {
    copy_missing(start, end, FragmentKind::is_field);
    lend_daypart(start, end);
    lend_daypart(end, start);

    let before = start.clone();
    copy_missing(end, start, |kind| matches!(kind, FragmentKind::Year | FragmentKind::Month));
    if start.len() == before.len() {
        return;
    }

    let bottom = assemble(start, input.now, Side::Bottom).instant();
    let top = assemble(end, input.now, Side::Top).instant();
    if let (Some(bottom), Some(top)) = (bottom, top) {
        if bottom > top {
            trace!("end-to-start copy inverts the interval, undone");
            *start = before;
        }
    }
}

fn copy_missing(from: &[Fragment], to: &mut Vec<Fragment>, kinds: impl Fn(FragmentKind) -> bool) {
    let present: Vec<FragmentKind> = to.iter().map(|f| f.kind).collect();
    for fragment in from {
        if kinds(fragment.kind) && !already_covered(fragment.kind, &present) {
            to.push(*fragment);
        }
    }
}

// Rules whose hour is a bare clock reading that a daypart can still move.
const CLOCK_RULES: [&str; 3] = ["match_clock_words", "match_digital_clock", "match_hour_h"];

/// A daypart stated on one side also applies to the clock hours of the other
/// side when that side names none: "este 8-tól 10-ig" ends at 22:00.
fn lend_daypart(from: &[Fragment], to: &mut Vec<Fragment>) {
    let Some(daypart) = from.iter().find(|f| f.kind == FragmentKind::Daypart).copied() else { return };
    if to.iter().any(|f| f.kind == FragmentKind::Daypart) {
        return;
    }

    let mut lent = false;
    for fragment in to.iter_mut().filter(|f| f.kind == FragmentKind::Hour && CLOCK_RULES.contains(&f.rule)) {
        fragment.value = fragment.value.map(|hour| adjust_for_daypart(hour, daypart.value));
        lent = true;
    }
    if lent {
        to.push(daypart);
    }
}

// Kinds that stand in for each other: a daypart covers the hour, a week
// covers month and day.
fn already_covered(kind: FragmentKind, present: &[FragmentKind]) -> bool {
    use FragmentKind::*;
    let has = |k: FragmentKind| present.contains(&k);
    match kind {
        Hour | Minute => has(kind) || has(Daypart),
        Daypart => has(Daypart) || has(Hour),
        Week => has(Week) || has(Day) || has(StartDay) || has(EndDay),
        Month | Day => has(kind) || has(Week),
        _ => has(kind),
    }
}
