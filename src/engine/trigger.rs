//! Trigger scanning (input pre-classification).
//!
//! Inspects a piece of lower-cased text and produces coarse signals that let
//! the orchestrator decide which rules are worth running.
//!
//! - **Buckets** (`BucketMask`): cheap booleans such as "contains digits" or
//!   "looks month-like".
//! - **Phrases** (`TriggerInfo::phrases`): the key stems from `KEY_PHRASES`
//!   that occur in the text.
//!
//! The scan is a heuristic. False positives are fine because every rule still
//! has to match its full pattern; false negatives silently lose matches, so
//! the stems are kept short. Hungarian is agglutinative, so phrases are found
//! by substring rather than by whole token.

use std::collections::HashSet;

use super::compiled_rules::BucketMask;
use crate::rules::normalize::remove_accent;

/// Key stems used for phrase gating. Every `optional_phrases` entry of the
/// rule table must appear here.
pub(crate) const KEY_PHRASES: &[&str] = &[
    "ma", "má", "holnap", "tegnap", "hét", "het", "tavaly", "idén", "iden", "jövőre", "jovore", "év", "ev", "most",
    "múlva", "mulva", "ezelőtt", "ezelott", "korább", "korabb", "hónap", "honap", "elmúlt", "elmult", "előző",
    "elozo", "megelőző", "megelozo",
];

const WEEKDAY_STEMS: &[&str] = &["hetf", "kedd", "szerd", "csut", "pentek", "szombat", "vasarnap"];

const MONTH_STEMS: &[&str] = &["jan", "feb", "marc", "apr", "maj", "jun", "jul", "aug", "szep", "okt", "nov", "dec"];

/// Coarse characteristics of a piece of text.
#[derive(Debug, Clone)]
pub(crate) struct TriggerInfo {
    pub buckets: BucketMask,
    pub phrases: HashSet<&'static str>,
}

impl TriggerInfo {
    /// Scan lower-cased `text` for buckets and key phrases.
    pub(crate) fn scan(text: &str) -> Self {
        let mut buckets = BucketMask::empty();
        let folded = remove_accent(text);

        if text.bytes().any(|b| b.is_ascii_digit()) {
            buckets |= BucketMask::HAS_DIGITS;
        }

        if text.contains(':') {
            buckets |= BucketMask::HAS_COLON;
        }

        if WEEKDAY_STEMS.iter().any(|stem| folded.contains(stem)) {
            buckets |= BucketMask::WEEKDAYISH;
        }

        let mut words = folded.split(|c: char| !c.is_alphanumeric()).filter(|w| !w.is_empty());
        if words.any(|w| MONTH_STEMS.iter().any(|stem| w.starts_with(stem))) {
            buckets |= BucketMask::MONTHISH;
        }

        if folded.contains("elsej") || folded.contains("dik") {
            buckets |= BucketMask::ORDINALISH;
        }

        let phrases = KEY_PHRASES.iter().copied().filter(|phrase| text.contains(phrase)).collect();

        TriggerInfo { buckets, phrases }
    }
}
