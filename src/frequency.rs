//! Recurrence phrases ("hetente", "minden hónapban", "kétheti").

use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;

use crate::rules::normalize::{lowercase_in_place, remove_accent};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Frequency {
    Daily,
    Weekly,
    Fortnightly,
    Monthly,
    Quarterly,
    EveryHalfYear,
    Yearly,
}

/// A frequency phrase with its character range in the input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FrequencyMatch {
    pub frequency: Frequency,
    pub start: usize,
    pub end: usize,
}

// Matched against accent-folded text in this order; the first hit wins.
static PATTERNS: Lazy<Vec<(Regex, Frequency)>> = Lazy::new(|| {
    use Frequency::*;
    [
        (r"\bnap(?:onta|i|it|onkent)\b", Daily),
        (r"\bminden nap\b", Daily),
        (r"\bhet(?:ente|i|it|enkent)\b", Weekly),
        (r"\bminden het(?:en|eben)\b", Weekly),
        (r"\bheti rendszeresseg(?:gel)?\b", Weekly),
        (r"\bkethet(?:ente|i|it|enkent)\b", Fortnightly),
        (r"\bhav(?:onta|i|it|onkent)\b", Monthly),
        (r"\bminden honapban\b", Monthly),
        (r"\bhavi rendszeresseg(?:gel)?\b", Monthly),
        (r"\bnegyed(?:ev|eve)nte\b", Quarterly),
        (r"\bharomhav(?:onta|i)\b", Quarterly),
        (r"\bminden negyed(?:ev|eve)ben\b", Quarterly),
        (r"\bfel(?:ev|eve)nte\b", EveryHalfYear),
        (r"\bminden fel(?:ev|eve)ben\b", EveryHalfYear),
        (r"\b(?:ev|eve)nte\b", Yearly),
        (r"\bminden (?:ev|eve)ben\b", Yearly),
        (r"\b(?:ev|eve)(?:i|it|s)\b", Yearly),
    ]
    .into_iter()
    .map(|(pattern, frequency)| (Regex::new(pattern).unwrap(), frequency))
    .collect()
});

/// Finds the first frequency phrase in `text`.
///
/// ```
/// use hundate::{Frequency, parse_frequency};
///
/// let found = parse_frequency("a csapat kéthetente tart megbeszélést").unwrap();
/// assert_eq!(found.frequency, Frequency::Fortnightly);
/// assert_eq!((found.start, found.end), (9, 19));
/// ```
pub fn parse_frequency(text: &str) -> Option<FrequencyMatch> {
    // folding keeps one character per character, so offsets carry over
    let folded = remove_accent(&lowercase_in_place(text));

    PATTERNS.iter().find_map(|(pattern, frequency)| {
        let m = pattern.find(&folded)?;
        Some(FrequencyMatch {
            frequency: *frequency,
            start: folded[..m.start()].chars().count(),
            end: folded[..m.end()].chars().count(),
        })
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use Frequency::*;

    #[test]
    fn finds_frequencies() {
        let cases = [
            ("naponta", Daily),
            ("hetente", Weekly),
            ("kéthetente", Fortnightly),
            ("havonta", Monthly),
            ("negyedévente", Quarterly),
            ("félévente", EveryHalfYear),
            ("évente", Yearly),
            ("kethetente", Fortnightly),
            ("felevente", EveryHalfYear),
            ("heti rendszerességgel", Weekly),
            ("havi rendszerességgel", Monthly),
            ("minden nap", Daily),
            ("minden héten", Weekly),
            ("minden hónapban", Monthly),
            ("minden negyedévben", Quarterly),
            ("minden félévben", EveryHalfYear),
            ("minden évben", Yearly),
            ("heti", Weekly),
            ("naponként", Daily),
            ("havonként", Monthly),
            ("kétheti", Fortnightly),
            ("háromhavonta", Quarterly),
            ("az értekezletet napi rendszerességgel tartjuk", Daily),
            ("találkozzunk hetente egyszer", Weekly),
            ("a jelentést negyedévente kell benyújtani", Quarterly),
            ("ez a rendezvény évente kerül megrendezésre", Yearly),
            ("Kétheti ellenőrzés szükséges", Fortnightly),
        ];
        for (text, expected) in cases {
            assert_eq!(parse_frequency(text).map(|m| m.frequency), Some(expected), "{text}");
        }
    }

    #[test]
    fn offsets_are_characters() {
        assert_eq!(
            parse_frequency("a fizetés havonta érkezik"),
            Some(FrequencyMatch { frequency: Monthly, start: 10, end: 17 })
        );
    }

    #[test]
    fn ignores_text_without_frequency() {
        for text in ["", "random text", "twice a day", "ez a szöveg nem tartalmaz gyakoriságot"] {
            assert_eq!(parse_frequency(text), None, "{text}");
        }
    }
}
