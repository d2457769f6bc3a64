//! Lexical normalisation: accent folding and Hungarian number words.

use crate::error::{Error, Result};

/// Folds Hungarian accented vowels onto their plain forms.
///
/// The mapping is one character to one character, so character offsets in
/// the folded text line up with the input.
pub fn remove_accent(s: &str) -> String {
    s.chars().map(fold_char).collect()
}

fn fold_char(c: char) -> char {
    match c {
        'á' => 'a',
        'é' => 'e',
        'í' => 'i',
        'ó' | 'ö' | 'ő' => 'o',
        'ú' | 'ü' | 'ű' => 'u',
        _ => c,
    }
}

/// Lower-cases `s` one character at a time, keeping characters whose
/// lower-case form expands to several code points unchanged. Character
/// offsets in the result therefore match the input.
pub(crate) fn lowercase_in_place(s: &str) -> String {
    s.chars()
        .map(|c| {
            let mut lower = c.to_lowercase();
            match (lower.next(), lower.next()) {
                (Some(l), None) => l,
                _ => c,
            }
        })
        .collect()
}

// Tens stems in lookup order; the first synonym found in the input is the one
// cut out of it.
const TENS: &[&[&str]] = &[
    &["tizen", "tiz"],
    &["huszon", "husz"],
    &["harminc"],
    &["negyven"],
    &["otven"],
    &["hatvan"],
    &["hetven"],
    &["nyolcvan"],
    &["kilencven"],
];

// Unit stems, including the ordinal stems used by day-of-month words.
const UNITS: &[&[&str]] = &[
    &["nulla"],
    &["egy", "elseje"],
    &["ketto", "ket", "masod"],
    &["harom", "harmad"],
    &["negy"],
    &["ot"],
    &["hat"],
    &["het"],
    &["nyolc"],
    &["kilenc"],
];

const CUT: &str = "\u{0}";

/// Converts a Hungarian cardinal or ordinal number phrase to an integer.
///
/// A whitespace-separated all-digit token anywhere in `s` is returned as is.
/// Otherwise a tens stem ("huszon") and a unit stem ("három") are looked up;
/// either may be missing but not both. Returns `-1` when nothing resolves.
pub fn word_to_num(s: &str) -> i64 {
    if let Some(digits) = s.split_whitespace().find(|t| !t.is_empty() && t.chars().all(|c| c.is_ascii_digit())) {
        return digits.parse().unwrap_or(-1);
    }

    let mut folded = format!("{CUT}{}", remove_accent(&s.to_lowercase()));

    let mut tens: Option<i64> = None;
    for (i, stems) in TENS.iter().enumerate() {
        if let Some(stem) = stems.iter().copied().find(|stem| folded.contains(stem)) {
            tens = Some((i as i64 + 1) * 10);
            folded = folded.replace(stem, CUT);
            break;
        }
    }

    let mut units: Option<i64> = None;
    for (i, stems) in UNITS.iter().enumerate() {
        let found = stems.iter().any(|stem| {
            folded.contains(&format!("{CUT}{stem}")) || folded.contains(&format!(" {stem}"))
        });
        if found {
            units = Some(i as i64);
        }
    }

    match (tens, units) {
        (None, None) => -1,
        (t, u) => t.unwrap_or(0) + u.unwrap_or(0),
    }
}

const TENS_WORDS: [&str; 5] = ["tizen", "huszon", "harminc", "negyven", "ötven"];
const UNIT_WORDS: [&str; 10] = ["nulla", "egy", "kettő", "három", "négy", "öt", "hat", "hét", "nyolc", "kilenc"];

/// Spells out `n` in Hungarian. Only `0 <= n < 60` is supported.
pub fn num_to_word(n: i64) -> Result<String> {
    if !(0..60).contains(&n) {
        return Err(Error::NumberOutOfRange(n));
    }

    let word = match n {
        0 => "nulla".to_string(),
        10 => "tíz".to_string(),
        20 => "húsz".to_string(),
        _ => {
            let mut out = String::new();
            let (tens, units) = (n / 10, n % 10);
            if tens > 0 {
                out.push_str(TENS_WORDS[(tens - 1) as usize]);
            }
            if units != 0 {
                out.push_str(UNIT_WORDS[units as usize]);
            }
            out
        }
    };

    Ok(word)
}
