//! Hungarian renderings of a datetime, the reverse direction of extraction.

use chrono::{Datelike, NaiveDate, NaiveDateTime, NaiveTime, Timelike};
use serde::Serialize;

use crate::error::{Error, Result};
use crate::rules::normalize::num_to_word;

const MONTHS: [&str; 12] = [
    "január",
    "február",
    "március",
    "április",
    "május",
    "június",
    "július",
    "augusztus",
    "szeptember",
    "október",
    "november",
    "december",
];

/// Weekday as an adverb of time ("hétfőn"), Monday first.
const ON_WEEKDAY: [&str; 7] = ["hétfőn", "kedden", "szerdán", "csütörtökön", "pénteken", "szombaton", "vasárnap"];

/// Spoken hour with its daypart, indexed by hour of day.
const HOUR_WORDS: [&str; 24] = [
    "nulla",
    "hajnali egy",
    "hajnali kettő",
    "hajnali három",
    "hajnali négy",
    "hajnali öt",
    "reggel hat",
    "reggel hét",
    "reggel nyolc",
    "reggel kilenc",
    "délelőtt tíz",
    "délelőtt tizenegy",
    "tizenkét",
    "délután egy",
    "délután kettő",
    "délután három",
    "délután négy",
    "délután öt",
    "este hat",
    "este hét",
    "este nyolc",
    "este kilenc",
    "este tíz",
    "este tizenegy",
];

/// Candidate texts for one datetime.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Texts {
    /// Relative to the reference day ("holnap", "jövő hét hétfőn"), then the
    /// full date ("2020 december 21").
    pub dates: [String; 2],
    /// Spelled-out clock time, digital, spelled-out with daypart, and the
    /// colloquial quarter-hour form.
    pub times: [String; 4],
}

/// Renders `datetime` as Hungarian text.
///
/// `precision` picks the finest clock field shown: 1 hours, 2 minutes,
/// 3 seconds. The colloquial form always shows minutes.
pub fn datetime2text(datetime: NaiveDateTime, precision: u8, now: NaiveDateTime) -> Result<Texts> {
    if !(1..=3).contains(&precision) {
        return Err(Error::InvalidPrecision(precision));
    }

    let date = datetime.date();
    let time = datetime.time();
    Ok(Texts {
        dates: [relative_date(date, now.date()), full_date(date)],
        times: [
            spelled_time(time, precision, &num_to_word(time.hour() as i64)?)?,
            digital_time(time, precision),
            relative_time(time, precision)?,
            lifelike_time(time),
        ],
    })
}

fn relative_date(date: NaiveDate, today: NaiveDate) -> String {
    let diff = (date - today).num_days();
    let weekday = today.weekday().num_days_from_monday() as i64;
    let this_monday = -weekday;
    let this_sunday = 6 - weekday;
    let on = ON_WEEKDAY[date.weekday().num_days_from_monday() as usize];

    match diff {
        0 => "ma".to_string(),
        1 => "holnap".to_string(),
        d if (this_monday - 14..this_monday - 7).contains(&d) => format!("két hete {on}"),
        d if (this_monday - 7..this_monday).contains(&d) => format!("múlt héten {on}"),
        d if (this_monday..=this_sunday).contains(&d) => format!("ezen a héten {on}"),
        d if (this_sunday + 1..=this_sunday + 7).contains(&d) => format!("jövő hét {on}"),
        d if (this_sunday + 8..=this_sunday + 14).contains(&d) => format!("két hét múlva {on}"),
        _ => format!("{}-{}-{}", date.year(), date.month(), date.day()),
    }
}

fn full_date(date: NaiveDate) -> String {
    format!("{} {} {}", date.year(), MONTHS[date.month0() as usize], date.day())
}

fn spelled_time(time: NaiveTime, precision: u8, hour: &str) -> Result<String> {
    let mut out = format!("{hour} óra");
    if precision >= 2 {
        out.push_str(&format!(" {} perc", num_to_word(time.minute() as i64)?));
    }
    if precision >= 3 {
        out.push_str(&format!(" {} másodperc", num_to_word(time.second() as i64)?));
    }
    Ok(out)
}

fn digital_time(time: NaiveTime, precision: u8) -> String {
    match precision {
        1 => time.hour().to_string(),
        2 => time.format("%H:%M").to_string(),
        _ => time.format("%H:%M:%S").to_string(),
    }
}

fn relative_time(time: NaiveTime, precision: u8) -> Result<String> {
    if precision == 1 {
        match time.hour() {
            0 => return Ok("éjfél".to_string()),
            12 => return Ok("dél".to_string()),
            _ => {}
        }
    }
    spelled_time(time, precision, HOUR_WORDS[time.hour() as usize])
}

fn daypart_word(hour: u32) -> &'static str {
    match hour {
        0..=3 => "éjjel",
        4..=6 => "hajnal",
        7..=10 => "reggel",
        11 => "délelőtt",
        12 => "",
        13..=18 => "délután",
        19..=22 => "este",
        _ => "éjjel",
    }
}

/// "negyed 9", "fél 3 előtt 5 perccel", "7 óra után 2 perccel".
fn lifelike_time(time: NaiveTime) -> String {
    let (hour, minute) = (time.hour(), time.minute());
    let next = hour + 1;
    let clock = |h: u32| if h % 12 == 0 { 12 } else { h % 12 };
    let at = |h: u32, phrase: String| format!("{} {phrase}", daypart_word(h)).trim_start().to_string();

    match minute {
        0 => at(hour, format!("{} óra", clock(hour))),
        1..=9 => at(hour, format!("{} óra után {minute} perccel", clock(hour))),
        10..=14 => at(next, format!("negyed {} előtt {} perccel", clock(next), 15 - minute)),
        15 => at(next, format!("negyed {}", clock(next))),
        16..=20 => at(next, format!("negyed {} után {} perccel", clock(next), minute - 15)),
        21..=29 => at(next, format!("fél {} előtt {} perccel", clock(next), 30 - minute)),
        30 => at(next, format!("fél {}", clock(next))),
        31..=40 => at(next, format!("fél {} után {} perccel", clock(next), minute - 30)),
        41..=44 => at(next, format!("háromnegyed {} előtt {} perccel", clock(next), 45 - minute)),
        45 => at(next, format!("háromnegyed {}", clock(next))),
        46..=50 => at(next, format!("háromnegyed {} után {} perccel", clock(next), minute - 45)),
        _ => at(next, format!("{} óra előtt {} perccel", clock(next), 60 - minute)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(y: i32, m: u32, d: u32, h: u32, mi: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d).unwrap().and_hms_opt(h, mi, s).unwrap()
    }

    fn now() -> NaiveDateTime {
        at(2020, 12, 18, 10, 0, 0)
    }

    #[test]
    fn relative_dates_follow_the_week_grid() {
        let today = now().date();
        let cases = [
            ((2020, 12, 18), "ma"),
            ((2020, 12, 19), "holnap"),
            ((2020, 12, 17), "ezen a héten csütörtökön"),
            ((2020, 12, 20), "ezen a héten vasárnap"),
            ((2020, 12, 10), "múlt héten csütörtökön"),
            ((2020, 12, 4), "két hete pénteken"),
            ((2020, 12, 21), "jövő hét hétfőn"),
            ((2021, 1, 1), "két hét múlva pénteken"),
            ((2021, 3, 1), "2021-3-1"),
        ];
        for ((y, m, d), expected) in cases {
            let date = NaiveDate::from_ymd_opt(y, m, d).unwrap();
            assert_eq!(relative_date(date, today), expected, "{date}");
        }
    }

    #[test]
    fn renders_every_candidate() {
        let texts = datetime2text(at(2020, 12, 21, 8, 5, 9), 3, now()).unwrap();
        assert_eq!(texts.dates, ["jövő hét hétfőn".to_string(), "2020 december 21".to_string()]);
        assert_eq!(
            texts.times,
            [
                "nyolc óra öt perc kilenc másodperc".to_string(),
                "08:05:09".to_string(),
                "reggel nyolc óra öt perc kilenc másodperc".to_string(),
                "reggel 8 óra után 5 perccel".to_string(),
            ]
        );
    }

    #[test]
    fn precision_trims_the_clock() {
        let texts = datetime2text(at(2020, 12, 18, 0, 0, 0), 1, now()).unwrap();
        assert_eq!(texts.times, ["nulla óra", "0", "éjfél", "éjjel 12 óra"].map(String::from));

        let texts = datetime2text(at(2020, 12, 18, 12, 30, 0), 2, now()).unwrap();
        assert_eq!(
            texts.times,
            ["tizenkettő óra harminc perc", "12:30", "tizenkét óra harminc perc", "délután fél 1"].map(String::from)
        );
    }

    #[test]
    fn lifelike_rounds_to_quarters() {
        let cases = [
            ((7, 12), "reggel negyed 8 előtt 3 perccel"),
            ((14, 50), "délután háromnegyed 3 után 5 perccel"),
            ((11, 45), "háromnegyed 12"),
            ((23, 55), "éjjel 12 óra előtt 5 perccel"),
            ((18, 20), "este negyed 7 után 5 perccel"),
        ];
        for ((h, m), expected) in cases {
            assert_eq!(lifelike_time(NaiveTime::from_hms_opt(h, m, 0).unwrap()), expected);
        }
    }

    #[test]
    fn rejects_bad_precision() {
        assert_eq!(datetime2text(now(), 0, now()), Err(Error::InvalidPrecision(0)));
        assert_eq!(datetime2text(now(), 4, now()), Err(Error::InvalidPrecision(4)));
    }
}
