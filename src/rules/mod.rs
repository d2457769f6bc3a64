//! Fragment matchers and the ordered rule table.

pub(crate) mod calendar;
pub(crate) mod date;
pub(crate) mod normalize;
pub(crate) mod patterns;
pub(crate) mod time;

use once_cell::sync::Lazy;

use crate::Rule;
use crate::engine::BucketMask;

/// The rule table in priority order. When two rules produce the same
/// fragment kind for one side, the earlier rule's fragment is the one the
/// assembler reads.
pub(crate) static DEFAULT_RULES: Lazy<Vec<Rule>> = Lazy::new(|| {
    vec![
        rule! {
            name: "named_month",
            buckets: BucketMask::MONTHISH.bits(),
            suppressed_by: ["month_interval", "month_thirds"],
            matcher: date::match_named_month,
        },
        rule! {
            name: "iso_date",
            buckets: BucketMask::HAS_DIGITS.bits(),
            matcher: date::match_iso_date,
        },
        rule! {
            name: "relative_day",
            optional_phrases: ["ma", "má", "holnap", "tegnap"],
            matcher: date::match_relative_day,
        },
        rule! {
            name: "weekday",
            buckets: BucketMask::WEEKDAYISH.bits(),
            matcher: date::match_weekday,
        },
        rule! {
            name: "week",
            optional_phrases: ["hét", "het"],
            matcher: date::match_week,
        },
        rule! {
            name: "named_year",
            optional_phrases: ["tavaly", "idén", "iden", "jövőre", "jovore", "év", "ev"],
            matcher: date::match_named_year,
        },
        rule! {
            name: "digital_clock",
            buckets: BucketMask::HAS_COLON.bits(),
            matcher: time::match_digital_clock,
        },
        rule! {
            name: "hour_h",
            buckets: BucketMask::HAS_DIGITS.bits(),
            matcher: time::match_hour_h,
        },
        rule! {
            name: "clock_words",
            suppressed_by: ["in_past_periods"],
            matcher: time::match_clock_words,
        },
        rule! {
            name: "now",
            optional_phrases: ["most"],
            suppressed_by: ["weekday"],
            matcher: time::match_now,
        },
        rule! {
            name: "n_periods_relative",
            optional_phrases: ["múlva", "mulva", "ezelőtt", "ezelott", "korább", "korabb"],
            matcher: date::match_n_periods_relative,
        },
        rule! {
            name: "relative_month",
            optional_phrases: ["hónap", "honap"],
            matcher: date::match_relative_month,
        },
        rule! {
            name: "in_past_periods",
            optional_phrases: ["elmúlt", "elmult", "előző", "elozo", "megelőző", "megelozo"],
            matcher: date::match_in_past_periods,
        },
        rule! {
            name: "month_interval",
            buckets: BucketMask::MONTHISH.bits(),
            matcher: date::match_month_interval,
        },
        rule! {
            name: "month_thirds",
            buckets: BucketMask::MONTHISH.bits(),
            matcher: date::match_month_thirds,
        },
        rule! {
            name: "day_of_month",
            buckets: BucketMask::HAS_DIGITS.bits() | BucketMask::ORDINALISH.bits(),
            suppressed_by: ["month_interval"],
            matcher: date::match_day_of_month,
        },
    ]
});

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn rule_names_are_unique() {
        let names: HashSet<_> = DEFAULT_RULES.iter().map(|r| r.name).collect();
        assert_eq!(names.len(), DEFAULT_RULES.len());
    }

    #[test]
    fn suppressors_name_existing_rules() {
        let names: HashSet<_> = DEFAULT_RULES.iter().map(|r| r.name).collect();
        for rule in DEFAULT_RULES.iter() {
            for suppressor in rule.suppressed_by {
                assert!(names.contains(suppressor), "{} is suppressed by unknown rule {}", rule.name, suppressor);
            }
        }
    }
}
