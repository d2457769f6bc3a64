//! Rule orchestrator.
//!
//! Runs every active rule over the same piece of text in table order and
//! applies suppression: a rule's output is discarded when any of its
//! suppressors produced a match on the same text.

use tracing::{debug, trace};

use super::compiled_rules::{DEFAULT_COMPILED, RuleId};
use super::trigger::TriggerInfo;
use crate::{Fragment, MatchResult, RuleInput};

/// One match result together with the rule that produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Hit {
    pub rule: &'static str,
    pub result: MatchResult,
}

/// Runs the rule table over `input.text`, keeping each result's span.
pub(crate) fn match_rules_with_spans(input: &RuleInput<'_>) -> Vec<Hit> {
    let compiled = &*DEFAULT_COMPILED;
    let trigger = TriggerInfo::scan(input.text);
    trace!(text = input.text, buckets = ?trigger.buckets, phrases = ?trigger.phrases, "trigger scan");

    let outputs: Vec<(RuleId, Vec<MatchResult>)> =
        compiled.active(&trigger).into_iter().map(|id| (id, (compiled.rules[id].matcher)(input))).collect();

    let produced: Vec<RuleId> = outputs.iter().filter(|(_, results)| !results.is_empty()).map(|(id, _)| *id).collect();

    let mut hits = Vec::new();
    for (id, results) in outputs {
        if results.is_empty() {
            continue;
        }
        let rule = compiled.rules[id];
        if let Some(&by) = compiled.suppressors[id].iter().find(|s| produced.contains(s)) {
            debug!(rule = rule.name, by = compiled.rules[by].name, "rule output suppressed");
            continue;
        }
        debug!(rule = rule.name, matches = results.len(), "rule fired");
        hits.extend(results.into_iter().map(|result| Hit { rule: rule.name, result }));
    }

    hits
}

/// Flat fragment list of every hit, in rule order.
pub(crate) fn match_rules(input: &RuleInput<'_>) -> Vec<Fragment> {
    match_rules_with_spans(input).into_iter().flat_map(|hit| hit.result.fragments).collect()
}

/// Names of the rules the trigger scan activates for `text`.
pub(crate) fn active_rule_names(text: &str) -> Vec<&'static str> {
    let compiled = &*DEFAULT_COMPILED;
    compiled.active(&TriggerInfo::scan(text)).into_iter().map(|id| compiled.rules[id].name).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{FragmentKind, SearchScope};
    use chrono::{NaiveDate, NaiveDateTime};

    fn now() -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 6, 14).unwrap().and_hms_opt(10, 30, 0).unwrap()
    }

    fn input(text: &str) -> RuleInput<'_> {
        RuleInput { text, now: now(), scope: SearchScope::NotRestricted, realistic_year_required: true, paired_side: false }
    }

    fn rules_of(text: &str) -> Vec<&'static str> {
        match_rules_with_spans(&input(text)).into_iter().map(|hit| hit.rule).collect()
    }

    #[test]
    fn month_interval_suppresses_named_month_and_day_of_month() {
        assert_eq!(rules_of("március 20-tól 22-ig"), vec!["month_interval"]);
        assert_eq!(rules_of("március 5-én"), vec!["named_month", "day_of_month"]);
    }

    #[test]
    fn month_thirds_suppresses_named_month() {
        assert_eq!(rules_of("március elején"), vec!["month_thirds"]);
    }

    #[test]
    fn competing_rules_never_cover_the_same_text() {
        const COMPETING: [(&str, &str); 5] = [
            ("n_periods_relative", "in_past_periods"),
            ("in_past_periods", "clock_words"),
            ("month_interval", "named_month"),
            ("month_interval", "day_of_month"),
            ("month_thirds", "named_month"),
        ];
        let corpus = [
            "3 nap múlva",
            "2 héttel ezelőtt",
            "az elmúlt 3 napban",
            "előző két hónap",
            "elmúlt 2 órában",
            "az elmúlt két órában",
            "az elmúlt 3 napban és 2 nap múlva",
            "március 20-tól 22-ig",
            "augusztus 5-től egészen 10-ig",
            "május 3-7",
            "március elején",
            "február közepén",
            "december végén",
            "március elején és május 3-7 között",
            "április 2-án és június 10-től 12-ig",
        ];

        for text in corpus {
            let hits = match_rules_with_spans(&input(text));
            for (a, b) in COMPETING {
                for x in hits.iter().filter(|h| h.rule == a) {
                    for y in hits.iter().filter(|h| h.rule == b) {
                        let (rx, ry) = (x.result.range, y.result.range);
                        assert!(
                            rx.end <= ry.start || ry.end <= rx.start,
                            "{a} {:?} overlaps {b} {:?} in '{text}'",
                            x.result.text,
                            y.result.text
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn in_past_periods_suppresses_clock_words() {
        assert_eq!(rules_of("elmúlt 2 órában"), vec!["in_past_periods"]);
        assert_eq!(rules_of("az elmúlt két óra"), vec!["in_past_periods"]);
        assert_eq!(rules_of("2 órakor"), vec!["clock_words"]);
    }

    #[test]
    fn weekday_suppresses_now() {
        assert_eq!(rules_of("most"), vec!["now"]);
        assert_eq!(rules_of("most kedden"), vec!["weekday"]);
    }

    #[test]
    fn fragments_follow_rule_order() {
        let kinds: Vec<FragmentKind> = match_rules(&input("holnap 10:30-kor")).into_iter().map(|f| f.kind).collect();
        assert_eq!(
            kinds,
            vec![FragmentKind::Year, FragmentKind::Month, FragmentKind::Day, FragmentKind::Hour, FragmentKind::Minute]
        );
    }

    #[test]
    fn active_rules_are_reported_by_name() {
        let names = active_rule_names("jövő kedden");
        assert!(names.contains(&"weekday"));
        assert!(names.contains(&"clock_words"));
    }
}
