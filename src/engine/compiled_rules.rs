//! Rule compilation and indexing.
//!
//! This module holds the *static* side of the engine: the structures derived
//! once from the rule table that make each extraction cheaper.
//!
//! - **Buckets** (`BucketMask`): coarse boolean features of the text (e.g.
//!   "contains digits") that switch whole groups of rules on.
//! - **Phrases**: per-rule key stems checked against `TriggerInfo::phrases`.
//! - **Suppressors**: `Rule::suppressed_by` names resolved to rule ids.
//!
//! ## Adding a bucket
//!
//! 1. Add a `BucketMask` bit and a `BUCKET_*` index, bump `BUCKET_COUNT`.
//! 2. Teach `CompiledRules::new` to index it.
//! 3. Teach `TriggerInfo::scan` (in `trigger.rs`) to detect it.
//!
//! ## Invariants
//!
//! - `RuleId` is an index into `CompiledRules::rules`; every per-rule vector
//!   stays aligned with it.
//! - `CompiledRules::active` returns ids in table order, which is the order
//!   the assembler reads fragments in.

use once_cell::sync::Lazy;
use tracing::debug;

use super::trigger::TriggerInfo;
use crate::Rule;
use crate::rules::DEFAULT_RULES;

/// Rule identifier (index into the rule table).
pub(crate) type RuleId = usize;

bitflags::bitflags! {
    /// Coarse buckets for fast input classification.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct BucketMask: u32 {
        const HAS_DIGITS   = 1 << 0;
        const HAS_COLON    = 1 << 1;
        const WEEKDAYISH   = 1 << 2;
        const MONTHISH     = 1 << 3;
        const ORDINALISH   = 1 << 4;
    }
}

pub(crate) const BUCKET_COUNT: usize = 5;
const BUCKETS: [BucketMask; BUCKET_COUNT] = [
    BucketMask::HAS_DIGITS,
    BucketMask::HAS_COLON,
    BucketMask::WEEKDAYISH,
    BucketMask::MONTHISH,
    BucketMask::ORDINALISH,
];

#[derive(Default, Debug)]
pub(crate) struct RuleIndex {
    pub always_on: Vec<RuleId>,
    pub by_bucket: [Vec<RuleId>; BUCKET_COUNT],
}

/// The default rule table, compiled once per process.
pub(crate) static DEFAULT_COMPILED: Lazy<CompiledRules<'static>> = Lazy::new(|| CompiledRules::new(&DEFAULT_RULES));

/// Pre-compiled rule set with indexes.
#[derive(Debug)]
pub(crate) struct CompiledRules<'a> {
    pub rules: Vec<&'a Rule>,
    pub index: RuleIndex,
    /// For each rule, the ids of the rules whose output suppresses it.
    pub suppressors: Vec<Vec<RuleId>>,
}

impl<'a> CompiledRules<'a> {
    pub(crate) fn new(rules: &'a [Rule]) -> Self {
        let rule_refs: Vec<&Rule> = rules.iter().collect();

        let mut index = RuleIndex::default();
        for (id, rule) in rule_refs.iter().enumerate() {
            let buckets = BucketMask::from_bits_truncate(rule.buckets);
            if buckets.is_empty() {
                // phrase gating still applies
                index.always_on.push(id);
                continue;
            }
            for (slot, bucket) in BUCKETS.iter().enumerate() {
                if buckets.contains(*bucket) {
                    index.by_bucket[slot].push(id);
                }
            }
        }

        let suppressors = rule_refs
            .iter()
            .map(|rule| {
                rule.suppressed_by
                    .iter()
                    .filter_map(|name| rule_refs.iter().position(|other| other.name == *name))
                    .collect()
            })
            .collect();

        CompiledRules { rules: rule_refs, index, suppressors }
    }

    /// Ids of the rules worth running on text with the given triggers, in
    /// table order.
    pub(crate) fn active(&self, trigger: &TriggerInfo) -> Vec<RuleId> {
        let mut active = vec![false; self.rules.len()];
        for &id in &self.index.always_on {
            active[id] = true;
        }
        for (slot, bucket) in BUCKETS.iter().enumerate() {
            if trigger.buckets.contains(*bucket) {
                for &id in &self.index.by_bucket[slot] {
                    active[id] = true;
                }
            }
        }

        let mut phrase_filtered = 0;
        let ids: Vec<RuleId> = (0..self.rules.len())
            .filter(|&id| active[id])
            .filter(|&id| {
                let phrases = self.rules[id].optional_phrases;
                let keep = phrases.is_empty() || phrases.iter().any(|p| trigger.phrases.contains(p));
                if !keep {
                    phrase_filtered += 1;
                }
                keep
            })
            .collect();

        debug!(active = ids.len(), total = self.rules.len(), phrase_filtered, "active rules");
        ids
    }
}
