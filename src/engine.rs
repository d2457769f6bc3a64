//! Extraction engine.
//!
//! The engine turns one lower-cased sentence into a list of assembled
//! intervals. It is split into focused submodules under `src/engine/`.
//!
//! ## How the parts work together
//!
//! ```text
//! DEFAULT_RULES ──┐
//!                 │  CompiledRules::new            (compiled_rules.rs)
//!                 └──────────────┬──────────────
//!                                │
//! sentence ── splitter ──────────┼─ clauses -> disjuncts -> interval form
//!            (splitter.rs)       │     (duration-anchored, labelled,
//!                                │      -tól/-ig, ranges, open, implicit)
//!                                v
//!               per side: TriggerInfo::scan    (trigger.rs)
//!                         match_rules          (orchestrator.rs)
//!                           - bucket + phrase gating
//!                           - fixed rule order
//!                           - suppression
//!                                │
//!                                v
//!                     extend start/end         (extractor.rs)
//!                                │
//!                                v
//!                     assemble bottom/top      (assembler.rs)
//!                                │
//!                                v
//!                        Vec<Extraction>
//! ```
//!
//! ## Responsibilities by module
//!
//! - `compiled_rules.rs`: indexes the rule table by bucket and resolves
//!   suppressor names to rule ids.
//! - `trigger.rs`: scans text for coarse buckets and key phrases.
//! - `splitter.rs`: clause, disjunction, interval and duration splitting.
//! - `orchestrator.rs`: runs the active rules over one piece of text.
//! - `assembler.rs`: turns a fragment list into one interval bound.
//! - `extractor.rs`: drives the whole pipeline for one sentence and computes
//!   result spans.
//!
//! ## Debugging
//!
//! The engine logs through `tracing`: rule activation and suppression at
//! `debug`, per-segment decisions at `trace`.

#[path = "engine/assembler.rs"]
mod assembler;
#[path = "engine/compiled_rules.rs"]
mod compiled_rules;
#[path = "engine/extractor.rs"]
mod extractor;
#[path = "engine/orchestrator.rs"]
mod orchestrator;
#[path = "engine/splitter.rs"]
mod splitter;
#[path = "engine/trigger.rs"]
mod trigger;

pub(crate) use assembler::Projection;
pub(crate) use compiled_rules::BucketMask;
pub(crate) use extractor::{Extraction, extract};
pub(crate) use orchestrator::{Hit, active_rule_names, match_rules};
