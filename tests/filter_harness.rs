//! Filter engine integration harness.
//!
//! # What this covers
//!
//! - **Worked examples**: the canonical two-entry scenarios — include a
//!   level, exclude a subsystem, then search the passing set.
//! - **Exclude always wins**: an excluded tag rejects the entry under both
//!   combine rules, whatever the include sets say.
//! - **Statistics independence**: per-dimension statistic totals equal the
//!   number of entries carrying a non-empty value in that dimension,
//!   whatever the filter and combine rule. Verified with proptest.
//! - **Search refinement**: the searched view is a subsequence of its input
//!   and the empty search is the identity. Verified with proptest.
//! - **Pass idempotence**: filtering the passing set again changes nothing.
//!
//! # What this does NOT cover
//!
//! - The model's ingest path and snapshot publication (see
//!   `model_harness.rs`)
//!
//! # Running
//!
//! ```sh
//! cargo test --test filter_harness
//! ```

mod common;

use common::{entry, sample_entries};
use logview::{CombineRule, Filter, LogEntry, LogLevel, TagDimension, TagValue, refine};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

// ---------------------------------------------------------------------------
// Worked examples
// ---------------------------------------------------------------------------

/// Including `level = error` under And keeps the error entry only, while the
/// statistics still count both entries.
#[test]
fn include_error_level_under_and() {
    let mut filter = Filter::new();
    filter.include(TagValue::Level(LogLevel::Error));

    let outcome = filter.filter(&sample_entries(), CombineRule::And);
    let messages: Vec<&str> = outcome.passing.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["timeout"]);
    assert_eq!(outcome.statistic.count(&TagValue::Level(LogLevel::Error)), 1);
    assert_eq!(outcome.statistic.count(&TagValue::Level(LogLevel::Debug)), 1);
}

/// Excluding `subsystem = net` keeps the ui entry only.
#[test]
fn exclude_net_subsystem() {
    let mut filter = Filter::new();
    filter.exclude(TagValue::Subsystem("net".to_string()));

    let outcome = filter.filter(&sample_entries(), CombineRule::And);
    let messages: Vec<&str> = outcome.passing.iter().map(|e| e.message.as_str()).collect();
    assert_eq!(messages, ["render"]);
}

/// Searching the passing set narrows it without touching the tag pass:
/// "time" keeps the error entry, "render" matches nothing in it.
#[test]
fn search_refines_the_passing_set() {
    let mut filter = Filter::new();
    filter.include(TagValue::Level(LogLevel::Error));
    let passing = filter.filter(&sample_entries(), CombineRule::And).passing;

    assert_eq!(refine(&passing, "time"), passing);
    assert!(refine(&passing, "render").is_empty());
}

// ---------------------------------------------------------------------------
// Exclude always wins
// ---------------------------------------------------------------------------

/// An excluded tag rejects the entry under both rules even when every other
/// constrained dimension passes.
#[test]
fn exclusion_is_never_relaxed_by_or() {
    let mut filter = Filter::new();
    filter.include(TagValue::Level(LogLevel::Error));
    filter.exclude(TagValue::Subsystem("net".to_string()));

    let error_from_net = &sample_entries()[0];
    assert!(!filter.evaluate(error_from_net, CombineRule::And));
    assert!(!filter.evaluate(error_from_net, CombineRule::Or));
}

/// The empty filter passes every entry under either rule.
#[test]
fn empty_filter_passes_everything() {
    let filter = Filter::new();
    for rule in [CombineRule::And, CombineRule::Or] {
        assert_eq!(filter.filter(&sample_entries(), rule).passing.len(), 2);
    }
}

// ---------------------------------------------------------------------------
// Property tests
// ---------------------------------------------------------------------------

fn arb_entry() -> impl Strategy<Value = LogEntry> {
    (
        0i64..10_000,
        prop::sample::select(LogLevel::ALL.to_vec()),
        prop::sample::select(vec!["", "net", "ui", "db"]),
        prop::sample::select(vec!["timeout", "render", "query ok", "connection reset"]),
    )
        .prop_map(|(offset, level, subsystem, message)| entry(offset, level, subsystem, message))
}

fn arb_filter() -> impl Strategy<Value = Filter> {
    (any::<bool>(), any::<bool>(), any::<bool>()).prop_map(|(inc_error, inc_ui, exc_net)| {
        let mut filter = Filter::new();
        if inc_error {
            filter.include(TagValue::Level(LogLevel::Error));
        }
        if inc_ui {
            filter.include(TagValue::Subsystem("ui".to_string()));
        }
        if exc_net {
            filter.exclude(TagValue::Subsystem("net".to_string()));
        }
        filter
    })
}

proptest! {
    /// Statistic totals per dimension equal the number of entries with a
    /// non-empty value there, independent of filter and combine rule.
    #[test]
    fn prop_statistics_ignore_filtering_outcome(
        entries in prop::collection::vec(arb_entry(), 0..40),
        filter in arb_filter(),
        rule in prop::sample::select(vec![CombineRule::And, CombineRule::Or]),
    ) {
        let outcome = filter.filter(&entries, rule);
        prop_assert_eq!(
            outcome.statistic.dimension_total(TagDimension::Level),
            entries.len()
        );
        let tagged = entries.iter().filter(|e| !e.subsystem.is_empty()).count();
        prop_assert_eq!(
            outcome.statistic.dimension_total(TagDimension::Subsystem),
            tagged
        );
    }

    /// The passing set is a subsequence of the input, and filtering it again
    /// with the same filter changes nothing.
    #[test]
    fn prop_filter_pass_is_idempotent(
        entries in prop::collection::vec(arb_entry(), 0..40),
        filter in arb_filter(),
        rule in prop::sample::select(vec![CombineRule::And, CombineRule::Or]),
    ) {
        let first = filter.filter(&entries, rule).passing;
        prop_assert!(first.len() <= entries.len());
        let second = filter.filter(&first, rule).passing;
        prop_assert_eq!(second, first);
    }

    /// The searched view is a subsequence of its input; the empty search is
    /// the identity.
    #[test]
    fn prop_search_only_narrows(
        entries in prop::collection::vec(arb_entry(), 0..40),
        needle in prop::sample::select(vec!["", "time", "RENDER", "ok", "zzz"]),
    ) {
        let found = refine(&entries, needle);
        prop_assert!(found.len() <= entries.len());
        for e in &found {
            prop_assert!(e.message.to_lowercase().contains(&needle.to_lowercase()));
        }
        prop_assert_eq!(refine(&entries, ""), entries);
    }
}
