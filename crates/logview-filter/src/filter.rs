use serde::{Deserialize, Serialize};

use logview_types::LogEntry;

use crate::stats::TagsStatistic;
use crate::tags::{TagDimension, TagValue, Tags};

/// How per-dimension pass/fail decisions merge into one entry-level decision.
///
/// Exclusion is evaluated identically under both rules: an excluded tag
/// rejects the entry outright, it is never relaxed by `Or`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineRule {
    /// The entry must pass every constrained dimension.
    #[default]
    And,
    /// The entry must pass at least one constrained dimension. With no
    /// constrained dimension at all, every entry passes.
    Or,
}

/// Result of one batch filter pass.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FilterOutcome {
    /// Entries that passed, in input order.
    pub passing: Vec<LogEntry>,
    /// Occurrence counts over every input entry, passing or not.
    pub statistic: TagsStatistic,
}

/// Declarative include/exclude filter over the four tag dimensions.
///
/// Per dimension: a value in `excluded` rejects the entry; otherwise a
/// non-empty `included` set admits only its members. A value never sits in
/// both sides for the same dimension; `include` and `exclude` maintain that.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Filter {
    pub included: Tags,
    pub excluded: Tags,
}

impl Filter {
    pub fn new() -> Self {
        Self::default()
    }

    /// An empty filter passes every entry under either combine rule.
    pub fn is_empty(&self) -> bool {
        self.included.is_empty() && self.excluded.is_empty()
    }

    /// Add `tag` to the include side, withdrawing it from the exclude side.
    pub fn include(&mut self, tag: TagValue) {
        self.excluded.remove(&tag);
        self.included.insert(tag);
    }

    /// Add `tag` to the exclude side, withdrawing it from the include side.
    pub fn exclude(&mut self, tag: TagValue) {
        self.included.remove(&tag);
        self.excluded.insert(tag);
    }

    /// Flip `tag` in or out of the include side.
    pub fn toggle_include(&mut self, tag: TagValue) {
        if self.included.contains(&tag) {
            self.included.remove(&tag);
        } else {
            self.include(tag);
        }
    }

    /// Flip `tag` in or out of the exclude side.
    pub fn toggle_exclude(&mut self, tag: TagValue) {
        if self.excluded.contains(&tag) {
            self.excluded.remove(&tag);
        } else {
            self.exclude(tag);
        }
    }

    /// Drop `tag` from both sides.
    pub fn remove(&mut self, tag: &TagValue) {
        self.included.remove(tag);
        self.excluded.remove(tag);
    }

    /// Reset to the empty filter.
    pub fn clear(&mut self) {
        self.included.clear();
        self.excluded.clear();
    }

    /// Decide whether a single entry passes under `rule`.
    ///
    /// A dimension where the entry carries no tag (empty string) yields no
    /// verdict: it neither passes nor fails, and its constraints do not apply
    /// to that entry.
    pub fn evaluate(&self, entry: &LogEntry, rule: CombineRule) -> bool {
        let mut constrained = 0usize;
        let mut passed = 0usize;

        for dimension in TagDimension::ALL {
            let Some(tag) = TagValue::of(entry, dimension) else {
                continue;
            };
            if self.excluded.contains(&tag) {
                // Exclude wins under either rule.
                return false;
            }
            let has_include = self.included.constrains(dimension);
            if !has_include && !self.excluded.constrains(dimension) {
                continue;
            }
            constrained += 1;
            if !has_include || self.included.contains(&tag) {
                passed += 1;
            }
        }

        match rule {
            CombineRule::And => passed == constrained,
            CombineRule::Or => constrained == 0 || passed > 0,
        }
    }

    /// Run one pass over `entries`: collect the passing subsequence and the
    /// occurrence statistics of every input entry.
    pub fn filter(&self, entries: &[LogEntry], rule: CombineRule) -> FilterOutcome {
        let mut outcome = FilterOutcome::default();
        for entry in entries {
            outcome.statistic.record(entry);
            if self.evaluate(entry, rule) {
                outcome.passing.push(entry.clone());
            }
        }
        outcome
    }
}
