use std::collections::BTreeMap;

use logview_types::{LogEntry, LogLevel};

use crate::tags::{TagDimension, TagValue};

/// Occurrence counts per tag value, over the entries seen by one filter pass.
///
/// Rebuilt from scratch on every pass; never merged across passes. The UI
/// renders these next to each candidate tag so the user can see how many
/// currently visible entries carry it. Maps are ordered so iteration matches
/// the rendered tag order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TagsStatistic {
    pub levels: BTreeMap<LogLevel, usize>,
    pub subsystems: BTreeMap<String, usize>,
    pub categories: BTreeMap<String, usize>,
    pub senders: BTreeMap<String, usize>,
}

impl TagsStatistic {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one entry: each of its non-empty tag values is incremented by 1.
    pub fn record(&mut self, entry: &LogEntry) {
        *self.levels.entry(entry.level).or_insert(0) += 1;
        if !entry.subsystem.is_empty() {
            *self.subsystems.entry(entry.subsystem.clone()).or_insert(0) += 1;
        }
        if !entry.category.is_empty() {
            *self.categories.entry(entry.category.clone()).or_insert(0) += 1;
        }
        if !entry.sender.is_empty() {
            *self.senders.entry(entry.sender.clone()).or_insert(0) += 1;
        }
    }

    /// Occurrences of one tag value. Zero if it was never seen.
    pub fn count(&self, tag: &TagValue) -> usize {
        match tag {
            TagValue::Level(v) => self.levels.get(v).copied().unwrap_or(0),
            TagValue::Subsystem(v) => self.subsystems.get(v).copied().unwrap_or(0),
            TagValue::Category(v) => self.categories.get(v).copied().unwrap_or(0),
            TagValue::Sender(v) => self.senders.get(v).copied().unwrap_or(0),
        }
    }

    /// Sum of counts in one dimension: the number of counted entries that
    /// carried a non-empty value there.
    pub fn dimension_total(&self, dimension: TagDimension) -> usize {
        match dimension {
            TagDimension::Level => self.levels.values().sum(),
            TagDimension::Subsystem => self.subsystems.values().sum(),
            TagDimension::Category => self.categories.values().sum(),
            TagDimension::Sender => self.senders.values().sum(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
            && self.subsystems.is_empty()
            && self.categories.is_empty()
            && self.senders.is_empty()
    }
}
