use std::borrow::Borrow;
use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use logview_types::{LogEntry, LogLevel};

/// An ordered set of tag values within one dimension.
///
/// Insertion is idempotent and iteration is always in the value's natural
/// order (alphabetical for strings, severity order for levels), independent
/// of insertion order, so rendered tag lists are deterministic.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TagSet<T: Ord>(BTreeSet<T>);

impl<T: Ord> TagSet<T> {
    pub fn new() -> Self {
        Self(BTreeSet::new())
    }

    /// Insert a value. Returns `false` if it was already present.
    pub fn insert(&mut self, value: T) -> bool {
        self.0.insert(value)
    }

    /// Remove a value. Returns `true` if it was present.
    pub fn remove<Q>(&mut self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.remove(value)
    }

    pub fn contains<Q>(&self, value: &Q) -> bool
    where
        T: Borrow<Q>,
        Q: Ord + ?Sized,
    {
        self.0.contains(value)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn clear(&mut self) {
        self.0.clear()
    }

    /// Iterate in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    /// Merge every value of `other` into `self`.
    pub fn union(&mut self, other: &Self)
    where
        T: Clone,
    {
        self.0.extend(other.0.iter().cloned());
    }

    /// Whether every value of `other` is also in `self`.
    pub fn is_superset(&self, other: &Self) -> bool {
        self.0.is_superset(&other.0)
    }
}

impl<T: Ord> Default for TagSet<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Ord> FromIterator<T> for TagSet<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<T: Ord> Extend<T> for TagSet<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        self.0.extend(iter)
    }
}

impl<T: Ord> IntoIterator for TagSet<T> {
    type Item = T;
    type IntoIter = std::collections::btree_set::IntoIter<T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

impl<'a, T: Ord> IntoIterator for &'a TagSet<T> {
    type Item = &'a T;
    type IntoIter = std::collections::btree_set::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// The four independent tag axes of a log entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagDimension {
    Level,
    Subsystem,
    Category,
    Sender,
}

impl TagDimension {
    /// All dimensions, in display order.
    pub const ALL: [TagDimension; 4] = [
        TagDimension::Level,
        TagDimension::Subsystem,
        TagDimension::Category,
        TagDimension::Sender,
    ];

    /// Section title for filter affordances.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Level => "Log level",
            Self::Subsystem => "Subsystem",
            Self::Category => "Category",
            Self::Sender => "Library",
        }
    }
}

impl std::fmt::Display for TagDimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Level => "level",
            Self::Subsystem => "subsystem",
            Self::Category => "category",
            Self::Sender => "sender",
        };
        f.write_str(name)
    }
}

/// A concrete tag value in one dimension.
///
/// This is the dispatch currency of the engine: filter mutations, statistic
/// lookups and catalog membership all go through a `TagValue` so callers
/// never reach into per-dimension fields directly.
#[derive(Clone, Debug, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TagValue {
    Level(LogLevel),
    Subsystem(String),
    Category(String),
    Sender(String),
}

impl TagValue {
    /// The dimension this value belongs to.
    pub fn dimension(&self) -> TagDimension {
        match self {
            Self::Level(_) => TagDimension::Level,
            Self::Subsystem(_) => TagDimension::Subsystem,
            Self::Category(_) => TagDimension::Category,
            Self::Sender(_) => TagDimension::Sender,
        }
    }

    /// The entry's tag value for a dimension.
    ///
    /// Returns `None` for an empty string value: entries without a subsystem,
    /// category or sender carry no tag in that dimension, so they never match
    /// includes/excludes there and never contribute to its statistics.
    pub fn of(entry: &LogEntry, dimension: TagDimension) -> Option<Self> {
        match dimension {
            TagDimension::Level => Some(Self::Level(entry.level)),
            TagDimension::Subsystem => non_empty(&entry.subsystem).map(Self::Subsystem),
            TagDimension::Category => non_empty(&entry.category).map(Self::Category),
            TagDimension::Sender => non_empty(&entry.sender).map(Self::Sender),
        }
    }
}

impl std::fmt::Display for TagValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Level(level) => write!(f, "{level}"),
            Self::Subsystem(s) | Self::Category(s) | Self::Sender(s) => f.write_str(s),
        }
    }
}

fn non_empty(s: &str) -> Option<String> {
    (!s.is_empty()).then(|| s.to_string())
}

/// One tag set per dimension.
///
/// `Tags` plays three roles: the include side of a filter, its exclude side,
/// and the accumulating catalog of every tag value observed so far.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tags {
    pub levels: TagSet<LogLevel>,
    pub subsystems: TagSet<String>,
    pub categories: TagSet<String>,
    pub senders: TagSet<String>,
}

impl Tags {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert one tag value. Returns `false` if it was already present.
    pub fn insert(&mut self, tag: TagValue) -> bool {
        match tag {
            TagValue::Level(v) => self.levels.insert(v),
            TagValue::Subsystem(v) => self.subsystems.insert(v),
            TagValue::Category(v) => self.categories.insert(v),
            TagValue::Sender(v) => self.senders.insert(v),
        }
    }

    /// Remove one tag value. Returns `true` if it was present.
    pub fn remove(&mut self, tag: &TagValue) -> bool {
        match tag {
            TagValue::Level(v) => self.levels.remove(v),
            TagValue::Subsystem(v) => self.subsystems.remove(v),
            TagValue::Category(v) => self.categories.remove(v),
            TagValue::Sender(v) => self.senders.remove(v),
        }
    }

    pub fn contains(&self, tag: &TagValue) -> bool {
        match tag {
            TagValue::Level(v) => self.levels.contains(v),
            TagValue::Subsystem(v) => self.subsystems.contains(v),
            TagValue::Category(v) => self.categories.contains(v),
            TagValue::Sender(v) => self.senders.contains(v),
        }
    }

    /// Whether the set for `dimension` holds at least one value.
    pub fn constrains(&self, dimension: TagDimension) -> bool {
        match dimension {
            TagDimension::Level => !self.levels.is_empty(),
            TagDimension::Subsystem => !self.subsystems.is_empty(),
            TagDimension::Category => !self.categories.is_empty(),
            TagDimension::Sender => !self.senders.is_empty(),
        }
    }

    /// Record the entry's non-empty tag values, one per dimension.
    pub fn observe(&mut self, entry: &LogEntry) {
        for dimension in TagDimension::ALL {
            if let Some(tag) = TagValue::of(entry, dimension) {
                self.insert(tag);
            }
        }
    }

    /// Merge every value of `other` into `self`.
    pub fn union(&mut self, other: &Tags) {
        self.levels.union(&other.levels);
        self.subsystems.union(&other.subsystems);
        self.categories.union(&other.categories);
        self.senders.union(&other.senders);
    }

    /// Sorted candidate values for one dimension, for rendering.
    pub fn values(&self, dimension: TagDimension) -> Vec<TagValue> {
        match dimension {
            TagDimension::Level => self.levels.iter().copied().map(TagValue::Level).collect(),
            TagDimension::Subsystem => {
                self.subsystems.iter().cloned().map(TagValue::Subsystem).collect()
            }
            TagDimension::Category => {
                self.categories.iter().cloned().map(TagValue::Category).collect()
            }
            TagDimension::Sender => self.senders.iter().cloned().map(TagValue::Sender).collect(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.is_empty()
            && self.subsystems.is_empty()
            && self.categories.is_empty()
            && self.senders.is_empty()
    }

    /// Total number of values across all dimensions.
    pub fn len(&self) -> usize {
        self.levels.len() + self.subsystems.len() + self.categories.len() + self.senders.len()
    }

    pub fn clear(&mut self) {
        self.levels.clear();
        self.subsystems.clear();
        self.categories.clear();
        self.senders.clear();
    }

    /// Whether every value of `other` is also in `self`.
    pub fn is_superset(&self, other: &Tags) -> bool {
        self.levels.is_superset(&other.levels)
            && self.subsystems.is_superset(&other.subsystems)
            && self.categories.is_superset(&other.categories)
            && self.senders.is_superset(&other.senders)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_tag_set_insert_is_idempotent() {
        let mut set = TagSet::new();
        assert!(set.insert("net".to_string()));
        assert!(!set.insert("net".to_string()));
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_tag_set_iterates_sorted_regardless_of_insertion_order() {
        let mut set = TagSet::new();
        set.insert("ui".to_string());
        set.insert("auth".to_string());
        set.insert("net".to_string());
        let rendered: Vec<&String> = set.iter().collect();
        assert_eq!(rendered, ["auth", "net", "ui"]);
    }

    #[test]
    fn test_level_tag_set_iterates_in_severity_order() {
        let mut set = TagSet::new();
        set.insert(LogLevel::Fault);
        set.insert(LogLevel::Debug);
        set.insert(LogLevel::Error);
        let rendered: Vec<LogLevel> = set.iter().copied().collect();
        assert_eq!(rendered, [LogLevel::Debug, LogLevel::Error, LogLevel::Fault]);
    }

    #[test]
    fn test_tag_set_union_merges_both_sides() {
        let mut a: TagSet<String> = ["net"].into_iter().map(String::from).collect();
        let b: TagSet<String> = ["ui", "net"].into_iter().map(String::from).collect();
        a.union(&b);
        let merged: Vec<&String> = a.iter().collect();
        assert_eq!(merged, ["net", "ui"]);
    }

    #[test]
    fn test_observe_skips_empty_string_values() {
        let entry = LogEntry::new(Utc::now(), LogLevel::Info, "render")
            .with_subsystem("ui");
        let mut tags = Tags::new();
        tags.observe(&entry);

        assert!(tags.contains(&TagValue::Level(LogLevel::Info)));
        assert!(tags.contains(&TagValue::Subsystem("ui".to_string())));
        assert!(tags.categories.is_empty());
        assert!(tags.senders.is_empty());
        assert_eq!(tags.len(), 2);
    }

    #[test]
    fn test_observe_accumulates_across_entries() {
        let mut tags = Tags::new();
        tags.observe(
            &LogEntry::new(Utc::now(), LogLevel::Error, "timeout").with_subsystem("net"),
        );
        let before = tags.clone();
        tags.observe(&LogEntry::new(Utc::now(), LogLevel::Debug, "render").with_subsystem("ui"));

        assert!(tags.is_superset(&before));
        assert_eq!(tags.values(TagDimension::Subsystem).len(), 2);
    }

    #[test]
    fn test_values_are_sorted_for_rendering() {
        let mut tags = Tags::new();
        tags.insert(TagValue::Sender("zlib".to_string()));
        tags.insert(TagValue::Sender("alloc".to_string()));
        let values = tags.values(TagDimension::Sender);
        assert_eq!(
            values,
            [
                TagValue::Sender("alloc".to_string()),
                TagValue::Sender("zlib".to_string()),
            ]
        );
    }

    #[test]
    fn test_tag_value_of_returns_none_for_empty_dimension() {
        let entry = LogEntry::new(Utc::now(), LogLevel::Notice, "boot");
        assert_eq!(
            TagValue::of(&entry, TagDimension::Level),
            Some(TagValue::Level(LogLevel::Notice))
        );
        assert_eq!(TagValue::of(&entry, TagDimension::Subsystem), None);
        assert_eq!(TagValue::of(&entry, TagDimension::Sender), None);
    }
}
