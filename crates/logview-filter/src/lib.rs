//! Tag filtering engine for logview
//!
//! This crate is the pure, synchronous core: tag sets and the tag catalog,
//! the include/exclude filter with its combine rule, per-tag occurrence
//! statistics, and free-text search refinement. Every function here is total
//! over its domain; no I/O, no locks, no shared state.

mod filter;
mod search;
mod stats;
mod tags;

pub use filter::{CombineRule, Filter, FilterOutcome};
pub use search::refine;
pub use stats::TagsStatistic;
pub use tags::{TagDimension, TagSet, TagValue, Tags};

// Re-export types used in our public API
pub use logview_types::{LogEntry, LogLevel};
