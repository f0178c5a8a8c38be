//! logview — embeddable log-view core.
//!
//! Fetches system log entries incrementally, filters them by structured tags
//! (level, subsystem, category, sender), free-text searches the filtered
//! result, and publishes per-tag occurrence statistics alongside the view.
//! Rendering is the embedder's job; the model exposes a snapshot stream and
//! read accessors instead.
//!
//! # Architecture
//!
//! ```text
//! EntrySource ──► LogViewModel ──► Filter ──► refine ──► Snapshot
//!   (fetch)          │                │        (search)
//!                    └── TagCatalog ──┴── TagsStatistic
//! ```
//!
//! The filter engine (`logview-filter`) is pure and synchronous; the model
//! (`logview-model`) owns all state and publishes a [`Snapshot`] over a
//! `tokio::sync::watch` channel on every change.
//!
//! # Example
//!
//! ```no_run
//! use logview::{Filter, LogLevel, LogViewModel, TagValue, source_fn};
//!
//! # async fn demo() -> Result<(), logview::FetchError> {
//! let mut model = LogViewModel::new(source_fn(|_since| async { Ok(Vec::new()) }));
//! model.load().await?;
//!
//! let mut filter = Filter::new();
//! filter.include(TagValue::Level(LogLevel::Error));
//! model.set_filter(filter);
//! model.set_search_text("timeout");
//!
//! for entry in model.view() {
//!     println!("{entry}");
//! }
//! # Ok(())
//! # }
//! ```

pub use logview_filter::{
    CombineRule, Filter, FilterOutcome, TagDimension, TagSet, TagValue, Tags, TagsStatistic,
    refine,
};
pub use logview_model::{
    AcceptFn, EntrySource, FnSource, LogViewModel, LogViewModelBuilder, Snapshot, source_fn,
};
pub use logview_types::{FetchError, LogEntry, LogLevel, ParseLevelError, Status};
