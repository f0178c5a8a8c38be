//! Reactive log-view model for logview
//!
//! This crate owns the stateful side of the component: the ordered store of
//! fetched entries, the incremental ingest path with its high-water mark,
//! the accumulating tag catalog, and snapshot publication for a presentation
//! layer. All computation is delegated to `logview-filter`; this crate is
//! the thin reactive wrapper around it.

mod model;
mod source;

pub use model::{AcceptFn, LogViewModel, LogViewModelBuilder, Snapshot};
pub use source::{EntrySource, FnSource, source_fn};

// Re-export types used in our public API
pub use logview_types::{FetchError, LogEntry, LogLevel, Status};
