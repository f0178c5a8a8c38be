use std::future::Future;

use chrono::{DateTime, Utc};

use logview_types::LogEntry;

/// Fetch collaborator: delivers log entries newer than a point in time.
///
/// `since` is the model's high-water mark; `None` asks for the full visible
/// history. Implementations must be safe to call again after a failure.
///
/// A structural precondition on the underlying store (restricting the fetch
/// to certain subsystems, say) is a construction input of the concrete
/// source; the model passes nothing through and never evaluates it.
pub trait EntrySource: Send + Sync + 'static {
    fn fetch(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> impl Future<Output = anyhow::Result<Vec<LogEntry>>> + Send;
}

/// An [`EntrySource`] backed by an async closure.
pub struct FnSource<F>(F);

/// Adapt an async closure into an [`EntrySource`].
///
/// ```no_run
/// use logview_model::source_fn;
///
/// let source = source_fn(|since| async move {
///     let _ = since;
///     Ok(Vec::new())
/// });
/// # let _ = source;
/// ```
pub fn source_fn<F, Fut>(fetch: F) -> FnSource<F>
where
    F: Fn(Option<DateTime<Utc>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<LogEntry>>> + Send,
{
    FnSource(fetch)
}

impl<F, Fut> EntrySource for FnSource<F>
where
    F: Fn(Option<DateTime<Utc>>) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = anyhow::Result<Vec<LogEntry>>> + Send,
{
    fn fetch(
        &self,
        since: Option<DateTime<Utc>>,
    ) -> impl Future<Output = anyhow::Result<Vec<LogEntry>>> + Send {
        (self.0)(since)
    }
}
