use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, error};

use logview_filter::{CombineRule, Filter, Tags, TagsStatistic, refine};
use logview_types::{FetchError, LogEntry, Status};

use crate::source::EntrySource;

/// Domain acceptance hook applied during ingest, before the catalog and the
/// statistics see an entry. Independent of the user's tag filter.
pub type AcceptFn = Box<dyn Fn(&LogEntry) -> bool + Send + Sync>;

/// Immutable view of the model, published on every state change.
#[derive(Clone, Debug)]
pub struct Snapshot {
    /// Fetch lifecycle.
    pub status: Status,

    /// Tag-filtered entries, further narrowed by the search text, oldest
    /// first.
    pub view: Arc<[LogEntry]>,

    /// Occurrence counts over every entry the last filter pass saw.
    pub statistic: TagsStatistic,

    /// Whether no entries have been fetched at all (the view can be empty
    /// while entries exist, when the filter rejects all of them).
    pub is_empty: bool,
}

/// Builder for [`LogViewModel`].
pub struct LogViewModelBuilder<S> {
    source: S,
    accept: Option<AcceptFn>,
    combine: CombineRule,
}

impl<S: EntrySource> LogViewModelBuilder<S> {
    /// Set the acceptance predicate applied to every fetched entry before it
    /// is stored. Default: accept everything.
    pub fn accept(mut self, accept: impl Fn(&LogEntry) -> bool + Send + Sync + 'static) -> Self {
        self.accept = Some(Box::new(accept));
        self
    }

    /// Set the initial combine rule. Default: [`CombineRule::And`].
    pub fn combine_rule(mut self, rule: CombineRule) -> Self {
        self.combine = rule;
        self
    }

    pub fn build(self) -> LogViewModel<S> {
        let initial = Snapshot {
            status: Status::Loading,
            view: Vec::new().into(),
            statistic: TagsStatistic::new(),
            is_empty: true,
        };
        let (snapshot_tx, _) = watch::channel(initial);

        LogViewModel {
            source: self.source,
            accept: self.accept,
            entries: Vec::new(),
            high_water: None,
            catalog: Tags::new(),
            filter: Filter::new(),
            combine: self.combine,
            search_text: String::new(),
            filtered: Vec::new(),
            statistic: TagsStatistic::new(),
            status: Status::Loading,
            snapshot_tx,
        }
    }
}

/// The stateful core of the log view.
///
/// Holds the ordered, append-only store of fetched entries and every piece
/// of state the presentation layer renders from. All mutation goes through
/// `&mut self` on the single owner, so readers never observe a torn state;
/// no locks are involved. The fetch is the one asynchronous boundary.
pub struct LogViewModel<S> {
    source: S,
    accept: Option<AcceptFn>,

    /// Fetched entries, oldest first. Append-only between `clear` calls.
    entries: Vec<LogEntry>,

    /// Timestamp of the newest ingested entry; fetches resume from here and
    /// overlapping re-deliveries are dropped against it.
    high_water: Option<DateTime<Utc>>,

    /// Every tag value ever observed. Grows only; survives `clear` so filter
    /// affordances remain available with an empty view.
    catalog: Tags,

    filter: Filter,
    combine: CombineRule,
    search_text: String,

    /// Entries passing the current filter, refreshed on every entry or
    /// filter mutation.
    filtered: Vec<LogEntry>,
    statistic: TagsStatistic,

    status: Status,
    snapshot_tx: watch::Sender<Snapshot>,
}

impl<S: EntrySource> LogViewModel<S> {
    /// A model with the default configuration: accept everything, combine
    /// with [`CombineRule::And`]. Construction does not fetch; call
    /// [`load`](Self::load).
    pub fn new(source: S) -> Self {
        Self::builder(source).build()
    }

    pub fn builder(source: S) -> LogViewModelBuilder<S> {
        LogViewModelBuilder {
            source,
            accept: None,
            combine: CombineRule::default(),
        }
    }

    /// Subscribe to snapshot publications. The receiver immediately holds
    /// the current snapshot and is notified on every subsequent change.
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.snapshot_tx.subscribe()
    }

    /// Fetch entries newer than the high-water mark and ingest them.
    ///
    /// On failure the previously accumulated entries, views and statistics
    /// are left untouched; only the status changes, retaining the reason.
    /// Safe to call again after a failure. A superseded fetch completing
    /// late is harmless: the high-water mark drops anything already seen.
    pub async fn load(&mut self) -> Result<usize, FetchError> {
        self.status = Status::Loading;
        self.publish();

        let fetched = self.source.fetch(self.high_water).await;
        match fetched {
            Ok(batch) => {
                let appended = self.ingest(batch);
                self.status = Status::Loaded;
                self.publish();
                Ok(appended)
            }
            Err(reason) => {
                error!(error = %reason, "can't fetch log entries");
                let failure = FetchError::from(reason);
                self.status = Status::Failed(failure.clone());
                self.publish();
                Err(failure)
            }
        }
    }

    /// Append newly fetched entries and refresh the derived state.
    ///
    /// Only entries strictly newer than the high-water mark and admitted by
    /// the acceptance predicate are appended; re-delivering a batch appends
    /// nothing. Returns the number of entries appended.
    pub fn ingest(&mut self, batch: Vec<LogEntry>) -> usize {
        let mark = self.high_water;
        let mut appended = 0usize;

        for entry in batch {
            if let Some(mark) = mark {
                if entry.timestamp <= mark {
                    continue;
                }
            }
            if let Some(accept) = &self.accept {
                if !accept(&entry) {
                    continue;
                }
            }
            self.catalog.observe(&entry);
            self.entries.push(entry);
            appended += 1;
        }

        if appended > 0 {
            // The mark advances to the last appended entry, matching the
            // fetch contract: batches arrive oldest to newest.
            self.high_water = self.entries.last().map(|entry| entry.timestamp);
            debug!(appended, total = self.entries.len(), "ingested log entries");
        }

        self.recompute();
        self.publish();
        appended
    }

    /// Replace the filter and re-run the full pass.
    pub fn set_filter(&mut self, filter: Filter) {
        self.filter = filter;
        self.recompute();
        self.publish();
    }

    /// Switch the combine rule and re-run the full pass.
    pub fn set_combine_rule(&mut self, rule: CombineRule) {
        self.combine = rule;
        self.recompute();
        self.publish();
    }

    /// Replace the search text. Only the refinement over the already
    /// tag-filtered sequence is recomputed; the tag pass is not re-run.
    pub fn set_search_text(&mut self, text: impl Into<String>) {
        self.search_text = text.into();
        self.publish();
    }

    /// Drop all fetched entries. The tag catalog and the high-water mark are
    /// kept: known tag values remain available as filter choices, and a
    /// subsequent load resumes where the last one ended.
    pub fn clear(&mut self) {
        self.entries.clear();
        self.recompute();
        self.publish();
    }

    pub fn status(&self) -> &Status {
        &self.status
    }

    pub fn filter(&self) -> &Filter {
        &self.filter
    }

    pub fn combine_rule(&self) -> CombineRule {
        self.combine
    }

    pub fn search_text(&self) -> &str {
        &self.search_text
    }

    /// Every tag value observed so far, for rendering filter affordances.
    pub fn catalog(&self) -> &Tags {
        &self.catalog
    }

    /// All fetched entries, oldest first.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// Entries passing the current filter, before search refinement.
    pub fn filtered(&self) -> &[LogEntry] {
        &self.filtered
    }

    /// The filtered sequence narrowed by the current search text.
    pub fn view(&self) -> Vec<LogEntry> {
        refine(&self.filtered, &self.search_text)
    }

    pub fn statistic(&self) -> &TagsStatistic {
        &self.statistic
    }

    /// Whether nothing has been fetched at all.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The snapshot the presentation layer would currently observe.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status.clone(),
            view: self.view().into(),
            statistic: self.statistic.clone(),
            is_empty: self.entries.is_empty(),
        }
    }

    fn recompute(&mut self) {
        let outcome = self.filter.filter(&self.entries, self.combine);
        self.filtered = outcome.passing;
        self.statistic = outcome.statistic;
    }

    fn publish(&self) {
        self.snapshot_tx.send_replace(self.snapshot());
    }
}
