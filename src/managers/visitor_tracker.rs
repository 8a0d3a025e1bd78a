//! Visitor Tracker for viewerscan.
//!
//! Implements `VisitorTrackerTrait`, folding scraped viewer snapshots into a
//! deduplicated history of last-seen times kept in recency order, and
//! answering "who was here most recently" queries over it.

use chrono::{DateTime, SubsecRound, Utc};
use indexmap::IndexMap;
use tracing::debug;

use crate::types::errors::TrackerError;
use crate::types::viewer::{Viewer, VisitRecord};

/// Trait defining visitor tracking operations.
pub trait VisitorTrackerTrait {
    fn ingest_snapshot(&mut self, viewers: &[Viewer]);
    fn most_recent_n(&self, n: i64) -> Result<Vec<VisitRecord>, TrackerError>;
    fn total_unique_count(&self) -> usize;
}

/// In-memory visit history.
///
/// Entries are kept oldest-first: the last entry of `history` is the viewer
/// updated most recently.
#[derive(Debug, Default)]
pub struct VisitorTracker {
    history: IndexMap<Viewer, DateTime<Utc>>,
}

impl VisitorTracker {
    /// Creates an empty tracker.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current wall-clock time at second resolution.
    fn now() -> DateTime<Utc> {
        Utc::now().trunc_subsecs(0)
    }

    /// Ingests a most-recent-first batch, stamping every viewer with `seen_at`.
    ///
    /// Viewers are applied in batch order, each moved to the most-recent end,
    /// so the last viewer of the batch finishes newest. A name repeated within
    /// the batch keeps the position of its last occurrence.
    pub fn ingest_snapshot_at(&mut self, viewers: &[Viewer], seen_at: DateTime<Utc>) {
        if viewers.is_empty() {
            return;
        }

        let before = self.history.len();
        for viewer in viewers {
            self.history.shift_remove(viewer);
            self.history.insert(viewer.clone(), seen_at);
        }

        debug!(
            batch = viewers.len(),
            new_viewers = self.history.len() - before,
            total = self.history.len(),
            "ingested viewer snapshot"
        );
    }

    /// Returns when `name` was last seen, if ever.
    pub fn last_seen(&self, name: &str) -> Option<DateTime<Utc>> {
        self.history.get(name).copied()
    }

    /// Returns true if no viewer has been observed yet.
    pub fn is_empty(&self) -> bool {
        self.history.is_empty()
    }
}

impl VisitorTrackerTrait for VisitorTracker {
    /// Ingests a most-recent-first batch using a single `now()` sample.
    fn ingest_snapshot(&mut self, viewers: &[Viewer]) {
        self.ingest_snapshot_at(viewers, Self::now());
    }

    /// Returns the `n` most recently updated viewers, oldest to newest.
    fn most_recent_n(&self, n: i64) -> Result<Vec<VisitRecord>, TrackerError> {
        if n < 0 {
            return Err(TrackerError::InvalidArgument(format!(
                "count must be non-negative, got {}",
                n
            )));
        }

        let len = self.history.len();
        let take = usize::try_from(n).unwrap_or(usize::MAX).min(len);

        Ok(self
            .history
            .iter()
            .skip(len - take)
            .map(|(viewer, last_seen)| VisitRecord {
                viewer: viewer.clone(),
                last_seen: *last_seen,
            })
            .collect())
    }

    /// Returns the number of distinct viewers observed so far.
    fn total_unique_count(&self) -> usize {
        self.history.len()
    }
}
