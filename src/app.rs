//! App Core for viewerscan.
//!
//! Owns the visitor tracker and the page fetcher, and runs one
//! fetch → ingest → query cycle at a time.

use tracing::info;

use crate::managers::visitor_tracker::{VisitorTracker, VisitorTrackerTrait};
use crate::services::page_fetcher::PageFetcher;
use crate::types::errors::ScanError;
use crate::types::viewer::VisitRecord;

/// Result of one completed cycle.
#[derive(Debug, Clone, PartialEq)]
pub struct CycleReport {
    /// Number of names the page listed this cycle.
    pub fetched: usize,
    pub total_unique: usize,
    /// Most recent viewers, oldest to newest.
    pub recent: Vec<VisitRecord>,
}

/// Central application struct. The tracker lives exactly as long as the app.
pub struct App<F: PageFetcher> {
    tracker: VisitorTracker,
    fetcher: F,
    top_n: i64,
}

impl<F: PageFetcher> App<F> {
    pub fn new(fetcher: F, top_n: i64) -> Self {
        Self {
            tracker: VisitorTracker::new(),
            fetcher,
            top_n,
        }
    }

    pub fn tracker(&self) -> &VisitorTracker {
        &self.tracker
    }

    pub fn fetcher(&self) -> &F {
        &self.fetcher
    }

    /// Fetches one snapshot, folds it into the history and summarizes.
    ///
    /// The tracker is only touched after the fetch succeeded, so an error or a
    /// cancelled fetch leaves the history unchanged.
    pub async fn run_cycle(&mut self) -> Result<CycleReport, ScanError> {
        let snapshot = self.fetcher.fetch_snapshot().await?;
        let viewers = snapshot.into_most_recent_first();

        self.tracker.ingest_snapshot(&viewers);
        let recent = self.tracker.most_recent_n(self.top_n)?;
        let total_unique = self.tracker.total_unique_count();

        info!(fetched = viewers.len(), total_unique, "scan cycle complete");

        Ok(CycleReport {
            fetched: viewers.len(),
            total_unique,
            recent,
        })
    }
}
