use std::borrow::Borrow;
use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A visitor's display name exactly as scraped.
///
/// Names are opaque keys: comparison is case-sensitive and whitespace is kept.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Viewer(String);

impl Viewer {
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for Viewer {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Viewer {
    fn from(name: &str) -> Self {
        Self(name.to_string())
    }
}

impl From<String> for Viewer {
    fn from(name: String) -> Self {
        Self(name)
    }
}

impl fmt::Display for Viewer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One row of the visit history: who, and when they were last seen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    pub viewer: Viewer,
    pub last_seen: DateTime<Utc>,
}

/// Order in which a page lists its current viewers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum SnapshotOrder {
    /// The newest viewer is listed last (the forum's layout).
    #[default]
    MostRecentLast,
    MostRecentFirst,
}

/// The viewer names extracted from one scrape, in page order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ViewerSnapshot {
    pub viewers: Vec<Viewer>,
    pub order: SnapshotOrder,
}

impl ViewerSnapshot {
    pub fn new(viewers: Vec<Viewer>, order: SnapshotOrder) -> Self {
        Self { viewers, order }
    }

    /// Converts the snapshot into the most-recent-first list the tracker ingests.
    ///
    /// This is the only place page order is normalized. A wrong `order` here
    /// inverts recency silently, so the order must come from configuration
    /// rather than being assumed at each call site.
    pub fn into_most_recent_first(self) -> Vec<Viewer> {
        match self.order {
            SnapshotOrder::MostRecentFirst => self.viewers,
            SnapshotOrder::MostRecentLast => {
                let mut viewers = self.viewers;
                viewers.reverse();
                viewers
            }
        }
    }

    pub fn len(&self) -> usize {
        self.viewers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.viewers.is_empty()
    }
}
