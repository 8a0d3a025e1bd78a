use serde::{Deserialize, Serialize};

use super::viewer::SnapshotOrder;

/// Top-level settings container.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ScanSettings {
    pub source: SourceSettings,
    pub polling: PollingSettings,
    #[serde(default)]
    pub logging: LoggingSettings,
}

/// Where the viewer list is scraped from and how it is read.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SourceSettings {
    pub target_url: String,
    /// Exact `class` attribute of the `<ul>` holding the viewer names.
    pub viewer_list_class: String,
    #[serde(default)]
    pub page_order: SnapshotOrder,
    pub request_timeout_seconds: u64,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_user_agent() -> String {
    format!("viewerscan/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for SourceSettings {
    fn default() -> Self {
        Self {
            target_url: "https://gflclan.com/forums/".to_string(),
            viewer_list_class: "ipsList_inline ipsList_csv ipsList_noSpacing ipsType_normal"
                .to_string(),
            page_order: SnapshotOrder::MostRecentLast,
            request_timeout_seconds: 30,
            user_agent: default_user_agent(),
        }
    }
}

/// Driver loop timing and output size.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PollingSettings {
    pub update_interval_seconds: f64,
    pub top_n: i64,
    #[serde(default)]
    pub fetch_failure: FetchFailurePolicy,
}

impl Default for PollingSettings {
    fn default() -> Self {
        Self {
            update_interval_seconds: 10.0,
            top_n: 5,
            fetch_failure: FetchFailurePolicy::Skip,
        }
    }
}

/// What the driver loop does when the page cannot be fetched.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum FetchFailurePolicy {
    /// Log a warning and try again on the next tick.
    #[default]
    Skip,
    /// Stop the loop and report the error.
    Abort,
}

/// Log output settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingSettings {
    /// Default filter directive; `RUST_LOG` takes precedence.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
        }
    }
}
