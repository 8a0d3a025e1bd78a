//! Page Fetcher for viewerscan.
//!
//! Retrieves the forum page over HTTP and turns it into a `ViewerSnapshot`.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, Url};
use tracing::debug;

use crate::services::viewer_extractor::{ViewerExtractor, ViewerExtractorTrait};
use crate::types::errors::{FetchError, ScanError};
use crate::types::settings::SourceSettings;
use crate::types::viewer::{SnapshotOrder, ViewerSnapshot};

/// Source of viewer snapshots.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the current viewer list in page order.
    async fn fetch_snapshot(&self) -> Result<ViewerSnapshot, ScanError>;
}

/// Fetches the viewer page with reqwest.
pub struct HttpPageFetcher {
    client: Client,
    url: Url,
    extractor: ViewerExtractor,
    page_order: SnapshotOrder,
}

impl HttpPageFetcher {
    /// Builds a fetcher from the source settings.
    pub fn new(settings: &SourceSettings) -> Result<Self, FetchError> {
        let url = Url::parse(&settings.target_url)
            .map_err(|e| FetchError::InvalidUrl(format!("{} ({})", settings.target_url, e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(FetchError::InvalidUrl(settings.target_url.clone()));
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_seconds))
            .user_agent(settings.user_agent.clone())
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            client,
            url,
            extractor: ViewerExtractor::new(settings.viewer_list_class.clone()),
            page_order: settings.page_order,
        })
    }

    pub fn url(&self) -> &Url {
        &self.url
    }

    /// Downloads the page body, rejecting non-success statuses.
    async fn fetch_html(&self) -> Result<String, FetchError> {
        let resp = self
            .client
            .get(self.url.clone())
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(FetchError::Status(status.as_u16()));
        }

        resp.text().await.map_err(|e| FetchError::Body(e.to_string()))
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch_snapshot(&self) -> Result<ViewerSnapshot, ScanError> {
        let html = self.fetch_html().await?;
        let viewers = self.extractor.extract_viewers(&html)?;
        debug!(url = %self.url, bytes = html.len(), viewers = viewers.len(), "fetched viewer page");
        Ok(ViewerSnapshot::new(viewers, self.page_order))
    }
}
