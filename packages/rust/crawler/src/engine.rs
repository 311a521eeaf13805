//! HTTP client for the state contact directory.
//!
//! One GET for the listing page, then one GET per detail page. Requests are
//! issued one at a time by the caller; this type holds no queue and never
//! retries.

use reqwest::Client;
use tracing::{debug, info, instrument};

use statedocs_shared::{CrawlConfig, DetailRecord, ListingEntry, Result, StateDocsError};

use crate::detail::parse_detail;
use crate::directory::parse_listing;

/// Fetches and parses directory and detail pages.
pub struct DirectoryClient {
    config: CrawlConfig,
    client: Client,
}

impl DirectoryClient {
    /// Create a client with the configured User-Agent and timeout.
    pub fn new(config: CrawlConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .redirect(reqwest::redirect::Policy::limited(5))
            .timeout(config.timeout)
            .build()
            .map_err(|e| StateDocsError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, client })
    }

    /// Fetch the listing page and return its detail links in page order.
    #[instrument(skip_all)]
    pub async fn list_entries(&self) -> Result<Vec<ListingEntry>> {
        let url = self.config.directory_url()?;
        info!(%url, "fetching directory");

        let body = self.fetch_html(url.as_str()).await?;
        let entries = parse_listing(&body, &self.config.base_url, &self.config.directory_path);

        info!(count = entries.len(), "directory entries found");
        Ok(entries)
    }

    /// Fetch one detail page and extract its fields.
    ///
    /// Missing fields are not errors; only transport failures and non-success
    /// statuses are.
    #[instrument(skip(self))]
    pub async fn fetch_detail(&self, url: &str) -> Result<DetailRecord> {
        let body = self.fetch_html(url).await?;
        Ok(parse_detail(&body))
    }

    async fn fetch_html(&self, url: &str) -> Result<String> {
        debug!(url, "GET");

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| StateDocsError::Network(format!("{url}: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(StateDocsError::Network(format!("{url}: HTTP {status}")));
        }

        response
            .text()
            .await
            .map_err(|e| StateDocsError::Network(format!("{url}: body read failed: {e}")))
    }
}
