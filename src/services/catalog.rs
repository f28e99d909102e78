//! LibraryCloud catalog client
//!
//! One read-only item search per call-number term. The response body is
//! MODS XML wrapping zero or more records.

use async_trait::async_trait;
use std::time::Duration;

use crate::{
    config::CatalogConfig,
    error::{AppError, AppResult},
    models::CallNumberTerm,
    mods::ModsRecord,
};

/// Source of candidate records for a call-number term
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CatalogClient: Send + Sync {
    /// Fetch every candidate record the catalog returns for `term`.
    ///
    /// Any non-success response is an [`AppError::Transport`].
    async fn query(&self, term: &CallNumberTerm) -> AppResult<Vec<ModsRecord>>;
}

/// HTTP client for the LibraryCloud item API (`/v2/items`)
#[derive(Clone)]
pub struct LibraryCloudClient {
    http: reqwest::Client,
    base_url: String,
    limit: u32,
}

impl LibraryCloudClient {
    pub fn new(config: &CatalogConfig) -> AppResult<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            limit: config.limit,
        })
    }

    fn items_url(&self) -> String {
        format!("{}/v2/items", self.base_url)
    }
}

#[async_trait]
impl CatalogClient for LibraryCloudClient {
    async fn query(&self, term: &CallNumberTerm) -> AppResult<Vec<ModsRecord>> {
        let url = self.items_url();
        tracing::debug!("LibraryCloud query: {} q={} limit={}", url, term, self.limit);

        let limit = self.limit.to_string();
        let response = self
            .http
            .get(&url)
            .query(&[("q", term.as_str()), ("limit", limit.as_str())])
            .send()
            .await
            .map_err(|e| AppError::Transport(format!("Request for '{}' failed: {}", term, e)))?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::Transport(format!(
                "LibraryCloud returned {} for '{}'",
                status, term
            )));
        }

        let body = response.text().await?;
        let records = ModsRecord::parse_collection(&body)?;
        tracing::debug!("LibraryCloud returned {} records for '{}'", records.len(), term);
        Ok(records)
    }
}
