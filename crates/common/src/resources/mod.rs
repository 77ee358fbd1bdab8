//! Learning-resource search
//!
//! One [`SearchSource`] capability implemented per provider:
//! - YouTube Data API video search
//! - SerpAPI web search restricted to a site (medium.com, geeksforgeeks.org)
//!
//! [`ResourceAggregator`] fans a query out to every source and merges the
//! hits by source key. A failing source contributes an empty list; it never
//! fails the aggregate.

mod aggregator;
mod site;
mod youtube;

pub use aggregator::{AggregatedResults, ResourceAggregator, ResourcesResponse, NO_RESULTS_MESSAGE};
pub use site::SiteSearch;
pub use youtube::YouTubeSearch;

use crate::config::SearchConfig;
use crate::errors::{AppError, Result};
use crate::metrics;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::sync::Arc;
use std::time::Instant;

pub const NO_DESCRIPTION: &str = "No description available";
pub const NO_SNIPPET: &str = "No snippet available";

/// The closed set of resource providers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Source {
    Medium,
    YouTube,
    GeeksForGeeks,
}

impl Source {
    pub const ALL: [Source; 3] = [Source::Medium, Source::YouTube, Source::GeeksForGeeks];

    /// Key used in the aggregated response
    pub fn key(&self) -> &'static str {
        match self {
            Source::Medium => "medium",
            Source::YouTube => "youtube",
            Source::GeeksForGeeks => "geeksforgeeks",
        }
    }
}

impl fmt::Display for Source {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Text shown under a hit. Videos carry a description, web hits a snippet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Blurb {
    Description(String),
    Snippet(String),
}

/// One normalized hit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(flatten)]
    pub blurb: Blurb,
}

/// Trait for resource search providers
#[async_trait]
pub trait SearchSource: Send + Sync {
    /// Which provider this is
    fn source(&self) -> Source;

    /// Query the provider for at most `count` hits
    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>>;

    /// Like [`search`](Self::search), but a failure is logged and becomes an empty list
    async fn search_or_empty(&self, query: &str, count: u32) -> Vec<SearchResult> {
        let source = self.source();
        let start = Instant::now();
        let outcome = self.search(query, count).await;
        let elapsed = start.elapsed();

        match outcome {
            Ok(results) => {
                metrics::record_source(source.key(), elapsed.as_secs_f64(), results.len(), true);
                tracing::debug!(
                    source = %source,
                    results = results.len(),
                    latency_ms = elapsed.as_millis() as u64,
                    "Source search completed"
                );
                results
            }
            Err(e) => {
                metrics::record_source(source.key(), elapsed.as_secs_f64(), 0, false);
                tracing::warn!(
                    source = %source,
                    error = %e,
                    latency_ms = elapsed.as_millis() as u64,
                    "Source search failed, returning no results"
                );
                Vec::new()
            }
        }
    }
}

/// Build the three production sources from configuration
pub fn create_sources(config: &SearchConfig) -> Result<Vec<Arc<dyn SearchSource>>> {
    let client = http_client(config)?;

    let youtube = YouTubeSearch::new(
        client.clone(),
        &config.youtube.base_url,
        config.youtube.api_key.clone(),
    );
    let medium = SiteSearch::new(
        Source::Medium,
        "medium.com",
        client.clone(),
        &config.medium.base_url,
        config.site_key(&config.medium),
    );
    let geeksforgeeks = SiteSearch::new(
        Source::GeeksForGeeks,
        "geeksforgeeks.org",
        client,
        &config.geeksforgeeks.base_url,
        config.site_key(&config.geeksforgeeks),
    );

    Ok(vec![Arc::new(medium), Arc::new(youtube), Arc::new(geeksforgeeks)])
}

fn http_client(config: &SearchConfig) -> Result<reqwest::Client> {
    reqwest::Client::builder()
        .timeout(config.timeout())
        .build()
        .map_err(|e| AppError::Internal {
            message: format!("Failed to create HTTP client: {}", e),
        })
}

/// Provider error for `source`
pub(crate) fn provider_error(source: Source, message: impl Into<String>) -> AppError {
    AppError::SearchProvider {
        source_name: source.key().to_string(),
        message: message.into(),
    }
}

/// Fetch and decode a provider response, mapping every failure to a provider error
pub(crate) async fn fetch_json<T: serde::de::DeserializeOwned>(
    source: Source,
    request: reqwest::RequestBuilder,
) -> Result<T> {
    let response = request
        .send()
        .await
        .map_err(|e| provider_error(source, format!("Request failed: {}", e)))?;

    if !response.status().is_success() {
        let status = response.status();
        let body = response.text().await.unwrap_or_default();
        return Err(provider_error(source, format!("API error {}: {}", status, body)));
    }

    response
        .json()
        .await
        .map_err(|e| provider_error(source, format!("Failed to parse response: {}", e)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_blurb_flattens_to_field() {
        let video = SearchResult {
            title: "Binary Search in 10 minutes".into(),
            link: "https://www.youtube.com/watch?v=abc".into(),
            blurb: Blurb::Description("walkthrough".into()),
        };
        assert_eq!(
            serde_json::to_value(&video).unwrap(),
            json!({
                "title": "Binary Search in 10 minutes",
                "link": "https://www.youtube.com/watch?v=abc",
                "description": "walkthrough"
            })
        );

        let article = SearchResult {
            title: "Binary Search".into(),
            link: "https://www.geeksforgeeks.org/binary-search/".into(),
            blurb: Blurb::Snippet(NO_SNIPPET.into()),
        };
        assert_eq!(
            serde_json::to_value(&article).unwrap()["snippet"],
            "No snippet available"
        );
    }

    #[test]
    fn test_source_keys() {
        let keys: Vec<_> = Source::ALL.iter().map(Source::key).collect();
        assert_eq!(keys, ["medium", "youtube", "geeksforgeeks"]);
        assert_eq!(serde_json::to_value(Source::GeeksForGeeks).unwrap(), "geeksforgeeks");
        assert_eq!(Source::YouTube.to_string(), "youtube");
    }

    #[test]
    fn test_create_sources_covers_every_provider() {
        let sources = create_sources(&SearchConfig::default()).unwrap();
        let kinds: Vec<_> = sources.iter().map(|s| s.source()).collect();
        assert_eq!(kinds, Source::ALL);
    }
}
