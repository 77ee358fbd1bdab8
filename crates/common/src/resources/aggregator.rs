use super::{SearchResult, SearchSource, Source};
use crate::metrics;
use futures::future::join_all;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use std::time::Instant;

pub const NO_RESULTS_MESSAGE: &str = "No results found on any platform.";

/// Hits per source. Every key is always present, possibly with an empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregatedResults {
    pub medium: Vec<SearchResult>,
    pub youtube: Vec<SearchResult>,
    pub geeksforgeeks: Vec<SearchResult>,
}

impl AggregatedResults {
    pub fn get(&self, source: Source) -> &[SearchResult] {
        match source {
            Source::Medium => &self.medium,
            Source::YouTube => &self.youtube,
            Source::GeeksForGeeks => &self.geeksforgeeks,
        }
    }

    fn slot(&mut self, source: Source) -> &mut Vec<SearchResult> {
        match source {
            Source::Medium => &mut self.medium,
            Source::YouTube => &mut self.youtube,
            Source::GeeksForGeeks => &mut self.geeksforgeeks,
        }
    }

    pub fn is_empty(&self) -> bool {
        Source::ALL.iter().all(|s| self.get(*s).is_empty())
    }

    pub fn total(&self) -> usize {
        Source::ALL.iter().map(|s| self.get(*s).len()).sum()
    }
}

/// Aggregate response: either the per-source mapping or the no-results sentinel
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ResourcesResponse {
    Results { results: AggregatedResults },
    NoResults { message: String },
}

impl ResourcesResponse {
    /// Collapse an all-empty aggregate into the sentinel
    pub fn from_results(results: AggregatedResults) -> Self {
        if results.is_empty() {
            ResourcesResponse::NoResults {
                message: NO_RESULTS_MESSAGE.to_string(),
            }
        } else {
            ResourcesResponse::Results { results }
        }
    }
}

/// Fans a query out to every configured source
#[derive(Clone)]
pub struct ResourceAggregator {
    sources: Vec<Arc<dyn SearchSource>>,
}

impl ResourceAggregator {
    pub fn new(sources: Vec<Arc<dyn SearchSource>>) -> Self {
        Self { sources }
    }

    /// Query all sources concurrently and merge by source key
    pub async fn aggregate(&self, query: &str, count: u32) -> ResourcesResponse {
        let start = Instant::now();

        let outcomes = join_all(self.sources.iter().map(|source| async move {
            (source.source(), source.search_or_empty(query, count).await)
        }))
        .await;

        let mut results = AggregatedResults::default();
        for (source, hits) in outcomes {
            results.slot(source).extend(hits);
        }

        tracing::info!(
            query = %query,
            num_results = count,
            medium = results.medium.len(),
            youtube = results.youtube.len(),
            geeksforgeeks = results.geeksforgeeks.len(),
            latency_ms = start.elapsed().as_millis() as u64,
            "Resource search completed"
        );

        let response = ResourcesResponse::from_results(results);
        metrics::record_aggregation(matches!(response, ResourcesResponse::Results { .. }));
        response
    }
}
