//! SerpAPI web search restricted to one site

use super::{fetch_json, provider_error, Blurb, SearchResult, SearchSource, Source, NO_SNIPPET};
use crate::errors::Result;
use async_trait::async_trait;
use serde::Deserialize;

#[derive(Deserialize)]
struct SerpResponse {
    #[serde(default)]
    organic_results: Vec<OrganicResult>,
}

#[derive(Deserialize)]
struct OrganicResult {
    title: Option<String>,
    link: Option<String>,
    snippet: Option<String>,
}

/// Site-restricted web search, e.g. `site:medium.com <query>`
pub struct SiteSearch {
    source: Source,
    site: String,
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl SiteSearch {
    pub fn new(
        source: Source,
        site: &str,
        client: reqwest::Client,
        base_url: &str,
        api_key: Option<String>,
    ) -> Self {
        Self {
            source,
            site: site.to_string(),
            client,
            url: format!("{}/search.json", base_url.trim_end_matches('/')),
            api_key,
        }
    }

    fn restricted_query(&self, query: &str) -> String {
        format!("site:{} {}", self.site, query)
    }
}

#[async_trait]
impl SearchSource for SiteSearch {
    fn source(&self) -> Source {
        self.source
    }

    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| provider_error(self.source, "API key is not configured"))?;

        let q = self.restricted_query(query);
        let num = count.to_string();
        let request = self.client.get(&self.url).query(&[
            ("q", q.as_str()),
            ("num", num.as_str()),
            ("api_key", api_key),
        ]);

        let response: SerpResponse = fetch_json(self.source, request).await?;

        Ok(response
            .organic_results
            .into_iter()
            .filter_map(|hit| {
                Some(SearchResult {
                    title: hit.title?,
                    link: hit.link?,
                    blurb: Blurb::Snippet(hit.snippet.unwrap_or_else(|| NO_SNIPPET.to_string())),
                })
            })
            .take(count as usize)
            .collect())
    }
}
