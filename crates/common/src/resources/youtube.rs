//! YouTube Data API v3 video search

use super::{fetch_json, provider_error, Blurb, SearchResult, SearchSource, Source, NO_DESCRIPTION};
use crate::errors::Result;
use async_trait::async_trait;
use serde::Deserialize;

const WATCH_URL: &str = "https://www.youtube.com/watch?v=";

#[derive(Deserialize)]
struct SearchListResponse {
    #[serde(default)]
    items: Vec<SearchItem>,
}

#[derive(Deserialize)]
struct SearchItem {
    #[serde(default)]
    id: ItemId,
    snippet: Option<ItemSnippet>,
}

#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ItemId {
    video_id: Option<String>,
}

#[derive(Deserialize)]
struct ItemSnippet {
    title: Option<String>,
    description: Option<String>,
}

pub struct YouTubeSearch {
    client: reqwest::Client,
    url: String,
    api_key: Option<String>,
}

impl YouTubeSearch {
    pub fn new(client: reqwest::Client, base_url: &str, api_key: Option<String>) -> Self {
        Self {
            client,
            url: format!("{}/youtube/v3/search", base_url.trim_end_matches('/')),
            api_key,
        }
    }
}

#[async_trait]
impl SearchSource for YouTubeSearch {
    fn source(&self) -> Source {
        Source::YouTube
    }

    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| provider_error(Source::YouTube, "API key is not configured"))?;

        let max_results = count.to_string();
        let request = self.client.get(&self.url).query(&[
            ("part", "snippet"),
            ("q", query),
            ("type", "video"),
            ("maxResults", max_results.as_str()),
            ("key", api_key),
        ]);

        let response: SearchListResponse = fetch_json(Source::YouTube, request).await?;

        Ok(response
            .items
            .into_iter()
            .filter_map(|item| {
                // Channel and playlist hits have no video id
                let video_id = item.id.video_id?;
                let snippet = item.snippet?;
                Some(SearchResult {
                    title: snippet.title?,
                    link: format!("{}{}", WATCH_URL, video_id),
                    blurb: Blurb::Description(
                        snippet.description.unwrap_or_else(|| NO_DESCRIPTION.to_string()),
                    ),
                })
            })
            .take(count as usize)
            .collect())
    }
}
