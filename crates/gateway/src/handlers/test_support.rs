//! Router fixtures with stub providers

use async_trait::async_trait;
use axum::{
    body::Body,
    http::{header, Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::Value;
use socratic_common::{
    config::AppConfig,
    errors::{AppError, Result},
    resources::{self, Blurb, ResourceAggregator, SearchResult, SearchSource, Source},
    tutor::{ChatMessage, ChatModel, Tutor},
};
use std::sync::Arc;
use tower::ServiceExt;

use crate::{create_router, AppState};

/// Search source returning `hits` generated results, or failing
pub struct StubSource {
    source: Source,
    hits: Option<usize>,
}

impl StubSource {
    pub fn hits(source: Source, hits: usize) -> Self {
        Self { source, hits: Some(hits) }
    }

    pub fn failing(source: Source) -> Self {
        Self { source, hits: None }
    }
}

#[async_trait]
impl SearchSource for StubSource {
    fn source(&self) -> Source {
        self.source
    }

    async fn search(&self, query: &str, count: u32) -> Result<Vec<SearchResult>> {
        let hits = self.hits.ok_or_else(|| AppError::SearchProvider {
            source_name: self.source.key().to_string(),
            message: "API error 500 Internal Server Error".to_string(),
        })?;

        Ok((0..hits.min(count as usize))
            .map(|i| SearchResult {
                title: format!("{} #{}", query, i),
                link: format!("https://{}.example/{}", self.source, i),
                blurb: match self.source {
                    Source::YouTube => Blurb::Description(String::new()),
                    _ => Blurb::Snippet(String::new()),
                },
            })
            .collect())
    }
}

/// Chat model with a canned reply, or failing like an unreachable provider
pub struct StubChat {
    reply: Option<String>,
}

impl StubChat {
    pub fn replying(reply: &str) -> Self {
        Self { reply: Some(reply.to_string()) }
    }

    pub fn failing() -> Self {
        Self { reply: None }
    }
}

#[async_trait]
impl ChatModel for StubChat {
    async fn complete(&self, _messages: &[ChatMessage]) -> Result<String> {
        self.reply.clone().ok_or_else(|| AppError::Llm {
            message: "Request failed: connection refused".to_string(),
        })
    }

    fn model_name(&self) -> &str {
        "stub"
    }
}

fn build(config: AppConfig, chat: StubChat, sources: Vec<StubSource>) -> Router {
    let sources = sources
        .into_iter()
        .map(|s| Arc::new(s) as Arc<dyn SearchSource>)
        .collect();

    create_router(AppState {
        config: Arc::new(config),
        tutor: Tutor::new(Arc::new(chat)),
        aggregator: ResourceAggregator::new(sources),
    })
}

pub fn test_app(sources: Vec<StubSource>) -> Router {
    build(AppConfig::default(), StubChat::replying("ok"), sources)
}

pub fn test_app_with_chat(chat: StubChat) -> Router {
    build(AppConfig::default(), chat, Vec::new())
}

/// Router wired exactly like production, from `config`
pub fn test_app_with_config(config: AppConfig) -> Router {
    let config = Arc::new(config);
    let sources = resources::create_sources(&config.search).unwrap();
    create_router(AppState {
        tutor: Tutor::new(Arc::new(StubChat::replying("ok"))),
        aggregator: ResourceAggregator::new(sources),
        config,
    })
}

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, body)
}

pub async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
    let request = Request::builder().uri(uri).body(Body::empty()).unwrap();
    send(app, request).await
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let request = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    send(app, request).await
}
