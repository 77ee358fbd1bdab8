//! Health check handlers

use axum::{extract::State, Json};
use serde::Serialize;
use crate::AppState;
use socratic_common::resources::Source;

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

#[derive(Serialize)]
pub struct ReadyResponse {
    pub status: String,
    pub checks: ProviderChecks,
}

/// Whether each outbound provider has credentials
#[derive(Serialize)]
pub struct ProviderChecks {
    pub chat: CheckResult,
    pub medium: CheckResult,
    pub youtube: CheckResult,
    pub geeksforgeeks: CheckResult,
}

#[derive(Serialize)]
pub struct CheckResult {
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl CheckResult {
    fn from_key(key: Option<&str>) -> Self {
        match key {
            Some(_) => CheckResult {
                status: "configured".to_string(),
                error: None,
            },
            None => CheckResult {
                status: "missing".to_string(),
                error: Some("API key is not configured".to_string()),
            },
        }
    }

    fn is_configured(&self) -> bool {
        self.error.is_none()
    }
}

/// Liveness probe - always returns healthy if server is running
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy".to_string(),
        version: socratic_common::VERSION.to_string(),
    })
}

/// Readiness probe - reports which providers can be called
pub async fn ready(State(state): State<AppState>) -> Json<ReadyResponse> {
    let search = &state.config.search;
    let source_check = |source: Source| {
        let key = match source {
            Source::Medium => search.site_key(&search.medium),
            Source::YouTube => search.youtube.api_key.clone(),
            Source::GeeksForGeeks => search.site_key(&search.geeksforgeeks),
        };
        CheckResult::from_key(key.as_deref())
    };

    let checks = ProviderChecks {
        chat: CheckResult::from_key(state.config.tutor.api_key.as_deref()),
        medium: source_check(Source::Medium),
        youtube: source_check(Source::YouTube),
        geeksforgeeks: source_check(Source::GeeksForGeeks),
    };

    let any_search = checks.medium.is_configured()
        || checks.youtube.is_configured()
        || checks.geeksforgeeks.is_configured();
    let ready = checks.chat.is_configured() && any_search;

    Json(ReadyResponse {
        status: if ready { "ready" } else { "degraded" }.to_string(),
        checks,
    })
}
