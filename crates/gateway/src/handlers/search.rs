//! Resource search handlers

use axum::{extract::State, Json};
use serde::Deserialize;
use validator::Validate;

use crate::extract::{ValidJson, ValidQuery};
use crate::AppState;
use socratic_common::{
    errors::{AppError, Result},
    resources::ResourcesResponse,
};

/// Search request, as query string (`GET /search`) or JSON body (`POST /resources`)
#[derive(Debug, Deserialize, Validate)]
pub struct SearchRequest {
    #[validate(length(min = 1, max = 2000))]
    pub query: String,

    /// Maximum results per source
    #[validate(range(min = 1))]
    pub num_results: Option<u32>,
}

/// Search all resource providers (query string form)
pub async fn search(
    State(state): State<AppState>,
    ValidQuery(request): ValidQuery<SearchRequest>,
) -> Result<Json<ResourcesResponse>> {
    run_search(&state, request).await
}

/// Search all resource providers (JSON body form used by the web frontend)
pub async fn resources(
    State(state): State<AppState>,
    ValidJson(request): ValidJson<SearchRequest>,
) -> Result<Json<ResourcesResponse>> {
    run_search(&state, request).await
}

async fn run_search(state: &AppState, request: SearchRequest) -> Result<Json<ResourcesResponse>> {
    let query = request.query.trim();
    if query.is_empty() {
        return Err(AppError::validation("query", "Query string cannot be empty"));
    }

    let search_config = &state.config.search;
    let num_results = request.num_results.unwrap_or(search_config.default_num_results);
    if num_results > search_config.max_num_results {
        return Err(AppError::validation(
            "num_results",
            format!("num_results must not exceed {}", search_config.max_num_results),
        ));
    }

    Ok(Json(state.aggregator.aggregate(query, num_results).await))
}

#[cfg(test)]
mod tests {
    use crate::handlers::test_support::{get_json, post_json, test_app, StubSource};
    use axum::http::StatusCode;
    use serde_json::json;
    use socratic_common::resources::{Source, NO_RESULTS_MESSAGE};

    fn sources(medium: usize, youtube: usize, geeksforgeeks: usize) -> Vec<StubSource> {
        vec![
            StubSource::hits(Source::Medium, medium),
            StubSource::hits(Source::YouTube, youtube),
            StubSource::hits(Source::GeeksForGeeks, geeksforgeeks),
        ]
    }

    #[tokio::test]
    async fn test_binary_search_only_video_hits() {
        let app = test_app(sources(0, 2, 0));

        let (status, body) = get_json(app, "/search?query=binary%20search&num_results=2").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"]["youtube"].as_array().unwrap().len(), 2);
        assert_eq!(body["results"]["medium"], json!([]));
        assert_eq!(body["results"]["geeksforgeeks"], json!([]));
        assert_eq!(body["results"]["youtube"][0]["title"], "binary search #0");
        assert!(body["results"]["youtube"][0]["description"].is_string());
    }

    #[tokio::test]
    async fn test_all_empty_is_sentinel() {
        let app = test_app(sources(0, 0, 0));

        let (status, body) = get_json(app, "/search?query=binary%20search").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({ "message": NO_RESULTS_MESSAGE }));
    }

    #[tokio::test]
    async fn test_default_num_results_is_five() {
        let app = test_app(sources(9, 9, 9));

        let (_, body) = get_json(app, "/search?query=heaps").await;

        for key in ["medium", "youtube", "geeksforgeeks"] {
            assert_eq!(body["results"][key].as_array().unwrap().len(), 5, "{key}");
        }
    }

    #[tokio::test]
    async fn test_failing_source_is_invisible() {
        let app = test_app(vec![
            StubSource::hits(Source::Medium, 1),
            StubSource::failing(Source::YouTube),
            StubSource::hits(Source::GeeksForGeeks, 1),
        ]);

        let (status, body) = get_json(app, "/search?query=graphs").await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"]["youtube"], json!([]));
        assert_eq!(body["results"]["medium"].as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_resources_post_body() {
        let app = test_app(sources(1, 0, 0));

        let (status, body) = post_json(app, "/resources", json!({ "query": "recursion" })).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["results"]["medium"][0]["snippet"], "");
    }

    #[tokio::test]
    async fn test_zero_num_results_rejected() {
        let app = test_app(sources(1, 1, 1));

        let (status, body) = get_json(app, "/search?query=trees&num_results=0").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["field"], "num_results");
    }

    #[tokio::test]
    async fn test_missing_query_is_structured_error() {
        let app = test_app(sources(1, 1, 1));

        let (status, body) = get_json(app, "/search").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert!(body["error"]["message"].as_str().unwrap().contains("query"));
    }

    #[tokio::test]
    async fn test_non_numeric_num_results_is_structured_error() {
        let app = test_app(sources(1, 1, 1));

        let (status, body) = get_json(app, "/search?query=trees&num_results=abc").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_malformed_body_is_structured_error() {
        let app = test_app(sources(1, 1, 1));

        let (status, body) =
            post_json(app, "/resources", json!({ "query": "trees", "num_results": "five" })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_num_results_above_max_rejected() {
        let app = test_app(sources(1, 1, 1));

        let (status, body) =
            post_json(app, "/resources", json!({ "query": "trees", "num_results": 500 })).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"]["field"], "num_results");
    }

    #[tokio::test]
    async fn test_blank_query_rejected() {
        let app = test_app(sources(1, 1, 1));

        let (status, _) = get_json(app, "/search?query=%20%20").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}
