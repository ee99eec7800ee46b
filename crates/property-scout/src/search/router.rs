use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Deserialize;
use serde_json::json;

use super::pipeline::SearchService;
use super::request::SearchRequest;
use crate::error::AppError;

#[derive(Debug, Deserialize)]
pub struct RefineRequest {
    pub previous: SearchRequest,
    #[serde(default)]
    pub refinements: SearchRequest,
}

#[derive(Debug, Default, Deserialize)]
pub struct PropertyQuery {
    pub country: Option<String>,
}

/// Router builder exposing the search pipeline over HTTP.
pub fn search_router(service: Arc<SearchService>) -> Router {
    Router::new()
        .route("/api/v1/search", post(search_handler))
        .route("/api/v1/search/refine", post(refine_handler))
        .route("/api/v1/properties/:property_id", get(property_handler))
        .with_state(service)
}

pub(crate) async fn search_handler(
    State(service): State<Arc<SearchService>>,
    Json(request): Json<SearchRequest>,
) -> Result<Response, AppError> {
    let results = service.search(&request)?;
    Ok((StatusCode::OK, Json(results)).into_response())
}

pub(crate) async fn refine_handler(
    State(service): State<Arc<SearchService>>,
    Json(body): Json<RefineRequest>,
) -> Result<Response, AppError> {
    let results = service.refine(&body.previous, &body.refinements)?;
    Ok((StatusCode::OK, Json(results)).into_response())
}

pub(crate) async fn property_handler(
    State(service): State<Arc<SearchService>>,
    Path(property_id): Path<String>,
    Query(query): Query<PropertyQuery>,
) -> Response {
    match service.find_property(query.country.as_deref(), &property_id) {
        Some(property) => (StatusCode::OK, Json(property)).into_response(),
        None => {
            let payload = json!({
                "error": format!("property {property_id} not found"),
            });
            (StatusCode::NOT_FOUND, Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SearchConfig;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use serde_json::Value;
    use tower::ServiceExt;

    fn router() -> (Router, Arc<SearchService>) {
        let service = Arc::new(SearchService::new(SearchConfig {
            properties_per_city: 8,
            ..SearchConfig::default()
        }));
        (search_router(Arc::clone(&service)), service)
    }

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .expect("request")
    }

    #[tokio::test]
    async fn search_returns_table_and_summary() {
        let (router, _) = router();
        let response = router
            .oneshot(post_json(
                "/api/v1/search",
                json!({ "location": "Coimbra", "typology": ["T2", "T3"] }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["source"], "mock");
        assert!(body["table_data"].as_array().is_some_and(|rows| !rows.is_empty()));
        assert_eq!(body["summary"]["search_location"], "Coimbra");
        assert!(body["export_csv"].is_string());
    }

    #[tokio::test]
    async fn invalid_search_is_a_bad_request() {
        let (router, _) = router();
        let response = router
            .oneshot(post_json(
                "/api/v1/search",
                json!({ "typology": ["T2"], "price_min": 9, "price_max": 1 }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"]
            .as_str()
            .is_some_and(|message| message.contains("price_min")));
    }

    #[tokio::test]
    async fn refine_merges_previous_request() {
        let (router, _) = router();
        let response = router
            .oneshot(post_json(
                "/api/v1/search/refine",
                json!({
                    "previous": { "location": "Lisboa", "typology": ["T1"] },
                    "refinements": { "location": "Aveiro" }
                }),
            ))
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["summary"]["search_location"], "Aveiro");
    }

    #[tokio::test]
    async fn property_lookup_returns_404_for_unknown_id() {
        let (router, _) = router();
        let response = router
            .oneshot(
                Request::builder()
                    .uri("/api/v1/properties/MOCK-none")
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn property_lookup_finds_pool_listing() {
        let (router, service) = router();
        let id = service
            .search(
                &serde_json::from_value(json!({ "location": "Braga", "typology": ["T0"] }))
                    .expect("request"),
            )
            .expect("valid")
            .ranked[0]
            .property
            .id
            .clone();

        let response = router
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/properties/{id}?country=Portugal"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("response");

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["id"], id.as_str());
        assert!(body["type"].as_str().is_some());
    }
}
