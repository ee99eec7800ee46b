use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Extension, Json};
use property_scout::config::reference::{currency_for, known_countries};
use property_scout::search::{search_router, SearchService};
use serde::Serialize;
use serde_json::json;
use std::sync::Arc;

#[derive(Debug, Serialize)]
pub(crate) struct CountryEntry {
    pub(crate) name: &'static str,
    pub(crate) currency: &'static str,
    pub(crate) symbol: &'static str,
}

pub(crate) fn with_search_routes(service: Arc<SearchService>) -> axum::Router {
    search_router(service)
        .route("/health", get(healthcheck))
        .route("/ready", get(readiness_endpoint))
        .route("/metrics", get(metrics_endpoint))
        .route("/api/v1/countries", get(countries_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

/// Countries with a curated mock catalog and the currency their reports use.
pub(crate) async fn countries_endpoint() -> Json<Vec<CountryEntry>> {
    Json(
        known_countries()
            .map(|name| {
                let info = currency_for(name);
                CountryEntry {
                    name,
                    currency: info.currency,
                    symbol: info.symbol,
                }
            })
            .collect(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request;
    use metrics_exporter_prometheus::PrometheusBuilder;
    use property_scout::config::SearchConfig;
    use serde_json::Value;
    use std::sync::atomic::{AtomicBool, Ordering};
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, Arc<AtomicBool>) {
        let readiness = Arc::new(AtomicBool::new(ready));
        let state = AppState {
            readiness: readiness.clone(),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let service = Arc::new(SearchService::new(SearchConfig {
            properties_per_city: 6,
            ..SearchConfig::default()
        }));
        (with_search_routes(service).layer(Extension(state)), readiness)
    }

    async fn get_json(app: axum::Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).expect("request"))
            .await
            .expect("response");
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body bytes");
        (status, serde_json::from_slice(&bytes).expect("json body"))
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn readiness_follows_the_flag() {
        let (router, readiness) = app(false);
        let (status, body) = get_json(router.clone(), "/ready").await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["status"], "initializing");

        readiness.store(true, Ordering::Release);
        let (status, body) = get_json(router, "/ready").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "ready");
    }

    #[tokio::test]
    async fn countries_list_currency_symbols() {
        let (router, _) = app(true);
        let (status, body) = get_json(router, "/api/v1/countries").await;
        assert_eq!(status, StatusCode::OK);

        let countries = body.as_array().expect("array");
        assert!(!countries.is_empty());
        let uk = countries
            .iter()
            .find(|entry| entry["name"] == "United Kingdom")
            .expect("uk listed");
        assert_eq!(uk["symbol"], "£");
    }

    #[tokio::test]
    async fn search_routes_are_mounted() {
        let (router, _) = app(true);
        let (status, _) = get_json(router, "/api/v1/properties/MOCK-0").await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
