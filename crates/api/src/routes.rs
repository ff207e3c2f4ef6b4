use std::sync::Arc;

use axum::{extract::State, http::StatusCode, routing::get, Json, Router};
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use premarket_core::curated;
use premarket_core::diagnostics::{self, DiagnosticsReport, StoreConfig};
use premarket_core::domain::news::NewsItem;
use premarket_core::domain::recommendation::StockRecommendation;
use premarket_core::storage::mirror::mirror_documents;
use premarket_core::storage::DocumentStore;

#[derive(Clone)]
pub struct AppState {
    pub store: Option<Arc<dyn DocumentStore>>,
    pub store_config: StoreConfig,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/api/hello", get(hello))
        .route("/test", get(test_database))
        .route("/api/news", get(get_news))
        .route("/api/recommendations", get(get_recommendations))
        .with_state(state)
        // Any origin, method and header, with credentials. Origins are mirrored
        // because browsers refuse a literal `*` alongside credentials.
        .layer(CorsLayer::very_permissive())
        .layer(TraceLayer::new_for_http())
}

#[derive(Debug, Serialize)]
struct Message {
    message: &'static str,
}

async fn root() -> Json<Message> {
    Json(Message {
        message: "Pre-Market India API running",
    })
}

async fn hello() -> Json<Message> {
    Json(Message {
        message: "Hello from the backend API!",
    })
}

async fn test_database(State(state): State<AppState>) -> Json<DiagnosticsReport> {
    Json(diagnostics::probe(state.store.as_deref(), state.store_config).await)
}

async fn get_news(State(state): State<AppState>) -> Result<Json<Vec<NewsItem>>, StatusCode> {
    let items = curated::news().map_err(internal_error)?;
    mirror_documents(state.store.as_deref(), &items).await;
    Ok(Json(items))
}

async fn get_recommendations(
    State(state): State<AppState>,
) -> Result<Json<Vec<StockRecommendation>>, StatusCode> {
    let recs = curated::recommendations().map_err(internal_error)?;
    mirror_documents(state.store.as_deref(), &recs).await;
    Ok(Json(recs))
}

fn internal_error(e: anyhow::Error) -> StatusCode {
    sentry_anyhow::capture_anyhow(&e);
    tracing::error!(error = %e, "curated dataset failed validation");
    StatusCode::INTERNAL_SERVER_ERROR
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use premarket_core::testing::{FailingStore, ListingFailsStore, RecordingStore};
    use serde_json::{json, Value};
    use tower::ServiceExt;

    const ORIGIN: &str = "http://localhost:5173";

    fn shared(store: impl DocumentStore + 'static) -> Option<Arc<dyn DocumentStore>> {
        Some(Arc::new(store))
    }

    fn app(store: Option<Arc<dyn DocumentStore>>, database_url_set: bool) -> Router {
        router(AppState {
            store,
            store_config: StoreConfig {
                backend_compiled: true,
                database_url_set,
            },
        })
    }

    async fn send(app: &Router, uri: &str) -> (StatusCode, axum::http::HeaderMap, Vec<u8>) {
        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(uri)
                    .header(header::ORIGIN, ORIGIN)
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let headers = response.headers().clone();
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, headers, body.to_vec())
    }

    async fn get_json(app: &Router, uri: &str) -> (StatusCode, Value) {
        let (status, _, body) = send(app, uri).await;
        (status, serde_json::from_slice(&body).unwrap())
    }

    #[tokio::test]
    async fn greeting_routes_return_fixed_messages() {
        let app = app(None, false);

        let (status, body) = get_json(&app, "/").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Pre-Market India API running"}));

        let (status, body) = get_json(&app, "/api/hello").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Hello from the backend API!"}));
    }

    #[tokio::test]
    async fn news_returns_four_complete_items() {
        let app = app(None, false);
        let (status, body) = get_json(&app, "/api/news").await;
        assert_eq!(status, StatusCode::OK);

        let items = body.as_array().unwrap();
        assert_eq!(items.len(), 4);
        for item in items {
            for field in ["title", "source", "category", "time"] {
                assert!(!item[field].as_str().unwrap().is_empty(), "{field} empty");
            }
            assert!(item["tickers"].is_array());
        }
        assert_eq!(items[0]["source"], "Business Standard");
        assert_eq!(items[0]["tickers"], json!(["RELIANCE", "IOC", "BPCL", "HPCL"]));
    }

    #[tokio::test]
    async fn recommendations_return_five_typed_items() {
        let app = app(None, false);
        let (status, _, body) = send(&app, "/api/recommendations").await;
        assert_eq!(status, StatusCode::OK);

        // Deserializing into the domain type enforces the enumerations.
        let recs: Vec<StockRecommendation> = serde_json::from_slice(&body).unwrap();
        assert_eq!(recs.len(), 5);
        assert!(recs.iter().all(|r| !r.company.is_empty() && !r.rationale.is_empty()));

        let raw: Value = serde_json::from_slice(&body).unwrap();
        let fifth = &raw[4];
        assert_eq!(fifth["ticker"], "SUNPHARMA");
        assert_eq!(fifth["sentiment"], "Bullish");
        assert_eq!(fifth["bias"], "Long");
        for rec in raw.as_array().unwrap() {
            assert!(rec["signals"].is_array());
            assert!(rec["keywords"].is_array());
        }
    }

    #[tokio::test]
    async fn repeated_calls_return_identical_bytes() {
        let app = app(None, false);
        for uri in ["/api/news", "/api/recommendations"] {
            let (_, _, first) = send(&app, uri).await;
            let (_, _, second) = send(&app, uri).await;
            assert_eq!(first, second, "{uri} not stable");
        }
    }

    #[tokio::test]
    async fn data_routes_mirror_into_collections() {
        let store = Arc::new(RecordingStore::default());
        let handle: Arc<dyn DocumentStore> = store.clone();
        let app = app(Some(handle), true);

        send(&app, "/api/news").await;
        send(&app, "/api/recommendations").await;

        let written = store.written();
        assert_eq!(written.len(), 9);
        assert_eq!(written.iter().filter(|(c, _)| c == "newsitem").count(), 4);
        assert_eq!(
            written.iter().filter(|(c, _)| c == "stockrecommendation").count(),
            5
        );
    }

    #[tokio::test]
    async fn mirror_failures_do_not_change_the_response() {
        let plain = app(None, false);
        let failing = app(shared(FailingStore), true);
        let flaky = app(shared(RecordingStore::failing_every(2)), true);

        for uri in ["/api/news", "/api/recommendations"] {
            let (status, _, expected) = send(&plain, uri).await;
            assert_eq!(status, StatusCode::OK);
            for other in [&failing, &flaky] {
                let (status, _, body) = send(other, uri).await;
                assert_eq!(status, StatusCode::OK);
                assert_eq!(body, expected);
            }
        }
    }

    #[tokio::test]
    async fn test_route_is_ok_whatever_the_store_does() {
        let cases: Vec<(Option<Arc<dyn DocumentStore>>, bool, &str)> = vec![
            (None, false, "❌ Not Available"),
            (None, true, "⚠️  Available but not initialized"),
            (shared(FailingStore), true, "❌ Error: "),
            (shared(ListingFailsStore), true, "⚠️  Connected but Error: "),
            (shared(RecordingStore::default()), false, "✅ Connected & Working"),
        ];

        for (store, url_set, expected_prefix) in cases {
            let (status, body) = get_json(&app(store, url_set), "/test").await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body["backend"], "✅ Running");
            let database = body["database"].as_str().unwrap();
            assert!(
                database.starts_with(expected_prefix),
                "{database:?} does not start with {expected_prefix:?}"
            );
            assert!(body["collections"].as_array().unwrap().len() <= 10);
        }
    }

    #[tokio::test]
    async fn test_route_reports_unset_database_url_for_live_handle() {
        let app = app(shared(RecordingStore::default()), false);
        let (_, body) = get_json(&app, "/test").await;
        assert_eq!(body["database_url"], "❌ Not Set");
        assert_eq!(body["database_name"], "premarket");
        assert_eq!(body["connection_status"], "Connected");
    }

    #[tokio::test]
    async fn every_route_allows_the_calling_origin() {
        let app = app(None, false);
        for uri in ["/", "/api/hello", "/test", "/api/news", "/api/recommendations"] {
            let (_, headers, _) = send(&app, uri).await;
            assert_eq!(
                headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
                ORIGIN,
                "{uri}"
            );
            assert_eq!(
                headers
                    .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                    .unwrap(),
                "true"
            );
        }
    }
}
