use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use axum::{extract::{rejection::JsonRejection, State}, routing::{get, post}, Router, Json};
use axum::http::{Method, StatusCode};
use tower_http::cors::{CorsLayer, Any};
use serde::{Deserialize, Serialize};
use tracing::{info, warn};
use crate::datatype::{Row, Value};
use crate::engine::{Engine, Outcome};
use crate::schema::SchemaSnapshot;
use crate::suggestions::{TestCategory, TEST_CASES};

#[derive(Deserialize)]
pub struct QueryRequest {
    #[serde(default)]
    pub query: Option<String>,
}

#[derive(Serialize, Default, Debug)]
#[serde(rename_all = "camelCase")]
pub struct QueryResponse {
    pub id: u64,
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub natural_language_query: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub recognizer: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sql: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub params: Option<Vec<Value>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub results: Option<Vec<Row>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub columns: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub row_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub suggestions: Option<Vec<&'static str>>,
}

impl QueryResponse {
    fn failure(id: u64, error: impl Into<String>) -> Self {
        Self { id, success: false, error: Some(error.into()), ..Default::default() }
    }
}

/// Status code and body for a finished translation. Unrecognized questions
/// are a normal answer (200); execution problems are server errors (500).
pub fn respond(id: u64, outcome: Outcome) -> (StatusCode, QueryResponse) {
    match outcome {
        Outcome::Succeeded(t) => (StatusCode::OK, QueryResponse {
            id,
            success: true,
            natural_language_query: Some(t.query),
            recognizer: Some(t.recognizer.to_string()),
            description: Some(t.description.to_string()),
            sql: Some(t.sql),
            params: Some(t.params),
            results: Some(t.rows),
            columns: Some(t.columns),
            row_count: Some(t.row_count),
            ..Default::default()
        }),
        Outcome::Rejected(r) => (StatusCode::OK, QueryResponse {
            natural_language_query: Some(r.query),
            suggestions: Some(r.suggestions),
            ..QueryResponse::failure(id, r.message)
        }),
        Outcome::Failed(f) => (StatusCode::INTERNAL_SERVER_ERROR, QueryResponse {
            natural_language_query: Some(f.query),
            sql: f.sql,
            ..QueryResponse::failure(id, f.error)
        }),
    }
}

#[derive(Serialize)]
pub struct SchemaResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schema: Option<SchemaSnapshot>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Serialize)]
pub struct SuggestionsResponse {
    pub success: bool,
    pub suggestions: &'static [&'static str],
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TestCasesResponse {
    pub success: bool,
    pub test_cases: &'static [TestCategory],
}

#[derive(Clone)]
pub struct AppState {
    engine: Arc<Engine>,
    next_id: Arc<AtomicU64>,
}

pub fn router(engine: Arc<Engine>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);
    let state = AppState { engine, next_id: Arc::new(AtomicU64::new(0)) };
    Router::new()
        .route("/api/query", post(query))
        .route("/api/schema", get(schema))
        .route("/api/suggestions", get(suggestions))
        .route("/api/test-cases", get(test_cases))
        .with_state(state)
        .layer(cors)
}

async fn query(
    State(state): State<AppState>,
    payload: Result<Json<QueryRequest>, JsonRejection>,
) -> (StatusCode, Json<QueryResponse>) {
    let id = state.next_id.fetch_add(1, Ordering::Relaxed) + 1;
    let req = match payload {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(id, reason = %rejection.body_text(), "unreadable query body");
            QueryRequest { query: None }
        }
    };
    let text = match req.query {
        Some(q) if !q.trim().is_empty() => q,
        _ => return (StatusCode::BAD_REQUEST, Json(QueryResponse::failure(id, "Query is required"))),
    };
    // We run the translation in a blocking thread since storage access is synchronous.
    let started = std::time::Instant::now();
    let engine = Arc::clone(&state.engine);
    let outcome = match tokio::task::spawn_blocking(move || engine.translate_and_execute(&text)).await {
        Ok(outcome) => outcome,
        Err(e) => {
            warn!(error = %e, "join error");
            return (StatusCode::INTERNAL_SERVER_ERROR, Json(QueryResponse::failure(id, "Join error")));
        }
    };
    let elapsed_ms = started.elapsed().as_secs_f64() * 1000.0;
    let (status, body) = respond(id, outcome);
    info!(id, ms = elapsed_ms, code = status.as_u16(), success = body.success, "query handled");
    (status, Json(body))
}

async fn schema(State(state): State<AppState>) -> (StatusCode, Json<SchemaResponse>) {
    let engine = Arc::clone(&state.engine);
    let result = tokio::task::spawn_blocking(move || engine.describe_schema()).await;
    match result {
        Ok(Ok(schema)) => (StatusCode::OK, Json(SchemaResponse { success: true, schema: Some(schema), error: None })),
        Ok(Err(e)) => {
            warn!(error = %e, "schema error");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(SchemaResponse { success: false, schema: None, error: Some(e.detail()) }))
        }
        Err(e) => {
            warn!(error = %e, "join error");
            (StatusCode::INTERNAL_SERVER_ERROR, Json(SchemaResponse { success: false, schema: None, error: Some("Join error".into()) }))
        }
    }
}

async fn suggestions(State(state): State<AppState>) -> Json<SuggestionsResponse> {
    Json(SuggestionsResponse { success: true, suggestions: state.engine.suggestions() })
}

async fn test_cases() -> Json<TestCasesResponse> {
    Json(TestCasesResponse { success: true, test_cases: TEST_CASES })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{Failure, FailureKind, Rejection, NOT_UNDERSTOOD};

    #[test]
    fn rejected_outcomes_are_ok_with_suggestions() {
        let outcome = Outcome::Rejected(Rejection {
            query: "asdkjasdlkj random text".into(),
            message: NOT_UNDERSTOOD,
            suggestions: vec!["Show me all employees"],
        });
        let (status, body) = respond(7, outcome);
        assert_eq!(status, StatusCode::OK);
        assert!(!body.success);
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["suggestions"][0], "Show me all employees");
        assert_eq!(json["naturalLanguageQuery"], "asdkjasdlkj random text");
        assert!(json.get("sql").is_none());
    }

    async fn post_query(content_type: Option<&str>, body: &'static str) -> (StatusCode, QueryResponse) {
        use axum::extract::FromRequest;
        let mut request = axum::http::Request::builder().method(Method::POST).uri("/api/query");
        if let Some(content_type) = content_type {
            request = request.header(axum::http::header::CONTENT_TYPE, content_type);
        }
        let request = request.body(axum::body::Body::from(body)).unwrap();
        let payload = Json::<QueryRequest>::from_request(request, &()).await;
        let state = AppState { engine: Arc::new(Engine::new().unwrap()), next_id: Arc::new(AtomicU64::new(0)) };
        let (status, Json(body)) = query(State(state), payload).await;
        (status, body)
    }

    #[tokio::test]
    async fn unreadable_bodies_ask_for_a_query() {
        let cases = [
            (None, ""),
            (Some("text/plain"), "Show me all employees"),
            (Some("application/json"), "not json"),
            (Some("application/json"), r#"{"query": 5}"#),
            (Some("application/json"), r#"{"query": "   "}"#),
            (Some("application/json"), "{}"),
        ];
        for (content_type, body) in cases {
            let (status, response) = post_query(content_type, body).await;
            assert_eq!(status, StatusCode::BAD_REQUEST, "body {body:?}");
            assert!(!response.success);
            assert_eq!(response.error.as_deref(), Some("Query is required"), "body {body:?}");
        }
    }

    #[tokio::test]
    async fn readable_bodies_reach_the_engine() {
        // no storage attached, so a recognized question fails with its sql
        let (status, response) = post_query(Some("application/json"), r#"{"query": "Show me all employees"}"#).await;
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(response.error.as_deref(), Some("Database not initialized"));
        assert!(response.sql.is_some());
    }

    #[test]
    fn failed_outcomes_are_server_errors_with_sql() {
        let outcome = Outcome::Failed(Failure {
            query: "show me all employees".into(),
            kind: FailureKind::Execution,
            error: "no such table: employees".into(),
            sql: Some("select * from employees".into()),
        });
        let (status, body) = respond(1, outcome);
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error.as_deref(), Some("no such table: employees"));
        assert_eq!(body.sql.as_deref(), Some("select * from employees"));
    }
}
