//! HTTP route handlers for the call-script server.

use crate::AppState;
use axum::{
    extract::State,
    http::StatusCode,
    response::{Html, IntoResponse, Response},
};
use serde::Serialize;
use std::sync::Arc;

// ============================================================================
// Page Handler
// ============================================================================

pub async fn index(State(state): State<Arc<AppState>>) -> Html<String> {
    Html(state.page_html.clone())
}

// ============================================================================
// Feed Handlers
// ============================================================================

pub async fn scripts_json(State(state): State<Arc<AppState>>) -> Response {
    json_response(&state.records)
}

fn json_response<T: Serialize + ?Sized>(value: &T) -> Response {
    match serde_json::to_string(value) {
        Ok(body) => ([("content-type", "application/json")], body).into_response(),
        Err(err) => {
            log::warn!("failed to serialize response: {err}");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

pub async fn health(State(state): State<Arc<AppState>>) -> Response {
    let body = serde_json::json!({
        "status": "ok",
        "records": state.records.len(),
    });
    ([("content-type", "application/json")], body.to_string()).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::PageConfig;
    use crate::models::{Channel, ScriptCard, ScriptRecord};
    use axum::body::to_bytes;

    fn state() -> Arc<AppState> {
        let records = vec![ScriptRecord {
            id: "opening".to_string(),
            category: Channel::Voice,
            title: "Greeting".to_string(),
            description: "Say hi".to_string(),
            cards: vec![ScriptCard {
                content: "Hi [Cx Name]".to_string(),
            }],
        }];
        Arc::new(AppState::new(records, PageConfig::default()))
    }

    #[tokio::test]
    async fn test_index_serves_rendered_page() {
        let Html(html) = index(State(state())).await;
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("script-title-voice"));
    }

    #[tokio::test]
    async fn test_scripts_json_round_trips_records() {
        let state = state();
        let response = scripts_json(State(state.clone())).await;
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let records: Vec<ScriptRecord> = serde_json::from_slice(&body).unwrap();
        assert_eq!(records, state.records);
    }

    #[test]
    fn test_json_response_reports_serialization_failure() {
        use std::collections::HashMap;

        // tuple keys cannot become JSON object keys
        let unserializable: HashMap<(u8, u8), u8> = HashMap::from([((1, 2), 3)]);
        let response = json_response(&unserializable);
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let response = json_response(&vec![1, 2]);
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_health_reports_record_count() {
        let response = health(State(state())).await;
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let value: serde_json::Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["status"], "ok");
        assert_eq!(value["records"], 1);
    }
}
