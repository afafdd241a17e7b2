//! Schedule import endpoint.
//!
//! Parses submitted text and returns the classes with the display fields the
//! confirmation list needs. Nothing is stored.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{info, warn};

use crate::error::ScheduleImportError;
use crate::parser::{format_days_display, format_time_display, generate_class_color, ParsedClass};
use crate::server::types::ApiErrorType;
use crate::types::AppState;

/// Body of `POST /schedule/parse`.
#[derive(Debug, Serialize, Deserialize)]
pub struct ParseScheduleRequest {
    /// Pasted or extracted schedule text
    pub text: String,
}

/// A parsed class plus its display fields
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportedClass {
    #[serde(flatten)]
    pub class: ParsedClass,
    pub color: String,
    pub days_display: String,
    pub start_display: String,
    pub end_display: String,
}

impl From<ParsedClass> for ImportedClass {
    fn from(class: ParsedClass) -> Self {
        Self {
            color: generate_class_color(),
            days_display: format_days_display(&class.days),
            start_display: format_time_display(&class.start_time),
            end_display: format_time_display(&class.end_time),
            class,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ParseScheduleResponse {
    pub semester: String,
    pub count: usize,
    pub classes: Vec<ImportedClass>,
}

/// Converts a request check failure to an API response.
fn import_error_to_response(error: ScheduleImportError) -> Response {
    let (status, message) = if !error.is_client_error() {
        (StatusCode::INTERNAL_SERVER_ERROR, "Failed to import schedule")
    } else if matches!(error, ScheduleImportError::InputTooLarge { .. }) {
        (StatusCode::PAYLOAD_TOO_LARGE, "Schedule text is too large")
    } else {
        (StatusCode::BAD_REQUEST, "Schedule text is empty")
    };

    ApiErrorType::from((status, message, Some(error.to_string()))).into_response()
}

/// POST /schedule/parse
///
/// Parses schedule text into classes. Text that yields no classes is not an
/// error; the response just has `count: 0`.
pub async fn post_parse_schedule(
    State(s): State<Arc<AppState>>,
    Json(request): Json<ParseScheduleRequest>,
) -> Response {
    info!(bytes = request.text.len(), "POST /schedule/parse");

    if let Err(e) = s.config.check_input(&request.text) {
        warn!(error = %e, "Rejected schedule text");
        return import_error_to_response(e);
    }

    let semester = s.parser.semester(&request.text);
    let classes: Vec<ImportedClass> = s
        .parser
        .parse(&request.text)
        .into_iter()
        .map(ImportedClass::from)
        .collect();

    info!(count = classes.len(), semester = %semester, "Parsed schedule text");

    let response = ParseScheduleResponse {
        semester,
        count: classes.len(),
        classes,
    };

    (StatusCode::OK, Json(response)).into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ServerConfig;
    use crate::parser::{Day, FixedClock, ScheduleParser, CLASS_COLORS};
    use chrono::NaiveDate;
    use serde_json::Value;

    fn test_state(max_input_bytes: usize) -> Arc<AppState> {
        let today = NaiveDate::from_ymd_opt(2026, 2, 14).unwrap();
        let config = ServerConfig {
            max_input_bytes,
            ..Default::default()
        };
        Arc::new(AppState::with_parser(
            config,
            ScheduleParser::with_clock(Arc::new(FixedClock(today))),
        ))
    }

    async fn call(state: Arc<AppState>, text: &str) -> (StatusCode, Vec<u8>) {
        let request = ParseScheduleRequest {
            text: text.to_string(),
        };
        let response = post_parse_schedule(State(state), Json(request)).await;
        let status = response.status();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        (status, body.to_vec())
    }

    #[tokio::test]
    async fn test_parse_returns_classes_with_display_fields() {
        let text = "BUAD 123 - Marketing MWF\n1:00PM - 1:50PM\nHAL 101";
        let (status, body) = call(test_state(1024), text).await;

        assert_eq!(status, StatusCode::OK);
        let response: ParseScheduleResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.semester, "Spring 2026");
        assert_eq!(response.count, 1);

        let imported = &response.classes[0];
        assert_eq!(imported.class.course_code, "BUAD 123");
        assert_eq!(imported.class.days, vec![Day::M, Day::W, Day::F]);
        assert_eq!(imported.days_display, "MWF");
        assert_eq!(imported.start_display, "1:00 PM");
        assert_eq!(imported.end_display, "1:50 PM");
        assert!(CLASS_COLORS.contains(&imported.color.as_str()));
    }

    #[tokio::test]
    async fn test_class_fields_are_flattened() {
        let (_, body) = call(test_state(1024), "CSE 100 Data Structures TTh").await;

        let value: Value = serde_json::from_slice(&body).unwrap();
        let class = &value["classes"][0];
        assert_eq!(class["course_code"], "CSE 100");
        assert_eq!(class["days"], serde_json::json!(["T", "Th"]));
        assert!(class["credits"].is_null());
        assert!(class.get("class").is_none());
    }

    #[tokio::test]
    async fn test_unparseable_text_is_empty_result() {
        let (status, body) = call(test_state(1024), "hello world\nno courses here").await;

        assert_eq!(status, StatusCode::OK);
        let response: ParseScheduleResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(response.count, 0);
        assert!(response.classes.is_empty());
    }

    #[tokio::test]
    async fn test_empty_text_is_rejected() {
        let (status, body) = call(test_state(1024), "   ").await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Schedule text is empty");
    }

    #[tokio::test]
    async fn test_oversized_text_is_rejected() {
        let (status, _) = call(test_state(4), "BUAD 123").await;
        assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    }

    #[tokio::test]
    async fn test_server_errors_are_internal() {
        let response = import_error_to_response(ScheduleImportError::Io {
            message: "disk unavailable".to_string(),
        });
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let value: Value = serde_json::from_slice(&body).unwrap();
        assert_eq!(value["error"], "Failed to import schedule");
    }
}
