use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use service::{ServiceError, ValidationIssue};
use tracing::{error, warn};

/// Error body shared by every route: `{error, detail?, issues?}`.
#[derive(Debug, Serialize)]
pub struct JsonApiError {
    #[serde(skip)]
    pub status: StatusCode,
    #[serde(rename = "error")]
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detail: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub issues: Option<Vec<ValidationIssue>>,
}

impl JsonApiError {
    pub fn new(status: StatusCode, title: &str, detail: Option<String>) -> Self {
        Self { status, title: title.to_string(), detail, issues: None }
    }

    pub fn with_issues(mut self, issues: Vec<ValidationIssue>) -> Self {
        self.issues = Some(issues);
        self
    }

    pub fn not_found(resource: &str) -> Self {
        Self::new(StatusCode::NOT_FOUND, "Not Found", Some(format!("{resource} not found")))
    }
}

impl IntoResponse for JsonApiError {
    fn into_response(self) -> Response {
        (self.status, Json(self)).into_response()
    }
}

impl From<ServiceError> for JsonApiError {
    fn from(e: ServiceError) -> Self {
        let code = e.code();
        match e {
            ServiceError::Validation(v) => {
                JsonApiError::new(StatusCode::BAD_REQUEST, "Validation Error", None).with_issues(v.issues)
            }
            ServiceError::ConstraintViolation(msg) => {
                warn!(code, error = %msg, "write rejected by storage constraint");
                JsonApiError::new(StatusCode::CONFLICT, "Conflict", Some(msg))
            }
            ServiceError::StorageUnavailable(msg) => {
                error!(code, error = %msg, "storage unavailable");
                JsonApiError::new(StatusCode::SERVICE_UNAVAILABLE, "Service Unavailable", Some(msg))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use service::ValidationError;

    #[test]
    fn validation_maps_to_400_with_issues() {
        let err: JsonApiError = ServiceError::Validation(ValidationError {
            issues: vec![ValidationIssue::new("code", "is required")],
        })
        .into();
        assert_eq!(err.status, StatusCode::BAD_REQUEST);
        let body = serde_json::to_value(&err).unwrap();
        assert_eq!(
            body,
            serde_json::json!({ "error": "Validation Error", "issues": [{ "path": "code", "message": "is required" }] })
        );
    }

    #[test]
    fn storage_kinds_stay_distinguishable() {
        let conflict: JsonApiError = ServiceError::ConstraintViolation("dup".into()).into();
        let down: JsonApiError = ServiceError::StorageUnavailable("timeout".into()).into();
        assert_eq!(conflict.status, StatusCode::CONFLICT);
        assert_eq!(down.status, StatusCode::SERVICE_UNAVAILABLE);
    }
}
