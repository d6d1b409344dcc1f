//! REST API types for the query surface.
//!
//! Response bodies mirror the published registry API: record arrays on
//! success, `{ "detail": "..." }` on failure, and a wrapped count for the
//! full listing.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Json, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::StoreError;
use crate::models::Operator;

// =============================================================================
// Responses
// =============================================================================

/// Response for the full listing: matching records wrapped with a total.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TodosResponse {
    /// Number of records in `dados`.
    pub total_registros: usize,
    /// The full operator collection.
    pub dados: Vec<Operator>,
}

/// Body of every error response.
pub fn error_body(detail: &str) -> Value {
    json!({ "detail": detail })
}

// =============================================================================
// API Error
// =============================================================================

/// Transport-level error: a status code plus a human-readable detail.
///
/// The query engine only reports *that* a lookup failed; each route decides
/// the status code and the message naming the missing resource.
#[derive(Debug, Clone)]
pub struct ApiError {
    pub status: StatusCode,
    pub detail: String,
}

impl ApiError {
    /// 404 with the given detail message.
    pub fn not_found(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            detail: detail.into(),
        }
    }

    /// 500 with the given detail message.
    pub fn internal(detail: impl Into<String>) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            detail: detail.into(),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(error_body(&self.detail))).into_response()
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            // Absent data file is a 404 with a fixed message
            StoreError::Missing(_) => Self::not_found("Arquivo JSON não encontrado"),
            // Unreadable or corrupt data is a server-side fault
            other => Self::internal(other.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    #[test]
    fn test_error_body_shape() {
        let body = error_body("Registro 419761 não encontrado");
        assert_eq!(body["detail"], "Registro 419761 não encontrado");
    }

    #[test]
    fn test_missing_file_maps_to_404() {
        let err: ApiError = StoreError::Missing(PathBuf::from("x.json")).into();
        assert_eq!(err.status, StatusCode::NOT_FOUND);
        assert_eq!(err.detail, "Arquivo JSON não encontrado");
    }

    #[test]
    fn test_corrupt_data_maps_to_500() {
        let json_err = serde_json::from_str::<Value>("[").unwrap_err();
        let err: ApiError = StoreError::from(json_err).into();
        assert_eq!(err.status, StatusCode::INTERNAL_SERVER_ERROR);
    }

    #[test]
    fn test_todos_response_field_names() {
        let response = TodosResponse {
            total_registros: 1,
            dados: vec![Operator::new("419761", "19541931000125", "São Paulo", "SP", "Cooperativa Médica")],
        };

        let value = serde_json::to_value(&response).unwrap();
        assert_eq!(value["total_registros"], 1);
        assert_eq!(value["dados"][0]["Registro_ANS"], "419761");
    }
}
