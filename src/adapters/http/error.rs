use crate::utils::error::AvailabilityError;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;

impl IntoResponse for AvailabilityError {
    fn into_response(self) -> Response {
        let status = match &self {
            AvailabilityError::ValidationError { .. } => StatusCode::UNPROCESSABLE_ENTITY,
            AvailabilityError::NotFound(_) => StatusCode::NOT_FOUND,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = match &self {
            AvailabilityError::ValidationError { field, .. } => {
                json!({ "error": self.to_string(), "field": field })
            }
            _ => json!({ "error": self.to_string() }),
        };

        (status, Json(body)).into_response()
    }
}
