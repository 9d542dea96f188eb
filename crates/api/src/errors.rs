use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use dnsbench_domain::DomainError;
use serde_json::json;

/// Wraps a [`DomainError`] for the `IntoResponse` impl below. §7 taxonomy class 1
/// (operator-input errors) maps to 4xx; everything else is an internal failure the
/// caller cannot act on, so it collapses to 500 with a generic message.
pub struct ApiError(pub DomainError);

impl From<DomainError> for ApiError {
    fn from(err: DomainError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self.0 {
            DomainError::RunNotFound(_) => (StatusCode::NOT_FOUND, self.0.to_string()),

            DomainError::InvalidResolverAddress(_)
            | DomainError::LoopbackResolver(_)
            | DomainError::EmptyDomainList
            | DomainError::DomainListTooLarge(_)
            | DomainError::EmptyResolverList
            | DomainError::UnknownRunKind(_)
            | DomainError::InvalidTestProfile { .. }
            | DomainError::TooManyLocalResolvers(_)
            | DomainError::TooManyPublicResolvers(_) => (StatusCode::BAD_REQUEST, self.0.to_string()),

            DomainError::CannotDeleteBuiltIn(_) => (StatusCode::CONFLICT, self.0.to_string()),

            DomainError::InvalidStatusTransition { .. } => (StatusCode::CONFLICT, self.0.to_string()),

            DomainError::Store(_) | DomainError::Invariant(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "internal error".to_string())
            }
        };

        // §7 error shape: `{code, message, field?}`. `field` is only present for
        // errors about one specific input field.
        let mut body = json!({ "code": self.0.code(), "message": message });
        if let Some(field) = self.0.field() {
            body["field"] = json!(field);
        }
        (status, Json(body)).into_response()
    }
}
