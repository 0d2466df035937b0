// HTTP API error taxonomy
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};

/// HTTP API error with appropriate status codes and client-safe messages.
///
/// Content pages never produce `NotFound` for missing slugs (they follow the
/// soft-404 policy instead); this taxonomy covers the favorites, proposals
/// and lead surfaces plus genuine infrastructure failures.
#[derive(Debug)]
pub enum ApiError {
    // 400 Bad Request
    Validation(String),

    // 404 Not Found
    NotFound(String),

    // 409 Conflict
    Conflict(String),

    // 410 Gone (expired shared content)
    Gone(String),

    // 500 Internal Server Error
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::Gone(_) => StatusCode::GONE,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-safe error message
    pub fn message(&self) -> &str {
        match self {
            ApiError::Validation(msg)
            | ApiError::NotFound(msg)
            | ApiError::Conflict(msg)
            | ApiError::Gone(msg)
            | ApiError::Internal(msg) => msg,
        }
    }

    pub fn to_json(&self) -> Value {
        json!({
            "success": false,
            "error": self.message(),
        })
    }

    pub fn validation(message: impl Into<String>) -> Self {
        ApiError::Validation(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        ApiError::NotFound(message.into())
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        ApiError::Conflict(message.into())
    }

    pub fn gone(message: impl Into<String>) -> Self {
        ApiError::Gone(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::Internal(message.into())
    }
}

// Convert service error types to ApiError. Internal details are logged with
// a component tag and genericized before reaching the client.

impl From<sqlx::Error> for ApiError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => ApiError::not_found("Record not found"),
            other => {
                tracing::error!(component = "database", "query failed: {}", other);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::tenant_service::TenantError> for ApiError {
    fn from(err: crate::services::tenant_service::TenantError) -> Self {
        use crate::services::tenant_service::TenantError;
        match err {
            TenantError::UnknownDomain(domain) => {
                ApiError::not_found(format!("Unknown tenant domain: {}", domain))
            }
            TenantError::Sqlx(e) => {
                tracing::error!(component = "tenants", "lookup failed: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::favorites_service::FavoritesError> for ApiError {
    fn from(err: crate::services::favorites_service::FavoritesError) -> Self {
        use crate::services::favorites_service::FavoritesError;
        match err {
            FavoritesError::ListNotFound(key) => {
                ApiError::not_found(format!("Favorites list not found: {}", key))
            }
            FavoritesError::CommentNotFound => ApiError::not_found("Comment not found"),
            FavoritesError::Sqlx(e) => {
                tracing::error!(component = "favorites", "query failed: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::proposal_service::ProposalError> for ApiError {
    fn from(err: crate::services::proposal_service::ProposalError) -> Self {
        use crate::services::proposal_service::ProposalError;
        match err {
            ProposalError::NotFound(code) => {
                ApiError::not_found(format!("Proposal not found: {}", code))
            }
            ProposalError::Expired(code) => {
                ApiError::gone(format!("Proposal has expired: {}", code))
            }
            ProposalError::Sqlx(e) => {
                tracing::error!(component = "proposals", "query failed: {}", e);
                ApiError::internal("An error occurred while processing your request")
            }
        }
    }
}

impl From<crate::services::lead_service::LeadError> for ApiError {
    fn from(err: crate::services::lead_service::LeadError) -> Self {
        use crate::services::lead_service::LeadError;
        match err {
            LeadError::Invalid(msg) => ApiError::validation(msg),
            LeadError::InvalidReference => {
                ApiError::validation("Referenced property or agent does not exist")
            }
            LeadError::SaveFailed => ApiError::internal("Failed to save contact request"),
        }
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for ApiError {}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        (self.status_code(), Json(self.to_json())).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn maps_variants_to_status_codes() {
        assert_eq!(ApiError::validation("x").status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(ApiError::not_found("x").status_code(), StatusCode::NOT_FOUND);
        assert_eq!(ApiError::conflict("x").status_code(), StatusCode::CONFLICT);
        assert_eq!(ApiError::gone("x").status_code(), StatusCode::GONE);
        assert_eq!(
            ApiError::internal("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn error_body_uses_envelope_shape() {
        let body = ApiError::validation("missing email").to_json();
        assert_eq!(body["success"], serde_json::json!(false));
        assert_eq!(body["error"], serde_json::json!("missing email"));
        assert!(body.get("data").is_none());
    }

    #[test]
    fn row_not_found_maps_to_404() {
        let err: ApiError = sqlx::Error::RowNotFound.into();
        assert_eq!(err.status_code(), StatusCode::NOT_FOUND);
    }
}
