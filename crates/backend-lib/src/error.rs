// ============================
// riskweb-backend-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Username already exists")]
    UsernameTaken,

    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Invalid identity assertion")]
    InvalidAssertion,

    #[error("Missing id_token")]
    MissingAssertion,

    #[error("Federated account has no email claim")]
    MissingEmail,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Server misconfigured: {0}")]
    Misconfigured(&'static str),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Token error: {0}")]
    Token(#[from] jsonwebtoken::errors::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::UsernameTaken => StatusCode::CONFLICT,
            AppError::InvalidCredentials | AppError::InvalidAssertion => {
                StatusCode::UNAUTHORIZED
            },
            AppError::MissingAssertion
            | AppError::MissingEmail
            | AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::UsernameTaken => "ACCT_001",
            AppError::InvalidCredentials => "AUTH_001",
            AppError::InvalidAssertion => "AUTH_002",
            AppError::MissingAssertion => "VAL_001",
            AppError::MissingEmail => "VAL_002",
            AppError::InvalidInput(_) => "VAL_003",
            AppError::Misconfigured(_) => "CFG_001",
            AppError::Internal(_) => "INT_001",
            AppError::Io(_) => "IO_001",
            AppError::Json(_) => "JSON_001",
            AppError::Token(_) => "INT_002",
        }
    }

    /// Get a sanitized message suitable for production use.
    /// Both credential failures collapse to one message so the response
    /// never reveals which part of a credential was wrong.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::UsernameTaken => "Username already exists".to_string(),
            AppError::InvalidCredentials | AppError::InvalidAssertion => {
                "Authentication failed".to_string()
            },
            AppError::MissingAssertion => "Missing id_token".to_string(),
            AppError::MissingEmail => {
                "Federated account has no email claim".to_string()
            },
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Misconfigured(_) => "Server misconfigured".to_string(),
            _ => "An internal server error occurred".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Use detailed messages in development, sanitized in production
        let message = if cfg!(debug_assertions) {
            self.to_string()
        } else {
            self.sanitized_message()
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        AppError::Internal(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;

    #[test]
    fn test_app_error_display() {
        assert_eq!(
            AppError::UsernameTaken.to_string(),
            "Username already exists"
        );
        assert_eq!(AppError::InvalidCredentials.to_string(), "Invalid credentials");
        assert_eq!(
            AppError::Misconfigured("GOOGLE_CLIENT_ID missing").to_string(),
            "Server misconfigured: GOOGLE_CLIENT_ID missing"
        );
    }

    #[test]
    fn test_app_error_status_codes() {
        assert_eq!(AppError::UsernameTaken.status_code(), StatusCode::CONFLICT);
        assert_eq!(
            AppError::InvalidCredentials.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::InvalidAssertion.status_code(),
            StatusCode::UNAUTHORIZED
        );
        assert_eq!(
            AppError::MissingAssertion.status_code(),
            StatusCode::BAD_REQUEST
        );
        assert_eq!(
            AppError::Misconfigured("x").status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
        assert_eq!(
            AppError::Internal("x".to_string()).status_code(),
            StatusCode::INTERNAL_SERVER_ERROR
        );
    }

    #[test]
    fn test_credential_failures_collapse() {
        // Wrong password and bad assertion must be indistinguishable externally
        assert_eq!(
            AppError::InvalidCredentials.sanitized_message(),
            AppError::InvalidAssertion.sanitized_message()
        );
    }

    #[test]
    fn test_app_error_into_response() {
        let response = AppError::UsernameTaken.into_response();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        let response = AppError::InvalidCredentials.into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response
            .headers()
            .get("content-type")
            .and_then(|v| v.to_str().ok())
            .is_some_and(|v| v.contains("application/json")));
    }
}
