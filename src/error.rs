use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ServerError {
    #[error("Claim not found: {0}")]
    ClaimNotFound(String),

    #[error("Claim already exists: {0}")]
    ClaimAlreadyExists(String),

    #[error("Not authorized: {0}")]
    Authorization(String),

    #[error("Invalid transition: {0}")]
    InvalidTransition(String),

    #[error("Claim already finalized: {0}")]
    ClaimFinalized(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Concurrent modification detected on claim {0}")]
    Consistency(String),

    #[error("Authentication required")]
    AuthRequired,

    #[error("Authentication failed")]
    AuthFailed,

    #[error("Database error: {0}")]
    Db(#[from] sea_orm::DbErr),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl IntoResponse for ServerError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ServerError::ClaimNotFound(_) => (StatusCode::NOT_FOUND, self.to_string()),
            ServerError::ClaimAlreadyExists(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::Authorization(_) => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::InvalidTransition(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::ClaimFinalized(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::Validation(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            ServerError::Consistency(_) => (StatusCode::CONFLICT, self.to_string()),
            ServerError::AuthRequired => (StatusCode::UNAUTHORIZED, self.to_string()),
            ServerError::AuthFailed => (StatusCode::FORBIDDEN, self.to_string()),
            ServerError::Db(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ServerError::Internal(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            ServerError::Io(_) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
        };

        (status, message).into_response()
    }
}

pub type Result<T> = std::result::Result<T, ServerError>;
