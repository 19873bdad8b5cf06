use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error as ThisError;
use tracing::error;

#[derive(Debug, ThisError)]
pub enum RosterError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Template error: {0}")]
    Template(#[from] askama::Error),

    #[error("Password hash error: {0}")]
    PasswordHash(String),

    #[error("Configuration error: {0}")]
    Config(#[from] Box<figment::Error>),

    #[error("secret_key must be at least 64 bytes")]
    InvalidSecretKey,

    #[error("session_ttl_minutes out of range: {0}")]
    InvalidSessionTtl(i64),

    #[error("Student {0} not found")]
    StudentNotFound(i64),

    #[error("Malformed student id: {0}")]
    MalformedId(String),
}

/// Field validation failures. The display strings are shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, ThisError)]
pub enum ValidationError {
    #[error("All fields are required")]
    MissingField,

    #[error("Age must be a positive whole number")]
    InvalidAge,

    #[error("Name must be at most {0} characters")]
    NameTooLong(usize),

    #[error("Grade must be at most {0} characters")]
    GradeTooLong(usize),
}

impl From<figment::Error> for RosterError {
    fn from(e: figment::Error) -> Self {
        RosterError::Config(Box::new(e))
    }
}

impl IntoResponse for RosterError {
    fn into_response(self) -> Response {
        match self {
            RosterError::StudentNotFound(_) | RosterError::MalformedId(_) => {
                (StatusCode::NOT_FOUND, "Student not found").into_response()
            }
            other => {
                error!(error = %other, "request failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "An internal server error occurred.",
                )
                    .into_response()
            }
        }
    }
}
