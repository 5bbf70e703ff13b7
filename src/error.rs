use actix_web::{HttpResponse, ResponseError};
use sea_orm::{DbErr, SqlErr};
use serde_json::json;
use thiserror::Error;

use crate::models::FormErrors;

pub type AppResult<T> = Result<T, AppError>;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    DatabaseError(#[from] DbErr),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Invalid form submission")]
    InvalidForm(FormErrors),

    #[error("Auth error: {0}")]
    AuthError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Forbidden")]
    Forbidden,

    #[error("Session error: {0}")]
    SessionError(String),

    #[error("Config error: {0}")]
    ConfigError(String),

    #[error("Internal server error: {0}")]
    InternalError(String),

    #[error("JSON serialization/deserialization error: {0}")]
    SerdeJsonError(#[from] serde_json::Error),
}

impl AppError {
    /// Model-layer rule violations travel as `DbErr::Custom`; report them as bad input.
    fn rule_violation(&self) -> Option<&str> {
        match self {
            AppError::DatabaseError(DbErr::Custom(msg)) => Some(msg),
            _ => None,
        }
    }
}

impl ResponseError for AppError {
    fn error_response(&self) -> HttpResponse {
        if let Some(msg) = self.rule_violation() {
            log::warn!("Validation error: {msg}");
            return error_body(
                actix_web::http::StatusCode::BAD_REQUEST,
                "VALIDATION_ERROR",
                msg,
            );
        }

        if let AppError::InvalidForm(errors) = self {
            return HttpResponse::BadRequest().json(json!({
                "success": false,
                "error": {
                    "code": "VALIDATION_ERROR",
                    "message": "Invalid form submission",
                    "fields": errors
                }
            }));
        }

        let (status_code, error_code, message) = match self {
            AppError::ValidationError(msg) => {
                log::warn!("Validation error: {msg}");
                (
                    actix_web::http::StatusCode::BAD_REQUEST,
                    "VALIDATION_ERROR",
                    msg.clone(),
                )
            }
            AppError::AuthError(msg) => {
                log::warn!("Authentication error: {msg}");
                (
                    actix_web::http::StatusCode::UNAUTHORIZED,
                    "AUTH_ERROR",
                    msg.clone(),
                )
            }
            AppError::NotFound(msg) => (
                actix_web::http::StatusCode::NOT_FOUND,
                "NOT_FOUND",
                msg.clone(),
            ),
            AppError::Forbidden => {
                log::warn!("Forbidden access");
                (
                    actix_web::http::StatusCode::FORBIDDEN,
                    "FORBIDDEN",
                    "Forbidden".to_string(),
                )
            }
            AppError::DatabaseError(err) => match err.sql_err() {
                Some(SqlErr::UniqueConstraintViolation(detail)) => {
                    log::warn!("Unique constraint violation: {detail}");
                    (
                        actix_web::http::StatusCode::CONFLICT,
                        "CONFLICT",
                        "A record with these details already exists".to_string(),
                    )
                }
                Some(SqlErr::ForeignKeyConstraintViolation(detail)) => {
                    log::warn!("Foreign key violation: {detail}");
                    (
                        actix_web::http::StatusCode::BAD_REQUEST,
                        "VALIDATION_ERROR",
                        "Referenced record does not exist".to_string(),
                    )
                }
                _ => {
                    log::error!("Database error: {err}");
                    (
                        actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                        "DATABASE_ERROR",
                        "Database error".to_string(),
                    )
                }
            },
            _ => {
                log::error!("Internal error: {self}");
                (
                    actix_web::http::StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "Internal server error".to_string(),
                )
            }
        };

        error_body(status_code, error_code, &message)
    }
}

fn error_body(
    status_code: actix_web::http::StatusCode,
    error_code: &str,
    message: &str,
) -> HttpResponse {
    HttpResponse::build(status_code).json(json!({
        "success": false,
        "error": {
            "code": error_code,
            "message": message
        }
    }))
}
