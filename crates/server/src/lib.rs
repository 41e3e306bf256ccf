use api_types::error::{ApiError, Violation};
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection, QueryRejection},
    http::StatusCode,
    response::IntoResponse,
};
use engine::{EngineError, ValidationError};

pub use server::{ServerState, router, run_with_listener};

mod analytics;
mod expenses;
mod server;

pub enum ServerError {
    Validation(ValidationError),
    Engine(EngineError),
    Generic(String),
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::KeyNotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
    }
}

fn message_for_engine_error(err: EngineError) -> String {
    match err {
        EngineError::Database(db_err) => {
            tracing::error!("database error: {db_err}");
            "internal server error".to_string()
        }
        other => other.to_string(),
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, body) = match self {
            ServerError::Validation(err) => {
                let violations = err
                    .violations
                    .iter()
                    .map(|v| Violation {
                        field: v.field.as_str().to_string(),
                        reason: v.reason.clone(),
                    })
                    .collect();
                (
                    StatusCode::BAD_REQUEST,
                    ApiError {
                        error: err.to_string(),
                        violations,
                    },
                )
            }
            ServerError::Engine(err) => (
                status_for_engine_error(&err),
                ApiError {
                    error: message_for_engine_error(err),
                    violations: Vec::new(),
                },
            ),
            ServerError::Generic(error) => (
                StatusCode::BAD_REQUEST,
                ApiError {
                    error,
                    violations: Vec::new(),
                },
            ),
        };

        (status, Json(body)).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<ValidationError> for ServerError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

macro_rules! rejection_into_generic {
    ($($rejection:ty),*) => {$(
        impl From<$rejection> for ServerError {
            fn from(value: $rejection) -> Self {
                Self::Generic(value.body_text())
            }
        }
    )*};
}

rejection_into_generic!(JsonRejection, PathRejection, QueryRejection);
