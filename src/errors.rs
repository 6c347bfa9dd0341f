use actix_web::{HttpResponse, ResponseError, http::StatusCode};
use std::fmt;

use crate::models::api::ApiErrorResponse;

/// Which collection a missing id was looked up in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntityKind {
    Todo,
    Definition,
}

impl EntityKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            EntityKind::Todo => "Todo",
            EntityKind::Definition => "Recurring definition",
        }
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    Validation(String),
    NotFound { kind: EntityKind, id: i64 },
}

impl AppError {
    pub fn todo_not_found(id: i64) -> Self {
        AppError::NotFound { kind: EntityKind::Todo, id }
    }

    pub fn definition_not_found(id: i64) -> Self {
        AppError::NotFound { kind: EntityKind::Definition, id }
    }

    /// Joins collected validation messages; `None` when there are none.
    pub fn from_validation(errors: Vec<String>) -> Option<Self> {
        if errors.is_empty() {
            None
        } else {
            Some(AppError::Validation(errors.join("; ")))
        }
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Validation(msg) => write!(f, "Validation error: {msg}"),
            AppError::NotFound { kind, id } => write!(f, "{kind} {id} not found"),
        }
    }
}

impl std::error::Error for AppError {}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
        }
    }

    fn error_response(&self) -> HttpResponse {
        match self {
            AppError::Validation(msg) => {
                log::warn!("Rejected request: {msg}");
                HttpResponse::BadRequest().json(ApiErrorResponse {
                    error: "Validation failed".to_string(),
                    details: Some(msg.clone()),
                })
            }
            AppError::NotFound { .. } => HttpResponse::NotFound().json(ApiErrorResponse {
                error: self.to_string(),
                details: None,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn not_found_names_kind_and_id() {
        assert_eq!(AppError::todo_not_found(7).to_string(), "Todo 7 not found");
        assert_eq!(
            AppError::definition_not_found(3).to_string(),
            "Recurring definition 3 not found"
        );
    }

    #[test]
    fn validation_messages_are_joined() {
        let err = AppError::from_validation(vec!["a".into(), "b".into()]).unwrap();
        assert_eq!(err, AppError::Validation("a; b".into()));
        assert!(AppError::from_validation(Vec::new()).is_none());
    }

    #[test]
    fn status_codes() {
        assert_eq!(AppError::Validation("x".into()).status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(AppError::todo_not_found(1).status_code(), StatusCode::NOT_FOUND);
    }
}
