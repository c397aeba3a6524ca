//! HTTP adapter mapping for user use-case failures.
//!
//! Purpose: keep `UserServiceError` HTTP-agnostic while giving each endpoint
//! its own status codes and client messages. Every error body is exactly one
//! of `{"errors": [..]}` (validation) or `{"error": ".."}`; internal causes
//! are logged and never serialised.

use std::fmt;

use actix_web::error::{JsonPayloadError, QueryPayloadError};
use actix_web::http::StatusCode;
use actix_web::{HttpRequest, HttpResponse, ResponseError};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use utoipa::ToSchema;

use crate::domain::UserServiceError;

pub const EMAIL_IN_USE: &str = "O Email já está em uso!";
pub const CREATE_FAILED: &str = "Erro ao criar usuário!";
pub const LIST_FAILED: &str = "Erro ao buscar usuários!";
pub const UPDATE_FAILED: &str = "Erro ao atualizar usuário!";
pub const USER_NOT_FOUND: &str = "Usuário não encontrado!";
pub const DELETE_FAILED: &str = "Erro ao deletar usuário!";
pub const INVALID_BODY: &str = "Corpo da requisição inválido!";

/// Convenient result alias for HTTP handlers.
pub type ApiResult<T> = Result<T, ApiError>;

/// JSON body of an error response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum ErrorBody {
    /// Field validation failures, in field order.
    Validation { errors: Vec<String> },
    /// A single client-facing message.
    Message { error: String },
}

/// Error returned by the `/usuarios` handlers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiError {
    status: StatusCode,
    body: ErrorBody,
}

impl ApiError {
    fn message(status: StatusCode, message: &str) -> Self {
        Self {
            status,
            body: ErrorBody::Message {
                error: message.to_owned(),
            },
        }
    }

    fn validation(messages: Vec<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            body: ErrorBody::Validation { errors: messages },
        }
    }

    fn internal(message: &str, cause: &UserServiceError) -> Self {
        warn!(error = %cause, response = message, "request failed with internal error");
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, message)
    }

    /// Map a create failure.
    pub fn from_create(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(errors) => Self::validation(errors.messages()),
            UserServiceError::EmailInUse { .. } => {
                Self::message(StatusCode::BAD_REQUEST, EMAIL_IN_USE)
            }
            UserServiceError::NotFound { .. }
            | UserServiceError::Conflict { .. }
            | UserServiceError::Persistence(_) => Self::internal(CREATE_FAILED, &err),
        }
    }

    /// Map a list failure.
    pub fn from_list(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(_)
            | UserServiceError::EmailInUse { .. }
            | UserServiceError::NotFound { .. }
            | UserServiceError::Conflict { .. }
            | UserServiceError::Persistence(_) => Self::internal(LIST_FAILED, &err),
        }
    }

    /// Map an update failure.
    ///
    /// A missing target and a uniqueness collision share the generic `400`.
    pub fn from_update(err: UserServiceError) -> Self {
        match err {
            UserServiceError::Validation(errors) => Self::validation(errors.messages()),
            UserServiceError::NotFound { .. }
            | UserServiceError::Conflict { .. }
            | UserServiceError::EmailInUse { .. } => {
                debug!(error = %err, "update rejected");
                Self::message(StatusCode::BAD_REQUEST, UPDATE_FAILED)
            }
            UserServiceError::Persistence(_) => Self::internal(UPDATE_FAILED, &err),
        }
    }

    /// Map a delete failure.
    pub fn from_delete(err: UserServiceError) -> Self {
        match err {
            UserServiceError::NotFound { .. } => {
                debug!(error = %err, "delete target missing");
                Self::message(StatusCode::NOT_FOUND, USER_NOT_FOUND)
            }
            UserServiceError::Validation(_)
            | UserServiceError::EmailInUse { .. }
            | UserServiceError::Conflict { .. }
            | UserServiceError::Persistence(_) => Self::internal(DELETE_FAILED, &err),
        }
    }

    /// Request body that is not a JSON object.
    pub fn invalid_body() -> Self {
        Self::message(StatusCode::BAD_REQUEST, INVALID_BODY)
    }

    /// List query string that cannot be read, such as a repeated field.
    ///
    /// Answered like any other list failure.
    pub fn invalid_list_query() -> Self {
        Self::message(StatusCode::INTERNAL_SERVER_ERROR, LIST_FAILED)
    }

    pub fn body(&self) -> &ErrorBody {
        &self.body
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.body {
            ErrorBody::Validation { errors } => write!(f, "{}: {}", self.status, errors.join("; ")),
            ErrorBody::Message { error } => write!(f, "{}: {error}", self.status),
        }
    }
}

impl std::error::Error for ApiError {}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        self.status
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status).json(&self.body)
    }
}

/// `JsonConfig` error handler turning unreadable bodies into
/// [`ApiError::invalid_body`].
pub fn json_error_handler(err: JsonPayloadError, req: &HttpRequest) -> actix_web::Error {
    debug!(error = %err, path = req.path(), "rejected request body");
    ApiError::invalid_body().into()
}

/// `QueryConfig` error handler turning unreadable list queries into
/// [`ApiError::invalid_list_query`].
pub fn query_error_handler(err: QueryPayloadError, req: &HttpRequest) -> actix_web::Error {
    warn!(error = %err, query = req.query_string(), "rejected list query");
    ApiError::invalid_list_query().into()
}

#[cfg(test)]
mod tests;
