//! Error types for the Kigg server application.
//!
//! This module provides the error handling system with specialized error types for different
//! domains (authentication, configuration, membership rules, email delivery, OpenID). All errors
//! implement `IntoResponse` for Axum HTTP responses and use `thiserror` for ergonomic error
//! definitions with automatic `Display` and `Error` trait implementations.

pub mod auth;
pub mod config;
pub mod domain;
pub mod email;
pub mod openid;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::{
    model::api::ErrorDto,
    server::error::{
        auth::AuthError, config::ConfigError, domain::DomainError, email::EmailError,
        openid::OpenIdError,
    },
};

/// Main error type for the Kigg server application.
///
/// This enum aggregates all domain-specific error types and external library errors into a
/// single unified error type. It uses `thiserror`'s `#[from]` attribute to enable automatic
/// conversion from underlying error types via the `?` operator.
///
/// # Error Categories
/// - Configuration errors (missing/invalid environment variables)
/// - Authentication errors (session, CSRF, blocked addresses)
/// - Domain errors (membership rules with messages meant for the visitor)
/// - Collaborator errors (email delivery, OpenID provider)
/// - External library errors (database, sessions, Redis)
#[derive(Error, Debug)]
pub enum Error {
    /// Configuration error (missing or invalid environment variables).
    #[error(transparent)]
    ConfigError(#[from] ConfigError),
    /// Authentication error (session, CSRF, blocked client address).
    #[error(transparent)]
    AuthError(#[from] AuthError),
    /// Broken membership rule, the message is shown to the visitor as-is.
    #[error(transparent)]
    DomainError(#[from] DomainError),
    /// Email could not be built or delivered.
    #[error(transparent)]
    EmailError(#[from] EmailError),
    /// OpenID provider request or response failure.
    #[error(transparent)]
    OpenIdError(#[from] OpenIdError),
    /// Parse error (failed to parse a value from string or other format).
    #[error("Failed to parse value: {0:?}")]
    ParseError(String),
    /// Password hashing or hash parsing failure.
    #[error("Failed to hash password: {0}")]
    PasswordHashError(String),
    /// Internal error indicating a bug in Kigg's code.
    #[error("Internal error, this indicates a bug: {0:?}")]
    InternalError(String),
    /// Database error (query failures, connection issues, constraint violations).
    #[error(transparent)]
    DbErr(#[from] sea_orm::DbErr),
    /// Session error (session retrieval, storage, serialization).
    #[error(transparent)]
    SessionError(#[from] tower_sessions::session::Error),
    /// Redis session store error (connection, command execution).
    #[error(transparent)]
    SessionRedisError(#[from] tower_sessions_redis_store::fred::prelude::Error),
    /// Socket error while binding or serving.
    #[error(transparent)]
    IoError(#[from] std::io::Error),
}

/// Converts application errors into HTTP responses.
///
/// # Returns
/// - 400 Bad Request - CSRF failures and broken membership rules
/// - 403 Forbidden - Requests from blocked addresses
/// - 404 Not Found - Missing users or resources
/// - 500 Internal Server Error - For all other errors (with error logging)
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        match self {
            Self::ConfigError(err) => err.into_response(),
            Self::AuthError(err) => err.into_response(),
            Self::DomainError(err) => err.into_response(),
            err => InternalServerError(err).into_response(),
        }
    }
}

/// Localized message reported when an operation failed for a reason the visitor can't fix.
///
/// `action` is the Polish noun phrase in the genitive case naming what was being done, for
/// example `"rejestracji"`.
pub fn unknown_error_message(action: &str) -> String {
    format!("Wystąpił nieznany błąd podczas {}.", action)
}

/// Wrapper type for converting any displayable error into a 500 Internal Server Error response.
///
/// Logs the error message and returns a generic "Internal server error" message to the client
/// to avoid leaking implementation details.
pub struct InternalServerError<E>(pub E);

impl<E: std::fmt::Display> IntoResponse for InternalServerError<E> {
    fn into_response(self) -> Response {
        tracing::error!("{}", self.0);

        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorDto {
                error: "Internal server error".to_string(),
            }),
        )
            .into_response()
    }
}
