use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;
use uuid::Uuid;

use crate::{model::api::ErrorDto, server::error::InternalServerError};

#[derive(Error, Debug)]
pub enum AuthError {
    #[error("User ID is not present in session")]
    UserNotInSession,
    #[error("User ID {0} not found in database despite having an active session")]
    UserNotInDatabase(Uuid),
    #[error("Failed to login user due to CSRF state mismatch")]
    CsrfValidationFailed,
    #[error("Failed to login user due to CSRF state missing from session")]
    CsrfMissingValue,
    #[error("Request from blocked IP address {0}")]
    IpBlocked(String),
}

impl AuthError {
    fn user_not_found() -> Response {
        (
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: "Użytkownik nie istnieje.".to_string(),
            }),
        )
            .into_response()
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        match self {
            Self::UserNotInSession => {
                tracing::debug!("{}", Self::UserNotInSession);

                Self::user_not_found()
            }
            Self::UserNotInDatabase(user_id) => {
                tracing::debug!(
                    user_id = %user_id,
                    "{}",
                    self
                );

                Self::user_not_found()
            }
            Self::CsrfValidationFailed => {
                tracing::debug!("{}", Self::CsrfValidationFailed);

                (
                    StatusCode::BAD_REQUEST,
                    Json(ErrorDto {
                        error: "Wystąpił problem podczas logowania, spróbuj ponownie.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::IpBlocked(ip_address) => {
                tracing::info!(ip_address = %ip_address, "Rejected request from blocked IP");

                (
                    StatusCode::FORBIDDEN,
                    Json(ErrorDto {
                        error: "Twój adres IP został zablokowany.".to_string(),
                    }),
                )
                    .into_response()
            }
            Self::CsrfMissingValue => InternalServerError(self).into_response(),
        }
    }
}
