//! Membership rule violations.
//!
//! Every variant's `Display` output is the Polish message shown to the visitor, so these errors
//! are reported through the JSON envelope instead of being logged as failures.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

use crate::model::api::ErrorDto;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Form input rejected by a validation rule.
    #[error("{0}")]
    Validation(String),
    #[error("Nazwa użytkownika \"{0}\" jest już zajęta. Podaj inną nazwę użytkownika.")]
    UserNameTaken(String),
    #[error("Adres e-mail \"{0}\" jest już zajęty. Podaj inny adres e-mail.")]
    EmailTaken(String),
    #[error("Nie można zmienić hasła dla konta OpenID.")]
    OpenIdPasswordChange,
    #[error("Nie można zresetować hasła dla konta OpenID.")]
    OpenIdPasswordReset,
    #[error("Stare hasło jest niepoprawne.")]
    OldPasswordMismatch,
    #[error("Niepoprawne dane zalogowania.")]
    InvalidCredentials,
    #[error("Twoje konto jest aktualnie zablokowane. Skontaktuj się z pomocą aby rozwiązać ten problem.")]
    AccountLocked,
    #[error("Twoje konto jest obecnie zablokowane. Skontaktuj się z nami w tej sprawie.")]
    OpenIdAccountLocked,
    #[error("Twoje konto nie zostało jeszcze aktywowane. Posłuż się linkiem aktywacyjnym z wiadomości rejestracyjnej aby aktywować konto.")]
    AccountInactive,
    #[error("Podany login jest poprawny tylko z OpenID.")]
    OpenIdOnlyAccount,
    #[error("Nie jesteś zalogowany.")]
    NotAuthenticated,
    #[error("Nie masz praw do wywoływania tej metody.")]
    NotAuthorized,
    #[error("Podany użytkownik nie istnieje.")]
    UserNotFound,
    #[error("Nie znaleziono użytkownika z podanym adresem e-mail.")]
    EmailNotFound,
    #[error("Podane wydarzenie nie istnieje.")]
    EventNotFound,
}

impl IntoResponse for DomainError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotAuthenticated => StatusCode::UNAUTHORIZED,
            Self::NotAuthorized => StatusCode::FORBIDDEN,
            Self::UserNotFound | Self::EmailNotFound | Self::EventNotFound => {
                StatusCode::NOT_FOUND
            }
            _ => StatusCode::BAD_REQUEST,
        };

        (
            status,
            Json(ErrorDto {
                error: self.to_string(),
            }),
        )
            .into_response()
    }
}
