use tower_sessions::Session;

use crate::server::{
    error::{auth::AuthError, Error},
    model::session::auth::SessionAuthCsrf,
};

/// Validate that the session CSRF state exists and matches the `state` returned by the provider.
///
/// The stored state is consumed either way so a provider response can't be replayed.
pub async fn validate_csrf(session: &Session, csrf_state: Option<&str>) -> Result<(), Error> {
    let stored_state = SessionAuthCsrf::remove(session).await?;

    match csrf_state {
        Some(state) if state == stored_state => Ok(()),
        _ => Err(Error::AuthError(AuthError::CsrfValidationFailed)),
    }
}
