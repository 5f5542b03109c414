//! OpenID session data models.
//!
//! Type-safe wrapper for the CSRF state token stored in the session while the visitor is away
//! at their OpenID provider. The token is generated when the authentication request is built and
//! validated when the provider redirects back.

use serde::{Deserialize, Serialize};
use tower_sessions::Session;

use crate::server::error::{auth::AuthError, Error};

/// Session key for storing the OpenID CSRF state token.
pub const SESSION_AUTH_CSRF_KEY: &str = "kigg:auth:openid_csrf";

/// Session wrapper for CSRF state token storage.
#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionAuthCsrf(pub String);

impl SessionAuthCsrf {
    /// Inserts the CSRF state token into the session.
    ///
    /// # Arguments
    /// - `session` - User's session for storing the CSRF token
    /// - `state` - CSRF state token to store (randomly generated string)
    ///
    /// # Returns
    /// - `Ok(())` - CSRF token successfully stored in session
    /// - `Err(Error)` - Session storage failed (Redis error, serialization error)
    pub async fn insert(session: &Session, state: &str) -> Result<(), Error> {
        session
            .insert(SESSION_AUTH_CSRF_KEY, SessionAuthCsrf(state.to_string()))
            .await?;

        Ok(())
    }

    /// Retrieves the CSRF state token from the session without removing it.
    ///
    /// # Returns
    /// - `Ok(String)` - CSRF token found
    /// - `Err(Error::AuthError(AuthError::CsrfMissingValue))` - No CSRF token in session
    /// - `Err(Error)` - Session retrieval failed
    pub async fn get(session: &Session) -> Result<String, Error> {
        match session.get::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY).await? {
            Some(SessionAuthCsrf(csrf)) => Ok(csrf),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }

    /// Removes and returns the CSRF state token so it can only be used once.
    ///
    /// # Returns
    /// - `Ok(String)` - CSRF token found and removed
    /// - `Err(Error::AuthError(AuthError::CsrfMissingValue))` - No CSRF token in session
    /// - `Err(Error)` - Session operation failed
    pub async fn remove(session: &Session) -> Result<String, Error> {
        match session
            .remove::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY)
            .await?
        {
            Some(SessionAuthCsrf(csrf)) => Ok(csrf),
            None => Err(AuthError::CsrfMissingValue.into()),
        }
    }

    /// Drops the CSRF state token if one is stored, for flows that end without validating it.
    pub async fn discard(session: &Session) -> Result<(), Error> {
        session
            .remove::<SessionAuthCsrf>(SESSION_AUTH_CSRF_KEY)
            .await?;

        Ok(())
    }
}
