use serde::{Deserialize, Serialize};
use tower_sessions::{Expiry, Session};
use uuid::Uuid;

use crate::server::error::Error;

pub const SESSION_USER_ID_KEY: &str = "kigg:user:id";

/// How long a "remember me" sign in survives without activity.
pub const REMEMBER_ME_DAYS: i64 = 30;

#[derive(Default, Deserialize, Serialize, Debug)]
pub struct SessionUserId(pub String);

impl SessionUserId {
    /// Insert user ID into session
    ///
    /// Without `remember_me` the session ends with the browser session, otherwise it lives for
    /// [`REMEMBER_ME_DAYS`] of inactivity.
    pub async fn insert(session: &Session, user_id: Uuid, remember_me: bool) -> Result<(), Error> {
        // New identity, new session ID
        session.cycle_id().await?;

        if remember_me {
            session.set_expiry(Some(Expiry::OnInactivity(time::Duration::days(
                REMEMBER_ME_DAYS,
            ))));
        } else {
            session.set_expiry(Some(Expiry::OnSessionEnd));
        }

        session
            .insert(SESSION_USER_ID_KEY, SessionUserId(user_id.to_string()))
            .await?;

        Ok(())
    }

    /// Get user ID from session
    pub async fn get(session: &Session) -> Result<Option<Uuid>, Error> {
        session
            .get::<SessionUserId>(SESSION_USER_ID_KEY)
            .await?
            .map(|SessionUserId(id_str)| {
                id_str.parse::<Uuid>().map_err(|e| {
                    Error::ParseError(format!("Failed to parse session user id: {}", e))
                })
            })
            .transpose()
    }
}
