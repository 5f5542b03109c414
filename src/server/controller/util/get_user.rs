use tower_sessions::Session;

use crate::server::{
    data::user::UserRepository,
    error::{domain::DomainError, Error},
    model::{app::AppState, db::UserModel, session::user::SessionUserId},
    service::user::is_administrator,
};

/// Retrieves the signed in member from session and then from database
///
/// # Returns
/// - `Ok(Some(UserModel))`: Visitor is signed in
/// - `Ok(None)`: No user ID in session, or the ID no longer exists in the database (session is
///   cleared)
/// - `Err(Error)`: Internal errors (database query failures, session errors, etc.)
pub async fn get_current_user(
    state: &AppState,
    session: &Session,
) -> Result<Option<UserModel>, Error> {
    let Some(user_id) = SessionUserId::get(session).await? else {
        return Ok(None);
    };

    let Some(user) = UserRepository::new(&state.db).find_by_id(user_id).await? else {
        session.clear().await;

        tracing::warn!(
            "Failed to find user ID {} in database despite having an active session, cleared session",
            user_id
        );

        return Ok(None);
    };

    Ok(Some(user))
}

/// Requires the visitor to be a signed in administrator.
pub fn require_administrator(user: Option<&UserModel>) -> Result<&UserModel, DomainError> {
    let user = user.ok_or(DomainError::NotAuthenticated)?;

    if !is_administrator(user) {
        return Err(DomainError::NotAuthorized);
    }

    Ok(user)
}
