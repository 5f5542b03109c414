use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::user::{ip_address::UserIpAddressRepository, UserRepository},
    error::{domain::DomainError, Error},
    service::user::is_openid_account,
    util::password::verify_password,
};

pub struct LoginService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> LoginService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Verifies credentials and records the sign-in.
    ///
    /// Locked, inactive and OpenID accounts are rejected with their own message. An unknown
    /// user or a wrong password both yield [`DomainError::InvalidCredentials`].
    pub async fn login(
        &self,
        user_name: &str,
        password: &str,
        ip_address: Option<&str>,
    ) -> Result<entity::user::Model, Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let user = user_repo
            .find_by_user_name(user_name)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if user.is_locked_out {
            return Err(DomainError::AccountLocked.into());
        }
        if !user.is_active {
            return Err(DomainError::AccountInactive.into());
        }
        if is_openid_account(&user) {
            return Err(DomainError::OpenIdOnlyAccount.into());
        }

        let password_hash = user.password.as_deref().unwrap_or_default();
        if !verify_password(password, password_hash)? {
            return Err(DomainError::InvalidCredentials.into());
        }

        let user = user_repo
            .update_last_activity(user.id)
            .await?
            .ok_or(DomainError::InvalidCredentials)?;

        if let Some(ip_address) = ip_address {
            UserIpAddressRepository::new(&txn)
                .record(user.id, ip_address)
                .await?;
        }

        txn.commit().await?;

        tracing::info!("User logged in: {}", user.user_name);

        Ok(user)
    }

    /// Records the member's last activity when they sign out.
    pub async fn logout(&self, user_id: Uuid) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let user = UserRepository::new(&txn)
            .update_last_activity(user_id)
            .await?
            .ok_or(DomainError::NotAuthenticated)?;

        txn.commit().await?;

        tracing::info!("User logged out: {}", user.user_name);

        Ok(())
    }
}
