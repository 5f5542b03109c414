//! Changes members make to their own accounts.

use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::user::UserRepository,
    email::{new_password_email, EmailSender},
    error::{domain::DomainError, Error},
    event::{DomainEvent, EventAggregator},
    model::app::Settings,
    service::user::is_openid_account,
    util::password::{generate_password, hash_password, verify_password},
};

pub struct AccountService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AccountService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Replaces the password after checking the current one.
    ///
    /// # Returns
    /// - `Err(DomainError::OpenIdPasswordChange)` - The account signs in through OpenID
    /// - `Err(DomainError::OldPasswordMismatch)` - `old_password` is wrong
    pub async fn change_password(
        &self,
        user_id: Uuid,
        old_password: &str,
        new_password: &str,
    ) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let Some(current_hash) = user.password.as_deref() else {
            return Err(DomainError::OpenIdPasswordChange.into());
        };

        if !verify_password(old_password, current_hash)? {
            return Err(DomainError::OldPasswordMismatch.into());
        }

        user_repo
            .update_password(user.id, hash_password(new_password)?)
            .await?;

        txn.commit().await?;

        tracing::info!("Password changed for user: {}", user.user_name);

        Ok(())
    }

    /// Replaces the email after checking no other member uses it.
    pub async fn change_email(&self, user_id: Uuid, email: &str) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        change_email(&user_repo, &user, email).await?;

        txn.commit().await?;

        Ok(())
    }

    /// Generates a new password for the account registered with `email` and mails it.
    ///
    /// # Returns
    /// - `Err(DomainError::EmailNotFound)` - No account uses `email`
    /// - `Err(DomainError::OpenIdPasswordReset)` - The account signs in through OpenID
    pub async fn reset_password(
        &self,
        settings: &Settings,
        email_sender: &dyn EmailSender,
        email: &str,
    ) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let user = user_repo
            .find_by_email(email)
            .await?
            .ok_or(DomainError::EmailNotFound)?;

        if is_openid_account(&user) {
            return Err(DomainError::OpenIdPasswordReset.into());
        }

        let password = generate_password();
        user_repo
            .update_password(user.id, hash_password(&password)?)
            .await?;

        txn.commit().await?;

        email_sender
            .send(new_password_email(
                settings,
                &user.email,
                &user.user_name,
                &password,
            ))
            .await?;

        tracing::info!("Generated new password for: {}", user.user_name);

        Ok(())
    }

    /// Activates an account from the link in its registration email.
    ///
    /// # Returns
    /// - `Ok(Some(Model))` - The account was inactive and is now active
    /// - `Ok(None)` - No such account, or it was already active
    pub async fn activate(
        &self,
        events: &EventAggregator,
        user_id: Uuid,
    ) -> Result<Option<entity::user::Model>, Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        match user_repo.find_by_id(user_id).await? {
            Some(user) if !user.is_active => {
                let user = user_repo
                    .activate(user.id)
                    .await?
                    .ok_or_else(|| Error::InternalError(format!("user {} vanished", user.id)))?;

                txn.commit().await?;

                events.publish(DomainEvent::UserActivated {
                    user_id: user.id,
                    user_name: user.user_name.clone(),
                });

                tracing::info!("Account activated for user: {}", user.user_name);

                Ok(Some(user))
            }
            _ => Ok(None),
        }
    }
}

/// Changes `user`'s email unless another member already uses it.
pub(crate) async fn change_email<C: sea_orm::ConnectionTrait>(
    user_repo: &UserRepository<'_, C>,
    user: &entity::user::Model,
    email: &str,
) -> Result<(), Error> {
    if let Some(owner) = user_repo.find_by_email(email).await? {
        if owner.id != user.id {
            return Err(DomainError::EmailTaken(email.to_string()).into());
        }
    }

    user_repo.update_email(user.id, email).await?;

    Ok(())
}
