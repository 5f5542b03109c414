use sea_orm::{DatabaseConnection, TransactionTrait};

use crate::server::{
    data::user::{ip_address::UserIpAddressRepository, UserRepository},
    error::{domain::DomainError, Error},
    event::{DomainEvent, EventAggregator},
    model::app::Settings,
    openid::OpenIdClaims,
    service::user::{account::change_email, create_user},
};

pub struct OpenIdLoginService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a Settings,
    events: &'a EventAggregator,
}

impl<'a> OpenIdLoginService<'a> {
    pub fn new(
        db: &'a DatabaseConnection,
        settings: &'a Settings,
        events: &'a EventAggregator,
    ) -> Self {
        Self {
            db,
            settings,
            events,
        }
    }

    /// Signs in the member owning the claimed identifier, registering them on first sign-in.
    ///
    /// The provider's email replaces the stored one unless it is missing or the default
    /// OpenID email.
    pub async fn login(
        &self,
        claims: &OpenIdClaims,
        ip_address: Option<&str>,
    ) -> Result<entity::user::Model, Error> {
        let user_name = claims.claimed_identifier.as_str();
        let default_email = self.settings.default_openid_email.as_str();
        let email = claims.email.as_deref().unwrap_or(default_email);

        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let (user, is_new) = match user_repo.find_by_user_name(user_name).await? {
            Some(user) if user.is_locked_out => {
                return Err(DomainError::OpenIdAccountLocked.into());
            }
            Some(user) => {
                if !email.eq_ignore_ascii_case(&user.email)
                    && !email.eq_ignore_ascii_case(default_email)
                {
                    change_email(&user_repo, &user, email).await?;
                }
                (user, false)
            }
            None => (
                create_user(&txn, self.settings, user_name, email, None).await?,
                true,
            ),
        };

        let user = user_repo
            .update_last_activity(user.id)
            .await?
            .ok_or_else(|| Error::InternalError(format!("user {} vanished", user.id)))?;

        if let Some(ip_address) = ip_address {
            UserIpAddressRepository::new(&txn)
                .record(user.id, ip_address)
                .await?;
        }

        txn.commit().await?;

        if is_new {
            self.events.publish(DomainEvent::UserActivated {
                user_id: user.id,
                user_name: user.user_name.clone(),
            });
        }

        tracing::info!("User logged in with OpenID: {}", user.user_name);

        Ok(user)
    }
}
