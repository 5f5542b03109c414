//! Changes administrators make to other members' accounts.
//!
//! Callers check that the acting user is an administrator before using this service.

use entity::user::Role;
use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::server::{
    data::user::{ip_address::UserIpAddressRepository, UserRepository},
    error::{domain::DomainError, Error},
    service::blocked_ip::BlockedIpCollection,
};

/// Parses a role name ignoring case.
pub fn parse_role(value: &str) -> Option<Role> {
    match value.trim().to_ascii_lowercase().as_str() {
        "user" => Some(Role::User),
        "bot" => Some(Role::Bot),
        "moderator" => Some(Role::Moderator),
        "administrator" => Some(Role::Administrator),
        _ => None,
    }
}

pub struct AdminService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> AdminService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Changes the user's role. An unknown role name keeps the current role.
    pub async fn change_role(&self, user_id: Uuid, role: &str) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let role = parse_role(role).unwrap_or(user.role);
        user_repo.update_role(user.id, role).await?;

        txn.commit().await?;

        tracing::info!("Role of user {} set to {:?}", user.user_name, role);

        Ok(())
    }

    /// Locks the user out, or lets them back in when `is_locked_out` is false.
    pub async fn set_locked_out(&self, user_id: Uuid, is_locked_out: bool) -> Result<(), Error> {
        let txn = self.db.begin().await?;
        let user_repo = UserRepository::new(&txn);

        let user = user_repo
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        user_repo.update_locked_out(user.id, is_locked_out).await?;

        txn.commit().await?;

        if is_locked_out {
            tracing::info!("Locked user: {}", user.user_name);
        } else {
            tracing::info!("Unlocked user: {}", user.user_name);
        }

        Ok(())
    }

    /// Blocks every address the user signed in from except `allowed`, and unblocks `allowed`.
    pub async fn allow_ips(
        &self,
        blocked_ips: &BlockedIpCollection,
        user_id: Uuid,
        allowed: &[String],
    ) -> Result<(), Error> {
        let user = UserRepository::new(self.db)
            .find_by_id(user_id)
            .await?
            .ok_or(DomainError::UserNotFound)?;

        let to_block: Vec<String> = UserIpAddressRepository::new(self.db)
            .get_by_user_id(user.id)
            .await?
            .into_iter()
            .filter(|ip| !allowed.contains(ip))
            .collect();

        blocked_ips.add_range(self.db, &to_block).await?;
        blocked_ips.remove_range(self.db, allowed).await?;

        tracing::info!(
            "Updated allowed IP addresses of user {}: {} blocked, {} allowed",
            user.user_name,
            to_block.len(),
            allowed.len()
        );

        Ok(())
    }
}
