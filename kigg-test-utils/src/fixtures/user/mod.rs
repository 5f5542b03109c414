//! User fixture utilities.
//!
//! Provides methods for inserting users, their recorded IP addresses and blocked IPs, along with
//! factory functions for in-memory models.

pub mod factory;

use argon2::{
    password_hash::{PasswordHasher, SaltString},
    Algorithm, Argon2, Params, Version,
};
use chrono::Utc;
use entity::user::Role;
use sea_orm::{ActiveValue, EntityTrait};
use uuid::Uuid;

use crate::{constant::TEST_PASSWORD, error::TestError, TestContext};

impl TestContext {
    pub fn user<'a>(&'a mut self) -> UserFixtures<'a> {
        UserFixtures { setup: self }
    }
}

pub struct UserFixtures<'a> {
    setup: &'a mut TestContext,
}

/// Hashes a fixture password with minimal Argon2 cost.
///
/// Cost parameters are stored in the PHC string, so the application verifies these hashes with
/// its default hasher.
pub fn hash_fixture_password(password: &str) -> Result<String, TestError> {
    let params =
        Params::new(8, 1, 1, None).map_err(|e| TestError::PasswordHash(e.to_string()))?;
    let salt = SaltString::encode_b64(Uuid::new_v4().as_bytes())
        .map_err(|e| TestError::PasswordHash(e.to_string()))?;

    Argon2::new(Algorithm::Argon2id, Version::V0x13, params)
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| TestError::PasswordHash(e.to_string()))
}

impl<'a> UserFixtures<'a> {
    /// Inserts a user with every field provided.
    ///
    /// `password` of `None` creates an OpenID account.
    pub async fn insert_custom_user(
        &self,
        user_name: &str,
        email: &str,
        password: Option<&str>,
        role: Role,
        is_active: bool,
        is_locked_out: bool,
    ) -> Result<entity::user::Model, TestError> {
        let password = match password {
            Some(password) => Some(hash_fixture_password(password)?),
            None => None,
        };
        let now = Utc::now().naive_utc();

        Ok(entity::prelude::User::insert(entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_name: ActiveValue::Set(user_name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(password),
            role: ActiveValue::Set(role),
            is_active: ActiveValue::Set(is_active),
            is_locked_out: ActiveValue::Set(is_locked_out),
            last_activity_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
        })
        .exec_with_returning(&self.setup.db)
        .await?)
    }

    /// Inserts an active user with [`TEST_PASSWORD`].
    pub async fn insert_user(
        &self,
        user_name: &str,
        email: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_custom_user(user_name, email, Some(TEST_PASSWORD), Role::User, true, false)
            .await
    }

    /// Inserts a user that registered but never activated the account.
    pub async fn insert_inactive_user(
        &self,
        user_name: &str,
        email: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_custom_user(
            user_name,
            email,
            Some(TEST_PASSWORD),
            Role::User,
            false,
            false,
        )
        .await
    }

    pub async fn insert_locked_user(
        &self,
        user_name: &str,
        email: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_custom_user(user_name, email, Some(TEST_PASSWORD), Role::User, true, true)
            .await
    }

    pub async fn insert_administrator(
        &self,
        user_name: &str,
        email: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_custom_user(
            user_name,
            email,
            Some(TEST_PASSWORD),
            Role::Administrator,
            true,
            false,
        )
        .await
    }

    /// Inserts an active account without a password, as created by an OpenID login.
    pub async fn insert_openid_user(
        &self,
        user_name: &str,
        email: &str,
    ) -> Result<entity::user::Model, TestError> {
        self.insert_custom_user(user_name, email, None, Role::User, true, false)
            .await
    }

    /// Records an IP address the user signed in from.
    pub async fn insert_user_ip(
        &self,
        user_id: Uuid,
        ip_address: &str,
    ) -> Result<entity::user_ip_address::Model, TestError> {
        Ok(
            entity::prelude::UserIpAddress::insert(entity::user_ip_address::ActiveModel {
                user_id: ActiveValue::Set(user_id),
                ip_address: ActiveValue::Set(ip_address.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
                ..Default::default()
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }

    pub async fn insert_blocked_ip(
        &self,
        ip_address: &str,
    ) -> Result<entity::blocked_ip::Model, TestError> {
        Ok(
            entity::prelude::BlockedIp::insert(entity::blocked_ip::ActiveModel {
                ip_address: ActiveValue::Set(ip_address.to_string()),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
