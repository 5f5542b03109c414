pub mod ip_address;

use entity::user::Role;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder, QuerySelect,
};
use uuid::Uuid;

use crate::server::util::time::now;

pub struct UserRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserRepository<'a, C> {
    /// Creates a new instance of [`UserRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Creates a new user with the `User` role
    ///
    /// # Arguments
    /// - `password` (`Option<String>`): Argon2 PHC string, `None` for OpenID accounts
    /// - `is_active` (`bool`): Whether the account can sign in before activation
    pub async fn create(
        &self,
        user_name: &str,
        email: &str,
        password: Option<String>,
        is_active: bool,
    ) -> Result<entity::user::Model, DbErr> {
        let now = now();
        let user = entity::user::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            user_name: ActiveValue::Set(user_name.to_string()),
            email: ActiveValue::Set(email.to_string()),
            password: ActiveValue::Set(password),
            role: ActiveValue::Set(Role::User),
            is_active: ActiveValue::Set(is_active),
            is_locked_out: ActiveValue::Set(false),
            last_activity_at: ActiveValue::Set(now),
            created_at: ActiveValue::Set(now),
        };

        user.insert(self.db).await
    }

    pub async fn find_by_id(&self, user_id: Uuid) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find_by_id(user_id).one(self.db).await
    }

    pub async fn find_by_user_name(
        &self,
        user_name: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::UserName.eq(user_name))
            .one(self.db)
            .await
    }

    pub async fn find_by_email(&self, email: &str) -> Result<Option<entity::user::Model>, DbErr> {
        entity::prelude::User::find()
            .filter(entity::user::Column::Email.eq(email))
            .one(self.db)
            .await
    }

    /// Gets a page of users ordered by most recent activity along with the total user count
    ///
    /// # Arguments
    /// - `start` (`u64`): Number of users to skip
    /// - `count` (`u64`): Maximum number of users to return
    pub async fn get_paged(
        &self,
        start: u64,
        count: u64,
    ) -> Result<(Vec<entity::user::Model>, u64), DbErr> {
        let total = entity::prelude::User::find().count(self.db).await?;
        if start >= total {
            return Ok((Vec::new(), total));
        }

        let users = entity::prelude::User::find()
            .order_by_desc(entity::user::Column::LastActivityAt)
            .order_by_asc(entity::user::Column::UserName)
            .offset(start)
            .limit(count)
            .all(self.db)
            .await?;

        Ok((users, total))
    }

    /// Sets the last activity timestamp to the current time
    pub async fn update_last_activity(
        &self,
        user_id: Uuid,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, |user| {
            user.last_activity_at = ActiveValue::Set(now());
        })
        .await
    }

    /// Replaces the stored password hash
    pub async fn update_password(
        &self,
        user_id: Uuid,
        password_hash: String,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, |user| {
            user.password = ActiveValue::Set(Some(password_hash));
        })
        .await
    }

    pub async fn update_email(
        &self,
        user_id: Uuid,
        email: &str,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        let email = email.to_string();
        self.update_with(user_id, |user| {
            user.email = ActiveValue::Set(email);
        })
        .await
    }

    pub async fn update_role(
        &self,
        user_id: Uuid,
        role: Role,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, |user| {
            user.role = ActiveValue::Set(role);
        })
        .await
    }

    pub async fn update_locked_out(
        &self,
        user_id: Uuid,
        is_locked_out: bool,
    ) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, |user| {
            user.is_locked_out = ActiveValue::Set(is_locked_out);
        })
        .await
    }

    /// Marks the account as active and refreshes its last activity
    pub async fn activate(&self, user_id: Uuid) -> Result<Option<entity::user::Model>, DbErr> {
        self.update_with(user_id, |user| {
            user.is_active = ActiveValue::Set(true);
            user.last_activity_at = ActiveValue::Set(now());
        })
        .await
    }

    /// Applies `change` to the user's active model and saves it
    ///
    /// Returns `None` if the user does not exist.
    async fn update_with<F>(
        &self,
        user_id: Uuid,
        change: F,
    ) -> Result<Option<entity::user::Model>, DbErr>
    where
        F: FnOnce(&mut entity::user::ActiveModel),
    {
        let user = match entity::prelude::User::find_by_id(user_id)
            .one(self.db)
            .await?
        {
            Some(user) => user,
            None => return Ok(None),
        };

        let mut user_am = user.into_active_model();
        change(&mut user_am);

        let user = user_am.update(self.db).await?;

        Ok(Some(user))
    }
}
