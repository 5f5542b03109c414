//! User service layer.
//!
//! Membership rules for creating and presenting users. Account changes made by the users
//! themselves live in [`account`], changes made by administrators in [`admin`].

pub mod account;
pub mod admin;

use std::collections::BTreeMap;

use entity::user::Role;
use sea_orm::{ActiveEnum, ConnectionTrait, DatabaseConnection};

use crate::{
    model::user::{UserDetailDto, UserDto, UserListDto},
    server::{
        data::user::{ip_address::UserIpAddressRepository, UserRepository},
        error::{domain::DomainError, Error},
        model::app::Settings,
        service::blocked_ip::BlockedIpCollection,
        util::{
            id::{parse_id, shrink},
            paging::{current_page, start_index},
            password::hash_password,
        },
    },
};

/// Tabs of the user profile page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum UserDetailTab {
    #[default]
    Promoted,
    Posted,
    Commented,
}

impl UserDetailTab {
    /// Parses a tab name ignoring case, falling back to [`UserDetailTab::Promoted`].
    pub fn parse_or_default(value: Option<&str>) -> Self {
        match value.map(|v| v.trim().to_ascii_lowercase()).as_deref() {
            Some("posted") => Self::Posted,
            Some("commented") => Self::Commented,
            _ => Self::Promoted,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Promoted => "Promoted",
            Self::Posted => "Posted",
            Self::Commented => "Commented",
        }
    }
}

pub fn is_openid_account(user: &entity::user::Model) -> bool {
    user.password.is_none()
}

pub fn is_administrator(user: &entity::user::Model) -> bool {
    user.role == Role::Administrator
}

pub fn to_user_dto(user: &entity::user::Model) -> UserDto {
    UserDto {
        id: shrink(user.id),
        user_name: user.user_name.clone(),
        role: user.role.to_value(),
        is_active: user.is_active,
        is_locked_out: user.is_locked_out,
        is_open_id_account: is_openid_account(user),
        last_activity_at: user.last_activity_at,
        created_at: user.created_at,
    }
}

/// Creates a user after checking that the name and email are free.
///
/// Accounts with a password start inactive until activated from the registration email,
/// accounts without one (OpenID) are active immediately. The default OpenID email may be shared
/// by any number of accounts.
pub async fn create_user<C: ConnectionTrait>(
    db: &C,
    settings: &Settings,
    user_name: &str,
    email: &str,
    password: Option<&str>,
) -> Result<entity::user::Model, Error> {
    let user_repo = UserRepository::new(db);

    if user_repo.find_by_user_name(user_name).await?.is_some() {
        return Err(DomainError::UserNameTaken(user_name.to_string()).into());
    }

    if !email.eq_ignore_ascii_case(&settings.default_openid_email)
        && user_repo.find_by_email(email).await?.is_some()
    {
        return Err(DomainError::EmailTaken(email.to_string()).into());
    }

    let (password_hash, is_active) = match password {
        Some(password) => (Some(hash_password(password)?), false),
        None => (None, true),
    };

    Ok(user_repo
        .create(user_name, email, password_hash, is_active)
        .await?)
}

/// Read-only views of site members.
pub struct UserService<'a> {
    db: &'a DatabaseConnection,
    settings: &'a Settings,
}

impl<'a> UserService<'a> {
    pub fn new(db: &'a DatabaseConnection, settings: &'a Settings) -> Self {
        Self { db, settings }
    }

    /// Builds one page of the member listing.
    pub async fn list(&self, page: Option<u64>) -> Result<UserListDto, Error> {
        let per_page = self.settings.html_users_per_page;
        let (users, total) = UserRepository::new(self.db)
            .get_paged(start_index(page, per_page), per_page)
            .await?;

        Ok(UserListDto {
            title: format!("{} - Użytkownicy", self.settings.site_title),
            subtitle: "Użytkownicy".to_string(),
            no_user_exist_message: "Brak użytkowników".to_string(),
            current_page: current_page(page),
            user_per_page: per_page,
            total_user_count: total,
            users: users.iter().map(to_user_dto).collect(),
        })
    }

    /// Builds the profile page of the user identified by `name`.
    ///
    /// Administrators additionally see every address the user signed in from along with
    /// whether it is allowed.
    ///
    /// # Returns
    /// - `Ok(Some(UserDetailDto))` - User found
    /// - `Ok(None)` - `name` isn't an ID or no such user exists
    pub async fn detail(
        &self,
        name: &str,
        tab: Option<&str>,
        page: Option<u64>,
        viewer: Option<&entity::user::Model>,
        blocked_ips: &BlockedIpCollection,
    ) -> Result<Option<UserDetailDto>, Error> {
        let Some(user_id) = parse_id(name) else {
            return Ok(None);
        };

        let Some(user) = UserRepository::new(self.db).find_by_id(user_id).await? else {
            return Ok(None);
        };

        let mut ip_addresses = BTreeMap::new();
        if viewer.is_some_and(is_administrator) {
            for ip_address in UserIpAddressRepository::new(self.db)
                .get_by_user_id(user.id)
                .await?
            {
                let is_allowed = !blocked_ips.contains(&ip_address).await;
                ip_addresses.insert(ip_address, is_allowed);
            }
        }

        Ok(Some(UserDetailDto {
            title: format!("{} - {}", self.settings.site_title, user.user_name),
            current_page: current_page(page),
            selected_tab: UserDetailTab::parse_or_default(tab).as_str().to_string(),
            the_user: to_user_dto(&user),
            ip_addresses,
        }))
    }
}
