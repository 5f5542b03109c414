use std::collections::BTreeMap;

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Public view of a site member.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    /// Shortened identifier used in URLs
    pub id: String,
    pub user_name: String,
    pub role: String,
    pub is_active: bool,
    pub is_locked_out: bool,
    pub is_open_id_account: bool,
    pub last_activity_at: NaiveDateTime,
    pub created_at: NaiveDateTime,
}

/// Paged listing of site members.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserListDto {
    pub title: String,
    pub subtitle: String,
    pub no_user_exist_message: String,
    pub current_page: u64,
    pub user_per_page: u64,
    pub total_user_count: u64,
    pub users: Vec<UserDto>,
}

/// Profile page of a single member.
///
/// `ip_addresses` maps every address the member used to whether it is currently allowed. It is
/// only filled in for administrators.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserDetailDto {
    pub title: String,
    pub current_page: u64,
    pub selected_tab: String,
    pub the_user: UserDto,
    pub ip_addresses: BTreeMap<String, bool>,
}

/// State of the page menu for the current visitor.
#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UserMenuDto {
    pub is_user_authenticated: bool,
    pub current_user: Option<UserDto>,
}
