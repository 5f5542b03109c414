//! Form bodies posted by the site's pages.
//!
//! Every field is optional so that a missing field reaches validation and is reported with its
//! own message instead of failing deserialization.

use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct SignupForm {
    pub user_name: Option<String>,
    pub password: Option<String>,
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct LoginForm {
    pub user_name: Option<String>,
    pub password: Option<String>,
    /// `true` keeps the visitor signed in across browser sessions
    pub remember_me: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct RecommendationForm {
    pub recommendation_link: Option<String>,
    pub recommendation_title: Option<String>,
    pub image_link: Option<String>,
    pub image_title: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EmailForm {
    pub email: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordForm {
    pub old_password: Option<String>,
    pub new_password: Option<String>,
    pub confirm_password: Option<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ChangeRoleForm {
    pub id: Option<String>,
    pub role: Option<String>,
}

/// Identifies the member or event an administrator acts on.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct IdForm {
    pub id: Option<String>,
}

/// Body of `POST /AllowIps`.
///
/// Sent as repeated `ipAddress` fields, which is why the handler decodes it by hand.
#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct AllowIpsForm {
    pub id: Option<String>,
    pub ip_address: Vec<String>,
}

#[derive(Clone, Debug, Default, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct EventForm {
    /// Set when an administrator edits an existing event
    pub id: Option<String>,
    pub event_user_email: Option<String>,
    pub event_link: Option<String>,
    pub event_name: Option<String>,
    /// `YYYY-MM-DD`, optionally followed by `HH:MM`
    pub event_date: Option<String>,
    pub event_place: Option<String>,
    pub event_lead: Option<String>,
    pub is_approved: Option<String>,
}
