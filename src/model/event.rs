use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpcomingEventDto {
    pub id: String,
    pub event_link: String,
    pub event_name: String,
    pub event_date: NaiveDateTime,
    pub event_place: String,
    pub event_lead: String,
    pub is_approved: bool,
}

#[derive(Clone, Debug, Serialize, Deserialize, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UnapprovedEventCountDto {
    pub count: u64,
}
