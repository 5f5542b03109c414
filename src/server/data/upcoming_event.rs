//! Upcoming community events submitted by visitors and approved by administrators.

use chrono::NaiveDateTime;
use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, DeleteResult, EntityTrait,
    IntoActiveModel, PaginatorTrait, QueryFilter, QueryOrder,
};
use uuid::Uuid;

use crate::server::util::time::now;

/// Editable fields of an upcoming event.
#[derive(Debug, Clone)]
pub struct EventDetails {
    /// Contact address of whoever submitted the event
    pub event_user_email: String,
    pub event_link: String,
    pub event_name: String,
    pub event_date: NaiveDateTime,
    pub event_place: String,
    pub event_lead: String,
}

pub struct UpcomingEventRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UpcomingEventRepository<'a, C> {
    /// Creates a new instance of [`UpcomingEventRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Adds an event
    pub async fn add(
        &self,
        details: EventDetails,
        is_approved: bool,
    ) -> Result<entity::upcoming_event::Model, DbErr> {
        entity::upcoming_event::ActiveModel {
            id: ActiveValue::Set(Uuid::new_v4()),
            event_user_email: ActiveValue::Set(details.event_user_email),
            event_link: ActiveValue::Set(details.event_link),
            event_name: ActiveValue::Set(details.event_name),
            event_date: ActiveValue::Set(details.event_date),
            event_place: ActiveValue::Set(details.event_place),
            event_lead: ActiveValue::Set(details.event_lead),
            is_approved: ActiveValue::Set(is_approved),
            created_at: ActiveValue::Set(now()),
        }
        .insert(self.db)
        .await
    }

    /// Deletes an event
    ///
    /// Returns OK regardless of the event existing, to confirm the deletion result
    /// check the [`DeleteResult::rows_affected`] field.
    pub async fn delete(&self, event_id: Uuid) -> Result<DeleteResult, DbErr> {
        entity::prelude::UpcomingEvent::delete_by_id(event_id)
            .exec(self.db)
            .await
    }

    /// Gets every event ordered by date
    pub async fn get_all(&self) -> Result<Vec<entity::upcoming_event::Model>, DbErr> {
        entity::prelude::UpcomingEvent::find()
            .order_by_asc(entity::upcoming_event::Column::EventDate)
            .all(self.db)
            .await
    }

    /// Gets approved events ordered by date
    pub async fn get_all_approved(&self) -> Result<Vec<entity::upcoming_event::Model>, DbErr> {
        entity::prelude::UpcomingEvent::find()
            .filter(entity::upcoming_event::Column::IsApproved.eq(true))
            .order_by_asc(entity::upcoming_event::Column::EventDate)
            .all(self.db)
            .await
    }

    pub async fn find_by_id(
        &self,
        event_id: Uuid,
    ) -> Result<Option<entity::upcoming_event::Model>, DbErr> {
        entity::prelude::UpcomingEvent::find_by_id(event_id)
            .one(self.db)
            .await
    }

    /// Replaces every editable field of an event
    ///
    /// # Returns
    /// - `Some(Model)`: the updated event
    /// - `None`: no event with that ID exists
    pub async fn edit_event(
        &self,
        event_id: Uuid,
        details: EventDetails,
        is_approved: bool,
    ) -> Result<Option<entity::upcoming_event::Model>, DbErr> {
        let event = match entity::prelude::UpcomingEvent::find_by_id(event_id)
            .one(self.db)
            .await?
        {
            Some(event) => event,
            None => return Ok(None),
        };

        let mut event_am = event.into_active_model();
        event_am.event_user_email = ActiveValue::Set(details.event_user_email);
        event_am.event_link = ActiveValue::Set(details.event_link);
        event_am.event_name = ActiveValue::Set(details.event_name);
        event_am.event_date = ActiveValue::Set(details.event_date);
        event_am.event_place = ActiveValue::Set(details.event_place);
        event_am.event_lead = ActiveValue::Set(details.event_lead);
        event_am.is_approved = ActiveValue::Set(is_approved);

        let event = event_am.update(self.db).await?;

        Ok(Some(event))
    }

    /// Counts events waiting for approval
    pub async fn count_by_unapproved(&self) -> Result<u64, DbErr> {
        entity::prelude::UpcomingEvent::find()
            .filter(entity::upcoming_event::Column::IsApproved.eq(false))
            .count(self.db)
            .await
    }
}
