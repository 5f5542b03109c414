use chrono::{NaiveDateTime, Utc};
use sea_orm::{ActiveValue, EntityTrait};
use uuid::Uuid;

use crate::{error::TestError, TestContext};

impl TestContext {
    pub fn event<'a>(&'a mut self) -> EventFixtures<'a> {
        EventFixtures { setup: self }
    }
}

pub struct EventFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> EventFixtures<'a> {
    /// Inserts an upcoming event with placeholder details.
    pub async fn insert_event(
        &self,
        event_name: &str,
        event_date: NaiveDateTime,
        is_approved: bool,
    ) -> Result<entity::upcoming_event::Model, TestError> {
        Ok(
            entity::prelude::UpcomingEvent::insert(entity::upcoming_event::ActiveModel {
                id: ActiveValue::Set(Uuid::new_v4()),
                event_user_email: ActiveValue::Set("organizer@kigg.pl".to_string()),
                event_link: ActiveValue::Set("https://example.com/event".to_string()),
                event_name: ActiveValue::Set(event_name.to_string()),
                event_date: ActiveValue::Set(event_date),
                event_place: ActiveValue::Set("Warszawa".to_string()),
                event_lead: ActiveValue::Set("Spotkanie społeczności".to_string()),
                is_approved: ActiveValue::Set(is_approved),
                created_at: ActiveValue::Set(Utc::now().naive_utc()),
            })
            .exec_with_returning(&self.setup.db)
            .await?,
        )
    }
}
