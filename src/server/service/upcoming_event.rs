use sea_orm::{DatabaseConnection, TransactionTrait};
use uuid::Uuid;

use crate::{
    model::event::UpcomingEventDto,
    server::{
        data::upcoming_event::{EventDetails, UpcomingEventRepository},
        error::{domain::DomainError, Error},
        util::id::shrink,
    },
};

pub fn to_event_dto(event: entity::upcoming_event::Model) -> UpcomingEventDto {
    UpcomingEventDto {
        id: shrink(event.id),
        event_link: event.event_link,
        event_name: event.event_name,
        event_date: event.event_date,
        event_place: event.event_place,
        event_lead: event.event_lead,
        is_approved: event.is_approved,
    }
}

pub struct UpcomingEventService<'a> {
    db: &'a DatabaseConnection,
}

impl<'a> UpcomingEventService<'a> {
    pub fn new(db: &'a DatabaseConnection) -> Self {
        Self { db }
    }

    /// Approved events, soonest first.
    pub async fn get_approved(&self) -> Result<Vec<UpcomingEventDto>, Error> {
        let events = UpcomingEventRepository::new(self.db)
            .get_all_approved()
            .await?;

        Ok(events.into_iter().map(to_event_dto).collect())
    }

    /// Stores an event submitted by a visitor, pending approval.
    pub async fn submit(&self, details: EventDetails) -> Result<UpcomingEventDto, Error> {
        let txn = self.db.begin().await?;

        let event = UpcomingEventRepository::new(&txn)
            .add(details, false)
            .await?;

        txn.commit().await?;

        tracing::info!("Upcoming event submitted: {}", event.event_name);

        Ok(to_event_dto(event))
    }

    /// Replaces an event's details and approval.
    pub async fn edit(
        &self,
        event_id: Uuid,
        details: EventDetails,
        is_approved: bool,
    ) -> Result<UpcomingEventDto, Error> {
        let txn = self.db.begin().await?;

        let event = UpcomingEventRepository::new(&txn)
            .edit_event(event_id, details, is_approved)
            .await?
            .ok_or(DomainError::EventNotFound)?;

        txn.commit().await?;

        tracing::info!("Upcoming event edited: {}", event.event_name);

        Ok(to_event_dto(event))
    }

    pub async fn delete(&self, event_id: Uuid) -> Result<(), Error> {
        let txn = self.db.begin().await?;

        let result = UpcomingEventRepository::new(&txn).delete(event_id).await?;
        if result.rows_affected == 0 {
            return Err(DomainError::EventNotFound.into());
        }

        txn.commit().await?;

        tracing::info!("Upcoming event deleted: {}", event_id);

        Ok(())
    }

    pub async fn count_unapproved(&self) -> Result<u64, Error> {
        Ok(UpcomingEventRepository::new(self.db)
            .count_by_unapproved()
            .await?)
    }
}
