use sea_orm_migration::{prelude::*, schema::*};

static IDX_UPCOMING_EVENT_IS_APPROVED: &str = "idx-kigg_upcoming_event-is_approved";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KiggUpcomingEvent::Table)
                    .if_not_exists()
                    .col(pk_uuid(KiggUpcomingEvent::Id))
                    .col(string_len(KiggUpcomingEvent::EventUserEmail, 256))
                    .col(text(KiggUpcomingEvent::EventLink))
                    .col(string_len(KiggUpcomingEvent::EventName, 256))
                    .col(timestamp(KiggUpcomingEvent::EventDate))
                    .col(string_len(KiggUpcomingEvent::EventPlace, 256))
                    .col(text(KiggUpcomingEvent::EventLead))
                    .col(boolean(KiggUpcomingEvent::IsApproved))
                    .col(timestamp(KiggUpcomingEvent::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_UPCOMING_EVENT_IS_APPROVED)
                    .table(KiggUpcomingEvent::Table)
                    .col(KiggUpcomingEvent::IsApproved)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name(IDX_UPCOMING_EVENT_IS_APPROVED)
                    .table(KiggUpcomingEvent::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(KiggUpcomingEvent::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum KiggUpcomingEvent {
    Table,
    Id,
    EventUserEmail,
    EventLink,
    EventName,
    EventDate,
    EventPlace,
    EventLead,
    IsApproved,
    CreatedAt,
}
