use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KiggRecommendation::Table)
                    .if_not_exists()
                    .col(pk_uuid(KiggRecommendation::Id))
                    .col(text(KiggRecommendation::RecommendationLink))
                    .col(string_len(KiggRecommendation::RecommendationTitle, 256))
                    .col(text(KiggRecommendation::ImageLink))
                    .col(string_len(KiggRecommendation::ImageTitle, 256))
                    .col(timestamp(KiggRecommendation::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KiggRecommendation::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum KiggRecommendation {
    Table,
    Id,
    RecommendationLink,
    RecommendationTitle,
    ImageLink,
    ImageTitle,
    CreatedAt,
}
