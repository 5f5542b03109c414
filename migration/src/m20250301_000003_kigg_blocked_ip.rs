use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KiggBlockedIp::Table)
                    .if_not_exists()
                    .col(string_len(KiggBlockedIp::IpAddress, 64).primary_key())
                    .col(timestamp(KiggBlockedIp::CreatedAt))
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KiggBlockedIp::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum KiggBlockedIp {
    Table,
    IpAddress,
    CreatedAt,
}
