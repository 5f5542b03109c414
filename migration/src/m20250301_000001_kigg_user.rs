use sea_orm_migration::{prelude::*, schema::*};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KiggUser::Table)
                    .if_not_exists()
                    .col(pk_uuid(KiggUser::Id))
                    .col(string_len_uniq(KiggUser::UserName, 256))
                    .col(string_len(KiggUser::Email, 256))
                    .col(string_null(KiggUser::Password))
                    .col(string_len(KiggUser::Role, 16))
                    .col(boolean(KiggUser::IsActive))
                    .col(boolean(KiggUser::IsLockedOut))
                    .col(timestamp(KiggUser::LastActivityAt))
                    .col(timestamp(KiggUser::CreatedAt))
                    .to_owned(),
            )
            .await?;

        // OpenID accounts without a provider email share the default address
        manager
            .create_index(
                Index::create()
                    .name("idx_kigg_user_email")
                    .table(KiggUser::Table)
                    .col(KiggUser::Email)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(KiggUser::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
pub enum KiggUser {
    Table,
    Id,
    UserName,
    Email,
    Password,
    Role,
    IsActive,
    IsLockedOut,
    LastActivityAt,
    CreatedAt,
}
