use sea_orm_migration::{prelude::*, schema::*};

use crate::m20250301_000001_kigg_user::KiggUser;

static IDX_USER_IP_ADDRESS_USER_ID_IP: &str = "idx-kigg_user_ip_address-user_id-ip_address";
static FK_USER_IP_ADDRESS_USER_ID: &str = "fk-kigg_user_ip_address-user_id";

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(KiggUserIpAddress::Table)
                    .if_not_exists()
                    .col(pk_auto(KiggUserIpAddress::Id))
                    .col(uuid(KiggUserIpAddress::UserId))
                    .col(string_len(KiggUserIpAddress::IpAddress, 64))
                    .col(timestamp(KiggUserIpAddress::CreatedAt))
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name(IDX_USER_IP_ADDRESS_USER_ID_IP)
                    .table(KiggUserIpAddress::Table)
                    .col(KiggUserIpAddress::UserId)
                    .col(KiggUserIpAddress::IpAddress)
                    .unique()
                    .to_owned(),
            )
            .await?;

        manager
            .create_foreign_key(
                ForeignKey::create()
                    .name(FK_USER_IP_ADDRESS_USER_ID)
                    .from_tbl(KiggUserIpAddress::Table)
                    .from_col(KiggUserIpAddress::UserId)
                    .to_tbl(KiggUser::Table)
                    .to_col(KiggUser::Id)
                    .on_delete(ForeignKeyAction::Cascade)
                    .to_owned(),
            )
            .await?;

        Ok(())
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_foreign_key(
                ForeignKey::drop()
                    .name(FK_USER_IP_ADDRESS_USER_ID)
                    .table(KiggUserIpAddress::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_index(
                Index::drop()
                    .name(IDX_USER_IP_ADDRESS_USER_ID_IP)
                    .table(KiggUserIpAddress::Table)
                    .to_owned(),
            )
            .await?;

        manager
            .drop_table(Table::drop().table(KiggUserIpAddress::Table).to_owned())
            .await?;

        Ok(())
    }
}

#[derive(DeriveIden)]
enum KiggUserIpAddress {
    Table,
    Id,
    UserId,
    IpAddress,
    CreatedAt,
}
