use sea_orm::{ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter};

use crate::server::util::time::now;

pub struct BlockedIpRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> BlockedIpRepository<'a, C> {
    /// Creates a new instance of [`BlockedIpRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    pub async fn get_all(&self) -> Result<Vec<String>, DbErr> {
        let blocked = entity::prelude::BlockedIp::find().all(self.db).await?;

        Ok(blocked.into_iter().map(|b| b.ip_address).collect())
    }

    /// Blocks every address in `ip_addresses` that isn't blocked yet
    pub async fn add_many(&self, ip_addresses: &[String]) -> Result<(), DbErr> {
        if ip_addresses.is_empty() {
            return Ok(());
        }

        let existing: Vec<String> = entity::prelude::BlockedIp::find()
            .filter(entity::blocked_ip::Column::IpAddress.is_in(ip_addresses.iter().cloned()))
            .all(self.db)
            .await?
            .into_iter()
            .map(|b| b.ip_address)
            .collect();

        let mut new_addresses: Vec<&String> = ip_addresses
            .iter()
            .filter(|ip| !existing.contains(ip))
            .collect();
        new_addresses.sort();
        new_addresses.dedup();

        if new_addresses.is_empty() {
            return Ok(());
        }

        let created_at = now();
        let models = new_addresses
            .into_iter()
            .map(|ip| entity::blocked_ip::ActiveModel {
                ip_address: sea_orm::ActiveValue::Set(ip.clone()),
                created_at: sea_orm::ActiveValue::Set(created_at),
            });

        entity::prelude::BlockedIp::insert_many(models)
            .exec(self.db)
            .await?;

        Ok(())
    }

    /// Unblocks every address in `ip_addresses`, returning how many were blocked
    pub async fn remove_many(&self, ip_addresses: &[String]) -> Result<u64, DbErr> {
        if ip_addresses.is_empty() {
            return Ok(0);
        }

        let result = entity::prelude::BlockedIp::delete_many()
            .filter(entity::blocked_ip::Column::IpAddress.is_in(ip_addresses.iter().cloned()))
            .exec(self.db)
            .await?;

        Ok(result.rows_affected)
    }
}
