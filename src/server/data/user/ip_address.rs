use sea_orm::{
    ActiveModelTrait, ActiveValue, ColumnTrait, ConnectionTrait, DbErr, EntityTrait, QueryFilter,
    QueryOrder,
};
use uuid::Uuid;

use crate::server::util::time::now;

/// Addresses each user has signed in from.
pub struct UserIpAddressRepository<'a, C: ConnectionTrait> {
    db: &'a C,
}

impl<'a, C: ConnectionTrait> UserIpAddressRepository<'a, C> {
    /// Creates a new instance of [`UserIpAddressRepository`]
    pub fn new(db: &'a C) -> Self {
        Self { db }
    }

    /// Records that the user signed in from `ip_address`
    ///
    /// Addresses already recorded for the user are left untouched.
    pub async fn record(&self, user_id: Uuid, ip_address: &str) -> Result<(), DbErr> {
        let existing = entity::prelude::UserIpAddress::find()
            .filter(entity::user_ip_address::Column::UserId.eq(user_id))
            .filter(entity::user_ip_address::Column::IpAddress.eq(ip_address))
            .one(self.db)
            .await?;

        if existing.is_some() {
            return Ok(());
        }

        entity::user_ip_address::ActiveModel {
            user_id: ActiveValue::Set(user_id),
            ip_address: ActiveValue::Set(ip_address.to_string()),
            created_at: ActiveValue::Set(now()),
            ..Default::default()
        }
        .insert(self.db)
        .await?;

        Ok(())
    }

    /// Gets every address recorded for the user, sorted
    pub async fn get_by_user_id(&self, user_id: Uuid) -> Result<Vec<String>, DbErr> {
        let addresses = entity::prelude::UserIpAddress::find()
            .filter(entity::user_ip_address::Column::UserId.eq(user_id))
            .order_by_asc(entity::user_ip_address::Column::IpAddress)
            .all(self.db)
            .await?;

        Ok(addresses.into_iter().map(|a| a.ip_address).collect())
    }
}
