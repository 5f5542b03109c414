//! In-memory collection of blocked client addresses.
//!
//! Every request consults the collection, so reads are served from memory. Changes are written
//! to the `blocked_ip` table first and applied to memory once the write succeeded.

use std::{collections::HashSet, sync::Arc};

use sea_orm::ConnectionTrait;
use tokio::sync::RwLock;

use crate::server::{data::blocked_ip::BlockedIpRepository, error::Error};

#[derive(Clone, Default)]
pub struct BlockedIpCollection {
    addresses: Arc<RwLock<HashSet<String>>>,
}

impl BlockedIpCollection {
    /// Creates an empty collection.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a collection holding every address stored in the database.
    pub async fn load<C: ConnectionTrait>(db: &C) -> Result<Self, Error> {
        let addresses = BlockedIpRepository::new(db).get_all().await?;

        tracing::info!("Loaded {} blocked IP addresses", addresses.len());

        Ok(Self {
            addresses: Arc::new(RwLock::new(addresses.into_iter().collect())),
        })
    }

    pub async fn contains(&self, ip_address: &str) -> bool {
        self.addresses.read().await.contains(ip_address)
    }

    /// Blocks every address in `ip_addresses`.
    pub async fn add_range<C: ConnectionTrait>(
        &self,
        db: &C,
        ip_addresses: &[String],
    ) -> Result<(), Error> {
        BlockedIpRepository::new(db).add_many(ip_addresses).await?;

        let mut addresses = self.addresses.write().await;
        addresses.extend(ip_addresses.iter().cloned());

        Ok(())
    }

    /// Unblocks every address in `ip_addresses`.
    pub async fn remove_range<C: ConnectionTrait>(
        &self,
        db: &C,
        ip_addresses: &[String],
    ) -> Result<(), Error> {
        BlockedIpRepository::new(db)
            .remove_many(ip_addresses)
            .await?;

        let mut addresses = self.addresses.write().await;
        for ip_address in ip_addresses {
            addresses.remove(ip_address);
        }

        Ok(())
    }
}
