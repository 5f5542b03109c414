//! Data access layer repositories.
//!
//! Repositories wrap sea-orm queries per table. Each one borrows any [`sea_orm::ConnectionTrait`],
//! so the same repository runs against the pool or inside a request's transaction.

pub mod blocked_ip;
pub mod recommendation;
pub mod upcoming_event;
pub mod user;
