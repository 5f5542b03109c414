//! SeaORM entities for the Kigg database schema.

pub mod prelude;

pub mod blocked_ip;
pub mod recommendation;
pub mod upcoming_event;
pub mod user;
pub mod user_ip_address;
