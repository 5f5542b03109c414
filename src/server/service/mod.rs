//! Service layer for business logic and orchestration.
//!
//! Services run each operation as one unit of work: they open a transaction, drive the
//! repositories, commit, and only then talk to collaborators such as the email sender or the
//! event aggregator.

pub mod auth;
pub mod blocked_ip;
pub mod recommendation;
pub mod upcoming_event;
pub mod user;
