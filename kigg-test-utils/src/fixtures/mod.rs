//! Test fixture modules for database rows and HTTP mocks.
//!
//! - `event` - upcoming event rows
//! - `openid` - mock OpenID provider endpoints
//! - `user` - users, their IP addresses and blocked IPs

pub mod event;
pub mod openid;
pub mod user;
