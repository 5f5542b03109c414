//! Kigg membership server.
//!
//! Membership, authentication, user administration, recommendations and the upcoming events
//! listing for a community news-voting site.

pub mod model;
pub mod server;
