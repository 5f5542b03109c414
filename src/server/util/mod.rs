//! Utility functions and helpers for server operations.
//!
//! Short identifiers for links, password hashing, form validation, paging and time helpers
//! shared by services and controllers.

pub mod id;
pub mod paging;
pub mod password;
pub mod time;
pub mod validation;
