//! Utility functions for controller request handling.
//!
//! This module provides reusable helpers used across controllers: the client address extractor,
//! flash cookies for redirects, CSRF validation for the OpenID flow, retrieval of the signed in
//! member and conversion of handler outcomes into the JSON envelope.

pub mod client_ip;
pub mod cookie;
pub mod csrf;
pub mod get_user;
pub mod view_data;
