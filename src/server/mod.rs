//! Server application core modules.
//!
//! This module contains all server-side functionality for the Kigg membership server, including
//! HTTP routing, registration and sign in (password and OpenID), member administration, database
//! operations, outgoing email and the upcoming events listing.

pub mod config;
pub mod controller;
pub mod data;
pub mod email;
pub mod error;
pub mod event;
pub mod middleware;
pub mod model;
pub mod openid;
pub mod router;
pub mod service;
pub mod startup;
pub mod util;
