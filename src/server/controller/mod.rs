//! HTTP controller endpoints for the Kigg web API.
//!
//! This module contains Axum handlers for registration and sign in, account management, member
//! administration, member pages, recommendations and upcoming events. Form handlers validate
//! their input, call a service and answer with the JSON envelope. They integrate with
//! tower-sessions for session management and use utoipa for OpenAPI documentation.

pub mod account;
pub mod admin;
pub mod auth;
pub mod event;
pub mod recommendation;
pub mod user;
pub mod util;
