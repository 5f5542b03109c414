//! Database model type aliases.
//!
//! Convenient aliases for the SeaORM entity models used throughout the application, so
//! signatures don't need to spell out the `entity` crate paths.

/// A site member.
///
/// # Fields (from `entity::user::Model`)
/// - `id` - Primary key
/// - `user_name` - Unique login, the claimed identifier for OpenID accounts
/// - `email` - Email address, shared only by OpenID accounts without one
/// - `password` - Argon2 hash, `None` for OpenID accounts
/// - `role` - Member role
/// - `is_active` - Whether the account was activated
/// - `is_locked_out` - Whether an administrator locked the account
/// - `last_activity_at` - Last sign in, sign out or activation
/// - `created_at` - Registration timestamp
pub type UserModel = entity::user::Model;
