//! Factory functions for in-memory user models.

use chrono::Utc;
use entity::user::Role;
use uuid::Uuid;

/// Create an active user model with test values.
///
/// The password field holds a placeholder rather than a real hash, so the model suits tests
/// that don't verify credentials.
pub fn mock_user_model(user_name: &str) -> entity::user::Model {
    let now = Utc::now().naive_utc();
    entity::user::Model {
        id: Uuid::new_v4(),
        user_name: user_name.to_string(),
        email: format!("{}@kigg.pl", user_name.to_lowercase()),
        password: Some("$argon2id$placeholder".to_string()),
        role: Role::User,
        is_active: true,
        is_locked_out: false,
        last_activity_at: now,
        created_at: now,
    }
}

/// Create an OpenID account model, which has no password.
pub fn mock_openid_user_model(user_name: &str) -> entity::user::Model {
    entity::user::Model {
        password: None,
        ..mock_user_model(user_name)
    }
}

pub fn mock_administrator_model(user_name: &str) -> entity::user::Model {
    entity::user::Model {
        role: Role::Administrator,
        ..mock_user_model(user_name)
    }
}
