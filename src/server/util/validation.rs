//! Form validation shared by the controllers.
//!
//! Controllers run an ordered list of checks and report the first failure only, so the messages
//! below are written to stand on their own.

use std::sync::LazyLock;

use regex::Regex;

use crate::server::error::domain::DomainError;

/// Minimum length of a user name and of a password, after trimming.
pub const MINIMUM_LENGTH: usize = 4;

static USER_NAME_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-zA-Z])[a-zA-Z_-]*[\w_-]*[\S]$|^([a-zA-Z])[0-9_-]*[\S]$|^[a-zA-Z]*[\S]$")
        .expect("user name expression is valid")
});

static EMAIL_EXPRESSION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^([0-9a-zA-Z]([-.\w]*[0-9a-zA-Z])*@(([0-9a-zA-Z])+([-\w]*[0-9a-zA-Z])*\.)+[a-zA-Z]{2,9})$",
    )
    .expect("email expression is valid")
});

pub fn is_valid_user_name(user_name: &str) -> bool {
    USER_NAME_EXPRESSION.is_match(user_name)
}

pub fn is_email(email: &str) -> bool {
    EMAIL_EXPRESSION.is_match(email.trim())
}

/// Absolute `http` or `https` URL.
pub fn is_web_url(value: &str) -> bool {
    url::Url::parse(value.trim())
        .map(|url| matches!(url.scheme(), "http" | "https"))
        .unwrap_or(false)
}

/// Identifier typed into the OpenID box, passed to the provider as a login hint.
pub fn is_openid_identifier(value: &str) -> bool {
    !value.is_empty() && !value.chars().any(char::is_whitespace)
}

/// `true` when `value` is an absolute URL with the same origin as `root_url`.
pub fn is_same_site(value: &str, root_url: &str) -> bool {
    match (url::Url::parse(value), url::Url::parse(root_url)) {
        (Ok(url), Ok(root)) => url.origin() == root.origin(),
        _ => false,
    }
}

/// `true` when the value is missing or blank.
pub fn is_blank(value: Option<&str>) -> bool {
    value.map(|v| v.trim().is_empty()).unwrap_or(true)
}

/// Trimmed character count, `0` when missing.
pub fn trimmed_len(value: Option<&str>) -> usize {
    value.map(|v| v.trim().chars().count()).unwrap_or(0)
}

/// Ordered validation that keeps the first failure.
///
/// ```ignore
/// Validator::new()
///     .check(is_blank(email), "Adres e-mail nie może być pusty.")
///     .check(!is_email(email.unwrap_or_default()), "Niepoprawny adres e-mail.")
///     .finish()?;
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    error: Option<String>,
}

impl Validator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Records `message` when `failed` is true and no earlier check failed.
    pub fn check(mut self, failed: bool, message: impl Into<String>) -> Self {
        if self.error.is_none() && failed {
            self.error = Some(message.into());
        }
        self
    }

    pub fn finish(self) -> Result<(), DomainError> {
        match self.error {
            Some(message) => Err(DomainError::Validation(message)),
            None => Ok(()),
        }
    }
}
