//! Environment-driven server configuration.

use std::net::IpAddr;

use crate::server::error::config::ConfigError;

/// Default number of members shown on one page of the user listing.
pub const DEFAULT_HTML_USERS_PER_PAGE: u64 = 35;

/// OpenID Connect provider used as the site's relying-party backend.
#[derive(Clone, Debug)]
pub struct OpenIdConfig {
    pub client_id: String,
    pub client_secret: String,
    pub auth_url: String,
    pub token_url: String,
    pub userinfo_url: String,
    pub issuer: String,
}

pub struct Config {
    pub database_url: String,
    pub valkey_url: String,
    pub bind_address: String,
    pub root_url: String,
    pub site_title: String,
    pub default_openid_email: String,
    pub html_users_per_page: u64,
    /// Reverse proxies whose `X-Forwarded-For` header is believed
    pub trusted_proxies: Vec<IpAddr>,
    pub smtp_url: Option<String>,
    pub email_from: String,
    pub openid: Option<OpenIdConfig>,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let root_url = required("ROOT_URL")?;
        url::Url::parse(&root_url).map_err(|e| ConfigError::InvalidEnvValue {
            var: "ROOT_URL".to_string(),
            reason: e.to_string(),
        })?;

        let html_users_per_page = match optional("HTML_USERS_PER_PAGE") {
            Some(value) => match value.parse::<u64>() {
                Ok(per_page) if per_page > 0 => per_page,
                _ => {
                    return Err(ConfigError::InvalidEnvValue {
                        var: "HTML_USERS_PER_PAGE".to_string(),
                        reason: "must be a positive integer".to_string(),
                    })
                }
            },
            None => DEFAULT_HTML_USERS_PER_PAGE,
        };

        Ok(Self {
            database_url: required("DATABASE_URL")?,
            valkey_url: required("VALKEY_URL")?,
            bind_address: optional("BIND_ADDRESS").unwrap_or_else(|| "0.0.0.0:8080".to_string()),
            root_url: root_url.trim_end_matches('/').to_string(),
            site_title: optional("SITE_TITLE").unwrap_or_else(|| "Kigg".to_string()),
            default_openid_email: optional("DEFAULT_OPENID_EMAIL")
                .unwrap_or_else(|| "openid@kigg.local".to_string()),
            html_users_per_page,
            trusted_proxies: trusted_proxies_from_env()?,
            smtp_url: optional("SMTP_URL"),
            email_from: optional("EMAIL_FROM").unwrap_or_else(|| "noreply@kigg.local".to_string()),
            openid: openid_from_env()?,
        })
    }
}

/// Comma-separated `TRUSTED_PROXIES`, empty when unset.
fn trusted_proxies_from_env() -> Result<Vec<IpAddr>, ConfigError> {
    let Some(value) = optional("TRUSTED_PROXIES") else {
        return Ok(Vec::new());
    };

    parse_ip_list(&value).map_err(|reason| ConfigError::InvalidEnvValue {
        var: "TRUSTED_PROXIES".to_string(),
        reason,
    })
}

fn parse_ip_list(value: &str) -> Result<Vec<IpAddr>, String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .map(|entry| {
            entry
                .parse::<IpAddr>()
                .map_err(|e| format!("{}: {}", entry, e))
        })
        .collect()
}

/// The provider is optional, but a partially configured provider is a mistake.
fn openid_from_env() -> Result<Option<OpenIdConfig>, ConfigError> {
    let Some(client_id) = optional("OPENID_CLIENT_ID") else {
        return Ok(None);
    };

    Ok(Some(OpenIdConfig {
        client_id,
        client_secret: required("OPENID_CLIENT_SECRET")?,
        auth_url: required("OPENID_AUTH_URL")?,
        token_url: required("OPENID_TOKEN_URL")?,
        userinfo_url: required("OPENID_USERINFO_URL")?,
        issuer: required("OPENID_ISSUER")?,
    }))
}

fn required(var: &str) -> Result<String, ConfigError> {
    optional(var).ok_or_else(|| ConfigError::MissingEnvVar(var.to_string()))
}

fn optional(var: &str) -> Option<String> {
    std::env::var(var)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}
