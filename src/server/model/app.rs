use std::{net::IpAddr, sync::Arc};

use axum::extract::FromRef;

use sea_orm::DatabaseConnection;

use crate::server::{
    config::Config, email::EmailSender, event::EventAggregator, openid::OpenIdRelyingParty,
    service::blocked_ip::BlockedIpCollection,
};

/// Site-wide settings read by request handlers.
#[derive(Clone, Debug)]
pub struct Settings {
    /// Absolute site URL without a trailing slash, used to build links in emails
    pub root_url: String,
    pub site_title: String,
    /// Address assigned to OpenID accounts whose provider did not share an email
    pub default_openid_email: String,
    pub html_users_per_page: u64,
    /// Peers allowed to report the client address in `X-Forwarded-For`
    pub trusted_proxies: Vec<IpAddr>,
}

impl From<&Config> for Settings {
    fn from(config: &Config) -> Self {
        Self {
            root_url: config.root_url.clone(),
            site_title: config.site_title.clone(),
            default_openid_email: config.default_openid_email.clone(),
            html_users_per_page: config.html_users_per_page,
            trusted_proxies: config.trusted_proxies.clone(),
        }
    }
}

#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub settings: Arc<Settings>,
    pub email_sender: Arc<dyn EmailSender>,
    pub openid: Arc<dyn OpenIdRelyingParty>,
    pub blocked_ips: BlockedIpCollection,
    pub events: EventAggregator,
}

impl FromRef<AppState> for Arc<Settings> {
    fn from_ref(state: &AppState) -> Self {
        state.settings.clone()
    }
}
