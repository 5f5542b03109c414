//! Test utilities for creating AppState over a test context.

use std::sync::Arc;

use axum::{http::header::SET_COOKIE, response::Response};
use kigg::server::{
    config::OpenIdConfig,
    email::OutboxEmailSender,
    event::EventAggregator,
    model::app::{AppState, Settings},
    openid::OidcRelyingParty,
    service::blocked_ip::BlockedIpCollection,
};
use kigg_test_utils::{constant::*, TestContext};
use tower_sessions::cookie::Cookie;
use url::form_urlencoded;

/// Extension trait for TestContext to create AppState with an in-memory outbox
#[allow(async_fn_in_trait)]
pub trait TestContextExt {
    /// Builds the state the handlers run with, returning the outbox mail is sent to.
    ///
    /// The OpenID provider endpoints point at the context's mock server.
    async fn into_app_state(&self) -> (AppState, Arc<OutboxEmailSender>);
}

impl TestContextExt for TestContext {
    async fn into_app_state(&self) -> (AppState, Arc<OutboxEmailSender>) {
        let settings = Settings {
            root_url: TEST_ROOT_URL.to_string(),
            site_title: TEST_SITE_TITLE.to_string(),
            default_openid_email: TEST_DEFAULT_OPENID_EMAIL.to_string(),
            html_users_per_page: TEST_USERS_PER_PAGE,
            trusted_proxies: Vec::new(),
        };

        let openid_config = OpenIdConfig {
            client_id: TEST_OPENID_CLIENT_ID.to_string(),
            client_secret: TEST_OPENID_CLIENT_SECRET.to_string(),
            auth_url: self.server_endpoint(TEST_OPENID_AUTH_PATH),
            token_url: self.server_endpoint(TEST_OPENID_TOKEN_PATH),
            userinfo_url: self.server_endpoint(TEST_OPENID_USERINFO_PATH),
            issuer: self.server_url(),
        };
        let openid =
            OidcRelyingParty::new(&openid_config, &format!("{}/OpenId", TEST_ROOT_URL)).unwrap();

        let outbox = Arc::new(OutboxEmailSender::new());
        let blocked_ips = BlockedIpCollection::load(&self.db).await.unwrap();

        let state = AppState {
            db: self.db.clone(),
            settings: Arc::new(settings),
            email_sender: outbox.clone(),
            openid: Arc::new(openid),
            blocked_ips,
            events: EventAggregator::new(),
        };

        (state, outbox)
    }
}

/// Cookies set by a response.
pub fn response_cookies(response: &Response) -> Vec<Cookie<'static>> {
    response
        .headers()
        .get_all(SET_COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .filter_map(|value| Cookie::parse(value.to_string()).ok())
        .collect()
}

/// Decoded `(msg, err)` of the notification cookie set by a response.
pub fn notification(response: &Response) -> Option<(String, bool)> {
    let cookie = response_cookies(response)
        .into_iter()
        .find(|cookie| cookie.name() == "notification")?;

    let mut message = None;
    let mut is_error = false;
    for (key, value) in form_urlencoded::parse(cookie.value().as_bytes()) {
        match key.as_ref() {
            "msg" => message = Some(value.into_owned()),
            "err" => is_error = value == "True",
            _ => {}
        }
    }

    message.map(|message| (message, is_error))
}

/// `Location` header of a redirect.
pub fn location(response: &Response) -> Option<String> {
    response
        .headers()
        .get("location")
        .and_then(|value| value.to_str().ok())
        .map(str::to_string)
}
