//! Short-lived cookies carried across redirects.
//!
//! The OpenID flow leaves the site and comes back, so the remember-me choice and the page to
//! return to travel in cookies. Messages for the next page travel in the notification cookie.
//! All of them are readable by the site's scripts.

use axum::{
    http::{
        header::{COOKIE, SET_COOKIE},
        HeaderMap, HeaderValue,
    },
    response::Response,
};
use time::Duration;
use tower_sessions::cookie::Cookie;
use url::form_urlencoded;

use crate::server::error::Error;

/// Set while the visitor is at their OpenID provider after asking to be remembered.
pub const OPENID_REMEMBER_ME_COOKIE: &str = "oidr";

/// Page the visitor started the OpenID login from.
pub const RETURN_URL_COOKIE: &str = "returnUrl";

/// One-time message shown by the next page.
pub const NOTIFICATION_COOKIE: &str = "notification";

const FLASH_COOKIE_MINUTES: i64 = 5;

pub fn flash_cookie(name: &'static str, value: String) -> Cookie<'static> {
    Cookie::build((name, value))
        .path("/")
        .http_only(false)
        .max_age(Duration::minutes(FLASH_COOKIE_MINUTES))
        .build()
}

pub fn expired_cookie(name: &'static str) -> Cookie<'static> {
    Cookie::build((name, ""))
        .path("/")
        .max_age(Duration::ZERO)
        .build()
}

/// Notification cookie with the url-encoded value `msg=...&err=True|False`.
pub fn notification_cookie(message: &str, is_error: bool) -> Cookie<'static> {
    let value = form_urlencoded::Serializer::new(String::new())
        .append_pair("msg", message)
        .append_pair("err", if is_error { "True" } else { "False" })
        .finish();

    flash_cookie(NOTIFICATION_COOKIE, value)
}

pub fn return_url_cookie(url: &str) -> Cookie<'static> {
    flash_cookie(
        RETURN_URL_COOKIE,
        form_urlencoded::byte_serialize(url.as_bytes()).collect(),
    )
}

/// Raw value of the request cookie called `name`.
pub fn read_cookie(headers: &HeaderMap, name: &str) -> Option<String> {
    headers
        .get_all(COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| Cookie::split_parse(value.to_string()))
        .filter_map(Result::ok)
        .find(|cookie| cookie.name() == name)
        .map(|cookie| cookie.value().to_string())
}

pub fn read_return_url(headers: &HeaderMap) -> Option<String> {
    let raw = read_cookie(headers, RETURN_URL_COOKIE)?;

    form_urlencoded::parse(format!("url={}", raw).as_bytes())
        .next()
        .map(|(_, url)| url.into_owned())
        .filter(|url| !url.is_empty())
}

pub fn append_cookie(response: &mut Response, cookie: Cookie<'static>) -> Result<(), Error> {
    let value = HeaderValue::from_str(&cookie.to_string())
        .map_err(|e| Error::InternalError(format!("Invalid cookie header: {}", e)))?;

    response.headers_mut().append(SET_COOKIE, value);

    Ok(())
}
