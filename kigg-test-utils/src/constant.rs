//! Placeholder values used to configure the application under test.
//!
//! None of these are real credentials.

/// Root URL used when building activation links and redirects.
pub static TEST_ROOT_URL: &str = "http://localhost:8080";

pub static TEST_SITE_TITLE: &str = "Kigg";

/// Email assigned to OpenID accounts whose provider doesn't share one.
pub static TEST_DEFAULT_OPENID_EMAIL: &str = "openid@kigg.pl";

/// Sender address for outgoing mail.
pub static TEST_EMAIL_FROM: &str = "Kigg <noreply@kigg.pl>";

pub static TEST_USERS_PER_PAGE: u64 = 35;

/// Password used by the user fixtures.
pub static TEST_PASSWORD: &str = "sekret1234";

pub static TEST_OPENID_CLIENT_ID: &str = "openid_client_id";

pub static TEST_OPENID_CLIENT_SECRET: &str = "openid_client_secret";

/// Paths of the mock OpenID provider endpoints, relative to the mock server URL.
pub static TEST_OPENID_AUTH_PATH: &str = "/authorize";
pub static TEST_OPENID_TOKEN_PATH: &str = "/token";
pub static TEST_OPENID_USERINFO_PATH: &str = "/userinfo";
