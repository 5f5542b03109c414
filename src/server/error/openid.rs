use thiserror::Error;

#[derive(Error, Debug)]
pub enum OpenIdError {
    /// The provider refused or the visitor cancelled, the message is shown to the visitor.
    #[error("{0}")]
    AuthenticationFailed(String),
    #[error("OpenID login is not configured on this server")]
    NotConfigured,
    #[error("Failed to build OpenID HTTP client: {0}")]
    HttpClient(String),
    #[error("Invalid OpenID provider endpoint: {0}")]
    InvalidEndpoint(#[from] oauth2::url::ParseError),
    #[error("Failed to exchange OpenID authorization code: {0}")]
    TokenExchange(String),
    #[error("Failed to fetch OpenID user information: {0}")]
    UserInfo(String),
}
