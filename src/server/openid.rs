//! OpenID relying party.
//!
//! Visitors sign in with an account at an OpenID Connect provider. The provider's issuer and
//! subject together form the claimed identifier, which becomes the member's user name.

use async_trait::async_trait;
use oauth2::{
    basic::BasicClient, AuthUrl, AuthorizationCode, ClientId, ClientSecret, CsrfToken,
    EndpointNotSet, EndpointSet, RedirectUrl, RequestTokenError, Scope, TokenResponse, TokenUrl,
};
use serde::Deserialize;

use crate::server::{
    config::OpenIdConfig,
    error::{openid::OpenIdError, Error},
};

type OidcClient = BasicClient<EndpointSet, EndpointNotSet, EndpointNotSet, EndpointNotSet, EndpointSet>;

/// Redirect to the provider along with the state to verify on return.
#[derive(Debug, Clone)]
pub struct AuthenticationRequest {
    pub redirect_url: String,
    pub state: String,
}

/// Identity asserted by the provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenIdClaims {
    pub claimed_identifier: String,
    pub email: Option<String>,
}

#[async_trait]
pub trait OpenIdRelyingParty: Send + Sync {
    /// Builds the authentication request for the identifier the visitor entered.
    fn create_request(&self, identifier: &str) -> Result<AuthenticationRequest, Error>;

    /// Exchanges the authorization code returned by the provider for the visitor's identity.
    async fn complete(&self, code: &str) -> Result<OpenIdClaims, Error>;
}

#[derive(Deserialize)]
struct UserInfo {
    sub: String,
    email: Option<String>,
}

pub struct OidcRelyingParty {
    client: OidcClient,
    http: reqwest::Client,
    userinfo_url: String,
    issuer: String,
}

impl OidcRelyingParty {
    /// Creates a relying party answering the provider at `redirect_url`.
    pub fn new(config: &OpenIdConfig, redirect_url: &str) -> Result<Self, Error> {
        let client = BasicClient::new(ClientId::new(config.client_id.clone()))
            .set_client_secret(ClientSecret::new(config.client_secret.clone()))
            .set_auth_uri(AuthUrl::new(config.auth_url.clone()).map_err(OpenIdError::from)?)
            .set_token_uri(TokenUrl::new(config.token_url.clone()).map_err(OpenIdError::from)?)
            .set_redirect_uri(
                RedirectUrl::new(redirect_url.to_string()).map_err(OpenIdError::from)?,
            );

        // Following redirects from the token endpoint would allow SSRF
        let http = reqwest::Client::builder()
            .redirect(reqwest::redirect::Policy::none())
            .build()
            .map_err(|e| OpenIdError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            http,
            userinfo_url: config.userinfo_url.clone(),
            issuer: config.issuer.trim_end_matches('/').to_string(),
        })
    }
}

#[async_trait]
impl OpenIdRelyingParty for OidcRelyingParty {
    fn create_request(&self, identifier: &str) -> Result<AuthenticationRequest, Error> {
        let (url, state) = self
            .client
            .authorize_url(CsrfToken::new_random)
            .add_scope(Scope::new("openid".to_string()))
            .add_scope(Scope::new("email".to_string()))
            .add_extra_param("login_hint", identifier)
            .url();

        Ok(AuthenticationRequest {
            redirect_url: url.to_string(),
            state: state.secret().to_string(),
        })
    }

    async fn complete(&self, code: &str) -> Result<OpenIdClaims, Error> {
        let token = self
            .client
            .exchange_code(AuthorizationCode::new(code.to_string()))
            .request_async(&self.http)
            .await
            .map_err(|e| match e {
                RequestTokenError::ServerResponse(response) => OpenIdError::TokenExchange(
                    response
                        .error_description()
                        .cloned()
                        .unwrap_or_else(|| response.error().to_string()),
                ),
                other => OpenIdError::TokenExchange(other.to_string()),
            })?;

        let user_info = self
            .http
            .get(&self.userinfo_url)
            .bearer_auth(token.access_token().secret())
            .send()
            .await
            .and_then(|response| response.error_for_status())
            .map_err(|e| OpenIdError::UserInfo(e.to_string()))?
            .json::<UserInfo>()
            .await
            .map_err(|e| OpenIdError::UserInfo(e.to_string()))?;

        Ok(OpenIdClaims {
            claimed_identifier: format!("{}/{}", self.issuer, user_info.sub),
            email: user_info.email.filter(|email| !email.trim().is_empty()),
        })
    }
}

/// Relying party used when no provider is configured.
pub struct DisabledRelyingParty;

#[async_trait]
impl OpenIdRelyingParty for DisabledRelyingParty {
    fn create_request(&self, _identifier: &str) -> Result<AuthenticationRequest, Error> {
        Err(OpenIdError::NotConfigured.into())
    }

    async fn complete(&self, _code: &str) -> Result<OpenIdClaims, Error> {
        Err(OpenIdError::NotConfigured.into())
    }
}
