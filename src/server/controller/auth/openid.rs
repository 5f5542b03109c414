use axum::{
    extract::{Query, State},
    http::{header::REFERER, HeaderMap, StatusCode},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::server::{
    controller::{
        auth::AUTH_TAG,
        util::{
            client_ip::ClientIp,
            cookie::{
                append_cookie, expired_cookie, flash_cookie, notification_cookie, read_cookie,
                read_return_url, return_url_cookie, OPENID_REMEMBER_ME_COOKIE, RETURN_URL_COOKIE,
            },
            csrf::validate_csrf,
            view_data::parse_flag,
        },
    },
    error::{openid::OpenIdError, unknown_error_message, Error},
    model::{
        app::AppState,
        session::{auth::SessionAuthCsrf, user::SessionUserId},
    },
    service::auth::openid::OpenIdLoginService,
    util::validation::{is_openid_identifier, is_same_site},
};

/// Shown when the provider gave no reason for a failed sign in.
pub const OPENID_FAILED_MESSAGE: &str = "Nie udało się zalogować przez wybranego dostawcę OpenID.";

/// Query of `GET /OpenId`.
///
/// The visitor's form sends `identifier` and `rememberMe`, the provider redirects back with
/// either `code` and `state` or `error`.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct OpenIdParams {
    pub identifier: Option<String>,
    #[serde(rename = "rememberMe")]
    pub remember_me: Option<String>,
    pub code: Option<String>,
    pub state: Option<String>,
    pub error: Option<String>,
    pub error_description: Option<String>,
}

/// Signs in through an OpenID provider
///
/// Without a provider response the visitor is sent to their provider. When the provider
/// redirects back the member is signed in, registering them on first visit, and sent back to
/// the page the sign in started from.
///
/// # Responses
/// - 200 (Success): Empty response, no usable identifier was given
/// - 303 (See Other): Redirect to the provider, or back to the site once the provider answered.
///   Failures are reported in the notification cookie
/// - 500 (Internal Server Error): Session or cookie failure
#[utoipa::path(
    get,
    path = "/OpenId",
    tag = AUTH_TAG,
    params(OpenIdParams),
    responses(
        (status = 200, description = "No identifier to sign in with"),
        (status = 303, description = "Redirect to the provider or back to the site"),
    ),
)]
pub async fn openid(
    State(state): State<AppState>,
    session: Session,
    ClientIp(ip_address): ClientIp,
    headers: HeaderMap,
    Query(params): Query<OpenIdParams>,
) -> Result<Response, Error> {
    if params.code.is_none() && params.error.is_none() {
        return start_login(&state, &session, &headers, &params).await;
    }

    let remember_me = read_cookie(&headers, OPENID_REMEMBER_ME_COOKIE)
        .is_some_and(|value| parse_flag(Some(&value)));

    let error_message =
        match complete_login(&state, &session, ip_address.as_deref(), &params, remember_me).await {
            Ok(()) => None,
            Err(err) => Some(failure_message(err)),
        };

    redirect_back(&state, &headers, error_message)
}

async fn start_login(
    state: &AppState,
    session: &Session,
    headers: &HeaderMap,
    params: &OpenIdParams,
) -> Result<Response, Error> {
    let identifier = params.identifier.as_deref().map(str::trim).unwrap_or_default();
    if !is_openid_identifier(identifier) {
        return Ok(StatusCode::OK.into_response());
    }

    let request = match state.openid.create_request(identifier) {
        Ok(request) => request,
        Err(err) => return redirect_back(state, headers, Some(failure_message(err))),
    };

    SessionAuthCsrf::insert(session, &request.state).await?;

    let mut response = Redirect::to(&request.redirect_url).into_response();

    if parse_flag(params.remember_me.as_deref()) {
        append_cookie(
            &mut response,
            flash_cookie(OPENID_REMEMBER_ME_COOKIE, "True".to_string()),
        )?;
    }

    let referer = headers
        .get(REFERER)
        .and_then(|value| value.to_str().ok())
        .filter(|referer| is_same_site(referer, &state.settings.root_url));
    if let Some(referer) = referer {
        append_cookie(&mut response, return_url_cookie(referer))?;
    }

    Ok(response)
}

async fn complete_login(
    state: &AppState,
    session: &Session,
    ip_address: Option<&str>,
    params: &OpenIdParams,
    remember_me: bool,
) -> Result<(), Error> {
    if let Some(error) = params.error.as_deref() {
        tracing::info!("OpenID provider refused sign in: {}", error);

        SessionAuthCsrf::discard(session).await?;

        let message = params
            .error_description
            .as_deref()
            .map(str::trim)
            .filter(|description| !description.is_empty())
            .unwrap_or(OPENID_FAILED_MESSAGE);

        return Err(OpenIdError::AuthenticationFailed(message.to_string()).into());
    }

    validate_csrf(session, params.state.as_deref()).await?;

    let code = params
        .code
        .as_deref()
        .ok_or_else(|| OpenIdError::AuthenticationFailed(OPENID_FAILED_MESSAGE.to_string()))?;

    let claims = state.openid.complete(code).await?;

    let user = OpenIdLoginService::new(&state.db, &state.settings, &state.events)
        .login(&claims, ip_address)
        .await?;

    SessionUserId::insert(session, user.id, remember_me).await?;

    Ok(())
}

/// Message for the notification cookie.
fn failure_message(err: Error) -> String {
    match err {
        Error::DomainError(err) => err.to_string(),
        Error::OpenIdError(OpenIdError::AuthenticationFailed(message)) => message,
        Error::OpenIdError(err) => {
            tracing::warn!("OpenID sign in failed: {}", err);

            OPENID_FAILED_MESSAGE.to_string()
        }
        Error::AuthError(err) => {
            tracing::debug!("{}", err);

            "Wystąpił problem podczas logowania, spróbuj ponownie.".to_string()
        }
        err => {
            tracing::error!("Failed during OpenID sign in: {}", err);

            unknown_error_message("logowania")
        }
    }
}

/// Redirects to the page the sign in started from, consuming the flow's cookies.
fn redirect_back(
    state: &AppState,
    headers: &HeaderMap,
    error_message: Option<String>,
) -> Result<Response, Error> {
    let target = read_return_url(headers)
        .filter(|url| is_same_site(url, &state.settings.root_url))
        .unwrap_or_else(|| "/".to_string());

    let mut response = Redirect::to(&target).into_response();

    for name in [OPENID_REMEMBER_ME_COOKIE, RETURN_URL_COOKIE] {
        if read_cookie(headers, name).is_some() {
            append_cookie(&mut response, expired_cookie(name))?;
        }
    }

    if let Some(message) = error_message {
        append_cookie(&mut response, notification_cookie(&message, true))?;
    }

    Ok(response)
}
