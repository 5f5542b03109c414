use axum::{extract::State, Form, Json};
use tower_sessions::Session;

use crate::{
    model::{api::JsonViewData, form::LoginForm},
    server::{
        controller::{
            auth::AUTH_TAG,
            util::{
                client_ip::ClientIp,
                get_user::get_current_user,
                view_data::{parse_flag, view_data},
            },
        },
        error::{domain::DomainError, Error},
        model::{app::AppState, session::user::SessionUserId},
        service::auth::login::LoginService,
        util::validation::{is_blank, Validator},
    },
};

/// Signs in with user name and password
///
/// # Responses
/// - 200 (Success): JSON envelope, the session holds the member on success
#[utoipa::path(
    post,
    path = "/Login",
    tag = AUTH_TAG,
    request_body(content = LoginForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the sign in", body = JsonViewData),
    ),
)]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    ClientIp(ip_address): ClientIp,
    Form(form): Form<LoginForm>,
) -> Json<JsonViewData> {
    view_data(
        sign_in(&state, &session, ip_address.as_deref(), &form).await,
        "logowania",
    )
}

async fn sign_in(
    state: &AppState,
    session: &Session,
    ip_address: Option<&str>,
    form: &LoginForm,
) -> Result<(), Error> {
    let user_name = form.user_name.as_deref();
    let password = form.password.as_deref();

    Validator::new()
        .check(is_blank(user_name), "Nazwa użytkownika nie może być pusta.")
        .check(is_blank(password), "Hasło nie może być puste.")
        .finish()?;

    let user = LoginService::new(&state.db)
        .login(
            user_name.unwrap_or_default().trim(),
            password.unwrap_or_default().trim(),
            ip_address,
        )
        .await?;

    SessionUserId::insert(session, user.id, parse_flag(form.remember_me.as_deref())).await?;

    Ok(())
}

/// Signs the current member out
///
/// # Responses
/// - 200 (Success): JSON envelope, fails when nobody is signed in
#[utoipa::path(
    post,
    path = "/Logout",
    tag = AUTH_TAG,
    responses(
        (status = 200, description = "Outcome of the sign out", body = JsonViewData),
    ),
)]
pub async fn logout(State(state): State<AppState>, session: Session) -> Json<JsonViewData> {
    view_data(sign_out(&state, &session).await, "wylogowywania")
}

async fn sign_out(state: &AppState, session: &Session) -> Result<(), Error> {
    let user = get_current_user(state, session)
        .await?
        .ok_or(DomainError::NotAuthenticated)?;

    LoginService::new(&state.db).logout(user.id).await?;

    session.flush().await?;

    Ok(())
}
