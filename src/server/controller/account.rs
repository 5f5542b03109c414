//! Password and email management for members.

use axum::{extract::State, Form, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::JsonViewData,
        form::{ChangePasswordForm, EmailForm},
    },
    server::{
        controller::util::{get_user::get_current_user, view_data::view_data},
        error::{domain::DomainError, Error},
        model::app::AppState,
        service::user::account::AccountService,
        util::validation::{is_blank, is_email, trimmed_len, Validator, MINIMUM_LENGTH},
    },
};

pub static ACCOUNT_TAG: &str = "account";

/// Mails a newly generated password to the member registered with the given email
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/ForgotPassword",
    tag = ACCOUNT_TAG,
    request_body(content = EmailForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the password reset", body = JsonViewData),
    ),
)]
pub async fn forgot_password(
    State(state): State<AppState>,
    Form(form): Form<EmailForm>,
) -> Json<JsonViewData> {
    view_data(reset_password(&state, &form).await, "resetowania hasła")
}

async fn reset_password(state: &AppState, form: &EmailForm) -> Result<(), Error> {
    let email = form.email.as_deref();

    Validator::new()
        .check(is_blank(email), "Pole e-mail nie może być puste.")
        .check(!is_email(email.unwrap_or_default()), "Niepoprawny adres e-mail.")
        .finish()?;

    AccountService::new(&state.db)
        .reset_password(
            &state.settings,
            state.email_sender.as_ref(),
            email.unwrap_or_default().trim(),
        )
        .await
}

/// Changes the signed in member's password
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/ChangePassword",
    tag = ACCOUNT_TAG,
    request_body(content = ChangePasswordForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the password change", body = JsonViewData),
    ),
)]
pub async fn change_password(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChangePasswordForm>,
) -> Json<JsonViewData> {
    view_data(
        update_password(&state, &session, &form).await,
        "zmiany hasła",
    )
}

async fn update_password(
    state: &AppState,
    session: &Session,
    form: &ChangePasswordForm,
) -> Result<(), Error> {
    let old_password = form.old_password.as_deref();
    let new_password = form.new_password.as_deref();
    let confirm_password = form.confirm_password.as_deref();

    Validator::new()
        .check(is_blank(old_password), "Stare hasło nie może być puste.")
        .check(is_blank(new_password), "Nowe hasło nie może być puste.")
        .check(
            trimmed_len(new_password) < MINIMUM_LENGTH,
            "Nowe hasło nie może być krótsze niż 4 znaków.",
        )
        .check(
            new_password.map(str::trim) != confirm_password.map(str::trim),
            "Nowe hasło i jego potwierdzenie są różne.",
        )
        .finish()?;

    let user = get_current_user(state, session)
        .await?
        .ok_or(DomainError::NotAuthenticated)?;

    AccountService::new(&state.db)
        .change_password(
            user.id,
            old_password.unwrap_or_default().trim(),
            new_password.unwrap_or_default().trim(),
        )
        .await
}

/// Changes the signed in member's email address
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/ChangeEmail",
    tag = ACCOUNT_TAG,
    request_body(content = EmailForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the email change", body = JsonViewData),
    ),
)]
pub async fn change_email(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EmailForm>,
) -> Json<JsonViewData> {
    view_data(
        update_email(&state, &session, &form).await,
        "zmiany adresu email",
    )
}

async fn update_email(state: &AppState, session: &Session, form: &EmailForm) -> Result<(), Error> {
    let email = form.email.as_deref();

    Validator::new()
        .check(is_blank(email), "Adres e-mail nie może być pusty.")
        .check(!is_email(email.unwrap_or_default()), "Niepoprawny adres e-mail.")
        .finish()?;

    let user = get_current_user(state, session)
        .await?
        .ok_or(DomainError::NotAuthenticated)?;

    AccountService::new(&state.db)
        .change_email(user.id, email.unwrap_or_default().trim())
        .await
}
