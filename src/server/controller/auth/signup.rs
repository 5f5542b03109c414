use axum::{
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
    Form, Json,
};

use crate::{
    model::{api::JsonViewData, form::SignupForm},
    server::{
        controller::{
            auth::AUTH_TAG,
            util::{
                cookie::{append_cookie, notification_cookie},
                view_data::view_data,
            },
        },
        error::{unknown_error_message, Error},
        model::app::AppState,
        service::{auth::signup::SignupService, user::account::AccountService},
        util::{
            id::parse_id,
            validation::{
                is_blank, is_email, is_valid_user_name, trimmed_len, Validator, MINIMUM_LENGTH,
            },
        },
    },
};

/// Registers a new member
///
/// The account stays inactive until the link from the registration email is opened.
///
/// # Responses
/// - 200 (Success): JSON envelope, `errorMessage` names the first failed check or broken rule
#[utoipa::path(
    post,
    path = "/Signup",
    tag = AUTH_TAG,
    request_body(content = SignupForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the registration", body = JsonViewData),
    ),
)]
pub async fn signup(
    State(state): State<AppState>,
    Form(form): Form<SignupForm>,
) -> Json<JsonViewData> {
    view_data(register(&state, &form).await, "rejestracji")
}

async fn register(state: &AppState, form: &SignupForm) -> Result<(), Error> {
    let user_name = form.user_name.as_deref();
    let password = form.password.as_deref();
    let email = form.email.as_deref();

    Validator::new()
        .check(is_blank(user_name), "Nazwa użytkownika nie może być pusta.")
        .check(
            trimmed_len(user_name) < MINIMUM_LENGTH,
            "Nazwa użytkownika nie może być krótsza niż 4 znaki.",
        )
        .check(
            !is_valid_user_name(user_name.unwrap_or_default()),
            "Nazwa użytkownika może zawierać znaki i cyfry i zaczynać się literą. Dopuszczalne znaki specjalne: -,_.",
        )
        .check(is_blank(password), "Hasło nie może być puste.")
        .check(
            trimmed_len(password) < MINIMUM_LENGTH,
            "Hasło nie może być krótsze niż 4 znaków.",
        )
        .check(is_blank(email), "Adres e-mail nie może być pusty.")
        .check(!is_email(email.unwrap_or_default()), "Niepoprawny adres e-mail.")
        .finish()?;

    SignupService::new(&state.db, &state.settings, state.email_sender.as_ref())
        .signup(
            user_name.unwrap_or_default().trim(),
            email.unwrap_or_default().trim(),
            password.unwrap_or_default().trim(),
        )
        .await?;

    Ok(())
}

/// Activates an account from the link in its registration email
///
/// Always redirects to the front page. The notification cookie tells whether the account was
/// activated, unless the key isn't an ID at all.
///
/// # Responses
/// - 303 (See Other): Redirect to `/`
/// - 500 (Internal Server Error): The notification cookie could not be written
#[utoipa::path(
    get,
    path = "/Activate/{id}",
    tag = AUTH_TAG,
    params(
        ("id" = String, Path, description = "Shortened user ID from the registration email")
    ),
    responses(
        (status = 303, description = "Redirect to the front page"),
    ),
)]
pub async fn activate(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Response, Error> {
    let mut response = Redirect::to("/").into_response();

    let Some(user_id) = parse_id(&id) else {
        return Ok(response);
    };

    let notification = match AccountService::new(&state.db)
        .activate(&state.events, user_id)
        .await
    {
        Ok(Some(_)) => notification_cookie(
            "Twoje konto zostało aktywowane. Możesz się teraz zalogować.",
            false,
        ),
        Ok(None) => notification_cookie("Niepoprawny klucz aktywacyjny.", true),
        Err(err) => {
            tracing::error!("Failed to activate user {}: {}", user_id, err);

            notification_cookie(&unknown_error_message("aktywacji twojego konta"), true)
        }
    };

    append_cookie(&mut response, notification)?;

    Ok(response)
}
