//! Member administration, available to administrators only.

use axum::{body::Bytes, extract::State, Form, Json};
use tower_sessions::Session;
use url::form_urlencoded;
use uuid::Uuid;

use crate::{
    model::{
        api::JsonViewData,
        form::{AllowIpsForm, ChangeRoleForm, IdForm},
    },
    server::{
        controller::util::{
            get_user::{get_current_user, require_administrator},
            view_data::view_data,
        },
        error::{domain::DomainError, Error},
        model::app::AppState,
        service::user::admin::AdminService,
        util::{
            id::parse_id,
            validation::{is_blank, Validator},
        },
    },
};

pub static ADMIN_TAG: &str = "admin";

const EMPTY_USER_ID: &str = "Identyfikator użytkownika nie może być pusty.";
const INVALID_USER_ID: &str = "Niepoprawny identyfikator użytkownika.";

/// Parses the member ID once the other checks passed.
fn target_user_id(id: Option<&str>) -> Result<Uuid, DomainError> {
    id.map(str::trim)
        .and_then(parse_id)
        .ok_or_else(|| DomainError::Validation(INVALID_USER_ID.to_string()))
}

/// Changes a member's role
///
/// The role is matched ignoring case, an unknown role leaves the member's role unchanged.
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/ChangeRole",
    tag = ADMIN_TAG,
    request_body(content = ChangeRoleForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the role change", body = JsonViewData),
    ),
)]
pub async fn change_role(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<ChangeRoleForm>,
) -> Json<JsonViewData> {
    view_data(
        update_role(&state, &session, &form).await,
        "zmiany roli",
    )
}

async fn update_role(
    state: &AppState,
    session: &Session,
    form: &ChangeRoleForm,
) -> Result<(), Error> {
    let id = form.id.as_deref();
    let role = form.role.as_deref();

    Validator::new()
        .check(is_blank(id), EMPTY_USER_ID)
        .check(is_blank(role), "Rola nie może być pusta.")
        .finish()?;
    let user_id = target_user_id(id)?;

    let current_user = get_current_user(state, session).await?;
    require_administrator(current_user.as_ref())?;

    AdminService::new(&state.db)
        .change_role(user_id, role.unwrap_or_default().trim())
        .await
}

/// Locks a member out
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/Lock",
    tag = ADMIN_TAG,
    request_body(content = IdForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the lock", body = JsonViewData),
    ),
)]
pub async fn lock(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<IdForm>,
) -> Json<JsonViewData> {
    view_data(
        set_locked_out(&state, &session, &form, true).await,
        "blokowania użytkownika",
    )
}

/// Lets a locked out member sign in again
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/Unlock",
    tag = ADMIN_TAG,
    request_body(content = IdForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the unlock", body = JsonViewData),
    ),
)]
pub async fn unlock(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<IdForm>,
) -> Json<JsonViewData> {
    view_data(
        set_locked_out(&state, &session, &form, false).await,
        "odblokowywania użytkownika",
    )
}

async fn set_locked_out(
    state: &AppState,
    session: &Session,
    form: &IdForm,
    is_locked_out: bool,
) -> Result<(), Error> {
    let id = form.id.as_deref();

    Validator::new().check(is_blank(id), EMPTY_USER_ID).finish()?;
    let user_id = target_user_id(id)?;

    let current_user = get_current_user(state, session).await?;
    require_administrator(current_user.as_ref())?;

    AdminService::new(&state.db)
        .set_locked_out(user_id, is_locked_out)
        .await
}

/// Decodes the `POST /AllowIps` body, which repeats the `ipAddress` field.
pub fn parse_allow_ips_form(body: &[u8]) -> AllowIpsForm {
    let mut form = AllowIpsForm::default();

    for (key, value) in form_urlencoded::parse(body) {
        match key.as_ref() {
            "id" => form.id = Some(value.into_owned()),
            "ipAddress" | "ipAddress[]" => {
                let value = value.trim();
                if !value.is_empty() {
                    form.ip_address.push(value.to_string());
                }
            }
            _ => {}
        }
    }

    form
}

/// Blocks every address a member signed in from except the listed ones
///
/// Listed addresses are unblocked.
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/AllowIps",
    tag = ADMIN_TAG,
    request_body(content = AllowIpsForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the address update", body = JsonViewData),
    ),
)]
pub async fn allow_ips(
    State(state): State<AppState>,
    session: Session,
    body: Bytes,
) -> Json<JsonViewData> {
    let form = parse_allow_ips_form(&body);

    view_data(
        update_allowed_ips(&state, &session, &form).await,
        "odblokowywania adresów IP użytkownika",
    )
}

async fn update_allowed_ips(
    state: &AppState,
    session: &Session,
    form: &AllowIpsForm,
) -> Result<(), Error> {
    let id = form.id.as_deref();

    Validator::new().check(is_blank(id), EMPTY_USER_ID).finish()?;
    let user_id = target_user_id(id)?;

    let current_user = get_current_user(state, session).await?;
    require_administrator(current_user.as_ref())?;

    AdminService::new(&state.db)
        .allow_ips(&state.blocked_ips, user_id, &form.ip_address)
        .await
}
