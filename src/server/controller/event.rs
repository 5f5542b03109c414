//! Upcoming community events.

use axum::{extract::State, http::StatusCode, response::IntoResponse, Form, Json};
use tower_sessions::Session;

use crate::{
    model::{
        api::{ErrorDto, JsonViewData},
        event::{UnapprovedEventCountDto, UpcomingEventDto},
        form::{EventForm, IdForm},
    },
    server::{
        controller::util::{
            get_user::{get_current_user, require_administrator},
            view_data::{parse_flag, view_data},
        },
        data::upcoming_event::EventDetails,
        error::{domain::DomainError, Error},
        model::app::AppState,
        service::upcoming_event::UpcomingEventService,
        util::{
            id::parse_id,
            time::parse_form_date,
            validation::{is_blank, is_email, is_web_url, Validator},
        },
    },
};

pub static EVENT_TAG: &str = "event";

const EMPTY_EVENT_ID: &str = "Identyfikator wydarzenia nie może być pusty.";
const INVALID_EVENT_ID: &str = "Niepoprawny identyfikator wydarzenia.";
const INVALID_EVENT_DATE: &str = "Niepoprawna data wydarzenia.";

/// Validates the event fields shared by submitting and editing.
fn event_details(form: &EventForm) -> Result<EventDetails, DomainError> {
    let email = form.event_user_email.as_deref();
    let link = form.event_link.as_deref();
    let name = form.event_name.as_deref();
    let date = form.event_date.as_deref();
    let place = form.event_place.as_deref();
    let lead = form.event_lead.as_deref();

    Validator::new()
        .check(is_blank(email), "Adres e-mail nie może być pusty.")
        .check(!is_email(email.unwrap_or_default()), "Niepoprawny adres e-mail.")
        .check(is_blank(link), "Link wydarzenia nie może być pusty.")
        .check(!is_web_url(link.unwrap_or_default()), "Niepoprawny link wydarzenia.")
        .check(is_blank(name), "Nazwa wydarzenia nie może być pusta.")
        .check(is_blank(date), "Data wydarzenia nie może być pusta.")
        .check(
            parse_form_date(date.unwrap_or_default()).is_none(),
            INVALID_EVENT_DATE,
        )
        .check(is_blank(place), "Miejsce wydarzenia nie może być puste.")
        .check(is_blank(lead), "Opis wydarzenia nie może być pusty.")
        .finish()?;

    let event_date = parse_form_date(date.unwrap_or_default())
        .ok_or_else(|| DomainError::Validation(INVALID_EVENT_DATE.to_string()))?;
    let trimmed = |value: Option<&str>| value.unwrap_or_default().trim().to_string();

    Ok(EventDetails {
        event_user_email: trimmed(email),
        event_link: trimmed(link),
        event_name: trimmed(name),
        event_date,
        event_place: trimmed(place),
        event_lead: trimmed(lead),
    })
}

fn target_event_id(id: Option<&str>) -> Result<uuid::Uuid, DomainError> {
    Validator::new().check(is_blank(id), EMPTY_EVENT_ID).finish()?;

    id.map(str::trim)
        .and_then(parse_id)
        .ok_or_else(|| DomainError::Validation(INVALID_EVENT_ID.to_string()))
}

/// Approved upcoming events, soonest first
///
/// # Responses
/// - 200 (Success): Approved events
/// - 500 (Internal Server Error): Database error
#[utoipa::path(
    get,
    path = "/Events",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "Success when listing events", body = Vec<UpcomingEventDto>),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(State(state): State<AppState>) -> Result<impl IntoResponse, Error> {
    let events = UpcomingEventService::new(&state.db).get_approved().await?;

    Ok((StatusCode::OK, Json(events)))
}

/// Submits an event, listed once an administrator approves it
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/Events",
    tag = EVENT_TAG,
    request_body(content = EventForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the submission", body = JsonViewData),
    ),
)]
pub async fn submit(
    State(state): State<AppState>,
    Form(form): Form<EventForm>,
) -> Json<JsonViewData> {
    view_data(submit_event(&state, &form).await, "dodawania wydarzenia")
}

async fn submit_event(state: &AppState, form: &EventForm) -> Result<(), Error> {
    let details = event_details(form)?;

    UpcomingEventService::new(&state.db).submit(details).await?;

    Ok(())
}

/// Edits an event and sets whether it is approved
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/Events/Edit",
    tag = EVENT_TAG,
    request_body(content = EventForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the edit", body = JsonViewData),
    ),
)]
pub async fn edit(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<EventForm>,
) -> Json<JsonViewData> {
    view_data(
        edit_event(&state, &session, &form).await,
        "edycji wydarzenia",
    )
}

async fn edit_event(state: &AppState, session: &Session, form: &EventForm) -> Result<(), Error> {
    let event_id = target_event_id(form.id.as_deref())?;
    let details = event_details(form)?;

    let current_user = get_current_user(state, session).await?;
    require_administrator(current_user.as_ref())?;

    UpcomingEventService::new(&state.db)
        .edit(event_id, details, parse_flag(form.is_approved.as_deref()))
        .await?;

    Ok(())
}

/// Removes an event
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/Events/Delete",
    tag = EVENT_TAG,
    request_body(content = IdForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the removal", body = JsonViewData),
    ),
)]
pub async fn delete(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<IdForm>,
) -> Json<JsonViewData> {
    view_data(
        delete_event(&state, &session, &form).await,
        "usuwania wydarzenia",
    )
}

async fn delete_event(state: &AppState, session: &Session, form: &IdForm) -> Result<(), Error> {
    let event_id = target_event_id(form.id.as_deref())?;

    let current_user = get_current_user(state, session).await?;
    require_administrator(current_user.as_ref())?;

    UpcomingEventService::new(&state.db).delete(event_id).await
}

/// Number of events waiting for approval
///
/// # Responses
/// - 200 (Success): The count
/// - 401 (Unauthorized): Nobody is signed in
/// - 403 (Forbidden): The member isn't an administrator
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    get,
    path = "/Events/Unapproved",
    tag = EVENT_TAG,
    responses(
        (status = 200, description = "Success when counting events", body = UnapprovedEventCountDto),
        (status = 401, description = "Not signed in", body = ErrorDto),
        (status = 403, description = "Not an administrator", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn count_unapproved(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let current_user = get_current_user(&state, &session).await?;
    require_administrator(current_user.as_ref())?;

    let count = UpcomingEventService::new(&state.db)
        .count_unapproved()
        .await?;

    Ok(Json(UnapprovedEventCountDto { count }))
}
