use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
    Json,
};
use serde::Deserialize;
use tower_sessions::Session;
use utoipa::IntoParams;

use crate::{
    model::{
        api::ErrorDto,
        user::{UserDetailDto, UserListDto, UserMenuDto},
    },
    server::{
        controller::util::get_user::get_current_user,
        error::Error,
        model::app::AppState,
        service::user::{to_user_dto, UserService},
    },
};

pub static USER_TAG: &str = "user";

const USER_LIST_FIRST_PAGE: &str = "/Users/List?page=1";

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PageParams {
    /// 1-based page number, the first page when missing
    pub page: Option<u64>,
}

#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct UserDetailParams {
    /// `Promoted`, `Posted` or `Commented`
    pub tab: Option<String>,
    pub page: Option<u64>,
}

/// List site members, most recently active first
///
/// # Responses
/// - 200 (Success): One page of members
/// - 500 (Internal Server Error): Database error
#[utoipa::path(
    get,
    path = "/Users/List",
    tag = USER_TAG,
    params(PageParams),
    responses(
        (status = 200, description = "Success when listing members", body = UserListDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn list(
    State(state): State<AppState>,
    Query(params): Query<PageParams>,
) -> Result<impl IntoResponse, Error> {
    let users = UserService::new(&state.db, &state.settings)
        .list(params.page)
        .await?;

    Ok((StatusCode::OK, Json(users)))
}

/// Redirect to the first page of the member list
#[utoipa::path(
    get,
    path = "/Users",
    tag = USER_TAG,
    responses(
        (status = 303, description = "Redirect to the member list"),
    ),
)]
pub async fn list_redirect() -> Redirect {
    Redirect::to(USER_LIST_FIRST_PAGE)
}

/// Profile of a single member
///
/// Administrators also get every address the member signed in from, flagged with whether it is
/// allowed.
///
/// # Responses
/// - 200 (Success): The member's profile
/// - 303 (See Other): Blank name, redirect to the member list
/// - 404 (Not Found): No member with that ID
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    get,
    path = "/Users/{name}",
    tag = USER_TAG,
    params(
        ("name" = String, Path, description = "Shortened ID of the member"),
        UserDetailParams
    ),
    responses(
        (status = 200, description = "Success when retrieving the member", body = UserDetailDto),
        (status = 303, description = "Redirect to the member list"),
        (status = 404, description = "Member not found", body = ErrorDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn detail(
    State(state): State<AppState>,
    session: Session,
    Path(name): Path<String>,
    Query(params): Query<UserDetailParams>,
) -> Result<Response, Error> {
    let name = name.trim();
    if name.is_empty() {
        return Ok(Redirect::to(USER_LIST_FIRST_PAGE).into_response());
    }

    let viewer = get_current_user(&state, &session).await?;

    let Some(user) = UserService::new(&state.db, &state.settings)
        .detail(
            name,
            params.tab.as_deref(),
            params.page,
            viewer.as_ref(),
            &state.blocked_ips,
        )
        .await?
    else {
        return Ok((
            StatusCode::NOT_FOUND,
            Json(ErrorDto {
                error: "Użytkownik nie istnieje.".to_string(),
            }),
        )
            .into_response());
    };

    Ok((StatusCode::OK, Json(user)).into_response())
}

/// State of the page menu for the current visitor
///
/// # Responses
/// - 200 (Success): The signed in member, or an anonymous menu
/// - 500 (Internal Server Error): Database or session error
#[utoipa::path(
    get,
    path = "/Menu",
    tag = USER_TAG,
    responses(
        (status = 200, description = "Success when building the menu", body = UserMenuDto),
        (status = 500, description = "Internal server error", body = ErrorDto)
    ),
)]
pub async fn menu(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, Error> {
    let current_user = get_current_user(&state, &session).await?;

    Ok(Json(UserMenuDto {
        is_user_authenticated: current_user.is_some(),
        current_user: current_user.as_ref().map(to_user_dto),
    }))
}
