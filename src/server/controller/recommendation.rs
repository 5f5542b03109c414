use axum::{extract::State, Form, Json};

use crate::{
    model::{api::JsonViewData, form::RecommendationForm},
    server::{
        controller::util::view_data::view_data,
        data::recommendation::RecommendationDetails,
        error::Error,
        model::app::AppState,
        service::recommendation::RecommendationService,
        util::validation::{is_blank, Validator},
    },
};

pub static RECOMMENDATION_TAG: &str = "recommendation";

/// Adds a link recommended on the front page
///
/// # Responses
/// - 200 (Success): JSON envelope
#[utoipa::path(
    post,
    path = "/Recomend",
    tag = RECOMMENDATION_TAG,
    request_body(content = RecommendationForm, content_type = "application/x-www-form-urlencoded"),
    responses(
        (status = 200, description = "Outcome of the recommendation", body = JsonViewData),
    ),
)]
pub async fn recommend(
    State(state): State<AppState>,
    Form(form): Form<RecommendationForm>,
) -> Json<JsonViewData> {
    view_data(
        add_recommendation(&state, &form).await,
        "dodawania rekomendacji",
    )
}

async fn add_recommendation(state: &AppState, form: &RecommendationForm) -> Result<(), Error> {
    let recommendation_link = form.recommendation_link.as_deref();
    let recommendation_title = form.recommendation_title.as_deref();
    let image_link = form.image_link.as_deref();
    let image_title = form.image_title.as_deref();

    Validator::new()
        .check(
            is_blank(recommendation_link),
            "Link rekomendacji nie może być pusty.",
        )
        .check(
            is_blank(recommendation_title),
            "Tytuł rekomendacji nie może być pusty.",
        )
        .check(is_blank(image_link), "Link obrazka nie może być pusty.")
        .check(is_blank(image_title), "Tytuł obrazka nie może być pusty.")
        .finish()?;

    let trimmed = |value: Option<&str>| value.unwrap_or_default().trim().to_string();

    RecommendationService::new(&state.db)
        .recommend(RecommendationDetails {
            recommendation_link: trimmed(recommendation_link),
            recommendation_title: trimmed(recommendation_title),
            image_link: trimmed(image_link),
            image_title: trimmed(image_title),
        })
        .await?;

    Ok(())
}
