use axum::{extract::State, Form};
use kigg::{model::form::RecommendationForm, server::controller::recommendation::recommend};
use sea_orm::EntityTrait;

use super::*;

fn recommendation_form() -> RecommendationForm {
    RecommendationForm {
        recommendation_link: Some(" https://example.com/article ".to_string()),
        recommendation_title: Some("Artykuł tygodnia".to_string()),
        image_link: Some("https://example.com/image.png".to_string()),
        image_title: Some("Okładka".to_string()),
    }
}

#[tokio::test]
/// Expect a complete recommendation to be stored with trimmed values
async fn stores_recommendation() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!(entity::prelude::Recommendation)?;
    let (state, _) = test.into_app_state().await;

    let result = recommend(State(state), Form(recommendation_form())).await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);
    let stored = entity::prelude::Recommendation::find().all(&test.db).await?;
    assert_eq!(stored.len(), 1);
    assert_eq!(stored[0].recommendation_link, "https://example.com/article");
    assert_eq!(stored[0].image_title, "Okładka");

    Ok(())
}

#[tokio::test]
/// Expect the first missing field to be reported and nothing stored
async fn rejects_incomplete_recommendation() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!(entity::prelude::Recommendation)?;

    let cases: Vec<(fn(&mut RecommendationForm), &str)> = vec![
        (
            |form| form.recommendation_link = None,
            "Link rekomendacji nie może być pusty.",
        ),
        (
            |form| form.recommendation_title = Some("  ".to_string()),
            "Tytuł rekomendacji nie może być pusty.",
        ),
        (
            |form| form.image_link = None,
            "Link obrazka nie może być pusty.",
        ),
        (
            |form| form.image_title = Some(String::new()),
            "Tytuł obrazka nie może być pusty.",
        ),
    ];

    for (change, expected) in cases {
        let (state, _) = test.into_app_state().await;
        let mut form = recommendation_form();
        change(&mut form);

        let result = recommend(State(state), Form(form)).await;

        assert!(!result.0.is_successful);
        assert_eq!(result.0.error_message.as_deref(), Some(expected));
    }

    assert!(entity::prelude::Recommendation::find()
        .all(&test.db)
        .await?
        .is_empty());

    Ok(())
}
