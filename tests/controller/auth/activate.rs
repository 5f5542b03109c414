use axum::{
    extract::{Path, State},
    http::StatusCode,
};
use kigg::server::{controller::auth::signup::activate, util::id::shrink};
use sea_orm::EntityTrait;
use uuid::Uuid;

use super::*;
use crate::util::{location, notification};

#[tokio::test]
/// Expect an inactive account to be activated with a success notification
async fn activates_inactive_account() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test
        .user()
        .insert_inactive_user("janek", "janek@kigg.pl")
        .await?;
    let (state, _) = test.into_app_state().await;
    let mut events = state.events.subscribe();

    let response = activate(State(state), Path(shrink(user.id))).await.unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some("/"));
    assert_eq!(
        notification(&response),
        Some((
            "Twoje konto zostało aktywowane. Możesz się teraz zalogować.".to_string(),
            false
        ))
    );

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert!(stored.is_active);
    assert!(events.try_recv().is_ok());

    Ok(())
}

#[tokio::test]
/// Expect activating an already active account to change nothing
async fn repeated_activation_is_a_no_op() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test
        .user()
        .insert_inactive_user("janek", "janek@kigg.pl")
        .await?;

    let (state, _) = test.into_app_state().await;
    activate(State(state), Path(shrink(user.id))).await.unwrap();
    let after_first = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();

    let (state, _) = test.into_app_state().await;
    let mut events = state.events.subscribe();
    let response = activate(State(state), Path(shrink(user.id))).await.unwrap();

    assert_eq!(
        notification(&response),
        Some(("Niepoprawny klucz aktywacyjny.".to_string(), true))
    );
    let after_second = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(after_first, after_second);
    assert!(events.try_recv().is_err());

    Ok(())
}

#[tokio::test]
/// Expect an unknown ID to be reported as an invalid key
async fn rejects_unknown_user() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, _) = test.into_app_state().await;

    let response = activate(State(state), Path(shrink(Uuid::new_v4())))
        .await
        .unwrap();

    assert_eq!(
        notification(&response),
        Some(("Niepoprawny klucz aktywacyjny.".to_string(), true))
    );

    Ok(())
}

#[tokio::test]
/// Expect a key that isn't an ID to redirect without a notification
async fn ignores_malformed_key() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, _) = test.into_app_state().await;

    let response = activate(State(state), Path("not-an-id".to_string()))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert!(notification(&response).is_none());

    Ok(())
}
