use axum::{extract::State, http::StatusCode, response::IntoResponse, Form};
use chrono::{Duration, NaiveDate, Utc};
use kigg::{
    model::form::{EventForm, IdForm},
    server::{
        controller::event::{count_unapproved, delete, edit, list, submit},
        model::session::user::SessionUserId,
        util::id::shrink,
    },
};
use sea_orm::EntityTrait;

use super::*;

fn event_form() -> EventForm {
    EventForm {
        id: None,
        event_user_email: Some("organizer@kigg.pl".to_string()),
        event_link: Some("https://example.com/meetup".to_string()),
        event_name: Some("Meetup".to_string()),
        event_date: Some("2026-11-20 18:30".to_string()),
        event_place: Some("Gdańsk".to_string()),
        event_lead: Some("Spotkanie społeczności".to_string()),
        is_approved: None,
    }
}

async fn sign_in_administrator(test: &mut TestContext) -> Result<(), TestError> {
    let admin = test
        .user()
        .insert_administrator("admin", "admin@kigg.pl")
        .await?;
    SessionUserId::insert(&test.session, admin.id, false)
        .await
        .unwrap();

    Ok(())
}

#[tokio::test]
/// Expect a submitted event to be stored unapproved and kept off the listing
async fn submitted_event_waits_for_approval() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!(entity::prelude::UpcomingEvent)?;
    let (state, _) = test.into_app_state().await;

    let result = submit(State(state.clone()), Form(event_form())).await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);
    let stored = entity::prelude::UpcomingEvent::find().all(&test.db).await?;
    assert_eq!(stored.len(), 1);
    assert!(!stored[0].is_approved);
    assert_eq!(
        stored[0].event_date,
        NaiveDate::from_ymd_opt(2026, 11, 20)
            .unwrap()
            .and_hms_opt(18, 30, 0)
            .unwrap()
    );

    let response = list(State(state)).await.unwrap().into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let events: Vec<kigg::model::event::UpcomingEventDto> = serde_json::from_slice(
        &axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap(),
    )
    .unwrap();
    assert!(events.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect the first invalid field of a submission to be reported
async fn rejects_invalid_submissions() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!(entity::prelude::UpcomingEvent)?;

    let cases: Vec<(fn(&mut EventForm), &str)> = vec![
        (
            |form| form.event_user_email = None,
            "Adres e-mail nie może być pusty.",
        ),
        (
            |form| form.event_user_email = Some("organizer".to_string()),
            "Niepoprawny adres e-mail.",
        ),
        (
            |form| form.event_link = Some("example.com".to_string()),
            "Niepoprawny link wydarzenia.",
        ),
        (
            |form| form.event_name = Some(" ".to_string()),
            "Nazwa wydarzenia nie może być pusta.",
        ),
        (
            |form| form.event_date = Some("20.11.2026".to_string()),
            "Niepoprawna data wydarzenia.",
        ),
        (
            |form| form.event_place = None,
            "Miejsce wydarzenia nie może być puste.",
        ),
        (
            |form| form.event_lead = None,
            "Opis wydarzenia nie może być pusty.",
        ),
    ];

    for (change, expected) in cases {
        let (state, _) = test.into_app_state().await;
        let mut form = event_form();
        change(&mut form);

        let result = submit(State(state), Form(form)).await;

        assert!(!result.0.is_successful);
        assert_eq!(result.0.error_message.as_deref(), Some(expected));
    }

    assert!(entity::prelude::UpcomingEvent::find()
        .all(&test.db)
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
/// Expect an administrator's edit to replace the details and approve the event
async fn administrator_approves_event() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!(entity::prelude::UpcomingEvent)?;
    let event = test
        .event()
        .insert_event("Stara nazwa", Utc::now().naive_utc() + Duration::days(3), false)
        .await?;
    sign_in_administrator(&mut test).await?;
    let (state, _) = test.into_app_state().await;

    let mut form = event_form();
    form.id = Some(shrink(event.id));
    form.is_approved = Some("true,false".to_string());
    let result = edit(State(state), test.session.clone(), Form(form)).await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);
    let stored = entity::prelude::UpcomingEvent::find_by_id(event.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.event_name, "Meetup");
    assert!(stored.is_approved);

    Ok(())
}

#[tokio::test]
/// Expect editing and deleting to be refused to anyone but administrators
async fn event_changes_require_administrator() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!(entity::prelude::UpcomingEvent)?;
    let event = test
        .event()
        .insert_event("Meetup", Utc::now().naive_utc(), false)
        .await?;
    let member = test.user().insert_user("janek", "janek@kigg.pl").await?;

    let (state, _) = test.into_app_state().await;
    let mut form = event_form();
    form.id = Some(shrink(event.id));
    let anonymous = edit(State(state), test.session.clone(), Form(form.clone())).await;
    assert_eq!(
        anonymous.0.error_message.as_deref(),
        Some("Nie jesteś zalogowany.")
    );

    SessionUserId::insert(&test.session, member.id, false)
        .await
        .unwrap();
    let (state, _) = test.into_app_state().await;
    let edited = edit(State(state.clone()), test.session.clone(), Form(form)).await;
    let deleted = delete(
        State(state),
        test.session.clone(),
        Form(IdForm {
            id: Some(shrink(event.id)),
        }),
    )
    .await;

    for result in [edited, deleted] {
        assert!(!result.0.is_successful);
        assert_eq!(
            result.0.error_message.as_deref(),
            Some("Nie masz praw do wywoływania tej metody.")
        );
    }
    let stored = entity::prelude::UpcomingEvent::find_by_id(event.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.event_name, "Meetup");

    Ok(())
}

#[tokio::test]
/// Expect an administrator to delete an event, then get an error for the second attempt
async fn administrator_deletes_event() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!(entity::prelude::UpcomingEvent)?;
    let event = test
        .event()
        .insert_event("Meetup", Utc::now().naive_utc(), true)
        .await?;
    sign_in_administrator(&mut test).await?;
    let (state, _) = test.into_app_state().await;
    let form = || {
        Form(IdForm {
            id: Some(shrink(event.id)),
        })
    };

    let first = delete(State(state.clone()), test.session.clone(), form()).await;
    let second = delete(State(state), test.session.clone(), form()).await;

    assert!(first.0.is_successful, "{:?}", first.0.error_message);
    assert_eq!(
        second.0.error_message.as_deref(),
        Some("Podane wydarzenie nie istnieje.")
    );
    assert!(entity::prelude::UpcomingEvent::find()
        .all(&test.db)
        .await?
        .is_empty());

    Ok(())
}

#[tokio::test]
/// Expect the unapproved count for administrators, 401 when signed out and 403 for members
async fn counts_unapproved_events() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!(entity::prelude::UpcomingEvent)?;
    test.event()
        .insert_event("Meetup", Utc::now().naive_utc(), false)
        .await?;
    test.event()
        .insert_event("Konferencja", Utc::now().naive_utc(), true)
        .await?;
    let member = test.user().insert_user("janek", "janek@kigg.pl").await?;

    let (state, _) = test.into_app_state().await;
    let response = count_unapproved(State(state), test.session.clone())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    SessionUserId::insert(&test.session, member.id, false)
        .await
        .unwrap();
    let (state, _) = test.into_app_state().await;
    let response = count_unapproved(State(state), test.session.clone())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::FORBIDDEN);

    sign_in_administrator(&mut test).await?;
    let (state, _) = test.into_app_state().await;
    let response = count_unapproved(State(state), test.session.clone())
        .await
        .into_response();
    assert_eq!(response.status(), StatusCode::OK);
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let count: kigg::model::event::UnapprovedEventCountDto = serde_json::from_slice(&body).unwrap();
    assert_eq!(count.count, 1);

    Ok(())
}
