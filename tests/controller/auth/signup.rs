use axum::{extract::State, Form};
use kigg::{model::form::SignupForm, server::controller::auth::signup::signup};
use sea_orm::EntityTrait;

use super::*;

fn form(user_name: &str, password: &str, email: &str) -> SignupForm {
    SignupForm {
        user_name: Some(user_name.to_string()),
        password: Some(password.to_string()),
        email: Some(email.to_string()),
    }
}

#[tokio::test]
/// Expect one inactive user and one registration email with the activation link
async fn registers_user_and_sends_one_email() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, outbox) = test.into_app_state().await;

    let result = signup(
        State(state),
        Form(form("jan_kowalski", " sekret ", " jan@kigg.pl ")),
    )
    .await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);

    let users = entity::prelude::User::find().all(&test.db).await?;
    assert_eq!(users.len(), 1);
    assert_eq!(users[0].user_name, "jan_kowalski");
    assert_eq!(users[0].email, "jan@kigg.pl");
    assert!(!users[0].is_active);
    assert!(users[0].password.is_some());

    let sent = outbox.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "jan@kigg.pl");
    assert!(sent[0]
        .body
        .contains(&format!("{}/Activate/", constant::TEST_ROOT_URL)));

    Ok(())
}

#[tokio::test]
/// Expect each malformed form to be rejected with its own message and nothing stored
async fn rejects_malformed_input() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let cases = [
        (
            form("", "sekret", "jan@kigg.pl"),
            "Nazwa użytkownika nie może być pusta.",
        ),
        (
            form("jan", "sekret", "jan@kigg.pl"),
            "Nazwa użytkownika nie może być krótsza niż 4 znaki.",
        ),
        (
            form("1janek", "sekret", "jan@kigg.pl"),
            "Nazwa użytkownika może zawierać znaki i cyfry i zaczynać się literą. Dopuszczalne znaki specjalne: -,_.",
        ),
        (
            form("janek", "   ", "jan@kigg.pl"),
            "Hasło nie może być puste.",
        ),
        (
            form("janek", "abc", "jan@kigg.pl"),
            "Hasło nie może być krótsze niż 4 znaków.",
        ),
        (form("janek", "sekret", ""), "Adres e-mail nie może być pusty."),
        (
            form("janek", "sekret", "jan.kigg.pl"),
            "Niepoprawny adres e-mail.",
        ),
        (
            SignupForm::default(),
            "Nazwa użytkownika nie może być pusta.",
        ),
    ];

    for (form, expected) in cases {
        let (state, outbox) = test.into_app_state().await;

        let result = signup(State(state), Form(form)).await;

        assert!(!result.0.is_successful);
        assert_eq!(result.0.error_message.as_deref(), Some(expected));
        assert!(outbox.sent().await.is_empty());
    }

    assert!(entity::prelude::User::find().all(&test.db).await?.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect a taken user name to be reported without sending email
async fn rejects_taken_user_name() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    test.user().insert_user("janek", "janek@kigg.pl").await?;
    let (state, outbox) = test.into_app_state().await;

    let result = signup(State(state), Form(form("janek", "sekret", "inny@kigg.pl"))).await;

    assert!(!result.0.is_successful);
    assert_eq!(
        result.0.error_message.as_deref(),
        Some("Nazwa użytkownika \"janek\" jest już zajęta. Podaj inną nazwę użytkownika.")
    );
    assert!(outbox.sent().await.is_empty());

    Ok(())
}
