use axum::{extract::State, Form};
use kigg::{
    model::form::{ChangePasswordForm, EmailForm},
    server::{
        controller::account::{change_email, change_password, forgot_password},
        model::session::user::SessionUserId,
        util::password::verify_password,
    },
};
use sea_orm::EntityTrait;

use super::*;

fn email_form(email: &str) -> EmailForm {
    EmailForm {
        email: Some(email.to_string()),
    }
}

fn password_form(old: &str, new: &str, confirm: &str) -> ChangePasswordForm {
    ChangePasswordForm {
        old_password: Some(old.to_string()),
        new_password: Some(new.to_string()),
        confirm_password: Some(confirm.to_string()),
    }
}

#[tokio::test]
/// Expect a new password to be stored and mailed to the member
async fn forgot_password_mails_new_password() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test.user().insert_user("janek", "janek@kigg.pl").await?;
    let (state, outbox) = test.into_app_state().await;

    let result = forgot_password(State(state), Form(email_form("janek@kigg.pl"))).await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);

    let sent = outbox.sent().await;
    assert_eq!(sent.len(), 1);
    assert_eq!(sent[0].to, "janek@kigg.pl");

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();
    let hash = stored.password.unwrap();
    assert!(!verify_password(constant::TEST_PASSWORD, &hash).unwrap());

    Ok(())
}

#[tokio::test]
/// Expect malformed and unknown addresses to be reported
async fn forgot_password_rejects_bad_email() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let cases = [
        ("", "Pole e-mail nie może być puste."),
        ("janek", "Niepoprawny adres e-mail."),
        (
            "nikt@kigg.pl",
            "Nie znaleziono użytkownika z podanym adresem e-mail.",
        ),
    ];

    for (email, expected) in cases {
        let (state, outbox) = test.into_app_state().await;

        let result = forgot_password(State(state), Form(email_form(email))).await;

        assert_eq!(result.0.error_message.as_deref(), Some(expected));
        assert!(outbox.sent().await.is_empty());
    }

    Ok(())
}

#[tokio::test]
/// Expect the signed in member's password to change
async fn changes_password_of_signed_in_member() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test.user().insert_user("janek", "janek@kigg.pl").await?;
    let (state, _) = test.into_app_state().await;
    SessionUserId::insert(&test.session, user.id, false)
        .await
        .unwrap();

    let result = change_password(
        State(state),
        test.session.clone(),
        Form(password_form(constant::TEST_PASSWORD, "nowehaslo", "nowehaslo")),
    )
    .await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert!(verify_password("nowehaslo", &stored.password.unwrap()).unwrap());

    Ok(())
}

#[tokio::test]
/// Expect each invalid password change to be reported with its own message
async fn rejects_invalid_password_change() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test.user().insert_user("janek", "janek@kigg.pl").await?;
    SessionUserId::insert(&test.session, user.id, false)
        .await
        .unwrap();

    let cases = [
        (password_form("", "nowehaslo", "nowehaslo"), "Stare hasło nie może być puste."),
        (
            password_form("stare", "", ""),
            "Nowe hasło nie może być puste.",
        ),
        (
            password_form("stare", "abc", "abc"),
            "Nowe hasło nie może być krótsze niż 4 znaków.",
        ),
        (
            password_form("stare", "nowehaslo", "innehaslo"),
            "Nowe hasło i jego potwierdzenie są różne.",
        ),
        (
            password_form("zlehaslo", "nowehaslo", "nowehaslo"),
            "Stare hasło jest niepoprawne.",
        ),
    ];

    for (form, expected) in cases {
        let (state, _) = test.into_app_state().await;

        let result = change_password(State(state), test.session.clone(), Form(form)).await;

        assert_eq!(result.0.error_message.as_deref(), Some(expected));
    }

    Ok(())
}

#[tokio::test]
/// Expect a password change to require a signed in member
async fn password_change_requires_sign_in() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, _) = test.into_app_state().await;

    let result = change_password(
        State(state),
        test.session.clone(),
        Form(password_form("stare", "nowehaslo", "nowehaslo")),
    )
    .await;

    assert_eq!(
        result.0.error_message.as_deref(),
        Some("Nie jesteś zalogowany.")
    );

    Ok(())
}

#[tokio::test]
/// Expect the signed in member's email to change unless another member uses it
async fn changes_email_unless_taken() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test.user().insert_user("janek", "janek@kigg.pl").await?;
    test.user().insert_user("anna", "anna@kigg.pl").await?;
    SessionUserId::insert(&test.session, user.id, false)
        .await
        .unwrap();

    let (state, _) = test.into_app_state().await;
    let taken = change_email(
        State(state),
        test.session.clone(),
        Form(email_form("anna@kigg.pl")),
    )
    .await;
    assert!(!taken.0.is_successful);

    let (state, _) = test.into_app_state().await;
    let changed = change_email(
        State(state),
        test.session.clone(),
        Form(email_form("jan.nowy@kigg.pl")),
    )
    .await;
    assert!(changed.0.is_successful, "{:?}", changed.0.error_message);

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.email, "jan.nowy@kigg.pl");

    Ok(())
}
