use axum::{extract::State, Form};
use kigg::{
    model::form::LoginForm,
    server::{
        controller::{auth::login::login, util::client_ip::ClientIp},
        model::session::user::SessionUserId,
    },
};
use tower_sessions::Expiry;

use super::*;

fn form(user_name: &str, password: &str) -> LoginForm {
    LoginForm {
        user_name: Some(user_name.to_string()),
        password: Some(password.to_string()),
        remember_me: None,
    }
}

#[tokio::test]
/// Expect correct credentials to sign the member in and record their address
async fn signs_in_with_correct_credentials() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let user = test.user().insert_user("janek", "janek@kigg.pl").await?;
    let (state, _) = test.into_app_state().await;

    let result = login(
        State(state),
        test.session.clone(),
        ClientIp(Some("10.0.0.1".to_string())),
        Form(form("janek", constant::TEST_PASSWORD)),
    )
    .await;

    assert!(result.0.is_successful, "{:?}", result.0.error_message);
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));
    assert_eq!(test.session.expiry(), Some(Expiry::OnSessionEnd));

    let addresses = kigg::server::data::user::ip_address::UserIpAddressRepository::new(&test.db)
        .get_by_user_id(user.id)
        .await?;
    assert_eq!(addresses, vec!["10.0.0.1"]);

    Ok(())
}

#[tokio::test]
/// Expect remember-me to keep the session alive across browser sessions
async fn remember_me_extends_session() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    test.user().insert_user("janek", "janek@kigg.pl").await?;
    let (state, _) = test.into_app_state().await;

    let result = login(
        State(state),
        test.session.clone(),
        ClientIp(None),
        Form(LoginForm {
            remember_me: Some("true".to_string()),
            ..form("janek", constant::TEST_PASSWORD)
        }),
    )
    .await;

    assert!(result.0.is_successful);
    assert!(matches!(
        test.session.expiry(),
        Some(Expiry::OnInactivity(_))
    ));

    Ok(())
}

#[tokio::test]
/// Expect a wrong password to fail without signing in
async fn rejects_wrong_password() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    test.user().insert_user("janek", "janek@kigg.pl").await?;
    let (state, _) = test.into_app_state().await;

    let result = login(
        State(state),
        test.session.clone(),
        ClientIp(None),
        Form(form("janek", "zlehaslo")),
    )
    .await;

    assert!(!result.0.is_successful);
    assert_eq!(
        result.0.error_message.as_deref(),
        Some("Niepoprawne dane zalogowania.")
    );
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

#[tokio::test]
/// Expect locked and inactive accounts to be refused even with the right password
async fn rejects_locked_and_inactive_accounts() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    test.user().insert_locked_user("zablokowany", "z@kigg.pl").await?;
    test.user()
        .insert_inactive_user("nieaktywny", "n@kigg.pl")
        .await?;

    let cases = [
        (
            "zablokowany",
            "Twoje konto jest aktualnie zablokowane. Skontaktuj się z pomocą aby rozwiązać ten problem.",
        ),
        (
            "nieaktywny",
            "Twoje konto nie zostało jeszcze aktywowane. Posłuż się linkiem aktywacyjnym z wiadomości rejestracyjnej aby aktywować konto.",
        ),
    ];

    for (user_name, expected) in cases {
        let (state, _) = test.into_app_state().await;

        let result = login(
            State(state),
            test.session.clone(),
            ClientIp(None),
            Form(form(user_name, constant::TEST_PASSWORD)),
        )
        .await;

        assert!(!result.0.is_successful);
        assert_eq!(result.0.error_message.as_deref(), Some(expected));
    }

    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

#[tokio::test]
/// Expect blank fields to be reported before credentials are checked
async fn rejects_blank_fields() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let cases = [
        (form(" ", "sekret"), "Nazwa użytkownika nie może być pusta."),
        (form("janek", ""), "Hasło nie może być puste."),
    ];

    for (form, expected) in cases {
        let (state, _) = test.into_app_state().await;

        let result = login(State(state), test.session.clone(), ClientIp(None), Form(form)).await;

        assert_eq!(result.0.error_message.as_deref(), Some(expected));
    }

    Ok(())
}
