use axum::{
    extract::{Query, State},
    http::{
        header::{COOKIE, REFERER},
        HeaderMap, HeaderValue, StatusCode,
    },
};
use entity::user::Role;
use kigg::server::{
    controller::{
        auth::openid::{openid, OpenIdParams, OPENID_FAILED_MESSAGE},
        util::client_ip::ClientIp,
    },
    model::session::{auth::SessionAuthCsrf, user::SessionUserId},
};
use sea_orm::{ColumnTrait, EntityTrait, QueryFilter};
use tower_sessions::Expiry;
use url::form_urlencoded;

use super::*;
use crate::util::{location, notification, response_cookies};

fn callback_params(state: &str) -> OpenIdParams {
    OpenIdParams {
        code: Some("authorization_code".to_string()),
        state: Some(state.to_string()),
        ..Default::default()
    }
}

#[tokio::test]
/// Expect an empty 200 response without an identifier
async fn returns_empty_response_without_identifier() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    for identifier in [None, Some("   "), Some("jan kowalski")] {
        let (state, _) = test.into_app_state().await;
        let params = OpenIdParams {
            identifier: identifier.map(str::to_string),
            ..Default::default()
        };

        let response = openid(
            State(state),
            test.session.clone(),
            ClientIp(None),
            HeaderMap::new(),
            Query(params),
        )
        .await
        .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    assert!(SessionAuthCsrf::get(&test.session).await.is_err());

    Ok(())
}

#[tokio::test]
/// Expect a redirect to the provider with the CSRF state stored and flow cookies set
async fn redirects_to_provider() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, _) = test.into_app_state().await;

    let mut headers = HeaderMap::new();
    headers.insert(
        REFERER,
        HeaderValue::from_static("http://localhost:8080/Users/List?page=2"),
    );
    let params = OpenIdParams {
        identifier: Some("jan@example.com".to_string()),
        remember_me: Some("true".to_string()),
        ..Default::default()
    };

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(None),
        headers,
        Query(params),
    )
    .await
    .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    let redirect = url::Url::parse(&location(&response).unwrap()).unwrap();
    assert!(redirect
        .as_str()
        .starts_with(&test.server_endpoint(constant::TEST_OPENID_AUTH_PATH)));

    let query: Vec<(String, String)> = redirect.query_pairs().into_owned().collect();
    let stored_state = SessionAuthCsrf::get(&test.session).await.unwrap();
    assert!(query.contains(&("state".to_string(), stored_state)));
    assert!(query.contains(&("login_hint".to_string(), "jan@example.com".to_string())));

    let cookies = response_cookies(&response);
    assert!(cookies
        .iter()
        .any(|cookie| cookie.name() == "oidr" && cookie.value() == "True"));
    assert!(cookies.iter().any(|cookie| cookie.name() == "returnUrl"));

    Ok(())
}

#[tokio::test]
/// Expect a foreign referer not to become the return URL
async fn ignores_foreign_referer() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, _) = test.into_app_state().await;

    let mut headers = HeaderMap::new();
    headers.insert(REFERER, HeaderValue::from_static("https://evil.example/"));
    let params = OpenIdParams {
        identifier: Some("jan@example.com".to_string()),
        ..Default::default()
    };

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(None),
        headers,
        Query(params),
    )
    .await
    .unwrap();

    assert!(response_cookies(&response).is_empty());

    Ok(())
}

#[tokio::test]
/// Expect a first OpenID sign in to register an active member and sign them in
async fn registers_and_signs_in_new_member() -> Result<(), TestError> {
    let test = TestBuilder::new()
        .with_user_tables()
        .with_openid_endpoints("abc123", Some("anna@example.com"), 1)
        .build()
        .await?;
    let (state, _) = test.into_app_state().await;
    let mut events = state.events.subscribe();
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let return_url = "http://localhost:8080/Users/List?page=2";
    let encoded: String = form_urlencoded::byte_serialize(return_url.as_bytes()).collect();
    let mut headers = HeaderMap::new();
    headers.insert(
        COOKIE,
        HeaderValue::from_str(&format!("oidr=True; returnUrl={}", encoded)).unwrap(),
    );

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(Some("10.0.0.5".to_string())),
        headers,
        Query(callback_params("csrf_state")),
    )
    .await
    .unwrap();

    test.assert_mocks();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response).as_deref(), Some(return_url));
    assert!(notification(&response).is_none());

    // Both flow cookies are expired
    let expired: Vec<String> = response_cookies(&response)
        .into_iter()
        .filter(|cookie| cookie.value().is_empty())
        .map(|cookie| cookie.name().to_string())
        .collect();
    assert_eq!(expired, vec!["oidr", "returnUrl"]);

    let claimed_identifier = format!("{}/abc123", test.server_url());
    let user = entity::prelude::User::find()
        .filter(entity::user::Column::UserName.eq(&claimed_identifier))
        .one(&test.db)
        .await?
        .unwrap();
    assert!(user.is_active);
    assert!(user.password.is_none());
    assert_eq!(user.email, "anna@example.com");

    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), Some(user.id));
    assert!(matches!(
        test.session.expiry(),
        Some(Expiry::OnInactivity(_))
    ));
    assert!(events.try_recv().is_ok());

    Ok(())
}

#[tokio::test]
/// Expect a returning member's new email to be stored
async fn updates_email_of_returning_member() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .with_openid_endpoints("abc123", Some("nowy@example.com"), 1)
        .build()
        .await?;
    let claimed_identifier = format!("{}/abc123", test.server_url());
    let user = test
        .user()
        .insert_openid_user(&claimed_identifier, "stary@example.com")
        .await?;
    let (state, _) = test.into_app_state().await;
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(None),
        HeaderMap::new(),
        Query(callback_params("csrf_state")),
    )
    .await
    .unwrap();

    assert_eq!(location(&response).as_deref(), Some("/"));
    assert!(notification(&response).is_none());

    let stored = entity::prelude::User::find_by_id(user.id)
        .one(&test.db)
        .await?
        .unwrap();
    assert_eq!(stored.email, "nowy@example.com");
    assert_eq!(entity::prelude::User::find().all(&test.db).await?.len(), 1);

    Ok(())
}

#[tokio::test]
/// Expect a locked member to be refused with a notification
async fn refuses_locked_member() -> Result<(), TestError> {
    let mut test = TestBuilder::new()
        .with_user_tables()
        .with_openid_endpoints("abc123", None, 1)
        .build()
        .await?;
    let claimed_identifier = format!("{}/abc123", test.server_url());
    test.user()
        .insert_custom_user(
            &claimed_identifier,
            constant::TEST_DEFAULT_OPENID_EMAIL,
            None,
            Role::User,
            true,
            true,
        )
        .await?;
    let (state, _) = test.into_app_state().await;
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(None),
        HeaderMap::new(),
        Query(callback_params("csrf_state")),
    )
    .await
    .unwrap();

    assert_eq!(
        notification(&response),
        Some((
            "Twoje konto jest obecnie zablokowane. Skontaktuj się z nami w tej sprawie."
                .to_string(),
            true
        ))
    );
    assert_eq!(SessionUserId::get(&test.session).await.unwrap(), None);

    Ok(())
}

#[tokio::test]
/// Expect the provider's error description to be shown and the CSRF state dropped when sign in
/// was refused
async fn reports_provider_error() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;

    let cases = [
        (Some("Użytkownik anulował logowanie."), "Użytkownik anulował logowanie."),
        (None, OPENID_FAILED_MESSAGE),
    ];

    for (description, expected) in cases {
        let (state, _) = test.into_app_state().await;
        SessionAuthCsrf::insert(&test.session, "csrf_state")
            .await
            .unwrap();
        let params = OpenIdParams {
            error: Some("access_denied".to_string()),
            error_description: description.map(str::to_string),
            ..Default::default()
        };

        let response = openid(
            State(state),
            test.session.clone(),
            ClientIp(None),
            HeaderMap::new(),
            Query(params),
        )
        .await
        .unwrap();

        assert_eq!(location(&response).as_deref(), Some("/"));
        assert_eq!(notification(&response), Some((expected.to_string(), true)));
        assert!(SessionAuthCsrf::get(&test.session).await.is_err());
    }

    Ok(())
}

#[tokio::test]
/// Expect a mismatched CSRF state to stop the sign in before the provider is called
async fn rejects_mismatched_state() -> Result<(), TestError> {
    let test = test_setup_with_user_tables!()?;
    let (state, _) = test.into_app_state().await;
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(None),
        HeaderMap::new(),
        Query(callback_params("other_state")),
    )
    .await
    .unwrap();

    assert_eq!(
        notification(&response),
        Some((
            "Wystąpił problem podczas logowania, spróbuj ponownie.".to_string(),
            true
        ))
    );
    assert!(entity::prelude::User::find().all(&test.db).await?.is_empty());

    Ok(())
}

#[tokio::test]
/// Expect a rejected authorization code to be reported with the default message
async fn reports_rejected_code() -> Result<(), TestError> {
    let mut test = test_setup_with_user_tables!()?;
    let token = test.openid().create_token_error_endpoint(1);
    let (state, _) = test.into_app_state().await;
    SessionAuthCsrf::insert(&test.session, "csrf_state")
        .await
        .unwrap();

    let response = openid(
        State(state),
        test.session.clone(),
        ClientIp(None),
        HeaderMap::new(),
        Query(callback_params("csrf_state")),
    )
    .await
    .unwrap();

    token.assert();
    assert_eq!(
        notification(&response),
        Some((OPENID_FAILED_MESSAGE.to_string(), true))
    );

    Ok(())
}
