//! Mock OpenID provider endpoints.

use mockito::Mock;

use crate::{
    constant::{TEST_OPENID_TOKEN_PATH, TEST_OPENID_USERINFO_PATH},
    TestContext,
};

impl TestContext {
    pub fn openid<'a>(&'a mut self) -> OpenIdFixtures<'a> {
        OpenIdFixtures { setup: self }
    }
}

pub struct OpenIdFixtures<'a> {
    setup: &'a mut TestContext,
}

impl<'a> OpenIdFixtures<'a> {
    /// Creates the token endpoint and a userinfo endpoint reporting `sub` and `email`.
    pub fn create_openid_endpoints(
        &mut self,
        sub: &str,
        email: Option<&str>,
        expected_requests: usize,
    ) -> (Mock, Mock) {
        let token = self.create_token_endpoint(expected_requests);

        let mut claims = serde_json::json!({ "sub": sub });
        if let Some(email) = email {
            claims["email"] = serde_json::Value::String(email.to_string());
        }

        let userinfo = self
            .setup
            .server
            .mock("GET", TEST_OPENID_USERINFO_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(claims.to_string())
            .expect(expected_requests)
            .create();

        (token, userinfo)
    }

    /// Creates a token endpoint issuing a bearer access token.
    pub fn create_token_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = serde_json::json!({
            "access_token": "mock_access_token",
            "token_type": "bearer",
            "expires_in": 3600
        });

        self.setup
            .server
            .mock("POST", TEST_OPENID_TOKEN_PATH)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }

    /// Creates a token endpoint rejecting the authorization code.
    pub fn create_token_error_endpoint(&mut self, expected_requests: usize) -> Mock {
        let body = serde_json::json!({
            "error": "invalid_grant",
            "error_description": "Authorization code expired"
        });

        self.setup
            .server
            .mock("POST", TEST_OPENID_TOKEN_PATH)
            .with_status(400)
            .with_header("content-type", "application/json")
            .with_body(body.to_string())
            .expect(expected_requests)
            .create()
    }
}
