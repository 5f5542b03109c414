//! HTTP routing and OpenAPI documentation configuration.
//!
//! This module defines the application's HTTP routes and generates OpenAPI documentation
//! using utoipa. All endpoints are registered here with their OpenAPI specifications,
//! and Swagger UI is configured to provide interactive API documentation at `/api/docs`.

use axum::{middleware::from_fn_with_state, Router};
use utoipa::OpenApi;
use utoipa_axum::{router::OpenApiRouter, routes};
use utoipa_swagger_ui::SwaggerUi;

use crate::server::{controller, middleware::block_blocked_ips, model::app::AppState};

/// Builds the application's HTTP router with all endpoints and Swagger UI documentation.
///
/// Route paths keep the site's historical casing (`/Signup`, `/Users/List`), the pages and
/// scripts link to them directly.
///
/// # Registered Endpoints
/// - `GET /OpenId` - Sign in through an OpenID provider
/// - `POST /Signup`, `GET /Activate/{id}` - Registration and activation
/// - `POST /Login`, `POST /Logout` - Password sign in and sign out
/// - `POST /ForgotPassword`, `POST /ChangePassword`, `POST /ChangeEmail` - Account management
/// - `POST /ChangeRole`, `POST /Lock`, `POST /Unlock`, `POST /AllowIps` - Administration
/// - `GET /Users`, `GET /Users/List`, `GET /Users/{name}`, `GET /Menu` - Member pages
/// - `POST /Recomend` - Recommendations
/// - `GET|POST /Events`, `POST /Events/Edit`, `POST /Events/Delete`,
///   `GET /Events/Unapproved` - Upcoming events
///
/// # Returns
/// An Axum `Router<AppState>`, the caller provides the state and the session layer.
pub fn routes() -> Router<AppState> {
    #[derive(OpenApi)]
    #[openapi(info(title = "Kigg", description = "Kigg membership API"), tags(
        (name = controller::auth::AUTH_TAG, description = "Registration and sign in routes"),
        (name = controller::account::ACCOUNT_TAG, description = "Account management routes"),
        (name = controller::admin::ADMIN_TAG, description = "Member administration routes"),
        (name = controller::user::USER_TAG, description = "Member pages"),
        (name = controller::recommendation::RECOMMENDATION_TAG, description = "Recommendation routes"),
        (name = controller::event::EVENT_TAG, description = "Upcoming event routes"),
    ))]
    struct ApiDoc;

    let (routes, api) = OpenApiRouter::with_openapi(ApiDoc::openapi())
        .routes(routes!(controller::auth::openid::openid))
        .routes(routes!(controller::auth::signup::signup))
        .routes(routes!(controller::auth::signup::activate))
        .routes(routes!(controller::auth::login::login))
        .routes(routes!(controller::auth::login::logout))
        .routes(routes!(controller::account::forgot_password))
        .routes(routes!(controller::account::change_password))
        .routes(routes!(controller::account::change_email))
        .routes(routes!(controller::admin::change_role))
        .routes(routes!(controller::admin::lock))
        .routes(routes!(controller::admin::unlock))
        .routes(routes!(controller::admin::allow_ips))
        .routes(routes!(controller::user::list_redirect))
        .routes(routes!(controller::user::list))
        .routes(routes!(controller::user::detail))
        .routes(routes!(controller::user::menu))
        .routes(routes!(controller::recommendation::recommend))
        .routes(routes!(
            controller::event::list,
            controller::event::submit
        ))
        .routes(routes!(controller::event::edit))
        .routes(routes!(controller::event::delete))
        .routes(routes!(controller::event::count_unapproved))
        .split_for_parts();

    routes.merge(SwaggerUi::new("/api/docs").url("/api/docs/openapi.json", api))
}

/// Routes with their state and the blocked IP check applied.
pub fn app(state: AppState) -> Router {
    routes()
        .layer(from_fn_with_state(state.clone(), block_blocked_ips))
        .with_state(state)
}
