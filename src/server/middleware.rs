//! Request middleware.

use axum::{
    extract::{Request, State},
    middleware::Next,
    response::{IntoResponse, Response},
};

use crate::server::{
    controller::util::client_ip::ClientIp, error::auth::AuthError, model::app::AppState,
};

/// Refuses requests whose client address an administrator blocked.
pub async fn block_blocked_ips(
    State(state): State<AppState>,
    ClientIp(ip_address): ClientIp,
    request: Request,
    next: Next,
) -> Response {
    if let Some(ip_address) = ip_address {
        if state.blocked_ips.contains(&ip_address).await {
            return AuthError::IpBlocked(ip_address).into_response();
        }
    }

    next.run(request).await
}
