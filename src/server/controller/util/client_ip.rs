use std::{
    convert::Infallible,
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    extract::{ConnectInfo, FromRef, FromRequestParts},
    http::request::Parts,
};

use crate::server::model::app::Settings;

const X_FORWARDED_FOR: &str = "x-forwarded-for";

/// Address of the client that sent the request, when it can be determined.
///
/// The peer address of the connection is used unless the peer is one of the configured trusted
/// proxies. Then `X-Forwarded-For` is read from the right, skipping further trusted proxies, and
/// the first address a trusted proxy didn't add is the client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl<S> FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
    Arc<Settings>: FromRef<S>,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Some(peer) = parts
            .extensions
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| addr.ip())
        else {
            return Ok(Self(None));
        };

        let settings = Arc::<Settings>::from_ref(state);

        Ok(Self(Some(
            resolve_client(peer, parts, &settings.trusted_proxies).to_string(),
        )))
    }
}

fn resolve_client(peer: IpAddr, parts: &Parts, trusted_proxies: &[IpAddr]) -> IpAddr {
    if !trusted_proxies.contains(&peer) {
        return peer;
    }

    let forwarded: Vec<&str> = parts
        .headers
        .get_all(X_FORWARDED_FOR)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
        .collect();

    let mut client = peer;
    for entry in forwarded.into_iter().rev() {
        let Ok(address) = entry.parse::<IpAddr>() else {
            break;
        };

        client = address;
        if !trusted_proxies.contains(&address) {
            break;
        }
    }

    client
}
