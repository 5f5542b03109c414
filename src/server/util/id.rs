//! Short identifiers used in activation links and profile URLs.

use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine};
use uuid::Uuid;

/// Encodes an ID as 22 URL-safe base64 characters.
pub fn shrink(id: Uuid) -> String {
    URL_SAFE_NO_PAD.encode(id.as_bytes())
}

/// Parses an ID from its shortened form or its hyphenated form.
///
/// Returns `None` for anything that isn't an ID, including the nil ID.
pub fn parse_id(value: &str) -> Option<Uuid> {
    let value = value.trim();

    let id = if value.len() == 22 {
        URL_SAFE_NO_PAD
            .decode(value)
            .ok()
            .and_then(|bytes| Uuid::from_slice(&bytes).ok())
    } else {
        Uuid::parse_str(value).ok()
    };

    id.filter(|id| !id.is_nil())
}
