use axum::Json;

use crate::{
    model::api::JsonViewData,
    server::error::{unknown_error_message, Error},
};

/// Converts the outcome of a form handler into the JSON envelope.
///
/// Membership rule violations carry their message to the visitor. Anything else is logged and
/// reported as an unknown error during `action`.
pub fn view_data(result: Result<(), Error>, action: &str) -> Json<JsonViewData> {
    match result {
        Ok(()) => Json(JsonViewData::success()),
        Err(Error::DomainError(err)) => Json(JsonViewData::failure(err.to_string())),
        Err(err) => {
            tracing::error!("Failed during {}: {}", action, err);

            Json(JsonViewData::failure(unknown_error_message(action)))
        }
    }
}

/// Reads a checkbox-style form flag.
///
/// Browsers post a checked checkbox followed by its hidden fallback (`true,false`), so only the
/// first value counts.
pub fn parse_flag(value: Option<&str>) -> bool {
    value
        .and_then(|value| value.split(',').next())
        .map(str::trim)
        .is_some_and(|value| value.eq_ignore_ascii_case("true") || value == "on")
}
