use serde::{Deserialize, Serialize};

/// The response when an error occurs with an API request
#[derive(Serialize, Deserialize, Debug, utoipa::ToSchema)]
pub struct ErrorDto {
    /// The error message
    pub error: String,
}

/// Envelope returned by every form-style POST endpoint.
///
/// Serialized as `{ "isSuccessful": bool, "errorMessage"?: string }`, the shape the site's
/// scripts expect.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq, Eq, utoipa::ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonViewData {
    pub is_successful: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl JsonViewData {
    pub fn success() -> Self {
        Self {
            is_successful: true,
            error_message: None,
        }
    }

    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            is_successful: false,
            error_message: Some(message.into()),
        }
    }
}
