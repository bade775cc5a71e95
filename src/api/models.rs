//! API request and response models

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Envelope returned by every echo route
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, ToSchema)]
pub struct MessageResponse {
    /// Human readable echo of the received parameters
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// JSON body accepted by the `/item` write routes.
///
/// Both fields are optional; a missing field is echoed as the absent placeholder.
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ItemPayload {
    /// Item name
    #[serde(default)]
    pub name: Option<String>,

    /// Item value, any JSON scalar
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub value: Option<serde_json::Value>,
}

/// Error body returned for rejected requests
#[derive(Debug, Clone, Deserialize, Serialize, ToSchema)]
pub struct ErrorResponse {
    pub error: String,
}
