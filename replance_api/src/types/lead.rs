//! Lead-capture payloads for `/api/send-email`.

use serde::{Deserialize, Serialize};

/// Preferences submitted from the lead form.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadRequest {
    pub name: String,
    pub email: String,
    pub hobbies: String,
    pub artist: String,
    pub movie: String,
}

/// Backend reply. A missing `success` field counts as failure.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Default)]
pub struct LeadResponse {
    #[serde(default)]
    pub success: bool,
    /// Personalised message the backend composed, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub generated_text: Option<String>,
}
