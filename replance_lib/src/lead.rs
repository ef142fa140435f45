//! Lead-capture form: validation and submission to the email endpoint.

use replance_api::types::{LeadRequest, LeadResponse};
use replance_api::Client;

use crate::error::ReplanceError;
use crate::validation::{sanitize_text, validate_email, MAX_FIELD_LENGTH};

pub const SENT_MESSAGE: &str = "Email sent successfully!";
pub const REJECTED_MESSAGE: &str = "Failed to send email";
pub const ERROR_MESSAGE: &str = "Error sending email";

/// Raw form input, as typed by the user.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LeadForm {
    pub name: String,
    pub email: String,
    pub hobbies: String,
    pub artist: String,
    pub movie: String,
}

impl LeadForm {
    /// Checks every field and returns the cleaned request payload.
    pub fn validate(&self) -> Result<LeadRequest, ReplanceError> {
        Ok(LeadRequest {
            name: sanitize_text("name", &self.name, MAX_FIELD_LENGTH)?,
            email: validate_email(&self.email)?,
            hobbies: sanitize_text("hobbies", &self.hobbies, MAX_FIELD_LENGTH)?,
            artist: sanitize_text("artist", &self.artist, MAX_FIELD_LENGTH)?,
            movie: sanitize_text("movie", &self.movie, MAX_FIELD_LENGTH)?,
        })
    }
}

/// Result of a submission as the user sees it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Backend reported `success: true`.
    Sent { generated_text: Option<String> },
    /// Backend answered but reported failure.
    Rejected { generated_text: Option<String> },
    /// The request itself failed.
    Errored,
}

impl SubmitOutcome {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Sent { .. } => SENT_MESSAGE,
            Self::Rejected { .. } => REJECTED_MESSAGE,
            Self::Errored => ERROR_MESSAGE,
        }
    }

    pub fn generated_text(&self) -> Option<&str> {
        match self {
            Self::Sent { generated_text } | Self::Rejected { generated_text } => {
                generated_text.as_deref().filter(|t| !t.is_empty())
            }
            Self::Errored => None,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

impl From<LeadResponse> for SubmitOutcome {
    fn from(resp: LeadResponse) -> Self {
        if resp.success {
            Self::Sent {
                generated_text: resp.generated_text,
            }
        } else {
            Self::Rejected {
                generated_text: resp.generated_text,
            }
        }
    }
}

/// Posts a validated lead. Transport, status and parse failures all collapse
/// into [`SubmitOutcome::Errored`].
pub async fn submit(client: &Client, lead: &LeadRequest) -> SubmitOutcome {
    match client.send_email(lead).await {
        Ok(resp) => {
            tracing::info!(success = resp.success, "Lead submitted");
            resp.into()
        }
        Err(e) => {
            tracing::error!("Lead submission failed: {}", e);
            SubmitOutcome::Errored
        }
    }
}
