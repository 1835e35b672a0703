//! Claim Verifier Core
//!
//! Shared pieces of the political claim verifier: the wire types exchanged
//! with the verification service, the error taxonomy shown to users, the
//! client configuration, and the form state machine that both front ends
//! render.

pub mod client;
pub mod config;
pub mod form;

use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use client::{HttpVerifier, Verifier};
pub use config::{ClientConfig, ConfigError, API_BASE_URL_ENV};
pub use form::{Attempt, ClaimForm, FormStatus, FormView, PendingSubmission};

/// Path of the verification endpoint, relative to the API base URL.
pub const VALIDATE_CLAIM_PATH: &str = "validate_claim";

/// Banner shown when the claim is empty or whitespace only.
pub const EMPTY_CLAIM_MESSAGE: &str = "Please enter a claim to verify.";

/// Banner shown for failures that do not fit any other category.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred.";

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum VerifyError {
    #[error("Please enter a claim to verify.")]
    EmptyClaim,

    #[error("Server responded with {status}")]
    Rejected { status: u16 },

    #[error("{0}")]
    Transport(String),

    #[error("An unknown error occurred.")]
    Unknown,
}

impl VerifyError {
    /// Text for the error banner.
    pub fn user_message(&self) -> String {
        match self {
            VerifyError::EmptyClaim => EMPTY_CLAIM_MESSAGE.to_string(),
            VerifyError::Rejected { .. } | VerifyError::Transport(_) => format!(
                "Failed to get verification. Is the backend server running? (Details: {})",
                self
            ),
            VerifyError::Unknown => UNKNOWN_ERROR_MESSAGE.to_string(),
        }
    }
}

pub type VerifyResult<T> = Result<T, VerifyError>;

/// Body of `POST /validate_claim`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClaimRequest {
    pub input: String,
}

/// Verdict returned by the verification service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub claim: String,
    pub verification: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rejected_message_embeds_status() {
        let message = VerifyError::Rejected { status: 503 }.user_message();
        assert_eq!(
            message,
            "Failed to get verification. Is the backend server running? (Details: Server responded with 503)"
        );
    }

    #[test]
    fn test_transport_message_hints_backend() {
        let message = VerifyError::Transport("connection refused".to_string()).user_message();
        assert!(message.contains("Is the backend server running?"));
        assert!(message.ends_with("(Details: connection refused)"));
    }

    #[test]
    fn test_plain_messages() {
        assert_eq!(VerifyError::EmptyClaim.user_message(), EMPTY_CLAIM_MESSAGE);
        assert_eq!(VerifyError::Unknown.user_message(), UNKNOWN_ERROR_MESSAGE);
    }

    #[test]
    fn test_request_wire_shape() {
        let body = serde_json::to_value(ClaimRequest {
            input: "Taxes were cut by 10%.".to_string(),
        })
        .unwrap();
        assert_eq!(body, serde_json::json!({ "input": "Taxes were cut by 10%." }));
    }
}
