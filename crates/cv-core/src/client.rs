//! Verification service client

use crate::{ClaimRequest, ClientConfig, VerificationResult, VerifyError, VerifyResult};
use async_trait::async_trait;
use url::Url;

/// Something that can turn a claim into a verdict.
///
/// Futures are not required to be `Send`: the browser runtime is single
/// threaded and the request future there holds JS handles.
#[async_trait(?Send)]
pub trait Verifier {
    async fn verify(&self, claim: &str) -> VerifyResult<VerificationResult>;
}

/// Calls `POST {base}/validate_claim` over HTTP.
#[derive(Debug, Clone)]
pub struct HttpVerifier {
    client: reqwest::Client,
    endpoint: Url,
}

impl HttpVerifier {
    pub fn new(config: &ClientConfig) -> Self {
        Self::with_client(reqwest::Client::new(), config)
    }

    pub fn with_client(client: reqwest::Client, config: &ClientConfig) -> Self {
        Self {
            client,
            endpoint: config.endpoint().clone(),
        }
    }
}

#[async_trait(?Send)]
impl Verifier for HttpVerifier {
    async fn verify(&self, claim: &str) -> VerifyResult<VerificationResult> {
        tracing::debug!("Submitting claim to {}", self.endpoint);

        let body = ClaimRequest {
            input: claim.to_string(),
        };

        // `.json()` sets `Content-Type: application/json`
        let response = self
            .client
            .post(self.endpoint.clone())
            .json(&body)
            .send()
            .await
            .map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            tracing::warn!("Verification service responded with {}", status);
            return Err(VerifyError::Rejected {
                status: status.as_u16(),
            });
        }

        let result = response
            .json::<VerificationResult>()
            .await
            .map_err(classify)?;

        tracing::debug!("Verification received for claim ({} chars)", result.claim.len());
        Ok(result)
    }
}

fn classify(err: reqwest::Error) -> VerifyError {
    if err.is_builder() {
        tracing::warn!("Could not build verification request: {}", err);
        return VerifyError::Unknown;
    }

    tracing::warn!("Verification request failed: {}", err);
    VerifyError::Transport(err.to_string())
}
