//! Google reCAPTCHA token verification.
//!
//! Reference: https://developers.google.com/recaptcha/docs/verify

use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use tracing::{error, info, warn};

use super::{CaptchaVerifier, Verification};
use crate::error::VerificationError;

/// Body returned by the siteverify endpoint.
///
/// `score` and `action` are only present for v3 keys.
#[derive(Debug, Clone, Deserialize)]
pub struct RecaptchaResponse {
    pub success: bool,
    #[serde(default)]
    pub score: Option<f64>,
    #[serde(default)]
    pub action: Option<String>,
    #[serde(default)]
    pub hostname: Option<String>,
    #[serde(default)]
    pub challenge_ts: Option<String>,
    #[serde(default, rename = "error-codes")]
    pub error_codes: Vec<String>,
}

impl RecaptchaResponse {
    /// Turn the raw response into a verdict, applying an optional v3 score floor.
    pub fn verdict(&self, min_score: Option<f64>) -> Verification {
        if !self.success {
            return Verification::Rejected(self.error_codes.clone());
        }

        match (self.score, min_score) {
            (Some(score), Some(min)) if score < min => {
                Verification::Rejected(vec![format!("score-below-threshold:{}", score)])
            }
            _ => Verification::Verified,
        }
    }
}

/// HTTP client for the siteverify endpoint. One request per call, no retries.
#[derive(Clone)]
pub struct RecaptchaVerifier {
    client: Client,
    verify_url: String,
    min_score: Option<f64>,
}

impl RecaptchaVerifier {
    pub fn new(verify_url: String, timeout: Duration, min_score: Option<f64>) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client,
            verify_url,
            min_score,
        })
    }
}

#[async_trait]
impl CaptchaVerifier for RecaptchaVerifier {
    async fn verify(&self, secret: &str, token: &str) -> Result<Verification, VerificationError> {
        info!(
            verify_url = %self.verify_url,
            token_length = token.len(),
            "captcha_verify_starting"
        );

        let response = self
            .client
            .get(&self.verify_url)
            .query(&[("secret", secret), ("response", token)])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    error!(error = %e, "captcha_verify_timeout");
                } else {
                    error!(error = %e, "captcha_verify_request_error");
                }
                VerificationError::Transport(e.to_string())
            })?;

        let status = response.status();
        if !status.is_success() {
            warn!(status_code = status.as_u16(), "captcha_verify_bad_status");
            return Err(VerificationError::Transport(format!(
                "unexpected status {}",
                status
            )));
        }

        let body: RecaptchaResponse = response.json().await.map_err(|e| {
            error!(error = %e, "captcha_verify_decode_error");
            VerificationError::Decode(e.to_string())
        })?;

        let verdict = body.verdict(self.min_score);

        info!(
            success = body.success,
            score = ?body.score,
            action = ?body.action,
            hostname = ?body.hostname,
            error_codes = ?body.error_codes,
            verified = matches!(verdict, Verification::Verified),
            "captcha_verify_complete"
        );

        Ok(verdict)
    }
}
