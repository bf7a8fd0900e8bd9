//! External services the contact form depends on.
//!
//! Each service sits behind an async trait so the intake sequence can run
//! against AWS in production and against in-memory fakes in tests:
//! - `SecretStore`: SSM Parameter Store (`ssm`)
//! - `CaptchaVerifier`: Google reCAPTCHA siteverify (`recaptcha`)
//! - `NotificationPublisher`: SNS (`sns`)

pub mod recaptcha;
pub mod sns;
pub mod ssm;

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{PublishError, SecretError, VerificationError};
use crate::notification::NotificationMessage;

pub use recaptcha::{RecaptchaResponse, RecaptchaVerifier};
pub use sns::SnsPublisher;
pub use ssm::SsmSecretStore;

/// Verdict from the captcha service.
#[derive(Debug, Clone, PartialEq)]
pub enum Verification {
    Verified,
    Rejected(Vec<String>),
}

/// Key/value lookup of decrypted secret material.
#[async_trait]
pub trait SecretStore: Send + Sync {
    async fn get(&self, name: &str) -> Result<String, SecretError>;
}

/// Validates a client-supplied anti-bot token.
#[async_trait]
pub trait CaptchaVerifier: Send + Sync {
    async fn verify(&self, secret: &str, token: &str) -> Result<Verification, VerificationError>;
}

/// Delivers a message to a topic. Returns the provider's message id, if any.
#[async_trait]
pub trait NotificationPublisher: Send + Sync {
    async fn publish(&self, message: &NotificationMessage) -> Result<Option<String>, PublishError>;
}

/// The capabilities one intake run is allowed to use.
#[derive(Clone)]
pub struct Services {
    pub secrets: Arc<dyn SecretStore>,
    pub verifier: Arc<dyn CaptchaVerifier>,
    pub publisher: Arc<dyn NotificationPublisher>,
}

impl Services {
    pub fn new(
        secrets: Arc<dyn SecretStore>,
        verifier: Arc<dyn CaptchaVerifier>,
        publisher: Arc<dyn NotificationPublisher>,
    ) -> Self {
        Self {
            secrets,
            verifier,
            publisher,
        }
    }

    /// Build the AWS-backed services described by `config`.
    pub async fn from_config(config: &crate::Config) -> anyhow::Result<Self> {
        let sdk_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(config.aws_region.clone()))
            .load()
            .await;

        let verifier = RecaptchaVerifier::new(
            config.verify_url.clone(),
            config.request_timeout(),
            config.min_score,
        )?;

        Ok(Self::new(
            Arc::new(SsmSecretStore::new(aws_sdk_ssm::Client::new(&sdk_config))),
            Arc::new(verifier),
            Arc::new(SnsPublisher::new(aws_sdk_sns::Client::new(&sdk_config))),
        ))
    }
}
