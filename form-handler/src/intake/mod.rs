//! Contact form intake: verify the submission, notify, redirect.
//!
//! ## Processing Flow
//!
//! ```text
//! form bytes → token check → SSM (captcha secret) → siteverify
//!            → SSM (topic ARN) → SNS publish → 301 redirect
//! ```
//!
//! Each external call is awaited before the next starts and none is retried.
//! `process` stops at the first failure. `handle` wraps it and turns every
//! outcome, success or not, into the same redirect.


use tracing::{error, info, warn};

use crate::error::IntakeError;
use crate::form::FormSubmission;
use crate::notification::NotificationMessage;
use crate::services::{Services, Verification};
use crate::Config;

/// HTTP status sent back on every path.
pub const REDIRECT_STATUS: u16 = 301;

/// The response every submission ends with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectResponse {
    pub status: u16,
    pub status_description: &'static str,
    pub location: String,
}

impl RedirectResponse {
    pub fn moved_permanently(location: impl Into<String>) -> Self {
        Self {
            status: REDIRECT_STATUS,
            status_description: "Moved Permanently",
            location: location.into(),
        }
    }
}

/// A submission that reached the topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Delivery {
    pub topic_arn: String,
    pub message_id: Option<String>,
}

/// Runs the intake sequence against injected services.
#[derive(Clone)]
pub struct FormIntake {
    services: Services,
    captcha_secret_param: String,
    topic_arn_param: String,
    redirect: RedirectResponse,
}

impl FormIntake {
    pub fn new(config: &Config, services: Services) -> Self {
        Self {
            services,
            captcha_secret_param: config.captcha_secret_param.clone(),
            topic_arn_param: config.topic_arn_param.clone(),
            redirect: RedirectResponse::moved_permanently(config.redirect_location.clone()),
        }
    }

    /// The fixed redirect.
    pub fn redirect(&self) -> &RedirectResponse {
        &self.redirect
    }

    /// Process a url-encoded form body and always answer with the redirect.
    pub async fn handle(&self, body: &[u8]) -> RedirectResponse {
        match self.process(body).await {
            Ok(delivery) => {
                info!(
                    topic_arn = %delivery.topic_arn,
                    message_id = ?delivery.message_id,
                    "contact_form_delivered"
                );
                self.redirect.clone()
            }
            Err(err) => self.reject(&err),
        }
    }

    /// Log a failed submission and return the redirect.
    ///
    /// Problems with the submission itself are warnings; problems reaching
    /// our own infrastructure are errors.
    pub fn reject(&self, err: &IntakeError) -> RedirectResponse {
        if err.is_client_side() {
            warn!(kind = err.kind(), error = %err, "contact_form_rejected");
        } else {
            error!(kind = err.kind(), error = %err, "contact_form_failed");
        }
        self.redirect.clone()
    }

    /// Run the intake steps, stopping at the first failure.
    pub async fn process(&self, body: &[u8]) -> Result<Delivery, IntakeError> {
        let submission = FormSubmission::parse(body)?;

        let token = submission.captcha_token().ok_or(IntakeError::MissingToken)?;

        info!(
            body_length = body.len(),
            email_length = submission.email.len(),
            "contact_form_received"
        );

        let secret = self.secret(&self.captcha_secret_param).await?;

        match self.services.verifier.verify(&secret, token).await? {
            Verification::Verified => info!("captcha_verified"),
            Verification::Rejected(reasons) => {
                return Err(IntakeError::VerificationRejected { reasons });
            }
        }

        let topic_arn = self.secret(&self.topic_arn_param).await?;

        let message = NotificationMessage::for_submission(topic_arn, &submission);
        let message_id = self.services.publisher.publish(&message).await?;

        Ok(Delivery {
            topic_arn: message.topic_arn,
            message_id,
        })
    }

    async fn secret(&self, name: &str) -> Result<String, IntakeError> {
        self.services
            .secrets
            .get(name)
            .await
            .map_err(|source| IntakeError::SecretUnavailable {
                name: name.to_string(),
                source,
            })
    }
}
