//! Error types for the contact form pipeline.
//!
//! Service adapters return their own narrow errors; `IntakeError` is what the
//! intake sequence produces. None of these reach the visitor, who is always
//! redirected, but each one is logged under its `kind()` label.

use thiserror::Error;

/// Why a secret lookup failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SecretErrorKind {
    NotFound,
    AccessDenied,
    Other,
}

impl SecretErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            SecretErrorKind::NotFound => "not_found",
            SecretErrorKind::AccessDenied => "access_denied",
            SecretErrorKind::Other => "other",
        }
    }
}

/// Failure returned by a `SecretStore`.
#[derive(Debug, Clone, Error)]
#[error("secret lookup failed ({}): {message}", .kind.as_str())]
pub struct SecretError {
    pub kind: SecretErrorKind,
    pub message: String,
}

impl SecretError {
    pub fn new(kind: SecretErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn not_found(name: &str) -> Self {
        Self::new(SecretErrorKind::NotFound, format!("parameter {} not found", name))
    }
}

/// Failure returned by a `CaptchaVerifier` when no verdict could be obtained.
#[derive(Debug, Clone, Error)]
pub enum VerificationError {
    #[error("verification request failed: {0}")]
    Transport(String),
    #[error("verification response unreadable: {0}")]
    Decode(String),
}

/// Failure returned by a `NotificationPublisher`.
#[derive(Debug, Clone, Error)]
#[error("publish failed: {0}")]
pub struct PublishError(pub String);

/// Every way a form submission can stop short of publishing.
#[derive(Debug, Error)]
pub enum IntakeError {
    #[error("request body unusable: {0}")]
    MalformedBody(String),

    #[error("anti-bot token missing")]
    MissingToken,

    #[error("captcha rejected: {}", .reasons.join(", "))]
    VerificationRejected { reasons: Vec<String> },

    #[error(transparent)]
    VerificationUnavailable(#[from] VerificationError),

    #[error("secret {name} unavailable: {source}")]
    SecretUnavailable {
        name: String,
        #[source]
        source: SecretError,
    },

    #[error(transparent)]
    PublishFailed(#[from] PublishError),
}

impl IntakeError {
    /// Stable label for logs.
    pub fn kind(&self) -> &'static str {
        match self {
            IntakeError::MalformedBody(_) => "malformed_body",
            IntakeError::MissingToken => "missing_token",
            IntakeError::VerificationRejected { .. } => "verification_rejected",
            IntakeError::VerificationUnavailable(_) => "verification_unavailable",
            IntakeError::SecretUnavailable { .. } => "secret_unavailable",
            IntakeError::PublishFailed(_) => "publish_failed",
        }
    }

    /// Whether the failure was caused by the submission rather than by our
    /// own infrastructure.
    pub fn is_client_side(&self) -> bool {
        matches!(
            self,
            IntakeError::MalformedBody(_)
                | IntakeError::MissingToken
                | IntakeError::VerificationRejected { .. }
        )
    }
}
