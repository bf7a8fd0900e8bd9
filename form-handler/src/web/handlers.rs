//! Local endpoint handlers.
//!
//! `submit_form` feeds the raw url-encoded body straight into the same
//! `FormIntake` the edge function uses, so the browser sees the same 301.

use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::intake::FormIntake;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub intake: Arc<FormIntake>,
}

impl AppState {
    pub fn new(intake: FormIntake) -> Self {
        Self {
            intake: Arc::new(intake),
        }
    }
}

// =============================================================================
// Health Check
// =============================================================================

/// Health check response.
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
}

/// Health check endpoint.
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok" })
}

// =============================================================================
// Contact Form
// =============================================================================

/// Contact form endpoint.
///
/// Always answers with the configured redirect, whatever happened.
pub async fn submit_form(State(state): State<AppState>, body: Bytes) -> impl IntoResponse {
    info!(body_length = body.len(), "submit_form_received");

    let redirect = state.intake.handle(&body).await;

    let status = StatusCode::from_u16(redirect.status).unwrap_or(StatusCode::MOVED_PERMANENTLY);

    (status, [(header::LOCATION, redirect.location)])
}

#[cfg(test)]
mod tests {
    use super::*;

    use async_trait::async_trait;

    use crate::error::{PublishError, SecretError, SecretErrorKind, VerificationError};
    use crate::notification::NotificationMessage;
    use crate::Config;
    use crate::services::{
        CaptchaVerifier, NotificationPublisher, SecretStore, Services, Verification,
    };

    struct NoSecrets;

    #[async_trait]
    impl SecretStore for NoSecrets {
        async fn get(&self, _: &str) -> Result<String, SecretError> {
            Err(SecretError::new(SecretErrorKind::AccessDenied, "no credentials"))
        }
    }

    struct Unreachable;

    #[async_trait]
    impl CaptchaVerifier for Unreachable {
        async fn verify(&self, _: &str, _: &str) -> Result<Verification, VerificationError> {
            panic!("verifier must not be called");
        }
    }

    #[async_trait]
    impl NotificationPublisher for Unreachable {
        async fn publish(&self, _: &NotificationMessage) -> Result<Option<String>, PublishError> {
            panic!("publisher must not be called");
        }
    }

    fn state() -> AppState {
        let config = Config {
            redirect_location: "http://localhost:8000/contact.html".to_string(),
            ..Config::default()
        };
        let services = Services::new(
            Arc::new(NoSecrets),
            Arc::new(Unreachable),
            Arc::new(Unreachable),
        );
        let intake = FormIntake::new(&config, services);
        AppState::new(intake)
    }

    #[tokio::test]
    async fn test_submit_form_redirects_on_failure() {
        let body = Bytes::from_static(b"fullname=Jane&g-recaptcha-response=tok123");

        let response = submit_form(State(state()), body).await.into_response();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers()[header::LOCATION],
            "http://localhost:8000/contact.html"
        );
    }

    #[tokio::test]
    async fn test_submit_form_without_token() {
        let body = Bytes::from_static(b"fullname=Jane");

        let response = submit_form(State(state()), body).await.into_response();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
    }
}
