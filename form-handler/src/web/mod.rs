//! Local web server module.
//!
//! Serves the contact form flow over plain HTTP so it can be exercised
//! without CloudFront:
//! - `POST /submitForm` runs the intake and redirects
//! - `GET /health` reports liveness

pub mod handlers;

pub use handlers::{health, submit_form, AppState, HealthResponse};
