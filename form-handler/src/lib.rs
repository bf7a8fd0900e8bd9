//! SK Site contact form handler.
//!
//! This library backs the two contact form binaries:
//! - `contact-edge`: Lambda@Edge function attached to the CloudFront
//!   `/submitForm` behavior
//! - `contact-web`: local HTTP server running the same flow
//!
//! ## Architecture
//!
//! ```text
//! CloudFront → edge::handle_event → FormIntake → SSM / reCAPTCHA / SNS → 301
//! ```

pub mod config;
pub mod edge;
pub mod error;
pub mod form;
pub mod intake;
pub mod notification;
pub mod services;
pub mod web;

// Re-export commonly used types
pub use config::Config;
pub use error::IntakeError;
pub use form::FormSubmission;
pub use intake::{Delivery, FormIntake, RedirectResponse};
pub use notification::NotificationMessage;
pub use services::Services;
pub use web::AppState;
