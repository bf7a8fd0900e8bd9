//! Lambda@Edge integration.
//!
//! CloudFront invokes the function on viewer requests to `/submitForm`.
//! The handler decodes the body, runs the intake, and answers with a
//! generated 301 response so the request never reaches the S3 origin.

pub mod handler;
pub mod types;

pub use handler::handle_event;
pub use types::{CloudFrontEvent, CloudFrontRequest, EdgeResponse, HeaderEntry, RequestBody};
