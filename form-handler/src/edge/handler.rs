//! Lambda@Edge viewer-request handler.

use lambda_runtime::{Error, LambdaEvent};
use tracing::{info, warn};

use super::types::{CloudFrontEvent, EdgeResponse};
use crate::error::IntakeError;
use crate::form::decode_body;
use crate::intake::FormIntake;

/// Handle one CloudFront viewer-request event.
///
/// Every request carrying a record gets the redirect. An event with no
/// records is returned as an invocation error, leaving CloudFront to serve
/// its own error response.
pub async fn handle_event(
    intake: &FormIntake,
    event: LambdaEvent<CloudFrontEvent>,
) -> Result<EdgeResponse, Error> {
    let (payload, context) = event.into_parts();

    let record = payload
        .records
        .into_iter()
        .next()
        .ok_or("CloudFront event contained no records")?;

    let request = record.cf.request;

    info!(
        request_id = %context.request_id,
        cf_request_id = %record.cf.config.request_id,
        method = %request.method,
        uri = %request.uri,
        has_body = request.body.is_some(),
        "edge_request_received"
    );

    let redirect = match request.body {
        Some(body) => {
            if body.input_truncated {
                warn!(data_length = body.data.len(), "edge_request_body_truncated");
            }

            match decode_body(&body.data, body.encoding) {
                Ok(bytes) => intake.handle(&bytes).await,
                Err(err) => intake.reject(&err),
            }
        }
        None => intake.reject(&IntakeError::MalformedBody(
            "request has no body".to_string(),
        )),
    };

    Ok(EdgeResponse::from(&redirect))
}
