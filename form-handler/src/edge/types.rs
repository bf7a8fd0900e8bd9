//! CloudFront Lambda@Edge event and response shapes.
//!
//! Only the fields the contact form uses are modelled; everything else in
//! the event is ignored on deserialization.
//! Reference: https://docs.aws.amazon.com/AmazonCloudFront/latest/DeveloperGuide/lambda-event-structure.html

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::form::BodyEncoding;
use crate::intake::RedirectResponse;

// =============================================================================
// Request Event
// =============================================================================

/// Viewer-request event delivered to the function.
#[derive(Debug, Clone, Deserialize)]
pub struct CloudFrontEvent {
    #[serde(rename = "Records", default)]
    pub records: Vec<CloudFrontRecord>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudFrontRecord {
    pub cf: CloudFrontPayload,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CloudFrontPayload {
    #[serde(default)]
    pub config: CloudFrontConfig,
    pub request: CloudFrontRequest,
}

/// Distribution metadata attached to each record.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontConfig {
    #[serde(default)]
    pub distribution_domain_name: String,
    #[serde(default)]
    pub distribution_id: String,
    #[serde(default)]
    pub event_type: String,
    #[serde(default)]
    pub request_id: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudFrontRequest {
    #[serde(default)]
    pub client_ip: String,
    #[serde(default)]
    pub method: String,
    #[serde(default)]
    pub uri: String,
    #[serde(default)]
    pub querystring: String,
    #[serde(default)]
    pub headers: BTreeMap<String, Vec<HeaderEntry>>,
    /// Present only when the behavior is configured to include the body.
    #[serde(default)]
    pub body: Option<RequestBody>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestBody {
    /// Set when the body exceeded CloudFront's size limit and was cut short.
    #[serde(default)]
    pub input_truncated: bool,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub encoding: BodyEncoding,
    #[serde(default)]
    pub data: String,
}

/// CloudFront header entry; the map key is the lowercase header name.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HeaderEntry {
    pub key: String,
    pub value: String,
}

// =============================================================================
// Generated Response
// =============================================================================

/// Response returned from a viewer-request function, short-circuiting the origin.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeResponse {
    pub status: String,
    pub status_description: String,
    pub headers: BTreeMap<String, Vec<HeaderEntry>>,
}

impl From<&RedirectResponse> for EdgeResponse {
    fn from(redirect: &RedirectResponse) -> Self {
        let mut headers = BTreeMap::new();
        headers.insert(
            "location".to_string(),
            vec![HeaderEntry {
                key: "Location".to_string(),
                value: redirect.location.clone(),
            }],
        );

        Self {
            status: redirect.status.to_string(),
            status_description: redirect.status_description.to_string(),
            headers,
        }
    }
}
