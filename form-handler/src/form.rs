//! Contact form body decoding.
//!
//! CloudFront hands the body over as base64 (or, for some distributions,
//! plain text). Once decoded it is ordinary `application/x-www-form-urlencoded`
//! data posted by the contact page.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::Deserialize;
use url::form_urlencoded;

use crate::error::IntakeError;

/// Form field carrying the reCAPTCHA token.
pub const CAPTCHA_FIELD: &str = "g-recaptcha-response";

/// How the edge layer encoded the request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyEncoding {
    #[default]
    Base64,
    Text,
}

/// Decode an edge request body into raw form bytes.
pub fn decode_body(data: &str, encoding: BodyEncoding) -> Result<Vec<u8>, IntakeError> {
    match encoding {
        BodyEncoding::Base64 => STANDARD
            .decode(data.trim())
            .map_err(|e| IntakeError::MalformedBody(format!("invalid base64: {}", e))),
        BodyEncoding::Text => Ok(data.as_bytes().to_vec()),
    }
}

/// A single contact form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormSubmission {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub comment: String,
    pub captcha_token: String,
}

impl FormSubmission {
    /// Parse url-encoded form bytes.
    ///
    /// The body must be valid UTF-8. Absent fields are left empty. If a key
    /// repeats, the first value wins.
    pub fn parse(body: &[u8]) -> Result<Self, IntakeError> {
        std::str::from_utf8(body)
            .map_err(|_| IntakeError::MalformedBody("body is not valid UTF-8".to_string()))?;

        let mut submission = FormSubmission::default();
        let mut seen: Vec<String> = Vec::with_capacity(5);

        for (key, value) in form_urlencoded::parse(body) {
            if seen.iter().any(|k| *k == *key) {
                continue;
            }

            let slot = match &*key {
                "fullname" => &mut submission.full_name,
                "email" => &mut submission.email,
                "phone" => &mut submission.phone,
                "comment" => &mut submission.comment,
                CAPTCHA_FIELD => &mut submission.captcha_token,
                _ => continue,
            };

            *slot = value.into_owned();
            seen.push(key.into_owned());
        }

        Ok(submission)
    }

    /// The anti-bot token, if the visitor supplied a non-blank one.
    ///
    /// Blankness is judged after trimming, but the value is returned as sent.
    pub fn captcha_token(&self) -> Option<&str> {
        if self.captcha_token.trim().is_empty() {
            None
        } else {
            Some(&self.captcha_token)
        }
    }
}
