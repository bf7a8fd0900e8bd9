//! Configuration module for environment variable parsing.
//!
//! Lambda@Edge functions cannot be given environment variables, so every
//! default here is the deployed value. Overrides exist for the local web
//! server and for tests.

use std::env;
use std::time::Duration;
use tracing::warn;

/// Region holding the SSM parameters and the SNS topic.
pub const DEFAULT_AWS_REGION: &str = "us-east-1";

/// SSM parameter (SecureString) holding the reCAPTCHA secret key.
pub const DEFAULT_CAPTCHA_SECRET_PARAM: &str = "/sksite/captcha-secret-key";

/// SSM parameter holding the contact form SNS topic ARN.
pub const DEFAULT_TOPIC_ARN_PARAM: &str = "/sksite/sns/contact-form-topic-arn";

/// Page every submission is redirected back to.
pub const DEFAULT_REDIRECT_LOCATION: &str = "https://stephenkrawczyk.com/contact.html";

/// Google's reCAPTCHA verification endpoint.
pub const DEFAULT_VERIFY_URL: &str = "https://www.google.com/recaptcha/api/siteverify";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Region for the SSM and SNS clients
    pub aws_region: String,

    /// Name of the SSM parameter holding the reCAPTCHA secret
    pub captcha_secret_param: String,

    /// Name of the SSM parameter holding the SNS topic ARN
    pub topic_arn_param: String,

    /// Absolute URL placed in the `Location` header of every response
    pub redirect_location: String,

    /// reCAPTCHA siteverify endpoint
    pub verify_url: String,

    /// HTTP request timeout in milliseconds for the verification call
    pub request_timeout_ms: u64,

    /// Minimum reCAPTCHA v3 score to accept, if any
    pub min_score: Option<f64>,

    // =========================================================================
    // Local Web Server Configuration
    // =========================================================================

    /// Port for the local web server to listen on
    pub port: u16,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            aws_region: env_or("SKSITE_AWS_REGION", DEFAULT_AWS_REGION),

            captcha_secret_param: env_or("CAPTCHA_SECRET_PARAM", DEFAULT_CAPTCHA_SECRET_PARAM),

            topic_arn_param: env_or("TOPIC_ARN_PARAM", DEFAULT_TOPIC_ARN_PARAM),

            redirect_location: env_or("REDIRECT_LOCATION", DEFAULT_REDIRECT_LOCATION),

            verify_url: env_or("RECAPTCHA_VERIFY_URL", DEFAULT_VERIFY_URL),

            request_timeout_ms: parse_number("REQUEST_TIMEOUT_MS", 3000),

            min_score: parse_score("RECAPTCHA_MIN_SCORE"),

            port: parse_number("PORT", 8080),
        }
    }

    /// Timeout applied to the verification request.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_millis(self.request_timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            aws_region: DEFAULT_AWS_REGION.to_string(),
            captcha_secret_param: DEFAULT_CAPTCHA_SECRET_PARAM.to_string(),
            topic_arn_param: DEFAULT_TOPIC_ARN_PARAM.to_string(),
            redirect_location: DEFAULT_REDIRECT_LOCATION.to_string(),
            verify_url: DEFAULT_VERIFY_URL.to_string(),
            request_timeout_ms: 3000,
            min_score: None,
            port: 8080,
        }
    }
}

/// Read a string variable, ignoring blank values.
fn env_or(name: &str, default: &str) -> String {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string())
}

/// Parse a numeric variable, falling back to the default on absence or error.
fn parse_number<T: std::str::FromStr + Copy>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse::<T>() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid number, using default");
            default
        }
    }
}

/// Parse an optional score threshold in the range 0.0 - 1.0.
fn parse_score(name: &str) -> Option<f64> {
    let raw = env::var(name).ok()?;

    match raw.trim().parse::<f64>() {
        Ok(score) if (0.0..=1.0).contains(&score) => Some(score),
        _ => {
            warn!(env_var = name, value = %raw, "Invalid score threshold, ignoring");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_env_or_default() {
        assert_eq!(env_or("NONEXISTENT_CONFIG_VAR", "fallback"), "fallback");
    }

    #[test]
    fn test_env_or_blank_uses_default() {
        env::set_var("TEST_BLANK_PARAM", "   ");
        assert_eq!(env_or("TEST_BLANK_PARAM", "/sksite/x"), "/sksite/x");
        env::remove_var("TEST_BLANK_PARAM");
    }

    #[test]
    fn test_parse_number_valid() {
        env::set_var("TEST_TIMEOUT_MS", "1500");
        assert_eq!(parse_number::<u64>("TEST_TIMEOUT_MS", 0), 1500);
        env::remove_var("TEST_TIMEOUT_MS");
    }

    #[test]
    fn test_parse_number_invalid() {
        env::set_var("TEST_PORT_INVALID", "eighty");
        assert_eq!(parse_number::<u16>("TEST_PORT_INVALID", 8080), 8080);
        env::remove_var("TEST_PORT_INVALID");
    }

    #[test]
    fn test_parse_score() {
        env::set_var("TEST_MIN_SCORE", "0.5");
        assert_eq!(parse_score("TEST_MIN_SCORE"), Some(0.5));
        env::set_var("TEST_MIN_SCORE", "1.5");
        assert_eq!(parse_score("TEST_MIN_SCORE"), None);
        env::remove_var("TEST_MIN_SCORE");
        assert_eq!(parse_score("TEST_MIN_SCORE"), None);
    }

    #[test]
    fn test_default_matches_deployment() {
        let config = Config::default();
        assert_eq!(config.aws_region, "us-east-1");
        assert_eq!(config.captcha_secret_param, "/sksite/captcha-secret-key");
        assert_eq!(config.topic_arn_param, "/sksite/sns/contact-form-topic-arn");
        assert_eq!(
            config.redirect_location,
            "https://stephenkrawczyk.com/contact.html"
        );
        assert_eq!(config.request_timeout(), Duration::from_millis(3000));
    }
}
