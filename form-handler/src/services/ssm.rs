//! SSM Parameter Store secret lookup.

use async_trait::async_trait;
use aws_sdk_ssm::error::{DisplayErrorContext, ProvideErrorMetadata};
use aws_sdk_ssm::Client;
use tracing::{info, warn};

use super::SecretStore;
use crate::error::{SecretError, SecretErrorKind};

/// Reads parameters from SSM, decrypting SecureStrings.
#[derive(Clone)]
pub struct SsmSecretStore {
    client: Client,
}

impl SsmSecretStore {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl SecretStore for SsmSecretStore {
    async fn get(&self, name: &str) -> Result<String, SecretError> {
        info!(parameter = %name, "ssm_parameter_fetching");

        let output = match self
            .client
            .get_parameter()
            .name(name)
            .with_decryption(true)
            .send()
            .await
        {
            Ok(output) => output,
            Err(err) => {
                let service_err = err.into_service_error();
                let kind = classify_error_code(service_err.code());
                let message = DisplayErrorContext(&service_err).to_string();

                warn!(
                    parameter = %name,
                    kind = kind.as_str(),
                    error = %message,
                    "ssm_parameter_fetch_failed"
                );
                return Err(SecretError::new(kind, message));
            }
        };

        let value = output
            .parameter()
            .and_then(|p| p.value())
            .map(str::to_string)
            .ok_or_else(|| SecretError::not_found(name))?;

        info!(parameter = %name, value_length = value.len(), "ssm_parameter_fetched");

        Ok(value)
    }
}

/// Map an SSM error code onto the secret store's failure kinds.
fn classify_error_code(code: Option<&str>) -> SecretErrorKind {
    match code {
        Some("ParameterNotFound") | Some("ParameterVersionNotFound") => SecretErrorKind::NotFound,
        Some("AccessDeniedException") => SecretErrorKind::AccessDenied,
        _ => SecretErrorKind::Other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_error_code() {
        assert_eq!(classify_error_code(Some("ParameterNotFound")), SecretErrorKind::NotFound);
        assert_eq!(
            classify_error_code(Some("ParameterVersionNotFound")),
            SecretErrorKind::NotFound
        );
        assert_eq!(
            classify_error_code(Some("AccessDeniedException")),
            SecretErrorKind::AccessDenied
        );
        assert_eq!(classify_error_code(Some("ThrottlingException")), SecretErrorKind::Other);
        assert_eq!(classify_error_code(None), SecretErrorKind::Other);
    }
}
