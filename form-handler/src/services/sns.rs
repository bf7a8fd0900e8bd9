//! SNS notification publishing.

use async_trait::async_trait;
use aws_sdk_sns::error::DisplayErrorContext;
use aws_sdk_sns::Client;
use tracing::info;

use super::NotificationPublisher;
use crate::error::PublishError;
use crate::notification::NotificationMessage;

/// Publishes contact notifications to an SNS topic. No retries.
#[derive(Clone)]
pub struct SnsPublisher {
    client: Client,
}

impl SnsPublisher {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl NotificationPublisher for SnsPublisher {
    async fn publish(&self, message: &NotificationMessage) -> Result<Option<String>, PublishError> {
        info!(
            topic_arn = %message.topic_arn,
            body_length = message.body.len(),
            "sns_publishing"
        );

        let output = self
            .client
            .publish()
            .topic_arn(&message.topic_arn)
            .message(&message.body)
            .send()
            .await
            .map_err(|e| PublishError(DisplayErrorContext(&e).to_string()))?;

        let message_id = output.message_id().map(str::to_string);

        info!(
            topic_arn = %message.topic_arn,
            message_id = ?message_id,
            "sns_published"
        );

        Ok(message_id)
    }
}
