//! Notification message sent to the contact form topic.

use std::fmt;

use crate::form::FormSubmission;

/// A formatted contact notification bound for one SNS topic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationMessage {
    pub topic_arn: String,
    pub body: String,
}

impl NotificationMessage {
    /// Build the message for a submission.
    ///
    /// Field values are copied verbatim; the subscriber reads this as a
    /// plain-text email.
    pub fn for_submission(topic_arn: impl Into<String>, submission: &FormSubmission) -> Self {
        let body = format!(
            "Fullname: {}\nEmail: {}\nPhone: {}\nComment: {}",
            submission.full_name, submission.email, submission.phone, submission.comment
        );

        Self {
            topic_arn: topic_arn.into(),
            body,
        }
    }
}

impl fmt::Display for NotificationMessage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.body)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_message_template() {
        let submission = FormSubmission {
            full_name: "Jane Doe".to_string(),
            email: "jane@example.com".to_string(),
            phone: "555-1234".to_string(),
            comment: "Hello".to_string(),
            captcha_token: "tok123".to_string(),
        };

        let message = NotificationMessage::for_submission(
            "arn:aws:sns:us-east-1:123456789012:contact",
            &submission,
        );

        assert_eq!(message.topic_arn, "arn:aws:sns:us-east-1:123456789012:contact");
        assert_eq!(
            message.to_string(),
            "Fullname: Jane Doe\nEmail: jane@example.com\nPhone: 555-1234\nComment: Hello"
        );
        assert!(!message.body.contains("tok123"));
    }

    #[test]
    fn test_empty_fields_still_labelled() {
        let message = NotificationMessage::for_submission("arn", &FormSubmission::default());
        assert_eq!(message.body, "Fullname: \nEmail: \nPhone: \nComment: ");
    }
}
