//! SK Site contact form - Lambda@Edge entrypoint.
//!
//! Attached to the CloudFront `/submitForm` behavior as a viewer-request
//! function. Verifies the reCAPTCHA token, publishes the submission to SNS
//! and redirects the visitor back to the contact page.

use anyhow::Result;
use lambda_runtime::{run, service_fn, LambdaEvent};
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use sksite_contact::edge::{handle_event, CloudFrontEvent};
use sksite_contact::{Config, FormIntake, Services};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize structured JSON logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().json().flatten_event(true).without_time())
        .init();

    tracing::info!("edge_function_starting");

    // Load configuration; at the edge these are the compiled-in defaults
    let config = Config::from_env();
    tracing::info!(
        aws_region = %config.aws_region,
        captcha_secret_param = %config.captcha_secret_param,
        topic_arn_param = %config.topic_arn_param,
        request_timeout_ms = config.request_timeout_ms,
        min_score = ?config.min_score,
        "config_loaded"
    );

    // Clients are built once per container and reused across invocations
    let services = Services::from_config(&config).await?;
    let intake = FormIntake::new(&config, services);

    run(service_fn(|event: LambdaEvent<CloudFrontEvent>| {
        handle_event(&intake, event)
    }))
    .await
    .map_err(|e| anyhow::anyhow!(e))?;

    Ok(())
}
