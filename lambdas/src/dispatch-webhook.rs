use aws_lambda_events::event::cloudwatch_events::CloudWatchEvent;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use shared::{
    event::FileLinkEvent,
    webhook::{dispatch, get_http_client, DispatchError, WebhookConfig},
};
use tracing::error;

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let cfg = WebhookConfig::from_env()?;
    let client = get_http_client(&cfg)?;

    run(service_fn(|event| dispatch_webhook(event, &client, &cfg))).await
}

async fn dispatch_webhook(
    event: LambdaEvent<CloudWatchEvent<FileLinkEvent>>,
    client: &reqwest::Client,
    cfg: &WebhookConfig,
) -> Result<(), Error> {
    let link = event.payload.detail.ok_or(DispatchError::MissingDetail)?;

    if let Err(err) = dispatch(client, cfg, &link).await {
        error!(file = %link.file_name, bucket = %link.bucket, error = %err, "failed to dispatch link");
        return Err(err.into());
    }

    Ok(())
}
