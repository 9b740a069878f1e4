use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value;
use shared::{
    config::{get_eventbridge_client, get_s3_client, get_sdk_config, Config},
    error::ConfigError,
    link,
    response::LinkResponse,
};
use tracing::{error, info};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        // disable printing the name of the module in every log line.
        .with_target(false)
        // CloudWatch adds the ingestion time.
        .without_time()
        .init();

    let sdk_config = get_sdk_config().await;
    let s3 = get_s3_client(&sdk_config);
    let eventbridge = get_eventbridge_client(&sdk_config);
    let cfg = Config::from_env();

    if let Err(err) = &cfg {
        error!(error = %err, "invalid configuration, every invocation will fail");
    }

    run(service_fn(|event| {
        generate_link(event, &s3, &eventbridge, cfg.as_ref())
    }))
    .await
}

async fn generate_link(
    event: LambdaEvent<Value>,
    s3: &aws_sdk_s3::Client,
    eventbridge: &aws_sdk_eventbridge::Client,
    cfg: Result<&Config, &ConfigError>,
) -> Result<LinkResponse, Error> {
    info!(request_id = %event.context.request_id, "received event: {}", event.payload);

    Ok(link::handle(&event.payload, cfg, s3, eventbridge).await)
}
