use crate::config::Config;
use crate::error::{ConfigError, LinkError};
use crate::event::{FileLinkEvent, ObjectCreated};
use crate::expiration::format_expiration_time;
use crate::response::{self, LinkResponse};
use crate::services::{EventPublisher, PublishRequest, UrlSigner};
use chrono::{DateTime, Utc};
use lambda_runtime::Error;
use serde_json::Value;
use std::time::Duration;
use tracing::{error, info, instrument};

/// Handles one "Object Created" notification: signs a get url for the object and
/// publishes it on the configured event bus.
///
/// `cfg` is the outcome of reading configuration at cold start; a bad value is reported
/// per invocation as an unexpected error.
///
/// Never fails, every error is logged and turned into a 400/500 response.
pub async fn handle(
    event: &Value,
    cfg: Result<&Config, &ConfigError>,
    signer: &dyn UrlSigner,
    publisher: &dyn EventPublisher,
) -> LinkResponse {
    match publish_link(event, cfg, signer, publisher, Utc::now()).await {
        Ok(_) => response::ok(),
        Err(err) => {
            log_failure(&err);
            LinkResponse::from(&err)
        }
    }
}

#[instrument(skip_all)]
pub async fn publish_link(
    event: &Value,
    cfg: Result<&Config, &ConfigError>,
    signer: &dyn UrlSigner,
    publisher: &dyn EventPublisher,
    now: DateTime<Utc>,
) -> Result<FileLinkEvent, LinkError> {
    let object = ObjectCreated::from_event(event).ok_or(LinkError::InvalidInput)?;
    let cfg = cfg.map_err(|e| LinkError::Unexpected(Error::from(e.clone())))?;
    let expiration_text = format_expiration_time(cfg.url_expiration_seconds);

    let presigned_url = signer
        .presign_get(
            &object.bucket,
            &object.key,
            Duration::from_secs(cfg.url_expiration_seconds),
        )
        .await
        .map_err(|source| LinkError::Signing {
            bucket: object.bucket.clone(),
            key: object.key.clone(),
            source,
        })?;

    info!(bucket = %object.bucket, key = %object.key, "generated pre-signed url");

    let payload = FileLinkEvent::new(&object, presigned_url, expiration_text, now);
    let detail =
        serde_json::to_string(&payload).map_err(|e| LinkError::Unexpected(Error::from(e)))?;

    let event_id = publisher
        .put_event(PublishRequest {
            source: cfg.event_source.clone(),
            detail_type: cfg.detail_type.clone(),
            detail,
            event_bus_name: cfg.event_bus_name.clone(),
        })
        .await
        .map_err(|source| LinkError::Publish {
            bucket: object.bucket.clone(),
            key: object.key.clone(),
            source,
        })?;

    info!(
        bucket = %object.bucket,
        key = %object.key,
        event_bus = %cfg.event_bus_name,
        event_id = event_id.as_deref().unwrap_or("n/a"),
        "published link event"
    );

    Ok(payload)
}

fn log_failure(err: &LinkError) {
    match err {
        LinkError::InvalidInput => {
            error!("failed to extract bucket name or object key from event")
        }
        LinkError::Signing { bucket, key, source } => {
            error!(%bucket, %key, error = %source, "failed to generate pre-signed url")
        }
        LinkError::Publish { bucket, key, source } => {
            error!(%bucket, %key, error = %source, "failed to publish event to EventBridge")
        }
        LinkError::Unexpected(source) => error!(error = %source, "unexpected error"),
    }
}
