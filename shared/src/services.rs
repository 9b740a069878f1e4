//! Seams to the two managed services the link publisher talks to.
//!
//! The AWS clients implement these traits directly; handlers only see the traits so that
//! tests can substitute mocks.

use async_trait::async_trait;
use aws_sdk_eventbridge as eventbridge;
use aws_sdk_s3 as s3;
use eventbridge::types::PutEventsRequestEntry;
use lambda_runtime::Error;
use s3::presigning::PresigningConfig;
use std::time::Duration;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait UrlSigner: Send + Sync {
    /// Returns a pre-signed GET url for `bucket/key`, valid for `expires_in`.
    async fn presign_get(&self, bucket: &str, key: &str, expires_in: Duration)
        -> Result<String, Error>;
}

/// A single entry to put on an event bus.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PublishRequest {
    pub source: String,
    pub detail_type: String,
    pub detail: String,
    pub event_bus_name: String,
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EventPublisher: Send + Sync {
    /// Puts one event on the bus, returning the event id when the bus reports one.
    async fn put_event(&self, request: PublishRequest) -> Result<Option<String>, Error>;
}

#[async_trait]
impl UrlSigner for s3::Client {
    async fn presign_get(
        &self,
        bucket: &str,
        key: &str,
        expires_in: Duration,
    ) -> Result<String, Error> {
        let presigned_url = self
            .get_object()
            .bucket(bucket)
            .key(key)
            .presigned(PresigningConfig::expires_in(expires_in)?)
            .await?;

        Ok(presigned_url.uri().to_string())
    }
}

#[async_trait]
impl EventPublisher for eventbridge::Client {
    async fn put_event(&self, request: PublishRequest) -> Result<Option<String>, Error> {
        let entry = PutEventsRequestEntry::builder()
            .source(request.source)
            .detail_type(request.detail_type)
            .detail(request.detail)
            .event_bus_name(request.event_bus_name)
            .build();

        let output = self.put_events().entries(entry).send().await?;

        // PutEvents succeeds as a call even when individual entries are rejected.
        if let Some(failed) = output.entries().iter().find(|e| e.error_code().is_some()) {
            return Err(Error::from(format!(
                "event bus rejected entry: {} ({})",
                failed.error_code().unwrap_or_default(),
                failed.error_message().unwrap_or_default()
            )));
        }

        Ok(output
            .entries()
            .first()
            .and_then(|e| e.event_id())
            .map(str::to_string))
    }
}
