use lambda_runtime::Error;
use thiserror::Error as ThisError;

/// Terminal failure categories of a single link-generation invocation.
#[derive(Debug, ThisError)]
pub enum LinkError {
    #[error("event is missing bucket name or object key")]
    InvalidInput,

    #[error("failed to generate pre-signed url for {bucket}/{key}")]
    Signing {
        bucket: String,
        key: String,
        #[source]
        source: Error,
    },

    #[error("failed to publish link event for {bucket}/{key}")]
    Publish {
        bucket: String,
        key: String,
        #[source]
        source: Error,
    },

    #[error("{0}")]
    Unexpected(#[source] Error),
}

#[derive(Debug, Clone, ThisError)]
pub enum ConfigError {
    #[error("{name} must be a non-negative integer, got {value:?}")]
    InvalidNumber { name: &'static str, value: String },
}
