use crate::error::ConfigError;
use aws_config::{BehaviorVersion, SdkConfig};
use aws_sdk_eventbridge as eventbridge;
use aws_sdk_s3 as s3;
use serde::{Deserialize, Serialize};
use std::env;
use std::str::FromStr;

pub const DEFAULT_URL_EXPIRATION_SECONDS: u64 = 86400;
pub const DEFAULT_EVENT_SOURCE: &str = "s3-link-generator";
pub const DEFAULT_EVENT_DETAIL_TYPE: &str = "file-link-generated";
pub const DEFAULT_EVENT_BUS_NAME: &str = "default";

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// URL_EXPIRATION_SECONDS, validity window of the pre-signed get url.
    pub url_expiration_seconds: u64,

    /// EVENT_SOURCE
    pub event_source: String,

    /// EVENT_DETAIL_TYPE
    pub detail_type: String,

    /// EVENT_BUS_NAME
    pub event_bus_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            url_expiration_seconds: DEFAULT_URL_EXPIRATION_SECONDS,
            event_source: DEFAULT_EVENT_SOURCE.to_string(),
            detail_type: DEFAULT_EVENT_DETAIL_TYPE.to_string(),
            event_bus_name: DEFAULT_EVENT_BUS_NAME.to_string(),
        }
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    /// Builds the config from any key/value source. Empty values count as unset, numbers are trimmed.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = Config::default();

        let url_expiration_seconds = match get("URL_EXPIRATION_SECONDS") {
            Some(raw) => parse_number("URL_EXPIRATION_SECONDS", &raw)?,
            None => defaults.url_expiration_seconds,
        };

        let config = Config {
            url_expiration_seconds,
            event_source: get("EVENT_SOURCE").unwrap_or(defaults.event_source),
            detail_type: get("EVENT_DETAIL_TYPE").unwrap_or(defaults.detail_type),
            event_bus_name: get("EVENT_BUS_NAME").unwrap_or(defaults.event_bus_name),
        };

        tracing::event!(tracing::Level::DEBUG, "{:?}", config);

        Ok(config)
    }
}

pub(crate) fn parse_number<T: FromStr>(name: &'static str, raw: &str) -> Result<T, ConfigError> {
    raw.trim()
        .parse::<T>()
        .map_err(|_| ConfigError::InvalidNumber {
            name,
            value: raw.to_string(),
        })
}

pub async fn get_sdk_config() -> SdkConfig {
    aws_config::load_defaults(BehaviorVersion::latest()).await
}

pub fn get_s3_client(cfg: &SdkConfig) -> s3::Client {
    s3::Client::new(cfg)
}

pub fn get_eventbridge_client(cfg: &SdkConfig) -> eventbridge::Client {
    eventbridge::Client::new(cfg)
}
