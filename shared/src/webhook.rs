//! Forwards published link events to a chat webhook, Discord-shaped by default.

use crate::config::parse_number;
use crate::error::ConfigError;
use crate::event::FileLinkEvent;
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;
use thiserror::Error;
use tracing::{info, instrument};

pub const DEFAULT_MESSAGE_TEMPLATE: &str = "A new file has been uploaded to S3.\n\n**File Name:** {fileName}\n**Temporary Link:** [Download File]({fileUrl})\n**Link Expires:** After {expirationTime}";
pub const DEFAULT_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_EMBED_COLOR: u32 = 3447003;
pub const DEFAULT_FOOTER_TEXT: &str = "S3 File Notification System";
pub const EMBED_TITLE: &str = "New File Uploaded";

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("WEBHOOK_URL environment variable is not set")]
    MissingWebhookUrl,

    #[error("event carries no link detail")]
    MissingDetail,

    #[error("failed to send message to webhook: {0}")]
    Request(#[from] reqwest::Error),

    #[error("webhook returned non-success status code: {0}")]
    Status(u16),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookConfig {
    /// WEBHOOK_URL, or DISCORD_WEBHOOK_URL for older deployments.
    pub webhook_url: Option<String>,

    /// MESSAGE_TEMPLATE, `{fileName}`, `{fileUrl}` and `{expirationTime}` are substituted,
    /// as are up to three positional `%s` (name, url, expiration) from older deployments.
    pub message_template: String,

    /// REQUEST_TIMEOUT_SECONDS
    pub timeout: Duration,

    /// EMBED_COLOR
    pub embed_color: u32,

    /// FOOTER_TEXT
    pub footer_text: String,
}

impl Default for WebhookConfig {
    fn default() -> Self {
        WebhookConfig {
            webhook_url: None,
            message_template: DEFAULT_MESSAGE_TEMPLATE.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECONDS),
            embed_color: DEFAULT_EMBED_COLOR,
            footer_text: DEFAULT_FOOTER_TEXT.to_string(),
        }
    }
}

impl WebhookConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |name: &str| lookup(name).filter(|v| !v.is_empty());
        let defaults = WebhookConfig::default();

        let timeout = match get("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => Duration::from_secs(parse_number("REQUEST_TIMEOUT_SECONDS", &raw)?),
            None => defaults.timeout,
        };
        let embed_color = match get("EMBED_COLOR") {
            Some(raw) => parse_number("EMBED_COLOR", &raw)?,
            None => defaults.embed_color,
        };

        Ok(WebhookConfig {
            webhook_url: get("WEBHOOK_URL").or_else(|| get("DISCORD_WEBHOOK_URL")),
            message_template: get("MESSAGE_TEMPLATE").unwrap_or(defaults.message_template),
            timeout,
            embed_color,
            footer_text: get("FOOTER_TEXT").unwrap_or(defaults.footer_text),
        })
    }
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DiscordMessage {
    pub embeds: Vec<DiscordEmbed>,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct DiscordEmbed {
    pub title: String,
    pub description: String,
    pub color: u32,
    pub timestamp: String,
    pub footer: EmbedFooter,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
pub struct EmbedFooter {
    pub text: String,
}

/// Fills the message template in a single pass. Named placeholders are substituted anywhere;
/// positional `%s` markers take file name, url and expiration in that order, extra markers
/// stay as is.
pub fn render_description(template: &str, link: &FileLinkEvent) -> String {
    let named = [
        ("{fileName}", &link.file_name),
        ("{fileUrl}", &link.file_url),
        ("{expirationTime}", &link.expiration_time),
    ];
    let mut positional = [&link.file_name, &link.file_url, &link.expiration_time].into_iter();

    let mut description = String::with_capacity(template.len());
    let mut rest = template;

    'scan: while let Some(c) = rest.chars().next() {
        if let Some(tail) = rest.strip_prefix("%s") {
            description.push_str(positional.next().map_or("%s", String::as_str));
            rest = tail;
            continue;
        }
        for (placeholder, value) in &named {
            if let Some(tail) = rest.strip_prefix(*placeholder) {
                description.push_str(value);
                rest = tail;
                continue 'scan;
            }
        }
        description.push(c);
        rest = &rest[c.len_utf8()..];
    }

    description
}

pub fn build_message(cfg: &WebhookConfig, link: &FileLinkEvent, now: DateTime<Utc>) -> DiscordMessage {
    DiscordMessage {
        embeds: vec![DiscordEmbed {
            title: EMBED_TITLE.to_string(),
            description: render_description(&cfg.message_template, link),
            color: cfg.embed_color,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Secs, true),
            footer: EmbedFooter {
                text: cfg.footer_text.clone(),
            },
        }],
    }
}

pub fn get_http_client(cfg: &WebhookConfig) -> Result<reqwest::Client, DispatchError> {
    Ok(reqwest::Client::builder().timeout(cfg.timeout).build()?)
}

#[instrument(skip_all, fields(file = %link.file_name))]
pub async fn dispatch(
    client: &reqwest::Client,
    cfg: &WebhookConfig,
    link: &FileLinkEvent,
) -> Result<(), DispatchError> {
    let webhook_url = cfg
        .webhook_url
        .as_deref()
        .ok_or(DispatchError::MissingWebhookUrl)?;
    let message = build_message(cfg, link, Utc::now());

    let res = client.post(webhook_url).json(&message).send().await?;
    let status = res.status();

    if !status.is_success() {
        return Err(DispatchError::Status(status.as_u16()));
    }

    info!(bucket = %link.bucket, status = status.as_u16(), "delivered link to webhook");

    Ok(())
}
