use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Bucket and key of a single "Object Created" notification.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObjectCreated {
    pub bucket: String,
    pub key: String,
}

impl ObjectCreated {
    /// Reads `detail.bucket.name` and `detail.object.key` from an EventBridge S3 notification.
    ///
    /// Returns `None` when either is missing, empty or not a string.
    pub fn from_event(event: &Value) -> Option<Self> {
        let bucket = non_empty_str(event.pointer("/detail/bucket/name"))?;
        let key = non_empty_str(event.pointer("/detail/object/key"))?;

        Some(ObjectCreated {
            bucket: bucket.to_string(),
            key: key.to_string(),
        })
    }
}

fn non_empty_str(value: Option<&Value>) -> Option<&str> {
    value.and_then(Value::as_str).filter(|s| !s.is_empty())
}

/// Payload published for downstream consumers once a link has been generated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FileLinkEvent {
    pub file_name: String,
    pub file_url: String,
    pub bucket: String,
    pub expiration_time: String,
    pub timestamp: String,
}

impl FileLinkEvent {
    pub fn new(
        object: &ObjectCreated,
        file_url: String,
        expiration_time: String,
        now: DateTime<Utc>,
    ) -> Self {
        FileLinkEvent {
            file_name: object.key.clone(),
            file_url,
            bucket: object.bucket.clone(),
            expiration_time,
            timestamp: now.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use serde_json::json;

    #[test]
    fn reads_bucket_and_key() {
        let event = json!({
            "version": "0",
            "detail-type": "Object Created",
            "source": "aws.s3",
            "detail": {
                "bucket": { "name": "my-bucket" },
                "object": { "key": "uploads/report.pdf", "size": 1024 }
            }
        });

        assert_eq!(
            ObjectCreated::from_event(&event),
            Some(ObjectCreated {
                bucket: "my-bucket".to_string(),
                key: "uploads/report.pdf".to_string(),
            })
        );
    }

    #[test]
    fn missing_or_empty_fields_are_rejected() {
        let cases = [
            json!({}),
            json!({ "detail": {} }),
            json!({ "detail": { "bucket": { "name": "b" } } }),
            json!({ "detail": { "object": { "key": "k" } } }),
            json!({ "detail": { "bucket": { "name": "" }, "object": { "key": "k" } } }),
            json!({ "detail": { "bucket": { "name": "b" }, "object": { "key": "" } } }),
            json!({ "detail": { "bucket": { "name": 7 }, "object": { "key": "k" } } }),
            json!("not an event"),
        ];

        for event in cases {
            assert_eq!(ObjectCreated::from_event(&event), None, "{}", event);
        }
    }

    #[test]
    fn link_event_uses_camel_case() {
        let object = ObjectCreated {
            bucket: "my-bucket".to_string(),
            key: "report.pdf".to_string(),
        };
        let now = Utc.with_ymd_and_hms(2024, 5, 1, 12, 30, 0).unwrap();
        let event = FileLinkEvent::new(
            &object,
            "https://signed".to_string(),
            "1 day".to_string(),
            now,
        );

        assert_eq!(
            serde_json::to_value(&event).unwrap(),
            json!({
                "fileName": "report.pdf",
                "fileUrl": "https://signed",
                "bucket": "my-bucket",
                "expirationTime": "1 day",
                "timestamp": "2024-05-01T12:30:00.000Z"
            })
        );
    }
}
