use crate::error::LinkError;
use http::StatusCode;
use serde::{Deserialize, Serialize};

pub const INVALID_EVENT: &str = "Invalid event structure";
pub const SIGNING_FAILED: &str = "Error generating pre-signed URL";
pub const PUBLISH_FAILED: &str = "Error publishing event to EventBridge";
pub const LINK_PUBLISHED: &str = "Successfully generated pre-signed URL and published event";

/// Status/body pair returned to the invoker, `body` is a JSON-encoded message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub status_code: u16,
    pub body: String,
}

impl LinkResponse {
    pub fn status(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// The decoded message carried in `body`.
    pub fn message(&self) -> Option<String> {
        serde_json::from_str(&self.body).ok()
    }
}

pub fn create_response(status: StatusCode, message: &str) -> LinkResponse {
    // Encoding a plain string cannot fail, the fallback only keeps this infallible.
    let body = serde_json::to_string(message).unwrap_or_else(|_| format!("{:?}", message));

    LinkResponse {
        status_code: status.as_u16(),
        body,
    }
}

pub fn ok() -> LinkResponse {
    create_response(StatusCode::OK, LINK_PUBLISHED)
}

pub fn bad_request() -> LinkResponse {
    create_response(StatusCode::BAD_REQUEST, INVALID_EVENT)
}

impl From<&LinkError> for LinkResponse {
    fn from(err: &LinkError) -> Self {
        match err {
            LinkError::InvalidInput => bad_request(),
            LinkError::Signing { .. } => {
                create_response(StatusCode::INTERNAL_SERVER_ERROR, SIGNING_FAILED)
            }
            LinkError::Publish { .. } => {
                create_response(StatusCode::INTERNAL_SERVER_ERROR, PUBLISH_FAILED)
            }
            LinkError::Unexpected(source) => create_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                &format!("Unexpected error: {}", source),
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lambda_runtime::Error;
    use serde_json::json;

    #[test]
    fn body_is_json_encoded() {
        let res = bad_request();

        assert_eq!(res.status(), StatusCode::BAD_REQUEST);
        assert_eq!(res.body, "\"Invalid event structure\"");
        assert_eq!(res.message().as_deref(), Some(INVALID_EVENT));
    }

    #[test]
    fn serializes_with_status_code_key() {
        assert_eq!(
            serde_json::to_value(ok()).unwrap(),
            json!({
                "statusCode": 200,
                "body": "\"Successfully generated pre-signed URL and published event\""
            })
        );
    }

    #[test]
    fn upstream_errors_map_to_500() {
        let signing = LinkError::Signing {
            bucket: "b".to_string(),
            key: "k".to_string(),
            source: Error::from("denied"),
        };
        let unexpected = LinkError::Unexpected(Error::from("boom"));

        let res = LinkResponse::from(&signing);
        assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(res.message().as_deref(), Some(SIGNING_FAILED));

        let res = LinkResponse::from(&unexpected);
        assert_eq!(res.status_code, 500);
        assert_eq!(res.message().as_deref(), Some("Unexpected error: boom"));
    }
}
