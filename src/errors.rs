use reqwest::StatusCode;
use std::fmt::{self, Formatter};
use thiserror::Error;
use url::Url;

use crate::api::ErrorResponse;

/// A response from the repository with a status the client doesn't
/// know how to decode.
#[derive(Debug, Error)]
pub struct RequestFailure {
    pub url: Url,
    pub status: StatusCode,
    /// Raw response body, as received.
    pub msg: String,
}

impl RequestFailure {
    pub fn new(url: Url, status: StatusCode, msg: impl Into<String>) -> Self {
        Self {
            url,
            status,
            msg: msg.into(),
        }
    }

    /// Message from the `{"error": "..."}` body the server sends on
    /// failures, if the body has that shape.
    #[must_use]
    pub fn server_message(&self) -> Option<String> {
        serde_json::from_str::<ErrorResponse>(&self.msg)
            .ok()
            .map(|response| response.error)
            .filter(|error| !error.is_empty())
    }

    fn suggestions(&self) -> &'static [&'static str] {
        match self.status {
            StatusCode::BAD_REQUEST => &[
                "Check that the addresses are checksummed hex strings",
                "Check that the chain IDs are numeric",
            ],
            StatusCode::TOO_MANY_REQUESTS => &[
                "Wait a moment before retrying",
                "Consider reducing request frequency",
            ],
            status if status.is_server_error() => &[
                "The repository may be temporarily unavailable",
                "Check the service status with the health command",
            ],
            _ => &["Check that the base URL points to a Sourcify server"],
        }
    }
}

impl fmt::Display for RequestFailure {
    fn fmt(&self, formatter: &mut Formatter) -> fmt::Result {
        writeln!(
            formatter,
            "[E004] Request to {} returned {}",
            self.url, self.status
        )?;
        writeln!(formatter, "\nServer response: {}", self.msg)?;
        writeln!(formatter, "\nSuggestions:")?;
        for suggestion in self.suggestions() {
            writeln!(formatter, "  • {suggestion}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn url() -> Url {
        Url::parse("https://sourcify.dev/server/chains").unwrap()
    }

    #[test]
    fn test_server_message_from_error_body() {
        let failure = RequestFailure::new(
            url(),
            StatusCode::BAD_REQUEST,
            r#"{"error":"Invalid chainIds"}"#,
        );
        assert_eq!(failure.server_message().as_deref(), Some("Invalid chainIds"));
    }

    #[test]
    fn test_server_message_absent_for_plain_text() {
        let failure = RequestFailure::new(url(), StatusCode::BAD_GATEWAY, "upstream down");
        assert_eq!(failure.server_message(), None);
    }

    #[test]
    fn test_display_keeps_raw_body() {
        let failure = RequestFailure::new(url(), StatusCode::INTERNAL_SERVER_ERROR, "boom");
        let message = format!("{failure}");
        assert!(message.contains("[E004]"));
        assert!(message.contains("500"));
        assert!(message.contains("Server response: boom"));
        assert!(message.contains("temporarily unavailable"));
    }
}
