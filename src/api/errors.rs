use thiserror::Error;
use url::Url;

use crate::errors::RequestFailure;

#[derive(Debug, Error)]
pub enum ApiClientError {
    #[error("[E001] Invalid base URL: {0}\n\nSuggestions:\n  • Provide a valid HTTP or HTTPS URL\n  • Example: https://sourcify.dev/\n  • Ensure the URL includes the protocol (http:// or https://)")]
    CannotBeBase(Url),

    #[error("[E002] Invalid URL format: {0}\n\nSuggestions:\n  • Check the URL format is correct\n  • Use absolute URLs with protocol (http:// or https://)")]
    InvalidUrl(#[from] url::ParseError),

    #[error("[E003] Nothing found at {0}\n\nSuggestions:\n  • Check that the contract is verified on this chain\n  • Check the address and chain ID")]
    NotFound(Url),

    #[error(transparent)]
    Failure(#[from] RequestFailure),

    #[error("[E005] Couldn't decode response from {url}: {source}")]
    Decode {
        url: Url,
        #[source]
        source: serde_json::Error,
    },

    #[error("[E006] Request was cancelled")]
    Cancelled,

    #[error(transparent)]
    Reqwest(#[from] reqwest::Error),
}

impl ApiClientError {
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::CannotBeBase(_) => "E001",
            Self::InvalidUrl(_) => "E002",
            Self::NotFound(_) => "E003",
            Self::Failure(_) => "E004",
            Self::Decode { .. } => "E005",
            Self::Cancelled => "E006",
            Self::Reqwest(_) => "E999", // Network errors get generic code
        }
    }

    /// Whether the repository has nothing for the requested resource,
    /// e.g. the contract isn't verified.
    pub const fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound(_))
    }
}
