//! Fetch error types.

use std::time::Duration;

use custard_core::{CommunicationError, ProviderError};
use thiserror::Error;

// ============================================================================
// Main Fetch Error
// ============================================================================

/// Error type for fetch and extraction operations.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Transport-level HTTP failure (connect, reset, body read).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A single attempt exceeded the per-attempt timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The vendor answered 429.
    #[error("Rate limited, retry after {retry_after:?} seconds")]
    RateLimited {
        /// Seconds to wait before retrying.
        retry_after: Option<u64>,
    },

    /// Any other non-success HTTP status.
    #[error("HTTP {status} from {url}")]
    Status {
        /// Status code.
        status: u16,
        /// Requested URL.
        url: String,
    },

    /// The host cancelled the operation.
    #[error("Request cancelled")]
    Cancelled,

    /// JSON body did not parse.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A URL could not be built.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// A CSS selector failed to compile.
    #[error("Invalid selector `{selector}`: {message}")]
    Selector {
        /// The selector source.
        selector: String,
        /// Parser message.
        message: String,
    },

    /// Provider configuration is invalid.
    #[error("Invalid configuration: {0}")]
    Config(String),

    /// The page was fetched but the expected data was not in it.
    #[error("Extraction failed: {0}")]
    Extraction(String),

    /// The vendor reports the store is closed today.
    #[error("Store closed: {0}")]
    FlavorClosed(String),

    /// Every strategy in a pipeline missed.
    #[error("All strategies failed")]
    AllStrategiesFailed,
}

impl FetchError {
    /// Builds an [`FetchError::Extraction`].
    pub fn extraction(message: impl Into<String>) -> Self {
        Self::Extraction(message.into())
    }

    /// Returns true for transport-class failures that a retry could fix.
    pub fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::Http(_) | Self::Timeout(_) | Self::RateLimited { .. }
        )
    }

    /// Copies this error when it carries no foreign source.
    ///
    /// Returns `None` for wrapped `reqwest` and `serde_json` errors.
    pub fn try_clone(&self) -> Option<Self> {
        Some(match self {
            Self::Http(_) | Self::Json(_) => return None,
            Self::Timeout(d) => Self::Timeout(*d),
            Self::RateLimited { retry_after } => Self::RateLimited {
                retry_after: *retry_after,
            },
            Self::Status { status, url } => Self::Status {
                status: *status,
                url: url.clone(),
            },
            Self::Cancelled => Self::Cancelled,
            Self::InvalidUrl(msg) => Self::InvalidUrl(msg.clone()),
            Self::Selector { selector, message } => Self::Selector {
                selector: selector.clone(),
                message: message.clone(),
            },
            Self::Config(msg) => Self::Config(msg.clone()),
            Self::Extraction(msg) => Self::Extraction(msg.clone()),
            Self::FlavorClosed(msg) => Self::FlavorClosed(msg.clone()),
            Self::AllStrategiesFailed => Self::AllStrategiesFailed,
        })
    }

    /// Returns true if this error came from the page content, not the wire.
    pub fn is_extraction(&self) -> bool {
        matches!(
            self,
            Self::Json(_)
                | Self::Extraction(_)
                | Self::FlavorClosed(_)
                | Self::AllStrategiesFailed
                | Self::Selector { .. }
        )
    }
}

// ============================================================================
// Conversion to ProviderError
// ============================================================================

impl From<FetchError> for ProviderError {
    fn from(err: FetchError) -> Self {
        match err {
            FetchError::Timeout(d) => CommunicationError::Timeout(d).into(),
            FetchError::RateLimited { retry_after } => {
                CommunicationError::RateLimit { retry_after }.into()
            }
            FetchError::Http(e) if e.is_timeout() => {
                CommunicationError::Timeout(Duration::ZERO).into()
            }
            FetchError::Http(e) => CommunicationError::Network {
                message: e.to_string(),
                source: Some(Box::new(e)),
            }
            .into(),
            FetchError::Status { status: 401 | 403, url } => {
                ProviderError::Authentication(format!("access denied by {url}"))
            }
            FetchError::Status { status, url } => {
                CommunicationError::Protocol(format!("HTTP {status} from {url}")).into()
            }
            FetchError::Cancelled => CommunicationError::Cancelled.into(),
            FetchError::Config(msg) | FetchError::InvalidUrl(msg) => ProviderError::Config(msg),
            other => ProviderError::flavor_not_available_from(other.to_string(), other),
        }
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use custard_core::ErrorKind;
    use std::error::Error as _;

    #[test]
    fn test_status_classification() {
        let err: ProviderError = FetchError::Status {
            status: 503,
            url: "https://www.kopps.com/flavor-preview".into(),
        }
        .into();
        assert_eq!(err.kind(), ErrorKind::Protocol);

        let err: ProviderError = FetchError::Status {
            status: 403,
            url: "https://www.kopps.com/flavor-preview".into(),
        }
        .into();
        assert!(err.is_authentication());
    }

    #[test]
    fn test_transport_kinds() {
        let err: ProviderError = FetchError::RateLimited { retry_after: Some(3) }.into();
        assert_eq!(err.kind(), ErrorKind::RateLimit);

        let err: ProviderError = FetchError::Timeout(Duration::from_secs(30)).into();
        assert_eq!(err.kind(), ErrorKind::Timeout);

        let err: ProviderError = FetchError::Cancelled.into();
        assert_eq!(err.kind(), ErrorKind::Cancelled);
    }

    #[test]
    fn test_extraction_keeps_cause() {
        let err: ProviderError = FetchError::extraction("no day element").into();
        assert_eq!(err.kind(), ErrorKind::FlavorNotAvailable);
        assert!(err.source().is_some());
    }

    #[test]
    fn test_retry_classes() {
        assert!(FetchError::Timeout(Duration::from_secs(1)).is_transport());
        assert!(FetchError::RateLimited { retry_after: None }.is_transport());
        assert!(!FetchError::Status { status: 500, url: String::new() }.is_transport());
        assert!(!FetchError::Cancelled.is_transport());
        assert!(FetchError::AllStrategiesFailed.is_extraction());
    }
}
