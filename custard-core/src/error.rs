//! Core error types for custard.
//!
//! [`ProviderError`] is the failure taxonomy every adapter reports through.
//! Callers can match broadly (any `ProviderError`) or narrowly on a variant;
//! transport failures are grouped under [`CommunicationError`].

use std::time::Duration;

use thiserror::Error;

/// Boxed error used to preserve the low-level cause of a provider failure.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

// ============================================================================
// Core Error
// ============================================================================

/// Error type for model construction and conversion.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Unknown provider identifier.
    #[error("Provider not found: {0}")]
    ProviderNotFound(String),

    /// Invalid data in a model.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Serialization/deserialization error.
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

// ============================================================================
// Communication Error
// ============================================================================

/// Failure talking to a vendor at the transport level.
#[derive(Debug, Error)]
pub enum CommunicationError {
    /// The request exceeded the configured per-attempt timeout.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// The vendor signaled throttling.
    #[error("Rate limited by provider (retry after {retry_after:?}s)")]
    RateLimit {
        /// Seconds the vendor asked us to wait, if it said.
        retry_after: Option<u64>,
    },

    /// Connection-level failure.
    #[error("Network error: {message}")]
    Network {
        /// Short description.
        message: String,
        /// Underlying transport error.
        #[source]
        source: Option<BoxError>,
    },

    /// The vendor answered, but not with something usable (e.g. HTTP 500).
    #[error("Unexpected response: {0}")]
    Protocol(String),

    /// The host cancelled the operation.
    #[error("Request cancelled")]
    Cancelled,
}

// ============================================================================
// Provider Error
// ============================================================================

/// Error returned by [`FlavorProvider`](crate::FlavorProvider) operations.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// Transport failure after the retry budget was spent.
    #[error(transparent)]
    Communication(#[from] CommunicationError),

    /// The vendor rejected our credentials.
    ///
    /// No current vendor needs credentials; hosts map this to a
    /// "needs reconfiguration" state.
    #[error("Authentication failed: {0}")]
    Authentication(String),

    /// The requested store does not exist per the vendor's data.
    #[error("Location not found: {store_id}")]
    LocationNotFound {
        /// The store id that was looked up.
        store_id: String,
        /// What made the lookup fail, if anything beyond absence.
        #[source]
        source: Option<BoxError>,
    },

    /// The location exists but no flavor could be extracted.
    #[error("Flavor not available: {message}")]
    FlavorNotAvailable {
        /// Context for the failure.
        message: String,
        /// The extraction error that caused it.
        #[source]
        source: Option<BoxError>,
    },

    /// The adapter was constructed with an invalid configuration.
    #[error("Invalid provider configuration: {0}")]
    Config(String),

    /// Catch-all provider failure.
    #[error("{0}")]
    Other(String),
}

impl ProviderError {
    /// Builds a [`ProviderError::FlavorNotAvailable`] with no cause.
    pub fn flavor_not_available(message: impl Into<String>) -> Self {
        Self::FlavorNotAvailable {
            message: message.into(),
            source: None,
        }
    }

    /// Builds a [`ProviderError::FlavorNotAvailable`] that keeps `source` as its cause.
    pub fn flavor_not_available_from(
        message: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::FlavorNotAvailable {
            message: message.into(),
            source: Some(source.into()),
        }
    }

    /// Builds a [`ProviderError::LocationNotFound`] for `store_id`.
    pub fn location_not_found(store_id: impl Into<String>) -> Self {
        Self::LocationNotFound {
            store_id: store_id.into(),
            source: None,
        }
    }

    /// Builds a [`ProviderError::LocationNotFound`] that keeps `source` as its cause.
    pub fn location_not_found_from(
        store_id: impl Into<String>,
        source: impl Into<BoxError>,
    ) -> Self {
        Self::LocationNotFound {
            store_id: store_id.into(),
            source: Some(source.into()),
        }
    }

    /// Returns the classification of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Communication(CommunicationError::Timeout(_)) => ErrorKind::Timeout,
            Self::Communication(CommunicationError::RateLimit { .. }) => ErrorKind::RateLimit,
            Self::Communication(CommunicationError::Network { .. }) => ErrorKind::Network,
            Self::Communication(CommunicationError::Protocol(_)) => ErrorKind::Protocol,
            Self::Communication(CommunicationError::Cancelled) => ErrorKind::Cancelled,
            Self::Authentication(_) => ErrorKind::Authentication,
            Self::LocationNotFound { .. } => ErrorKind::LocationNotFound,
            Self::FlavorNotAvailable { .. } => ErrorKind::FlavorNotAvailable,
            Self::Config(_) => ErrorKind::Config,
            Self::Other(_) => ErrorKind::Other,
        }
    }

    /// Returns true for any [`CommunicationError`] subkind.
    pub fn is_communication(&self) -> bool {
        matches!(self, Self::Communication(_))
    }

    /// Returns true if the vendor rejected credentials.
    pub fn is_authentication(&self) -> bool {
        matches!(self, Self::Authentication(_))
    }

    /// Returns true if the next poll cycle could plausibly succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self.kind(),
            ErrorKind::Timeout | ErrorKind::RateLimit | ErrorKind::Network | ErrorKind::Protocol
        )
    }
}

// ============================================================================
// Error Kind
// ============================================================================

/// Flat classification of [`ProviderError`], used for host-facing reasons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Per-attempt timeout.
    Timeout,
    /// Vendor throttling.
    RateLimit,
    /// Connection failure.
    Network,
    /// Unusable response.
    Protocol,
    /// Cancelled by the host.
    Cancelled,
    /// Credentials rejected.
    Authentication,
    /// Unknown store.
    LocationNotFound,
    /// No flavor could be extracted.
    FlavorNotAvailable,
    /// Bad adapter configuration.
    Config,
    /// Anything else.
    Other,
}

impl ErrorKind {
    /// Short reason suitable for end users.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Timeout => "provider timed out",
            Self::RateLimit => "provider is rate limiting requests",
            Self::Network => "provider unreachable",
            Self::Protocol => "unexpected response from provider",
            Self::Cancelled => "update cancelled",
            Self::Authentication => "authentication required",
            Self::LocationNotFound => "location not found",
            Self::FlavorNotAvailable => "flavor not available",
            Self::Config => "invalid configuration",
            Self::Other => "update failed",
        }
    }
}

// ============================================================================
// Tests
// ============================================================================
