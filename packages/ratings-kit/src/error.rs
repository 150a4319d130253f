//! Typed errors for the ratings kit.
//!
//! Uses `thiserror` for library errors (not `anyhow`). Provider failures are
//! deliberately opaque: the controller only ever needs their description.

use thiserror::Error;

/// Result type for ratings kit operations.
pub type Result<T> = std::result::Result<T, RatingsError>;

/// The failure a rating provider raises.
///
/// The controller stores `to_string()` of this error in the failed state and
/// hands the error itself to the `on_error` callback, where it can be
/// downcast back to the provider's concrete type.
pub type ProviderError = Box<dyn std::error::Error + Send + Sync>;

/// Errors raised by the ratings kit itself.
#[derive(Debug, Error)]
pub enum RatingsError {
    /// The App Store review URL could not be built from the app id
    #[error("invalid app id: {app_id:?}")]
    InvalidAppId { app_id: String },

    /// A rating summary fixture was not valid JSON
    #[error("fixture parse error: {0}")]
    Fixture(#[from] serde_json::Error),

    /// Reading a fixture failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Errors raised by [`MockAppRatingProvider`](crate::provider::MockAppRatingProvider).
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MockProviderError {
    /// A generic error used for exercising error handling.
    #[error("A generic error occurred while fetching the app rating.")]
    Generic,
}
