//! Rating data provider trait and bundled implementations.
//!
//! The controller never talks to a backend itself. It asks an
//! [`AppRatingProviding`] implementation for a [`RatingSummary`] and treats
//! any failure as opaque.
//!
//! # Implementations
//!
//! - [`MockAppRatingProvider`] - canned summaries with a simulated delay
//! - [`JsonFileProvider`] - reads a summary fixture from disk on every fetch

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use chrono::Utc;

use crate::error::{MockProviderError, ProviderError};
use crate::types::{RatingSummary, Review};

/// Source of app rating and review data.
///
/// # Example
///
/// ```rust,ignore
/// struct StoreProvider { client: MyStoreClient }
///
/// #[async_trait]
/// impl AppRatingProviding for StoreProvider {
///     async fn fetch(&self) -> Result<RatingSummary, ProviderError> {
///         let summary = self.client.lookup().await?;
///         Ok(summary)
///     }
/// }
/// ```
#[async_trait]
pub trait AppRatingProviding: Send + Sync {
    /// Fetch the current rating summary.
    async fn fetch(&self) -> Result<RatingSummary, ProviderError>;
}

#[async_trait]
impl<P: AppRatingProviding + ?Sized> AppRatingProviding for Arc<P> {
    async fn fetch(&self) -> Result<RatingSummary, ProviderError> {
        (**self).fetch().await
    }
}

/// Simulated network latency of the mock presets.
pub const MOCK_DELAY: Duration = Duration::from_secs(3);

/// Mock provider for previews and tests.
///
/// Returns a predefined summary after a delay, or fails with
/// [`MockProviderError::Generic`]. Clones share call tracking.
///
/// # Example
///
/// ```rust,ignore
/// let provider = MockAppRatingProvider::with_mock_reviews()
///     .with_delay(Duration::ZERO)
///     .fail_first(1);
///
/// assert!(provider.fetch().await.is_err());
/// assert!(provider.fetch().await.is_ok());
/// assert_eq!(provider.fetch_count(), 2);
/// ```
#[derive(Debug, Clone)]
pub struct MockAppRatingProvider {
    response: RatingSummary,
    always_fail: bool,
    delay: Duration,
    failures_remaining: Arc<AtomicUsize>,
    fetch_calls: Arc<AtomicUsize>,
}

impl MockAppRatingProvider {
    /// Create a provider that returns `response`.
    pub fn new(response: RatingSummary) -> Self {
        Self {
            response,
            always_fail: false,
            delay: MOCK_DELAY,
            failures_remaining: Arc::new(AtomicUsize::new(0)),
            fetch_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// An app with ratings but no reviews.
    pub fn no_reviews() -> Self {
        Self::new(RatingSummary::new(4.8, 15, Vec::new()))
    }

    /// An app with no ratings and no reviews.
    pub fn no_ratings_or_reviews() -> Self {
        Self::new(RatingSummary::empty())
    }

    /// An app with ratings and the sample reviews.
    pub fn with_mock_reviews() -> Self {
        Self::new(RatingSummary::new(4.2, 1250, Review::samples(Utc::now())))
    }

    /// A provider whose every fetch fails.
    pub fn throws_error() -> Self {
        Self::new(RatingSummary::empty()).failing()
    }

    /// Make every fetch fail.
    pub fn failing(mut self) -> Self {
        self.always_fail = true;
        self
    }

    /// Make the next `count` fetches fail; later fetches succeed.
    pub fn fail_first(self, count: usize) -> Self {
        self.failures_remaining.store(count, Ordering::SeqCst);
        self
    }

    /// Change the simulated latency.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = delay;
        self
    }

    /// Number of fetches started so far, across clones.
    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn take_failure(&self) -> bool {
        self.failures_remaining
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

#[async_trait]
impl AppRatingProviding for MockAppRatingProvider {
    async fn fetch(&self) -> Result<RatingSummary, ProviderError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);

        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }

        if self.always_fail || self.take_failure() {
            return Err(Box::new(MockProviderError::Generic));
        }

        Ok(self.response.clone())
    }
}

/// Provider that reads a JSON summary fixture on every fetch.
///
/// Useful for hosts that want to preview real-looking data without a
/// backend. Read and parse errors surface as fetch failures.
#[derive(Debug, Clone)]
pub struct JsonFileProvider {
    path: PathBuf,
}

impl JsonFileProvider {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &std::path::Path {
        &self.path
    }
}

#[async_trait]
impl AppRatingProviding for JsonFileProvider {
    async fn fetch(&self) -> Result<RatingSummary, ProviderError> {
        tracing::debug!(path = %self.path.display(), "Reading rating fixture");
        Ok(RatingSummary::from_json_file(&self.path).await?)
    }
}
