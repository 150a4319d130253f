//! The rating request controller.
//!
//! Owns one [`ViewState`], drives it through a fetch with [`load`], and
//! exposes read-only projections for a renderer.
//!
//! # Lifecycle
//!
//! ```text
//!            load()                 fetch ok
//! Loading ─────────► Loading ───────────────► Loaded
//!    ▲                  │
//!    │ retry()          │ fetch err
//!    └──────── Failed ◄─┘
//! ```
//!
//! Every `load()` republishes `Loading` before it fetches, even when a fetch
//! is already in flight. Overlapping loads are resolved by the controller's
//! [`CompletionPolicy`].
//!
//! [`load`]: RatingRequestController::load

use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use crate::error::{ProviderError, Result};
use crate::projection::RatingDisplay;
use crate::provider::AppRatingProviding;
use crate::review_url::{review_request_url, LogOnlyOpener, UrlOpener};
use crate::types::Review;
use crate::view_state::ViewState;

/// Callback fired on a user action.
pub type ActionCallback = Arc<dyn Fn() + Send + Sync>;

/// Callback fired once per failed fetch, with the provider's error.
pub type ErrorCallback = Arc<dyn Fn(&ProviderError) + Send + Sync>;

/// How completions of overlapping `load()` calls are applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CompletionPolicy {
    /// Apply every completion; whichever fetch resolves last wins, even if
    /// it was started first.
    #[default]
    LastToResolve,

    /// Apply only the completion of the most recent `load()`; earlier
    /// fetches that finish later are discarded without touching state.
    LatestRequestWins,
}

/// View-model for the "rate this app" prompt.
///
/// Cheap to clone; clones drive and observe the same state.
///
/// # Example
///
/// ```rust,ignore
/// let controller = RatingRequestController::builder("1234567890", provider)
///     .on_rating_requested(|| println!("thanks!"))
///     .on_error(|err| tracing::error!(error = %err, "rating fetch failed"))
///     .build();
///
/// controller.load().await;
/// for review in controller.visible_reviews() {
///     println!("{}: {}", review.author, review.title);
/// }
/// ```
#[derive(Clone)]
pub struct RatingRequestController {
    inner: Arc<Inner>,
}

struct Inner {
    app_id: String,
    provider: Arc<dyn AppRatingProviding>,
    opener: Arc<dyn UrlOpener>,
    on_rating_requested: Option<ActionCallback>,
    on_maybe_later: Option<ActionCallback>,
    on_error: Option<ErrorCallback>,
    policy: CompletionPolicy,
    state: watch::Sender<ViewState>,
    /// Ticket of the most recent `load()`.
    latest_ticket: AtomicU64,
}

impl RatingRequestController {
    /// Start building a controller for `app_id`, fed by `provider`.
    pub fn builder(
        app_id: impl Into<String>,
        provider: impl AppRatingProviding + 'static,
    ) -> RatingRequestControllerBuilder {
        RatingRequestControllerBuilder::new(app_id.into(), Arc::new(provider))
    }

    /// A controller with no callbacks and a logging-only URL opener.
    pub fn new(app_id: impl Into<String>, provider: impl AppRatingProviding + 'static) -> Self {
        Self::builder(app_id, provider).build()
    }

    pub fn app_id(&self) -> &str {
        &self.inner.app_id
    }

    pub fn completion_policy(&self) -> CompletionPolicy {
        self.inner.policy
    }

    /// Fetch rating data and publish the outcome.
    ///
    /// Failures never escape: they become [`ViewState::Failed`], after which
    /// the `on_error` callback sees the original error.
    pub async fn load(&self) {
        let inner = &self.inner;
        let ticket = inner.latest_ticket.fetch_add(1, Ordering::SeqCst) + 1;

        inner.state.send_replace(ViewState::Loading);
        debug!(app_id = %inner.app_id, ticket, "Fetching app rating");

        let result = inner.provider.fetch().await;

        if inner.policy == CompletionPolicy::LatestRequestWins {
            let latest = inner.latest_ticket.load(Ordering::SeqCst);
            if latest != ticket {
                debug!(ticket, latest, "Discarding superseded rating fetch");
                return;
            }
        }

        match result {
            Ok(summary) => {
                info!(
                    app_id = %inner.app_id,
                    average_rating = summary.average_rating,
                    total_ratings = summary.total_ratings,
                    reviews = summary.reviews.len(),
                    "App rating loaded"
                );
                inner.state.send_replace(ViewState::Loaded(summary));
            }
            Err(error) => {
                let message = error.to_string();
                warn!(app_id = %inner.app_id, error = %message, "App rating fetch failed");
                inner.state.send_replace(ViewState::Failed(message));

                if let Some(on_error) = &inner.on_error {
                    on_error(&error);
                }
            }
        }
    }

    /// Schedule a fresh [`load`](Self::load) and return immediately.
    ///
    /// The handle may be awaited or dropped. Must be called from within a
    /// Tokio runtime.
    pub fn retry(&self) -> JoinHandle<()> {
        debug!(app_id = %self.inner.app_id, "Retrying app rating fetch");
        let controller = self.clone();
        tokio::spawn(async move { controller.load().await })
    }

    /// Open the App Store review page, then fire `on_rating_requested`.
    ///
    /// Does not touch the view state. The app id is used as given; only a
    /// link that fails to parse skips the opener and the callback.
    pub fn request_rating(&self) -> Result<()> {
        let url = review_request_url(&self.inner.app_id)?;

        info!(%url, "Opening App Store review page");
        self.inner.opener.open(&url);

        if let Some(on_rating_requested) = &self.inner.on_rating_requested {
            on_rating_requested();
        }
        Ok(())
    }

    /// Defer rating; fires `on_maybe_later` if one was registered.
    pub fn choose_maybe_later(&self) {
        debug!(app_id = %self.inner.app_id, "User chose maybe later");
        if let Some(on_maybe_later) = &self.inner.on_maybe_later {
            on_maybe_later();
        }
    }

    /// Current state.
    pub fn state(&self) -> ViewState {
        self.inner.state.borrow().clone()
    }

    /// Receiver that is notified on every state transition.
    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.inner.state.subscribe()
    }

    /// All projections of the current state at once.
    pub fn display(&self) -> RatingDisplay {
        RatingDisplay::from(&*self.inner.state.borrow())
    }

    pub fn is_loading(&self) -> bool {
        self.inner.state.borrow().is_loading()
    }

    pub fn visible_reviews(&self) -> Vec<Review> {
        self.inner.state.borrow().visible_reviews().to_vec()
    }

    pub fn display_average_rating(&self) -> f64 {
        self.inner.state.borrow().display_average_rating()
    }

    pub fn display_total_ratings(&self) -> u64 {
        self.inner.state.borrow().display_total_ratings()
    }

    pub fn is_empty_ratings(&self) -> bool {
        self.inner.state.borrow().is_empty_ratings()
    }

    pub fn is_empty_reviews(&self) -> bool {
        self.inner.state.borrow().is_empty_reviews()
    }

    pub fn error_message(&self) -> Option<String> {
        self.inner.state.borrow().error_message().map(str::to_owned)
    }
}

impl fmt::Debug for RatingRequestController {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RatingRequestController")
            .field("app_id", &self.inner.app_id)
            .field("state", &self.inner.state.borrow().label())
            .field("policy", &self.inner.policy)
            .finish_non_exhaustive()
    }
}

/// Builder for [`RatingRequestController`].
pub struct RatingRequestControllerBuilder {
    app_id: String,
    provider: Arc<dyn AppRatingProviding>,
    opener: Arc<dyn UrlOpener>,
    on_rating_requested: Option<ActionCallback>,
    on_maybe_later: Option<ActionCallback>,
    on_error: Option<ErrorCallback>,
    policy: CompletionPolicy,
}

impl RatingRequestControllerBuilder {
    fn new(app_id: String, provider: Arc<dyn AppRatingProviding>) -> Self {
        Self {
            app_id,
            provider,
            opener: Arc::new(LogOnlyOpener),
            on_rating_requested: None,
            on_maybe_later: None,
            on_error: None,
            policy: CompletionPolicy::default(),
        }
    }

    /// Capability used by `request_rating` to open the review page.
    pub fn url_opener(mut self, opener: impl UrlOpener + 'static) -> Self {
        self.opener = Arc::new(opener);
        self
    }

    pub fn on_rating_requested(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_rating_requested = Some(Arc::new(callback));
        self
    }

    pub fn on_maybe_later(mut self, callback: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_maybe_later = Some(Arc::new(callback));
        self
    }

    pub fn on_error(
        mut self,
        callback: impl Fn(&ProviderError) + Send + Sync + 'static,
    ) -> Self {
        self.on_error = Some(Arc::new(callback));
        self
    }

    pub fn completion_policy(mut self, policy: CompletionPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn build(self) -> RatingRequestController {
        let (state, _) = watch::channel(ViewState::Loading);
        RatingRequestController {
            inner: Arc::new(Inner {
                app_id: self.app_id,
                provider: self.provider,
                opener: self.opener,
                on_rating_requested: self.on_rating_requested,
                on_maybe_later: self.on_maybe_later,
                on_error: self.on_error,
                policy: self.policy,
                state,
                latest_ticket: AtomicU64::new(0),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MockProviderError;
    use crate::provider::MockAppRatingProvider;
    use std::sync::atomic::AtomicUsize;
    use std::sync::Mutex;
    use std::time::Duration;

    fn instant(provider: MockAppRatingProvider) -> MockAppRatingProvider {
        provider.with_delay(Duration::ZERO)
    }

    #[tokio::test]
    async fn test_new_controller_is_loading() {
        let controller =
            RatingRequestController::new("1", instant(MockAppRatingProvider::no_reviews()));

        assert_eq!(controller.state(), ViewState::Loading);
        assert!(controller.is_loading());
        assert!(controller.visible_reviews().is_empty());
        assert_eq!(controller.display_average_rating(), 5.0);
        assert_eq!(controller.display_total_ratings(), 0);
    }

    #[tokio::test]
    async fn test_load_publishes_loaded_summary() {
        let controller = RatingRequestController::new(
            "1",
            instant(MockAppRatingProvider::with_mock_reviews()),
        );

        controller.load().await;

        assert!(controller.state().summary().is_some());
        assert_eq!(controller.display_average_rating(), 4.2);
        assert_eq!(controller.display_total_ratings(), 1250);
        assert_eq!(controller.visible_reviews().len(), 6);
        assert!(!controller.is_empty_ratings());
        assert!(!controller.is_empty_reviews());
        assert_eq!(controller.error_message(), None);
    }

    #[tokio::test]
    async fn test_error_callback_sees_failed_state() {
        let observed = Arc::new(Mutex::new(None));
        let controller_slot: Arc<Mutex<Option<RatingRequestController>>> =
            Arc::new(Mutex::new(None));

        let controller = {
            let observed = observed.clone();
            let slot = controller_slot.clone();
            RatingRequestController::builder(
                "1",
                instant(MockAppRatingProvider::throws_error()),
            )
            .on_error(move |err| {
                let state = slot.lock().unwrap().as_ref().map(|c| c.state());
                *observed.lock().unwrap() = Some((
                    err.downcast_ref::<MockProviderError>().cloned(),
                    state,
                ));
            })
            .build()
        };
        *controller_slot.lock().unwrap() = Some(controller.clone());

        controller.load().await;

        let (error, state) = observed.lock().unwrap().take().unwrap();
        assert_eq!(error, Some(MockProviderError::Generic));
        assert!(matches!(state, Some(ViewState::Failed(_))));
        assert_eq!(
            controller.error_message().as_deref(),
            Some("A generic error occurred while fetching the app rating.")
        );
    }

    #[tokio::test]
    async fn test_choose_maybe_later_leaves_state_alone() {
        let calls = Arc::new(AtomicUsize::new(0));
        let opened = Arc::new(AtomicUsize::new(0));
        let controller = {
            let calls = calls.clone();
            let opened = opened.clone();
            RatingRequestController::builder("1", instant(MockAppRatingProvider::no_reviews()))
                .on_maybe_later(move || {
                    calls.fetch_add(1, Ordering::SeqCst);
                })
                .url_opener(move |_: &url::Url| {
                    opened.fetch_add(1, Ordering::SeqCst);
                })
                .build()
        };

        controller.choose_maybe_later();

        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(opened.load(Ordering::SeqCst), 0);
        assert_eq!(controller.state(), ViewState::Loading);
    }

    #[tokio::test]
    async fn test_absent_callbacks_are_noops() {
        let controller =
            RatingRequestController::new("99", instant(MockAppRatingProvider::throws_error()));

        controller.load().await;
        controller.choose_maybe_later();
        controller.request_rating().unwrap();

        assert!(controller.error_message().is_some());
    }

    #[tokio::test]
    async fn test_request_rating_opens_non_numeric_app_ids() {
        for app_id in ["com.example.app", "123-456", ""] {
            let opened = Arc::new(Mutex::new(Vec::new()));
            let requested = Arc::new(AtomicUsize::new(0));
            let controller = {
                let opened = opened.clone();
                let requested = requested.clone();
                RatingRequestController::builder(app_id, instant(MockAppRatingProvider::no_reviews()))
                    .url_opener(move |url: &url::Url| {
                        opened.lock().unwrap().push(url.to_string());
                    })
                    .on_rating_requested(move || {
                        requested.fetch_add(1, Ordering::SeqCst);
                    })
                    .build()
            };

            controller.request_rating().unwrap();

            assert_eq!(
                opened.lock().unwrap().as_slice(),
                [format!("https://apps.apple.com/app/id{app_id}?action=write-review")]
            );
            assert_eq!(requested.load(Ordering::SeqCst), 1);
        }
    }

    #[tokio::test]
    async fn test_subscribers_see_transitions() {
        let controller = RatingRequestController::new(
            "1",
            instant(MockAppRatingProvider::no_reviews()),
        );
        let mut rx = controller.subscribe();

        controller.load().await;

        assert!(rx.has_changed().unwrap());
        assert!(rx.borrow_and_update().summary().is_some());
    }

    #[test]
    fn test_debug_does_not_dump_callbacks() {
        let controller = RatingRequestController::builder(
            "7",
            MockAppRatingProvider::no_reviews(),
        )
        .completion_policy(CompletionPolicy::LatestRequestWins)
        .build();

        let rendered = format!("{controller:?}");

        assert!(rendered.contains("app_id: \"7\""));
        assert!(rendered.contains("loading"));
        assert!(rendered.contains("LatestRequestWins"));
    }
}
