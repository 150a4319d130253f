//! Headless core of an in-app "rate this app" prompt.
//!
//! Fetches an app's aggregate rating and reviews through an injected
//! provider, tracks the fetch as a three-state [`ViewState`], and exposes
//! read-only projections plus the "rate now" / "maybe later" actions. No
//! rendering happens here; any UI can consume the projections.
//!
//! # Example
//!
//! ```rust,ignore
//! use ratings_kit::{MockAppRatingProvider, RatingRequestController};
//!
//! let controller = RatingRequestController::builder("1234567890", MockAppRatingProvider::with_mock_reviews())
//!     .url_opener(|url: &url::Url| println!("open {url}"))
//!     .on_maybe_later(|| println!("ok, later"))
//!     .build();
//!
//! controller.load().await;
//! println!("{} from {} ratings", controller.display_average_rating(), controller.display_total_ratings());
//!
//! if controller.error_message().is_some() {
//!     controller.retry();
//! }
//! ```

pub mod controller;
pub mod display;
pub mod error;
pub mod projection;
pub mod provider;
pub mod review_url;
pub mod types;
pub mod view_state;

pub use controller::{
    ActionCallback, CompletionPolicy, ErrorCallback, RatingRequestController,
    RatingRequestControllerBuilder,
};
pub use error::{MockProviderError, ProviderError, RatingsError, Result};
pub use projection::{RatingDisplay, FALLBACK_AVERAGE_RATING, MAX_VISIBLE_REVIEWS};
pub use provider::{AppRatingProviding, JsonFileProvider, MockAppRatingProvider};
pub use review_url::{review_request_url, LogOnlyOpener, UrlOpener};
pub use types::{RatingSummary, Review};
pub use view_state::ViewState;
