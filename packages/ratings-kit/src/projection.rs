//! Display values derived from a [`ViewState`].
//!
//! Everything here is a pure function of the state: nothing is cached, and
//! calling a projection twice without a transition in between gives the same
//! answer.

use crate::types::Review;
use crate::view_state::ViewState;

/// Upper bound on the number of reviews handed to a renderer.
pub const MAX_VISIBLE_REVIEWS: usize = 7;

/// Average shown while nothing is loaded, so skeletons render full stars.
pub const FALLBACK_AVERAGE_RATING: f64 = 5.0;

impl ViewState {
    /// The first [`MAX_VISIBLE_REVIEWS`] reviews when loaded, else nothing.
    pub fn visible_reviews(&self) -> &[Review] {
        match self {
            Self::Loaded(summary) => {
                let end = summary.reviews.len().min(MAX_VISIBLE_REVIEWS);
                &summary.reviews[..end]
            }
            _ => &[],
        }
    }

    pub fn display_average_rating(&self) -> f64 {
        self.summary()
            .map_or(FALLBACK_AVERAGE_RATING, |summary| summary.average_rating)
    }

    pub fn display_total_ratings(&self) -> u64 {
        self.summary().map_or(0, |summary| summary.total_ratings)
    }

    /// Loaded, and nobody has rated the app yet.
    pub fn is_empty_ratings(&self) -> bool {
        self.summary()
            .is_some_and(|summary| summary.total_ratings == 0)
    }

    /// Not loading, and there are no reviews to show.
    ///
    /// Holds for a failed fetch as well as a loaded summary without reviews.
    pub fn is_empty_reviews(&self) -> bool {
        !self.is_loading() && self.visible_reviews().is_empty()
    }
}

/// Snapshot of every projection, for renderers that redraw wholesale.
#[derive(Debug, Clone, PartialEq)]
pub struct RatingDisplay {
    pub is_loading: bool,
    pub visible_reviews: Vec<Review>,
    pub average_rating: f64,
    pub total_ratings: u64,
    pub is_empty_ratings: bool,
    pub is_empty_reviews: bool,
    pub error_message: Option<String>,
}

impl From<&ViewState> for RatingDisplay {
    fn from(state: &ViewState) -> Self {
        Self {
            is_loading: state.is_loading(),
            visible_reviews: state.visible_reviews().to_vec(),
            average_rating: state.display_average_rating(),
            total_ratings: state.display_total_ratings(),
            is_empty_ratings: state.is_empty_ratings(),
            is_empty_reviews: state.is_empty_reviews(),
            error_message: state.error_message().map(str::to_owned),
        }
    }
}
