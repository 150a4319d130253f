//! Pure helpers for renderers of the rating prompt.
//!
//! Nothing in here draws anything. These turn controller projections into
//! the small values a view needs: star fills, "2 days ago" labels, avatar
//! slots and copy.

mod relative_time;
mod stars;

pub use relative_time::RelativeTime;
pub use stars::{format_average, star_fill_ratios, STAR_COUNT};

/// Number of bundled reviewer avatars.
pub const AVATAR_COUNT: usize = 8;

/// Avatar slot for the review at `index`; out-of-range indices clamp to the
/// last slot.
pub fn avatar_index(index: usize) -> usize {
    index.min(AVATAR_COUNT - 1)
}

/// User-facing copy that hosts may override.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScreenConfiguration {
    pub screen_title: String,
    pub give_rating_button_title: String,
    pub maybe_later_button_title: String,
}

impl Default for ScreenConfiguration {
    fn default() -> Self {
        Self {
            screen_title: "Help Us Grow".to_string(),
            give_rating_button_title: "Give Rating".to_string(),
            maybe_later_button_title: "Maybe Later".to_string(),
        }
    }
}

impl ScreenConfiguration {
    pub fn with_screen_title(mut self, title: impl Into<String>) -> Self {
        self.screen_title = title.into();
        self
    }

    pub fn with_give_rating_button_title(mut self, title: impl Into<String>) -> Self {
        self.give_rating_button_title = title.into();
        self
    }

    pub fn with_maybe_later_button_title(mut self, title: impl Into<String>) -> Self {
        self.maybe_later_button_title = title.into();
        self
    }
}

/// Fixed copy for the non-configurable parts of the screen.
pub mod copy {
    pub const NETWORK_ERROR: &str = "Network Error!";
    pub const TRY_AGAIN: &str = "Try Again";
    pub const NO_REVIEWS_YET: &str = "No Reviews Yet";
    pub const NO_RATINGS_YET: &str = "Be the first to rate us!";

    /// "1250 ratings"
    pub fn ratings_label(count: u64) -> String {
        format!("{count} ratings")
    }
}
