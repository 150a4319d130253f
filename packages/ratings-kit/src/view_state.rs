//! The three-state lifecycle of the rating prompt.

use crate::types::RatingSummary;

/// State of a view that loads its data asynchronously.
///
/// Exactly one variant is active; "loading with an error message" and
/// similar mixtures cannot be represented.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum ViewState {
    /// A fetch is in flight.
    #[default]
    Loading,

    /// The fetch succeeded.
    Loaded(RatingSummary),

    /// The fetch failed; holds a human-readable description.
    Failed(String),
}

impl ViewState {
    /// The loaded summary, if any.
    pub fn summary(&self) -> Option<&RatingSummary> {
        match self {
            Self::Loaded(summary) => Some(summary),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// The failure description, if the fetch failed.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }

    /// Whether a renderer should animate the transition into this state.
    ///
    /// Only the arrival of data is animated.
    pub fn animates_in(&self) -> bool {
        matches!(self, Self::Loaded(_))
    }

    /// Short label for logs.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Loading => "loading",
            Self::Loaded(_) => "loaded",
            Self::Failed(_) => "failed",
        }
    }
}
