//! Rating and review data contracts.

use std::path::Path;

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use crate::error::Result;

/// A single user review.
///
/// Ratings are expected in `1..=5` but are not validated here; that is the
/// provider's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    /// Headline of the review.
    pub title: String,

    /// Body text.
    pub content: String,

    /// Star rating given by the reviewer.
    pub rating: i32,

    /// Display name of the reviewer.
    pub author: String,

    /// When the review was submitted.
    #[serde(rename = "date")]
    pub submitted_at: DateTime<Utc>,
}

impl Review {
    pub fn new(
        title: impl Into<String>,
        content: impl Into<String>,
        rating: i32,
        author: impl Into<String>,
        submitted_at: DateTime<Utc>,
    ) -> Self {
        Self {
            title: title.into(),
            content: content.into(),
            rating,
            author: author.into(),
            submitted_at,
        }
    }

    /// A fully populated sample review, for previews and tests.
    pub fn sample(rating: i32, submitted_at: DateTime<Utc>) -> Self {
        Self::new(
            "Absolutely Love This App!",
            "This is an incredible app that has completely transformed how I work. \
             The interface is intuitive, and the features are exactly what I needed. \
             Highly recommend to everyone!",
            rating,
            "John Appleseed",
            submitted_at,
        )
    }

    /// Six sample reviews with mixed ratings, newest first, relative to `now`.
    pub fn samples(now: DateTime<Utc>) -> Vec<Self> {
        vec![
            Self::sample(5, now),
            Self::new(
                "Great Potential",
                "Very promising app with some really useful features. Looking forward to future updates!",
                4,
                "Sarah Wilson",
                now - Duration::days(1),
            ),
            Self::new(
                "Needs Improvement",
                "Good concept but needs some work on performance.",
                3,
                "Mike Thompson",
                now - Duration::days(2),
            ),
            Self::new(
                "Life Changing App",
                "I've been using this app for months now and it has completely changed how I \
                 organize my work. The recent updates make it even better!",
                5,
                "Emily Chen",
                now - Duration::days(90),
            ),
            Self::new(
                "Could Be Better",
                "The app is okay but crashes sometimes. Hope this gets fixed soon.",
                2,
                "David Brown",
                now - Duration::days(180),
            ),
            Self::new(
                "Basic Functionality",
                "It does what it promises but nothing extraordinary. Would like to see more features.",
                3,
                "Lisa Martinez",
                now - Duration::days(365),
            ),
        ]
    }
}

/// Aggregate rating payload returned by a successful fetch.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean rating, conventionally in `0.0..=5.0`.
    pub average_rating: f64,

    /// Number of ratings behind the average.
    pub total_ratings: u64,

    /// Reviews in provider order.
    pub reviews: Vec<Review>,
}

impl RatingSummary {
    pub fn new(average_rating: f64, total_ratings: u64, reviews: Vec<Review>) -> Self {
        Self {
            average_rating,
            total_ratings,
            reviews,
        }
    }

    /// A summary with no ratings and no reviews.
    pub fn empty() -> Self {
        Self::new(0.0, 0, Vec::new())
    }

    /// Parse a summary from its JSON representation.
    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Read and parse a JSON summary from disk.
    pub async fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let json = tokio::fs::read_to_string(path).await?;
        Self::from_json(&json)
    }
}
