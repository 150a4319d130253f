use std::env;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use ratings_kit::MockAppRatingProvider;

/// Which canned provider to run against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Scenario {
    /// Ratings and sample reviews
    WithReviews,
    /// Ratings but no reviews
    NoReviews,
    /// Nobody has rated the app yet
    NoRatings,
    /// Every fetch fails
    Error,
    /// The first fetch fails, retries succeed
    Flaky,
}

impl Scenario {
    pub fn provider(self, delay: Duration) -> MockAppRatingProvider {
        let provider = match self {
            Self::WithReviews => MockAppRatingProvider::with_mock_reviews(),
            Self::NoReviews => MockAppRatingProvider::no_reviews(),
            Self::NoRatings => MockAppRatingProvider::no_ratings_or_reviews(),
            Self::Error => MockAppRatingProvider::throws_error(),
            Self::Flaky => MockAppRatingProvider::with_mock_reviews().fail_first(1),
        };
        provider.with_delay(delay)
    }
}

impl FromStr for Scenario {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        <Self as ValueEnum>::from_str(s, true).map_err(|_| anyhow!("unknown scenario: {s}"))
    }
}

/// Demo configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub app_id: String,
    pub scenario: Scenario,
    pub fetch_delay: Duration,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenvy::dotenv();

        Ok(Self {
            app_id: env::var("RATINGS_APP_ID").unwrap_or_else(|_| "1234567890".to_string()),
            scenario: env::var("RATINGS_SCENARIO")
                .unwrap_or_else(|_| "with-reviews".to_string())
                .parse()
                .context("RATINGS_SCENARIO must name a known scenario")?,
            fetch_delay: Duration::from_millis(
                env::var("RATINGS_FETCH_DELAY_MS")
                    .unwrap_or_else(|_| "1500".to_string())
                    .parse()
                    .context("RATINGS_FETCH_DELAY_MS must be a valid number")?,
            ),
        })
    }
}
