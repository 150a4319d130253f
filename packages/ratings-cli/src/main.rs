//! Terminal host for the rating prompt.
//!
//! Plays the presentation layer: builds a controller, loads once, renders
//! each state, retries on failure and finally performs one of the two user
//! actions.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use colored::Colorize;
use ratings_kit::display::ScreenConfiguration;
use ratings_kit::{
    review_request_url, AppRatingProviding, CompletionPolicy, JsonFileProvider,
    RatingRequestController, UrlOpener,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

mod config;
mod render;

use config::{Config, Scenario};

#[derive(Parser)]
#[command(name = "ratings-demo")]
#[command(about = "Preview the rate-this-app prompt in a terminal")]
#[command(version)]
struct Cli {
    /// App Store id of the app being rated
    #[arg(long)]
    app_id: Option<String>,

    /// Canned data to show
    #[arg(long, value_enum)]
    scenario: Option<Scenario>,

    /// Simulated fetch latency in milliseconds
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Read the rating summary from a JSON file instead of a scenario
    #[arg(long)]
    fixture: Option<PathBuf>,

    /// Ignore completions of superseded fetches
    #[arg(long)]
    latest_wins: bool,

    /// Open the review page in the browser instead of printing it
    #[arg(long)]
    open: bool,

    /// Print the loaded summary as JSON
    #[arg(long)]
    json: bool,

    /// How many times to retry after a failed fetch
    #[arg(long, default_value_t = 1)]
    retries: u32,

    /// Choose "maybe later" instead of rating
    #[arg(long)]
    maybe_later: bool,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        if let Some(app_id) = &self.app_id {
            config.app_id = app_id.clone();
        }
        if let Some(scenario) = self.scenario {
            config.scenario = scenario;
        }
        if let Some(delay_ms) = self.delay_ms {
            config.fetch_delay = Duration::from_millis(delay_ms);
        }
    }
}

/// Prints the review link instead of opening it.
struct PrintOpener;

impl UrlOpener for PrintOpener {
    fn open(&self, url: &Url) {
        println!("{} {}", "Review page:".bold(), url);
    }
}

/// Hands the review link to the system browser.
struct BrowserOpener;

impl UrlOpener for BrowserOpener {
    fn open(&self, url: &Url) {
        if let Err(e) = open::that(url.as_str()) {
            tracing::warn!(%url, error = %e, "Failed to open review page");
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,ratings_kit=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();

    let mut config = Config::from_env().context("Failed to load configuration")?;
    cli.apply(&mut config);
    review_request_url(&config.app_id).context("Cannot build a review link for RATINGS_APP_ID")?;
    tracing::info!(app_id = %config.app_id, scenario = ?config.scenario, "Configuration loaded");

    let provider: Arc<dyn AppRatingProviding> = match &cli.fixture {
        Some(path) => Arc::new(JsonFileProvider::new(path)),
        None => Arc::new(config.scenario.provider(config.fetch_delay)),
    };

    let builder = RatingRequestController::builder(config.app_id.clone(), provider)
        .on_rating_requested(|| tracing::info!("Rating requested"))
        .on_maybe_later(|| tracing::info!("User will rate later"))
        .on_error(|err| tracing::error!(error = %err, "Rating fetch failed"))
        .completion_policy(if cli.latest_wins {
            CompletionPolicy::LatestRequestWins
        } else {
            CompletionPolicy::LastToResolve
        });
    let builder = if cli.open {
        builder.url_opener(BrowserOpener)
    } else {
        builder.url_opener(PrintOpener)
    };
    let controller = builder.build();

    let mut transitions = controller.subscribe();
    let watcher = tokio::spawn(async move {
        while transitions.changed().await.is_ok() {
            let state = transitions.borrow_and_update().clone();
            tracing::debug!(state = state.label(), animated = state.animates_in(), "State changed");
        }
    });

    let screen = ScreenConfiguration::default();
    if !cli.json {
        print!("{}", render::render_state(&controller.state(), &screen, Utc::now()));
    }

    controller.load().await;

    let mut attempts = 0;
    while controller.error_message().is_some() && attempts < cli.retries {
        if !cli.json {
            print!("{}", render::render_state(&controller.state(), &screen, Utc::now()));
        }
        attempts += 1;
        tracing::info!(attempt = attempts, "Retrying after failure");
        controller.retry().await.context("Retry task panicked")?;
    }

    let state = controller.state();
    if cli.json {
        match state.summary() {
            Some(summary) => println!("{}", serde_json::to_string_pretty(summary)?),
            None => println!(
                "{}",
                serde_json::json!({ "error": state.error_message() })
            ),
        }
    } else {
        print!("{}", render::render_state(&state, &screen, Utc::now()));
    }

    if state.summary().is_some() {
        if cli.maybe_later {
            controller.choose_maybe_later();
        } else {
            controller.request_rating()?;
        }
    }

    watcher.abort();
    Ok(())
}
