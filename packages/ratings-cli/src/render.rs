//! Plain-terminal rendering of the rating prompt.

use std::fmt::{self, Write};

use chrono::{DateTime, Utc};
use colored::Colorize;
use ratings_kit::display::{
    avatar_index, copy, format_average, star_fill_ratios, RelativeTime, ScreenConfiguration,
};
use ratings_kit::{Review, ViewState};

fn star_bar(rating: f64) -> String {
    star_fill_ratios(rating)
        .iter()
        .map(|fill| if *fill >= 0.5 { '★' } else { '☆' })
        .collect()
}

fn render_review(
    out: &mut String,
    index: usize,
    review: &Review,
    now: DateTime<Utc>,
) -> fmt::Result {
    let stars = star_bar(f64::from(review.rating));
    let age = RelativeTime::between(review.submitted_at, now);
    writeln!(
        out,
        "  {} {} {}",
        format!("[avatar {}]", avatar_index(index) + 1).dimmed(),
        stars.yellow(),
        review.title.bold()
    )?;
    writeln!(out, "    {}", review.content)?;
    writeln!(out, "    {}", format!("{} · {}", review.author, age).dimmed())
}

fn write_frame(
    out: &mut String,
    state: &ViewState,
    screen: &ScreenConfiguration,
    now: DateTime<Utc>,
) -> fmt::Result {
    writeln!(out, "{}", screen.screen_title.bright_cyan().bold())?;
    writeln!(out)?;

    let average = state.display_average_rating();
    writeln!(
        out,
        "  {}  {}",
        format_average(average).bold(),
        star_bar(average).yellow()
    )?;

    if state.is_loading() {
        writeln!(out, "  {}", "Loading…".dimmed())?;
    } else if state.is_empty_ratings() {
        writeln!(out, "  {}", copy::NO_RATINGS_YET)?;
    } else if state.summary().is_some() {
        writeln!(
            out,
            "  {}",
            copy::ratings_label(state.display_total_ratings()).dimmed()
        )?;
    }
    writeln!(out)?;

    if let Some(message) = state.error_message() {
        writeln!(out, "  {}", copy::NETWORK_ERROR.red().bold())?;
        writeln!(out, "  {message}")?;
        writeln!(out, "  [{}]", copy::TRY_AGAIN)?;
    } else if state.is_empty_reviews() {
        writeln!(out, "  {}", copy::NO_REVIEWS_YET.dimmed())?;
    } else {
        for (index, review) in state.visible_reviews().iter().enumerate() {
            render_review(out, index, review, now)?;
        }
    }

    writeln!(out)?;
    writeln!(
        out,
        "  [{}]  [{}]",
        screen.give_rating_button_title.green().bold(),
        screen.maybe_later_button_title
    )
}

/// Render one frame of the prompt for `state`.
pub fn render_state(state: &ViewState, screen: &ScreenConfiguration, now: DateTime<Utc>) -> String {
    let mut out = String::new();
    // Writing into a String cannot fail.
    if write_frame(&mut out, state, screen, now).is_err() {
        tracing::error!("Failed to format rating frame");
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use ratings_kit::RatingSummary;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 3, 10, 12, 0, 0).unwrap()
    }

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_star_bar_rounds_to_half() {
        assert_eq!(star_bar(4.2), "★★★★☆");
        assert_eq!(star_bar(3.5), "★★★★☆");
        assert_eq!(star_bar(0.0), "☆☆☆☆☆");
    }

    #[test]
    fn test_loading_frame_shows_skeleton() {
        plain();
        let frame = render_state(&ViewState::Loading, &ScreenConfiguration::default(), now());

        assert!(frame.contains("Help Us Grow"));
        assert!(frame.contains("5.0"));
        assert!(frame.contains("★★★★★"));
        assert!(frame.contains("Loading…"));
        assert!(!frame.contains(copy::NO_REVIEWS_YET));
    }

    #[test]
    fn test_loaded_frame_lists_reviews() {
        plain();
        let state = ViewState::Loaded(RatingSummary::new(4.2, 1250, Review::samples(now())));

        let frame = render_state(&state, &ScreenConfiguration::default(), now());

        assert!(frame.contains("1250 ratings"));
        assert!(frame.contains("Absolutely Love This App!"));
        assert!(frame.contains("Sarah Wilson · 1 day ago"));
        assert!(frame.contains("Lisa Martinez · 1 year ago"));
        assert!(frame.contains("[avatar 6]"));
    }

    #[test]
    fn test_failed_frame_offers_retry() {
        plain();
        let state = ViewState::Failed("network unreachable".into());

        let frame = render_state(&state, &ScreenConfiguration::default(), now());

        assert!(frame.contains(copy::NETWORK_ERROR));
        assert!(frame.contains("network unreachable"));
        assert!(frame.contains("[Try Again]"));
    }

    #[test]
    fn test_empty_frame() {
        plain();
        let state = ViewState::Loaded(RatingSummary::empty());

        let frame = render_state(&state, &ScreenConfiguration::default(), now());

        assert!(frame.contains(copy::NO_RATINGS_YET));
        assert!(frame.contains(copy::NO_REVIEWS_YET));
        assert!(frame.contains("0.0"));
    }
}
