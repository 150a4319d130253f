//! "3 days ago" style timestamps for review cards.

use std::fmt;

use chrono::{DateTime, Datelike, Months, Utc};

/// Coarse age of a timestamp, by its largest non-zero calendar component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelativeTime {
    YearsAgo(u32),
    MonthsAgo(u32),
    DaysAgo(i64),
    HoursAgo(i64),
    MinutesAgo(i64),
    JustNow,
}

impl RelativeTime {
    /// Age of `then` as seen from `now`. Future timestamps are `JustNow`.
    pub fn between(then: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        if then >= now {
            return Self::JustNow;
        }

        let months = whole_months_between(then, now);
        if months >= 12 {
            return Self::YearsAgo(months / 12);
        }
        if months > 0 {
            return Self::MonthsAgo(months);
        }

        let elapsed = now - then;
        if elapsed.num_days() > 0 {
            Self::DaysAgo(elapsed.num_days())
        } else if elapsed.num_hours() > 0 {
            Self::HoursAgo(elapsed.num_hours())
        } else if elapsed.num_minutes() > 0 {
            Self::MinutesAgo(elapsed.num_minutes())
        } else {
            Self::JustNow
        }
    }

    /// Age of `then` as of the current time.
    pub fn since(then: DateTime<Utc>) -> Self {
        Self::between(then, Utc::now())
    }
}

/// Largest `n` such that `then + n months <= now`.
fn whole_months_between(then: DateTime<Utc>, now: DateTime<Utc>) -> u32 {
    let estimate = (i64::from(now.year()) - i64::from(then.year())) * 12
        + i64::from(now.month())
        - i64::from(then.month());
    let estimate = u32::try_from(estimate).unwrap_or(0);

    // The estimate ignores day and time of day, so it can overshoot by one.
    (0..=estimate)
        .rev()
        .find(|&n| {
            then.checked_add_months(Months::new(n))
                .is_some_and(|shifted| shifted <= now)
        })
        .unwrap_or(0)
}

impl fmt::Display for RelativeTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            Self::YearsAgo(1) => f.write_str("1 year ago"),
            Self::YearsAgo(n) => write!(f, "{n} years ago"),
            Self::MonthsAgo(1) => f.write_str("1 month ago"),
            Self::MonthsAgo(n) => write!(f, "{n} months ago"),
            Self::DaysAgo(1) => f.write_str("1 day ago"),
            Self::DaysAgo(n) => write!(f, "{n} days ago"),
            Self::HoursAgo(1) => f.write_str("1 hour ago"),
            Self::HoursAgo(n) => write!(f, "{n} hours ago"),
            Self::MinutesAgo(1) => f.write_str("1 minute ago"),
            Self::MinutesAgo(n) => write!(f, "{n} minutes ago"),
            Self::JustNow => f.write_str("Just now"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn at(y: i32, m: u32, d: u32, h: u32, min: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, m, d, h, min, 0).unwrap()
    }

    #[test]
    fn test_years() {
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(RelativeTime::between(at(2024, 3, 10, 12, 0), now), RelativeTime::YearsAgo(1));
        assert_eq!(RelativeTime::between(at(2021, 1, 1, 0, 0), now), RelativeTime::YearsAgo(4));
    }

    #[test]
    fn test_almost_a_year_is_months() {
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(
            RelativeTime::between(at(2024, 3, 11, 12, 0), now),
            RelativeTime::MonthsAgo(11)
        );
    }

    #[test]
    fn test_month_boundary_respects_day_of_month() {
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(RelativeTime::between(at(2025, 2, 10, 12, 0), now), RelativeTime::MonthsAgo(1));
        assert_eq!(RelativeTime::between(at(2025, 2, 11, 12, 0), now), RelativeTime::DaysAgo(27));
    }

    #[test]
    fn test_days_hours_minutes() {
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(RelativeTime::between(now - Duration::days(2), now), RelativeTime::DaysAgo(2));
        assert_eq!(RelativeTime::between(now - Duration::hours(5), now), RelativeTime::HoursAgo(5));
        assert_eq!(RelativeTime::between(now - Duration::minutes(1), now), RelativeTime::MinutesAgo(1));
        assert_eq!(RelativeTime::between(now - Duration::seconds(30), now), RelativeTime::JustNow);
    }

    #[test]
    fn test_future_is_just_now() {
        let now = at(2025, 3, 10, 12, 0);
        assert_eq!(RelativeTime::between(now + Duration::days(3), now), RelativeTime::JustNow);
    }

    #[test]
    fn test_display_strings() {
        assert_eq!(RelativeTime::YearsAgo(1).to_string(), "1 year ago");
        assert_eq!(RelativeTime::MonthsAgo(3).to_string(), "3 months ago");
        assert_eq!(RelativeTime::DaysAgo(1).to_string(), "1 day ago");
        assert_eq!(RelativeTime::HoursAgo(7).to_string(), "7 hours ago");
        assert_eq!(RelativeTime::MinutesAgo(1).to_string(), "1 minute ago");
        assert_eq!(RelativeTime::JustNow.to_string(), "Just now");
    }
}
