//! Star-bar geometry for the average rating.

/// Number of stars in the rating bar.
pub const STAR_COUNT: usize = 5;

/// How much of each star is filled for `rating`, left to right, in `0.0..=1.0`.
///
/// Star `p` (1-based) is filled by `1 - (p - rating)`, clamped. A rating of
/// 3.4 fills three stars, 40% of the fourth and none of the fifth.
pub fn star_fill_ratios(rating: f64) -> [f64; STAR_COUNT] {
    let mut fills = [0.0; STAR_COUNT];
    for (i, fill) in fills.iter_mut().enumerate() {
        let position = (i + 1) as f64;
        *fill = (1.0 - (position - rating)).clamp(0.0, 1.0);
    }
    fills
}

/// The average as shown next to the stars, with one fractional digit.
pub fn format_average(rating: f64) -> String {
    format!("{rating:.1}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn assert_close(actual: [f64; STAR_COUNT], expected: [f64; STAR_COUNT]) {
        for (a, e) in actual.iter().zip(expected) {
            assert!((a - e).abs() < 1e-9, "{actual:?} != {expected:?}");
        }
    }

    #[test]
    fn test_partial_star() {
        assert_close(star_fill_ratios(3.4), [1.0, 1.0, 1.0, 0.4, 0.0]);
    }

    #[test]
    fn test_bounds() {
        assert_close(star_fill_ratios(0.0), [0.0; STAR_COUNT]);
        assert_close(star_fill_ratios(5.0), [1.0; STAR_COUNT]);
        assert_close(star_fill_ratios(7.5), [1.0; STAR_COUNT]);
        assert_close(star_fill_ratios(-2.0), [0.0; STAR_COUNT]);
    }

    #[test]
    fn test_format_average() {
        assert_eq!(format_average(4.2), "4.2");
        assert_eq!(format_average(5.0), "5.0");
        assert_eq!(format_average(3.96), "4.0");
    }
}
