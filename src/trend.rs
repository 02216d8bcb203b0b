//! Trend classification between two equal-length windows

use serde::{Deserialize, Serialize};

/// Direction of a metric between two consecutive windows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    /// Classify the change from `previous` to `current`.
    ///
    /// A change beyond ±15% of the previous value counts as movement; with no
    /// previous activity any current activity classifies as [`Trend::Up`].
    /// The same rule applies to every counted metric, including the revenue
    /// proxy (booking count times a fixed unit value).
    pub fn classify(current: usize, previous: usize) -> Trend {
        if previous == 0 {
            return if current > 0 { Trend::Up } else { Trend::Stable };
        }

        let change = (current as f64 - previous as f64) / previous as f64 * 100.0;
        if change > 15.0 {
            Trend::Up
        } else if change < -15.0 {
            Trend::Down
        } else {
            Trend::Stable
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_history_no_activity_is_stable() {
        assert_eq!(Trend::classify(0, 0), Trend::Stable);
    }

    #[test]
    fn any_growth_from_zero_is_up() {
        assert_eq!(Trend::classify(5, 0), Trend::Up);
        assert_eq!(Trend::classify(1, 0), Trend::Up);
    }

    #[test]
    fn band_edges() {
        // +20% clears the band.
        assert_eq!(Trend::classify(12, 10), Trend::Up);
        // -10% stays inside it.
        assert_eq!(Trend::classify(9, 10), Trend::Stable);
        // Exactly +15% is not strictly greater.
        assert_eq!(Trend::classify(115, 100), Trend::Stable);
        assert_eq!(Trend::classify(116, 100), Trend::Up);
        // -16% drops out of the band.
        assert_eq!(Trend::classify(84, 100), Trend::Down);
        assert_eq!(Trend::classify(85, 100), Trend::Stable);
    }

    #[test]
    fn scaling_both_counts_preserves_classification() {
        // Revenue proxy: both windows scaled by the unit value.
        for (current, previous) in [(12, 10), (9, 10), (0, 4), (7, 0)] {
            assert_eq!(
                Trend::classify(current * 50, previous * 50),
                Trend::classify(current, previous)
            );
        }
    }

    #[test]
    fn serializes_lowercase() {
        assert_eq!(serde_json::to_string(&Trend::Up).unwrap(), "\"up\"");
        assert_eq!(serde_json::to_string(&Trend::Stable).unwrap(), "\"stable\"");
    }
}
