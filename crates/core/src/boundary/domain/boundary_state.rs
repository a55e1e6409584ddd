use std::fmt;

use serde::{Deserialize, Serialize};

/// Discretised proximity of the hand to the boundary.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BoundaryState {
    Safe,
    Warning,
    Danger,
}

impl BoundaryState {
    pub const ALL: &[BoundaryState] = &[
        BoundaryState::Safe,
        BoundaryState::Warning,
        BoundaryState::Danger,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            BoundaryState::Safe => "SAFE",
            BoundaryState::Warning => "WARNING",
            BoundaryState::Danger => "DANGER",
        }
    }
}

impl fmt::Display for BoundaryState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Distance bands in pixels. Both band edges belong to WARNING.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct DistanceThresholds {
    pub safe_distance: f64,
    pub danger_distance: f64,
}

impl DistanceThresholds {
    pub fn new(safe_distance: f64, danger_distance: f64) -> Self {
        Self {
            safe_distance,
            danger_distance,
        }
    }

    /// `> safe` is SAFE, `< danger` is DANGER, anything in between
    /// (inclusive) is WARNING.
    pub fn classify(&self, distance: f64) -> BoundaryState {
        if distance > self.safe_distance {
            BoundaryState::Safe
        } else if distance < self.danger_distance {
            BoundaryState::Danger
        } else {
            BoundaryState::Warning
        }
    }
}

impl Default for DistanceThresholds {
    fn default() -> Self {
        Self::new(
            crate::shared::constants::SAFE_DISTANCE,
            crate::shared::constants::DANGER_DISTANCE,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::far(250.0, BoundaryState::Safe)]
    #[case::just_beyond_safe(100.001, BoundaryState::Safe)]
    #[case::exactly_safe(100.0, BoundaryState::Warning)]
    #[case::middle(75.0, BoundaryState::Warning)]
    #[case::exactly_danger(50.0, BoundaryState::Warning)]
    #[case::just_inside_danger(49.999, BoundaryState::Danger)]
    #[case::touching(0.0, BoundaryState::Danger)]
    fn test_classify_default_bands(#[case] distance: f64, #[case] expected: BoundaryState) {
        assert_eq!(DistanceThresholds::default().classify(distance), expected);
    }

    #[test]
    fn test_classify_is_deterministic_over_a_sweep() {
        let t = DistanceThresholds::default();
        for i in 0..=2000 {
            let d = i as f64 * 0.1;
            let first = t.classify(d);
            assert_eq!(first, t.classify(d));
            assert!(BoundaryState::ALL.contains(&first));
        }
    }

    #[test]
    fn test_collapsed_band_still_has_warning_point() {
        let t = DistanceThresholds::new(50.0, 50.0);
        assert_eq!(t.classify(50.0), BoundaryState::Warning);
        assert_eq!(t.classify(50.5), BoundaryState::Safe);
        assert_eq!(t.classify(49.5), BoundaryState::Danger);
    }

    #[test]
    fn test_display_names() {
        assert_eq!(BoundaryState::Safe.to_string(), "SAFE");
        assert_eq!(BoundaryState::Warning.to_string(), "WARNING");
        assert_eq!(BoundaryState::Danger.to_string(), "DANGER");
    }

    #[test]
    fn test_serde_uses_uppercase_names() {
        let json = serde_json::to_string(&BoundaryState::Danger).unwrap();
        assert_eq!(json, "\"DANGER\"");
    }
}
