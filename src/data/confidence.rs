//! Confidence score normalization for display.
//!
//! The analysis engine's confidence scale is not contractually fixed: scores
//! have been observed both as 0-1 fractions and as 0-100 percentages. The
//! scale is guessed per value, which is a heuristic and documented as such.

/// Normalize a confidence score of ambiguous scale to a display percentage.
///
/// Scores above 1 are assumed to already be percentages; scores at or below
/// 1 are assumed to be fractions and scaled by 100. The result is rounded to
/// zero decimal places.
///
/// Known ambiguity, preserved on purpose until the upstream contract is
/// confirmed: exactly 1.0 takes the fraction branch and becomes 100, so a
/// genuine "1%" cannot be expressed. This is a best-effort display
/// transform, not a validator; out-of-range results are not rejected.
pub fn normalize_confidence(score: f64) -> f64 {
    let percent = if score > 1.0 { score } else { score * 100.0 };
    percent.round()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fraction_scales_to_percent() {
        assert_eq!(normalize_confidence(0.87), 87.0);
        assert_eq!(normalize_confidence(0.5), 50.0);
        assert_eq!(normalize_confidence(0.0), 0.0);
    }

    #[test]
    fn test_percentage_passes_through() {
        assert_eq!(normalize_confidence(87.0), 87.0);
        assert_eq!(normalize_confidence(100.0), 100.0);
    }

    #[test]
    fn test_boundary_exactly_one_takes_fraction_branch() {
        // The heuristic cannot distinguish "100%" from "1%" at exactly 1.0;
        // the inclusive branch scales it. Pinned here so a future contract
        // change is caught.
        assert_eq!(normalize_confidence(1.0), 100.0);
    }

    #[test]
    fn test_midrange_value_is_assumed_prescaled() {
        // 45 is assumed to already be a percentage even though it could be a
        // mislabeled fraction; the heuristic has no way to tell. Documented,
        // not corrected.
        assert_eq!(normalize_confidence(45.0), 45.0);
        assert_eq!(normalize_confidence(0.45), 45.0);
    }

    #[test]
    fn test_rounding_to_zero_decimals() {
        assert_eq!(normalize_confidence(0.004), 0.0);
        assert_eq!(normalize_confidence(0.876), 88.0);
        assert_eq!(normalize_confidence(87.4), 87.0);
    }

    #[test]
    fn test_out_of_range_inputs_are_not_rejected() {
        assert_eq!(normalize_confidence(-0.5), -50.0);
        assert_eq!(normalize_confidence(150.0), 150.0);
    }
}
