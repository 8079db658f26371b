//! Calculation pass tests
//!
//! Covers the loss formula identities, roast level classification, and
//! aggregate behavior including both cupping deduction modes.

use proptest::prelude::*;
use shared::{
    compute, compute_row, round2, suggest_charge_for_target_remain, to_number, BatchRow,
    RoastLevel, RoastLevels, Session,
};

fn row(id: u32, drop: &str) -> BatchRow {
    BatchRow {
        id,
        drop_weight: drop.to_string(),
        ..Default::default()
    }
}

fn session_with(charge: &str, drops: &[&str]) -> Session {
    Session {
        charge: charge.into(),
        rows: drops
            .iter()
            .enumerate()
            .map(|(i, d)| row(i as u32 + 1, d))
            .collect(),
        ..Default::default()
    }
}

// ============================================================================
// Unit Tests
// ============================================================================

mod numeric_input {
    use super::*;

    #[test]
    fn test_plain_decimal() {
        assert_eq!(to_number("114.5"), 114.5);
        assert_eq!(to_number("130"), 130.0);
    }

    #[test]
    fn test_comma_decimal_separator() {
        assert_eq!(to_number("114,5"), 114.5);
        assert_eq!(to_number("0,25"), 0.25);
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(to_number("  12.5  "), 12.5);
    }

    #[test]
    fn test_invalid_input_degrades_to_zero() {
        assert_eq!(to_number(""), 0.0);
        assert_eq!(to_number("abc"), 0.0);
        assert_eq!(to_number("12g"), 0.0);
        assert_eq!(to_number("inf"), 0.0);
        assert_eq!(to_number("NaN"), 0.0);
    }

    #[test]
    fn test_negative_values_pass_through() {
        assert_eq!(to_number("-3.5"), -3.5);
    }
}

mod rounding {
    use super::*;

    #[test]
    fn test_round2_basic() {
        assert_eq!(round2(11.923076923), 11.92);
        assert_eq!(round2(15.499), 15.5);
        assert_eq!(round2(15.0), 15.0);
    }

    #[test]
    fn test_round2_ties_away_from_zero() {
        // 0.125 is exactly representable, so the tie is real
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
    }
}

mod classification {
    use super::*;

    #[test]
    fn test_sentinel_at_or_below_zero() {
        let levels = RoastLevels::default();
        assert_eq!(levels.classify(0.0), RoastLevel::AwaitingCalculation);
        assert_eq!(levels.classify(-5.0), RoastLevel::AwaitingCalculation);
    }

    #[test]
    fn test_default_bands() {
        let levels = RoastLevels::default();
        assert_eq!(levels.classify(10.99), RoastLevel::VeryLight);
        assert_eq!(levels.classify(11.0), RoastLevel::Light);
        assert_eq!(levels.classify(12.99), RoastLevel::Light);
        assert_eq!(levels.classify(13.0), RoastLevel::Medium);
        assert_eq!(levels.classify(15.0), RoastLevel::MediumDark);
        assert_eq!(levels.classify(17.0), RoastLevel::Dark);
        assert_eq!(levels.classify(25.0), RoastLevel::Dark);
    }

    #[test]
    fn test_korean_labels() {
        assert_eq!(RoastLevel::AwaitingCalculation.label_ko(), "(계산 대기)");
        assert_eq!(RoastLevel::VeryLight.label_ko(), "라이트(아주 밝음)");
        assert_eq!(RoastLevel::Light.label_ko(), "라이트");
        assert_eq!(RoastLevel::Medium.label_ko(), "미디움");
        assert_eq!(RoastLevel::MediumDark.label_ko(), "미디움 다크");
        assert_eq!(RoastLevel::Dark.label_ko(), "다크");
    }
}

mod per_row {
    use super::*;

    /// Scenario: charge 130 g, drop 114.5 g
    #[test]
    fn test_typical_light_roast_batch() {
        let levels = RoastLevels::default();
        let computed = compute_row(130.0, &row(1, "114.5"), &levels);
        assert_eq!(computed.drop_grams, 114.5);
        assert_eq!(computed.loss, 15.5);
        assert_eq!(computed.loss_percent, 11.92);
        assert_eq!(computed.level, RoastLevel::Light);
    }

    /// Scenario: zero charge guards the division
    #[test]
    fn test_zero_charge_is_defined() {
        let levels = RoastLevels::default();
        let computed = compute_row(0.0, &row(1, "50"), &levels);
        assert_eq!(computed.loss_percent, 0.0);
        assert_eq!(computed.level, RoastLevel::AwaitingCalculation);
        assert_eq!(computed.loss, -50.0);
    }

    #[test]
    fn test_loss_percent_identities() {
        let levels = RoastLevels::default();
        // Drop equal to charge: no loss
        assert_eq!(compute_row(130.0, &row(1, "130"), &levels).loss_percent, 0.0);
        // Everything lost
        assert_eq!(compute_row(130.0, &row(1, "0"), &levels).loss_percent, 100.0);
    }

    #[test]
    fn test_empty_drop_parses_to_zero() {
        let levels = RoastLevels::default();
        let computed = compute_row(130.0, &row(1, ""), &levels);
        assert_eq!(computed.drop_grams, 0.0);
        assert_eq!(computed.loss_percent, 100.0);
        assert_eq!(computed.level, RoastLevel::Dark);
    }
}

mod aggregates {
    use super::*;

    /// Scenario: two sessions of 15 g against 200 g total drop
    #[test]
    fn test_fixed_session_cupping() {
        let mut session = session_with("130", &["100", "100"]);
        session.cupping_per_session = "15".into();
        session.cupping_sessions = "2".into();

        let result = compute(&session);
        assert_eq!(result.aggregates.total_drop, 200.0);
        assert_eq!(result.aggregates.total_cupping, 30.0);
        assert_eq!(result.aggregates.remain_after_cupping, 170.0);
    }

    /// Scenario: per-batch mode only counts rows with a positive drop
    #[test]
    fn test_per_batch_cupping_skips_undropped_rows() {
        let mut session = session_with("130", &["100", "0", "120"]);
        session.cupping_per_session = "15".into();
        session.per_batch_cupping = true;

        let result = compute(&session);
        assert_eq!(result.aggregates.total_cupping, 30.0);
    }

    /// Scenario: 100% average loss must not divide by zero
    #[test]
    fn test_total_loss_suggestion_is_zero() {
        let session = session_with("100", &["0"]);
        let result = compute(&session);
        assert_eq!(result.aggregates.avg_loss_percent, 100.0);
        assert_eq!(result.aggregates.suggested_charge, 0.0);
    }

    #[test]
    fn test_suggested_charge_for_typical_loss() {
        // 15% average loss, 100 g target: 100 / 0.85 = 117.65
        let mut session = session_with("100", &["85"]);
        session.target_remain = "100".into();
        let result = compute(&session);
        assert_eq!(result.aggregates.avg_loss_percent, 15.0);
        assert_eq!(result.aggregates.suggested_charge, 117.65);
    }

    #[test]
    fn test_no_rows_yields_zero_aggregates() {
        let session = session_with("130", &[]);
        let result = compute(&session);
        assert_eq!(result.aggregates.total_drop, 0.0);
        assert_eq!(result.aggregates.avg_drop, 0.0);
        assert_eq!(result.aggregates.avg_loss_percent, 0.0);
        assert_eq!(result.aggregates.suggested_charge, 0.0);
    }

    #[test]
    fn test_negative_remainder_is_kept() {
        let mut session = session_with("130", &["20"]);
        session.cupping_per_session = "15".into();
        session.cupping_sessions = "3".into();
        let result = compute(&session);
        assert_eq!(result.aggregates.remain_after_cupping, -25.0);
    }

    #[test]
    fn test_total_drop_rounds_once_at_the_end() {
        // Each drop rounds to 0.00 on its own; the sum must not
        let session = session_with("130", &["0.004"; 10]);
        let result = compute(&session);
        assert_eq!(result.aggregates.total_drop, 0.04);
    }

    #[test]
    fn test_suggestion_guard_helper() {
        assert_eq!(suggest_charge_for_target_remain(100.0, 100.0), 0.0);
        assert_eq!(suggest_charge_for_target_remain(100.0, 150.0), 0.0);
        assert!((suggest_charge_for_target_remain(100.0, 15.0) - 117.64705882352942).abs() < 1e-9);
    }
}

// ============================================================================
// Property Tests
// ============================================================================

proptest! {
    /// loss percent matches the formula for any positive charge
    #[test]
    fn prop_loss_percent_formula(charge in 1.0f64..10_000.0, drop in 0.0f64..10_000.0) {
        let levels = RoastLevels::default();
        let computed = compute_row(charge, &row(1, &drop.to_string()), &levels);
        let expected = round2((charge - drop) / charge * 100.0);
        prop_assert_eq!(computed.loss_percent, expected);
    }

    /// round2 is idempotent
    #[test]
    fn prop_round2_idempotent(x in -1.0e6f64..1.0e6) {
        prop_assert_eq!(round2(round2(x)), round2(x));
    }

    /// Classification severity never decreases as loss percent grows,
    /// provided the thresholds are strictly ascending
    #[test]
    fn prop_classifier_monotonic(
        mut bounds in proptest::array::uniform4(0.1f64..30.0),
        a in -10.0f64..40.0,
        b in -10.0f64..40.0,
    ) {
        bounds.sort_by(|x, y| x.partial_cmp(y).unwrap());
        prop_assume!(bounds.windows(2).all(|p| p[0] < p[1]));
        let levels = RoastLevels {
            light_lo: bounds[0],
            light_hi: bounds[1],
            med_hi: bounds[2],
            m_dark_hi: bounds[3],
        };
        let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(levels.classify(lo) <= levels.classify(hi));
    }

    /// to_number treats comma and dot separators identically
    #[test]
    fn prop_comma_equals_dot(int_part in 0u32..100_000, frac_part in 0u32..100) {
        let with_dot = format!("{}.{:02}", int_part, frac_part);
        let with_comma = format!("{},{:02}", int_part, frac_part);
        prop_assert_eq!(to_number(&with_dot), to_number(&with_comma));
    }
}
