//! Tests for status classifiers and recommendation tables

use proptest::prelude::*;
use shared::thresholds;
use shared::{
    classify, classify_ph, classify_risk, classify_stress, classify_trend, soil_advice,
    NutrientStatus, OptimalRange, PhStatus, RiskLevel, SoilParameter, Trend,
};

// =============================================================================
// Three-tier classifier
// =============================================================================

mod optimal_range {
    use super::*;

    #[test]
    fn ph_scenario() {
        let range = thresholds::SOIL_PH;
        assert_eq!(classify(5.5, range), NutrientStatus::Deficient);
        assert_eq!(classify(6.8, range), NutrientStatus::Adequate);
        assert_eq!(classify(8.0, range), NutrientStatus::Excessive);

        assert_eq!(classify_ph(5.5), PhStatus::Acidic);
        assert_eq!(classify_ph(6.8), PhStatus::Optimal);
        assert_eq!(classify_ph(8.0), PhStatus::Alkaline);
    }

    #[test]
    fn bounds_are_inclusive() {
        let range = OptimalRange::new(6.0, 7.5);
        assert_eq!(classify(6.0, range), NutrientStatus::Adequate);
        assert_eq!(classify(7.5, range), NutrientStatus::Adequate);
    }

    #[test]
    fn nan_is_deficient() {
        assert_eq!(classify(f64::NAN, thresholds::NITROGEN), NutrientStatus::Deficient);
    }

    #[test]
    fn every_parameter_range_is_ordered() {
        for parameter in SoilParameter::ALL {
            let range = parameter.optimal_range();
            assert!(range.min < range.max, "{:?}", parameter);
        }
    }
}

mod risk {
    use super::*;

    #[test]
    fn stress_breakpoints_are_strict() {
        assert_eq!(classify_stress(0.3), RiskLevel::Low);
        assert_eq!(classify_stress(0.31), RiskLevel::Medium);
        assert_eq!(classify_stress(0.6), RiskLevel::Medium);
        assert_eq!(classify_stress(0.61), RiskLevel::High);
    }

    #[test]
    fn pest_table_is_more_tolerant_than_disease_table() {
        assert_eq!(classify_risk(18.0, thresholds::DISEASE_INCIDENCE), RiskLevel::Medium);
        assert_eq!(classify_risk(18.0, thresholds::PEST_DAMAGE), RiskLevel::Medium);
        assert_eq!(classify_risk(25.0, thresholds::DISEASE_INCIDENCE), RiskLevel::High);
        assert_eq!(classify_risk(25.0, thresholds::PEST_DAMAGE), RiskLevel::Medium);
    }

    #[test]
    fn trend_tolerance() {
        assert_eq!(classify_trend(0.5, 1.0), Trend::Stable);
        assert_eq!(classify_trend(-1.5, 1.0), Trend::Decreasing);
    }
}

fn any_range() -> impl Strategy<Value = OptimalRange> {
    (-1000.0f64..1000.0, 0.0f64..500.0).prop_map(|(min, width)| OptimalRange::new(min, min + width))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// The three tiers partition the real line with no gaps or overlaps
    #[test]
    fn prop_classifier_partitions_reals(range in any_range(), value in -2000.0f64..2000.0) {
        let status = classify(value, range);
        let expected = if value < range.min {
            NutrientStatus::Deficient
        } else if value <= range.max {
            NutrientStatus::Adequate
        } else {
            NutrientStatus::Excessive
        };
        prop_assert_eq!(status, expected);
    }

    /// Risk tiers are monotone in the value
    #[test]
    fn prop_risk_monotone(a in 0.0f64..1.0, b in 0.0f64..1.0) {
        let (low, high) = if a <= b { (a, b) } else { (b, a) };
        prop_assert!(classify_stress(low) <= classify_stress(high));
    }

    /// Every classified soil value has advice to show
    #[test]
    fn prop_advice_always_available(index in 0usize..15, value in -10.0f64..1000.0) {
        let parameter = SoilParameter::ALL[index];
        let status = classify(value, parameter.optimal_range());
        prop_assert!(!soil_advice(parameter, status).is_empty());
    }
}
