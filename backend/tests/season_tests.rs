//! Tests for season resolution and the field variation hash

use chrono::{Datelike, NaiveDate};
use proptest::prelude::*;
use shared::{field_hash, field_variation, unit_offset, Season};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}

// =============================================================================
// Season resolver
// =============================================================================

mod season_resolution {
    use super::*;

    #[test]
    fn reference_dates() {
        assert_eq!(Season::from_date(&date(2024, 7, 15)), Season::Monsoon);
        assert_eq!(Season::from_date(&date(2024, 11, 1)), Season::Kharif);
        assert_eq!(Season::from_date(&date(2024, 2, 1)), Season::Rabi);
        assert_eq!(Season::from_date(&date(2024, 4, 15)), Season::Summer);
    }

    #[test]
    fn band_boundaries() {
        assert_eq!(Season::from_date(&date(2024, 5, 31)), Season::Summer);
        assert_eq!(Season::from_date(&date(2024, 6, 1)), Season::Monsoon);
        assert_eq!(Season::from_date(&date(2024, 9, 30)), Season::Monsoon);
        assert_eq!(Season::from_date(&date(2024, 10, 1)), Season::Kharif);
        assert_eq!(Season::from_date(&date(2024, 12, 31)), Season::Kharif);
        assert_eq!(Season::from_date(&date(2025, 1, 1)), Season::Rabi);
        assert_eq!(Season::from_date(&date(2025, 3, 31)), Season::Rabi);
        assert_eq!(Season::from_date(&date(2025, 4, 1)), Season::Summer);
    }

    #[test]
    fn parses_its_own_names() {
        for season in Season::ALL {
            assert_eq!(season.as_str().parse::<Season>().unwrap(), season);
        }
        assert!("winter".parse::<Season>().is_err());
    }
}

fn any_date() -> impl Strategy<Value = NaiveDate> {
    (1900i32..2200, 1u32..=12, 1u32..=28).prop_map(|(y, m, d)| date(y, m, d))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Every date maps to exactly one season, and the season only depends
    /// on the month
    #[test]
    fn prop_season_is_total(d in any_date()) {
        let season = Season::from_date(&d);
        prop_assert!(Season::ALL.contains(&season));
        prop_assert_eq!(season, Season::from_month(d.month()));
        prop_assert_eq!(Season::ALL[season.index()], season);
    }

    /// The hash is a pure function of the id
    #[test]
    fn prop_field_hash_deterministic(id in "\\PC{0,40}") {
        prop_assert_eq!(field_hash(&id), field_hash(&id));
        prop_assert_eq!(unit_offset(&id), unit_offset(&id));
    }

    /// Offsets stay within the requested scale
    #[test]
    fn prop_field_variation_bounded(id in "[a-z0-9-]{1,24}", scale in 0.0f64..100.0) {
        let offset = field_variation(&id, scale);
        prop_assert!(offset.abs() <= scale + 1e-9);
        prop_assert!((-1.0..=1.0).contains(&unit_offset(&id)));
    }
}
