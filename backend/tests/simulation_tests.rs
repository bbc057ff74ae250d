//! Tests for the metric generators

use chrono::NaiveDate;
use proptest::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use shared::simulation::{
    generate_crop_stage, generate_disease_pest, generate_quote, generate_soil_reading,
    generate_vegetation_indices, FieldContext, MetricSpec, SUPPORTED_COMMODITIES,
};
use shared::Season;

fn any_season() -> impl Strategy<Value = Season> {
    prop::sample::select(Season::ALL.to_vec())
}

mod generators {
    use super::*;

    #[test]
    fn seeded_generation_is_reproducible() {
        let ctx = FieldContext::new("field-42", Season::Kharif);
        let a = generate_soil_reading(&ctx, &mut StdRng::seed_from_u64(5));
        let b = generate_soil_reading(&ctx, &mut StdRng::seed_from_u64(5));
        assert_eq!(a, b);
    }

    #[test]
    fn every_commodity_quotes_in_inr() {
        let mut rng = StdRng::seed_from_u64(9);
        for profile in SUPPORTED_COMMODITIES {
            let ctx = FieldContext::new(profile.name, Season::Rabi);
            let quote = generate_quote(&ctx, profile, &mut rng);
            assert_eq!(quote.currency, "INR");
            assert!(quote.current_price.is_sign_positive());
            assert!((0.6..=0.9).contains(&quote.prediction.confidence));
        }
    }

    #[test]
    fn crop_stage_from_sowing_date() {
        let mut rng = StdRng::seed_from_u64(3);
        let ctx = FieldContext::new("field-1", Season::Rabi);
        let reading = generate_crop_stage(
            &ctx,
            "wheat",
            NaiveDate::from_ymd_opt(2024, 1, 1),
            NaiveDate::from_ymd_opt(2024, 3, 1).unwrap(),
            &mut rng,
        );
        assert_eq!(reading.percent_complete, 50.0);
        assert_eq!(reading.days_to_next_stage, Some(18));
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    /// Same field, same season: two samples differ by at most the jitter band
    #[test]
    fn prop_samples_within_jitter_band(
        id in "[a-z0-9-]{1,16}",
        season in any_season(),
        seed_a in any::<u64>(),
        seed_b in any::<u64>(),
    ) {
        let spec = MetricSpec::new([6.6, 6.8, 7.0, 7.2], 0.3, 0.2);
        let ctx = FieldContext::new(&id, season);
        let a = ctx.sample(&spec, &mut StdRng::seed_from_u64(seed_a));
        let b = ctx.sample(&spec, &mut StdRng::seed_from_u64(seed_b));
        prop_assert!((a - b).abs() <= spec.jitter_band() + 1e-9);
    }

    /// Physical domains are respected
    #[test]
    fn prop_generated_values_in_domain(id in "[a-z0-9-]{1,16}", season in any_season(), seed in any::<u64>()) {
        let ctx = FieldContext::new(&id, season);
        let mut rng = StdRng::seed_from_u64(seed);

        let soil = generate_soil_reading(&ctx, &mut rng);
        prop_assert!((0.0..=100.0).contains(&soil.moisture));
        prop_assert!(soil.nitrogen >= 0.0);
        prop_assert!(soil.micronutrients.zinc >= 0.0);

        let indices = generate_vegetation_indices(&ctx, &mut rng);
        prop_assert!((-1.0..=1.0).contains(&indices.ndvi));

        let report = generate_disease_pest(&ctx, &mut rng);
        for entry in report.diseases.iter().chain(report.pests.iter()) {
            prop_assert!((0.0..=100.0).contains(&entry.incidence_percent));
            prop_assert!(entry.risk <= report.overall_risk);
        }
    }
}
