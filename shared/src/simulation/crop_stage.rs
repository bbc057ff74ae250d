//! Crop growth stage generator

use chrono::NaiveDate;
use rand::Rng;

use super::{jitter, FieldContext, MetricSpec};
use crate::classification::classify_stress;
use crate::models::{
    CropStageReading, GrowthMetrics, GrowthStage, StressIndicators, StressLevel,
};
use crate::recommendations::stress_recommendations;

pub const WATER_STRESS: MetricSpec = MetricSpec::new([0.2, 0.35, 0.4, 0.6], 0.1, 0.15);
pub const NUTRIENT_STRESS: MetricSpec = MetricSpec::new([0.3, 0.3, 0.25, 0.35], 0.1, 0.15);
pub const DISEASE_STRESS: MetricSpec = MetricSpec::new([0.45, 0.3, 0.2, 0.15], 0.1, 0.15);
pub const PEST_STRESS: MetricSpec = MetricSpec::new([0.4, 0.35, 0.25, 0.2], 0.1, 0.15);

/// Growth profile for a crop
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CropProfile {
    pub name: &'static str,
    pub duration_days: u32,
    pub max_height_cm: f64,
    pub max_leaves: u32,
    pub max_root_depth_cm: f64,
    /// t/ha at maturity
    pub max_biomass: f64,
}

pub const CROP_PROFILES: [CropProfile; 6] = [
    CropProfile { name: "wheat", duration_days: 120, max_height_cm: 100.0, max_leaves: 9, max_root_depth_cm: 120.0, max_biomass: 12.0 },
    CropProfile { name: "rice", duration_days: 130, max_height_cm: 110.0, max_leaves: 15, max_root_depth_cm: 40.0, max_biomass: 14.0 },
    CropProfile { name: "maize", duration_days: 110, max_height_cm: 220.0, max_leaves: 20, max_root_depth_cm: 150.0, max_biomass: 18.0 },
    CropProfile { name: "cotton", duration_days: 170, max_height_cm: 150.0, max_leaves: 60, max_root_depth_cm: 180.0, max_biomass: 10.0 },
    CropProfile { name: "mustard", duration_days: 110, max_height_cm: 160.0, max_leaves: 30, max_root_depth_cm: 100.0, max_biomass: 8.0 },
    CropProfile { name: "soybean", duration_days: 100, max_height_cm: 90.0, max_leaves: 25, max_root_depth_cm: 90.0, max_biomass: 7.0 },
];

/// Profile for a crop name, falling back to wheat
pub fn crop_profile(crop: &str) -> &'static CropProfile {
    CROP_PROFILES
        .iter()
        .find(|p| p.name.eq_ignore_ascii_case(crop))
        .unwrap_or(&CROP_PROFILES[0])
}

/// Percent complete from sowing date, if known
pub fn progress_from_sowing(profile: &CropProfile, sowing: NaiveDate, today: NaiveDate) -> f64 {
    let days = (today - sowing).num_days().max(0) as f64;
    (days / f64::from(profile.duration_days) * 100.0).min(100.0)
}

fn fraction<R: Rng + ?Sized>(ctx: &FieldContext<'_>, spec: &MetricSpec, rng: &mut R) -> f64 {
    ctx.sample(spec, rng).clamp(0.0, 1.0)
}

/// Generate the crop stage panel. Without a sowing date the progress is drawn
/// at random around a field biased midpoint.
pub fn generate_crop_stage<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    crop: &str,
    sowing_date: Option<NaiveDate>,
    today: NaiveDate,
    rng: &mut R,
) -> CropStageReading {
    let profile = crop_profile(crop);
    let percent = match sowing_date {
        Some(sown) => progress_from_sowing(profile, sown, today),
        None => (50.0 + ctx.offset * 5.0 + jitter(rng, 45.0)).clamp(0.0, 100.0),
    };
    let stage = GrowthStage::from_progress(percent);
    let next_stage = stage.next();
    let days_to_next_stage = next_stage.map(|next| {
        let remaining = (next.starts_at() - percent).max(0.0);
        (remaining * f64::from(profile.duration_days) / 100.0).ceil() as u32
    });

    let stress = StressIndicators {
        water: fraction(ctx, &WATER_STRESS, rng),
        nutrient: fraction(ctx, &NUTRIENT_STRESS, rng),
        disease: fraction(ctx, &DISEASE_STRESS, rng),
        pest: fraction(ctx, &PEST_STRESS, rng),
    };
    let stress_levels: Vec<StressLevel> = stress
        .iter()
        .map(|(kind, value)| StressLevel {
            kind,
            value,
            level: classify_stress(value),
        })
        .collect();
    let recommendations = stress_recommendations(stress_levels.iter().map(|s| (s.kind, s.level)));

    let growth_factor = percent / 100.0;
    let vigour = 1.0 + jitter(rng, 0.1);
    let growth = GrowthMetrics {
        height_cm: profile.max_height_cm * growth_factor * vigour,
        leaf_count: (f64::from(profile.max_leaves) * growth_factor * vigour).round().max(1.0) as u32,
        root_depth_cm: profile.max_root_depth_cm * growth_factor.sqrt() * vigour,
        biomass: profile.max_biomass * growth_factor * vigour,
    };

    CropStageReading {
        field_id: ctx.field_id.to_string(),
        crop: profile.name.to_string(),
        stage,
        stage_label: stage.label().to_string(),
        next_stage,
        percent_complete: percent,
        days_to_next_stage,
        stress,
        stress_levels,
        growth,
        recommendations,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::Season;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn sowing_date_drives_stage() {
        let mut rng = StdRng::seed_from_u64(9);
        let ctx = FieldContext::new("wheat-plot", Season::Rabi);
        // 60 of 120 days
        let reading = generate_crop_stage(&ctx, "wheat", Some(date(2024, 1, 1)), date(2024, 3, 1), &mut rng);
        assert_eq!(reading.stage, GrowthStage::Flowering);
        assert!((reading.percent_complete - 50.0).abs() < 1e-9);
        assert_eq!(reading.next_stage, Some(GrowthStage::GrainFilling));
        assert_eq!(reading.days_to_next_stage, Some(18));
    }

    #[test]
    fn harvested_crop_is_mature() {
        let mut rng = StdRng::seed_from_u64(9);
        let ctx = FieldContext::new("old", Season::Summer);
        let reading = generate_crop_stage(&ctx, "rice", Some(date(2023, 1, 1)), date(2024, 1, 1), &mut rng);
        assert_eq!(reading.stage, GrowthStage::Maturity);
        assert_eq!(reading.days_to_next_stage, None);
    }

    #[test]
    fn stress_values_are_fractions() {
        let mut rng = StdRng::seed_from_u64(4);
        for season in Season::ALL {
            let ctx = FieldContext::new("x", season);
            let r = generate_crop_stage(&ctx, "maize", None, date(2024, 6, 1), &mut rng);
            for (_, v) in r.stress.iter() {
                assert!((0.0..=1.0).contains(&v));
            }
            assert_eq!(r.stress_levels.len(), 4);
            assert!((0.0..=100.0).contains(&r.percent_complete));
        }
    }

    #[test]
    fn unknown_crop_uses_default_profile() {
        assert_eq!(crop_profile("quinoa").name, "wheat");
        assert_eq!(crop_profile("Rice").name, "rice");
    }
}
