//! Soil chemistry generator

use rand::Rng;

use super::{FieldContext, MetricSpec};
use crate::models::{Micronutrients, SoilReading, ORGANIC_MATTER_FACTOR};

// Base values in [monsoon, kharif, rabi, summer] order
pub const PH: MetricSpec = MetricSpec::new([6.6, 6.8, 7.0, 7.2], 0.3, 0.2);
pub const ORGANIC_CARBON: MetricSpec = MetricSpec::new([0.75, 0.7, 0.65, 0.55], 0.1, 0.05);
pub const NITROGEN: MetricSpec = MetricSpec::new([260.0, 280.0, 300.0, 240.0], 20.0, 15.0);
pub const PHOSPHORUS: MetricSpec = MetricSpec::new([18.0, 20.0, 22.0, 16.0], 3.0, 2.0);
pub const POTASSIUM: MetricSpec = MetricSpec::new([190.0, 200.0, 210.0, 180.0], 15.0, 10.0);
pub const BULK_DENSITY: MetricSpec = MetricSpec::new([1.35, 1.38, 1.40, 1.45], 0.05, 0.03);
pub const MOISTURE: MetricSpec = MetricSpec::new([32.0, 24.0, 20.0, 12.0], 4.0, 3.0);
pub const TEMPERATURE: MetricSpec = MetricSpec::new([27.0, 24.0, 18.0, 33.0], 1.5, 1.0);
pub const CEC: MetricSpec = MetricSpec::new([18.0, 18.0, 19.0, 17.0], 2.0, 1.0);
pub const ELECTRICAL_CONDUCTIVITY: MetricSpec = MetricSpec::new([0.4, 0.5, 0.55, 0.7], 0.1, 0.05);
pub const IRON: MetricSpec = MetricSpec::new([5.5, 5.0, 4.8, 4.2], 1.0, 0.5);
pub const ZINC: MetricSpec = MetricSpec::new([0.7, 0.65, 0.6, 0.55], 0.2, 0.1);
pub const MANGANESE: MetricSpec = MetricSpec::new([3.5, 3.2, 3.0, 2.8], 0.8, 0.4);
pub const COPPER: MetricSpec = MetricSpec::new([0.35, 0.33, 0.3, 0.28], 0.1, 0.05);
pub const BORON: MetricSpec = MetricSpec::new([0.6, 0.55, 0.5, 0.45], 0.15, 0.08);

fn non_negative<R: Rng + ?Sized>(ctx: &FieldContext<'_>, spec: &MetricSpec, rng: &mut R) -> f64 {
    ctx.sample(spec, rng).max(0.0)
}

/// Generate a full soil reading for a field
pub fn generate_soil_reading<R: Rng + ?Sized>(ctx: &FieldContext<'_>, rng: &mut R) -> SoilReading {
    let organic_carbon = non_negative(ctx, &ORGANIC_CARBON, rng);

    SoilReading {
        ph: ctx.sample(&PH, rng),
        organic_carbon,
        organic_matter: organic_carbon * ORGANIC_MATTER_FACTOR,
        nitrogen: non_negative(ctx, &NITROGEN, rng),
        phosphorus: non_negative(ctx, &PHOSPHORUS, rng),
        potassium: non_negative(ctx, &POTASSIUM, rng),
        bulk_density: non_negative(ctx, &BULK_DENSITY, rng),
        moisture: ctx.sample(&MOISTURE, rng).clamp(0.0, 100.0),
        temperature: ctx.sample(&TEMPERATURE, rng),
        cation_exchange_capacity: non_negative(ctx, &CEC, rng),
        electrical_conductivity: non_negative(ctx, &ELECTRICAL_CONDUCTIVITY, rng),
        micronutrients: Micronutrients {
            iron: non_negative(ctx, &IRON, rng),
            zinc: non_negative(ctx, &ZINC, rng),
            manganese: non_negative(ctx, &MANGANESE, rng),
            copper: non_negative(ctx, &COPPER, rng),
            boron: non_negative(ctx, &BORON, rng),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::season::Season;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn organic_matter_follows_carbon() {
        let mut rng = StdRng::seed_from_u64(3);
        let ctx = FieldContext::new("plot-a", Season::Rabi);
        let reading = generate_soil_reading(&ctx, &mut rng);
        assert!((reading.organic_matter - reading.organic_carbon * ORGANIC_MATTER_FACTOR).abs() < 1e-9);
    }

    #[test]
    fn same_seed_same_reading() {
        let ctx = FieldContext::new("plot-a", Season::Monsoon);
        let a = generate_soil_reading(&ctx, &mut StdRng::seed_from_u64(11));
        let b = generate_soil_reading(&ctx, &mut StdRng::seed_from_u64(11));
        assert_eq!(a, b);
    }

    #[test]
    fn ph_stays_in_physical_range_for_chosen_constants() {
        let mut rng = StdRng::seed_from_u64(5);
        for season in Season::ALL {
            for id in ["a", "b", "field-9", "south"] {
                let ctx = FieldContext::new(id, season);
                let ph = generate_soil_reading(&ctx, &mut rng).ph;
                assert!((0.0..=14.0).contains(&ph));
            }
        }
    }
}
