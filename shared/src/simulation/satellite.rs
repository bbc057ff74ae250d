//! Vegetation index generator

use rand::Rng;

use super::{jitter, FieldContext, MetricSpec};
use crate::models::VegetationIndices;

pub const NDVI: MetricSpec = MetricSpec::new([0.65, 0.55, 0.6, 0.35], 0.08, 0.05);
pub const NDWI: MetricSpec = MetricSpec::new([0.3, 0.15, 0.1, -0.1], 0.05, 0.05);

pub fn generate_vegetation_indices<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    rng: &mut R,
) -> VegetationIndices {
    let ndvi = ctx.sample(&NDVI, rng).clamp(-1.0, 1.0);
    VegetationIndices {
        ndvi,
        evi: (ndvi * 0.8 + jitter(rng, 0.03)).clamp(-1.0, 1.0),
        savi: (ndvi * 0.9 + jitter(rng, 0.03)).clamp(-1.0, 1.0),
        ndwi: ctx.sample(&NDWI, rng).clamp(-1.0, 1.0),
    }
}
