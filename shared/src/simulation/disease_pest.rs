//! Disease and pest incidence generator

use rand::Rng;

use super::{FieldContext, MetricSpec};
use crate::classification::{classify_risk, classify_severity, classify_trend};
use crate::models::{CropDiagnosis, DiseasePestEntry, DiseasePestReport, ThreatKind};
use crate::recommendations::risk_advice;
use crate::thresholds;

/// Catalog entry for a disease or pest
#[derive(Debug, Clone, Copy)]
pub struct ThreatProfile {
    pub name: &'static str,
    pub kind: ThreatKind,
    /// Base incidence percent in [monsoon, kharif, rabi, summer] order
    pub incidence: [f64; 4],
    pub symptoms: &'static [&'static str],
    pub treatments: &'static [&'static str],
    pub prevention: &'static [&'static str],
}

/// Threats with a seasonal base below this are not reported
pub const ACTIVE_INCIDENCE: f64 = 3.0;

const FIELD_SCALE: f64 = 3.0;
const JITTER: f64 = 5.0;

pub const CATALOG: &[ThreatProfile] = &[
    ThreatProfile {
        name: "Rice Blast",
        kind: ThreatKind::Disease,
        incidence: [18.0, 10.0, 2.0, 1.0],
        symptoms: &["Spindle shaped lesions with grey centres", "Neck rot at the panicle base"],
        treatments: &["Spray tricyclazole 75 WP (0.6 g/L)", "Reduce nitrogen top-dressing"],
        prevention: &["Grow resistant varieties", "Treat seed with carbendazim (2 g/kg)"],
    },
    ThreatProfile {
        name: "Bacterial Leaf Blight",
        kind: ThreatKind::Disease,
        incidence: [15.0, 8.0, 1.0, 1.0],
        symptoms: &["Yellow to white lesions along leaf margins", "Wilting of seedlings (kresek)"],
        treatments: &["Drain the field for 3-4 days", "Spray streptocycline (0.1 g/L) with copper oxychloride"],
        prevention: &["Avoid clipping seedling tips", "Use balanced fertilization"],
    },
    ThreatProfile {
        name: "Yellow Rust",
        kind: ThreatKind::Disease,
        incidence: [1.0, 3.0, 16.0, 2.0],
        symptoms: &["Yellow pustules in stripes on leaves", "Powdery yellow spores on touch"],
        treatments: &["Spray propiconazole 25 EC (1 ml/L)"],
        prevention: &["Sow resistant varieties on time", "Monitor fields near shelter belts"],
    },
    ThreatProfile {
        name: "Powdery Mildew",
        kind: ThreatKind::Disease,
        incidence: [3.0, 8.0, 12.0, 2.0],
        symptoms: &["White powdery growth on leaves and stems"],
        treatments: &["Spray wettable sulphur (2 g/L)"],
        prevention: &["Avoid dense planting", "Remove volunteer plants"],
    },
    ThreatProfile {
        name: "Alternaria Blight",
        kind: ThreatKind::Disease,
        incidence: [2.0, 6.0, 10.0, 1.0],
        symptoms: &["Dark concentric spots on leaves and pods"],
        treatments: &["Spray mancozeb 75 WP (2.5 g/L)"],
        prevention: &["Use certified seed", "Follow crop rotation"],
    },
    ThreatProfile {
        name: "Brown Planthopper",
        kind: ThreatKind::Pest,
        incidence: [20.0, 12.0, 2.0, 2.0],
        symptoms: &["Circular patches of dried plants (hopper burn)", "Insects at the base of tillers"],
        treatments: &["Spray pymetrozine 50 WG (0.6 g/L) at the base"],
        prevention: &["Leave alleys every 2 m", "Avoid excess nitrogen"],
    },
    ThreatProfile {
        name: "Fall Armyworm",
        kind: ThreatKind::Pest,
        incidence: [18.0, 10.0, 5.0, 8.0],
        symptoms: &["Ragged holes in whorl leaves", "Sawdust like frass in the whorl"],
        treatments: &["Spray emamectin benzoate 5 SG (0.4 g/L) into the whorl"],
        prevention: &["Install pheromone traps (5/acre)", "Intercrop with pulses"],
    },
    ThreatProfile {
        name: "Aphids",
        kind: ThreatKind::Pest,
        incidence: [3.0, 8.0, 22.0, 4.0],
        symptoms: &["Colonies on tender shoots", "Curling leaves and sticky honeydew"],
        treatments: &["Spray imidacloprid 17.8 SL (0.3 ml/L)", "Spray neem oil (5 ml/L)"],
        prevention: &["Conserve ladybird beetles", "Use yellow sticky traps"],
    },
    ThreatProfile {
        name: "Whitefly",
        kind: ThreatKind::Pest,
        incidence: [10.0, 12.0, 4.0, 16.0],
        symptoms: &["Yellowing leaves with sooty mould", "Leaf curl virus spread"],
        treatments: &["Spray diafenthiuron 50 WP (1 g/L)"],
        prevention: &["Remove weed hosts", "Use yellow sticky traps"],
    },
    ThreatProfile {
        name: "Termites",
        kind: ThreatKind::Pest,
        incidence: [2.0, 3.0, 6.0, 14.0],
        symptoms: &["Wilting plants that pull out easily", "Mud galleries on stems"],
        treatments: &["Drench chlorpyriphos 20 EC (3 ml/L) near the roots"],
        prevention: &["Use well rotted manure only", "Irrigate regularly in dry spells"],
    },
];

fn to_strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn generate_entry<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    profile: &ThreatProfile,
    rng: &mut R,
) -> DiseasePestEntry {
    let spec = MetricSpec::new(profile.incidence, FIELD_SCALE, JITTER);
    let incidence = ctx.sample(&spec, rng).clamp(0.0, 100.0);
    let breakpoints = match profile.kind {
        ThreatKind::Disease => thresholds::DISEASE_INCIDENCE,
        ThreatKind::Pest => thresholds::PEST_DAMAGE,
    };

    DiseasePestEntry {
        name: profile.name.to_string(),
        kind: profile.kind,
        incidence_percent: incidence,
        severity: classify_severity(incidence),
        risk: classify_risk(incidence, breakpoints),
        trend: classify_trend(
            incidence - spec.base.get(ctx.season),
            thresholds::INCIDENCE_TREND_TOLERANCE,
        ),
        symptoms: to_strings(profile.symptoms),
        treatments: to_strings(profile.treatments),
        prevention: to_strings(profile.prevention),
    }
}

/// Generate the disease/pest panel for threats active in the field's season
pub fn generate_disease_pest<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    rng: &mut R,
) -> DiseasePestReport {
    let season_index = ctx.season.index();

    let (diseases, pests): (Vec<_>, Vec<_>) = CATALOG
        .iter()
        .filter(|p| p.incidence[season_index] >= ACTIVE_INCIDENCE)
        .map(|p| generate_entry(ctx, p, rng))
        .partition(|e| e.kind == ThreatKind::Disease);

    let overall_risk = DiseasePestReport::highest_risk(diseases.iter().chain(pests.iter()));

    DiseasePestReport {
        field_id: ctx.field_id.to_string(),
        diseases,
        pests,
        overall_risk,
        advice: to_strings(risk_advice(overall_risk)),
    }
}

/// Stand-in photo diagnosis: the disease most likely in the season, with a
/// modest confidence
pub fn generate_diagnosis<R: Rng + ?Sized>(
    ctx: &FieldContext<'_>,
    crop: &str,
    rng: &mut R,
) -> CropDiagnosis {
    let season_index = ctx.season.index();
    let candidates: Vec<&ThreatProfile> = CATALOG
        .iter()
        .filter(|p| p.kind == ThreatKind::Disease)
        .collect();
    let top = candidates
        .iter()
        .map(|p| p.incidence[season_index])
        .fold(f64::MIN, f64::max);
    let likely: Vec<&ThreatProfile> = candidates
        .into_iter()
        .filter(|p| p.incidence[season_index] >= top - 5.0)
        .collect();
    let profile = likely[rng.gen_range(0..likely.len())];

    let spec = MetricSpec::new(profile.incidence, FIELD_SCALE, JITTER);
    let incidence = ctx.sample(&spec, rng).clamp(0.0, 100.0);

    CropDiagnosis {
        crop: crop.to_string(),
        disease_name: profile.name.to_string(),
        confidence: rng.gen_range(0.6..=0.85),
        severity: classify_severity(incidence),
        symptoms: to_strings(profile.symptoms),
        treatments: to_strings(profile.treatments),
        prevention: to_strings(profile.prevention),
    }
}
