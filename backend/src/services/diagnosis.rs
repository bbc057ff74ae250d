//! Photo based crop diagnosis

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Deserialize;
use shared::simulation::{generate_diagnosis, FieldContext};
use shared::{CropDiagnosis, DataSource, Season, Sourced};
use validator::Validate;

use super::{log_fallback, DemoService};
use crate::error::{AppError, AppResult};
use crate::external::GeminiClient;

/// Largest accepted image, bytes after decoding
pub const MAX_IMAGE_BYTES: usize = 4 * 1024 * 1024;
/// Request body limit for diagnosis: the largest image as base64 plus the JSON around it
pub const MAX_REQUEST_BYTES: usize = MAX_IMAGE_BYTES.div_ceil(3) * 4 + 64 * 1024;
const ACCEPTED_MIME_TYPES: [&str; 3] = ["image/jpeg", "image/png", "image/webp"];

/// Input for a diagnosis request
#[derive(Debug, Deserialize, Validate)]
pub struct DiagnosisInput {
    #[validate(length(min = 1, max = 50))]
    pub crop: String,
    #[validate(length(min = 1))]
    pub image_base64: String,
    pub mime_type: String,
}

impl DiagnosisInput {
    /// Check the image payload, returning its decoded size
    pub fn check_image(&self) -> AppResult<usize> {
        if !ACCEPTED_MIME_TYPES.contains(&self.mime_type.as_str()) {
            return Err(AppError::invalid(
                "mime_type",
                "Only JPEG, PNG and WebP images are supported",
                "केवल JPEG, PNG और WebP चित्र स्वीकार्य हैं",
            ));
        }
        let bytes = STANDARD.decode(self.image_base64.trim()).map_err(|_| {
            AppError::invalid(
                "image_base64",
                "Image is not valid base64",
                "चित्र का डेटा मान्य नहीं है",
            )
        })?;
        if bytes.len() > MAX_IMAGE_BYTES {
            return Err(AppError::invalid(
                "image_base64",
                "Image is larger than 4 MB",
                "चित्र 4 MB से बड़ा है",
            ));
        }
        Ok(bytes.len())
    }
}

#[derive(Clone)]
pub struct DiagnosisService {
    gemini: Option<GeminiClient>,
    demo: Arc<DemoService>,
}

impl DiagnosisService {
    pub fn new(gemini: Option<GeminiClient>, demo: Arc<DemoService>) -> Self {
        Self { gemini, demo }
    }

    pub async fn diagnose(&self, input: &DiagnosisInput) -> AppResult<Sourced<CropDiagnosis>> {
        input.validate()?;
        let size = input.check_image()?;
        let season = Season::current();
        tracing::debug!(crop = %input.crop, bytes = size, "Diagnosing crop image");

        if let Some(gemini) = &self.gemini {
            let result = gemini
                .diagnose(&input.crop, input.image_base64.trim(), &input.mime_type)
                .await
                .and_then(|output| output.into_result());
            match result {
                Ok(payload) => {
                    return Ok(Sourced::new(
                        DataSource::Gemini,
                        season,
                        payload.into_diagnosis(&input.crop),
                    ))
                }
                Err(e) => log_fallback("gemini", &e),
            }
        }

        self.demo.simulate_latency().await;
        let crop = input.crop.to_ascii_lowercase();
        let diagnosis = generate_diagnosis(
            &FieldContext::new(&crop, season),
            &crop,
            &mut rand::thread_rng(),
        );
        Ok(Sourced::demo(season, diagnosis))
    }
}
