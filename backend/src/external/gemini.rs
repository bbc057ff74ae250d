//! Google Gemini client
//!
//! Used for photo based disease diagnosis, narrative market insight and
//! free-form answers to farmer questions. Structured answers are never
//! trusted as raw text: they go through [`parse_model_json`] into a
//! [`ModelOutput`], and anything that fails to parse or validate sends the
//! caller to its demo fallback.

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use shared::{CropDiagnosis, Language, MarketInsight, MarketQuote, Season, Severity};

use super::read_json;
use crate::error::{AppError, AppResult};

#[derive(Clone)]
pub struct GeminiClient {
    client: Client,
    base_url: String,
    api_key: String,
    model: String,
}

/// Result of reading structured model output
#[derive(Debug, Clone, PartialEq)]
pub enum ModelOutput<T> {
    Parsed(T),
    ParseError { raw: String, reason: String },
}

impl<T> ModelOutput<T> {
    pub fn into_result(self) -> AppResult<T> {
        match self {
            ModelOutput::Parsed(value) => Ok(value),
            ModelOutput::ParseError { raw, reason } => {
                tracing::debug!(raw = %raw, "Rejected model output");
                Err(AppError::ModelOutput(reason))
            }
        }
    }
}

/// Structured payload requested from the model
pub trait ModelPayload: DeserializeOwned {
    /// Range and content checks after deserialization
    fn validate(&self) -> Result<(), String>;
}

/// Strip markdown fences and surrounding prose, keeping the outermost object
fn extract_json_object(raw: &str) -> Option<&str> {
    let start = raw.find('{')?;
    let end = raw.rfind('}')?;
    (end > start).then(|| &raw[start..=end])
}

/// Parse and validate a JSON object out of model text
pub fn parse_model_json<T: ModelPayload>(raw: &str) -> ModelOutput<T> {
    let rejected = |reason: String| ModelOutput::ParseError {
        raw: raw.to_string(),
        reason,
    };

    let Some(json) = extract_json_object(raw) else {
        return rejected("no JSON object in response".to_string());
    };

    match serde_json::from_str::<T>(json) {
        Ok(value) => match value.validate() {
            Ok(()) => ModelOutput::Parsed(value),
            Err(reason) => rejected(reason),
        },
        Err(e) => rejected(format!("invalid JSON: {}", e)),
    }
}

fn check_confidence(confidence: f64) -> Result<(), String> {
    if (0.0..=1.0).contains(&confidence) {
        Ok(())
    } else {
        Err(format!("confidence {} outside 0..=1", confidence))
    }
}

/// Diagnosis fields as requested in the prompt
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DiagnosisPayload {
    pub disease_name: String,
    pub confidence: f64,
    pub severity: String,
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub treatments: Vec<String>,
    #[serde(default)]
    pub prevention: Vec<String>,
}

fn parse_severity(value: &str) -> Option<Severity> {
    match value.trim().to_ascii_lowercase().as_str() {
        "mild" | "low" => Some(Severity::Mild),
        "moderate" | "medium" => Some(Severity::Moderate),
        "severe" | "high" => Some(Severity::Severe),
        _ => None,
    }
}

impl ModelPayload for DiagnosisPayload {
    fn validate(&self) -> Result<(), String> {
        if self.disease_name.trim().is_empty() {
            return Err("disease_name is empty".to_string());
        }
        check_confidence(self.confidence)?;
        if parse_severity(&self.severity).is_none() {
            return Err(format!("unknown severity {}", self.severity));
        }
        Ok(())
    }
}

impl DiagnosisPayload {
    pub fn into_diagnosis(self, crop: &str) -> CropDiagnosis {
        CropDiagnosis {
            crop: crop.to_string(),
            severity: parse_severity(&self.severity).unwrap_or(Severity::Moderate),
            disease_name: self.disease_name,
            confidence: self.confidence,
            symptoms: self.symptoms,
            treatments: self.treatments,
            prevention: self.prevention,
        }
    }
}

/// Market insight fields as requested in the prompt
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct InsightPayload {
    pub summary: String,
    pub selling_advice: String,
    #[serde(default)]
    pub key_factors: Vec<String>,
    pub confidence: f64,
}

impl ModelPayload for InsightPayload {
    fn validate(&self) -> Result<(), String> {
        if self.summary.trim().is_empty() || self.selling_advice.trim().is_empty() {
            return Err("summary and selling_advice are required".to_string());
        }
        check_confidence(self.confidence)
    }
}

impl InsightPayload {
    pub fn into_insight(self, commodity: &str) -> MarketInsight {
        MarketInsight {
            commodity: commodity.to_string(),
            summary: self.summary,
            selling_advice: self.selling_advice,
            key_factors: self.key_factors,
            confidence: self.confidence,
        }
    }
}

#[derive(Serialize)]
struct GenerateRequest<'a> {
    contents: Vec<Content<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Serialize)]
struct Content<'a> {
    parts: Vec<Part<'a>>,
}

#[derive(Serialize)]
#[serde(untagged)]
enum Part<'a> {
    Text { text: String },
    InlineData { inline_data: InlineData<'a> },
}

#[derive(Serialize)]
struct InlineData<'a> {
    mime_type: &'a str,
    data: &'a str,
}

#[derive(Serialize)]
struct GenerationConfig {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<CandidateContent>,
}

#[derive(Debug, Deserialize)]
struct CandidateContent {
    #[serde(default)]
    parts: Vec<CandidatePart>,
}

#[derive(Debug, Deserialize)]
struct CandidatePart {
    text: Option<String>,
}

impl GenerateResponse {
    fn text(self) -> Option<String> {
        let text: String = self
            .candidates
            .into_iter()
            .next()?
            .content?
            .parts
            .into_iter()
            .filter_map(|p| p.text)
            .collect();
        (!text.trim().is_empty()).then_some(text)
    }
}

impl GeminiClient {
    pub fn new(client: Client, base_url: String, api_key: String, model: String) -> Self {
        Self {
            client,
            base_url,
            api_key,
            model,
        }
    }

    async fn generate(&self, parts: Vec<Part<'_>>, temperature: f32) -> AppResult<String> {
        let request = GenerateRequest {
            contents: vec![Content { parts }],
            generation_config: GenerationConfig { temperature },
        };

        let response = self
            .client
            .post(format!(
                "{}/models/{}:generateContent",
                self.base_url, self.model
            ))
            .query(&[("key", &self.api_key)])
            .json(&request)
            .send()
            .await?;

        let body: GenerateResponse = read_json(response, "Gemini").await?;
        body.text()
            .ok_or_else(|| AppError::ExternalService("Gemini returned no text".to_string()))
    }

    /// Diagnose a crop photo
    pub async fn diagnose(
        &self,
        crop: &str,
        image_base64: &str,
        mime_type: &str,
    ) -> AppResult<ModelOutput<DiagnosisPayload>> {
        let prompt = format!(
            "You are an agronomist. Examine this {crop} plant photo and identify the most \
             likely disease or pest. Reply with only a JSON object with keys \
             disease_name (string), confidence (number 0 to 1), severity \
             (\"mild\", \"moderate\" or \"severe\"), symptoms, treatments and prevention \
             (arrays of short strings suitable for Indian smallholder farmers)."
        );
        let parts = vec![
            Part::Text { text: prompt },
            Part::InlineData {
                inline_data: InlineData {
                    mime_type,
                    data: image_base64,
                },
            },
        ];
        let text = self.generate(parts, 0.2).await?;
        Ok(parse_model_json(&text))
    }

    /// Narrative insight for a quote
    pub async fn market_insight(
        &self,
        quote: &MarketQuote,
        season: Season,
    ) -> AppResult<ModelOutput<InsightPayload>> {
        let prompt = format!(
            "Current {commodity} price is {price} {currency} per {unit}, changed {change}% \
             recently, in the {season} season in India. Predicted next month price is \
             {next_month}. Reply with only a JSON object with keys summary (string), \
             selling_advice (string), key_factors (array of strings) and confidence \
             (number 0 to 1).",
            commodity = quote.commodity,
            price = quote.current_price,
            currency = quote.currency,
            unit = quote.unit,
            change = quote.change_percent,
            season = season,
            next_month = quote.prediction.next_month,
        );
        let text = self.generate(vec![Part::Text { text: prompt }], 0.4).await?;
        Ok(parse_model_json(&text))
    }

    /// Short plain-text answer in the requested language
    pub async fn answer(&self, question: &str, language: Language) -> AppResult<String> {
        let language_name = match language {
            Language::Hindi => "Hindi",
            Language::English => "English",
        };
        let prompt = format!(
            "You are a helpful farm advisor for Indian farmers. Answer in simple \
             {language_name} in at most three sentences.\n\nQuestion: {question}"
        );
        self.generate(vec![Part::Text { text: prompt }], 0.6).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fenced_json_is_parsed() {
        let raw = "```json\n{\"disease_name\": \"Leaf Rust\", \"confidence\": 0.82, \
                   \"severity\": \"Moderate\", \"symptoms\": [\"orange pustules\"]}\n```";
        match parse_model_json::<DiagnosisPayload>(raw) {
            ModelOutput::Parsed(payload) => {
                let diagnosis = payload.into_diagnosis("wheat");
                assert_eq!(diagnosis.disease_name, "Leaf Rust");
                assert_eq!(diagnosis.severity, Severity::Moderate);
                assert!(diagnosis.treatments.is_empty());
            }
            other => panic!("expected parsed output, got {:?}", other),
        }
    }

    #[test]
    fn test_out_of_range_confidence_rejected() {
        let raw = r#"{"summary": "s", "selling_advice": "hold", "confidence": 1.4}"#;
        match parse_model_json::<InsightPayload>(raw) {
            ModelOutput::ParseError { raw: kept, reason } => {
                assert!(reason.contains("confidence"));
                assert_eq!(kept, raw);
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_prose_without_json_rejected() {
        let output = parse_model_json::<InsightPayload>("Prices look good, sell now.");
        assert!(matches!(output, ModelOutput::ParseError { .. }));
        assert!(matches!(output.into_result(), Err(AppError::ModelOutput(_))));
    }

    #[test]
    fn test_unknown_severity_rejected() {
        let raw = r#"{"disease_name": "Blast", "confidence": 0.5, "severity": "catastrophic"}"#;
        assert!(matches!(
            parse_model_json::<DiagnosisPayload>(raw),
            ModelOutput::ParseError { .. }
        ));
    }

    #[test]
    fn test_response_text_joins_parts() {
        let body: GenerateResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "Hello "}, {"text": "farmer"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(body.text().as_deref(), Some("Hello farmer"));

        let empty: GenerateResponse = serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(empty.text().is_none());
    }

    #[test]
    fn test_inline_data_serialization() {
        let part = Part::InlineData {
            inline_data: InlineData {
                mime_type: "image/jpeg",
                data: "abcd",
            },
        };
        let json = serde_json::to_value(&part).unwrap();
        assert_eq!(json["inline_data"]["mime_type"], "image/jpeg");
    }
}
