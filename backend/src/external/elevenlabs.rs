//! ElevenLabs text-to-speech client

use reqwest::Client;
use serde::Serialize;
use shared::Language;

use crate::error::{AppError, AppResult};

const MODEL_ID: &str = "eleven_multilingual_v2";

#[derive(Clone)]
pub struct ElevenLabsClient {
    client: Client,
    base_url: String,
    api_key: String,
    voice_id_hindi: String,
    voice_id_english: String,
}

#[derive(Serialize)]
struct SpeechRequest<'a> {
    text: &'a str,
    model_id: &'static str,
    voice_settings: VoiceSettings,
}

#[derive(Serialize)]
struct VoiceSettings {
    stability: f32,
    similarity_boost: f32,
}

impl ElevenLabsClient {
    pub fn new(
        client: Client,
        base_url: String,
        api_key: String,
        voice_id_hindi: String,
        voice_id_english: String,
    ) -> Self {
        Self {
            client,
            base_url,
            api_key,
            voice_id_hindi,
            voice_id_english,
        }
    }

    fn voice_for(&self, language: Language) -> AppResult<&str> {
        let voice = match language {
            Language::Hindi => &self.voice_id_hindi,
            Language::English => &self.voice_id_english,
        };
        if voice.is_empty() {
            return Err(AppError::NotConfigured("ElevenLabs voice"));
        }
        Ok(voice)
    }

    /// Synthesize speech, returning MP3 bytes
    pub async fn synthesize(&self, text: &str, language: Language) -> AppResult<Vec<u8>> {
        let voice_id = self.voice_for(language)?;
        let request = SpeechRequest {
            text,
            model_id: MODEL_ID,
            voice_settings: VoiceSettings {
                stability: 0.5,
                similarity_boost: 0.75,
            },
        };

        let response = self
            .client
            .post(format!("{}/text-to-speech/{}", self.base_url, voice_id))
            .header("xi-api-key", &self.api_key)
            .header("Accept", "audio/mpeg")
            .json(&request)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ExternalService(format!(
                "ElevenLabs API error: {} - {}",
                status, body
            )));
        }

        let bytes = response.bytes().await?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client(hindi: &str) -> ElevenLabsClient {
        ElevenLabsClient::new(
            Client::new(),
            "http://127.0.0.1:9".to_string(),
            "key".to_string(),
            hindi.to_string(),
            "en-voice".to_string(),
        )
    }

    #[test]
    fn test_voice_selection() {
        let c = client("hi-voice");
        assert_eq!(c.voice_for(Language::Hindi).unwrap(), "hi-voice");
        assert_eq!(c.voice_for(Language::English).unwrap(), "en-voice");
    }

    #[test]
    fn test_missing_voice_is_not_configured() {
        assert!(matches!(
            client("").voice_for(Language::Hindi),
            Err(AppError::NotConfigured(_))
        ));
    }
}
