//! Voice assistant: answer a farmer's question, optionally as speech

use std::sync::Arc;

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::{Deserialize, Serialize};
use shared::{DataSource, Language, Season, Sourced};
use validator::Validate;

use super::{log_fallback, DemoService};
use crate::error::AppResult;
use crate::external::{ElevenLabsClient, GeminiClient};

#[derive(Debug, Deserialize, Validate)]
pub struct VoiceQueryInput {
    #[validate(length(min = 1, max = 500))]
    pub text: String,
    #[serde(default)]
    pub language: Language,
    #[serde(default)]
    pub speak: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoiceAnswer {
    pub question: String,
    pub answer: String,
    pub language: Language,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_base64: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub audio_mime_type: Option<String>,
}

struct Topic {
    keywords: &'static [&'static str],
    english: &'static str,
    hindi: &'static str,
}

const TOPICS: &[Topic] = &[
    Topic {
        keywords: &["weather", "rain", "मौसम", "बारिश", "वर्षा"],
        english: "Check the weather panel for the 5-day outlook. Delay spraying and fertilizer if rain is expected within two days.",
        hindi: "5 दिन का मौसम पूर्वानुमान मौसम पैनल में देखें। दो दिन में बारिश की संभावना हो तो छिड़काव और खाद डालना टाल दें।",
    },
    Topic {
        keywords: &["fertilizer", "urea", "nutrient", "खाद", "उर्वरक", "यूरिया"],
        english: "Apply fertilizer according to your soil test. The nutrient panel shows which nutrients are deficient and how much to apply.",
        hindi: "मिट्टी जांच के अनुसार खाद डालें। पोषक तत्व पैनल में कमी वाले तत्व और मात्रा दी गई है।",
    },
    Topic {
        keywords: &["pest", "disease", "insect", "कीट", "रोग", "बीमारी"],
        english: "Scout your field every 2-3 days. The disease and pest panel lists current risks with treatments.",
        hindi: "हर 2-3 दिन में खेत की निगरानी करें। रोग और कीट पैनल में मौजूदा खतरे और उपचार दिए गए हैं।",
    },
    Topic {
        keywords: &["price", "market", "mandi", "sell", "भाव", "मंडी", "बेच"],
        english: "The market panel shows current mandi prices and the expected trend. Sell in parts if prices are steady.",
        hindi: "बाज़ार पैनल में मंडी भाव और संभावित रुझान दिखाया गया है। भाव स्थिर हों तो फसल थोड़ा-थोड़ा करके बेचें।",
    },
    Topic {
        keywords: &["irrigation", "water", "सिंचाई", "पानी"],
        english: "Irrigate when soil moisture drops below 20%. Early morning or evening irrigation reduces evaporation losses.",
        hindi: "मिट्टी की नमी 20% से कम होने पर सिंचाई करें। सुबह जल्दी या शाम को सिंचाई करने से पानी कम बर्बाद होता है।",
    },
];

const DEFAULT_ENGLISH: &str = "Please ask about weather, fertilizer, pests, irrigation or market prices. You can also contact your nearest Krishi Vigyan Kendra.";
const DEFAULT_HINDI: &str = "कृपया मौसम, खाद, कीट, सिंचाई या मंडी भाव के बारे में पूछें। आप नज़दीकी कृषि विज्ञान केंद्र से भी संपर्क कर सकते हैं।";

/// Words of a question, split on whitespace and punctuation (including the danda)
fn words(question: &str) -> Vec<String> {
    question
        .to_lowercase()
        .split(|c: char| c.is_whitespace() || c.is_ascii_punctuation() || c == '।')
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// Canned answer chosen by keyword. A keyword matches the start of a word,
/// so "rains" counts for rain but "grain" does not.
pub fn keyword_answer(question: &str, language: Language) -> &'static str {
    let words = words(question);
    let topic = TOPICS.iter().find(|t| {
        t.keywords
            .iter()
            .any(|k| words.iter().any(|w| w.starts_with(k)))
    });

    match (topic, language) {
        (Some(t), Language::English) => t.english,
        (Some(t), Language::Hindi) => t.hindi,
        (None, Language::English) => DEFAULT_ENGLISH,
        (None, Language::Hindi) => DEFAULT_HINDI,
    }
}

#[derive(Clone)]
pub struct VoiceService {
    gemini: Option<GeminiClient>,
    elevenlabs: Option<ElevenLabsClient>,
    demo: Arc<DemoService>,
}

impl VoiceService {
    pub fn new(
        gemini: Option<GeminiClient>,
        elevenlabs: Option<ElevenLabsClient>,
        demo: Arc<DemoService>,
    ) -> Self {
        Self {
            gemini,
            elevenlabs,
            demo,
        }
    }

    async fn answer_text(&self, question: &str, language: Language) -> (DataSource, String) {
        if let Some(gemini) = &self.gemini {
            match gemini.answer(question, language).await {
                Ok(text) => return (DataSource::Gemini, text.trim().to_string()),
                Err(e) => log_fallback("gemini", &e),
            }
        }
        self.demo.simulate_latency().await;
        (DataSource::Demo, keyword_answer(question, language).to_string())
    }

    pub async fn query(&self, input: &VoiceQueryInput) -> AppResult<Sourced<VoiceAnswer>> {
        input.validate()?;
        let question = input.text.trim();
        let (source, answer) = self.answer_text(question, input.language).await;

        // Speech is best effort; the text answer stands on its own
        let mut audio_base64 = None;
        if input.speak {
            if let Some(elevenlabs) = &self.elevenlabs {
                match elevenlabs.synthesize(&answer, input.language).await {
                    Ok(audio) => audio_base64 = Some(STANDARD.encode(audio)),
                    Err(e) => log_fallback("elevenlabs", &e),
                }
            }
        }

        Ok(Sourced::new(
            source,
            Season::current(),
            VoiceAnswer {
                question: question.to_string(),
                audio_mime_type: audio_base64.as_ref().map(|_| "audio/mpeg".to_string()),
                audio_base64,
                answer,
                language: input.language,
            },
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_keyword_answers() {
        assert!(keyword_answer("When should I apply UREA?", Language::English).contains("fertilizer"));
        assert!(keyword_answer("गेहूं में कीट लग गए हैं", Language::Hindi).contains("रोग और कीट"));
        assert_eq!(keyword_answer("hello", Language::Hindi), DEFAULT_HINDI);
    }

    #[test]
    fn test_keywords_match_whole_words() {
        let market = keyword_answer("What is the grain price today?", Language::English);
        assert!(market.contains("mandi prices"));
        assert_eq!(keyword_answer("How do I drain my field?", Language::English), DEFAULT_ENGLISH);
        assert!(keyword_answer("Is it raining?", Language::English).contains("weather"));
        assert!(keyword_answer("कल बारिश होगी।", Language::Hindi).contains("मौसम"));
    }

    #[tokio::test]
    async fn test_query_without_integrations() {
        let elevenlabs = ElevenLabsClient::new(
            reqwest::Client::new(),
            "http://127.0.0.1:9".to_string(),
            "key".to_string(),
            "hi-voice".to_string(),
            "en-voice".to_string(),
        );
        let service = VoiceService::new(
            None,
            Some(elevenlabs),
            Arc::new(DemoService::new(50, Duration::ZERO)),
        );
        let input = VoiceQueryInput {
            text: "  will it rain tomorrow? ".to_string(),
            language: Language::English,
            speak: true,
        };
        let panel = service.query(&input).await.unwrap();

        assert!(panel.source.is_demo());
        assert_eq!(panel.data.question, "will it rain tomorrow?");
        assert!(panel.data.answer.contains("weather"));
        assert!(panel.data.audio_base64.is_none());
    }

    #[tokio::test]
    async fn test_empty_question_rejected() {
        let service = VoiceService::new(None, None, Arc::new(DemoService::new(50, Duration::ZERO)));
        let input = VoiceQueryInput {
            text: String::new(),
            language: Language::Hindi,
            speak: false,
        };
        assert!(service.query(&input).await.is_err());
    }
}
