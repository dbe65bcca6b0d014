use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Url;
use serde_json::{Value, json};

use crate::prompt::{injection_risk, translation_prompt};
use crate::transport::{HttpTransport, Transport};
use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator};

const FALLBACK_ERROR: &str = "Translation failed";

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GenerationConfig {
    pub temperature: f64,
    pub top_p: f64,
    pub top_k: u32,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            temperature: 0.2,
            top_p: 0.8,
            top_k: 40,
        }
    }
}

/// Translation through a Gemini `generateContent` endpoint
#[derive(Clone)]
pub struct GeminiTranslator {
    transport: Arc<dyn Transport>,
    api_key: String,
    api_url: String,
    generation: GenerationConfig,
}

impl GeminiTranslator {
    pub fn new(api_key: String, api_url: String) -> Self {
        Self::with_transport(api_key, api_url, Arc::new(HttpTransport::new()))
    }

    pub fn with_transport(
        api_key: String,
        api_url: String,
        transport: Arc<dyn Transport>,
    ) -> Self {
        Self {
            transport,
            api_key,
            api_url,
            generation: GenerationConfig::default(),
        }
    }

    pub fn with_generation_config(mut self, generation: GenerationConfig) -> Self {
        self.generation = generation;
        self
    }

    fn endpoint(&self) -> Result<Url, TranslateError> {
        Url::parse_with_params(&self.api_url, &[("key", &self.api_key)])
            .map_err(|e| TranslateError::InvalidEndpoint(format!("{}: {e}", self.api_url)))
    }

    fn request_body(&self, prompt: String) -> Value {
        json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.generation.temperature,
                "topP": self.generation.top_p,
                "topK": self.generation.top_k
            }
        })
    }
}

/// Pull the translated text out of a response envelope
pub fn extract_text(json: &Value) -> Result<String, TranslateError> {
    if let Some(error) = json.get("error").filter(|e| !e.is_null()) {
        let message = error["message"]
            .as_str()
            .filter(|m| !m.is_empty())
            .unwrap_or(FALLBACK_ERROR);
        return Err(TranslateError::RemoteService(message.to_string()));
    }

    json["candidates"]
        .get(0)
        .and_then(|candidate| candidate["content"]["parts"].get(0))
        .and_then(|part| part["text"].as_str())
        .map(str::to_string)
        .ok_or_else(|| TranslateError::MalformedResponse("No translation in response".to_string()))
}

#[async_trait]
impl Translator for GeminiTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::AuthenticationError);
        }

        if injection_risk(text) {
            tracing::warn!(
                "source text contains quotes or line breaks and is embedded unescaped in the prompt"
            );
        }

        let url = self.endpoint()?;
        let body = self.request_body(translation_prompt(text, &from, &to));

        let json = self.transport.post_json(url, &body).await?;
        let translated = extract_text(&json)?;

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: "gemini".to_string(),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Gemini".to_string(),
            requires_api_key: true,
            free_tier_available: true,
        }
    }
}
