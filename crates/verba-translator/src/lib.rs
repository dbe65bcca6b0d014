pub mod gemini;
pub mod prompt;
pub mod transport;

pub use gemini::GeminiTranslator;
pub use reqwest::Url;
pub use transport::{HttpTransport, Transport};

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    pub from: LanguageCode,
    pub to: LanguageCode,
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
    pub requires_api_key: bool,
    pub free_tier_available: bool,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    /// The service answered with an error envelope
    #[error("{0}")]
    RemoteService(String),

    /// The service answered but not in the expected shape
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// No JSON was obtained: network, DNS or body decoding failure
    #[error("Network error: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Invalid endpoint: {0}")]
    InvalidEndpoint(String),

    #[error("Missing API key")]
    AuthenticationError,
}
