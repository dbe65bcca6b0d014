use uuid::Uuid;
use verba_types::LanguagePair;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum InputError {
    #[error("Please enter text to translate")]
    EmptyInput,
}

/// One submitted translation, never persisted
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslationRequest {
    pub id: Uuid,
    pub text: String,
    pub pair: LanguagePair,
}

impl TranslationRequest {
    /// Trims `text`; blank input is rejected
    pub fn new(text: &str, pair: LanguagePair) -> Result<Self, InputError> {
        let text = text.trim();
        if text.is_empty() {
            return Err(InputError::EmptyInput);
        }

        Ok(Self {
            id: Uuid::new_v4(),
            text: text.to_string(),
            pair,
        })
    }
}
