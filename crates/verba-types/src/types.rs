use serde::{Deserialize, Serialize};

pub type LanguageCode = String;

#[derive(Debug, Clone)]
pub enum AppEvent {
    /// Input from the UI surface
    UiEvent(UiEvent),
    /// A status message replaced whatever was shown before
    Status(StatusMessage),
    /// The current status expired
    StatusCleared,
    ShowTranslation {
        text: String,
        from_lang: LanguageCode,
        to_lang: LanguageCode,
    },
    WorkspaceChanged(Workspace),
    PlaybackChanged(PlaybackState),
    /// Return focus to the source text input
    FocusSource,
    /// Speech synthesis is unavailable, playback stays disabled
    SpeechUnavailable(String),
    BackendReady,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    SetSourceText(String),
    SetTargetText(String),
    SelectSource(LanguageCode),
    SelectTarget(LanguageCode),
    Translate,
    Swap,
    Speak,
    Close,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LanguagePair {
    pub source: LanguageCode,
    pub target: LanguageCode,
}

impl LanguagePair {
    pub fn new(source: impl Into<LanguageCode>, target: impl Into<LanguageCode>) -> Self {
        Self {
            source: source.into(),
            target: target.into(),
        }
    }

    pub fn swapped(&self) -> Self {
        Self {
            source: self.target.clone(),
            target: self.source.clone(),
        }
    }
}

/// Everything the UI displays: the selected pair and both text areas
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Workspace {
    pub pair: LanguagePair,
    pub source_text: String,
    pub target_text: String,
}

impl Workspace {
    pub fn new(pair: LanguagePair) -> Self {
        Self {
            pair,
            source_text: String::new(),
            target_text: String::new(),
        }
    }

    /// Exchange languages and texts verbatim. Applying it twice is a no-op.
    pub fn swap(&mut self) {
        self.pair = self.pair.swapped();
        std::mem::swap(&mut self.source_text, &mut self.target_text);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusKind {
    Loading,
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusMessage {
    pub text: String,
    pub kind: StatusKind,
}

impl StatusMessage {
    pub fn new(text: impl Into<String>, kind: StatusKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranslationResult {
    Translated { text: String },
    Failed { message: String },
}

impl TranslationResult {
    pub fn is_translated(&self) -> bool {
        matches!(self, TranslationResult::Translated { .. })
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlaybackState {
    #[default]
    Idle,
    Speaking,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_swap_is_its_own_inverse() {
        let original = Workspace {
            pair: LanguagePair::new("en", "fr"),
            source_text: "Hello".to_string(),
            target_text: "Bonjour".to_string(),
        };

        let mut workspace = original.clone();
        workspace.swap();
        assert_eq!(workspace.pair, LanguagePair::new("fr", "en"));
        assert_eq!(workspace.source_text, "Bonjour");
        assert_eq!(workspace.target_text, "Hello");

        workspace.swap();
        assert_eq!(workspace, original);
    }

    #[test]
    fn test_swap_same_language_and_empty_target() {
        let mut workspace = Workspace::new(LanguagePair::new("ja", "ja"));
        workspace.source_text = "  spaced  ".to_string();
        workspace.swap();

        assert_eq!(workspace.pair, LanguagePair::new("ja", "ja"));
        assert_eq!(workspace.source_text, "");
        assert_eq!(workspace.target_text, "  spaced  ");
    }
}
