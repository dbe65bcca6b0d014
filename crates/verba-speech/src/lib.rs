use uuid::Uuid;

pub mod espeak;
pub mod locale;
pub mod playback;

pub use espeak::EspeakEngine;
pub use playback::{PlaybackController, SpeakOutcome};

/// Platform speech synthesis adapter.
///
/// `speak` only submits the utterance. Progress is reported asynchronously
/// through [`SpeechEvent`]s on the channel the engine was built with.
#[async_trait::async_trait]
pub trait SpeechEngine: Send + Sync {
    /// Snapshot of the installed voices
    async fn voices(&self) -> Vec<Voice>;

    /// Submit an utterance for playback
    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError>;

    /// Stop whatever is playing
    async fn cancel(&self);

    fn is_speaking(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Voice {
    /// Identifier the engine accepts to select this voice
    pub id: String,
    pub name: String,
    /// Locale tag, e.g. `en-US`
    pub lang: String,
    /// Further locales the voice also covers
    pub aliases: Vec<String>,
}

impl Voice {
    /// Every locale tag this voice answers to, primary first
    pub fn locales(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.lang.as_str()).chain(self.aliases.iter().map(String::as_str))
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Utterance {
    pub id: Uuid,
    pub text: String,
    /// Locale tag the engine should speak in
    pub lang: String,
    /// Explicit voice, the engine default for `lang` otherwise
    pub voice: Option<Voice>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SpeechEvent {
    Started(Uuid),
    Ended(Uuid),
    Error { id: Uuid, message: String },
    VoicesChanged,
}

#[derive(Debug, thiserror::Error)]
pub enum SpeechError {
    #[error("No text to speak")]
    EmptyText,

    #[error("Speech engine error: {0}")]
    Engine(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
