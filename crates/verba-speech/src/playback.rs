use std::sync::Arc;

use kanal::AsyncSender;
use tokio::sync::Mutex;
use uuid::Uuid;
use verba_core::language::voice_language_code;
use verba_core::status::StatusBoard;
use verba_types::{AppEvent, PlaybackState};

use crate::{SpeechEngine, SpeechError, SpeechEvent, Utterance, Voice};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpeakOutcome {
    /// A new utterance was submitted
    Started(Uuid),
    /// The active utterance was stopped, nothing new was started
    Cancelled,
}

#[derive(Default)]
struct Inner {
    state: PlaybackState,
    /// Utterance submitted to the engine and not yet finished
    active: Option<Uuid>,
    voices: Vec<Voice>,
}

/// Toggle playback of the translated text.
///
/// Only one utterance is active at a time. Asking to speak while one is
/// active stops it instead of queueing another.
pub struct PlaybackController {
    engine: Arc<dyn SpeechEngine>,
    status: StatusBoard,
    app_to_ui_tx: AsyncSender<AppEvent>,
    inner: Mutex<Inner>,
}

impl PlaybackController {
    pub fn new(
        engine: Arc<dyn SpeechEngine>,
        status: StatusBoard,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            engine,
            status,
            app_to_ui_tx,
            inner: Mutex::new(Inner::default()),
        }
    }

    pub async fn state(&self) -> PlaybackState {
        self.inner.lock().await.state
    }

    pub async fn voices(&self) -> Vec<Voice> {
        self.inner.lock().await.voices.clone()
    }

    /// Re-read the engine's voice list
    pub async fn refresh_voices(&self) {
        let voices = self.engine.voices().await;
        tracing::debug!("voice list refreshed: {} voices", voices.len());
        self.inner.lock().await.voices = voices;
    }

    pub async fn speak(&self, text: &str, language_code: &str) -> Result<SpeakOutcome, SpeechError> {
        let text = text.trim();
        if text.is_empty() {
            self.status.error(SpeechError::EmptyText.to_string()).await;
            return Err(SpeechError::EmptyText);
        }

        let mut inner = self.inner.lock().await;

        if inner.active.is_some() || self.engine.is_speaking() {
            tracing::info!("playback stopped by user");
            self.engine.cancel().await;
            inner.active = None;
            let changed = inner.state != PlaybackState::Idle;
            inner.state = PlaybackState::Idle;
            drop(inner);

            if changed {
                self.publish(PlaybackState::Idle).await;
            }
            return Ok(SpeakOutcome::Cancelled);
        }

        let lang = voice_language_code(language_code);
        let voice = select_voice(&inner.voices, language_code, lang).cloned();
        let utterance = Utterance {
            id: Uuid::new_v4(),
            text: text.to_string(),
            lang: lang.to_string(),
            voice,
        };
        let id = utterance.id;

        tracing::info!(
            "speaking {} chars as {} (voice: {})",
            text.chars().count(),
            utterance.lang,
            utterance.voice.as_ref().map(|v| v.name.as_str()).unwrap_or("default")
        );

        if let Err(e) = self.engine.speak(utterance).await {
            drop(inner);
            tracing::error!("speech engine refused utterance: {e}");
            self.status.error("Error during speech playback").await;
            return Err(e);
        }

        inner.active = Some(id);
        Ok(SpeakOutcome::Started(id))
    }

    /// Apply one engine notification to the state machine
    pub async fn handle_event(&self, event: SpeechEvent) {
        match event {
            SpeechEvent::VoicesChanged => self.refresh_voices().await,
            SpeechEvent::Started(id) => {
                let mut inner = self.inner.lock().await;
                if inner.active != Some(id) {
                    tracing::trace!("start of stale utterance {id} ignored");
                    return;
                }
                inner.state = PlaybackState::Speaking;
                drop(inner);
                self.publish(PlaybackState::Speaking).await;
            }
            SpeechEvent::Ended(id) => {
                if self.finish(id).await {
                    tracing::debug!("utterance {id} finished");
                    self.publish(PlaybackState::Idle).await;
                }
            }
            SpeechEvent::Error { id, message } => {
                if self.finish(id).await {
                    tracing::error!("speech synthesis error: {message}");
                    self.publish(PlaybackState::Idle).await;
                    self.status.error("Error during speech playback").await;
                }
            }
        }
    }

    /// Return to idle if `id` is the active utterance
    async fn finish(&self, id: Uuid) -> bool {
        let mut inner = self.inner.lock().await;
        if inner.active != Some(id) {
            return false;
        }
        inner.active = None;
        inner.state = PlaybackState::Idle;
        true
    }

    async fn publish(&self, state: PlaybackState) {
        if let Err(e) = self.app_to_ui_tx.send(AppEvent::PlaybackChanged(state)).await {
            tracing::warn!("failed to notify UI: {e}");
        }
    }
}

/// First voice whose locale starts with the raw code or the mapped tag
pub fn select_voice<'a>(voices: &'a [Voice], code: &str, locale: &str) -> Option<&'a Voice> {
    voices
        .iter()
        .find(|voice| {
            voice
                .locales()
                .any(|lang| lang.starts_with(code) || lang.starts_with(locale))
        })
}
