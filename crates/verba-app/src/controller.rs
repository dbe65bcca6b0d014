use std::sync::Arc;
use std::time::Duration;

use kanal::{AsyncReceiver, AsyncSender};
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use verba_config::speech::SpeechConfig;
use verba_core::input::InputController;
use verba_core::state::AppState;
use verba_core::status::StatusBoard;
use verba_speech::{EspeakEngine, PlaybackController, SpeechEvent};
use verba_types::AppEvent;

use crate::events::speak::SPEECH_UNSUPPORTED;
use crate::events::{Handlers, event_loop};
use crate::orchestrator::Orchestrator;
use crate::ui::ui_loop;

/// Centralized channel management
pub struct ChannelSet {
    pub app_to_ui: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub ui_to_app: (AsyncSender<AppEvent>, AsyncReceiver<AppEvent>),
    pub speech: (AsyncSender<SpeechEvent>, AsyncReceiver<SpeechEvent>),
}

impl ChannelSet {
    pub fn new() -> Self {
        Self {
            app_to_ui: kanal::bounded_async(128),
            ui_to_app: kanal::bounded_async(64),
            speech: kanal::bounded_async(32),
        }
    }
}

impl Default for ChannelSet {
    fn default() -> Self {
        Self::new()
    }
}

/// Application controller for task spawning and lifecycle
pub struct AppController {
    channels: ChannelSet,
    state: Arc<AppState>,
    cancel_token: CancellationToken,
}

impl AppController {
    pub fn new(state: Arc<AppState>) -> Self {
        Self {
            channels: ChannelSet::new(),
            state,
            cancel_token: CancellationToken::new(),
        }
    }

    pub async fn spawn_tasks(&self) -> JoinSet<anyhow::Result<()>> {
        let (translator_config, speech_config, ui_config) = {
            let config = self.state.config.read().await;
            (
                config.translator.clone(),
                config.speech.clone(),
                config.ui.clone(),
            )
        };

        let app_to_ui_tx = self.channels.app_to_ui.0.clone();
        let status = StatusBoard::new(
            app_to_ui_tx.clone(),
            Duration::from_millis(ui_config.status_clear_ms),
        );
        let input = InputController::new(self.state.clone(), status.clone(), app_to_ui_tx.clone());
        let orchestrator = Arc::new(Orchestrator::from_config(
            &translator_config,
            self.state.clone(),
            status.clone(),
            app_to_ui_tx.clone(),
        ));
        let playback = self.init_playback(&speech_config, status.clone()).await;

        let handlers = Arc::new(Handlers {
            state: self.state.clone(),
            status,
            input,
            orchestrator,
            playback: playback.clone(),
        });

        let mut tasks = JoinSet::new();

        // Event loop
        tasks.spawn(event_loop(handlers, self.channels.ui_to_app.1.clone()));

        // UI loop
        tasks.spawn(ui_loop(
            self.channels.app_to_ui.1.clone(),
            self.channels.ui_to_app.0.clone(),
            ui_config,
            self.cancel_token.child_token(),
        ));

        // Speech notifications
        if let Some(playback) = playback {
            tasks.spawn(speech_loop(
                playback,
                self.channels.speech.1.clone(),
                self.cancel_token.child_token(),
            ));
        }

        let initial = self.state.snapshot().await;
        if let Err(e) = app_to_ui_tx.send(AppEvent::WorkspaceChanged(initial)).await {
            tracing::warn!("failed to send initial workspace: {e}");
        }
        if let Err(e) = app_to_ui_tx.send(AppEvent::BackendReady).await {
            tracing::warn!("failed to announce backend: {e}");
        }

        tasks
    }

    /// Probe the speech engine; playback stays disabled if there is none
    async fn init_playback(
        &self,
        config: &SpeechConfig,
        status: StatusBoard,
    ) -> Option<Arc<PlaybackController>> {
        let app_to_ui_tx = self.channels.app_to_ui.0.clone();

        let reason = if !config.enabled {
            "Speech synthesis is disabled in the configuration"
        } else {
            match EspeakEngine::detect(&config.program, self.channels.speech.0.clone()).await {
                Some(engine) => {
                    engine.spawn_voice_refresh();
                    let playback = Arc::new(PlaybackController::new(engine, status, app_to_ui_tx));
                    playback.refresh_voices().await;
                    return Some(playback);
                }
                None => SPEECH_UNSUPPORTED,
            }
        };

        tracing::warn!("playback disabled: {reason}");
        if let Err(e) = app_to_ui_tx
            .send(AppEvent::SpeechUnavailable(reason.to_string()))
            .await
        {
            tracing::warn!("failed to notify UI: {e}");
        }
        None
    }

    pub fn shutdown(&self) {
        self.cancel_token.cancel();
    }
}

/// Feed engine notifications into the playback state machine
pub async fn speech_loop(
    playback: Arc<PlaybackController>,
    speech_rx: AsyncReceiver<SpeechEvent>,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("Speech listener stopping");
                return Ok(());
            }
            event = speech_rx.recv() => {
                playback.handle_event(event?).await;
            }
        }
    }
}
