use std::sync::Arc;

use kanal::AsyncReceiver;
use verba_core::input::InputController;
use verba_core::state::AppState;
use verba_core::status::StatusBoard;
use verba_speech::PlaybackController;
use verba_types::{AppEvent, UiEvent};

use crate::orchestrator::Orchestrator;

pub mod edit;
pub mod speak;
pub mod translate;

use edit::handle_edit;
use speak::handle_speak;
use translate::handle_translate;

/// Everything the event handlers act on
pub struct Handlers {
    pub state: Arc<AppState>,
    pub status: StatusBoard,
    pub input: InputController,
    pub orchestrator: Arc<Orchestrator>,
    /// `None` when speech synthesis is unavailable
    pub playback: Option<Arc<PlaybackController>>,
}

/// App's main loop
pub async fn event_loop(
    handlers: Arc<Handlers>,
    ui_to_app_rx: AsyncReceiver<AppEvent>,
) -> anyhow::Result<()> {
    tracing::info!("[EVENT_LOOP] Starting main loop, waiting for events");
    loop {
        let event = ui_to_app_rx.recv().await?;

        match event {
            AppEvent::UiEvent(UiEvent::Close) => {
                tracing::info!("[EVENT_LOOP] Close requested");
                return Ok(());
            }
            AppEvent::UiEvent(event) => {
                tracing::debug!("[EVENT_LOOP] UI event: {:?}", event);
                handle_ui_event(&handlers, event).await?;
            }
            other => {
                // Backend to UI events, nothing to do here
                tracing::trace!("[EVENT_LOOP] ignored {:?}", std::mem::discriminant(&other));
            }
        }
    }
}

pub async fn handle_ui_event(handlers: &Handlers, event: UiEvent) -> anyhow::Result<()> {
    match event {
        UiEvent::Translate => {
            // The request runs detached, input keeps flowing while it is in flight
            let _ = handle_translate(handlers).await;
        }
        UiEvent::Swap => {
            handlers.input.swap_languages_and_text().await;
        }
        UiEvent::Speak => {
            handle_speak(handlers).await;
        }
        UiEvent::SetSourceText(_)
        | UiEvent::SetTargetText(_)
        | UiEvent::SelectSource(_)
        | UiEvent::SelectTarget(_) => {
            handle_edit(&handlers.input, event).await;
        }
        UiEvent::Close => {}
    }

    Ok(())
}
