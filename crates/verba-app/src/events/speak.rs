use verba_speech::SpeakOutcome;

use crate::events::Handlers;

pub const SPEECH_UNSUPPORTED: &str = "Speech synthesis is not supported on this system";

/// Read the target text aloud, or stop the current playback
pub async fn handle_speak(handlers: &Handlers) {
    let Some(playback) = &handlers.playback else {
        handlers.status.error(SPEECH_UNSUPPORTED).await;
        return;
    };

    let (text, language) = {
        let workspace = handlers.state.workspace.read().await;
        (workspace.target_text.clone(), workspace.pair.target.clone())
    };

    match playback.speak(&text, &language).await {
        Ok(SpeakOutcome::Started(id)) => tracing::debug!("utterance {id} submitted"),
        Ok(SpeakOutcome::Cancelled) => tracing::debug!("playback cancelled"),
        // Already reported through the status board
        Err(e) => tracing::debug!("speak rejected: {e}"),
    }
}
