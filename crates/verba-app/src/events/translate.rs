use tokio::task::JoinHandle;
use verba_types::TranslationResult;

use crate::events::Handlers;

/// Validate input and start a translation in the background.
///
/// Returns `None` when the input was rejected and no request was sent.
pub async fn handle_translate(handlers: &Handlers) -> Option<JoinHandle<TranslationResult>> {
    let request = handlers.input.submit_translation().await.ok()?;

    let orchestrator = handlers.orchestrator.clone();
    Some(tokio::spawn(async move { orchestrator.translate(request).await }))
}
