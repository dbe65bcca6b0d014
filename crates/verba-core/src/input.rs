use std::sync::Arc;

use kanal::AsyncSender;
use verba_types::{AppEvent, LanguageCode, Workspace};

use crate::language;
use crate::request::{InputError, TranslationRequest};
use crate::state::AppState;
use crate::status::StatusBoard;

/// Reads and edits what the user entered
#[derive(Clone)]
pub struct InputController {
    state: Arc<AppState>,
    status: StatusBoard,
    app_to_ui_tx: AsyncSender<AppEvent>,
}

impl InputController {
    pub fn new(
        state: Arc<AppState>,
        status: StatusBoard,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            state,
            status,
            app_to_ui_tx,
        }
    }

    /// Validate the source text and build a request for the orchestrator.
    ///
    /// Blank input shows an error and hands focus back to the source input.
    /// On success a loading status is shown before returning.
    pub async fn submit_translation(&self) -> Result<TranslationRequest, InputError> {
        let (text, pair) = {
            let workspace = self.state.workspace.read().await;
            (workspace.source_text.clone(), workspace.pair.clone())
        };

        match TranslationRequest::new(&text, pair) {
            Ok(request) => {
                tracing::info!(
                    "translation {} submitted: {} -> {}, {} chars",
                    request.id,
                    request.pair.source,
                    request.pair.target,
                    request.text.chars().count()
                );
                self.status.loading("Translating...").await;
                Ok(request)
            }
            Err(e) => {
                tracing::debug!("submit rejected: {e}");
                self.status.error(e.to_string()).await;
                self.publish(AppEvent::FocusSource).await;
                Err(e)
            }
        }
    }

    /// Exchange languages and both texts, no re-translation
    pub async fn swap_languages_and_text(&self) -> Workspace {
        let snapshot = {
            let mut workspace = self.state.workspace.write().await;
            workspace.swap();
            workspace.clone()
        };

        tracing::debug!(
            "swapped to {} -> {}",
            snapshot.pair.source,
            snapshot.pair.target
        );
        self.publish(AppEvent::WorkspaceChanged(snapshot.clone()))
            .await;
        snapshot
    }

    pub async fn set_source_text(&self, text: String) -> Workspace {
        self.edit(|workspace| workspace.source_text = text).await
    }

    pub async fn set_target_text(&self, text: String) -> Workspace {
        self.edit(|workspace| workspace.target_text = text).await
    }

    pub async fn select_source(&self, code: LanguageCode) -> Workspace {
        warn_unsupported(&code);
        self.edit(|workspace| workspace.pair.source = code).await
    }

    pub async fn select_target(&self, code: LanguageCode) -> Workspace {
        warn_unsupported(&code);
        self.edit(|workspace| workspace.pair.target = code).await
    }

    async fn edit(&self, apply: impl FnOnce(&mut Workspace)) -> Workspace {
        let snapshot = {
            let mut workspace = self.state.workspace.write().await;
            apply(&mut workspace);
            workspace.clone()
        };

        self.publish(AppEvent::WorkspaceChanged(snapshot.clone()))
            .await;
        snapshot
    }

    async fn publish(&self, event: AppEvent) {
        if let Err(e) = self.app_to_ui_tx.send(event).await {
            tracing::warn!("failed to notify UI: {e}");
        }
    }
}

fn warn_unsupported(code: &str) {
    if !language::is_supported(code) {
        tracing::warn!("language code '{code}' is not in the language table, passing through");
    }
}
