use std::sync::Arc;

use kanal::AsyncSender;
use verba_config::translator::TranslatorConfig;
use verba_core::request::TranslationRequest;
use verba_core::state::AppState;
use verba_core::status::StatusBoard;
use verba_translator::gemini::GenerationConfig;
use verba_translator::{GeminiTranslator, Translator};
use verba_types::{AppEvent, TranslationResult};

/// Runs one translation request end to end and reports the outcome.
///
/// Every failure ends here as an error status; the target text is only
/// written on success. Overlapping calls are not serialized, whichever
/// response resolves last owns the target text.
pub struct Orchestrator {
    translator: Arc<dyn Translator>,
    state: Arc<AppState>,
    status: StatusBoard,
    app_to_ui_tx: AsyncSender<AppEvent>,
}

impl Orchestrator {
    pub fn new(
        translator: Arc<dyn Translator>,
        state: Arc<AppState>,
        status: StatusBoard,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        Self {
            translator,
            state,
            status,
            app_to_ui_tx,
        }
    }

    pub fn from_config(
        config: &TranslatorConfig,
        state: Arc<AppState>,
        status: StatusBoard,
        app_to_ui_tx: AsyncSender<AppEvent>,
    ) -> Self {
        if config.api_key.is_empty() {
            tracing::warn!("GEMINI_API_KEY is not set, translations will fail");
        }

        let translator = GeminiTranslator::new(config.api_key.clone(), config.api_url.clone())
            .with_generation_config(GenerationConfig {
                temperature: config.temperature,
                top_p: config.top_p,
                top_k: config.top_k,
            });

        Self::new(Arc::new(translator), state, status, app_to_ui_tx)
    }

    pub async fn translate(&self, request: TranslationRequest) -> TranslationResult {
        let TranslationRequest { id, text, pair } = request;
        let provider = self.translator.metadata().name;

        match self
            .translator
            .translate(&text, pair.source.clone(), pair.target.clone())
            .await
        {
            Ok(translation) => {
                tracing::info!(
                    "translation {id} via {provider} complete: {} chars",
                    translation.text.chars().count()
                );

                self.state.set_target_text(translation.text.clone()).await;
                self.publish(AppEvent::WorkspaceChanged(self.state.snapshot().await))
                    .await;
                self.publish(AppEvent::ShowTranslation {
                    text: translation.text.clone(),
                    from_lang: translation.from,
                    to_lang: translation.to,
                })
                .await;
                self.status.success("Translation complete!").await;

                TranslationResult::Translated {
                    text: translation.text,
                }
            }
            Err(e) => {
                tracing::error!("translation {id} via {provider} failed: {e}");

                let message = e.to_string();
                self.status
                    .error(format!("Translation failed: {message}"))
                    .await;

                TranslationResult::Failed { message }
            }
        }
    }

    async fn publish(&self, event: AppEvent) {
        if let Err(e) = self.app_to_ui_tx.send(event).await {
            tracing::warn!("failed to notify UI: {e}");
        }
    }
}
