use verba_core::input::InputController;
use verba_types::UiEvent;

pub async fn handle_edit(input: &InputController, event: UiEvent) {
    match event {
        UiEvent::SetSourceText(text) => {
            input.set_source_text(text).await;
        }
        UiEvent::SetTargetText(text) => {
            input.set_target_text(text).await;
        }
        UiEvent::SelectSource(code) => {
            input.select_source(code).await;
        }
        UiEvent::SelectTarget(code) => {
            input.select_target(code).await;
        }
        other => tracing::warn!("not an edit event: {:?}", other),
    }
}
