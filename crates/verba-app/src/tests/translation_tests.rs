use std::time::Duration;

use serde_json::json;
use tokio::time::sleep;
use verba_config::ui::UiConfig;
use verba_types::{AppEvent, StatusKind, TranslationResult, UiEvent};

use super::{Harness, MockTransport, success_body, transport_error};
use crate::events::handle_ui_event;
use crate::events::translate::handle_translate;
use crate::ui::{Command, TerminalView};

async fn enter(harness: &Harness, text: &str) {
    handle_ui_event(&harness.handlers, UiEvent::SetSourceText(text.to_string()))
        .await
        .unwrap();
}

async fn translate(harness: &Harness) -> TranslationResult {
    handle_translate(&harness.handlers)
        .await
        .expect("request should be sent")
        .await
        .unwrap()
}

#[tokio::test(start_paused = true)]
async fn test_hello_to_bonjour_end_to_end() {
    let harness = Harness::new(vec![(Duration::ZERO, success_body("Bonjour"))]);
    enter(&harness, "Hello").await;
    harness.drain();

    let result = translate(&harness).await;
    assert_eq!(
        result,
        TranslationResult::Translated {
            text: "Bonjour".to_string()
        }
    );
    assert_eq!(harness.handlers.state.target_text().await, "Bonjour");
    assert_eq!(harness.transport.calls(), 1);

    let events = harness.drain();
    let kinds: Vec<StatusKind> = events
        .iter()
        .filter_map(|e| match e {
            AppEvent::Status(msg) => Some(msg.kind),
            _ => None,
        })
        .collect();
    assert_eq!(kinds, vec![StatusKind::Loading, StatusKind::Success]);
    assert!(events.iter().any(|e| matches!(
        e,
        AppEvent::ShowTranslation { text, from_lang, to_lang }
            if text == "Bonjour" && from_lang == "en" && to_lang == "fr"
    )));

    sleep(Duration::from_millis(4900)).await;
    let status = harness.handlers.status.current().await.unwrap();
    assert_eq!(status.kind, StatusKind::Success);
    assert_eq!(status.text, "Translation complete!");

    sleep(Duration::from_millis(200)).await;
    assert!(harness.handlers.status.current().await.is_none());
    assert!(
        harness
            .drain()
            .iter()
            .any(|e| matches!(e, AppEvent::StatusCleared))
    );
}

#[tokio::test]
async fn test_error_envelope_keeps_previous_target() {
    let harness = Harness::new(vec![(
        Duration::ZERO,
        json!({ "error": { "code": 400, "message": "X" } }),
    )]);
    handle_ui_event(&harness.handlers, UiEvent::SetTargetText("earlier".to_string()))
        .await
        .unwrap();
    enter(&harness, "Hello").await;
    harness.drain();

    let result = translate(&harness).await;
    assert!(matches!(result, TranslationResult::Failed { ref message } if message == "X"));
    assert_eq!(harness.handlers.state.target_text().await, "earlier");

    let status = harness.handlers.status.current().await.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.contains("X"));
    assert_eq!(status.text, "Translation failed: X");

    assert!(
        !harness
            .drain()
            .iter()
            .any(|e| matches!(e, AppEvent::ShowTranslation { .. }))
    );
}

#[tokio::test]
async fn test_transport_failure_keeps_previous_target() {
    let harness = Harness::with_transport(MockTransport::scripted(vec![(
        Duration::ZERO,
        Err(transport_error()),
    )]));
    handle_ui_event(&harness.handlers, UiEvent::SetTargetText("earlier".to_string()))
        .await
        .unwrap();
    enter(&harness, "Hello").await;
    harness.drain();

    let result = translate(&harness).await;
    assert!(matches!(
        result,
        TranslationResult::Failed { ref message } if message.starts_with("Network error")
    ));
    assert_eq!(harness.handlers.state.target_text().await, "earlier");
    assert_eq!(harness.transport.calls(), 1);

    let status = harness.handlers.status.current().await.unwrap();
    assert_eq!(status.kind, StatusKind::Error);
    assert!(status.text.starts_with("Translation failed: Network error"));

    assert!(
        !harness
            .drain()
            .iter()
            .any(|e| matches!(e, AppEvent::ShowTranslation { .. }))
    );
}

#[tokio::test]
async fn test_show_lists_translation_after_success() {
    let harness = Harness::new(vec![(Duration::ZERO, success_body("Bonjour"))]);
    let mut view = TerminalView::new(UiConfig::default(), false);
    view.render(AppEvent::WorkspaceChanged(harness.handlers.state.snapshot().await));

    enter(&harness, "Hello").await;
    translate(&harness).await;
    for event in harness.drain() {
        view.render(event);
    }

    assert_eq!(
        view.local_reply(&Command::Show).as_deref(),
        Some("en : Hello\nfr : Bonjour")
    );
}

#[tokio::test]
async fn test_missing_candidates_is_an_error() {
    let harness = Harness::new(vec![(Duration::ZERO, json!({ "usageMetadata": {} }))]);
    handle_ui_event(&harness.handlers, UiEvent::SetTargetText("keep me".to_string()))
        .await
        .unwrap();
    enter(&harness, "Hello").await;

    let result = translate(&harness).await;
    assert!(!result.is_translated());
    assert_eq!(harness.handlers.state.target_text().await, "keep me");
    assert_eq!(
        harness.handlers.status.current().await.unwrap().kind,
        StatusKind::Error
    );
}

#[tokio::test]
async fn test_blank_input_never_reaches_network() {
    let harness = Harness::new(vec![]);

    for text in ["", "   ", "\n\t"] {
        enter(&harness, text).await;
        assert!(handle_translate(&harness.handlers).await.is_none());

        let status = harness.handlers.status.current().await.unwrap();
        assert_eq!(status.kind, StatusKind::Error);
        assert_eq!(status.text, "Please enter text to translate");
    }

    assert_eq!(harness.transport.calls(), 0);
    assert!(
        harness
            .drain()
            .iter()
            .any(|e| matches!(e, AppEvent::FocusSource))
    );
}

#[tokio::test(start_paused = true)]
async fn test_overlapping_requests_last_response_wins() {
    let harness = Harness::new(vec![
        (Duration::from_secs(2), success_body("slow")),
        (Duration::from_secs(1), success_body("fast")),
    ]);
    enter(&harness, "Hello").await;

    let first = handle_translate(&harness.handlers).await.unwrap();
    let second = handle_translate(&harness.handlers).await.unwrap();

    second.await.unwrap();
    assert_eq!(harness.handlers.state.target_text().await, "fast");

    first.await.unwrap();
    assert_eq!(harness.handlers.state.target_text().await, "slow");
    assert_eq!(harness.transport.calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_new_request_is_not_cleared_by_old_success_timer() {
    let harness = Harness::new(vec![
        (Duration::ZERO, success_body("Bonjour")),
        (Duration::from_secs(10), success_body("Salut")),
    ]);
    enter(&harness, "Hello").await;
    translate(&harness).await;

    sleep(Duration::from_secs(4)).await;
    let pending = handle_translate(&harness.handlers).await.unwrap();

    sleep(Duration::from_secs(2)).await;
    let status = harness.handlers.status.current().await.unwrap();
    assert_eq!(status.kind, StatusKind::Loading);

    pending.await.unwrap();
    assert_eq!(harness.handlers.state.target_text().await, "Salut");
}

#[tokio::test]
async fn test_swap_after_translation() {
    let harness = Harness::new(vec![(Duration::ZERO, success_body("Bonjour"))]);
    enter(&harness, "Hello").await;
    translate(&harness).await;

    handle_ui_event(&harness.handlers, UiEvent::Swap).await.unwrap();
    let workspace = harness.handlers.state.snapshot().await;
    assert_eq!(workspace.pair.source, "fr");
    assert_eq!(workspace.pair.target, "en");
    assert_eq!(workspace.source_text, "Bonjour");
    assert_eq!(workspace.target_text, "Hello");
    assert_eq!(harness.transport.calls(), 1);
}
