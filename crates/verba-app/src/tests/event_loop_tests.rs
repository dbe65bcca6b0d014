use std::sync::Arc;
use std::time::Duration;

use tokio::time::timeout;
use verba_types::{AppEvent, UiEvent};

use super::{Harness, success_body};
use crate::events::event_loop;

#[tokio::test]
async fn test_event_loop_translates_and_closes() {
    let harness = Harness::new(vec![(Duration::ZERO, success_body("Hallo"))]);
    let Harness {
        handlers,
        transport,
        rx,
    } = harness;
    let handlers = Arc::new(handlers);

    let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded_async();
    let task = tokio::spawn(event_loop(handlers.clone(), ui_to_app_rx));

    for event in [
        UiEvent::SelectTarget("de".to_string()),
        UiEvent::SetSourceText("Hello".to_string()),
        UiEvent::Translate,
    ] {
        ui_to_app_tx.send(AppEvent::UiEvent(event)).await.unwrap();
    }

    let shown = timeout(Duration::from_secs(2), async {
        loop {
            if let AppEvent::ShowTranslation { text, to_lang, .. } = rx.recv().await.unwrap() {
                return (text, to_lang);
            }
        }
    })
    .await
    .expect("translation never shown");
    assert_eq!(shown, ("Hallo".to_string(), "de".to_string()));
    assert_eq!(transport.calls(), 1);

    ui_to_app_tx
        .send(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();
    let result = timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_event_loop_ignores_backend_events() {
    let harness = Harness::new(vec![]);
    let handlers = Arc::new(harness.handlers);

    let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded_async();
    let task = tokio::spawn(event_loop(handlers, ui_to_app_rx));

    ui_to_app_tx.send(AppEvent::BackendReady).await.unwrap();
    ui_to_app_tx.send(AppEvent::StatusCleared).await.unwrap();
    ui_to_app_tx
        .send(AppEvent::UiEvent(UiEvent::Close))
        .await
        .unwrap();

    let result = timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_event_loop_ends_when_ui_hangs_up() {
    let harness = Harness::new(vec![]);
    let handlers = Arc::new(harness.handlers);

    let (ui_to_app_tx, ui_to_app_rx) = kanal::unbounded_async::<AppEvent>();
    let task = tokio::spawn(event_loop(handlers, ui_to_app_rx));
    drop(ui_to_app_tx);

    let result = timeout(Duration::from_secs(2), task).await.unwrap().unwrap();
    assert!(result.is_err());
}
