use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use kanal::AsyncReceiver;
use serde_json::{Value, json};
use verba_config::Config;
use verba_core::input::InputController;
use verba_core::state::AppState;
use verba_core::status::StatusBoard;
use verba_speech::PlaybackController;
use verba_translator::{GeminiTranslator, TranslateError, Transport, Url};
use verba_types::AppEvent;

use crate::events::Handlers;
use crate::orchestrator::Orchestrator;

mod event_loop_tests;
mod translation_tests;

type Reply = (Duration, Result<Value, TranslateError>);

/// Scripted generation endpoint: each call pops the next (delay, reply)
pub struct MockTransport {
    replies: Mutex<VecDeque<Reply>>,
    calls: AtomicUsize,
}

impl MockTransport {
    pub fn new(replies: Vec<(Duration, Value)>) -> Arc<Self> {
        Self::scripted(
            replies
                .into_iter()
                .map(|(delay, body)| (delay, Ok(body)))
                .collect(),
        )
    }

    pub fn scripted(replies: Vec<Reply>) -> Arc<Self> {
        Arc::new(Self {
            replies: Mutex::new(replies.into()),
            calls: AtomicUsize::new(0),
        })
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn post_json(&self, _url: Url, _body: &Value) -> Result<Value, TranslateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let (delay, reply) = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .expect("unexpected request");
        tokio::time::sleep(delay).await;
        reply
    }
}

pub fn success_body(text: &str) -> Value {
    json!({ "candidates": [{ "content": { "parts": [{ "text": text }] } }] })
}

/// A real `reqwest::Error`, built without touching the network
pub fn transport_error() -> TranslateError {
    let err = reqwest::Client::new()
        .post("not a url")
        .build()
        .expect_err("request with a relative url should not build");
    TranslateError::Transport(err)
}

pub struct Harness {
    pub handlers: Handlers,
    pub transport: Arc<MockTransport>,
    pub rx: AsyncReceiver<AppEvent>,
}

impl Harness {
    pub fn new(replies: Vec<(Duration, Value)>) -> Self {
        Self::with_playback(replies, |_, _| None)
    }

    pub fn with_transport(transport: Arc<MockTransport>) -> Self {
        Self::build(transport, |_, _| None)
    }

    pub fn with_playback(
        replies: Vec<(Duration, Value)>,
        playback: impl FnOnce(StatusBoard, kanal::AsyncSender<AppEvent>) -> Option<Arc<PlaybackController>>,
    ) -> Self {
        Self::build(MockTransport::new(replies), playback)
    }

    fn build(
        transport: Arc<MockTransport>,
        playback: impl FnOnce(StatusBoard, kanal::AsyncSender<AppEvent>) -> Option<Arc<PlaybackController>>,
    ) -> Self {
        let (tx, rx) = kanal::unbounded_async();
        let state = Arc::new(AppState::new(Config::default()));
        let status = StatusBoard::new(tx.clone(), Duration::from_secs(5));

        let translator = GeminiTranslator::with_transport(
            "test-key".to_string(),
            "https://example.test/v1beta/models/gemini-2.0-flash:generateContent".to_string(),
            transport.clone(),
        );
        let orchestrator = Arc::new(Orchestrator::new(
            Arc::new(translator),
            state.clone(),
            status.clone(),
            tx.clone(),
        ));
        let input = InputController::new(state.clone(), status.clone(), tx.clone());
        let playback = playback(status.clone(), tx);

        Self {
            handlers: Handlers {
                state,
                status,
                input,
                orchestrator,
                playback,
            },
            transport,
            rx,
        }
    }

    pub fn drain(&self) -> Vec<AppEvent> {
        let mut events = Vec::new();
        while let Ok(Some(event)) = self.rx.try_recv() {
            events.push(event);
        }
        events
    }
}
