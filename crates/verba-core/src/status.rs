use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use kanal::AsyncSender;
use tokio::sync::RwLock;
use verba_types::{AppEvent, StatusKind, StatusMessage};

/// Single status slot shown to the user.
///
/// Every `show` supersedes the previous message. Success messages expire on
/// their own after `clear_after`; each message gets a generation number and an
/// expiry timer only clears the slot if its generation is still current, so a
/// late timer never wipes a newer message.
#[derive(Clone)]
pub struct StatusBoard {
    current: Arc<RwLock<Option<StatusMessage>>>,
    generation: Arc<AtomicU64>,
    clear_after: Duration,
    notify: AsyncSender<AppEvent>,
}

impl StatusBoard {
    pub fn new(notify: AsyncSender<AppEvent>, clear_after: Duration) -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
            generation: Arc::new(AtomicU64::new(0)),
            clear_after,
            notify,
        }
    }

    pub async fn current(&self) -> Option<StatusMessage> {
        self.current.read().await.clone()
    }

    pub async fn loading(&self, text: impl Into<String>) {
        self.show(StatusMessage::new(text, StatusKind::Loading)).await;
    }

    pub async fn success(&self, text: impl Into<String>) {
        self.show(StatusMessage::new(text, StatusKind::Success)).await;
    }

    pub async fn error(&self, text: impl Into<String>) {
        self.show(StatusMessage::new(text, StatusKind::Error)).await;
    }

    pub async fn show(&self, message: StatusMessage) {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        let kind = message.kind;

        *self.current.write().await = Some(message.clone());
        tracing::debug!("status #{generation} {:?}: {}", kind, message.text);
        self.publish(AppEvent::Status(message)).await;

        if kind == StatusKind::Success {
            let board = self.clone();
            tokio::spawn(async move {
                tokio::time::sleep(board.clear_after).await;
                board.expire(generation).await;
            });
        }
    }

    async fn expire(&self, generation: u64) {
        {
            let mut current = self.current.write().await;
            if self.generation.load(Ordering::SeqCst) != generation {
                tracing::trace!("status #{generation} superseded, timer ignored");
                return;
            }
            *current = None;
        }

        self.publish(AppEvent::StatusCleared).await;
    }

    async fn publish(&self, event: AppEvent) {
        if let Err(e) = self.notify.send(event).await {
            tracing::warn!("status update dropped: {e}");
        }
    }
}
