use std::process::Stdio;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use async_trait::async_trait;
use kanal::AsyncSender;
use tokio::process::Command;
use tokio::sync::{Mutex, RwLock};
use tokio_util::sync::CancellationToken;

use crate::locale::normalize_locale;
use crate::{SpeechEngine, SpeechError, SpeechEvent, Utterance, Voice};

/// Speech through the `espeak-ng` command line (or a compatible program)
pub struct EspeakEngine {
    program: String,
    voices: RwLock<Vec<Voice>>,
    speaking: Arc<AtomicBool>,
    /// Bumped per utterance; only the newest one may clear `speaking`
    turn: Arc<AtomicU64>,
    current: Mutex<Option<CancellationToken>>,
    events: AsyncSender<SpeechEvent>,
}

impl EspeakEngine {
    /// Probe for the program. `None` means speech is unsupported here.
    pub async fn detect(program: &str, events: AsyncSender<SpeechEvent>) -> Option<Arc<Self>> {
        let probe = Command::new(program)
            .arg("--version")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await;

        match probe {
            Ok(status) if status.success() => {
                tracing::info!("speech synthesis available via {program}");
                Some(Arc::new(Self {
                    program: program.to_string(),
                    voices: RwLock::new(Vec::new()),
                    speaking: Arc::new(AtomicBool::new(false)),
                    turn: Arc::new(AtomicU64::new(0)),
                    current: Mutex::new(None),
                    events,
                }))
            }
            Ok(status) => {
                tracing::warn!("{program} --version exited with {status}");
                None
            }
            Err(e) => {
                tracing::warn!("{program} not usable: {e}");
                None
            }
        }
    }

    /// Load the voice list in the background, then signal `VoicesChanged`
    pub fn spawn_voice_refresh(self: &Arc<Self>) {
        let engine = Arc::clone(self);
        tokio::spawn(async move {
            match engine.list_voices().await {
                Ok(voices) => {
                    tracing::debug!("{} voices installed", voices.len());
                    *engine.voices.write().await = voices;
                    if let Err(e) = engine.events.send(SpeechEvent::VoicesChanged).await {
                        tracing::warn!("voice list notification dropped: {e}");
                    }
                }
                Err(e) => tracing::error!("failed to list voices: {e}"),
            }
        });
    }

    async fn list_voices(&self) -> Result<Vec<Voice>, SpeechError> {
        let output = Command::new(&self.program)
            .arg("--voices")
            .stderr(Stdio::null())
            .output()
            .await?;

        if !output.status.success() {
            return Err(SpeechError::Engine(format!(
                "{} --voices exited with {}",
                self.program, output.status
            )));
        }

        Ok(parse_voices(&String::from_utf8_lossy(&output.stdout)))
    }
}

#[async_trait]
impl SpeechEngine for EspeakEngine {
    async fn voices(&self) -> Vec<Voice> {
        self.voices.read().await.clone()
    }

    async fn speak(&self, utterance: Utterance) -> Result<(), SpeechError> {
        let voice = utterance
            .voice
            .as_ref()
            .map(|v| v.id.clone())
            .unwrap_or_else(|| utterance.lang.to_ascii_lowercase());

        let mut child = Command::new(&self.program)
            .arg("-v")
            .arg(&voice)
            .arg("--")
            .arg(&utterance.text)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()?;

        let token = CancellationToken::new();
        if let Some(previous) = self.current.lock().await.replace(token.clone()) {
            previous.cancel();
        }

        let turn = self.turn.fetch_add(1, Ordering::SeqCst) + 1;
        self.speaking.store(true, Ordering::SeqCst);

        let id = utterance.id;
        let events = self.events.clone();
        let speaking = Arc::clone(&self.speaking);
        let latest = Arc::clone(&self.turn);
        let program = self.program.clone();

        tokio::spawn(async move {
            let _ = events.send(SpeechEvent::Started(id)).await;

            let finished = tokio::select! {
                status = child.wait() => Some(status),
                _ = token.cancelled() => None,
            };

            let event = match finished {
                Some(Ok(status)) if status.success() => SpeechEvent::Ended(id),
                Some(Ok(status)) => SpeechEvent::Error {
                    id,
                    message: format!("{program} exited with {status}"),
                },
                Some(Err(e)) => SpeechEvent::Error {
                    id,
                    message: e.to_string(),
                },
                None => {
                    if let Err(e) = child.kill().await {
                        tracing::warn!("failed to stop {program}: {e}");
                    }
                    SpeechEvent::Ended(id)
                }
            };

            if latest.load(Ordering::SeqCst) == turn {
                speaking.store(false, Ordering::SeqCst);
            }

            if let Err(e) = events.send(event).await {
                tracing::warn!("speech notification dropped: {e}");
            }
        });

        Ok(())
    }

    async fn cancel(&self) {
        if let Some(token) = self.current.lock().await.take() {
            token.cancel();
        }
        self.speaking.store(false, Ordering::SeqCst);
    }

    fn is_speaking(&self) -> bool {
        self.speaking.load(Ordering::SeqCst)
    }
}

/// Parse the table printed by `espeak-ng --voices`
pub fn parse_voices(output: &str) -> Vec<Voice> {
    output
        .lines()
        .filter_map(|line| {
            let fields: Vec<&str> = line.split_whitespace().collect();
            if fields.len() < 5 || fields[0] == "Pty" {
                return None;
            }
            Some(Voice {
                id: fields[1].to_string(),
                name: fields[3].replace('_', " "),
                lang: normalize_locale(fields[1]),
                aliases: parse_other_languages(&fields[5..].join(" ")),
            })
        })
        .collect()
}

/// `(zh-cmn 5)(zh 5)` -> `["zh-cmn", "zh"]`, priorities dropped
fn parse_other_languages(column: &str) -> Vec<String> {
    column
        .split('(')
        .filter_map(|group| group.split_whitespace().next())
        .map(|code| normalize_locale(code.trim_end_matches(')')))
        .filter(|code| !code.is_empty())
        .collect()
}
