use std::io::{self, BufRead, Write};

use kanal::{AsyncReceiver, AsyncSender};
use tokio_util::sync::CancellationToken;
use verba_config::ui::UiConfig;
use verba_core::counter::CharCountTier;
use verba_core::language::SUPPORTED_LANGUAGES;
use verba_types::{AppEvent, PlaybackState, StatusKind, UiEvent, Workspace};

const HELP: &str = "\
Type text and press Enter to translate it.
  :from <code>    source language        :to <code>      target language
  :swap           swap languages/texts   :speak          read translation aloud (again to stop)
  :translate      translate current text :target <text> edit the translation
  :show           show both texts        :langs          list language codes
  :help           this help              :quit           exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Plain text: becomes the source text and is translated
    Text(String),
    From(String),
    To(String),
    Swap,
    Speak,
    Translate,
    Target(String),
    Show,
    Langs,
    Help,
    Quit,
    Unknown(String),
    Empty,
}

pub fn parse_command(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if line.trim().is_empty() {
        return Command::Empty;
    }

    let Some(rest) = line.trim_start().strip_prefix(':') else {
        return Command::Text(line.to_string());
    };

    let (name, arg) = match rest.split_once(char::is_whitespace) {
        Some((name, arg)) => (name, arg.trim()),
        None => (rest, ""),
    };

    match (name, arg) {
        ("from", code) if !code.is_empty() => Command::From(code.to_string()),
        ("to", code) if !code.is_empty() => Command::To(code.to_string()),
        ("swap", _) => Command::Swap,
        ("speak", _) => Command::Speak,
        ("translate" | "t", _) => Command::Translate,
        ("target", text) => Command::Target(text.to_string()),
        ("show", _) => Command::Show,
        ("langs", _) => Command::Langs,
        ("help" | "h" | "?", _) => Command::Help,
        ("quit" | "q" | "exit", _) => Command::Quit,
        _ => Command::Unknown(line.trim().to_string()),
    }
}

/// Events a command sends to the backend
pub fn command_events(command: Command) -> Vec<UiEvent> {
    match command {
        Command::Text(text) => vec![UiEvent::SetSourceText(text), UiEvent::Translate],
        Command::From(code) => vec![UiEvent::SelectSource(code)],
        Command::To(code) => vec![UiEvent::SelectTarget(code)],
        Command::Swap => vec![UiEvent::Swap],
        Command::Speak => vec![UiEvent::Speak],
        Command::Translate => vec![UiEvent::Translate],
        Command::Target(text) => vec![UiEvent::SetTargetText(text)],
        Command::Quit => vec![UiEvent::Close],
        Command::Show | Command::Langs | Command::Help | Command::Unknown(_) | Command::Empty => {
            vec![]
        }
    }
}

/// Terminal rendering of backend events
pub struct TerminalView {
    ui: UiConfig,
    interactive: bool,
    workspace: Option<Workspace>,
    speech_disabled: Option<String>,
}

impl TerminalView {
    pub fn new(ui: UiConfig, interactive: bool) -> Self {
        Self {
            ui,
            interactive,
            workspace: None,
            speech_disabled: None,
        }
    }

    pub fn speech_disabled(&self) -> Option<&str> {
        self.speech_disabled.as_deref()
    }

    /// Render one event, `None` when it has no visible effect
    pub fn render(&mut self, event: AppEvent) -> Option<String> {
        match event {
            AppEvent::Status(msg) => {
                let tag = match msg.kind {
                    StatusKind::Loading => "…",
                    StatusKind::Success => "✓",
                    StatusKind::Error => "✗",
                };
                Some(format!("{tag} {}", msg.text))
            }
            AppEvent::StatusCleared => None,
            AppEvent::ShowTranslation { text, to_lang, .. } => Some(format!("[{to_lang}] {text}")),
            AppEvent::WorkspaceChanged(workspace) => {
                let line = self.counter_line(&workspace);
                let changed = self
                    .workspace
                    .as_ref()
                    .is_none_or(|old| old.pair != workspace.pair || old.source_text != workspace.source_text);
                self.workspace = Some(workspace);
                changed.then_some(line)
            }
            AppEvent::PlaybackChanged(PlaybackState::Speaking) => Some("♪ speaking".to_string()),
            AppEvent::PlaybackChanged(PlaybackState::Idle) => Some("♪ stopped".to_string()),
            AppEvent::FocusSource => self.interactive.then(|| "Enter source text:".to_string()),
            AppEvent::SpeechUnavailable(reason) => {
                let line = format!("Speech playback disabled: {reason}");
                self.speech_disabled = Some(reason);
                Some(line)
            }
            AppEvent::BackendReady => Some("Ready. :help for commands".to_string()),
            AppEvent::UiEvent(_) => None,
        }
    }

    /// Output for commands the UI answers by itself
    pub fn local_reply(&self, command: &Command) -> Option<String> {
        match command {
            Command::Help => Some(HELP.to_string()),
            Command::Langs => Some(
                SUPPORTED_LANGUAGES
                    .iter()
                    .map(|l| format!("{}  {}", l.code, l.name))
                    .collect::<Vec<_>>()
                    .join("\n"),
            ),
            Command::Show => Some(match &self.workspace {
                Some(ws) => format!(
                    "{} : {}\n{} : {}",
                    ws.pair.source, ws.source_text, ws.pair.target, ws.target_text
                ),
                None => "Nothing entered yet".to_string(),
            }),
            Command::Speak => self
                .speech_disabled
                .as_ref()
                .map(|reason| format!("Speech playback disabled: {reason}")),
            Command::Unknown(line) => Some(format!("Unknown command '{line}', :help for help")),
            _ => None,
        }
    }

    fn counter_line(&self, workspace: &Workspace) -> String {
        let (count, tier) = CharCountTier::for_text(&workspace.source_text, &self.ui);
        let marker = match tier {
            CharCountTier::Normal => "",
            CharCountTier::Warning => " (long)",
            CharCountTier::Error => " (too long)",
        };
        format!(
            "{} → {} · {count}/{}{marker}",
            workspace.pair.source, workspace.pair.target, self.ui.max_chars
        )
    }
}

/// Blocking stdin reader on its own thread
fn spawn_stdin_reader() -> AsyncReceiver<String> {
    let (tx, rx) = kanal::bounded::<String>(16);

    std::thread::spawn(move || {
        for line in io::stdin().lock().lines() {
            match line {
                Ok(line) => {
                    if tx.send(line).is_err() {
                        break;
                    }
                }
                Err(e) => {
                    tracing::error!("stdin read failed: {e}");
                    break;
                }
            }
        }
        tracing::debug!("stdin closed");
    });

    rx.to_async()
}

fn print_line(line: &str, prompt: bool) {
    let mut stdout = io::stdout().lock();
    let _ = writeln!(stdout, "{line}");
    if prompt {
        let _ = write!(stdout, "> ");
    }
    let _ = stdout.flush();
}

pub async fn ui_loop(
    app_to_ui_rx: AsyncReceiver<AppEvent>,
    ui_to_app_tx: AsyncSender<AppEvent>,
    ui: UiConfig,
    cancel: CancellationToken,
) -> anyhow::Result<()> {
    let interactive = atty::is(atty::Stream::Stdin);
    let mut view = TerminalView::new(ui, interactive);
    let lines = spawn_stdin_reader();

    loop {
        tokio::select! {
            _ = cancel.cancelled() => {
                tracing::info!("UI loop stopping");
                break;
            }
            event = app_to_ui_rx.recv() => {
                if let Some(line) = view.render(event?) {
                    print_line(&line, interactive);
                }
            }
            line = lines.recv() => {
                let Ok(line) = line else {
                    // stdin closed
                    ui_to_app_tx.send(AppEvent::UiEvent(UiEvent::Close)).await?;
                    break;
                };

                let command = parse_command(&line);
                if let Some(reply) = view.local_reply(&command) {
                    print_line(&reply, interactive);
                    if matches!(command, Command::Speak) {
                        continue;
                    }
                }

                for event in command_events(command) {
                    ui_to_app_tx.send(AppEvent::UiEvent(event)).await?;
                }
            }
        }
    }

    Ok(())
}
