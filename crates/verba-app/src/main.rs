use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;
use tokio::signal;
use tracing_subscriber::EnvFilter;
use verba_config::Config;
use verba_core::state::AppState;

pub mod controller;
pub mod events;
pub mod orchestrator;
pub mod profile;
pub mod ui;

#[cfg(test)]
mod tests;

use self::controller::AppController;

#[derive(Parser, Debug)]
#[command(name = "verba", about = "Translate text with Gemini and read it aloud")]
struct Args {
    /// JSON profile to load instead of ./config.json
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Source language code
    #[arg(long)]
    from: Option<String>,

    /// Target language code
    #[arg(long)]
    to: Option<String>,

    /// Disable speech playback
    #[arg(long)]
    no_speech: bool,

    /// Log as JSON lines
    #[arg(long)]
    log_json: bool,
}

impl Args {
    fn apply(&self, config: &mut Config) {
        if let Some(from) = &self.from {
            config.translator.from_lang = from.clone();
        }
        if let Some(to) = &self.to {
            config.translator.to_lang = to.clone();
        }
        if self.no_speech {
            config.speech.enabled = false;
        }
        if self.log_json {
            config.log_json = true;
        }
    }
}

fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    if json {
        builder.json().init();
    } else {
        builder.init();
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let args = Args::parse();

    let mut config = profile::load_config(args.config.as_deref())?;
    args.apply(&mut config);
    init_tracing(config.log_json);

    tracing::info!(
        "Starting verba {} -> {}",
        config.translator.from_lang,
        config.translator.to_lang
    );

    let state = Arc::new(AppState::new(config));
    let controller = AppController::new(state);
    let mut tasks = controller.spawn_tasks().await;

    tokio::select! {
        result = signal::ctrl_c() => {
            if let Err(e) = result {
                tracing::error!("failed to listen for ctrl+c: {e}");
            }
            tracing::info!("Shutdown requested");
        }
        Some(result) = tasks.join_next() => {
            match result {
                Ok(Ok(())) => tracing::info!("task finished, shutting down"),
                Ok(Err(e)) => tracing::error!("task exited: {e}"),
                Err(e) => tracing::error!("task panicked: {e}"),
            }
        }
    }

    controller.shutdown();
    tasks.abort_all();

    Ok(())
}
