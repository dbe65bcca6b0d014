use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::Context;
use verba_config::Config;

const DEFAULT_PROFILE: &str = "config.json";

/// Read a JSON profile, missing fields take their defaults
pub fn load_profile(path: &Path) -> anyhow::Result<Config> {
    tracing::info!("Loading profile {}", path.display());
    let file = File::open(path).with_context(|| format!("failed to open {}", path.display()))?;
    let reader = BufReader::new(file);
    let config = serde_json::from_reader(reader)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}

/// Resolve the configuration.
///
/// An explicit profile must exist. Without one, `config.json` in the working
/// directory is used when present, built-in defaults otherwise. Environment
/// variables are layered on top either way.
pub fn load_config(explicit: Option<&Path>) -> anyhow::Result<Config> {
    let mut config = match explicit {
        Some(path) => load_profile(path)?,
        None => {
            let fallback = PathBuf::from(DEFAULT_PROFILE);
            if fallback.exists() {
                load_profile(&fallback)?
            } else {
                tracing::debug!("No profile found, using defaults");
                Config::default()
            }
        }
    };

    config.apply_env();
    Ok(config)
}
