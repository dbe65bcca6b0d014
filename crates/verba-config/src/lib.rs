use std::env;

use serde::{Deserialize, Serialize};

use self::speech::SpeechConfig;
use self::translator::TranslatorConfig;
use self::ui::UiConfig;

pub mod speech;
pub mod translator;
pub mod ui;

#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub translator: TranslatorConfig,
    pub speech: SpeechConfig,
    pub ui: UiConfig,

    /// Emit logs as JSON lines instead of human readable text
    pub log_json: bool,
}

impl Config {
    /// Defaults overridden by environment variables
    pub fn new() -> Self {
        let mut config = Config::default();
        config.apply_env();
        config
    }

    /// Overlay environment variables on top of the current values
    pub fn apply_env(&mut self) {
        if let Ok(key) = env::var("GEMINI_API_KEY") {
            self.translator.api_key = key;
        }

        if let Ok(url) = env::var("GEMINI_API_URL") {
            self.translator.api_url = url;
        }

        if let Ok(lang) = env::var("SOURCE_LANG") {
            self.translator.from_lang = lang;
        }

        if let Ok(lang) = env::var("TARGET_LANG") {
            self.translator.to_lang = lang;
        }

        if let Some(ms) = env::var("STATUS_CLEAR_MS").ok().and_then(|v| v.parse().ok()) {
            self.ui.status_clear_ms = ms;
        }

        if let Ok(program) = env::var("SPEECH_PROGRAM") {
            self.speech.program = program;
        }

        if let Some(enabled) = env::var("SPEECH_ENABLED").ok().and_then(|v| parse_flag(&v)) {
            self.speech.enabled = enabled;
        }

        if let Some(json) = env::var("LOG_JSON").ok().and_then(|v| parse_flag(&v)) {
            self.log_json = json;
        }
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}
