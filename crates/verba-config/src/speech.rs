use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_program() -> String {
    "espeak-ng".to_string()
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct SpeechConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Speech synthesizer executable, must understand `--voices` and `-v`
    #[serde(default = "default_program")]
    pub program: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            program: default_program(),
        }
    }
}
