use serde::{Deserialize, Serialize};

fn default_status_clear_ms() -> u64 {
    5000
}

fn default_warn_chars() -> usize {
    700
}

fn default_max_chars() -> usize {
    1000
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct UiConfig {
    /// Success messages disappear after this many milliseconds
    #[serde(default = "default_status_clear_ms")]
    pub status_clear_ms: u64,
    /// Character counter turns to warning above this count
    #[serde(default = "default_warn_chars")]
    pub warn_chars: usize,
    /// Character counter turns to error above this count. Not enforced.
    #[serde(default = "default_max_chars")]
    pub max_chars: usize,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            status_clear_ms: default_status_clear_ms(),
            warn_chars: default_warn_chars(),
            max_chars: default_max_chars(),
        }
    }
}
