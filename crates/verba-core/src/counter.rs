use verba_config::ui::UiConfig;

/// Visual tier of the source character counter. Cosmetic only.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CharCountTier {
    Normal,
    Warning,
    Error,
}

impl CharCountTier {
    pub fn for_count(count: usize, ui: &UiConfig) -> Self {
        if count > ui.max_chars {
            CharCountTier::Error
        } else if count > ui.warn_chars {
            CharCountTier::Warning
        } else {
            CharCountTier::Normal
        }
    }

    pub fn for_text(text: &str, ui: &UiConfig) -> (usize, Self) {
        let count = text.chars().count();
        (count, Self::for_count(count, ui))
    }
}
