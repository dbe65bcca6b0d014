/// A language offered in the language selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Language {
    /// ISO 639-1 code
    pub code: &'static str,
    /// English name used inside translation prompts
    pub name: &'static str,
    /// Locale tag understood by speech engines
    pub voice_locale: &'static str,
}

pub const SUPPORTED_LANGUAGES: &[Language] = &[
    Language { code: "en", name: "English", voice_locale: "en-US" },
    Language { code: "fr", name: "French", voice_locale: "fr-FR" },
    Language { code: "es", name: "Spanish", voice_locale: "es-ES" },
    Language { code: "de", name: "German", voice_locale: "de-DE" },
    Language { code: "it", name: "Italian", voice_locale: "it-IT" },
    Language { code: "pt", name: "Portuguese", voice_locale: "pt-PT" },
    Language { code: "ru", name: "Russian", voice_locale: "ru-RU" },
    Language { code: "zh", name: "Chinese", voice_locale: "zh-CN" },
    Language { code: "ja", name: "Japanese", voice_locale: "ja-JP" },
    Language { code: "ko", name: "Korean", voice_locale: "ko-KR" },
];

pub fn lookup(code: &str) -> Option<&'static Language> {
    SUPPORTED_LANGUAGES.iter().find(|l| l.code == code)
}

pub fn is_supported(code: &str) -> bool {
    lookup(code).is_some()
}

/// Full language name for a code. Unknown codes are returned unchanged.
pub fn language_name(code: &str) -> &str {
    lookup(code).map(|l| l.name).unwrap_or(code)
}

/// Speech locale tag for a code. Unknown codes are returned unchanged.
pub fn voice_language_code(code: &str) -> &str {
    lookup(code).map(|l| l.voice_locale).unwrap_or(code)
}
