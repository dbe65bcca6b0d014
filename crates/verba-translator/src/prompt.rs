use verba_core::language::language_name;

/// Instruction sent to the model.
///
/// `text` is embedded verbatim inside the quoted region, so it can carry
/// instructions of its own. See [`injection_risk`].
pub fn translation_prompt(text: &str, from: &str, to: &str) -> String {
    format!(
        "Translate the following text from {} to {}. \n    \
         Return only the translated text without explanations or additional text: \"{}\"",
        language_name(from),
        language_name(to),
        text
    )
}

/// True when `text` could close the quoted region of the prompt early
pub fn injection_risk(text: &str) -> bool {
    text.contains(['"', '\u{201c}', '\u{201d}']) || text.contains(['\n', '\r'])
}
