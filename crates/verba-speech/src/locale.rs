/// Canonical casing for a locale tag: `en-us` becomes `en-US`
pub fn normalize_locale(tag: &str) -> String {
    let mut parts = tag.split(['-', '_']);
    let mut normalized = parts.next().unwrap_or_default().to_ascii_lowercase();

    for part in parts {
        normalized.push('-');
        if part.len() == 2 && part.chars().all(|c| c.is_ascii_alphabetic()) {
            normalized.push_str(&part.to_ascii_uppercase());
        } else {
            normalized.push_str(part);
        }
    }

    normalized
}
