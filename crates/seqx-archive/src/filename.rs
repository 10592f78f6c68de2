//! Archive entry name sanitization.

/// Characters that cannot appear in archive entry names. Brackets are
/// included so element suffixes never leak into filenames.
const INVALID_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*', '[', ']'];

/// Derive a filesystem-safe file stem from a tag name.
///
/// Invalid characters become `_`; surrounding whitespace and trailing dots
/// are stripped. A name with nothing left falls back to `"tag"`.
pub fn sanitize_file_stem(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_CHARS.contains(&c) { '_' } else { c })
        .collect();
    let trimmed = replaced.trim().trim_end_matches('.');
    if trimmed.is_empty() {
        "tag".to_string()
    } else {
        trimmed.to_string()
    }
}
