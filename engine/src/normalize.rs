//! Command-output normalization utilities.

use regex::Regex;
use std::sync::LazyLock;

/// Strips terminal formatting and unifies line endings.
///
/// Removes ANSI escape sequences and overstrike pairs (`x\x08x`, as emitted
/// by tools that fake bold text) and converts `\r\n` and lone `\r` to `\n`.
pub fn normalize_output(raw: &str) -> String {
    // SAFETY: These regexes are compile-time constants and are validated by tests.
    static ANSI_RE: LazyLock<Regex> = LazyLock::new(|| {
        Regex::new(r"\x1b\[[0-9;?]*[ -/]*[@-~]").expect("static regex must compile")
    });
    static OVERSTRIKE_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r".\x08").expect("static regex must compile"));

    let stripped = ANSI_RE.replace_all(raw, "");
    let mut cleaned = stripped.into_owned();
    while OVERSTRIKE_RE.is_match(&cleaned) {
        cleaned = OVERSTRIKE_RE.replace_all(&cleaned, "").into_owned();
    }
    cleaned.replace("\r\n", "\n").replace('\r', "\n")
}

/// Normalizes a field label into a record key.
///
/// Trims, lowercases and collapses every run of whitespace or `-` into a
/// single `_` (`Source RPM` → `source_rpm`, `Next Run Time` →
/// `next_run_time`).
pub fn normalize_field_name(label: &str) -> String {
    static SEPARATOR_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"[\s\-_]+").expect("static regex must compile"));

    SEPARATOR_RE
        .replace_all(label.trim(), "_")
        .to_lowercase()
}

/// Returns `true` for table decoration rows made only of `=`, `-` and
/// whitespace.
pub fn is_separator_line(line: &str) -> bool {
    static SEPARATOR_ROW_RE: LazyLock<Regex> =
        LazyLock::new(|| Regex::new(r"^\s*[=-]{3,}[=\-\s]*$").expect("static regex must compile"));

    SEPARATOR_ROW_RE.is_match(line)
}
