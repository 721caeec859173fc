//! Input format detection from the object key.

use std::fmt;

/// Formats the pipeline can decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputFormat {
    /// `.json`: one `{id, emissions}` record.
    Structured,
    /// `.csv`: header row plus one measurement per row.
    Tabular,
}

/// Result of inspecting a key's trailing extension.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DetectedFormat {
    Known(InputFormat),
    /// An extension is present but not decodable, e.g. `.xml`.
    Unrecognized(String),
    MissingExtension,
}

impl fmt::Display for InputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Structured => f.write_str("json"),
            Self::Tabular => f.write_str("csv"),
        }
    }
}

/// Trailing `.ext` of `key`, including the dot.
///
/// The extension is the text after the last `.` and must be one or more word
/// characters (letters, digits, `_`) running to the end of the key.
#[must_use]
pub fn extension(key: &str) -> Option<&str> {
    let dot = key.rfind('.')?;
    let ext = &key[dot + 1..];
    if !ext.is_empty() && ext.chars().all(|c| c.is_alphanumeric() || c == '_') {
        Some(&key[dot..])
    } else {
        None
    }
}

/// Classify `key` by its extension. Matching is case-sensitive.
#[must_use]
pub fn detect_format(key: &str) -> DetectedFormat {
    match extension(key) {
        Some(".json") => DetectedFormat::Known(InputFormat::Structured),
        Some(".csv") => DetectedFormat::Known(InputFormat::Tabular),
        Some(other) => DetectedFormat::Unrecognized(other.to_string()),
        None => DetectedFormat::MissingExtension,
    }
}
