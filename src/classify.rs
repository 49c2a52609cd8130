use crate::level::Level;
use lazy_static::lazy_static;
use regex::Regex;

/// Message recorded for ERROR lines with nothing after the marker.
pub const UNKNOWN_ERROR: &str = "Unknown error";

lazy_static! {
    // First "ERROR", then optional whitespace, one optional ':' or '-', optional whitespace
    static ref ERROR_MARKER: Regex = Regex::new(r"ERROR\s*[:\-]?\s*").unwrap();
}

/// Outcome of matching a single log line against the known levels.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    NoMatch,
    /// `message` is only ever set for [`Level::Error`].
    Matched { level: Level, message: Option<String> },
}

/// Classify one line (without its terminator).
///
/// Matching is a case-sensitive substring search in [`Level::ALL`] order, so
/// "ERRORS" counts as ERROR and a line holding both ERROR and INFO is ERROR only.
pub fn classify(line: &str) -> Classification {
    let line = line.trim();
    let level = match Level::ALL.iter().copied().find(|level| line.contains(level.token())) {
        Some(level) => level,
        None => return Classification::NoMatch,
    };
    let message = match level {
        Level::Error => Some(error_message(line)),
        _ => None,
    };
    Classification::Matched { level, message }
}

/// Everything after the first ERROR marker and its separator, trimmed.
fn error_message(line: &str) -> String {
    let message = ERROR_MARKER.find(line).map(|marker| line[marker.end()..].trim()).unwrap_or("");
    if message.is_empty() {
        UNKNOWN_ERROR.to_owned()
    } else {
        message.to_owned()
    }
}
