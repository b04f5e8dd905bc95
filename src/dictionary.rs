//! Dictionary and protected-terms file parsing.
//!
//! Both formats are plain UTF-8 text, line-oriented, with `#` comments and
//! blank lines skipped. The frequency dictionary carries one `term
//! frequency` pair per line; the protected-terms file carries one term per
//! line.

use std::fs;
use std::path::Path;

use crate::error::{Error, Result};

/// Classification of one frequency-dictionary line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineClass {
    /// A well-formed `term frequency` pair.
    Entry { term: String, frequency: u64 },
    /// A blank line or a `#` comment.
    Blank,
    /// Missing field, empty term, or more than two fields.
    Malformed,
    /// Two fields, but the second does not parse as a non-negative integer.
    InvalidFrequency,
}

/// Classify one dictionary line.
///
/// The delimiter is the line's first tab when one is present (so canonical
/// terms may contain spaces, as in `New York\t5000`); otherwise it is the
/// line's first whitespace run. Fields are trimmed; a trailing `\r` from CRLF files is
/// trimmed with them.
pub fn classify_line(raw: &str) -> LineClass {
    let line = raw.trim();
    if line.is_empty() || line.starts_with('#') {
        return LineClass::Blank;
    }

    let (term, frequency) = match line.split_once('\t') {
        Some((term, rest)) => (term.trim(), rest.trim()),
        None => match line.split_once(char::is_whitespace) {
            Some((term, rest)) => (term, rest.trim()),
            None => return LineClass::Malformed,
        },
    };

    if term.is_empty() || frequency.is_empty() {
        return LineClass::Malformed;
    }
    // A third field is a shape problem, not a frequency problem.
    if frequency.contains(char::is_whitespace) {
        return LineClass::Malformed;
    }

    match frequency.parse::<u64>() {
        Ok(frequency) => LineClass::Entry {
            term: term.to_string(),
            frequency,
        },
        Err(_) => LineClass::InvalidFrequency,
    }
}

/// Parse a protected-terms file: one term per line, trimmed, with blank
/// lines and `#` comments skipped.
pub fn parse_protected(contents: &str) -> Vec<String> {
    contents
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .map(String::from)
        .collect()
}

/// Read a dictionary-format file, mapping IO failures to [`Error::FileNotFound`]
/// with the offending path attached.
pub(crate) fn read_file(path: &Path) -> Result<String> {
    fs::read_to_string(path).map_err(|source| Error::FileNotFound {
        path: path.to_path_buf(),
        source,
    })
}
