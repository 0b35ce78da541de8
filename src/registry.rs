//! Parsing for Unicode `emoji-test.txt`-style registry files
//!
//! A registry file is line-oriented: comment lines start with `#`, data lines
//! carry a code-point sequence, a qualification status, the rendered scalar,
//! a version marker, and a display name. This module turns the interesting
//! subset (fully-qualified records) into structured data and accounts for
//! everything it passes over.

use regex::Regex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Record grammar for one registry data line.
///
/// Capture groups: (1) whitespace-separated hex groups, (2) status token,
/// (3) scalar column, (4) display name after the `E<version>` marker.
/// The hex class is deliberately loose (`[0-9A-Za-z]`) so that malformed
/// groups reach the fatal decode path instead of being dropped as noise.
const RECORD_PATTERN: &str =
    r"^((?:[0-9A-Za-z]{4,5}\s+){1,8});\s+(\w+(?:-\w+)?)\s+#\s+(\S+)\s+E\d+\.\d+\s+(.+)$";

/// Lines containing this marker are skin-tone variants and are not parsed.
const SKIN_TONE_MARKER: &str = "skin tone";

/// Characters replaced by `_` in display names so they are safe as file
/// stems: whitespace, straight and curly quotes, parens, and separators.
const RESERVED_NAME_CHARS: [char; 11] =
    [' ', '"', '“', '”', '\'', '’', '(', ')', ':', ',', '-'];

/// Error type for registry parsing failures.
///
/// Both variants are fatal: a registry with a malformed code point is
/// corrupt, and the whole run aborts rather than producing partial results.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ParseError {
    /// A hex group matched the grammar but is not base-16
    #[error("line {line}: '{token}' is not a hexadecimal code point")]
    InvalidHex { line: usize, token: String },
    /// A hex group decoded to a value outside the Unicode scalar range
    #[error("line {line}: U+{value:04X} is not a valid Unicode scalar")]
    InvalidCodePoint { line: usize, value: u32 },
}

/// Qualification status of a registry record.
///
/// Real registry files carry all four variants; only fully-qualified records
/// are rendered, the rest are collected as skipped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum QualifiedStatus {
    FullyQualified,
    MinimallyQualified,
    Unqualified,
    Component,
}

impl QualifiedStatus {
    /// Parse a status column token. Unknown tokens are a grammar mismatch.
    pub fn from_token(token: &str) -> Option<Self> {
        match token {
            "fully-qualified" => Some(QualifiedStatus::FullyQualified),
            "minimally-qualified" => Some(QualifiedStatus::MinimallyQualified),
            "unqualified" => Some(QualifiedStatus::Unqualified),
            "component" => Some(QualifiedStatus::Component),
            _ => None,
        }
    }

    /// The registry file's spelling of this status.
    pub fn as_str(&self) -> &'static str {
        match self {
            QualifiedStatus::FullyQualified => "fully-qualified",
            QualifiedStatus::MinimallyQualified => "minimally-qualified",
            QualifiedStatus::Unqualified => "unqualified",
            QualifiedStatus::Component => "component",
        }
    }
}

impl std::fmt::Display for QualifiedStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One fully-qualified registry record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmojiRecord {
    /// One `char` per hex group, in input order. This is the string that
    /// gets rasterized, not the scalar column.
    pub sequence: String,
    /// The registry file's display column, captured verbatim.
    pub scalar: String,
    /// Always `FullyQualified` for records in `ParseOutcome::records`.
    pub status: QualifiedStatus,
    /// Display name with every reserved character replaced by `_`.
    pub name: String,
}

/// A grammar-matching record whose status was not fully-qualified.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SkippedRecord {
    /// 1-based line number in the registry file
    pub line: usize,
    pub status: QualifiedStatus,
    pub scalar: String,
    /// Sanitized display name, same form as `EmojiRecord::name`
    pub name: String,
}

/// Result of parsing a registry file.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ParseOutcome {
    /// Fully-qualified records, in input order
    pub records: Vec<EmojiRecord>,
    /// Records passed over because of their status, in input order
    pub skipped: Vec<SkippedRecord>,
    /// Data lines that passed the coarse filters but not the record grammar
    pub unmatched: usize,
}

/// Registry parser with a pre-compiled record grammar.
pub struct RegistryParser {
    record: Regex,
}

impl RegistryParser {
    pub fn new() -> Self {
        Self { record: Regex::new(RECORD_PATTERN).expect("record grammar must compile") }
    }

    /// Parse the full text of a registry file.
    ///
    /// Comment lines (`#` prefix), blank lines, and skin-tone variant lines
    /// are discarded before the grammar is applied. Lines that match the
    /// grammar but carry a malformed code point abort the whole parse.
    pub fn parse(&self, text: &str) -> Result<ParseOutcome, ParseError> {
        let mut outcome = ParseOutcome::default();

        for (index, line) in text.lines().enumerate() {
            let line_number = index + 1;

            if line.trim().is_empty() || line.starts_with('#') {
                continue;
            }
            if line.contains(SKIN_TONE_MARKER) {
                continue;
            }

            let caps = match self.record.captures(line) {
                Some(caps) => caps,
                None => {
                    outcome.unmatched += 1;
                    continue;
                }
            };

            let status = match QualifiedStatus::from_token(&caps[2]) {
                Some(status) => status,
                None => {
                    outcome.unmatched += 1;
                    continue;
                }
            };

            let sequence = decode_sequence(&caps[1], line_number)?;
            let scalar = caps[3].to_string();
            let name = sanitize_name(&caps[4]);

            if status == QualifiedStatus::FullyQualified {
                outcome.records.push(EmojiRecord { sequence, scalar, status, name });
            } else {
                outcome.skipped.push(SkippedRecord { line: line_number, status, scalar, name });
            }
        }

        Ok(outcome)
    }
}

impl Default for RegistryParser {
    fn default() -> Self {
        Self::new()
    }
}

/// Parse registry text with a freshly compiled grammar.
///
/// Convenience wrapper around [`RegistryParser`] for one-shot callers.
pub fn parse_registry(text: &str) -> Result<ParseOutcome, ParseError> {
    RegistryParser::new().parse(text)
}

/// Replace every reserved character in a display name with `_`.
pub fn sanitize_name(raw: &str) -> String {
    raw.chars().map(|c| if RESERVED_NAME_CHARS.contains(&c) { '_' } else { c }).collect()
}

/// Decode whitespace-separated hex groups into a character sequence.
fn decode_sequence(groups: &str, line_number: usize) -> Result<String, ParseError> {
    let mut sequence = String::new();
    for token in groups.split_whitespace() {
        let value = u32::from_str_radix(token, 16)
            .map_err(|_| ParseError::InvalidHex { line: line_number, token: token.to_string() })?;
        let scalar = char::from_u32(value)
            .ok_or(ParseError::InvalidCodePoint { line: line_number, value })?;
        sequence.push(scalar);
    }
    Ok(sequence)
}
