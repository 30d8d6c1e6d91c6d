//! Line classification — decides how a single trimmed input line is drawn.

use serde::{Deserialize, Serialize};

/// Bold-marker prefix that forces a heading. Every occurrence is stripped for display.
pub const BOLD_MARKER: &str = "**";

/// Headings detected by case must be shorter than this many characters.
const MAX_CAPS_HEADING_CHARS: usize = 50;

/// Leading characters that mark a bullet line.
const BULLET_MARKERS: [char; 3] = ['\u{2022}', '-', '*'];

/// The style role of one line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StyleRole {
    Heading,
    Bullet,
    Paragraph,
    /// Empty after trimming: advances the cursor by a small gap, draws nothing.
    Blank,
}

/// A classified line, ready for the layout dispatcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedLine {
    pub role: StyleRole,
    /// Text to draw, with role markers removed.
    pub display: String,
}

/// Classifies an already-trimmed line.
///
/// Heading is checked before Bullet, so `"- NOTES"` or `"* Summary:"` are headings.
pub fn classify(trimmed: &str) -> StyleRole {
    if trimmed.is_empty() {
        StyleRole::Blank
    } else if is_heading(trimmed) {
        StyleRole::Heading
    } else if trimmed.starts_with(BULLET_MARKERS) {
        StyleRole::Bullet
    } else {
        StyleRole::Paragraph
    }
}

/// Classifies `trimmed` and derives its display text.
pub fn classify_line(trimmed: &str) -> ClassifiedLine {
    let role = classify(trimmed);
    let display = match role {
        StyleRole::Heading => trimmed.replace(BOLD_MARKER, ""),
        StyleRole::Bullet => strip_first_char(trimmed).trim().to_string(),
        StyleRole::Paragraph => trimmed.to_string(),
        StyleRole::Blank => String::new(),
    };
    ClassifiedLine { role, display }
}

fn is_heading(line: &str) -> bool {
    (is_all_caps(line) && line.chars().count() < MAX_CAPS_HEADING_CHARS)
        || line.ends_with(':')
        || line.starts_with(BOLD_MARKER)
}

/// True when the line has at least one cased letter and none of them is lowercase.
/// Digits and punctuation are ignored, so `"Q3 2024 PLAN"` counts as all caps.
fn is_all_caps(line: &str) -> bool {
    let mut has_cased = false;
    for c in line.chars() {
        if c.is_lowercase() {
            return false;
        }
        if c.is_uppercase() {
            has_cased = true;
        }
    }
    has_cased
}

fn strip_first_char(s: &str) -> &str {
    let mut chars = s.chars();
    chars.next();
    chars.as_str()
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
