//! Text normalization
//!
//! Folds row fields and queries into the canonical form they are compared in:
//! lower-case, accents stripped, only `[a-z0-9@.-]` plus single spaces kept.

use unicode_normalization::UnicodeNormalization;

/// Combining diacritical marks left behind by canonical decomposition
const COMBINING_MARKS: std::ops::RangeInclusive<char> = '\u{0300}'..='\u{036F}';

/// Normalize text for indexing and matching
///
/// - Lower-cases, then applies Unicode NFD and drops combining marks ("café" → "cafe")
/// - Keeps ASCII letters, digits, `@`, `.`, `-` (emails and invoice ids survive)
/// - Collapses whitespace runs into one space and trims both ends
///
/// The output is a fixed point: normalizing it again returns it unchanged.
pub fn normalize(text: &str) -> String {
    let lowered = text.to_lowercase();
    let mut out = String::with_capacity(lowered.len());
    let mut pending_space = false;

    for c in lowered.nfd() {
        if COMBINING_MARKS.contains(&c) {
            continue;
        }

        if is_separator(c) {
            // Leading whitespace never produces a separator
            pending_space = !out.is_empty();
            continue;
        }

        if is_kept(c) {
            if pending_space {
                out.push(' ');
                pending_space = false;
            }
            out.push(c);
        }
    }

    out
}

/// Whitespace in the ECMAScript `\s` sense: Unicode `White_Space` minus
/// U+0085 (NEL), plus U+FEFF (BOM)
fn is_separator(c: char) -> bool {
    (c.is_whitespace() && c != '\u{0085}') || c == '\u{FEFF}'
}

fn is_kept(c: char) -> bool {
    c.is_ascii_lowercase() || c.is_ascii_digit() || matches!(c, '@' | '.' | '-')
}
