//! Field normalization: whitespace cleanup, line splitting, continuation
//! merging, and the two text canonicalizers.

pub mod artifact_sets;
pub mod rules;
pub mod stats;

pub use artifact_sets::{canonicalize_artifact_sets, is_category_label, SET_CATEGORIES};
pub use rules::{RewriteRule, RewriteRules};
pub use stats::canonicalize_stats;

use once_cell::sync::Lazy;
use regex::Regex;

use crate::constants::{CONTINUATION_JOINER, CONTINUATION_MARKERS, PREFERRED_MARKER};
use crate::types::{CharacterBlock, RawBlock};

static SPACE_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r" +").expect("space run pattern"));
static LINE_BREAK_RUNS: Lazy<Regex> = Lazy::new(|| Regex::new(r"[\r\n]+").expect("line break pattern"));

/// Turn a verbatim block into its normalized form.
///
/// Artifact-set and substat entries are trimmed and continuation-merged.
/// Main-stat lines keep their `<slot> - <stat>` shape untouched.
pub fn normalize_block(block: &RawBlock) -> CharacterBlock {
    let (role, preferred) = normalize_role(block.role.as_deref());
    CharacterBlock {
        character: block.character.clone(),
        role,
        preferred,
        artifact_set_lines: merge_continuations(split_field(block.artifact_sets.as_deref())),
        main_stat_lines: split_field(block.main_stats.as_deref()),
        substat_lines: merge_continuations(split_field(block.substats.as_deref())),
    }
}

/// Role text without line breaks or the preferred marker, and whether the marker was present.
pub fn normalize_role(role: Option<&str>) -> (String, bool) {
    let Some(role) = role else {
        return (String::new(), false);
    };
    let preferred = role.contains(PREFERRED_MARKER);
    let cleaned = LINE_BREAK_RUNS.replace_all(role, " ").replace(PREFERRED_MARKER, "");
    (cleaned.trim().to_string(), preferred)
}

/// Collapse space runs and split a multi-line cell into entries.
/// An absent cell yields no entries.
pub fn split_field(cell: Option<&str>) -> Vec<String> {
    cell.map(|text| split_lines(&collapse_spaces(text))).unwrap_or_default()
}

/// Replace every run of space characters with a single space.
/// Other whitespace (tabs, line breaks) is left alone.
pub fn collapse_spaces(text: &str) -> String {
    SPACE_RUNS.replace_all(text, " ").into_owned()
}

fn is_line_boundary(ch: char) -> bool {
    matches!(
        ch,
        '\n' | '\r' | '\u{0b}' | '\u{0c}' | '\u{1c}' | '\u{1d}' | '\u{1e}' | '\u{85}' | '\u{2028}' | '\u{2029}'
    )
}

/// Split on line boundaries; `\r\n` counts as one and a trailing boundary
/// does not produce an empty final entry.
pub fn split_lines(text: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut chars = text.chars().peekable();
    while let Some(ch) = chars.next() {
        if is_line_boundary(ch) {
            if ch == '\r' && chars.peek() == Some(&'\n') {
                chars.next();
            }
            lines.push(std::mem::take(&mut current));
        } else {
            current.push(ch);
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Append continuation lines (`~=` or `≈` prefixed) to the preceding entry.
///
/// Entries are trimmed. A continuation with no predecessor is kept verbatim
/// as its own entry.
pub fn merge_continuations(lines: Vec<String>) -> Vec<String> {
    let mut merged: Vec<String> = Vec::with_capacity(lines.len());
    for line in lines {
        let line = line.trim();
        if let (Some(tail), Some(previous)) = (continuation_tail(line), merged.last_mut()) {
            previous.push_str(CONTINUATION_JOINER);
            previous.push_str(tail.trim());
            continue;
        }
        merged.push(line.to_string());
    }
    merged
}

fn continuation_tail(line: &str) -> Option<&str> {
    CONTINUATION_MARKERS.iter().find_map(|marker| line.strip_prefix(marker))
}
