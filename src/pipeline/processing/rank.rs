use crate::types::RankedEntry;

/// Split a leading `<digits>.` ordinal off a ranked list entry.
///
/// Succeeds only for the exact form `<digits>.<rest>`, returning the rank
/// and the trimmed remainder. Anything else, including rank 0 and blank
/// input, yields no rank and the trimmed text.
pub fn extract_rank(text: &str) -> (Option<u32>, String) {
    if !text.trim().is_empty() {
        if let Some((head, rest)) = text.split_once('.') {
            if !head.is_empty() && head.bytes().all(|b| b.is_ascii_digit()) {
                if let Ok(rank) = head.parse::<u32>() {
                    if rank >= 1 {
                        return (Some(rank), rest.trim().to_string());
                    }
                }
            }
        }
    }
    (None, text.trim().to_string())
}

impl RankedEntry {
    /// Parse `N. text`; `None` when the entry carries no valid rank.
    pub fn parse(text: &str) -> Option<RankedEntry> {
        match extract_rank(text) {
            (Some(rank), text) => Some(RankedEntry { rank, text }),
            (None, _) => None,
        }
    }
}
