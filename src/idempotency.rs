use sha2::{Digest, Sha256};

use crate::config::SourceCategory;

/// SHA-256 of `bytes`, lowercase hex.
pub fn content_digest(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Identifies one fetch: the spreadsheet, the requested ranges in order,
/// and the digest of what came back. Two runs with equal keys produce
/// byte-identical outputs.
pub fn run_key(spreadsheet_id: &str, categories: &[SourceCategory], payload_sha256_hex: &str) -> String {
    let mut s = String::new();
    s.push_str(spreadsheet_id);
    for category in categories {
        s.push('|');
        s.push_str(&category.range);
    }
    s.push('|');
    s.push_str(payload_sha256_hex);
    content_digest(s.as_bytes())
}
