//! Stat-name canonicalization for main-stat and substat entries.

use once_cell::sync::Lazy;
use regex::Regex;

use super::rules::{RewriteRule, RewriteRules};
use crate::constants::DELIMITER;

// Parenthesized then bracketed annotations, each removed non-greedily.
static ANNOTATIONS: Lazy<[Regex; 2]> = Lazy::new(|| {
    [
        Regex::new(r"\(.*?\)").expect("parenthesized annotation pattern"),
        Regex::new(r"\[.*?\]").expect("bracketed annotation pattern"),
    ]
});

const NOISE: [&str; 3] = ["*", "until requirement is met", "until requirement"];

// "CRIT" alone stands for both crit stats; it must run after the
// "CRIT Rate" row so that one is not split.
const CANONICAL_NAMES: [(&str, &str); 15] = [
    ("Atk%", "ATK%"),
    ("Anemo Damage", "Anemo DMG"),
    ("Crit Rate%", "Crit Rate"),
    ("CRIT Rate", "Crit Rate"),
    ("CRIT", "Crit Rate|Crit DMG"),
    ("Cryo DMG%", "Cryo DMG"),
    ("Electro Damage", "Electro DMG"),
    ("Electro DMG%", "Electro DMG"),
    ("Energy Recharge%", "Energy Recharge"),
    ("ER%", "Energy Recharge"),
    ("Flat DEF", "DEF"),
    ("Geo DMG%", "Geo DMG"),
    ("Healing Bonus%", "Healing Bonus"),
    ("Physical DMG%", "Physical DMG"),
    ("Pyro DMG%", "Pyro DMG"),
];

const SEPARATOR_TOKENS: [&str; 6] = ["/", "+", " and ", "~=", "=", "≈"];

/// A bare "DMG" left over after splitting always means crit damage here.
const BARE_DMG: &str = "DMG";
const CRIT_DMG: &str = "Crit DMG";

static STAT_RULES: Lazy<RewriteRules> = Lazy::new(|| {
    let delimiter = DELIMITER.to_string();
    let noise = NOISE.iter().map(|t| RewriteRule::strip(*t));
    let names = CANONICAL_NAMES.iter().map(|(from, to)| RewriteRule::new(*from, *to));
    let separators = SEPARATOR_TOKENS.iter().map(|t| RewriteRule::new(*t, delimiter.as_str()));
    noise.chain(names).chain(separators).collect()
});

/// Rewrite one stat entry into individual canonical stat names.
pub fn canonicalize_stats(text: &str) -> Vec<String> {
    let stripped = ANNOTATIONS
        .iter()
        .fold(text.to_string(), |acc, re| re.replace_all(&acc, "").into_owned());
    let rewritten = STAT_RULES.apply(&stripped);

    rewritten
        .split(DELIMITER)
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| if s == BARE_DMG { CRIT_DMG.to_string() } else { s.to_string() })
        .collect()
}
