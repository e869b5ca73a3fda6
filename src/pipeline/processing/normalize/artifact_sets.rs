//! Artifact-set canonicalization.
//!
//! Free-text set recommendations (`"20% HP (2) + Noblesse Oblige (2)"`) are
//! coerced into canonical set names. Category shorthands expand into the
//! label itself followed by every named 5-star set in that category.

use once_cell::sync::Lazy;
use std::collections::HashSet;
use tracing::trace;

use super::rules::{RewriteRule, RewriteRules};
use crate::constants::{DELIMITER, SET_STOPLIST};

/// A shorthand label standing for a fixed group of equivalent sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SetCategory {
    pub label: &'static str,
    pub members: &'static [&'static str],
}

/// Category membership; only 5-star sets are listed.
pub const SET_CATEGORIES: [SetCategory; 9] = [
    SetCategory {
        label: "15% Anemo DMG set",
        members: &["Viridescent Venerer", "Desert Pavilion Chronicle"],
    },
    SetCategory {
        label: "15% Cryo DMG set",
        members: &["Blizzard Strayer", "Finale of the Deep Galleries"],
    },
    SetCategory {
        label: "15% Healing Bonus set",
        members: &["Maiden Beloved", "Ocean-Hued Clam", "Song of Days Past"],
    },
    SetCategory {
        label: "15% Hydro DMG set",
        members: &["Heart of Depth", "Nymph's Dream"],
    },
    SetCategory {
        label: "18% ATK set",
        members: &[
            "Gladiator's Finale",
            "Shimenawa's Reminiscence",
            "Vermillion Hereafter",
            "Echoes of an Offering",
            "Nighttime Whispers in the Echoing Woods",
            "Fragment of Harmonic Whimsy",
            "Unfinished Reverie",
        ],
    },
    SetCategory {
        label: "20% Energy Recharge set",
        members: &["Emblem of Severed Fate"],
    },
    SetCategory {
        label: "20% HP set",
        members: &["Tenacity of the Millelith", "Vourukasha's Glow"],
    },
    SetCategory {
        label: "25% Physical DMG set",
        members: &["Bloodstained Chivalry", "Pale Flame"],
    },
    SetCategory {
        label: "80 EM set",
        members: &["Wanderer's Troupe", "Gilded Dreams", "Flower of Paradise Lost"],
    },
];

// Separator tokens. Count parentheticals and choice-group text act as separators.
// " and " is not a separator here: it occurs inside set names.
const SEPARATOR_TOKENS: [&str; 8] = [
    "/",
    "+",
    "~=",
    "≈",
    "(2) [Choose One] and",
    "(2) and",
    "(2)",
    "(4)",
];

const NOISE: [&str; 9] = [
    "[Choose One]",
    "[Choose Two]",
    "[Choose two]",
    "[see notes]",
    "Mixes of",
    "Furina teams only, performs as well or better than Nighttime Whispers in the Echoing Woods",
    "Other damaging options (see DPS)",
    "*",
    "(Crit Rate secondary stat weapon only)",
];

// Misspellings and variant capitalizations. The "set set" rows undo the
// doubling produced by the row just above them.
const CANONICAL_NAMES: [(&str, &str); 17] = [
    ("15% Anemo DMG Set", "15% Anemo DMG set"),
    ("15% Healing Bonus", "15% Healing Bonus set"),
    ("15% Healing Bonus set set", "15% Healing Bonus set"),
    ("15% Hydro DMG Bonus set", "15% Hydro DMG set"),
    ("18 ATK% set", "18% ATK set"),
    ("18% ATK Set", "18% ATK set"),
    ("20% ER Set", "20% Energy Recharge set"),
    ("20% ER set", "20% Energy Recharge set"),
    ("20% HP", "20% HP set"),
    ("20% HP set set", "20% HP set"),
    ("80 EM", "80 EM set"),
    ("80 EM set set", "80 EM set"),
    ("Emblem Of Severed Fate", "Emblem of Severed Fate"),
    ("Marechausse Hunter", "Marechaussee Hunter"),
    ("Ocean Hued Clam", "Ocean-Hued Clam"),
    ("Desert Pavillion Chronicle", "Desert Pavilion Chronicle"),
    ("Silken Moon Serenade", "Silken Moon's Serenade"),
];

static ARTIFACT_SET_RULES: Lazy<RewriteRules> = Lazy::new(build_rules);

fn build_rules() -> RewriteRules {
    let delimiter = DELIMITER.to_string();
    let separators = SEPARATOR_TOKENS.iter().map(|t| RewriteRule::new(*t, delimiter.as_str()));
    let noise = NOISE.iter().map(|t| RewriteRule::strip(*t));
    let names = CANONICAL_NAMES.iter().map(|(from, to)| RewriteRule::new(*from, *to));
    let expansions = SET_CATEGORIES.iter().map(|category| {
        let mut expanded = category.label.to_string();
        for member in category.members {
            expanded.push(DELIMITER);
            expanded.push_str(member);
        }
        RewriteRule::new(category.label, expanded)
    });

    separators.chain(noise).chain(names).chain(expansions).collect()
}

/// The full ordered rule table used by [`canonicalize_artifact_sets`].
pub fn artifact_set_rules() -> &'static RewriteRules {
    &ARTIFACT_SET_RULES
}

/// True for canonical category labels such as `"20% HP set"`.
pub fn is_category_label(name: &str) -> bool {
    SET_CATEGORIES.iter().any(|c| c.label == name)
}

/// Rewrite one (rank-stripped) artifact-set entry into canonical set names.
///
/// Output is in first-seen order with duplicates, blanks and stoplist
/// tokens (`Any`, `set`) removed.
pub fn canonicalize_artifact_sets(text: &str) -> Vec<String> {
    let (rewritten, fired) = ARTIFACT_SET_RULES.apply_traced(text);
    trace!(input = text, output = %rewritten, ?fired, "Canonicalized artifact sets");

    let mut seen: HashSet<&str> = SET_STOPLIST.iter().copied().collect();
    let mut names = Vec::new();
    for piece in rewritten.trim().split(DELIMITER).filter(|p| !p.is_empty()) {
        let name = piece.trim();
        if seen.insert(name) {
            names.push(name.to_string());
        }
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_expands_to_member_sets() {
        assert_eq!(
            canonicalize_artifact_sets("20% HP set"),
            vec!["20% HP set", "Tenacity of the Millelith", "Vourukasha's Glow"]
        );
    }

    #[test]
    fn test_short_category_label_is_completed() {
        assert_eq!(
            canonicalize_artifact_sets("20% HP"),
            vec!["20% HP set", "Tenacity of the Millelith", "Vourukasha's Glow"]
        );
        assert_eq!(
            canonicalize_artifact_sets("15% Healing Bonus"),
            vec!["15% Healing Bonus set", "Maiden Beloved", "Ocean-Hued Clam", "Song of Days Past"]
        );
    }

    #[test]
    fn test_count_parentheticals_split_two_piece_combos() {
        assert_eq!(
            canonicalize_artifact_sets("Noblesse Oblige (2) + Emblem Of Severed Fate (2)"),
            vec!["Noblesse Oblige", "Emblem of Severed Fate"]
        );
    }

    #[test]
    fn test_choice_groups_and_noise_are_removed() {
        assert_eq!(
            canonicalize_artifact_sets("Mixes of [Choose Two] 18% ATK Set (2) and 20% ER Set*"),
            vec![
                "18% ATK set",
                "Gladiator's Finale",
                "Shimenawa's Reminiscence",
                "Vermillion Hereafter",
                "Echoes of an Offering",
                "Nighttime Whispers in the Echoing Woods",
                "Fragment of Harmonic Whimsy",
                "Unfinished Reverie",
                "20% Energy Recharge set",
                "Emblem of Severed Fate",
            ]
        );
    }

    #[test]
    fn test_and_is_not_a_separator() {
        assert_eq!(
            canonicalize_artifact_sets("Nighttime Whispers in the Echoing Woods"),
            vec!["Nighttime Whispers in the Echoing Woods"]
        );
        assert_eq!(
            canonicalize_artifact_sets("Song of Days Past"),
            vec!["Song of Days Past"]
        );
    }

    #[test]
    fn test_duplicates_and_stoplist_are_dropped() {
        assert_eq!(
            canonicalize_artifact_sets("Any set / Ocean Hued Clam / 15% Healing Bonus set"),
            vec!["Any set", "Ocean-Hued Clam", "15% Healing Bonus set", "Maiden Beloved", "Song of Days Past"]
        );
        assert_eq!(canonicalize_artifact_sets("Any / set / "), Vec::<String>::new());
    }

    #[test]
    fn test_continuation_joiner_splits() {
        assert_eq!(
            canonicalize_artifact_sets("Gilded Dreams / Marechausse Hunter"),
            vec!["Gilded Dreams", "Marechaussee Hunter"]
        );
    }

    #[test]
    fn test_empty_input() {
        assert!(canonicalize_artifact_sets("").is_empty());
        assert!(canonicalize_artifact_sets("   ").is_empty());
    }

    #[test]
    fn test_rule_table_order() {
        let rules = artifact_set_rules().rules();
        assert_eq!(rules[0], RewriteRule::new("/", "|"));
        let hp = rules.iter().position(|r| r.pattern == "20% HP").unwrap();
        let hp_dedup = rules.iter().position(|r| r.pattern == "20% HP set set").unwrap();
        let hp_expand = rules
            .iter()
            .position(|r| r.pattern == "20% HP set" && r.replacement.contains("Tenacity"))
            .unwrap();
        assert!(hp < hp_dedup && hp_dedup < hp_expand);
        assert_eq!(rules.len(), 8 + 9 + 17 + 9);
    }

    #[test]
    fn test_category_labels() {
        assert!(is_category_label("80 EM set"));
        assert!(!is_category_label("Gilded Dreams"));
    }
}
