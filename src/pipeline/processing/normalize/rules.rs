/// One literal `pattern -> replacement` rewrite, applied to every occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RewriteRule {
    pub pattern: String,
    pub replacement: String,
}

impl RewriteRule {
    pub fn new(pattern: impl Into<String>, replacement: impl Into<String>) -> Self {
        Self { pattern: pattern.into(), replacement: replacement.into() }
    }

    /// Rewrite rule that deletes `pattern`.
    pub fn strip(pattern: impl Into<String>) -> Self {
        Self::new(pattern, "")
    }

    pub fn matches(&self, text: &str) -> bool {
        !self.pattern.is_empty() && text.contains(self.pattern.as_str())
    }

    pub fn apply(&self, text: &str) -> String {
        if self.matches(text) {
            text.replace(self.pattern.as_str(), &self.replacement)
        } else {
            text.to_string()
        }
    }
}

/// An ordered rewrite table.
///
/// Rules run once each, in table order, over the whole string; a later rule
/// sees (and may re-match) the output of every earlier rule.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RewriteRules {
    rules: Vec<RewriteRule>,
}

impl RewriteRules {
    pub fn new(rules: Vec<RewriteRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[RewriteRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn apply(&self, text: &str) -> String {
        self.rules.iter().fold(text.to_string(), |acc, rule| rule.apply(&acc))
    }

    /// Like [`apply`](Self::apply), also returning the indices of the rules that fired.
    pub fn apply_traced(&self, text: &str) -> (String, Vec<usize>) {
        let mut fired = Vec::new();
        let mut acc = text.to_string();
        for (i, rule) in self.rules.iter().enumerate() {
            if rule.matches(&acc) {
                acc = rule.apply(&acc);
                fired.push(i);
            }
        }
        (acc, fired)
    }
}

impl FromIterator<RewriteRule> for RewriteRules {
    fn from_iter<I: IntoIterator<Item = RewriteRule>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rule_replaces_every_occurrence() {
        let rule = RewriteRule::new("/", "|");
        assert_eq!(rule.apply("a / b / c"), "a | b | c");
        assert_eq!(RewriteRule::strip("*").apply("*Foo*"), "Foo");
    }

    #[test]
    fn test_later_rules_see_earlier_output() {
        let rules: RewriteRules = vec![
            RewriteRule::new("20% HP", "20% HP set"),
            RewriteRule::new("20% HP set set", "20% HP set"),
        ]
        .into_iter()
        .collect();
        assert_eq!(rules.apply("20% HP"), "20% HP set");
        assert_eq!(rules.apply("20% HP set"), "20% HP set");
    }

    #[test]
    fn test_order_is_significant() {
        let forward = RewriteRules::new(vec![RewriteRule::new("ab", "x"), RewriteRule::new("b", "y")]);
        let backward = RewriteRules::new(vec![RewriteRule::new("b", "y"), RewriteRule::new("ab", "x")]);
        assert_eq!(forward.apply("ab"), "x");
        assert_eq!(backward.apply("ab"), "ay");
    }

    #[test]
    fn test_traced_application_reports_fired_rules() {
        let rules = RewriteRules::new(vec![
            RewriteRule::new("+", "|"),
            RewriteRule::new("/", "|"),
            RewriteRule::strip("*"),
        ]);
        let (out, fired) = rules.apply_traced("A* + B");
        assert_eq!(out, "A | B");
        assert_eq!(fired, vec![0, 2]);
    }

    #[test]
    fn test_empty_pattern_never_fires() {
        let rule = RewriteRule::new("", "x");
        assert_eq!(rule.apply("abc"), "abc");
    }
}
