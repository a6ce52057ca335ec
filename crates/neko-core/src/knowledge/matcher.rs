//! Substring-pattern knowledge matcher.

use neko_types::knowledge::{DEFAULT_CONFIDENCE, KnowledgeEntry, MatchResult, ResponseSource};

use super::defaults::{DEFAULT_RESPONSE, builtin_entries};

/// Maps free-text input to a canned answer.
///
/// Entries are kept in a `Vec` so iteration order is the declaration
/// order; the first entry with any pattern contained in the lowercased
/// input wins. Matching is a pure function of the input and the table.
#[derive(Debug, Clone)]
pub struct KnowledgeMatcher {
    entries: Vec<KnowledgeEntry>,
    default_response: String,
}

impl KnowledgeMatcher {
    /// Create a matcher over `entries`, matched in the given order.
    pub fn new(entries: Vec<KnowledgeEntry>) -> Self {
        Self {
            entries,
            default_response: DEFAULT_RESPONSE.to_string(),
        }
    }

    /// Matcher over the built-in OSINT assistant table.
    pub fn builtin() -> Self {
        Self::new(builtin_entries())
    }

    /// Replace the answer used when nothing matches.
    pub fn with_default_response(mut self, response: impl Into<String>) -> Self {
        self.default_response = response.into();
        self
    }

    pub fn entries(&self) -> &[KnowledgeEntry] {
        &self.entries
    }

    /// Find the answer for `input`.
    pub fn match_input(&self, input: &str) -> MatchResult {
        let normalized = input.trim().to_lowercase();

        let hit = self.entries.iter().find(|entry| {
            entry
                .patterns
                .iter()
                .any(|p| !p.is_empty() && normalized.contains(p.as_str()))
        });

        match hit {
            Some(entry) => MatchResult {
                text: entry.response.clone(),
                confidence: entry.confidence,
                source: ResponseSource::Local,
                topic: Some(entry.topic.clone()),
            },
            None => MatchResult {
                text: self.default_response.clone(),
                confidence: DEFAULT_CONFIDENCE,
                source: ResponseSource::Local,
                topic: None,
            },
        }
    }
}

impl Default for KnowledgeMatcher {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_table() -> KnowledgeMatcher {
        KnowledgeMatcher::new(vec![
            KnowledgeEntry::new("first", &["shared", "alpha"], "first answer", 91),
            KnowledgeEntry::new("second", &["shared", "beta"], "second answer", 60),
        ])
    }

    #[test]
    fn test_capabilities_scenario() {
        let matcher = KnowledgeMatcher::builtin();
        let result = matcher.match_input("what can you do");
        assert_eq!(result.topic.as_deref(), Some("capabilities"));
        assert_eq!(result.confidence, 98);
        assert_eq!(result.source, ResponseSource::Local);
    }

    #[test]
    fn test_match_is_case_insensitive() {
        let matcher = small_table();
        let result = matcher.match_input("  Tell me about BETA  ");
        assert_eq!(result.text, "second answer");
        assert_eq!(result.confidence, 60);
    }

    #[test]
    fn test_declaration_order_breaks_ties() {
        let matcher = small_table();
        // "shared" is a pattern of both entries, and "beta" only of the second.
        let result = matcher.match_input("shared beta");
        assert_eq!(result.topic.as_deref(), Some("first"));
        assert_eq!(result.confidence, 91);
    }

    #[test]
    fn test_no_match_returns_default() {
        let matcher = small_table();
        let result = matcher.match_input("something unrelated");
        assert_eq!(result.confidence, DEFAULT_CONFIDENCE);
        assert_eq!(result.confidence, 70);
        assert!(result.topic.is_none());
        assert_eq!(result.text, DEFAULT_RESPONSE);
    }

    #[test]
    fn test_custom_default_response() {
        let matcher = small_table().with_default_response("narrow it down");
        assert_eq!(matcher.match_input("zzz").text, "narrow it down");
    }

    #[test]
    fn test_empty_table_always_defaults() {
        let matcher = KnowledgeMatcher::new(Vec::new());
        assert_eq!(matcher.match_input("what can you do").confidence, 70);
    }

    #[test]
    fn test_every_builtin_entry_matches_its_own_patterns() {
        let matcher = KnowledgeMatcher::builtin();
        for entry in matcher.entries() {
            for pattern in &entry.patterns {
                let result = matcher.match_input(pattern);
                // An earlier entry may claim the pattern; never the default.
                assert!(result.topic.is_some(), "pattern '{pattern}' fell through");
            }
        }
    }
}
