//! Knowledge table types for the local rule-based matcher.

use serde::{Deserialize, Serialize};

/// Confidence reported when no knowledge entry matches.
pub const DEFAULT_CONFIDENCE: u8 = 70;

/// A canned answer keyed by lowercase substring patterns.
///
/// Entries are read-only once loaded. Their position in the table is
/// significant: the first entry with a matching pattern wins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KnowledgeEntry {
    pub topic: String,
    /// Lowercase substrings; any one of them matching selects this entry.
    pub patterns: Vec<String>,
    pub response: String,
    /// 0-100.
    pub confidence: u8,
}

impl KnowledgeEntry {
    pub fn new(topic: &str, patterns: &[&str], response: &str, confidence: u8) -> Self {
        Self {
            topic: topic.to_string(),
            patterns: patterns.iter().map(|p| p.to_lowercase()).collect(),
            response: response.to_string(),
            confidence: confidence.min(100),
        }
    }
}

/// Where an answer came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseSource {
    Local,
    Remote,
}

/// Result of running the knowledge matcher over an input.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchResult {
    pub text: String,
    pub confidence: u8,
    pub source: ResponseSource,
    /// Topic of the matched entry, `None` for the default answer.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub topic: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_entry_lowercases_patterns() {
        let entry = KnowledgeEntry::new("dns", &["DNS Lookup", "resolve"], "text", 90);
        assert_eq!(entry.patterns, vec!["dns lookup", "resolve"]);
    }

    #[test]
    fn test_entry_clamps_confidence() {
        let entry = KnowledgeEntry::new("x", &["x"], "x", 250);
        assert_eq!(entry.confidence, 100);
    }

    #[test]
    fn test_source_serializes_lowercase() {
        let json = serde_json::to_string(&ResponseSource::Local).unwrap();
        assert_eq!(json, "\"local\"");
    }
}
