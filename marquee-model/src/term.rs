use serde::{Deserialize, Serialize};

/// Normalized search term used to key trending counters.
///
/// Raw queries arrive as typed, so `Batman `, `batman` and `BAT MAN`
/// collapse onto stable keys before any counter is touched: trimmed,
/// lowercased, internal whitespace reduced to single spaces.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Builds the normalized form of a raw query.
    pub fn normalize(raw: &str) -> Self {
        let collapsed = raw
            .split_whitespace()
            .map(|word| word.to_lowercase())
            .collect::<Vec<_>>()
            .join(" ");
        SearchTerm(collapsed)
    }

    /// True when the raw query carried no usable characters.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SearchTerm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_and_trims() {
        assert_eq!(SearchTerm::normalize("  Batman ").as_str(), "batman");
    }

    #[test]
    fn collapses_internal_whitespace() {
        assert_eq!(
            SearchTerm::normalize("The  Dark\t Knight").as_str(),
            "the dark knight"
        );
    }

    #[test]
    fn whitespace_only_normalizes_to_empty() {
        assert!(SearchTerm::normalize("   \t ").is_empty());
        assert!(SearchTerm::normalize("").is_empty());
    }

    #[test]
    fn equivalent_spellings_share_a_key() {
        assert_eq!(
            SearchTerm::normalize("BAT man"),
            SearchTerm::normalize(" bat   MAN ")
        );
    }
}
