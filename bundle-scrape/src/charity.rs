//! Decoy (charity tier) detection.
//!
//! Storefronts list the charity beneficiaries under the same keys as the
//! products, so extraction has to filter them by name.

/// Case-insensitive substring matcher over a fixed list of charity names.
#[derive(Debug, Clone, Default)]
pub struct CharityFilter {
    needles: Vec<String>,
}

impl CharityFilter {
    /// Build a filter; blank names are dropped since they would match everything.
    pub fn new<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let needles = names
            .into_iter()
            .map(|n| n.as_ref().to_lowercase())
            .filter(|n| !n.trim().is_empty())
            .collect();
        Self { needles }
    }

    /// True when any configured name occurs inside `candidate`.
    pub fn matches(&self, candidate: &str) -> bool {
        if self.needles.is_empty() {
            return false;
        }
        let haystack = candidate.to_lowercase();
        self.needles.iter().any(|n| haystack.contains(n.as_str()))
    }

    pub fn is_empty(&self) -> bool {
        self.needles.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn matches_substrings_ignoring_case() {
        let filter = CharityFilter::new(["Code for America", "GameHeads"]);
        assert!(filter.matches("Code for America"));
        assert!(filter.matches("Support CODE FOR AMERICA today"));
        assert!(filter.matches("GameHeads Collection"));
        assert!(filter.matches("gameheads"));
        assert!(!filter.matches("Real Studio"));
    }

    #[test]
    fn blank_names_are_ignored() {
        let filter = CharityFilter::new(["", "   "]);
        assert!(filter.is_empty());
        assert!(!filter.matches("anything at all"));
    }

    #[test]
    fn empty_filter_matches_nothing() {
        let filter = CharityFilter::default();
        assert!(!filter.matches(""));
        assert!(!filter.matches("Code for America"));
    }
}
