//! Deny-list category filter

use crate::config::CategoriesConfig;

/// Binary keep/drop predicate over normalized categories
pub struct CategoryFilter {
    deny_terms: Vec<String>,
}

impl CategoryFilter {
    pub fn new(config: &CategoriesConfig) -> Self {
        Self {
            deny_terms: config.deny.iter().map(|t| t.to_lowercase()).collect(),
        }
    }

    /// True if any deny-list term occurs case-insensitively in the category
    pub fn is_denied(&self, category: &str) -> bool {
        let category = category.to_lowercase();
        self.deny_terms.iter().any(|term| category.contains(term))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    fn default_filter() -> CategoryFilter {
        CategoryFilter::new(&Config::default().categories)
    }

    #[test]
    fn test_denied_category_substring_match() {
        let filter = default_filter();
        assert!(filter.is_denied("XXX Movies"));
        assert!(filter.is_denied("adult entertainment"));
        assert!(filter.is_denied("Erotic"));
    }

    #[test]
    fn test_allowed_categories_pass() {
        let filter = default_filter();
        assert!(!filter.is_denied("Sports"));
        assert!(!filter.is_denied("News & Politics"));
        assert!(!filter.is_denied(""));
    }

    #[test]
    fn test_empty_deny_list_allows_everything() {
        let mut categories = Config::default().categories;
        categories.deny.clear();
        let filter = CategoryFilter::new(&categories);
        assert!(!filter.is_denied("XXX Movies"));
    }
}
