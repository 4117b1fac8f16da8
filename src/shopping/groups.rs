use std::collections::HashMap;

use super::item::capitalize;

/// Article group used when a product has no mapping
pub const DEFAULT_ARTICLE_GROUP: u32 = 12;

/// Product names the list knows a store section for out of the box
const BUILTIN_GROUPS: &[(&str, u32)] = &[
    ("Välling", 9),
    ("Kaffe", 9),
    ("Coffee", 9),
    ("Maskindiskmedel", 11),
    ("Hushållspapper", 11),
    ("Toapapper", 11),
    ("Blöjor", 11),
];

/// Chooses the article group (store section) for a new product
pub trait ArticleGroupLookup: Send + Sync {
    fn group_for(&self, product_name: &str) -> u32;
}

/// Table-backed lookup
#[derive(Debug, Clone)]
pub struct ArticleGroups {
    groups: HashMap<String, u32>,
    fallback: u32,
}

impl ArticleGroups {
    pub fn builtin() -> Self {
        Self::from_map(
            BUILTIN_GROUPS
                .iter()
                .map(|(name, group)| (name.to_string(), *group))
                .collect(),
        )
    }

    pub fn from_map(groups: HashMap<String, u32>) -> Self {
        Self {
            groups,
            fallback: DEFAULT_ARTICLE_GROUP,
        }
    }

    pub fn with_fallback(mut self, fallback: u32) -> Self {
        self.fallback = fallback;
        self
    }
}

impl Default for ArticleGroups {
    fn default() -> Self {
        Self::builtin()
    }
}

impl ArticleGroupLookup for ArticleGroups {
    fn group_for(&self, product_name: &str) -> u32 {
        self.groups
            .get(product_name)
            .or_else(|| self.groups.get(&capitalize(product_name)))
            .copied()
            .unwrap_or(self.fallback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_groups() {
        let groups = ArticleGroups::builtin();
        assert_eq!(groups.group_for("Kaffe"), 9);
        assert_eq!(groups.group_for("Coffee"), 9);
        assert_eq!(groups.group_for("Toapapper"), 11);
        assert_eq!(groups.group_for("Bananer"), DEFAULT_ARTICLE_GROUP);
    }

    #[test]
    fn test_lowercase_input_matches_capitalized_entry() {
        let groups = ArticleGroups::builtin();
        assert_eq!(groups.group_for("kaffe"), 9);
        assert_eq!(groups.group_for("blöjor"), 11);
    }

    #[test]
    fn test_configured_table_replaces_builtin() {
        let groups = ArticleGroups::from_map(HashMap::from([("Mjölk".to_string(), 3)])).with_fallback(1);
        assert_eq!(groups.group_for("Mjölk"), 3);
        assert_eq!(groups.group_for("Kaffe"), 1);
    }
}
