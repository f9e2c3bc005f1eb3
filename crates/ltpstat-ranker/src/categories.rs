//! Category allow-list for the filtered list report.

pub use ltpstat_common::report_config::DEFAULT_CATEGORIES;

/// Set of categories a record must match exactly (case-sensitive) to be
/// kept by the list report.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryAllowList {
    categories: Vec<String>,
}

impl Default for CategoryAllowList {
    fn default() -> Self {
        DEFAULT_CATEGORIES.iter().copied().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CategoryAllowList {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut categories: Vec<String> = Vec::new();
        for c in iter {
            let c = c.into();
            if !categories.contains(&c) {
                categories.push(c);
            }
        }
        Self { categories }
    }
}

impl CategoryAllowList {
    pub fn contains(&self, category: &str) -> bool {
        self.categories.iter().any(|c| c == category)
    }

    pub fn categories(&self) -> &[String] {
        &self.categories
    }
}
