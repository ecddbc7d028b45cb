//! Word-list collaborator.
//!
//! The engine consumes word content as an opaque mapping from category name
//! to candidate words. `WordCatalog` keeps categories in insertion order so
//! pool resolution is deterministic under a seeded RNG.

use rustc_hash::FxHashSet;

use crate::core::settings::GameSettings;
use crate::error::EngineError;

/// Umbrella pseudo-category meaning "union of all categories".
pub const GENERAL_CATEGORY: &str = "general";

/// Ordered mapping from category name to candidate words.
#[derive(Clone, Debug, Default)]
pub struct WordCatalog {
    categories: Vec<(String, Vec<String>)>,
}

impl WordCatalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a category. Appends to an existing category of the same name
    /// (case-insensitive) instead of shadowing it.
    #[must_use]
    pub fn with_category(
        mut self,
        name: impl Into<String>,
        words: impl IntoIterator<Item = impl Into<String>>,
    ) -> Self {
        let name = name.into();
        let mut words: Vec<String> = words.into_iter().map(Into::into).collect();

        let key = name.to_lowercase();
        if let Some((_, existing)) = self
            .categories
            .iter_mut()
            .find(|(n, _)| n.to_lowercase() == key)
        {
            existing.append(&mut words);
        } else {
            self.categories.push((name, words));
        }
        self
    }

    /// Category names in insertion order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|(name, _)| name.as_str())
    }

    /// Look up a category's word list (case-insensitive).
    #[must_use]
    pub fn category(&self, name: &str) -> Option<&[String]> {
        let key = name.to_lowercase();
        self.categories
            .iter()
            .find(|(n, _)| n.to_lowercase() == key)
            .map(|(_, words)| words.as_slice())
    }

    /// Whether the catalog has no categories at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    /// Union of every category, de-duplicated case-insensitively on the
    /// trimmed word. First-seen casing is preserved; order follows category
    /// insertion order.
    #[must_use]
    pub fn general_pool(&self) -> Vec<String> {
        let mut seen: FxHashSet<String> = FxHashSet::default();
        let mut pool = Vec::new();

        for (_, words) in &self.categories {
            for word in words {
                let trimmed = word.trim();
                if trimmed.is_empty() {
                    continue;
                }
                if seen.insert(trimmed.to_lowercase()) {
                    pool.push(trimmed.to_string());
                }
            }
        }
        pool
    }

    /// Resolve the candidate pool for a game's settings.
    ///
    /// A non-blank custom word wins as a singleton pool. Otherwise the named
    /// category is used; the umbrella "general" category, or a category name
    /// the catalog does not know, resolves to the union of all lists.
    pub fn resolve_pool(&self, settings: &GameSettings) -> Result<Vec<String>, EngineError> {
        if let Some(word) = settings.effective_custom_word() {
            return Ok(vec![word.to_string()]);
        }

        let category = settings.category.trim();
        let pool = if category.to_lowercase() == GENERAL_CATEGORY {
            self.general_pool()
        } else if let Some(words) = self.category(category) {
            words
                .iter()
                .map(|w| w.trim())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect()
        } else {
            self.general_pool()
        };

        if pool.is_empty() {
            return Err(EngineError::InvalidConfiguration(format!(
                "no candidate words for category \"{}\"",
                settings.category
            )));
        }
        Ok(pool)
    }
}
