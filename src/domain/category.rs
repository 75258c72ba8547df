//! Two-level category taxonomy: main categories (大分類) each owning an
//! ordered list of subcategory names (中分類).
//!
//! Entries are addressed by position. Indices stay meaningful only between
//! two mutations of the same snapshot, so callers re-read them after every
//! replacement.

use serde::{Deserialize, Serialize};

use crate::domain::common::{normalized_name, Displayable, NamedEntity};

/// A main category and its subcategories.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Category {
    pub main_category: String,
    #[serde(default)]
    pub sub_categories: Vec<String>,
}

impl Category {
    pub fn new(main_category: impl Into<String>) -> Self {
        Self {
            main_category: main_category.into(),
            sub_categories: Vec::new(),
        }
    }

    pub fn with_subcategories<I, S>(main_category: impl Into<String>, subs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            main_category: main_category.into(),
            sub_categories: subs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn has_subcategories(&self) -> bool {
        !self.sub_categories.is_empty()
    }

    pub fn contains_sub(&self, name: &str) -> bool {
        self.sub_categories.iter().any(|sub| sub == name)
    }
}

impl NamedEntity for Category {
    fn name(&self) -> &str {
        &self.main_category
    }
}

impl Displayable for Category {
    fn display_label(&self) -> String {
        if self.sub_categories.is_empty() {
            self.main_category.clone()
        } else {
            format!(
                "{} ({})",
                self.main_category,
                self.sub_categories.join(", ")
            )
        }
    }
}

/// Ordered in-memory store of categories.
///
/// Every mutation reports whether it changed anything; blank names and
/// out-of-range indices are silent no-ops.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct Taxonomy {
    categories: Vec<Category>,
}

impl Taxonomy {
    pub fn new() -> Self {
        Self {
            categories: Vec::new(),
        }
    }

    pub fn from_categories(categories: Vec<Category>) -> Self {
        Self { categories }
    }

    /// The four-category household seed every session starts from.
    pub fn seeded() -> Self {
        Self::from_categories(vec![
            Category::with_subcategories("食費", ["食料品", "外食", "カフェ"]),
            Category::with_subcategories("住居費", ["家賃", "光熱費", "通信費"]),
            Category::with_subcategories("交通費", ["電車", "バス", "タクシー"]),
            Category::with_subcategories("娯楽費", ["映画", "旅行", "スポーツ"]),
        ])
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Category> {
        self.categories.iter()
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn sub(&self, main_index: usize, sub_index: usize) -> Option<&str> {
        self.categories
            .get(main_index)
            .and_then(|category| category.sub_categories.get(sub_index))
            .map(String::as_str)
    }

    /// First category carrying `name`; duplicates resolve to the earliest entry.
    pub fn find(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.name() == name)
    }

    pub fn main_names(&self) -> Vec<&str> {
        self.categories.iter().map(|category| category.name()).collect()
    }

    pub fn subcategories_of(&self, main: &str) -> &[String] {
        self.find(main)
            .map(|category| category.sub_categories.as_slice())
            .unwrap_or(&[])
    }

    /// Appends a new main category. Duplicate names are accepted.
    pub fn add_main(&mut self, name: &str) -> bool {
        let Some(name) = normalized_name(name) else {
            return false;
        };
        self.categories.push(Category::new(name));
        true
    }

    /// Appends a subcategory. Rejected when the parent already has one with
    /// the same name.
    pub fn add_sub(&mut self, main_index: usize, name: &str) -> bool {
        let Some(name) = normalized_name(name) else {
            return false;
        };
        match self.categories.get_mut(main_index) {
            Some(category) if !category.contains_sub(&name) => {
                category.sub_categories.push(name);
                true
            }
            _ => false,
        }
    }

    /// Renames a main category in place. Taking a name another entry already
    /// carries is rejected; duplicates only arise through `add_main`.
    pub fn rename_main(&mut self, index: usize, new_name: &str) -> bool {
        let Some(name) = normalized_name(new_name) else {
            return false;
        };
        let taken = self
            .categories
            .iter()
            .enumerate()
            .any(|(i, category)| i != index && category.name() == name);
        if taken {
            return false;
        }
        match self.categories.get_mut(index) {
            Some(category) => {
                category.main_category = name;
                true
            }
            None => false,
        }
    }

    /// Renames a subcategory in place, keeping sibling names unique.
    pub fn rename_sub(&mut self, main_index: usize, sub_index: usize, new_name: &str) -> bool {
        let Some(name) = normalized_name(new_name) else {
            return false;
        };
        let Some(category) = self.categories.get_mut(main_index) else {
            return false;
        };
        let taken = category
            .sub_categories
            .iter()
            .enumerate()
            .any(|(j, sub)| j != sub_index && *sub == name);
        match category.sub_categories.get_mut(sub_index) {
            Some(slot) if !taken => {
                *slot = name;
                true
            }
            _ => false,
        }
    }

    /// Removes a main category without asking; see `CategoryService` for the
    /// confirmation-gated path.
    pub fn remove_main(&mut self, index: usize) -> Option<Category> {
        if index < self.categories.len() {
            Some(self.categories.remove(index))
        } else {
            None
        }
    }

    pub fn remove_sub(&mut self, main_index: usize, sub_index: usize) -> Option<String> {
        let category = self.categories.get_mut(main_index)?;
        if sub_index < category.sub_categories.len() {
            Some(category.sub_categories.remove(sub_index))
        } else {
            None
        }
    }
}

impl Default for Taxonomy {
    fn default() -> Self {
        Self::seeded()
    }
}
