//! Category model and the local category tree
//!
//! Categories may nest one level (a parent with sub-categories). The API
//! returns children under `subcategories`; locally they always live in
//! `sub_categories`, sorted by name at every level.

use serde::{Deserialize, Serialize};
use std::fmt;

use super::ids::CategoryId;

/// Suggested category names offered when setting up a new account
pub const RECOMMENDED_CATEGORIES: &[&str] = &[
    "Rent",
    "Loans & EMI",
    "Bills",
    "Insurance",
    "Savings",
    "Investments",
    "Food & Dining",
    "Groceries",
    "Utilities",
    "Transportation",
    "Housing",
    "Healthcare",
    "Personal Care",
    "Fitness",
    "Education",
    "Shopping",
    "Entertainment",
    "Travel",
    "Pets",
    "Work",
    "Gifts",
    "Donations",
];

/// An expense category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,

    pub name: String,

    /// Fixed categories (rent, loan payments) are left out of variable
    /// spending reports
    #[serde(default)]
    pub fixed: bool,

    #[serde(default)]
    pub parent_id: Option<CategoryId>,

    #[serde(default, alias = "subcategories")]
    pub sub_categories: Vec<Category>,
}

impl Category {
    /// Validate a category name before sending it to the API
    pub fn validate_name(name: &str) -> Result<(), CategoryValidationError> {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(CategoryValidationError::EmptyName);
        }
        if trimmed.chars().count() > 50 {
            return Err(CategoryValidationError::NameTooLong(trimmed.chars().count()));
        }
        Ok(())
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Validation errors for categories
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    EmptyName,
    NameTooLong(usize),
}

impl fmt::Display for CategoryValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::EmptyName => write!(f, "Category name cannot be empty"),
            Self::NameTooLong(len) => {
                write!(f, "Category name too long ({} chars, max 50)", len)
            }
        }
    }
}

impl std::error::Error for CategoryValidationError {}

/// The user's categories as a sorted tree
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryTree {
    roots: Vec<Category>,
}

impl CategoryTree {
    /// Build a tree from API output, sorting every level by name
    pub fn new(categories: Vec<Category>) -> Self {
        Self {
            roots: sort_by_name(categories),
        }
    }

    /// Top-level categories
    pub fn roots(&self) -> &[Category] {
        &self.roots
    }

    pub fn is_empty(&self) -> bool {
        self.roots.is_empty()
    }

    /// Every category, parents before their children
    pub fn flatten(&self) -> Vec<&Category> {
        fn walk<'a>(cats: &'a [Category], out: &mut Vec<&'a Category>) {
            for cat in cats {
                out.push(cat);
                walk(&cat.sub_categories, out);
            }
        }
        let mut out = Vec::new();
        walk(&self.roots, &mut out);
        out
    }

    /// Total number of categories at every level
    pub fn len(&self) -> usize {
        self.flatten().len()
    }

    /// Find a category by ID at any depth
    pub fn get(&self, id: CategoryId) -> Option<&Category> {
        self.flatten().into_iter().find(|c| c.id == id)
    }

    /// Find a category by numeric ID or case-insensitive name
    pub fn find(&self, identifier: &str) -> Option<&Category> {
        if let Ok(id) = identifier.parse::<CategoryId>() {
            if let Some(cat) = self.get(id) {
                return Some(cat);
            }
        }
        let needle = identifier.trim().to_lowercase();
        self.flatten()
            .into_iter()
            .find(|c| c.name.to_lowercase() == needle)
    }

    /// Copy of the tree without `id` (and without its children)
    pub fn without(&self, id: CategoryId) -> Self {
        fn remove(cats: &[Category], id: CategoryId) -> Vec<Category> {
            cats.iter()
                .filter(|c| c.id != id)
                .map(|c| Category {
                    sub_categories: remove(&c.sub_categories, id),
                    ..c.clone()
                })
                .collect()
        }
        Self {
            roots: remove(&self.roots, id),
        }
    }

    /// Copy of the tree with the `fixed` flag of `id` set to `fixed`
    pub fn with_fixed(&self, id: CategoryId, fixed: bool) -> Self {
        fn update(cats: &[Category], id: CategoryId, fixed: bool) -> Vec<Category> {
            cats.iter()
                .map(|c| Category {
                    fixed: if c.id == id { fixed } else { c.fixed },
                    sub_categories: update(&c.sub_categories, id, fixed),
                    ..c.clone()
                })
                .collect()
        }
        Self {
            roots: update(&self.roots, id, fixed),
        }
    }

    /// Names of all fixed categories
    pub fn fixed_names(&self) -> Vec<&str> {
        self.flatten()
            .into_iter()
            .filter(|c| c.fixed)
            .map(|c| c.name.as_str())
            .collect()
    }
}

fn sort_by_name(mut cats: Vec<Category>) -> Vec<Category> {
    cats.sort_by_key(|c| c.name.to_lowercase());
    cats.into_iter()
        .map(|mut c| {
            c.sub_categories = sort_by_name(std::mem::take(&mut c.sub_categories));
            c
        })
        .collect()
}
