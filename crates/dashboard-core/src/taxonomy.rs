use crate::error::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Top-level product grouping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Category {
    Furniture,
    #[serde(rename = "Office Supplies")]
    OfficeSupplies,
    Technology,
}

impl Category {
    /// Every category, in display order.
    pub const ALL: [Category; 3] = [
        Category::Furniture,
        Category::OfficeSupplies,
        Category::Technology,
    ];

    /// The dataset spelling of this category.
    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Furniture => "Furniture",
            Category::OfficeSupplies => "Office Supplies",
            Category::Technology => "Technology",
        }
    }

    /// Subcategories nested under this category, in display order.
    pub fn subcategories(&self) -> &'static [&'static str] {
        CategoryTaxonomy::subcategories(*self)
    }

    /// The category after this one, wrapping around.
    pub fn next(&self) -> Category {
        let idx = self.index();
        Self::ALL[(idx + 1) % Self::ALL.len()]
    }

    /// The category before this one, wrapping around.
    pub fn previous(&self) -> Category {
        let idx = self.index();
        Self::ALL[(idx + Self::ALL.len() - 1) % Self::ALL.len()]
    }

    fn index(&self) -> usize {
        match self {
            Category::Furniture => 0,
            Category::OfficeSupplies => 1,
            Category::Technology => 2,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = DashboardError;

    /// Case-insensitive; spaces, hyphens and underscores are interchangeable,
    /// so `"office-supplies"` and `"Office_Supplies"` both resolve.
    fn from_str(value: &str) -> Result<Self> {
        let normalised: String = value
            .trim()
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .flat_map(char::to_lowercase)
            .collect();
        match normalised.as_str() {
            "furniture" => Ok(Category::Furniture),
            "officesupplies" => Ok(Category::OfficeSupplies),
            "technology" => Ok(Category::Technology),
            _ => Err(DashboardError::UnknownCategory(value.trim().to_string())),
        }
    }
}

// ── Taxonomy data ─────────────────────────────────────────────────────────────

const FURNITURE: &[&str] = &["Bookcases", "Chairs", "Tables", "Furnishings"];

const OFFICE_SUPPLIES: &[&str] = &[
    "Labels",
    "Storage",
    "Art",
    "Binders",
    "Appliances",
    "Paper",
    "Envelopes",
    "Fasteners",
    "Supplies",
];

const TECHNOLOGY: &[&str] = &["Phones", "Accessories", "Machines", "Copiers"];

/// Static category → subcategory mapping.
pub struct CategoryTaxonomy;

impl CategoryTaxonomy {
    /// Subcategories for `category`.
    pub fn subcategories(category: Category) -> &'static [&'static str] {
        match category {
            Category::Furniture => FURNITURE,
            Category::OfficeSupplies => OFFICE_SUPPLIES,
            Category::Technology => TECHNOLOGY,
        }
    }

    /// `true` when `sub_category` belongs to `category`. Exact, case-sensitive match.
    pub fn contains(category: Category, sub_category: &str) -> bool {
        Self::subcategories(category).contains(&sub_category)
    }

    /// The parent category of `sub_category`, or `None` when it is not in the taxonomy.
    pub fn category_of(sub_category: &str) -> Option<Category> {
        Category::ALL
            .into_iter()
            .find(|c| Self::contains(*c, sub_category))
    }
}
