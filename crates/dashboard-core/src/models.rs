use chrono::{Datelike, NaiveDate};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::taxonomy::{Category, CategoryTaxonomy};

/// A single order line read from the sales dataset.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SalesRecord {
    /// Calendar date the order was placed.
    pub order_date: NaiveDate,
    /// Top-level product category.
    pub category: Category,
    /// Subcategory name as spelled in the dataset.
    pub sub_category: String,
    /// Sales amount (non-negative).
    pub sales: Decimal,
    /// Profit amount; negative for loss-making lines.
    pub profit: Decimal,
}

impl SalesRecord {
    /// Calendar month the order falls in.
    pub fn month(&self) -> YearMonth {
        YearMonth::from_date(self.order_date)
    }
}

/// Borrowed subset of a dataset.
pub type RecordSet<'a> = Vec<&'a SalesRecord>;

// ── YearMonth ─────────────────────────────────────────────────────────────────

/// Month-granularity bucket key. Orders chronologically; displays as `"2016-01"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct YearMonth {
    pub year: i32,
    pub month: u32,
}

impl YearMonth {
    pub fn new(year: i32, month: u32) -> Self {
        Self { year, month }
    }

    /// Floor `date` to its month.
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }
}

impl fmt::Display for YearMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

impl Serialize for YearMonth {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Summed sales for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MonthlyBucket {
    pub month: YearMonth,
    pub sales: Decimal,
}

// ── Selection ─────────────────────────────────────────────────────────────────

/// The user's current filter: one category plus a subset of its subcategories.
///
/// Chosen subcategories are always drawn from the category's taxonomy and kept
/// in taxonomy order, so two selections with the same members compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    category: Category,
    chosen_subcategories: Vec<String>,
}

impl Selection {
    /// Build a selection, silently dropping names outside `category`'s taxonomy.
    pub fn new<I, S>(category: Category, chosen: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let requested: Vec<S> = chosen.into_iter().collect();
        let chosen_subcategories = category
            .subcategories()
            .iter()
            .filter(|sub| requested.iter().any(|r| r.as_ref() == **sub))
            .map(|sub| sub.to_string())
            .collect();
        Self {
            category,
            chosen_subcategories,
        }
    }

    /// A selection with no subcategories chosen.
    pub fn empty(category: Category) -> Self {
        Self {
            category,
            chosen_subcategories: Vec::new(),
        }
    }

    /// A selection with every subcategory of `category` chosen.
    pub fn all(category: Category) -> Self {
        Self::new(category, category.subcategories())
    }

    pub fn category(&self) -> Category {
        self.category
    }

    pub fn chosen_subcategories(&self) -> &[String] {
        &self.chosen_subcategories
    }

    pub fn is_empty(&self) -> bool {
        self.chosen_subcategories.is_empty()
    }

    pub fn is_chosen(&self, sub_category: &str) -> bool {
        self.chosen_subcategories.iter().any(|s| s == sub_category)
    }

    /// Switch category. The chosen subcategories belong to the old category,
    /// so they are cleared.
    pub fn with_category(&self, category: Category) -> Self {
        if category == self.category {
            return self.clone();
        }
        Self::empty(category)
    }

    /// Flip membership of `sub_category`. Returns `false` (and changes
    /// nothing) when it is not part of the current category.
    pub fn toggle(&mut self, sub_category: &str) -> bool {
        if !CategoryTaxonomy::contains(self.category, sub_category) {
            return false;
        }
        let mut chosen: Vec<&str> = self
            .chosen_subcategories
            .iter()
            .map(String::as_str)
            .filter(|s| *s != sub_category)
            .collect();
        if !self.is_chosen(sub_category) {
            chosen.push(sub_category);
        }
        *self = Self::new(self.category, chosen);
        true
    }

    pub fn select_all(&mut self) {
        *self = Self::all(self.category);
    }

    pub fn clear(&mut self) {
        self.chosen_subcategories.clear();
    }
}
