//! Filtering and month-bucketed aggregation over sales records.

use std::collections::BTreeMap;

use dashboard_core::calculations::{compute_metrics, MetricsSnapshot};
use dashboard_core::models::{MonthlyBucket, RecordSet, SalesRecord, Selection, YearMonth};
use dashboard_core::taxonomy::Category;
use rust_decimal::Decimal;
use serde::Serialize;

// ── CategoryTotals ────────────────────────────────────────────────────────────

/// Sales and profit totals for one category.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CategoryTotals {
    pub category: Category,
    pub metrics: MetricsSnapshot,
}

// ── SalesAggregator ───────────────────────────────────────────────────────────

/// Stateless helper that filters records and groups them by time period.
pub struct SalesAggregator;

impl SalesAggregator {
    /// Records whose subcategory is one of `chosen_subcategories`.
    ///
    /// Only subcategory membership is tested: `category` is trusted to be the
    /// parent of every chosen name. An empty choice yields an empty set, and a
    /// subcategory outside the taxonomy simply never matches.
    pub fn filter_records<'a, S: AsRef<str>>(
        records: &'a [SalesRecord],
        category: Category,
        chosen_subcategories: &[S],
    ) -> RecordSet<'a> {
        if chosen_subcategories.is_empty() {
            return Vec::new();
        }

        let filtered: RecordSet<'a> = records
            .iter()
            .filter(|r| {
                chosen_subcategories
                    .iter()
                    .any(|s| s.as_ref() == r.sub_category)
            })
            .collect();

        tracing::trace!(
            category = %category,
            chosen = chosen_subcategories.len(),
            matched = filtered.len(),
            "filtered records"
        );
        filtered
    }

    /// [`Self::filter_records`] driven by a [`Selection`].
    pub fn filter_selection<'a>(records: &'a [SalesRecord], selection: &Selection) -> RecordSet<'a> {
        Self::filter_records(
            records,
            selection.category(),
            selection.chosen_subcategories(),
        )
    }

    /// Sum sales per calendar month.
    ///
    /// Months without records are omitted; the result is in ascending
    /// chronological order. Bucket sums saturate at the `Decimal` bounds.
    pub fn monthly_sales_series<'a, I>(records: I) -> Vec<MonthlyBucket>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        Self::aggregate_by_period(records, SalesRecord::month)
            .into_iter()
            .map(|(month, sales)| MonthlyBucket { month, sales })
            .collect()
    }

    /// Sales and profit per category, in category order. Categories with no
    /// records are omitted.
    pub fn category_totals<'a, I>(records: I) -> Vec<CategoryTotals>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
    {
        let mut groups: BTreeMap<Category, RecordSet<'a>> = BTreeMap::new();
        for record in records {
            groups.entry(record.category).or_default().push(record);
        }

        groups
            .into_iter()
            .map(|(category, group)| CategoryTotals {
                category,
                metrics: compute_metrics(group),
            })
            .collect()
    }

    /// Sum of all bucket values of a series, clamped to the `Decimal` range.
    pub fn calculate_total(series: &[MonthlyBucket]) -> Decimal {
        series
            .iter()
            .fold(Decimal::ZERO, |total, b| total.saturating_add(b.sales))
    }

    // ── Private ───────────────────────────────────────────────────────────────

    /// Generic aggregation driver; `key_fn` maps a record to its period key.
    fn aggregate_by_period<'a, I, K>(
        records: I,
        key_fn: impl Fn(&SalesRecord) -> K,
    ) -> BTreeMap<K, Decimal>
    where
        I: IntoIterator<Item = &'a SalesRecord>,
        K: Ord,
    {
        let mut map: BTreeMap<K, Decimal> = BTreeMap::new();
        for record in records {
            let bucket = map.entry(key_fn(record)).or_default();
            *bucket = bucket.saturating_add(record.sales);
        }
        map
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
