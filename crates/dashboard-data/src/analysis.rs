//! Full recomputation pipeline for one selection.
//!
//! [`DatasetOverview`] holds the figures that depend only on the dataset
//! (overall metrics, overall monthly series, category totals), so a caller
//! that recomputes on every selection change can build it once.
//! [`DashboardSnapshot`] combines it with the per-selection figures.

use dashboard_core::calculations::{compare_margins, compute_metrics, MetricsSnapshot};
use dashboard_core::error::Result;
use dashboard_core::models::{MonthlyBucket, SalesRecord, Selection};
use rust_decimal::Decimal;
use serde::Serialize;

use crate::aggregator::{CategoryTotals, SalesAggregator};

// ── DatasetOverview ───────────────────────────────────────────────────────────

/// Selection-independent figures over the whole dataset.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DatasetOverview {
    /// Metrics over every record; the fixed basis for margin comparison.
    pub metrics: MetricsSnapshot,
    /// Monthly sales over every record.
    pub monthly_sales: Vec<MonthlyBucket>,
    /// Per-category totals.
    pub category_totals: Vec<CategoryTotals>,
}

impl DatasetOverview {
    pub fn compute(records: &[SalesRecord]) -> Self {
        Self {
            metrics: compute_metrics(records),
            monthly_sales: SalesAggregator::monthly_sales_series(records),
            category_totals: SalesAggregator::category_totals(records),
        }
    }
}

// ── DashboardSnapshot ─────────────────────────────────────────────────────────

/// Everything the presentation layer needs after one selection change.
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardSnapshot {
    /// The selection these figures were computed for.
    pub selection: Selection,
    /// Monthly sales of the selected records.
    pub selection_series: Vec<MonthlyBucket>,
    /// Metrics of the selected records.
    pub selection_metrics: MetricsSnapshot,
    /// Whole-dataset figures.
    pub overview: DatasetOverview,
}

impl DashboardSnapshot {
    /// Metrics over the whole dataset.
    pub fn overall_metrics(&self) -> &MetricsSnapshot {
        &self.overview.metrics
    }

    /// Selection margin minus overall margin, in percentage points.
    pub fn margin_delta(&self) -> Result<Decimal> {
        compare_margins(&self.selection_metrics, &self.overview.metrics)
    }

    /// Pretty-printed JSON report of the snapshot.
    pub fn to_json_pretty(&self) -> Result<String> {
        let report = SnapshotReport {
            selection: &self.selection,
            selection_metrics: &self.selection_metrics,
            overall_metrics: &self.overview.metrics,
            margin_delta_pct: self.margin_delta().ok(),
            selection_monthly_sales: &self.selection_series,
            overall_monthly_sales: &self.overview.monthly_sales,
            category_totals: &self.overview.category_totals,
        };
        Ok(serde_json::to_string_pretty(&report)?)
    }
}

#[derive(Serialize)]
struct SnapshotReport<'a> {
    selection: &'a Selection,
    selection_metrics: &'a MetricsSnapshot,
    overall_metrics: &'a MetricsSnapshot,
    margin_delta_pct: Option<Decimal>,
    selection_monthly_sales: &'a [MonthlyBucket],
    overall_monthly_sales: &'a [MonthlyBucket],
    category_totals: &'a [CategoryTotals],
}

// ── Public functions ──────────────────────────────────────────────────────────

/// Run the whole pipeline for `selection`.
///
/// 1. Filter the records by the chosen subcategories.
/// 2. Bucket the selection's sales by month.
/// 3. Compute selection and whole-dataset metrics.
pub fn analyze_selection(records: &[SalesRecord], selection: &Selection) -> DashboardSnapshot {
    analyze_with_overview(records, &DatasetOverview::compute(records), selection)
}

/// Same as [`analyze_selection`], reusing a precomputed [`DatasetOverview`].
pub fn analyze_with_overview(
    records: &[SalesRecord],
    overview: &DatasetOverview,
    selection: &Selection,
) -> DashboardSnapshot {
    let filtered = SalesAggregator::filter_selection(records, selection);
    let selection_series = SalesAggregator::monthly_sales_series(filtered.iter().copied());
    let selection_metrics = compute_metrics(filtered.iter().copied());

    tracing::debug!(
        category = %selection.category(),
        subcategories = selection.chosen_subcategories().len(),
        records = selection_metrics.record_count,
        months = selection_series.len(),
        "selection recomputed"
    );

    DashboardSnapshot {
        selection: selection.clone(),
        selection_series,
        selection_metrics,
        overview: overview.clone(),
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
