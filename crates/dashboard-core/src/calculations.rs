use rust_decimal::Decimal;
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use crate::error::{DashboardError, Result};
use crate::models::SalesRecord;

// ── MetricsSnapshot ───────────────────────────────────────────────────────────

/// Sales and profit totals over a record set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MetricsSnapshot {
    pub total_sales: Decimal,
    pub total_profit: Decimal,
    /// Number of records folded into the totals.
    pub record_count: usize,
    /// A sum left the `Decimal` range and was clamped to its bound.
    pub overflowed: bool,
}

impl MetricsSnapshot {
    /// Fold one record's amounts into the totals.
    ///
    /// Sums that leave the `Decimal` range are clamped to `Decimal::MAX` /
    /// `Decimal::MIN` and mark the snapshot as [`overflowed`](Self::overflowed).
    pub fn add(&mut self, sales: Decimal, profit: Decimal) {
        self.total_sales = self.clamped_sum(self.total_sales, sales);
        self.total_profit = self.clamped_sum(self.total_profit, profit);
        self.record_count += 1;
    }

    /// Totals of `self` and `other` together.
    pub fn merge(&self, other: &MetricsSnapshot) -> MetricsSnapshot {
        let mut merged = *self;
        merged.total_sales = merged.clamped_sum(self.total_sales, other.total_sales);
        merged.total_profit = merged.clamped_sum(self.total_profit, other.total_profit);
        merged.record_count = self.record_count + other.record_count;
        merged.overflowed |= other.overflowed;
        merged
    }

    fn clamped_sum(&mut self, total: Decimal, amount: Decimal) -> Decimal {
        total.checked_add(amount).unwrap_or_else(|| {
            self.overflowed = true;
            if amount.is_sign_negative() {
                Decimal::MIN
            } else {
                Decimal::MAX
            }
        })
    }

    /// `100 * total_profit / total_sales`.
    ///
    /// Returns [`DashboardError::DivisionByZero`] when `total_sales` is zero
    /// and [`DashboardError::Overflow`] when the totals were clamped or the
    /// ratio does not fit in a `Decimal`.
    pub fn profit_margin_pct(&self) -> Result<Decimal> {
        if self.total_sales.is_zero() {
            return Err(DashboardError::DivisionByZero);
        }
        if self.overflowed {
            return Err(DashboardError::Overflow("sales totals"));
        }
        self.total_profit
            .checked_div(self.total_sales)
            .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
            .map(|pct| pct.normalize())
            .ok_or(DashboardError::Overflow("profit margin"))
    }
}

impl Serialize for MetricsSnapshot {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("MetricsSnapshot", 5)?;
        state.serialize_field("total_sales", &self.total_sales)?;
        state.serialize_field("total_profit", &self.total_profit)?;
        state.serialize_field("record_count", &self.record_count)?;
        state.serialize_field("overflowed", &self.overflowed)?;
        state.serialize_field("profit_margin_pct", &self.profit_margin_pct().ok())?;
        state.end()
    }
}

// ── Pipeline calculations ─────────────────────────────────────────────────────

/// Sum sales and profit over `records`.
///
/// Accepts anything that yields `&SalesRecord`, so both a full dataset slice
/// and a filtered [`RecordSet`](crate::models::RecordSet) work. Never panics:
/// out-of-range sums are clamped and flagged, see [`MetricsSnapshot::add`].
pub fn compute_metrics<'a, I>(records: I) -> MetricsSnapshot
where
    I: IntoIterator<Item = &'a SalesRecord>,
{
    records
        .into_iter()
        .fold(MetricsSnapshot::default(), |mut acc, record| {
            acc.add(record.sales, record.profit);
            acc
        })
}

/// Selection margin minus overall margin, in percentage points.
///
/// Positive means the selection outperforms the dataset average. Fails with
/// [`DashboardError::DivisionByZero`] when either side has zero sales and
/// with [`DashboardError::Overflow`] when either margin is out of range.
pub fn compare_margins(selection: &MetricsSnapshot, overall: &MetricsSnapshot) -> Result<Decimal> {
    selection
        .profit_margin_pct()?
        .checked_sub(overall.profit_margin_pct()?)
        .ok_or(DashboardError::Overflow("margin delta"))
}
