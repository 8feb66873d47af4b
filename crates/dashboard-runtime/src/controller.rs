//! Synchronous selection controller.
//!
//! Owns the loaded [`Dataset`], the current [`Selection`] and the
//! [`DashboardSnapshot`] computed for it. Every selection change runs the
//! full pipeline again before returning, so the snapshot the caller reads
//! afterwards always matches the selection.

use std::sync::Arc;

use dashboard_core::models::Selection;
use dashboard_core::taxonomy::Category;
use dashboard_data::analysis::{analyze_with_overview, DashboardSnapshot};

use crate::data_manager::Dataset;

// ── SelectionEvent ────────────────────────────────────────────────────────────

/// A user action that changes the selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SelectionEvent {
    /// Switch to `Category`; the chosen subcategories are cleared.
    SelectCategory(Category),
    /// Move to the next category in display order, wrapping around.
    NextCategory,
    /// Move to the previous category in display order, wrapping around.
    PreviousCategory,
    /// Flip one subcategory of the current category.
    ToggleSubcategory(String),
    /// Choose every subcategory of the current category.
    SelectAll,
    /// Choose nothing.
    ClearSubcategories,
}

// ── DashboardController ───────────────────────────────────────────────────────

pub struct DashboardController {
    dataset: Arc<Dataset>,
    selection: Selection,
    snapshot: DashboardSnapshot,
    /// Number of pipeline runs, including the initial one.
    recompute_count: u64,
}

impl DashboardController {
    /// Build a controller and compute the snapshot for `selection`.
    pub fn new(dataset: Arc<Dataset>, selection: Selection) -> Self {
        let snapshot = analyze_with_overview(&dataset.records, &dataset.overview, &selection);
        Self {
            dataset,
            selection,
            snapshot,
            recompute_count: 1,
        }
    }

    // ── Accessors ─────────────────────────────────────────────────────────

    pub fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    /// Figures for the current selection.
    pub fn snapshot(&self) -> &DashboardSnapshot {
        &self.snapshot
    }

    pub fn recompute_count(&self) -> u64 {
        self.recompute_count
    }

    // ── Events ────────────────────────────────────────────────────────────

    /// Apply `event` and recompute if the selection changed.
    ///
    /// Returns `true` when the selection (and therefore the snapshot)
    /// changed.
    pub fn apply(&mut self, event: SelectionEvent) -> bool {
        let mut next = self.selection.clone();
        match &event {
            SelectionEvent::SelectCategory(category) => next = next.with_category(*category),
            SelectionEvent::NextCategory => next = next.with_category(next.category().next()),
            SelectionEvent::PreviousCategory => {
                next = next.with_category(next.category().previous())
            }
            SelectionEvent::ToggleSubcategory(sub) => {
                if !next.toggle(sub) {
                    tracing::debug!(
                        sub_category = %sub,
                        category = %next.category(),
                        "ignoring toggle for subcategory outside the current category"
                    );
                }
            }
            SelectionEvent::SelectAll => next.select_all(),
            SelectionEvent::ClearSubcategories => next.clear(),
        }

        if next == self.selection {
            return false;
        }

        tracing::debug!(?event, "selection changed");
        self.set_selection(next);
        true
    }

    pub fn select_category(&mut self, category: Category) -> bool {
        self.apply(SelectionEvent::SelectCategory(category))
    }

    pub fn next_category(&mut self) -> bool {
        self.apply(SelectionEvent::NextCategory)
    }

    pub fn previous_category(&mut self) -> bool {
        self.apply(SelectionEvent::PreviousCategory)
    }

    pub fn toggle_subcategory(&mut self, sub_category: &str) -> bool {
        self.apply(SelectionEvent::ToggleSubcategory(sub_category.to_string()))
    }

    pub fn select_all(&mut self) -> bool {
        self.apply(SelectionEvent::SelectAll)
    }

    pub fn clear_subcategories(&mut self) -> bool {
        self.apply(SelectionEvent::ClearSubcategories)
    }

    /// Replace the selection wholesale and recompute.
    pub fn set_selection(&mut self, selection: Selection) {
        self.selection = selection;
        self.recompute();
    }

    // ── Private ───────────────────────────────────────────────────────────

    fn recompute(&mut self) {
        self.snapshot = analyze_with_overview(
            &self.dataset.records,
            &self.dataset.overview,
            &self.selection,
        );
        self.recompute_count += 1;
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
