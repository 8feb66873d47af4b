//! Data layer for the sales dashboard.
//!
//! Loads sales records from CSV, filters them by the user's selection,
//! buckets them by month and runs the top-level recomputation pipeline.

pub mod aggregator;
pub mod analysis;
pub mod reader;

pub use dashboard_core as core;
