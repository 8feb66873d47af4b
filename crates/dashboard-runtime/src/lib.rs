//! Runtime layer for the sales dashboard.
//!
//! Loads the dataset once and keeps the current selection's figures in step
//! with every selection change.

pub mod controller;
pub mod data_manager;

pub use dashboard_core as core;
pub use dashboard_data as data;
