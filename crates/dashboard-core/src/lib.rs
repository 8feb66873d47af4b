//! Domain layer for the sales dashboard.
//!
//! Holds the sales record model, the static category taxonomy, the user
//! selection, the metric calculations, display formatting and CLI settings.

pub mod calculations;
pub mod error;
pub mod formatting;
pub mod models;
pub mod settings;
pub mod taxonomy;

pub use error::{DashboardError, Result};
