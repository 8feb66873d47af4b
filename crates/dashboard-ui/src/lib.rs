//! Terminal UI layer for the sales dashboard.
//!
//! Provides themes, header, metric cards, the category and subcategory
//! selectors, table and chart views, and the synchronous event loop built on
//! [`ratatui`] and [`crossterm`].

pub mod app;
pub mod chart_view;
pub mod components;
pub mod table_view;
pub mod themes;

pub use dashboard_core as core;
