//! Reusable widgets for the dashboard screens.

pub mod header;
pub mod indicators;
pub mod selector;
pub mod share_bar;
