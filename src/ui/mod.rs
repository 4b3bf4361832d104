//! Terminal rendering for the dashboard views.
//!
//! Each view renders into a [`ratatui::Frame`]; shared chrome (header, tabs,
//! status bar, help overlay) lives in [`common`].

pub mod analysis;
pub mod common;
pub mod incidents;
pub mod overview;
pub mod theme;

pub use theme::Theme;
