//! UI Components
//!
//! Leptos components for the leads dashboard.

mod dashboard_header;
mod leads_filter;
mod leads_table;
mod loading_screen;
mod not_configured;
mod stats_card;

pub use dashboard_header::DashboardHeader;
pub use leads_filter::LeadsFilter;
pub use leads_table::LeadsTable;
pub use loading_screen::LoadingScreen;
pub use not_configured::NotConfigured;
pub use stats_card::StatsCard;
