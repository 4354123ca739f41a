//! Testing utilities for resolution runs.
//!
//! This module provides:
//! - A scripted in-memory fetcher
//! - HTML page builders for search results and directory pages

mod pages;
mod scripted;

pub use pages::{
    app_store_ios_page, app_store_android_page, investment_db_page, professional_network_page,
    review_site_page, search_results_page,
};
pub use scripted::{Scripted, ScriptedFetcher};
