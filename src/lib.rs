//! Public API Dashboard
//!
//! Fetches weather, headlines, crypto prices and stock quotes from public
//! APIs on every page load and renders them into a single HTML page.

pub mod config;
pub mod dashboard;
pub mod error;
pub mod fetcher;
pub mod models;
pub mod routes;
