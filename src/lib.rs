//! Personal landing page server.
//!
//! Fetches a GitHub user's public repositories and profile stats, runs the
//! repositories through a filter/sort pipeline and renders the landing page
//! as HTML, localized to English or Russian.

pub mod config;
pub mod github;
pub mod i18n;
pub mod pipeline;
pub mod render;
pub mod server;
