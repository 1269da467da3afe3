// ABOUTME: Library root for promptfolio - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod auth;
pub mod config;
pub mod deploy;
pub mod diagnostics;
pub mod error;
pub mod form;
pub mod github;
pub mod output;
pub mod render;
pub mod types;
