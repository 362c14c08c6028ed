// ABOUTME: Library root for greenlight - exposes public types for testing.
// ABOUTME: The main binary is in main.rs.

pub mod config;
pub mod cutover;
pub mod error;
pub mod platform;
pub mod types;
