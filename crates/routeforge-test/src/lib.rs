//! Shared test fixtures for RouteForge crates.
//!
//! This crate provides in-memory collaborators and entity builders for
//! testing. It depends on `routeforge-core` only, so every other crate can
//! take it as a dev-dependency.
//!
//! - [`matrix`] - a distance matrix computed from coordinates, with live rows
//! - [`repository`] - an in-memory location repository
//! - [`publisher`] - a publisher that records every plan
//! - [`builders`] - domain and planning entity builders
//!
//! # Usage
//!
//! ```toml
//! [dev-dependencies]
//! routeforge-test = { workspace = true }
//! ```

pub mod builders;
pub mod matrix;
pub mod publisher;
pub mod repository;

pub use matrix::ManhattanMatrix;
pub use publisher::RecordingPublisher;
pub use repository::InMemoryLocationRepository;

use tracing_subscriber::EnvFilter;

/// Installs a fmt subscriber writing to the test harness.
///
/// Honors `RUST_LOG`; defaults to `warn`. Safe to call from every test.
pub fn init_test_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}
