#![allow(dead_code)]

pub mod driver;
pub mod integration;
pub mod schema;
pub mod store;

/// Installs a fmt subscriber honoring `RUST_LOG`, for running these tests
/// with reporter/driver diagnostics visible. Safe to call repeatedly.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .try_init();
}
