//! Common test helpers.
#![allow(dead_code)]

pub type TestResult<T = ()> = eyre::Result<T>;

/// Reads a PEM file from the `tests/keys` directory.
pub fn read_key(name: &str) -> TestResult<String> {
    let pem = std::fs::read_to_string(format!(
        "{}/tests/keys/{name}.pem",
        env!("CARGO_MANIFEST_DIR"),
    ))?;

    Ok(pem)
}

/// Installs a `tracing` subscriber that writes through the test harness.
///
/// Set `RUST_LOG=jose_jwt=trace` to see the pipeline stages.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}
