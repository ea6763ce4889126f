//! Shared test setup. `tests/common/mod.rs` is cargo's convention for a
//! helper module shared across integration test binaries without becoming
//! a test binary itself.

/// Initializes `env_logger` so the `trace`/`debug` link-surgery and
/// branch-decision logs in `src/dlx/matrix.rs` are visible when running
/// `RUST_LOG=dlx_cover=trace cargo test -- --nocapture`.
///
/// Safe to call from every test: `try_init` only installs the logger once
/// per process and silently no-ops on repeat calls.
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}
