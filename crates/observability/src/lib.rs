//! Process-wide logging setup for SSO client tools.
//!
//! Library crates only emit `tracing` events; binaries call [`init`] once at
//! startup to route them somewhere.

pub mod tracing;

/// Initialize JSON logging, filtered by `RUST_LOG` (default `info`).
///
/// Safe to call multiple times; subsequent calls become no-ops.
pub fn init() {
    tracing::init(tracing::DEFAULT_FILTER);
}
