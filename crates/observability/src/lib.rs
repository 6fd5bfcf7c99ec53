//! Tracing and logging (shared setup).

/// Default filter directive when neither `RUST_LOG` nor the caller supplies one.
pub const DEFAULT_FILTER: &str = "info";

/// Initialize process-wide observability (tracing/logging).
///
/// `default_filter` applies when `RUST_LOG` is unset or invalid. This is safe
/// to call multiple times; subsequent calls become no-ops.
pub fn init(default_filter: &str) {
    tracing::init(default_filter);
}

/// Tracing configuration (filters, layers).
pub mod tracing;
