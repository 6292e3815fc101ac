//! Telemetry and diagnostics initialization for the order-management
//! service.
//!
//! Sets up structured logging via the `tracing` ecosystem:
//!
//! - Environment-based log level filtering (via `RUST_LOG`, default `info`)
//! - Pretty-printed span and event formatting
//! - File/line/thread metadata for diagnostics
//! - Timestamps in RFC 3339 local time

/// Installs the global `tracing` subscriber.
///
/// Call once, early in `main`, before any handler runs.
pub fn init_tracing() {
    use tracing_subscriber::fmt::format::FmtSpan;
    use tracing_subscriber::{EnvFilter, fmt};

    fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_span_events(FmtSpan::NONE)
        .with_target(false)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .with_timer(fmt::time::ChronoLocal::rfc_3339())
        .pretty()
        .init();
}
