//! # Observability & Tracing
//!
//! The [`setup_tracing`] function initializes structured logging with the
//! `tracing` crate.
//!
//! ## Configuration
//!
//! Compact format, no module prefix (`with_target(false)`), level taken from
//! `RUST_LOG`.
//!
//! ## What Gets Traced
//!
//! - **Table Lifecycle**: startup and shutdown of the in-process table, with
//!   its final row count
//! - **Writes**: one span per synchronizer operation (`add`, `update`,
//!   `delete`, `bulk_delete`, `import`, `reload`)
//! - **Fallbacks**: every remote failure at `warn` with the error, every
//!   local fallback at `info`
//!
//! ## Usage Examples
//!
//! ```bash
//! # Compact logs (default)
//! RUST_LOG=info cargo run
//!
//! # Show full payloads (drafts, patches, inserted rows)
//! RUST_LOG=debug cargo run
//!
//! # Only the synchronizer
//! RUST_LOG=mezzanine_stock::sync=debug cargo run
//! ```
//!
//! ## Fallback Trace Example
//!
//! With the table unreachable, adding a record logs:
//!
//! ```text
//! WARN add{category=INK}: Insert failed, keeping record locally error=HTTP request failed: ...
//! INFO add{category=INK}: Applied local fallback count=1
//! ```

/// Initializes the global subscriber. Call once, at process start.
pub fn setup_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_target(false)
        .compact()
        .init();
}
