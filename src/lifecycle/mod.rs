//! # Lifecycle
//!
//! Process-level concerns: configuration, logging, wiring the store to a
//! table, shutdown, and the crash barrier around the whole application.

pub mod config;
pub mod fault;
pub mod stock_system;
pub mod tracing;

pub use config::{StoreBackend, StoreConfig};
pub use fault::{guard, Fault};
pub use stock_system::StockSystem;
pub use tracing::setup_tracing;
