//! # Mezzanine Stock
//!
//! > **An inventory view-model that keeps working when the table does not.**
//!
//! This crate holds the stock of a mezzanine warehouse (inks, fibers and
//! packaging) in memory, keeps it in sync with a hosted table, and derives
//! the filtered, sorted views and dashboard figures the screens show.
//!
//! ## 🏗️ Design Philosophy
//!
//! ### Remote first, local fallback
//!
//! Every write goes to the table first. When the table accepts it, the
//! collection is reloaded. When it does not, the write is applied locally
//! so the user never loses what they just typed. There is no retry queue:
//! locally applied records live until the next successful reload replaces
//! the collection.
//!
//! ### One engine, many tables
//!
//! The table engine is generic over a [`TableRow`](framework::TableRow). The
//! same request loop serves the in-process table, and the same
//! [`RemoteTable`](framework::RemoteTable) seam is implemented by the HTTP
//! client and by the test mock.
//!
//! ## 👩‍💻 Architecture Notes
//!
//! ### 1. Type-Safe Error Handling
//! Each layer has its own `thiserror` enum. Synchronizer writes report a
//! [`SyncOutcome`](sync::SyncOutcome) instead of a table error; only
//! validation problems surface as [`InventoryError`](sync::InventoryError).
//!
//! ### 2. Concurrency Model
//! The in-process table is a [`TableActor`](framework::TableActor) running
//! in its own Tokio task and processing requests sequentially. The store
//! itself is a plain value driven by `&mut self`, so writes are serialized
//! by the borrow checker.
//!
//! ### 3. Observability
//! `tracing` spans on every synchronizer operation; fallbacks are logged at
//! `warn`/`info`. See the [`lifecycle::tracing`] module for details.
//!
//! ## 🗺️ Module Tour
//!
//! ### 1. The Engine ([`framework`])
//! - **Role**: Rows, the in-process table actor, the HTTP table, and mocks.
//! - **Key items**: [`TableRow`](framework::TableRow), [`TableActor`](framework::TableActor),
//!   [`RestTable`](framework::RestTable).
//!
//! ### 2. The Data ([`model`], [`inventory_table`])
//! - **Role**: Records, drafts, patches and the wire rows; the inventory
//!   table built on the engine.
//!
//! ### 3. The Synchronizer ([`sync`])
//! - **Role**: The collection and the write policy.
//! - **Key items**: [`InventoryStore`](sync::InventoryStore).
//!
//! ### 4. The Views ([`query`], [`dashboard`], [`spreadsheet`])
//! - **Role**: Search, column filters and sort; dashboard aggregates; xlsx
//!   import and export.
//!
//! ### 5. The Orchestrator ([`lifecycle`])
//! - **Role**: Configuration, logging, wiring and shutdown.
//! - **Key items**: [`StockSystem`](lifecycle::StockSystem), [`StoreConfig`](lifecycle::StoreConfig).
//!
//! ## 🚀 Quick Start
//!
//! ```bash
//! # Against the hosted table
//! SUPABASE_URL=https://project.supabase.co SUPABASE_ANON_KEY=... RUST_LOG=info cargo run
//!
//! # Fully in-process
//! INVENTORY_BACKEND=local RUST_LOG=info cargo run
//! ```

pub mod dashboard;
pub mod framework;
pub mod inventory_table;
pub mod lifecycle;
pub mod model;
pub mod query;
pub mod spreadsheet;
pub mod sync;
