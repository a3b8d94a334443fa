//! Generic table plumbing.
//!
//! This module provides the building blocks the synchronizer sits on: a row
//! contract, a seam trait for anything that stores rows, and two
//! implementations of that seam.
//!
//! # Main Components
//!
//! - [`TableRow`] - Trait that row types implement to be stored in a table
//! - [`RemoteTable`] - Async operations a hosted table offers
//! - [`TableActor`] / [`TableClient`] - In-process table running in a Tokio task
//! - [`RestTable`] - Hosted table reached over HTTP
//! - [`StoreError`] - Common error type
//!
//! # Testing
//!
//! See [`mock`] module for utilities to script table responses without a
//! running table.

pub mod actor;
pub mod client;
pub mod error;
pub mod message;
pub mod mock;
pub mod remote;
pub mod rest;
pub mod row;

pub use actor::TableActor;
pub use client::TableClient;
pub use error::StoreError;
pub use message::{Response, TableRequest};
pub use remote::RemoteTable;
pub use rest::RestTable;
pub use row::TableRow;
