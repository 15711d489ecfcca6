//! hopbench-store: result store implementations.
//!
//! Implements the `ResultStore` trait for a JSON-lines file, an HTTP
//! endpoint, and an in-memory buffer, plus the configuration that picks one.

pub mod config;
pub mod error;
pub mod http;
pub mod jsonl;
pub mod memory;

pub use config::{create_store, load_config_from, HopbenchConfig, StoreConfig};
pub use error::StoreError;
