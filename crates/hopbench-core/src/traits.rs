//! Core trait definitions for result persistence.
//!
//! Implemented by the `hopbench-store` crate.

use async_trait::async_trait;

use crate::model::ResultRecord;

/// Trait for backends that keep finished session results.
///
/// The core only ever appends; nothing is read back, updated, or deleted.
#[async_trait]
pub trait ResultStore: Send + Sync {
    /// Human-readable store name (e.g. "jsonl").
    fn name(&self) -> &str;

    /// Append one result record.
    async fn append(&self, record: &ResultRecord) -> anyhow::Result<()>;
}
