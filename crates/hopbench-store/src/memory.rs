//! In-memory store for testing and dry runs.

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;

use hopbench_core::model::ResultRecord;
use hopbench_core::traits::ResultStore;

use crate::error::StoreError;

/// Keeps result records in memory.
///
/// Can be told to reject every append, to exercise failure handling.
pub struct MemoryStore {
    records: Mutex<Vec<ResultRecord>>,
    call_count: AtomicU32,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            records: Mutex::new(Vec::new()),
            call_count: AtomicU32::new(0),
            fail: false,
        }
    }

    /// A store that rejects every append.
    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::new()
        }
    }

    /// Records accepted so far.
    pub fn records(&self) -> Vec<ResultRecord> {
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .clone()
    }

    /// Number of append calls, accepted or not.
    pub fn call_count(&self) -> u32 {
        self.call_count.load(Ordering::Relaxed)
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    fn name(&self) -> &str {
        "memory"
    }

    async fn append(&self, record: &ResultRecord) -> anyhow::Result<()> {
        self.call_count.fetch_add(1, Ordering::Relaxed);
        if self.fail {
            return Err(StoreError::Rejected {
                status: 503,
                message: "memory store configured to fail".into(),
            }
            .into());
        }
        self.records
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
            .push(record.clone());
        Ok(())
    }
}
