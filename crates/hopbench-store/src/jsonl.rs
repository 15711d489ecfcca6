//! JSON-lines file store.
//!
//! Each finished session becomes one line in an append-only file.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use hopbench_core::model::ResultRecord;
use hopbench_core::traits::ResultStore;

use crate::error::StoreError;

/// Appends result records to a local `.jsonl` file.
pub struct JsonlStore {
    path: PathBuf,
    /// Serializes appends from this process so lines never interleave.
    write_lock: Mutex<()>,
}

impl JsonlStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn io_error(&self, source: std::io::Error) -> StoreError {
        StoreError::Io {
            path: self.path.display().to_string(),
            source,
        }
    }
}

#[async_trait]
impl ResultStore for JsonlStore {
    fn name(&self) -> &str {
        "jsonl"
    }

    async fn append(&self, record: &ResultRecord) -> anyhow::Result<()> {
        let mut line = serde_json::to_string(record).map_err(StoreError::from)?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| self.io_error(e))?;
        }

        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await
            .map_err(|e| self.io_error(e))?;
        file.write_all(line.as_bytes())
            .await
            .map_err(|e| self.io_error(e))?;
        file.flush().await.map_err(|e| self.io_error(e))?;

        tracing::debug!("appended result to {}", self.path.display());
        Ok(())
    }
}
