//! Result submission.
//!
//! A finished session hands its record to the store without waiting for the
//! write: results are shown right away and a failed write is only logged.
//! Nothing here retries or cancels.

use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::model::ResultRecord;
use crate::traits::ResultStore;

/// Spawn the append of `record` on the tokio runtime.
///
/// The handle resolves to `true` when the store accepted the record. Callers
/// may drop it, or await it before exiting so the write gets to finish.
pub fn dispatch(store: Arc<dyn ResultStore>, record: ResultRecord) -> JoinHandle<bool> {
    tokio::spawn(async move { submit(store.as_ref(), &record).await })
}

/// Append `record`, logging any failure instead of returning it.
pub async fn submit(store: &dyn ResultStore, record: &ResultRecord) -> bool {
    match store.append(record).await {
        Ok(()) => {
            tracing::info!(
                session = %record.session_id,
                "result stored via {}",
                store.name()
            );
            true
        }
        Err(e) => {
            tracing::error!(
                session = %record.session_id,
                "failed to store result via {}: {e:#}",
                store.name()
            );
            false
        }
    }
}
