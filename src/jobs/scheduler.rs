//! Delayed eviction of finished jobs.
//!
//! Each scheduled eviction is a sleeping tokio task whose handle is kept so it can
//! be aborted. Shutting the scheduler down (or dropping it) aborts every pending
//! timer; jobs whose timers were aborted simply stay in the store.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::time::Duration;

use parking_lot::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use super::store::JobStore;
use super::types::JobId;

type Timers = Arc<Mutex<HashMap<JobId, JoinHandle<()>>>>;

pub struct EvictionScheduler {
    store: Arc<dyn JobStore>,
    timers: Timers,
    shutdown: AtomicBool,
}

impl std::fmt::Debug for EvictionScheduler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EvictionScheduler")
            .field("pending", &self.pending())
            .field("shutdown", &self.is_shutdown())
            .finish()
    }
}

impl EvictionScheduler {
    pub fn new(store: Arc<dyn JobStore>) -> Self {
        Self {
            store,
            timers: Arc::new(Mutex::new(HashMap::new())),
            shutdown: AtomicBool::new(false),
        }
    }

    /// Evicts `id` from the store after `delay`, replacing any earlier timer for it.
    /// Must be called from within a tokio runtime.
    pub fn schedule(&self, id: JobId, delay: Duration) {
        if self.is_shutdown() {
            debug!(job_id = %id, "Scheduler shut down, eviction not scheduled");
            return;
        }

        let store = Arc::clone(&self.store);
        let timers = Arc::clone(&self.timers);

        // The timer removes its own handle, so it must not run before the insert below.
        let mut pending = self.timers.lock();
        let handle = tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            store.evict(&id).await;
            timers.lock().remove(&id);
        });
        if let Some(previous) = pending.insert(id, handle) {
            previous.abort();
        }
        debug!(job_id = %id, delay_ms = delay.as_millis() as u64, "Eviction scheduled");
    }

    /// Aborts the pending eviction of `id`. Returns `true` if one was pending.
    pub fn cancel(&self, id: &JobId) -> bool {
        match self.timers.lock().remove(id) {
            Some(handle) => {
                handle.abort();
                true
            }
            None => false,
        }
    }

    /// Number of pending evictions.
    pub fn pending(&self) -> usize {
        self.timers.lock().len()
    }

    pub fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::Acquire)
    }

    /// Aborts all pending evictions and refuses new ones. Idempotent.
    pub fn shutdown(&self) {
        if self.shutdown.swap(true, Ordering::AcqRel) {
            return;
        }
        let aborted = self.abort_all();
        debug!(aborted, "Eviction scheduler shut down");
    }

    fn abort_all(&self) -> usize {
        let handles: Vec<_> = self.timers.lock().drain().map(|(_, h)| h).collect();
        let count = handles.len();
        for handle in handles {
            handle.abort();
        }
        count
    }
}

impl Drop for EvictionScheduler {
    fn drop(&mut self) {
        self.abort_all();
    }
}
