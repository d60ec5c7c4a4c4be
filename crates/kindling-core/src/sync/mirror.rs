//! Fire-and-forget mirroring of local snapshots.
//!
//! Every save hands the snapshot to a one-shot blocking task on the
//! mirror's own runtime. The engine never waits on it; failures are logged
//! and dropped, with no retry. Dropping the mirror waits for in-flight
//! pushes, each bounded by the store's own timeout.

use std::sync::Arc;

use tokio::runtime::Runtime;
use tokio::task::JoinHandle;

use super::remote::RemoteStore;
use crate::error::SyncError;

pub struct RemoteMirror {
    runtime: Runtime,
    store: Arc<dyn RemoteStore>,
}

impl RemoteMirror {
    pub fn new(store: Arc<dyn RemoteStore>) -> Result<Self, SyncError> {
        let runtime = tokio::runtime::Builder::new_multi_thread()
            .worker_threads(1)
            .thread_name("kindling-sync")
            .enable_all()
            .build()
            .map_err(SyncError::Runtime)?;
        Ok(Self { runtime, store })
    }

    /// Start pushing `snapshot`. The returned handle may be ignored.
    pub fn push(&self, snapshot: String) -> JoinHandle<()> {
        let store = Arc::clone(&self.store);
        self.runtime.spawn_blocking(move || match store.push(&snapshot) {
            Ok(()) => tracing::debug!(bytes = snapshot.len(), "snapshot mirrored"),
            Err(e) => tracing::warn!(error = %e, "remote sync failed; local state kept"),
        })
    }

    /// Block until a push started by [`RemoteMirror::push`] has finished.
    pub fn wait(&self, handle: JoinHandle<()>) {
        if let Err(e) = self.runtime.block_on(handle) {
            tracing::warn!(error = %e, "mirror task did not complete");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[derive(Default)]
    struct RecordingStore {
        pushed: Mutex<Vec<String>>,
    }

    impl RemoteStore for RecordingStore {
        fn push(&self, snapshot: &str) -> Result<(), SyncError> {
            self.pushed.lock().unwrap().push(snapshot.to_string());
            Ok(())
        }
    }

    struct UnreachableStore;

    impl RemoteStore for UnreachableStore {
        fn push(&self, _snapshot: &str) -> Result<(), SyncError> {
            Err(SyncError::Rejected {
                status: 502,
                body: "bad gateway".into(),
            })
        }
    }

    #[test]
    fn push_reaches_store() {
        let store = Arc::new(RecordingStore::default());
        let mirror = RemoteMirror::new(store.clone()).unwrap();

        let handle = mirror.push("{\"streak\":1}".into());
        mirror.wait(handle);

        assert_eq!(*store.pushed.lock().unwrap(), vec!["{\"streak\":1}".to_string()]);
    }

    #[test]
    fn failed_push_is_swallowed() {
        let mirror = RemoteMirror::new(Arc::new(UnreachableStore)).unwrap();
        let handle = mirror.push("{}".into());
        mirror.wait(handle);
    }
}
