use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::{SyncError, SyncResult};
use crate::transport::RemoteCartStore;
use crate::types::CartSnapshot;

/// In-memory remote store for tests, local demos, and embedding.
///
/// `reject_pushes` simulates an unreachable backend so callers can exercise
/// the local-first failure path.
#[derive(Default)]
pub struct InMemoryRemote {
    inner: RwLock<Option<CartSnapshot>>,
    reject_pushes: AtomicBool,
}

impl InMemoryRemote {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start with a pre-existing snapshot, as a returning session would see.
    pub fn with_snapshot(snapshot: CartSnapshot) -> Self {
        Self {
            inner: RwLock::new(Some(snapshot)),
            reject_pushes: AtomicBool::new(false),
        }
    }

    /// When `true`, every push fails with a remote error.
    pub fn set_reject_pushes(&self, reject: bool) {
        self.reject_pushes.store(reject, Ordering::SeqCst);
    }

    /// The currently stored snapshot, bypassing the async interface.
    pub fn stored(&self) -> Option<CartSnapshot> {
        self.inner.read().ok().and_then(|guard| guard.clone())
    }
}

#[async_trait]
impl RemoteCartStore for InMemoryRemote {
    async fn push_snapshot(&self, snapshot: &CartSnapshot) -> SyncResult<()> {
        if self.reject_pushes.load(Ordering::SeqCst) {
            return Err(SyncError::Remote("push rejected".into()));
        }
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SyncError::Remote("store lock poisoned".into()))?;
        *guard = Some(snapshot.clone());
        Ok(())
    }

    async fn fetch_snapshot(&self) -> SyncResult<Option<CartSnapshot>> {
        let guard = self
            .inner
            .read()
            .map_err(|_| SyncError::Remote("store lock poisoned".into()))?;
        Ok(guard.clone())
    }

    async fn clear(&self) -> SyncResult<()> {
        let mut guard = self
            .inner
            .write()
            .map_err(|_| SyncError::Remote("store lock poisoned".into()))?;
        *guard = None;
        Ok(())
    }
}
