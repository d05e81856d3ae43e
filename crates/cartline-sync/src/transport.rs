use async_trait::async_trait;

use crate::error::SyncResult;
use crate::types::CartSnapshot;

/// Storage interface for remote cart persistence.
///
/// Implementations are external collaborators: a hosted backend, a local
/// file, or [`crate::InMemoryRemote`] in tests. The cart core makes no
/// assumptions about their consistency guarantees; it only ever hands them
/// finished snapshots after a local mutation has succeeded.
#[async_trait]
pub trait RemoteCartStore: Send + Sync {
    /// Persist a snapshot, replacing whatever the remote held before.
    async fn push_snapshot(&self, snapshot: &CartSnapshot) -> SyncResult<()>;

    /// Fetch the last persisted snapshot, if any.
    async fn fetch_snapshot(&self) -> SyncResult<Option<CartSnapshot>>;

    /// Drop any persisted snapshot.
    async fn clear(&self) -> SyncResult<()>;
}

#[async_trait]
impl<T: RemoteCartStore + ?Sized> RemoteCartStore for std::sync::Arc<T> {
    async fn push_snapshot(&self, snapshot: &CartSnapshot) -> SyncResult<()> {
        (**self).push_snapshot(snapshot).await
    }

    async fn fetch_snapshot(&self) -> SyncResult<Option<CartSnapshot>> {
        (**self).fetch_snapshot().await
    }

    async fn clear(&self) -> SyncResult<()> {
        (**self).clear().await
    }
}
