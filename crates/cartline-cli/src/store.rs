use std::io::ErrorKind;
use std::path::PathBuf;

use async_trait::async_trait;

use cartline_sync::{CartSnapshot, RemoteCartStore, SyncError, SyncResult};

/// Cart persistence backed by a pretty-printed JSON file.
///
/// Stands in for the hosted backend: it receives snapshots after each
/// mutation and hands the last one back to the next invocation.
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: PathBuf) -> Self {
        Self { path }
    }
}

#[async_trait]
impl RemoteCartStore for JsonFileStore {
    async fn push_snapshot(&self, snapshot: &CartSnapshot) -> SyncResult<()> {
        let json = serde_json::to_string_pretty(snapshot)
            .map_err(|e| SyncError::Serialization(e.to_string()))?;
        tokio::fs::write(&self.path, json).await?;
        Ok(())
    }

    async fn fetch_snapshot(&self) -> SyncResult<Option<CartSnapshot>> {
        let contents = match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };
        let snapshot = serde_json::from_str(&contents)
            .map_err(|e| SyncError::Serialization(e.to_string()))?;
        Ok(Some(snapshot))
    }

    async fn clear(&self) -> SyncResult<()> {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_file_reads_as_no_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cart.json"));
        assert!(store.fetch_snapshot().await.unwrap().is_none());
        store.clear().await.unwrap();
    }

    #[tokio::test]
    async fn push_then_fetch_roundtrips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::new(dir.path().join("cart.json"));

        let mut snapshot = CartSnapshot::empty();
        snapshot.revision = 3;
        store.push_snapshot(&snapshot).await.unwrap();

        assert_eq!(store.fetch_snapshot().await.unwrap(), Some(snapshot));

        store.clear().await.unwrap();
        assert!(store.fetch_snapshot().await.unwrap().is_none());
    }

    #[tokio::test]
    async fn corrupt_file_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("cart.json");
        tokio::fs::write(&path, "not json").await.unwrap();

        let store = JsonFileStore::new(path);
        let error = store.fetch_snapshot().await.unwrap_err();
        assert!(matches!(error, SyncError::Serialization(_)));
    }
}
