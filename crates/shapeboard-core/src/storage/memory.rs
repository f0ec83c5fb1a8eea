//! In-memory storage.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::loader::SavedCanvas;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and hosts without a filesystem.
#[derive(Default)]
pub struct MemoryStorage {
    canvases: RwLock<HashMap<String, SavedCanvas>>,
}

fn lock_error(e: impl std::fmt::Display) -> StorageError {
    StorageError::Other(format!("Lock error: {}", e))
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, id: &str, canvas: &SavedCanvas) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        let canvas = canvas.clone();
        Box::pin(async move {
            self.canvases.write().map_err(lock_error)?.insert(id, canvas);
            Ok(())
        })
    }

    fn load(&self, id: &str) -> BoxFuture<'_, StorageResult<SavedCanvas>> {
        let id = id.to_string();
        Box::pin(async move {
            let canvases = self.canvases.read().map_err(lock_error)?;
            canvases
                .get(&id)
                .cloned()
                .ok_or(StorageError::NotFound(id))
        })
    }

    fn delete(&self, id: &str) -> BoxFuture<'_, StorageResult<()>> {
        let id = id.to_string();
        Box::pin(async move {
            self.canvases.write().map_err(lock_error)?.remove(&id);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let canvases = self.canvases.read().map_err(lock_error)?;
            Ok(canvases.keys().cloned().collect())
        })
    }

    fn exists(&self, id: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let id = id.to_string();
        Box::pin(async move { Ok(self.canvases.read().map_err(lock_error)?.contains_key(&id)) })
    }
}
