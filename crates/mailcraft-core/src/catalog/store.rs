//! Catalog store: in-memory collections with a JSON snapshot on disk.
//!
//! File format: a single pretty-printed JSON object at
//! `~/.mailcraft/catalog.json` holding all three collections and the next id
//! for each. The snapshot is rewritten after every successful mutation.

use std::path::{Path, PathBuf};
use std::sync::{RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::{debug, warn};

use super::types::{
    Client, ClientPatch, Copywriter, CopywriterPatch, NewClient, NewCopywriter, NewProduct,
    Product, ProductPatch,
};
use crate::types::FieldError;

/// Errors from catalog operations.
#[derive(Error, Debug)]
pub enum CatalogError {
    #[error("{kind} {id} not found")]
    NotFound { kind: &'static str, id: u64 },

    #[error("client {0} does not exist")]
    UnknownClient(u64),

    #[error("client {0} still has products")]
    ClientInUse(u64),

    #[error("invalid {kind} data")]
    Invalid {
        kind: &'static str,
        errors: Vec<FieldError>,
    },

    #[error("failed to access catalog file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to (de)serialize catalog: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct CatalogData {
    clients: Vec<Client>,
    products: Vec<Product>,
    copywriters: Vec<Copywriter>,
    next_client_id: u64,
    next_product_id: u64,
    next_copywriter_id: u64,
}

impl CatalogData {
    fn allocate(counter: &mut u64) -> u64 {
        *counter = (*counter).max(1);
        let id = *counter;
        *counter += 1;
        id
    }
}

/// Thread-safe catalog of clients, products and copywriters.
///
/// `RwLock`: multiple readers, exclusive writer. With no backing path the
/// store is purely in-memory.
pub struct CatalogStore {
    path: Option<PathBuf>,
    data: RwLock<CatalogData>,
}

impl CatalogStore {
    /// A store that never touches disk.
    pub fn in_memory() -> Self {
        CatalogStore {
            path: None,
            data: RwLock::new(CatalogData::default()),
        }
    }

    /// Open (or start) a store backed by `path`.
    ///
    /// A missing file yields an empty catalog; an unreadable or corrupt one
    /// is an error.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        let path = path.into();
        let data = if path.exists() {
            let content = std::fs::read_to_string(&path).map_err(|source| CatalogError::Io {
                path: path.clone(),
                source,
            })?;
            debug!("Loaded catalog from {}", path.display());
            serde_json::from_str(&content)?
        } else {
            CatalogData::default()
        };

        Ok(CatalogStore {
            path: Some(path),
            data: RwLock::new(data),
        })
    }

    /// Backing file, if any.
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }

    fn read(&self) -> RwLockReadGuard<'_, CatalogData> {
        self.data.read().unwrap_or_else(|e| e.into_inner())
    }

    fn write(&self) -> RwLockWriteGuard<'_, CatalogData> {
        self.data.write().unwrap_or_else(|e| e.into_inner())
    }

    /// Apply `change` to a copy of the data and keep it only once the
    /// snapshot is on disk.
    fn mutate<T>(
        &self,
        change: impl FnOnce(&mut CatalogData) -> Result<T, CatalogError>,
    ) -> Result<T, CatalogError> {
        let mut data = self.write();
        let mut draft = data.clone();
        let out = change(&mut draft)?;
        self.persist(&draft)?;
        *data = draft;
        Ok(out)
    }

    fn persist(&self, data: &CatalogData) -> Result<(), CatalogError> {
        let Some(path) = &self.path else {
            return Ok(());
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CatalogError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }
        let json = serde_json::to_string_pretty(data)?;
        std::fs::write(path, json).map_err(|source| {
            warn!("Failed to persist catalog {}: {}", path.display(), source);
            CatalogError::Io {
                path: path.clone(),
                source,
            }
        })
    }

    // ── Clients ──

    pub fn list_clients(&self) -> Vec<Client> {
        self.read().clients.clone()
    }

    pub fn get_client(&self, id: u64) -> Option<Client> {
        self.read().clients.iter().find(|c| c.id == id).cloned()
    }

    pub fn create_client(&self, new: NewClient) -> Result<Client, CatalogError> {
        new.validate()
            .map_err(|errors| CatalogError::Invalid { kind: "client", errors })?;

        self.mutate(|data| {
            let id = CatalogData::allocate(&mut data.next_client_id);
            let client = new.into_record(id);
            data.clients.push(client.clone());
            Ok(client)
        })
    }

    pub fn update_client(&self, id: u64, patch: ClientPatch) -> Result<Client, CatalogError> {
        patch
            .validate()
            .map_err(|errors| CatalogError::Invalid { kind: "client", errors })?;

        self.mutate(|data| {
            let client = data
                .clients
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(CatalogError::NotFound { kind: "client", id })?;
            patch.apply(client);
            Ok(client.clone())
        })
    }

    pub fn delete_client(&self, id: u64) -> Result<(), CatalogError> {
        self.mutate(|data| {
            if data.products.iter().any(|p| p.client_id == id) {
                return Err(CatalogError::ClientInUse(id));
            }
            let before = data.clients.len();
            data.clients.retain(|c| c.id != id);
            if data.clients.len() == before {
                return Err(CatalogError::NotFound { kind: "client", id });
            }
            Ok(())
        })
    }

    // ── Products ──

    pub fn list_products(&self) -> Vec<Product> {
        self.read().products.clone()
    }

    pub fn products_by_client(&self, client_id: u64) -> Vec<Product> {
        self.read()
            .products
            .iter()
            .filter(|p| p.client_id == client_id)
            .cloned()
            .collect()
    }

    pub fn get_product(&self, id: u64) -> Option<Product> {
        self.read().products.iter().find(|p| p.id == id).cloned()
    }

    pub fn create_product(&self, new: NewProduct) -> Result<Product, CatalogError> {
        new.validate()
            .map_err(|errors| CatalogError::Invalid { kind: "product", errors })?;

        self.mutate(|data| {
            if !data.clients.iter().any(|c| c.id == new.client_id) {
                return Err(CatalogError::UnknownClient(new.client_id));
            }
            let id = CatalogData::allocate(&mut data.next_product_id);
            let product = new.into_record(id);
            data.products.push(product.clone());
            Ok(product)
        })
    }

    pub fn update_product(&self, id: u64, patch: ProductPatch) -> Result<Product, CatalogError> {
        patch
            .validate()
            .map_err(|errors| CatalogError::Invalid { kind: "product", errors })?;

        self.mutate(|data| {
            if let Some(client_id) = patch.client_id {
                if !data.clients.iter().any(|c| c.id == client_id) {
                    return Err(CatalogError::UnknownClient(client_id));
                }
            }
            let product = data
                .products
                .iter_mut()
                .find(|p| p.id == id)
                .ok_or(CatalogError::NotFound { kind: "product", id })?;
            patch.apply(product);
            Ok(product.clone())
        })
    }

    pub fn delete_product(&self, id: u64) -> Result<(), CatalogError> {
        self.mutate(|data| {
            let before = data.products.len();
            data.products.retain(|p| p.id != id);
            if data.products.len() == before {
                return Err(CatalogError::NotFound { kind: "product", id });
            }
            Ok(())
        })
    }

    // ── Copywriters ──

    pub fn list_copywriters(&self) -> Vec<Copywriter> {
        self.read().copywriters.clone()
    }

    pub fn active_copywriters(&self) -> Vec<Copywriter> {
        self.read()
            .copywriters
            .iter()
            .filter(|c| c.is_active)
            .cloned()
            .collect()
    }

    pub fn get_copywriter(&self, id: u64) -> Option<Copywriter> {
        self.read().copywriters.iter().find(|c| c.id == id).cloned()
    }

    pub fn create_copywriter(&self, new: NewCopywriter) -> Result<Copywriter, CatalogError> {
        new.validate()
            .map_err(|errors| CatalogError::Invalid { kind: "copywriter", errors })?;

        self.mutate(|data| {
            let id = CatalogData::allocate(&mut data.next_copywriter_id);
            let copywriter = new.into_record(id);
            data.copywriters.push(copywriter.clone());
            Ok(copywriter)
        })
    }

    pub fn update_copywriter(
        &self,
        id: u64,
        patch: CopywriterPatch,
    ) -> Result<Copywriter, CatalogError> {
        patch
            .validate()
            .map_err(|errors| CatalogError::Invalid { kind: "copywriter", errors })?;

        self.mutate(|data| {
            let copywriter = data
                .copywriters
                .iter_mut()
                .find(|c| c.id == id)
                .ok_or(CatalogError::NotFound { kind: "copywriter", id })?;
            patch.apply(copywriter);
            Ok(copywriter.clone())
        })
    }

    pub fn delete_copywriter(&self, id: u64) -> Result<(), CatalogError> {
        self.mutate(|data| {
            let before = data.copywriters.len();
            data.copywriters.retain(|c| c.id != id);
            if data.copywriters.len() == before {
                return Err(CatalogError::NotFound { kind: "copywriter", id });
            }
            Ok(())
        })
    }
}

// ─────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use super::*;

    fn new_client(name: &str) -> NewClient {
        NewClient {
            name: name.into(),
            company: "Acme".into(),
            email: "ana@acme.test".into(),
            industry: "Retail".into(),
            target_audience: "Shoppers".into(),
            brand_voice: "Warm".into(),
            communication_style: "Casual".into(),
            key_values: "Trust".into(),
            pain_points: "Price".into(),
            notes: None,
        }
    }

    fn new_product(client_id: u64) -> NewProduct {
        NewProduct {
            client_id,
            name: "Widget".into(),
            description: "A widget".into(),
            category: "Tools".into(),
            benefits: "Saves time".into(),
            features: "Fast".into(),
            target_market: "SMB".into(),
            ..Default::default()
        }
    }

    fn new_copywriter(name: &str, active: bool) -> NewCopywriter {
        NewCopywriter {
            name: name.into(),
            style: "Direct".into(),
            description: "d".into(),
            techniques: "t".into(),
            best_for: "b".into(),
            tone: "t".into(),
            approach: "a".into(),
            examples: None,
            is_active: active,
        }
    }

    #[test]
    fn test_ids_are_sequential() {
        let store = CatalogStore::in_memory();
        let a = store.create_client(new_client("Ana")).unwrap();
        let b = store.create_client(new_client("Bea")).unwrap();
        assert_eq!(a.id, 1);
        assert_eq!(b.id, 2);
        assert_eq!(store.list_clients().len(), 2);
    }

    #[test]
    fn test_create_invalid_client() {
        let store = CatalogStore::in_memory();
        let err = store.create_client(NewClient::default()).unwrap_err();
        assert!(matches!(err, CatalogError::Invalid { kind: "client", .. }));
        assert!(store.list_clients().is_empty());
    }

    #[test]
    fn test_update_and_delete_client() {
        let store = CatalogStore::in_memory();
        let client = store.create_client(new_client("Ana")).unwrap();

        let updated = store
            .update_client(
                client.id,
                ClientPatch {
                    company: Some("Globex".into()),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(updated.company, "Globex");
        assert_eq!(updated.name, "Ana");

        store.delete_client(client.id).unwrap();
        assert!(store.get_client(client.id).is_none());
        assert!(matches!(
            store.delete_client(client.id),
            Err(CatalogError::NotFound { kind: "client", .. })
        ));
    }

    #[test]
    fn test_product_requires_existing_client() {
        let store = CatalogStore::in_memory();
        let err = store.create_product(new_product(42)).unwrap_err();
        assert!(matches!(err, CatalogError::UnknownClient(42)));
    }

    #[test]
    fn test_products_by_client_and_in_use() {
        let store = CatalogStore::in_memory();
        let ana = store.create_client(new_client("Ana")).unwrap();
        let bea = store.create_client(new_client("Bea")).unwrap();
        store.create_product(new_product(ana.id)).unwrap();
        store.create_product(new_product(ana.id)).unwrap();
        store.create_product(new_product(bea.id)).unwrap();

        assert_eq!(store.products_by_client(ana.id).len(), 2);
        assert_eq!(store.products_by_client(bea.id).len(), 1);
        assert!(matches!(
            store.delete_client(ana.id),
            Err(CatalogError::ClientInUse(_))
        ));
    }

    #[test]
    fn test_active_copywriters() {
        let store = CatalogStore::in_memory();
        store.create_copywriter(new_copywriter("On", true)).unwrap();
        let off = store.create_copywriter(new_copywriter("Off", false)).unwrap();

        let active = store.active_copywriters();
        assert_eq!(active.len(), 1);
        assert_eq!(active[0].name, "On");

        store
            .update_copywriter(
                off.id,
                CopywriterPatch {
                    is_active: Some(true),
                    ..Default::default()
                },
            )
            .unwrap();
        assert_eq!(store.active_copywriters().len(), 2);
    }

    #[test]
    fn test_snapshot_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("catalog.json");

        {
            let store = CatalogStore::open(&path).unwrap();
            let client = store.create_client(new_client("Ana")).unwrap();
            store.create_product(new_product(client.id)).unwrap();
        }

        let reopened = CatalogStore::open(&path).unwrap();
        assert_eq!(reopened.list_clients().len(), 1);
        assert_eq!(reopened.list_products().len(), 1);

        // Ids keep counting after reload.
        let next = reopened.create_client(new_client("Bea")).unwrap();
        assert_eq!(next.id, 2);
    }

    #[test]
    fn test_failed_write_leaves_catalog_unchanged() {
        let dir = tempfile::tempdir().unwrap();
        let blocker = dir.path().join("not-a-dir");
        std::fs::write(&blocker, "").unwrap();
        let store = CatalogStore::open(blocker.join("catalog.json")).unwrap();

        let err = store.create_client(new_client("Ana")).unwrap_err();
        assert!(matches!(err, CatalogError::Io { .. }));
        assert!(store.list_clients().is_empty());
        assert!(store.create_copywriter(new_copywriter("On", true)).is_err());
        assert!(store.list_copywriters().is_empty());
    }

    #[test]
    fn test_failed_write_keeps_previous_record() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        let store = CatalogStore::open(&path).unwrap();
        let client = store.create_client(new_client("Ana")).unwrap();

        // Swap the snapshot for a directory so the next write fails.
        std::fs::remove_file(&path).unwrap();
        std::fs::create_dir(&path).unwrap();

        let patch = ClientPatch {
            company: Some("Globex".into()),
            ..Default::default()
        };
        assert!(store.update_client(client.id, patch).is_err());
        assert_eq!(store.get_client(client.id).unwrap().company, "Acme");
        assert!(store.delete_client(client.id).is_err());
        assert!(store.get_client(client.id).is_some());
    }

    #[test]
    fn test_open_corrupt_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalog.json");
        std::fs::write(&path, "{ nope").unwrap();
        assert!(matches!(
            CatalogStore::open(&path),
            Err(CatalogError::Serde(_))
        ));
    }
}
