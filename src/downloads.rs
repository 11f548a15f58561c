use dashmap::DashMap;
use uuid::Uuid;
use tracing::debug;

/// Route prefix under which registered blobs are served.
pub const BLOB_ROUTE_PREFIX: &str = "/blob";

#[derive(Debug, Clone, PartialEq)]
pub struct Blob {
    pub bytes: Vec<u8>,
    pub content_type: String,
    pub filename: String,
}

/// Temporary object URLs for translated documents.
///
/// A URL is valid until it is fetched once or explicitly revoked.
#[derive(Debug, Default)]
pub struct ObjectUrlRegistry {
    blobs: DashMap<Uuid, Blob>,
}

impl ObjectUrlRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a blob and return its id together with the URL serving it.
    pub fn create(&self, blob: Blob) -> (Uuid, String) {
        let id = Uuid::new_v4();
        debug!("Created object URL {} for {} ({} bytes)", id, blob.filename, blob.bytes.len());
        self.blobs.insert(id, blob);
        (id, format!("{}/{}", BLOB_ROUTE_PREFIX, id))
    }

    /// Hand out the blob and revoke its URL.
    pub fn take(&self, id: &Uuid) -> Option<Blob> {
        self.blobs.remove(id).map(|(_, blob)| blob)
    }

    pub fn revoke(&self, id: &Uuid) -> bool {
        let removed = self.blobs.remove(id).is_some();
        if removed {
            debug!("Revoked object URL {}", id);
        }
        removed
    }

    pub fn contains(&self, id: &Uuid) -> bool {
        self.blobs.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.blobs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.blobs.is_empty()
    }
}
