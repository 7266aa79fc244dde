use std::sync::Arc;
use tokio::sync::RwLock;

use crate::services::PreparedFrame;

/// The frame currently offered to clients, ready to be served
#[derive(Clone)]
pub struct StoredArtifact {
    /// Wire bytes
    pub bytes: Arc<Vec<u8>>,
    /// Indexed PNG of the same frame
    pub preview_png: Arc<Vec<u8>>,
}

/// Shared slot for the served artifact
pub struct ArtifactStore {
    current: Arc<RwLock<Option<StoredArtifact>>>,
}

impl ArtifactStore {
    pub fn new() -> Self {
        Self {
            current: Arc::new(RwLock::new(None)),
        }
    }

    /// Replace the served frame
    pub async fn store(&self, frame: &PreparedFrame, preview_png: Vec<u8>) {
        let mut current = self.current.write().await;
        *current = Some(StoredArtifact {
            bytes: Arc::new(frame.bytes.clone()),
            preview_png: Arc::new(preview_png),
        });
    }

    /// The served frame, if one was prepared
    pub async fn get(&self) -> Option<StoredArtifact> {
        let current = self.current.read().await;
        current.clone()
    }
}

impl Default for ArtifactStore {
    fn default() -> Self {
        Self::new()
    }
}
