//! File browsing seam used by the instance file manager, plus an in-memory
//! implementation for front-ends running without a backend.

use std::sync::Mutex;
use std::sync::PoisonError;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteDirEntry {
    /// Name relative to the listed prefix.
    pub name: String,
    pub is_dir: bool,
}

#[async_trait::async_trait]
pub trait RemoteFs: Send + Sync {
    /// Entries whose path starts with `prefix`.
    async fn list(&self, prefix: &str) -> Vec<RemoteDirEntry>;
    /// Returns whether something was removed.
    async fn delete(&self, path: &str) -> bool;
    /// Stores `content` at `path`, replacing any previous entry.
    async fn upload(&self, path: &str, content: Vec<u8>) -> bool;
    async fn get(&self, path: &str) -> Option<Vec<u8>>;
    async fn rename(&self, src: &str, dst: &str) -> bool;
}

#[derive(Debug)]
struct PseudoFile {
    name: String,
    content: Option<Vec<u8>>,
}

/// [`RemoteFs`] that keeps everything in a flat list of paths. Entries
/// created with [`PseudoRemoteFs::create_dir`] have no content and list as
/// directories. Renaming is not supported.
#[derive(Debug, Default)]
pub struct PseudoRemoteFs {
    files: Mutex<Vec<PseudoFile>>,
}

impl PseudoRemoteFs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn create_dir(&self, path: &str) {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        if !files.iter().any(|f| f.name == path) {
            files.push(PseudoFile {
                name: path.to_string(),
                content: None,
            });
        }
    }
}

#[async_trait::async_trait]
impl RemoteFs for PseudoRemoteFs {
    async fn list(&self, prefix: &str) -> Vec<RemoteDirEntry> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files
            .iter()
            .filter_map(|f| {
                f.name.strip_prefix(prefix).map(|rest| RemoteDirEntry {
                    name: rest.to_string(),
                    is_dir: f.content.is_none(),
                })
            })
            .collect()
    }

    async fn delete(&self, path: &str) -> bool {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        match files.iter().position(|f| f.name == path) {
            Some(index) => {
                files.remove(index);
                true
            }
            None => false,
        }
    }

    async fn upload(&self, path: &str, content: Vec<u8>) -> bool {
        let mut files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files.retain(|f| f.name != path);
        files.push(PseudoFile {
            name: path.to_string(),
            content: Some(content),
        });
        true
    }

    async fn get(&self, path: &str) -> Option<Vec<u8>> {
        let files = self.files.lock().unwrap_or_else(PoisonError::into_inner);
        files
            .iter()
            .find(|f| f.name == path)
            .and_then(|f| f.content.clone())
    }

    async fn rename(&self, src: &str, dst: &str) -> bool {
        tracing::debug!("rename {src} -> {dst} is not supported by the in-memory fs");
        false
    }
}
