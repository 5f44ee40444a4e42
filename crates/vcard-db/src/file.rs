use std::collections::BTreeMap;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::fs;
use tracing::warn;

use vcard_types::models::UserRecord;
use vcard_types::normalize::normalize_record;

use crate::error::StoreError;

/// On-disk document: one JSON object holding the whole username → record map.
#[derive(Debug, Default, Serialize, Deserialize)]
struct StoreDocument {
    #[serde(default)]
    users: BTreeMap<String, Value>,
}

/// File-backed store. Whole-document read-modify-write: every upsert
/// re-serializes every user's record. O(total users) per write, accepted
/// at prototype scale.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut tmp = self.path.as_os_str().to_owned();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }

    /// Missing or unparseable content reads as the empty store: the
    /// recovery path for first run and for a corrupted file.
    async fn read_document(&self) -> StoreDocument {
        let raw = match fs::read_to_string(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return StoreDocument::default();
            }
            Err(e) => {
                warn!("unreadable store file {}: {}", self.path.display(), e);
                return StoreDocument::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(doc) => doc,
            Err(e) => {
                warn!("corrupt store file {}: {}", self.path.display(), e);
                StoreDocument::default()
            }
        }
    }

    /// Stage to `<path>.tmp` in the same directory, then rename over the
    /// real path. The rename is atomic at the filesystem level, so readers
    /// see either the old complete document or the new one, never a partial
    /// write. The staging file is removed if the rename fails.
    async fn write_document(&self, doc: &StoreDocument) -> Result<(), StoreError> {
        let staging = self.staging_path();
        let mut serialized = serde_json::to_string_pretty(doc)?;
        serialized.push('\n');
        fs::write(&staging, serialized).await?;
        if let Err(e) = fs::rename(&staging, &self.path).await {
            let _ = fs::remove_file(&staging).await;
            return Err(e.into());
        }
        Ok(())
    }

    /// Every record coming off disk passes through the normalizer, so a
    /// stale-shape or corrupted entry self-heals on read instead of
    /// propagating upward.
    pub async fn get(&self, username: &str) -> Option<UserRecord> {
        let doc = self.read_document().await;
        doc.users
            .get(username)
            .map(|value| normalize_record(username, Some(value)))
    }

    pub async fn upsert(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        let mut doc = self.read_document().await;
        doc.users
            .insert(username.to_string(), serde_json::to_value(record)?);
        self.write_document(&doc).await
    }
}
