use std::path::PathBuf;

use vcard_types::models::UserRecord;

use crate::error::StoreError;
use crate::file::FileStore;
use crate::memory::MemoryStore;
use crate::remote::SupabaseStore;

/// The storage backend behind the record service. Selected once at process
/// start and fixed for the process lifetime; there is no per-request
/// fallback between variants.
pub enum StoreBackend {
    File(FileStore),
    Supabase(SupabaseStore),
    Memory(MemoryStore),
}

impl StoreBackend {
    pub fn file(path: impl Into<PathBuf>) -> Self {
        Self::File(FileStore::new(path))
    }

    pub fn supabase(url: String, key: String) -> Result<Self, StoreError> {
        Ok(Self::Supabase(SupabaseStore::new(url, key)?))
    }

    pub fn memory() -> Self {
        Self::Memory(MemoryStore::new())
    }

    /// Fetch one record. Backend failures are swallowed into `None`.
    pub async fn get(&self, username: &str) -> Option<UserRecord> {
        match self {
            Self::File(store) => store.get(username).await,
            Self::Supabase(store) => store.get(username).await,
            Self::Memory(store) => store.get(username),
        }
    }

    /// Persist, replacing any prior value for the key. Last writer wins;
    /// concurrent writes to the same key are not merged.
    pub async fn upsert(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        match self {
            Self::File(store) => store.upsert(username, record).await,
            Self::Supabase(store) => store.upsert(username, record).await,
            Self::Memory(store) => store.upsert(username, record),
        }
    }
}
