use std::collections::HashMap;
use std::sync::Mutex;

use vcard_types::models::UserRecord;

use crate::error::StoreError;

/// In-memory store so tests (and callers wiring up the service directly)
/// can inject a backend without touching disk or network.
#[derive(Default)]
pub struct MemoryStore {
    users: Mutex<HashMap<String, UserRecord>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, username: &str) -> Option<UserRecord> {
        self.lock().get(username).cloned()
    }

    pub fn upsert(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        self.lock().insert(username.to_string(), record.clone());
        Ok(())
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, HashMap<String, UserRecord>> {
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vcard_types::normalize::normalize_record;

    #[test]
    fn upsert_replaces_prior_value() {
        let store = MemoryStore::new();
        assert!(store.get("alice").is_none());

        let first = normalize_record("alice", None);
        store.upsert("alice", &first).unwrap();
        assert_eq!(store.get("alice").unwrap(), first);

        let mut second = first.clone();
        second.balance = 99.0;
        store.upsert("alice", &second).unwrap();
        assert_eq!(store.get("alice").unwrap().balance, 99.0);
    }
}
