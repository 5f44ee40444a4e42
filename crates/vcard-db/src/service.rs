use serde_json::Value;
use tracing::warn;

use vcard_types::models::UserRecord;
use vcard_types::normalize::normalize_record;

use crate::error::StoreError;
use crate::store::StoreBackend;

/// Orchestrates reads and writes against the configured backend. The
/// username path segment is used verbatim as the storage key (no trimming,
/// no case folding), so keys differing only in case are distinct users.
pub struct RecordService {
    backend: StoreBackend,
}

impl RecordService {
    pub fn new(backend: StoreBackend) -> Self {
        Self { backend }
    }

    /// Fetch the record for a username, lazily creating and persisting a
    /// seeded default on first access. Persisting the fresh default is
    /// best-effort: the record is returned even when the write fails.
    pub async fn fetch_or_create(&self, username: &str) -> UserRecord {
        if let Some(record) = self.backend.get(username).await {
            return record;
        }
        let fresh = normalize_record(username, None);
        if let Err(e) = self.backend.upsert(username, &fresh).await {
            warn!("failed to persist default record for {username}: {e}");
        }
        fresh
    }

    /// Normalize an untrusted payload and persist it as the new record.
    pub async fn upsert(&self, username: &str, payload: &Value) -> Result<UserRecord, StoreError> {
        let record = normalize_record(username, Some(payload));
        self.backend.upsert(username, &record).await?;
        Ok(record)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use vcard_types::card::card_for;

    fn service() -> RecordService {
        RecordService::new(StoreBackend::memory())
    }

    #[tokio::test]
    async fn fetch_or_create_is_idempotent() {
        let service = service();

        let first = service.fetch_or_create("alice").await;
        assert_eq!(first.txs.len(), 1);
        assert_eq!(first.txs[0].kind, "reward");
        assert_eq!(first.txs[0].amount, 5.0);
        assert_eq!(first.txs[0].ccy, "USDT");

        // The stored record comes back; no second seed tx appears.
        let second = service.fetch_or_create("alice").await;
        assert_eq!(second, first);
    }

    #[tokio::test]
    async fn upsert_then_fetch_returns_the_normalized_record() {
        let service = service();

        let payload = json!({
            "balance": 150,
            "profile": {"firstName": "Jane"},
            "txs": [
                {"id": "t1", "type": "topup", "amount": 150, "ccy": "USDT",
                 "ts": "2026-01-02T03:04:05.000Z", "status": "Completed"},
                {"id": "broken"},
            ],
        });
        let written = service.upsert("bob", &payload).await.unwrap();
        let fetched = service.fetch_or_create("bob").await;
        assert_eq!(fetched, written);

        assert_eq!(fetched.balance, 150.0);
        assert_eq!(fetched.profile.first_name, "Jane");
        assert_eq!(fetched.profile.last_name, "VC User");
        assert_eq!(fetched.txs.len(), 1);
        assert_eq!(fetched.card, card_for("bob"));
    }

    #[tokio::test]
    async fn invalid_scalar_falls_back_to_default_on_write() {
        let service = service();

        service
            .upsert("carol", &json!({"balance": "not-a-number", "onboarded": true}))
            .await
            .unwrap();

        let record = service.fetch_or_create("carol").await;
        assert_eq!(record.balance, 0.0);
        assert!(record.onboarded);
    }

    #[tokio::test]
    async fn usernames_are_case_sensitive_keys() {
        let service = service();

        service.upsert("Dave", &json!({"balance": 10})).await.unwrap();
        let lower = service.fetch_or_create("dave").await;
        let upper = service.fetch_or_create("Dave").await;

        assert_eq!(upper.balance, 10.0);
        assert_eq!(lower.balance, 0.0);
        assert_ne!(lower.card, upper.card);
    }
}
