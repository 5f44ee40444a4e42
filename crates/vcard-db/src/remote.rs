use std::time::Duration;

use reqwest::Client;
use serde_json::Value;
use tracing::warn;

use vcard_types::models::UserRecord;
use vcard_types::normalize::normalize_record;

use crate::error::StoreError;

/// A timeout is treated the same as any other transport failure: the call
/// degrades to not-found / write-failed instead of hanging the request.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Supabase (PostgREST) table backend. One logical `users` table with a
/// unique `username` key column and the remaining record fields as sibling
/// columns: the username is merged into the row on write and ignored by the
/// normalizer on read.
pub struct SupabaseStore {
    http: Client,
    url: String,
    key: String,
}

impl SupabaseStore {
    pub fn new(url: String, key: String) -> Result<Self, StoreError> {
        let http = Client::builder().timeout(REQUEST_TIMEOUT).build()?;
        Ok(Self {
            http,
            url: url.trim_end_matches('/').to_string(),
            key,
        })
    }

    fn table_endpoint(&self) -> String {
        format!("{}/rest/v1/users", self.url)
    }

    /// Point lookup by key. Any transport error, non-2xx status, or empty
    /// result reads as not-found; a remote outage never fails the caller.
    pub async fn get(&self, username: &str) -> Option<UserRecord> {
        let filter = format!("eq.{username}");
        let response = self
            .http
            .get(self.table_endpoint())
            .query(&[("select", "*"), ("username", filter.as_str())])
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .send()
            .await;

        let response = match response {
            Ok(response) => response,
            Err(e) => {
                warn!("supabase read for {username} failed: {e}");
                return None;
            }
        };
        if !response.status().is_success() {
            warn!("supabase read for {username} returned {}", response.status());
            return None;
        }

        let rows: Vec<Value> = response.json().await.ok()?;
        let row = rows.into_iter().next()?;
        Some(normalize_record(username, Some(&row)))
    }

    /// Upsert keyed on the username column. Full-row replace, not a
    /// partial update.
    pub async fn upsert(&self, username: &str, record: &UserRecord) -> Result<(), StoreError> {
        let mut row = serde_json::to_value(record)?;
        if let Some(columns) = row.as_object_mut() {
            columns.insert("username".to_string(), Value::String(username.to_string()));
        }

        self.http
            .post(self.table_endpoint())
            .query(&[("on_conflict", "username")])
            .header("apikey", &self.key)
            .bearer_auth(&self.key)
            .header("Prefer", "resolution=merge-duplicates")
            .json(&row)
            .send()
            .await?
            .error_for_status()?;
        Ok(())
    }
}
