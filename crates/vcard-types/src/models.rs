use serde::{Deserialize, Serialize};

/// Free-text profile fields. All values are stored trimmed; first/last name
/// get a fixed placeholder when a record is first created.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserProfile {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    pub country: String,
}

/// Synthesized card data. Fully determined by the username; stored copies
/// are a cache, not a source of truth.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CardData {
    pub pan: String,
    pub exp: String,
    pub cvv: String,
    pub last4: String,
}

/// A ledger entry. `kind` is one of "topup" / "withdraw" / "pay" / "reward"
/// by convention; the store does not enforce the set.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub amount: f64,
    pub ccy: String,
    pub ts: String,
    pub status: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub network: Option<String>,
}

/// A withdrawal request awaiting external settlement. Created once, never
/// transitioned by this service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingWithdrawal {
    pub id: String,
    pub amount: f64,
    pub ccy: String,
    pub ts: String,
    pub status: String,
}

/// The full per-user document, keyed externally by username.
/// `created_at` is epoch millis. Transactions are newest-first by
/// convention (callers prepend); the store never resorts them.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub profile: UserProfile,
    pub balance: f64,
    pub card_active: bool,
    pub card: CardData,
    pub txs: Vec<Transaction>,
    pub pending_withdrawals: Vec<PendingWithdrawal>,
    pub created_at: i64,
    pub gpay: bool,
    pub apay: bool,
    pub bybit_linked: bool,
    pub onboarded: bool,
}
