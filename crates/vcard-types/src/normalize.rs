use chrono::{SecondsFormat, Utc};
use serde_json::Value;

use crate::card::card_for;
use crate::models::{CardData, PendingWithdrawal, Transaction, UserProfile, UserRecord};

const PLACEHOLDER_FIRST_NAME: &str = "BYBIT";
const PLACEHOLDER_LAST_NAME: &str = "VC User";

/// Signup bonus seeded into every brand-new record.
const WELCOME_AMOUNT: f64 = 5.0;
const WELCOME_CCY: &str = "USDT";

fn default_profile() -> UserProfile {
    UserProfile {
        first_name: PLACEHOLDER_FIRST_NAME.to_string(),
        last_name: PLACEHOLDER_LAST_NAME.to_string(),
        phone: String::new(),
        email: String::new(),
        country: String::new(),
    }
}

/// Freshly seeded record for a username: placeholder profile, zero balance,
/// inactive synthesized card, one welcome-bonus transaction, all flags off.
/// "Now" is captured once per call.
pub fn default_record(username: &str) -> UserRecord {
    let now = Utc::now();
    let now_ms = now.timestamp_millis();
    UserRecord {
        profile: default_profile(),
        balance: 0.0,
        card_active: false,
        card: card_for(username),
        txs: vec![Transaction {
            id: format!("welcome-{now_ms}"),
            kind: "reward".to_string(),
            amount: WELCOME_AMOUNT,
            ccy: WELCOME_CCY.to_string(),
            ts: now.to_rfc3339_opts(SecondsFormat::Millis, true),
            status: "Welcome bonus".to_string(),
            merchant: None,
            network: None,
        }],
        pending_withdrawals: Vec::new(),
        created_at: now_ms,
        gpay: false,
        apay: false,
        bybit_linked: false,
        onboarded: false,
    }
}

fn trimmed_string(value: Option<&Value>) -> Option<String> {
    value.and_then(Value::as_str).map(|s| s.trim().to_string())
}

fn string_or(value: Option<&Value>, fallback: String) -> String {
    value
        .and_then(Value::as_str)
        .map(str::to_string)
        .unwrap_or(fallback)
}

/// Field-granular profile coercion: each sub-field is independently taken
/// from the input when it is a string (trimmed), otherwise falls back to
/// its placeholder default. A non-object input yields the full default.
pub fn normalize_profile(input: Option<&Value>) -> UserProfile {
    let base = default_profile();
    let Some(v) = input else { return base };
    UserProfile {
        first_name: trimmed_string(v.get("firstName")).unwrap_or(base.first_name),
        last_name: trimmed_string(v.get("lastName")).unwrap_or(base.last_name),
        phone: trimmed_string(v.get("phone")).unwrap_or(base.phone),
        email: trimmed_string(v.get("email")).unwrap_or(base.email),
        country: trimmed_string(v.get("country")).unwrap_or(base.country),
    }
}

/// Total coercion of arbitrary JSON into a canonical record. Never fails:
/// each field is taken from the input only when its JSON type matches and
/// falls back to the freshly seeded default otherwise. The fallback is per
/// field, never whole-object. Malformed `txs` / `pendingWithdrawals`
/// elements are dropped, not repaired.
pub fn normalize_record(username: &str, input: Option<&Value>) -> UserRecord {
    let mut record = default_record(username);
    let Some(v) = input.filter(|v| !v.is_null()) else {
        return record;
    };

    record.profile = normalize_profile(v.get("profile"));

    if let Some(balance) = v.get("balance").and_then(Value::as_f64) {
        record.balance = balance;
    }
    if let Some(active) = v.get("cardActive").and_then(Value::as_bool) {
        record.card_active = active;
    }

    // Caller-supplied card fields win over the synthesized ones when they
    // are strings. Type-checked only; pan/exp/cvv formats are not enforced.
    if let Some(card) = v.get("card").filter(|c| c.is_object()) {
        let base = record.card.clone();
        record.card = CardData {
            pan: string_or(card.get("pan"), base.pan),
            exp: string_or(card.get("exp"), base.exp),
            cvv: string_or(card.get("cvv"), base.cvv),
            last4: string_or(card.get("last4"), base.last4),
        };
    }

    if let Some(items) = v.get("txs").and_then(Value::as_array) {
        record.txs = items
            .iter()
            .filter_map(|item| serde_json::from_value::<Transaction>(item.clone()).ok())
            .collect();
    }
    if let Some(items) = v.get("pendingWithdrawals").and_then(Value::as_array) {
        record.pending_withdrawals = items
            .iter()
            .filter_map(|item| serde_json::from_value::<PendingWithdrawal>(item.clone()).ok())
            .collect();
    }

    if let Some(created_at) = v.get("createdAt").and_then(Value::as_f64) {
        record.created_at = created_at as i64;
    }
    if let Some(flag) = v.get("gpay").and_then(Value::as_bool) {
        record.gpay = flag;
    }
    if let Some(flag) = v.get("apay").and_then(Value::as_bool) {
        record.apay = flag;
    }
    if let Some(flag) = v.get("bybitLinked").and_then(Value::as_bool) {
        record.bybit_linked = flag;
    }
    if let Some(flag) = v.get("onboarded").and_then(Value::as_bool) {
        record.onboarded = flag;
    }

    record
}
