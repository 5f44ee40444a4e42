use serde::{Deserialize, Serialize};

// -- Record upsert --

#[derive(Debug, Serialize, Deserialize)]
pub struct UpsertAck {
    pub ok: bool,
}

// -- Errors --

#[derive(Debug, Serialize, Deserialize)]
pub struct ApiError {
    pub error: String,
}

impl ApiError {
    pub fn new(message: &str) -> Self {
        Self {
            error: message.to_string(),
        }
    }
}
