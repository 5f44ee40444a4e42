use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
    http::StatusCode,
};
use serde_json::Value;
use tracing::error;

use vcard_types::api::{ApiError, UpsertAck};
use vcard_types::models::UserRecord;

use crate::AppState;

/// GET /user/{username} — fetch-or-create. Always 200: a missing record is
/// lazily seeded, and a failed seed persist still returns the fresh record.
pub async fn get_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
) -> Json<UserRecord> {
    Json(state.service.fetch_or_create(&username).await)
}

/// POST /user/{username} — normalize the payload server-side and replace
/// the stored record. The body must decode to a JSON object or array;
/// anything else is rejected before normalization.
pub async fn post_user(
    State(state): State<AppState>,
    Path(username): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> Result<Json<UpsertAck>, (StatusCode, Json<ApiError>)> {
    let Ok(Json(payload)) = body else {
        return Err((StatusCode::BAD_REQUEST, Json(ApiError::new("missing body"))));
    };
    if !payload.is_object() && !payload.is_array() {
        return Err((StatusCode::BAD_REQUEST, Json(ApiError::new("missing body"))));
    }

    match state.service.upsert(&username, &payload).await {
        Ok(_) => Ok(Json(UpsertAck { ok: true })),
        Err(e) => {
            error!("failed to save record for {username}: {e}");
            Err((
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ApiError::new("failed to save")),
            ))
        }
    }
}
