/// GET /health — liveness check (no auth).
pub async fn health() -> &'static str {
    "ok"
}
