use axum::Json;
use chrono::{SecondsFormat, Utc};
use contracts::shared::api::HealthResponse;

/// GET /health — container liveness probe
pub async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        ok: true,
        ts: Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true),
    })
}
