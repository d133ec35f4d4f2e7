//! Liveness endpoint.
//!
//! This is the only contract the desktop launcher consumes: a fixed
//! success payload with no authentication requirement.

use crate::api::models::Ack;
use axum::Json;

#[utoipa::path(
    get,
    path = "/api/health/",
    tag = "health",
    summary = "Liveness check",
    responses(
        (status = 200, description = "Server is up", body = Ack),
    )
)]
pub async fn health() -> Json<Ack> {
    Json(Ack::ok())
}
