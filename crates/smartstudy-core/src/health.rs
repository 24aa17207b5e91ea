use axum::http::StatusCode;

/// `GET /healthz` — liveness.
pub async fn healthz() -> StatusCode {
    StatusCode::OK
}

/// `GET /readyz` — readiness. A plain OK is enough here: the service is
/// single-process and refuses to start without a database connection.
pub async fn readyz() -> StatusCode {
    StatusCode::OK
}
