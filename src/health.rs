//! Kubernetes health-check handlers.
//!
//! | Probe | Path |
//! |---|---|
//! | Liveness | `/healthz` |
//! | Readiness | `/readyz` |
//!
//! Readiness does not probe the portal: the API is useful (help, validation
//! errors) even while the portal is down.

use crate::http::{Request, Response};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Always `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
