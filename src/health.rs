//! Liveness and readiness probe handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? |
//! | **Readiness** | `/readyz` | Can it serve traffic? |
//!
//! The post store lives in memory and is seeded before the listener opens,
//! so both probes answer unconditionally.

use crate::{Request, Response};

/// Always `200 OK` with body `"ok"`.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// Always `200 OK` with body `"ready"`.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
