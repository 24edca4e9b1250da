//! Kubernetes health-check handlers.
//!
//! | Probe | Path | Question |
//! |---|---|---|
//! | **Liveness** | `/healthz` | Is the process alive? Failure → restart. |
//! | **Readiness** | `/readyz` | Can the pod serve traffic? Failure → pulled from load-balancer. |
//!
//! Both are registered by [`app`](crate::app).

use crate::{Request, Response};

pub const LIVENESS_PATH: &str = "/healthz";
pub const READINESS_PATH: &str = "/readyz";

/// Always `200 OK` with body `"ok"`. No dependencies.
pub async fn liveness(_req: Request) -> Response {
    Response::text("ok")
}

/// `200 OK` with body `"ready"`.
///
/// The stores are opened before the listener is bound, so once this can be
/// reached the service can take traffic.
pub async fn readiness(_req: Request) -> Response {
    Response::text("ready")
}
