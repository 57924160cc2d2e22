//! Per-request tracing span.

use std::time::Instant;

use tracing::{Instrument, error, info, info_span, warn};

use crate::request::Request;

use super::{BoxFuture, Middleware, Next};

/// Opens an `http.request` span for every request and logs its outcome.
///
/// Severity follows the status class: `info` below 400, `warn` for 4xx,
/// `error` for 5xx.
#[derive(Clone, Copy, Debug, Default)]
pub struct Trace;

impl Middleware for Trace {
    fn call<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a> {
        let span = info_span!("http.request", method = req.method_str(), path = %req.path());
        Box::pin(
            async move {
                let start = Instant::now();
                let res = next.run(req).await;
                let status = res.status_code();
                let latency_us = start.elapsed().as_micros() as u64;
                match status {
                    500..=u16::MAX => error!(status, latency_us, "request failed"),
                    400..=499 => warn!(status, latency_us, "request rejected"),
                    _ => info!(status, latency_us, "request handled"),
                }
                res
            }
            .instrument(span),
        )
    }
}
