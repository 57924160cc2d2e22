//! Cross-origin resource sharing for every origin.

use crate::method::Method;
use crate::request::Request;
use crate::response::Response;
use crate::status::Status;

use super::{BoxFuture, Middleware, Next};

/// Permissive CORS: any origin, the API's methods, any requested header.
///
/// `OPTIONS` requests never reach a handler; they are answered here with
/// `204 No Content` and the preflight headers.
#[derive(Clone, Debug)]
pub struct Cors {
    allow_methods: &'static str,
    max_age: u32,
}

impl Cors {
    pub fn permissive() -> Self {
        Self { allow_methods: "GET, POST, PUT, DELETE, OPTIONS", max_age: 3600 }
    }

    pub fn max_age(mut self, seconds: u32) -> Self {
        self.max_age = seconds;
        self
    }

    fn preflight(&self, req: &Request) -> Response {
        let allow_headers = req.header("access-control-request-headers").unwrap_or("*");
        Response::builder()
            .status(Status::NoContent)
            .header("access-control-allow-methods", self.allow_methods)
            .header("access-control-allow-headers", allow_headers)
            .header("access-control-max-age", &self.max_age.to_string())
            .header("vary", "access-control-request-headers")
            .no_body()
    }
}

impl Default for Cors {
    fn default() -> Self { Self::permissive() }
}

impl Middleware for Cors {
    fn call<'a>(&'a self, req: Request, next: Next<'a>) -> BoxFuture<'a> {
        Box::pin(async move {
            let mut res = if req.method() == Some(Method::Options) {
                self.preflight(&req)
            } else {
                next.run(req).await
            };
            res.set_header("access-control-allow-origin", "*");
            res
        })
    }
}
