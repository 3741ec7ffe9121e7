//! Access log.

use tracing::info;

use super::Middleware;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;

/// `tracing` target of access-log events, for filtering with `RUST_LOG`.
pub const ACCESS_TARGET: &str = "tollgate::access";

/// Emits one `info` event per request with its method and decoded path, then
/// delegates. The event fires before the next handler runs, so it carries no
/// status; the response is never inspected.
#[derive(Clone, Copy, Debug, Default)]
pub struct RequestLogger;

impl Middleware for RequestLogger {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        (move |req: Request| {
            info!(target: ACCESS_TARGET, "method: {}, path: {}", req.method(), req.decoded_path());
            next.call(req)
        })
        .into_boxed_handler()
    }
}
