//! Middleware layer.
//!
//! A middleware wraps the handler that comes after it and decides whether,
//! and when, to call it. Cross-cutting concerns live here: authorization
//! checks and the access log.
//!
//! Middleware are composed with a [`Chain`]. The first middleware in the
//! chain is the outermost layer: it sees the request first and the response
//! last. Any middleware may answer on its own without calling `next`; nothing
//! after it in the chain runs for that request.
//!
//! ```rust
//! use tollgate::middleware::{Chain, RequestLogger, RequireAuth};
//! use tollgate::{Request, Router};
//!
//! async fn hello(_req: Request) -> &'static str { "hello" }
//!
//! let app = Chain::new()
//!     .with(RequireAuth::new("Bearer token"))
//!     .with(RequestLogger)
//!     .then(Router::new().get("/", hello));
//! ```

mod auth;
mod chain;
mod logger;

pub use auth::{DEFAULT_TOKEN, RequireAuth};
pub use chain::Chain;
pub use logger::{ACCESS_TARGET, RequestLogger};

use crate::handler::BoxedHandler;

/// A transformer from handler to handler.
///
/// Implementations hold only immutable configuration; `wrap` is called once
/// per chain composition, never per request.
///
/// Plain closures work too:
///
/// ```rust
/// use tollgate::middleware::Chain;
/// use tollgate::BoxedHandler;
///
/// let passthrough = |next: BoxedHandler| next;
/// let chain = Chain::new().with(passthrough);
/// # let _ = chain;
/// ```
pub trait Middleware: Send + Sync + 'static {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler;
}

impl<F> Middleware for F
where
    F: Fn(BoxedHandler) -> BoxedHandler + Send + Sync + 'static,
{
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self(next)
    }
}
