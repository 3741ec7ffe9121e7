//! Handler trait and type erasure.
//!
//! # How handlers are stored
//!
//! The router holds handlers of *different* types in one table, and every
//! middleware layer wraps "whatever comes next" without knowing its concrete
//! type. Both need a single uniform handler type, so concrete handlers are
//! hidden behind a trait object (`dyn ErasedHandler`) inside [`BoxedHandler`].
//!
//! ```text
//! async fn get_user(req: Request) -> Response { … }   ← user writes this
//!        ↓ get_user.into_boxed_handler()
//! BoxedHandler(Arc::new(FnHandler(get_user)))         ← shared, type-erased
//!        ↓ middleware.wrap(boxed)
//! BoxedHandler(…)                                     ← still one type
//!        ↓ handler.call(req) at request time
//! Box::pin(async { get_user(req).await.into_response() })
//! ```
//!
//! Each layer costs one `Arc` clone and one virtual call per request.

use std::fmt;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::request::Request;
use crate::response::{IntoResponse, Response};

// ── Internal types ────────────────────────────────────────────────────────────

/// A heap-allocated, type-erased future that resolves to a [`Response`].
///
/// `Send + 'static` so hyper can drive it from any worker thread.
pub type BoxFuture = Pin<Box<dyn Future<Output = Response> + Send + 'static>>;

/// Internal dispatch interface.
pub(crate) trait ErasedHandler {
    fn call(&self, req: Request) -> BoxFuture;
}

// ── BoxedHandler ──────────────────────────────────────────────────────────────

/// A type-erased handler shared across concurrent requests.
///
/// This is what middleware receives as `next` and what it hands back. Cloning
/// is one atomic increment; the handler itself is never copied.
#[derive(Clone)]
pub struct BoxedHandler(Arc<dyn ErasedHandler + Send + Sync + 'static>);

impl BoxedHandler {
    pub(crate) fn new(inner: impl ErasedHandler + Send + Sync + 'static) -> Self {
        Self(Arc::new(inner))
    }

    /// Runs the handler on `req`.
    pub fn call(&self, req: Request) -> BoxFuture {
        self.0.call(req)
    }

    /// Whether both values point at the same underlying handler.
    pub fn ptr_eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for BoxedHandler {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("BoxedHandler")
    }
}

// ── Public Handler trait ──────────────────────────────────────────────────────

/// Anything that can serve a request.
///
/// Automatically satisfied for every `async fn` (or closure returning a
/// future) with the shape:
///
/// ```text
/// async fn name(req: Request) -> impl IntoResponse
/// ```
///
/// [`BoxedHandler`] and [`Router`](crate::Router) implement it as well, which
/// is what lets a [`Chain`](crate::middleware::Chain) wrap either.
pub trait Handler: Send + Sync + 'static {
    fn into_boxed_handler(self) -> BoxedHandler;
}

impl<F, Fut, R> Handler for F
where
    F: Fn(Request) -> Fut + Send + Sync + 'static,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn into_boxed_handler(self) -> BoxedHandler {
        BoxedHandler::new(FnHandler(self))
    }
}

impl Handler for BoxedHandler {
    fn into_boxed_handler(self) -> BoxedHandler {
        self
    }
}

// ── Concrete wrapper ──────────────────────────────────────────────────────────

/// Newtype holding a concrete handler `F`, bridging it to [`ErasedHandler`].
struct FnHandler<F>(F);

impl<F, Fut, R> ErasedHandler for FnHandler<F>
where
    F: Fn(Request) -> Fut + Send + Sync,
    Fut: Future<Output = R> + Send + 'static,
    R: IntoResponse + Send + 'static,
{
    fn call(&self, req: Request) -> BoxFuture {
        let fut = (self.0)(req);
        Box::pin(async move { fut.await.into_response() })
    }
}
