//! Ordered middleware composition.

use std::fmt;
use std::sync::Arc;

use super::Middleware;
use crate::handler::{BoxedHandler, Handler};

/// An ordered sequence of middleware.
///
/// `Chain::new().with(a).with(b).then(h)` builds `a(b(h))`: `a` is the
/// outermost layer. Order is exactly the order of the `with` calls; nothing
/// is reordered or deduplicated.
#[derive(Clone, Default)]
pub struct Chain {
    layers: Vec<Arc<dyn Middleware>>,
}

impl Chain {
    /// The empty chain. `Chain::new().then(h)` is `h` itself.
    pub fn new() -> Self {
        Self { layers: Vec::new() }
    }

    /// Appends `middleware` as the new innermost layer.
    pub fn with(mut self, middleware: impl Middleware) -> Self {
        self.layers.push(Arc::new(middleware));
        self
    }

    /// Appends every layer of `other` after the layers of `self`.
    pub fn append(mut self, other: Chain) -> Self {
        self.layers.extend(other.layers);
        self
    }

    pub fn len(&self) -> usize {
        self.layers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.layers.is_empty()
    }

    /// Composes the chain around `handler`.
    ///
    /// Layers are applied right to left, so the first middleware ends up
    /// outermost. Nothing runs here; every effect happens when the returned
    /// handler is called.
    pub fn then(&self, handler: impl Handler) -> BoxedHandler {
        self.layers
            .iter()
            .rev()
            .fold(handler.into_boxed_handler(), |next, layer| layer.wrap(next))
    }
}

/// A chain wraps like a single middleware, so chains nest inside chains.
impl Middleware for Chain {
    fn wrap(&self, next: BoxedHandler) -> BoxedHandler {
        self.then(next)
    }
}

impl FromIterator<Arc<dyn Middleware>> for Chain {
    fn from_iter<I: IntoIterator<Item = Arc<dyn Middleware>>>(iter: I) -> Self {
        Self { layers: iter.into_iter().collect() }
    }
}

impl fmt::Debug for Chain {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Chain").field("layers", &self.layers.len()).finish()
    }
}
