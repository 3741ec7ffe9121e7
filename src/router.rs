//! Radix-tree request router.
//!
//! One tree per HTTP method. O(path-length) lookup. The router is itself a
//! [`Handler`], so it sits at the bottom of a middleware
//! [`Chain`](crate::middleware::Chain) as the terminal handler.

use std::collections::HashMap;
use std::future::ready;

use http::header::ALLOW;
use http::{HeaderValue, Method, StatusCode};
use matchit::Router as MatchitRouter;

use crate::handler::{BoxFuture, BoxedHandler, ErasedHandler, Handler};
use crate::request::{Request, percent_decode};
use crate::response::Response;

/// The application router.
///
/// Build it once at startup. Each registration returns `self` so calls chain
/// naturally.
pub struct Router {
    routes: HashMap<Method, MatchitRouter<BoxedHandler>>,
    nested: Vec<(String, Router)>,
}

/// Outcome of matching one method + path.
enum Lookup {
    Found(BoxedHandler, HashMap<String, String>),
    MethodNotAllowed(Vec<Method>),
    NotFound,
}

impl Router {
    pub fn new() -> Self {
        Self { routes: HashMap::new(), nested: Vec::new() }
    }

    /// Register a handler for a method + path pair. Returns `self` for chaining.
    ///
    /// Path parameters use `{name}` syntax; `req.param("name")` retrieves them.
    ///
    /// # Panics
    ///
    /// Panics if `path` is not a valid route or conflicts with one already
    /// registered for `method`.
    pub fn on(mut self, method: Method, path: &str, handler: impl Handler) -> Self {
        self.routes
            .entry(method)
            .or_default()
            .insert(path, handler.into_boxed_handler())
            .unwrap_or_else(|e| panic!("invalid route `{path}`: {e}"));
        self
    }

    /// Shorthand for `on(Method::GET, path, handler)`. `HEAD` requests for the
    /// same path are served by this handler too.
    pub fn get(self, path: &str, handler: impl Handler) -> Self {
        self.on(Method::GET, path, handler)
    }

    /// Mounts `router` under `prefix`.
    ///
    /// A request whose path starts with `prefix` followed by `/` is matched
    /// against `router` with the prefix removed. The request itself keeps its
    /// full path, so middleware above the router sees what the client sent.
    pub fn nest(mut self, prefix: &str, router: Router) -> Self {
        self.nested.push((prefix.trim_end_matches('/').to_owned(), router));
        self
    }

    fn lookup(&self, method: &Method, path: &str) -> Lookup {
        if let Some(found) = self.find(method, path) {
            return found;
        }
        if method == Method::HEAD {
            if let Some(found) = self.find(&Method::GET, path) {
                return found;
            }
        }

        let allowed = self.allowed(path);
        if !allowed.is_empty() {
            return Lookup::MethodNotAllowed(allowed);
        }

        for (prefix, router) in &self.nested {
            let Some(rest) = path.strip_prefix(prefix.as_str()) else { continue };
            if !rest.starts_with('/') {
                continue;
            }
            match router.lookup(method, rest) {
                Lookup::NotFound => continue,
                outcome => return outcome,
            }
        }

        Lookup::NotFound
    }

    /// Matches on the raw path; captured params are handed out decoded.
    fn find(&self, method: &Method, path: &str) -> Option<Lookup> {
        let matched = self.routes.get(method)?.at(path).ok()?;
        let params = matched.params.iter()
            .map(|(k, v)| (k.to_owned(), percent_decode(v).into_owned()))
            .collect();
        Some(Lookup::Found(matched.value.clone(), params))
    }

    /// Every method with a route matching `path`, sorted, `HEAD` implied by `GET`.
    fn allowed(&self, path: &str) -> Vec<Method> {
        let mut allowed: Vec<Method> = self.routes.iter()
            .filter(|(_, tree)| tree.at(path).is_ok())
            .map(|(method, _)| method.clone())
            .collect();
        if allowed.contains(&Method::GET) && !allowed.contains(&Method::HEAD) {
            allowed.push(Method::HEAD);
        }
        allowed.sort_by(|a, b| a.as_str().cmp(b.as_str()));
        allowed
    }
}

impl Default for Router {
    fn default() -> Self { Self::new() }
}

impl Handler for Router {
    fn into_boxed_handler(self) -> BoxedHandler {
        BoxedHandler::new(self)
    }
}

impl ErasedHandler for Router {
    fn call(&self, mut req: Request) -> BoxFuture {
        match self.lookup(req.method(), req.path()) {
            Lookup::Found(handler, params) => {
                req.set_params(params);
                handler.call(req)
            }
            Lookup::MethodNotAllowed(allowed) => Box::pin(ready(method_not_allowed(&allowed))),
            Lookup::NotFound => Box::pin(ready(not_found())),
        }
    }
}

fn not_found() -> Response {
    Response::builder()
        .status(StatusCode::NOT_FOUND)
        .text("404 page not found\n")
}

fn method_not_allowed(allowed: &[Method]) -> Response {
    let allow = allowed.iter().map(Method::as_str).collect::<Vec<_>>().join(", ");
    let builder = Response::builder().status(StatusCode::METHOD_NOT_ALLOWED);
    let builder = match HeaderValue::from_str(&allow) {
        Ok(value) => builder.header(ALLOW, value),
        Err(_) => builder,
    };
    builder.text("Method Not Allowed\n")
}
