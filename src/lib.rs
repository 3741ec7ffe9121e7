//! # tollgate
//!
//! A minimal HTTP service with one resource endpoint behind an ordered
//! middleware chain.
//!
//! ## The shape
//!
//! ```text
//! request → Chain[RequireAuth, RequestLogger] → Router → handler → response
//! ```
//!
//! - A [`Handler`] turns a [`Request`] into a [`Response`].
//! - A [`Middleware`](middleware::Middleware) turns a handler into another
//!   handler.
//! - A [`Chain`](middleware::Chain) is an ordered list of middleware. The
//!   first one listed is the outermost layer and runs first.
//!
//! Composition happens once at startup. Every request then runs through the
//! same immutable, shared handler; nothing is rebuilt per request.
//!
//! ## Quick start
//!
//! ```rust,no_run
//! use tollgate::middleware::{Chain, RequestLogger, RequireAuth};
//! use tollgate::{Request, Router, Server};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), tollgate::Error> {
//!     let routes = Router::new().get("/users/{id}", get_user);
//!     let app = Chain::new()
//!         .with(RequireAuth::new("Bearer token"))
//!         .with(RequestLogger)
//!         .then(routes);
//!
//!     Server::bind("0.0.0.0:8080").serve(app).await
//! }
//!
//! async fn get_user(req: Request) -> String {
//!     format!("User ID: {}", req.param("id").unwrap_or_default())
//! }
//! ```

mod api;
mod config;
mod error;
mod handler;
mod request;
mod response;
mod router;
mod server;

pub mod middleware;

#[cfg(test)]
mod test_support;

pub use api::{ApiServer, routes};
pub use config::Config;
pub use error::Error;
pub use handler::{BoxFuture, BoxedHandler, Handler};
pub use request::Request;
pub use response::{IntoResponse, Response, ResponseBuilder};
pub use router::Router;
pub use server::Server;
