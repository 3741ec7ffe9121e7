//! The user API: routes plus the middleware chain in front of them.
//!
//! ```text
//! request → RequireAuth → RequestLogger → Router ─ /api/v1 ─ GET /users/{user_id}
//! ```
//!
//! Authorization runs before the access log, so rejected requests never show
//! up in it.

use crate::config::Config;
use crate::error::Error;
use crate::handler::BoxedHandler;
use crate::middleware::{Chain, RequestLogger, RequireAuth};
use crate::request::Request;
use crate::router::Router;
use crate::server::Server;

/// Owns the configuration and assembles the service from it.
#[derive(Clone, Debug)]
pub struct ApiServer {
    config: Config,
}

impl ApiServer {
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Middleware in execution order: authorization, then access log.
    pub fn middleware(&self) -> Chain {
        Chain::new()
            .with(RequireAuth::new(self.config.auth_token.clone()))
            .with(RequestLogger)
    }

    /// The fully composed handler every request goes through.
    pub fn app(&self) -> BoxedHandler {
        self.middleware().then(routes())
    }

    /// Binds the configured address and serves until the process exits.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the address cannot be bound.
    pub async fn run(self) -> Result<(), Error> {
        let app = self.app();
        Server::bind(self.config.addr).serve(app).await
    }
}

/// `GET /api/v1/users/{user_id}`.
pub fn routes() -> Router {
    let users = Router::new().get("/users/{user_id}", get_user);
    Router::new().nest("/api/v1", users)
}

async fn get_user(req: Request) -> String {
    format!("User ID: {}", req.param("user_id").unwrap_or_default())
}
