//! HTTP server.
//!
//! One tokio task per accepted connection; hyper calls the service once per
//! request on that connection. Every request goes through the same composed
//! [`BoxedHandler`], which is shared, never rebuilt. There is no shutdown
//! path: [`Server::serve`] only returns if the listener cannot be bound.

use std::convert::Infallible;
use std::future::Future;
use std::io;
use std::time::Duration;

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;
use hyper::service::service_fn;
use hyper_util::rt::{TokioExecutor, TokioIo};
use hyper_util::server::conn::auto::Builder as ConnBuilder;
use tokio::net::TcpListener;
use tracing::{debug, error, info};

use crate::error::Error;
use crate::handler::{BoxedHandler, Handler};
use crate::request::Request;
use crate::response::Response;

/// Pause after a failed `accept` (e.g. out of file descriptors) before
/// trying again.
const ACCEPT_BACKOFF: Duration = Duration::from_millis(100);

/// The HTTP server.
#[derive(Debug)]
pub struct Server {
    addr: String,
}

impl Server {
    /// Configures the server to bind to `addr` when [`serve`](Server::serve)
    /// is called.
    ///
    /// `addr` is `host:port`; host names are resolved at bind time. A bare
    /// `:port` listens on every interface.
    ///
    /// ```rust,no_run
    /// use tollgate::Server;
    /// let server = Server::bind("0.0.0.0:8080");
    /// ```
    pub fn bind(addr: impl Into<String>) -> Self {
        let addr = addr.into();
        let addr = if addr.starts_with(':') { format!("0.0.0.0{addr}") } else { addr };
        Self { addr }
    }

    pub fn addr(&self) -> &str {
        &self.addr
    }

    /// Binds the listener and serves `app` on it forever.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the address cannot be bound.
    pub async fn serve(self, app: impl Handler) -> Result<(), Error> {
        let listener = TcpListener::bind(&self.addr).await?;
        Self::serve_on(listener, app).await
    }

    /// Serves `app` on an already bound listener.
    pub async fn serve_on(listener: TcpListener, app: impl Handler) -> Result<(), Error> {
        let app = app.into_boxed_handler();
        let local_addr = listener.local_addr()?;

        info!(addr = %local_addr, "server has started");

        loop {
            let (stream, remote_addr) = accept_retrying(|| listener.accept()).await;

            let app = app.clone();
            // TokioIo adapts tokio's AsyncRead/AsyncWrite to the hyper IO traits.
            let io = TokioIo::new(stream);

            tokio::spawn(async move {
                let svc = service_fn(move |req| dispatch(app.clone(), req));

                // `auto::Builder` handles both HTTP/1.1 and HTTP/2, whatever
                // the client speaks.
                if let Err(e) = ConnBuilder::new(TokioExecutor::new())
                    .serve_connection(io, svc)
                    .await
                {
                    error!(peer = %remote_addr, "connection error: {e}");
                }
            });
        }
    }
}

/// Runs `accept` until it succeeds, sleeping [`ACCEPT_BACKOFF`] after each
/// failure.
async fn accept_retrying<T, F, Fut>(mut accept: F) -> T
where
    F: FnMut() -> Fut,
    Fut: Future<Output = io::Result<T>>,
{
    loop {
        match accept().await {
            Ok(v) => return v,
            Err(e) => {
                error!("accept error: {e}");
                tokio::time::sleep(ACCEPT_BACKOFF).await;
            }
        }
    }
}

// ── Request dispatch ──────────────────────────────────────────────────────────

/// Reads one request, runs it through `app`, and converts the response.
///
/// The error type is [`Infallible`]: every failure becomes a response, so
/// hyper never sees an error.
async fn dispatch(
    app: BoxedHandler,
    req: hyper::Request<hyper::body::Incoming>,
) -> Result<http::Response<Full<Bytes>>, Infallible> {
    let response = match Request::from_hyper(req).await {
        Ok(req) => app.call(req).await,
        Err(e) => {
            debug!("failed to read request body: {e}");
            Response::status(StatusCode::BAD_REQUEST)
        }
    };

    Ok(response.into_inner())
}
