//! Process configuration.
//!
//! Read from `TOLLGATE_*` environment variables with `envy`, after loading a
//! `.env` file if one exists:
//!
//! | Variable | Default | Meaning |
//! |---|---|---|
//! | `TOLLGATE_ADDR` | `0.0.0.0:8080` | `host:port` to listen on |
//! | `TOLLGATE_AUTH_TOKEN` | `Bearer token` | exact `Authorization` value accepted |

use serde::Deserialize;

use crate::error::Error;
use crate::middleware::DEFAULT_TOKEN;

const ENV_PREFIX: &str = "TOLLGATE_";

/// Server configuration, passed explicitly to [`ApiServer::new`](crate::ApiServer::new).
#[derive(Clone, Debug, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "default_addr")]
    pub addr: String,

    #[serde(default = "default_auth_token")]
    pub auth_token: String,
}

fn default_addr() -> String {
    "0.0.0.0:8080".to_owned()
}

fn default_auth_token() -> String {
    DEFAULT_TOKEN.to_owned()
}

impl Default for Config {
    fn default() -> Self {
        Self { addr: default_addr(), auth_token: default_auth_token() }
    }
}

impl Config {
    /// Loads `.env` (optional), then the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if a variable is present but unusable.
    pub fn from_env() -> Result<Self, Error> {
        dotenvy::dotenv().ok();
        Ok(envy::prefixed(ENV_PREFIX).from_env()?)
    }

    /// Same as [`from_env`](Config::from_env), over an explicit set of variables.
    pub fn from_vars<I>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        Ok(envy::prefixed(ENV_PREFIX).from_iter(vars)?)
    }
}
