//! Process configuration from `QUILL_*` environment variables.
//!
//! | Variable | Default |
//! |---|---|
//! | `QUILL_HOST` | `0.0.0.0` |
//! | `QUILL_PORT` | `5002` |
//! | `QUILL_MAX_BODY_BYTES` | `1048576` |
//!
//! Log filtering is separate: `RUST_LOG`, read by the subscriber in `main`.

use std::net::{IpAddr, SocketAddr};

use serde::Deserialize;

use crate::error::Error;
use crate::server::DEFAULT_MAX_BODY_BYTES;

const PREFIX: &str = "QUILL_";

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct Config {
    #[serde(default = "default_host")]
    pub host: String,
    #[serde(default = "default_port")]
    pub port: u16,
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "0.0.0.0".to_owned()
}

fn default_port() -> u16 {
    5002
}

fn default_max_body_bytes() -> usize {
    DEFAULT_MAX_BODY_BYTES
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

impl Config {
    /// Reads the process environment.
    pub fn from_env() -> Result<Self, Error> {
        Ok(envy::prefixed(PREFIX).from_env()?)
    }

    /// Reads `(name, value)` pairs as if they were the environment.
    pub fn from_vars<I, K, V>(vars: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let vars = vars.into_iter().map(|(k, v)| (k.into(), v.into()));
        Ok(envy::prefixed(PREFIX).from_iter(vars)?)
    }

    /// The socket address to listen on. `host` must be an IP literal.
    pub fn listen_addr(&self) -> Result<SocketAddr, Error> {
        let ip: IpAddr = self.host.parse().map_err(|source| Error::Addr {
            addr: self.host.clone(),
            source,
        })?;
        Ok(SocketAddr::new(ip, self.port))
    }
}
