//! Unified error type.

/// The error type returned by quill's fallible operations.
///
/// Application-level errors (400, 404, etc.) are expressed as HTTP
/// [`Response`](crate::Response) values, not as `Error`s. This type surfaces
/// infrastructure failures: reading configuration, binding to a port, or
/// accepting a connection.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("config: {0}")]
    Config(#[from] envy::Error),

    #[error("invalid listen address `{addr}`: {source}")]
    Addr {
        addr: String,
        #[source]
        source: std::net::AddrParseError,
    },
}
