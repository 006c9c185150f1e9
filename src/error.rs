use std::io;

use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Setup,
    Connection,
}

/// Fatal failures of the accept-and-respond sequence. Display follows
/// `<operation>: <os cause>`.
#[derive(Debug, Error)]
pub enum ServeError {
    #[error("socket: {0}")]
    SocketCreation(io::Error),
    #[error("setsockopt(SO_REUSEADDR): {0}")]
    SocketConfiguration(io::Error),
    #[error("bind: {0}")]
    Bind(io::Error),
    #[error("listen: {0}")]
    Listen(io::Error),
    #[error("accept: {0}")]
    Accept(io::Error),
    #[error("read: {0}")]
    Read(io::Error),
}

impl ServeError {
    pub fn phase(&self) -> Phase {
        match self {
            ServeError::SocketCreation(_)
            | ServeError::SocketConfiguration(_)
            | ServeError::Bind(_)
            | ServeError::Listen(_) => Phase::Setup,
            ServeError::Accept(_) | ServeError::Read(_) => Phase::Connection,
        }
    }
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("read config file {path} failed: {source}")]
    Read {
        path: String,
        #[source]
        source: io::Error,
    },
    #[error("invalid config file: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("invalid listenAddr: {0}")]
    ListenAddr(String),
    #[error("invalid backlog: {0}, must be at least 1")]
    Backlog(i32),
    #[error("invalid readBufferSize: {0}, must be at least 2")]
    ReadBufferSize(usize),
}
