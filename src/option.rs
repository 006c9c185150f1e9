use std::fs;
use std::net::{Ipv4Addr, SocketAddrV4};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

pub const DEFAULT_LISTEN_ADDR: Ipv4Addr = Ipv4Addr::UNSPECIFIED;
pub const DEFAULT_LISTEN_PORT: u16 = 8080;
pub const DEFAULT_BACKLOG: i32 = 16;
pub const DEFAULT_READ_BUFFER_SIZE: usize = 4096;
pub const DEFAULT_LOG_LEVEL: &str = "info";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct ServerOption {
    #[serde(default = "listen_addr_default")]
    pub listen_addr: String,
    #[serde(default = "listen_port_default")]
    pub listen_port: u16,
    #[serde(default = "backlog_default")]
    pub backlog: i32,
    #[serde(default = "read_buffer_size_default")]
    pub read_buffer_size: usize,
    #[serde(default = "loglevel_default")]
    pub log_level: String,
}

impl Default for ServerOption {
    fn default() -> Self {
        ServerOption {
            listen_addr: listen_addr_default(),
            listen_port: listen_port_default(),
            backlog: backlog_default(),
            read_buffer_size: read_buffer_size_default(),
            log_level: loglevel_default(),
        }
    }
}

impl ServerOption {
    pub fn from_json(content: &str) -> Result<Self, ConfigError> {
        let opts: ServerOption = serde_json::from_str(content)?;
        opts.validate()?;
        Ok(opts)
    }

    pub fn load(path: &str) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        Self::from_json(&content)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        self.socket_addr()?;
        if self.backlog < 1 {
            return Err(ConfigError::Backlog(self.backlog));
        }
        // one byte of the buffer is never filled by a read
        if self.read_buffer_size < 2 {
            return Err(ConfigError::ReadBufferSize(self.read_buffer_size));
        }
        Ok(())
    }

    pub fn socket_addr(&self) -> Result<SocketAddrV4, ConfigError> {
        let ip: Ipv4Addr = self
            .listen_addr
            .parse()
            .map_err(|_| ConfigError::ListenAddr(self.listen_addr.clone()))?;
        Ok(SocketAddrV4::new(ip, self.listen_port))
    }
}

fn listen_addr_default() -> String {
    DEFAULT_LISTEN_ADDR.to_string()
}

fn listen_port_default() -> u16 {
    DEFAULT_LISTEN_PORT
}

fn backlog_default() -> i32 {
    DEFAULT_BACKLOG
}

fn read_buffer_size_default() -> usize {
    DEFAULT_READ_BUFFER_SIZE
}

fn loglevel_default() -> String {
    String::from(DEFAULT_LOG_LEVEL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_fixed_binding() {
        let opts = ServerOption::default();
        assert_eq!(opts.socket_addr().unwrap(), "0.0.0.0:8080".parse().unwrap());
        assert_eq!(opts.backlog, 16);
        assert_eq!(opts.read_buffer_size, 4096);
        assert_eq!(opts.log_level, "info");
    }

    #[test]
    fn empty_object_is_all_defaults() {
        let opts = ServerOption::from_json("{}").unwrap();
        assert_eq!(opts, ServerOption::default());
    }

    #[test]
    fn camel_case_fields() {
        let opts = ServerOption::from_json(
            r#"{"listenAddr": "127.0.0.1", "listenPort": 9000, "readBufferSize": 64, "logLevel": "debug"}"#,
        )
        .unwrap();
        assert_eq!(opts.socket_addr().unwrap(), "127.0.0.1:9000".parse().unwrap());
        assert_eq!(opts.read_buffer_size, 64);
        assert_eq!(opts.backlog, DEFAULT_BACKLOG);
        assert_eq!(opts.log_level, "debug");
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            ServerOption::from_json(r#"{"listenAddr": "::1"}"#),
            Err(ConfigError::ListenAddr(_))
        ));
        assert!(matches!(
            ServerOption::from_json(r#"{"backlog": 0}"#),
            Err(ConfigError::Backlog(0))
        ));
        assert!(matches!(
            ServerOption::from_json(r#"{"readBufferSize": 1}"#),
            Err(ConfigError::ReadBufferSize(1))
        ));
        assert!(matches!(
            ServerOption::from_json(r#"{"listenPort": 70000}"#),
            Err(ConfigError::Parse(_))
        ));
        assert!(matches!(
            ServerOption::from_json(r#"{"mode": "client"}"#),
            Err(ConfigError::Parse(_))
        ));
    }

    #[test]
    fn missing_file() {
        let err = ServerOption::load("/nonexistent/oneshot-http.json").unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }
}
