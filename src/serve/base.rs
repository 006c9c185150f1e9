use std::fmt::{self, Display, Formatter};
use std::io::{self, Read, Write};
use std::net::{SocketAddr, TcpStream};

use crate::error::ServeError;
use crate::protocol::HttpResponse;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponsePart {
    Headers,
    Body,
}

impl Display for ResponsePart {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResponsePart::Headers => write!(f, "write(headers)"),
            ResponsePart::Body => write!(f, "write(body)"),
        }
    }
}

/// A write that did not reach the peer. Reported, never fatal.
#[derive(Debug)]
pub struct WriteFailure {
    pub part: ResponsePart,
    pub error: io::Error,
}

impl Display for WriteFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.part, self.error)
    }
}

pub struct AcceptedConnection {
    stream: TcpStream,
    peer: SocketAddr,
    buf: Vec<u8>,
    len: usize,
}

impl AcceptedConnection {
    pub fn new(stream: TcpStream, peer: SocketAddr, read_buffer_size: usize) -> Self {
        AcceptedConnection {
            stream,
            peer,
            buf: vec![0u8; read_buffer_size],
            len: 0,
        }
    }

    pub fn peer_addr(&self) -> SocketAddr {
        self.peer
    }

    /// Single read of at most `capacity - 1` bytes. A short or empty read is
    /// not an error.
    pub fn read_chunk(&mut self) -> Result<&[u8], ServeError> {
        let limit = self.buf.len().saturating_sub(1);
        self.len = self.stream.read(&mut self.buf[..limit]).map_err(ServeError::Read)?;
        Ok(self.request())
    }

    pub fn request(&self) -> &[u8] {
        &self.buf[..self.len]
    }

    /// Writes headers, then body. A failed header write does not stop the
    /// body write.
    pub fn write_response(&mut self, response: &HttpResponse) -> Vec<WriteFailure> {
        let mut failures = Vec::new();
        let head = response.head();
        let parts = [
            (ResponsePart::Headers, head.as_bytes()),
            (ResponsePart::Body, response.body),
        ];
        for (part, data) in parts {
            if let Err(error) = self.stream.write_all(data) {
                failures.push(WriteFailure { part, error });
            }
        }
        failures
    }
}

#[cfg(test)]
impl AcceptedConnection {
    pub(crate) fn shutdown_write(&self) -> io::Result<()> {
        self.stream.shutdown(std::net::Shutdown::Write)
    }
}
